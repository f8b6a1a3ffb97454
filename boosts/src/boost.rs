use crate::category::TargetCategory;
use crate::coordinates::Coordinates;
use crate::counties::{normalize_county, County};
use crate::form::{BoostHours, RadiusKm};
use chrono::{DateTime, Duration, Utc};
use shared_kernel::string_key;
use std::fmt::{Display, Formatter};

string_key!(BoostId);

const CUSTOM_LOCATION: &str = "custom location";

/// Where a boost is aimed, as recorded by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TargetArea {
    County(County),
    /// A map-picked point that is not tied to a county.
    CustomLocation,
    #[default]
    Unspecified,
    /// Text that names none of the counties, kept for display only.
    Unrecognized(String),
}

impl TargetArea {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return TargetArea::Unspecified;
        }
        if trimmed.eq_ignore_ascii_case(CUSTOM_LOCATION) {
            return TargetArea::CustomLocation;
        }
        match normalize_county(trimmed) {
            Some(county) => TargetArea::County(county),
            None => TargetArea::Unrecognized(trimmed.to_owned()),
        }
    }

    pub fn county(&self) -> Option<County> {
        match self {
            TargetArea::County(county) => Some(*county),
            _ => None,
        }
    }
}

impl Display for TargetArea {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetArea::County(county) => county.fmt(f),
            TargetArea::CustomLocation => f.write_str("Custom location"),
            TargetArea::Unspecified => f.write_str("Anywhere"),
            TargetArea::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// A paid, time bounded promotion of a profile.
#[derive(Clone, Debug, PartialEq)]
pub struct Boost {
    pub id: BoostId,
    /// `None` on older records, which count as the default category.
    pub target_category: Option<TargetCategory>,
    pub target_area: TargetArea,
    pub coordinates: Option<Coordinates>,
    pub radius_km: RadiusKm,
    /// `None` when the backend sent no usable timestamp.
    pub ends_at: Option<DateTime<Utc>>,
}

impl Boost {
    pub fn category(&self) -> TargetCategory {
        self.target_category.unwrap_or_default()
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.ends_at.map_or(false, |ends_at| ends_at > now)
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Option<RemainingTime> {
        remaining(self.ends_at, now)
    }
}

/// Time left on a running boost. Never zero or negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RemainingTime(Duration);

impl RemainingTime {
    pub fn duration(&self) -> Duration {
        self.0
    }
}

impl Display for RemainingTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let minutes = self.0.num_minutes();
        write!(f, "{}h {}m", minutes / 60, minutes % 60)
    }
}

/// `None` when there is nothing to count down: the end is missing or not in the future.
pub fn remaining(ends_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<RemainingTime> {
    let left = ends_at? - now;
    (left > Duration::zero()).then_some(RemainingTime(left))
}

/// New end time after adding `hours`. Counts from now when the boost already lapsed.
pub fn extension_preview(
    current_ends_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    hours: BoostHours,
) -> DateTime<Utc> {
    let base = current_ends_at.map_or(now, |ends_at| ends_at.max(now));
    base + hours.duration()
}

#[cfg(test)]
mod tests {
    use super::{extension_preview, remaining, Boost, BoostId, TargetArea};
    use crate::counties::County;
    use crate::form::{BoostHours, RadiusKm};
    use chrono::{Duration, TimeZone, Utc};
    use rstest::rstest;

    #[rstest]
    #[case("", TargetArea::Unspecified)]
    #[case("   ", TargetArea::Unspecified)]
    #[case("Custom Location", TargetArea::CustomLocation)]
    #[case("Kiambu County", TargetArea::County(County::Kiambu))]
    #[case("Atlantis", TargetArea::Unrecognized("Atlantis".to_string()))]
    fn test_target_area_parsing(#[case] raw: &str, #[case] expected: TargetArea) {
        assert_eq!(TargetArea::parse(raw), expected)
    }

    fn boost_ending(ends_at: Option<chrono::DateTime<Utc>>) -> Boost {
        Boost {
            id: BoostId::from("b"),
            target_category: None,
            target_area: TargetArea::Unspecified,
            coordinates: None,
            radius_km: RadiusKm::default(),
            ends_at,
        }
    }

    #[test]
    fn test_boost_is_active_only_before_it_ends() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert!(boost_ending(Some(now + Duration::seconds(1))).is_active(now));
        assert!(!boost_ending(Some(now)).is_active(now));
        assert!(!boost_ending(None).is_active(now));
    }

    #[test]
    fn test_remaining_time_is_formatted_in_hours_and_minutes() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let three_hours = remaining(Some(now + Duration::hours(3)), now).unwrap();
        assert_eq!(three_hours.to_string(), "3h 0m");
        let mixed = remaining(Some(now + Duration::minutes(95) + Duration::seconds(40)), now);
        assert_eq!(mixed.unwrap().to_string(), "1h 35m");
    }

    #[test]
    fn test_no_countdown_for_lapsed_or_missing_end() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(remaining(Some(now), now), None);
        assert_eq!(remaining(Some(now - Duration::minutes(5)), now), None);
        assert_eq!(remaining(None, now), None);
    }

    #[test]
    fn test_extension_of_lapsed_boost_counts_from_now() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let lapsed = Some(now - Duration::hours(5));
        let preview = extension_preview(lapsed, now, BoostHours::parse("2"));
        assert_eq!(preview, now + Duration::hours(2));
    }

    #[test]
    fn test_extension_of_running_boost_counts_from_its_end() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let running = Some(now + Duration::minutes(30));
        let preview = extension_preview(running, now, BoostHours::parse("3"));
        assert_eq!(preview, now + Duration::minutes(210));
    }

    #[test]
    fn test_category_defaults_to_regular() {
        assert_eq!(
            boost_ending(None).category(),
            crate::category::TargetCategory::Regular
        );
    }
}
