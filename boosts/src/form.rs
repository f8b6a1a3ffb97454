use crate::boost::Boost;
use crate::category::TargetCategory;
use crate::coordinates::Coordinates;
use crate::counties::County;
use serde::{Deserialize, Serialize};

/// Whole boost hours, always within `[MIN, MAX]`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "u32")]
pub struct BoostHours(u32);

impl BoostHours {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 6;

    /// Text that is not a number coerces to the minimum.
    pub fn parse(input: &str) -> Self {
        input
            .trim()
            .parse::<f64>()
            .map(BoostHours::from)
            .unwrap_or_default()
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn duration(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.0))
    }
}

impl Default for BoostHours {
    fn default() -> Self {
        BoostHours(Self::MIN)
    }
}

impl From<f64> for BoostHours {
    fn from(hours: f64) -> Self {
        if hours.is_nan() {
            return BoostHours::default();
        }
        let clamped = hours.clamp(f64::from(Self::MIN), f64::from(Self::MAX));
        BoostHours(clamped.floor() as u32)
    }
}

impl From<BoostHours> for u32 {
    fn from(hours: BoostHours) -> Self {
        hours.0
    }
}

/// Targeting radius in kilometres, always within `[MIN, MAX]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct RadiusKm(f64);

impl RadiusKm {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 200.0;
    pub const DEFAULT: f64 = 10.0;

    /// Text that is not a number falls back to the default radius.
    pub fn parse(input: &str) -> Self {
        input
            .trim()
            .parse::<f64>()
            .map(RadiusKm::from)
            .unwrap_or_default()
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Default for RadiusKm {
    fn default() -> Self {
        RadiusKm(Self::DEFAULT)
    }
}

impl From<f64> for RadiusKm {
    fn from(km: f64) -> Self {
        if km.is_nan() {
            return RadiusKm::default();
        }
        RadiusKm(km.clamp(Self::MIN, Self::MAX))
    }
}

impl From<RadiusKm> for f64 {
    fn from(radius: RadiusKm) -> Self {
        radius.0
    }
}

/// What the form falls back to whenever the dialog is reset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProfileDefaults {
    pub county: Option<County>,
    pub category: TargetCategory,
}

/// In-progress boost editing state.
///
/// While `target_edited` is false the targeting follows whichever boost is
/// selected. The first manual change to category, area, coordinates or radius
/// freezes it until the form is reset.
#[derive(Clone, Debug, PartialEq)]
pub struct BoostFormState {
    category: TargetCategory,
    area: Option<County>,
    coordinates: Option<Coordinates>,
    radius_km: RadiusKm,
    hours: BoostHours,
    target_edited: bool,
}

impl BoostFormState {
    pub fn new(defaults: ProfileDefaults) -> Self {
        BoostFormState {
            category: defaults.category,
            area: defaults.county,
            coordinates: None,
            radius_km: RadiusKm::default(),
            hours: BoostHours::default(),
            target_edited: false,
        }
    }

    pub fn reset(&mut self, defaults: ProfileDefaults) {
        *self = BoostFormState::new(defaults);
    }

    pub fn category(&self) -> TargetCategory {
        self.category
    }

    pub fn area(&self) -> Option<County> {
        self.area
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn radius_km(&self) -> RadiusKm {
        self.radius_km
    }

    pub fn hours(&self) -> BoostHours {
        self.hours
    }

    pub fn target_edited(&self) -> bool {
        self.target_edited
    }

    /// Copies the targeting of `boost` into the form. Ignored once the user has
    /// edited the targeting. Returns whether the form was updated.
    pub fn follow(&mut self, boost: &Boost) -> bool {
        if self.target_edited {
            return false;
        }
        self.category = boost.category();
        self.area = boost.target_area.county();
        self.coordinates = boost.coordinates;
        self.radius_km = boost.radius_km;
        true
    }

    /// Re-enables following the selected boost, used when the user picks one explicitly.
    pub(crate) fn resume_following(&mut self) {
        self.target_edited = false;
    }

    pub fn edit_category(&mut self, category: TargetCategory) {
        if self.category != category {
            self.category = category;
            self.target_edited = true;
        }
    }

    pub fn edit_area(&mut self, area: Option<County>) {
        if self.area != area {
            self.area = area;
            self.target_edited = true;
        }
    }

    pub fn edit_coordinates(&mut self, coordinates: Option<Coordinates>) {
        if self.coordinates != coordinates {
            self.coordinates = coordinates;
            self.target_edited = true;
        }
    }

    pub fn edit_radius(&mut self, radius_km: RadiusKm) {
        if self.radius_km != radius_km {
            self.radius_km = radius_km;
            self.target_edited = true;
        }
    }

    /// Hours are not part of the targeting, changing them keeps the form following.
    pub fn set_hours(&mut self, hours: BoostHours) {
        self.hours = hours;
    }
}

#[cfg(test)]
mod tests {
    use super::{BoostFormState, BoostHours, ProfileDefaults, RadiusKm};
    use crate::boost::{Boost, BoostId, TargetArea};
    use crate::category::TargetCategory;
    use crate::coordinates::Coordinates;
    use crate::counties::County;
    use chrono::{Duration, Utc};
    use rstest::rstest;

    #[rstest]
    #[case("99", 6)]
    #[case("6", 6)]
    #[case("3.7", 3)]
    #[case("1", 1)]
    #[case("0", 1)]
    #[case("-4", 1)]
    #[case("abc", 1)]
    #[case("", 1)]
    #[case("NaN", 1)]
    #[case("inf", 6)]
    fn test_hours_are_clamped(#[case] input: &str, #[case] expected: u32) {
        let hours = BoostHours::parse(input);
        assert_eq!(hours.get(), expected);
        assert!((BoostHours::MIN..=BoostHours::MAX).contains(&hours.get()));
    }

    #[rstest]
    #[case("250", 200.0)]
    #[case("0.2", 1.0)]
    #[case("-3", 1.0)]
    #[case("12.5", 12.5)]
    #[case("far", 10.0)]
    #[case("NaN", 10.0)]
    fn test_radius_is_clamped(#[case] input: &str, #[case] expected: f64) {
        let radius = RadiusKm::parse(input);
        assert_eq!(radius.get(), expected);
        assert!((RadiusKm::MIN..=RadiusKm::MAX).contains(&radius.get()));
    }

    #[test]
    fn test_out_of_range_hours_deserialize_into_bounds() {
        let hours: BoostHours = serde_json::from_str("12").unwrap();
        assert_eq!(hours.get(), 6);
    }

    fn sponsor_boost_in_kiambu() -> Boost {
        Boost {
            id: BoostId::from("b-1"),
            target_category: Some(TargetCategory::Sponsor),
            target_area: TargetArea::County(County::Kiambu),
            coordinates: Coordinates::new(-1.17, 36.83),
            radius_km: RadiusKm::from(25.0),
            ends_at: Some(Utc::now() + Duration::hours(2)),
        }
    }

    fn defaults() -> ProfileDefaults {
        ProfileDefaults {
            county: Some(County::Nairobi),
            category: TargetCategory::Regular,
        }
    }

    #[test]
    fn test_new_form_uses_profile_defaults() {
        let form = BoostFormState::new(defaults());
        assert_eq!(form.category(), TargetCategory::Regular);
        assert_eq!(form.area(), Some(County::Nairobi));
        assert_eq!(form.radius_km(), RadiusKm::default());
        assert_eq!(form.hours().get(), 1);
        assert!(!form.target_edited());
    }

    #[test]
    fn test_untouched_form_follows_boost() {
        let mut form = BoostFormState::new(defaults());
        assert!(form.follow(&sponsor_boost_in_kiambu()));
        assert_eq!(form.category(), TargetCategory::Sponsor);
        assert_eq!(form.area(), Some(County::Kiambu));
        assert_eq!(form.radius_km().get(), 25.0);
    }

    #[test]
    fn test_edited_form_stops_following() {
        let mut form = BoostFormState::new(defaults());
        form.edit_radius(RadiusKm::from(40.0));
        assert!(form.target_edited());
        assert!(!form.follow(&sponsor_boost_in_kiambu()));
        assert_eq!(form.category(), TargetCategory::Regular);
        assert_eq!(form.radius_km().get(), 40.0);
    }

    #[test]
    fn test_setting_the_same_value_is_not_an_edit() {
        let mut form = BoostFormState::new(defaults());
        form.edit_category(TargetCategory::Regular);
        form.edit_area(Some(County::Nairobi));
        form.set_hours(BoostHours::parse("4"));
        assert!(!form.target_edited());
        assert_eq!(form.hours().get(), 4);
    }

    #[test]
    fn test_reset_clears_edits() {
        let mut form = BoostFormState::new(defaults());
        form.edit_category(TargetCategory::UrbanChics);
        form.reset(defaults());
        assert_eq!(form, BoostFormState::new(defaults()));
    }
}
