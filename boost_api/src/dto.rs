use boosts::boost::{Boost, BoostId, TargetArea};
use boosts::category::{TargetCategory, UnknownCategory};
use boosts::coordinates::Coordinates;
use boosts::counties::County;
use boosts::form::{BoostHours, RadiusKm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ids and decimals arrive either as JSON numbers or as strings, depending on
/// which backend column they came from.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum Loose {
    Number(f64),
    Text(String),
}

impl Loose {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Loose::Number(number) => Some(*number),
            Loose::Text(text) => text.trim().parse().ok(),
        }
    }

    fn as_id(&self) -> String {
        match self {
            Loose::Number(number) if number.fract() == 0.0 => format!("{number:.0}"),
            Loose::Number(number) => number.to_string(),
            Loose::Text(text) => text.clone(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct BoostDto {
    id: Loose,
    target_category: Option<String>,
    target_area: Option<String>,
    target_lat: Option<Loose>,
    target_lng: Option<Loose>,
    radius_km: Option<Loose>,
    ends_at: Option<String>,
}

impl TryFrom<BoostDto> for Boost {
    type Error = UnknownCategory;

    fn try_from(dto: BoostDto) -> Result<Self, Self::Error> {
        let target_category = dto
            .target_category
            .filter(|category| !category.trim().is_empty())
            .map(|category| category.parse::<TargetCategory>())
            .transpose()?;
        let coordinates = Coordinates::from_parts(
            dto.target_lat.as_ref().and_then(Loose::as_f64),
            dto.target_lng.as_ref().and_then(Loose::as_f64),
        );
        let radius_km = dto
            .radius_km
            .as_ref()
            .and_then(Loose::as_f64)
            .map(RadiusKm::from)
            .unwrap_or_default();
        let ends_at = dto
            .ends_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|ends_at| ends_at.with_timezone(&Utc));

        Ok(Boost {
            id: BoostId::new(dto.id.as_id()),
            target_category,
            target_area: TargetArea::parse(dto.target_area.as_deref().unwrap_or_default()),
            coordinates,
            radius_km,
            ends_at,
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct BoostStatusDto {
    #[serde(default)]
    pub boosts: Vec<BoostDto>,
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct WalletBalanceDto {
    pub balance: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreateBoostRequest {
    pub target_category: TargetCategory,
    pub target_area: County,
    pub target_lat: Option<f64>,
    pub target_lng: Option<f64>,
    pub radius_km: RadiusKm,
    pub hours: BoostHours,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ExtendBoostRequest {
    pub hours_to_add: BoostHours,
}
