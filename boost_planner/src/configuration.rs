use anyhow::Context;
use boost_api::session::ApiSettings;
use boosts::category::TargetCategory;
use boosts::counties::normalize_county;
use boosts::form::ProfileDefaults;
use boosts::pricing::{Pricing, PricingSettings};
use location_searcher::searcher::GeocoderSettings;
use serde::Deserialize;
use shared_kernel::configuration::config;

/// The signed in user's profile, used to seed the boost form.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProfileSettings {
    pub county: Option<String>,
    #[serde(default)]
    pub category: TargetCategory,
}

impl ProfileSettings {
    pub fn defaults(&self) -> ProfileDefaults {
        let county = self.county.as_deref().and_then(|county| {
            let normalized = normalize_county(county);
            if normalized.is_none() {
                tracing::warn!(county, "profile county is not one of the 47 counties");
            }
            normalized
        });
        ProfileDefaults {
            county,
            category: self.category,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub geocoder: GeocoderSettings,
    pub pricing: PricingSettings,
    #[serde(default)]
    pub profile: ProfileSettings,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Settings> {
        config::<Settings>().context("Failed to deserialize settings to boost_planner settings")
    }

    /// A misconfigured token rate makes every price meaningless, so it is fatal.
    pub fn pricing(&self) -> anyhow::Result<Pricing> {
        Pricing::try_from(&self.pricing).context("Invalid pricing settings")
    }
}
