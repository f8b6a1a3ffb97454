use crate::configuration::Settings;
use crate::report;
use anyhow::{anyhow, bail, Context};
use boost_api::client::HttpBoostApi;
use boost_api::interactor::{BoostInteractor, BoostInteractorImpl};
use boost_api::session::Session;
use boosts::boost::BoostId;
use boosts::category::TargetCategory;
use boosts::coordinates::Coordinates;
use boosts::counties::normalize_county;
use boosts::dialog::BoostDialog;
use boosts::form::{BoostHours, RadiusKm};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use location_searcher::reverse::ReverseGeocoder;
use location_searcher::searcher::Searcher;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "boost_planner", about = "Inspect, price and buy TuVibe profile boosts")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the active boosts and the one the form is focused on
    Status(TargetArgs),
    /// Price the boost without buying it
    Quote(TargetArgs),
    /// Create a new boost or extend the focused one
    Submit(TargetArgs),
}

#[derive(Args, Debug, Default)]
struct TargetArgs {
    /// Focus this boost regardless of the targeting
    #[arg(long)]
    boost: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// County name, e.g. "Nairobi County" or "Murang'a"
    #[arg(long)]
    county: Option<String>,
    /// Free text place, the first suggestion is used
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    place: Option<String>,
    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lng: Option<f64>,
    #[arg(long)]
    radius: Option<String>,
    /// Hours to buy, clamped to 1..=6
    #[arg(long, default_value = "1")]
    hours: String,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = Settings::parse()?;
        let pricing = settings.pricing()?;
        let session = Session::try_from(&settings.api)?;
        let interactor = BoostInteractorImpl::new(Arc::new(HttpBoostApi::new(session)), pricing);
        let searcher = Searcher::new(settings.geocoder.clone());

        let now = Utc::now();
        let mut dialog = match interactor.open_dialog(settings.profile.defaults(), now).await {
            Ok(dialog) => dialog,
            Err(err) => {
                report::failure(&err, err.is_retryable());
                return Err(err).context("Failed to load boosts");
            }
        };

        match self.command {
            Command::Status(target) => {
                target.apply(&mut dialog, &searcher).await?;
                report::status(&dialog, now);
            }
            Command::Quote(target) => {
                target.apply(&mut dialog, &searcher).await?;
                report::quote(&dialog, &pricing, now);
            }
            Command::Submit(target) => {
                target.apply(&mut dialog, &searcher).await?;
                report::quote(&dialog, &pricing, now);
                let boost = match interactor.submit(&dialog, now).await {
                    Ok(boost) => boost,
                    Err(err) => {
                        report::failure(&err, err.is_retryable());
                        return Err(err.into());
                    }
                };
                report::submitted(&boost, Utc::now());
            }
        }
        Ok(())
    }
}

impl TargetArgs {
    /// Replays the flags onto the dialog the way a user would edit the form:
    /// pin first, then targeting, then hours.
    async fn apply(
        &self,
        dialog: &mut BoostDialog,
        geocoder: &Searcher,
    ) -> anyhow::Result<()> {
        if let Some(boost) = &self.boost {
            if !dialog.pin(&BoostId::from(boost.as_str())) {
                bail!("Boost {boost} is not active");
            }
        }

        if let Some(category) = &self.category {
            let category = category.parse::<TargetCategory>()?;
            dialog.edit_category(category);
        }

        let explicit_county = match &self.county {
            Some(county) => Some(
                normalize_county(county)
                    .ok_or_else(|| anyhow!("{county} is not one of the 47 counties"))?,
            ),
            None => None,
        };

        if let Some(place) = &self.place {
            let suggestion = geocoder
                .search(place)
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("No place found for {place}"))?;
            tracing::info!(place = %suggestion.display_name, "using place suggestion");
            dialog.edit_coordinates(suggestion.coordinates);
            if explicit_county.is_none() {
                if let Some(county) = suggestion.county {
                    dialog.edit_area(Some(county));
                }
            }
        }

        if let (Some(lat), Some(lng)) = (self.lat, self.lng) {
            let point = Coordinates::new(lat, lng)
                .ok_or_else(|| anyhow!("{lat}, {lng} is not a valid point"))?;
            let location = geocoder.locate(point).await?;
            dialog.edit_coordinates(Some(location.coordinates));
            match (explicit_county, location.county) {
                (None, Some(county)) => dialog.edit_area(Some(county)),
                (None, None) => {
                    tracing::warn!(?point, "picked point is not inside any county")
                }
                _ => {}
            }
        }

        if let Some(county) = explicit_county {
            dialog.edit_area(Some(county));
        }
        if let Some(radius) = &self.radius {
            dialog.edit_radius(RadiusKm::parse(radius));
        }
        dialog.set_hours(BoostHours::parse(&self.hours));
        Ok(())
    }
}
