use boosts::boost::Boost;
use boosts::dialog::{BoostDialog, BoostMode};
use boosts::pricing::Pricing;
use chrono::{DateTime, Utc};
use shared_kernel::nairobi_date_time::NairobiTZDateTime;
use std::fmt::{Display, Write};

pub fn status(dialog: &BoostDialog, now: DateTime<Utc>) {
    println!("{}", render_status(dialog, now));
}

pub fn quote(dialog: &BoostDialog, pricing: &Pricing, now: DateTime<Utc>) {
    println!("{}", render_quote(dialog, pricing, now));
}

pub fn submitted(boost: &Boost, now: DateTime<Utc>) {
    println!("Submitted {}", render_boost(boost, now));
}

pub fn failure(error: &impl Display, retryable: bool) {
    eprintln!("{}", render_failure(error, retryable));
}

fn render_failure(error: &impl Display, retryable: bool) -> String {
    if retryable {
        format!("{error}. This looks temporary, try again in a moment.")
    } else {
        error.to_string()
    }
}

fn render_boost(boost: &Boost, now: DateTime<Utc>) -> String {
    let remaining = boost
        .remaining(now)
        .map_or_else(|| "lapsed".to_string(), |left| format!("{left} left"));
    let ends_at = boost
        .ends_at
        .map_or_else(|| "unknown".to_string(), |at| NairobiTZDateTime::from(at).to_string());
    format!(
        "boost {} [{} in {}, {} km] ends {ends_at} ({remaining})",
        boost.id,
        boost.category(),
        boost.target_area,
        boost.radius_km.get()
    )
}

fn render_status(dialog: &BoostDialog, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    if dialog.active_boosts().is_empty() {
        out.push_str("No active boosts");
    }
    for boost in dialog.active_boosts() {
        let marker = if dialog.selected_boost().map(|selected| &selected.id) == Some(&boost.id) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(out, "{marker} {}", render_boost(boost, now));
    }
    out.trim_end().to_string()
}

fn render_quote(dialog: &BoostDialog, pricing: &Pricing, now: DateTime<Utc>) -> String {
    let form = dialog.form();
    let hours = form.hours().get();
    let cost = dialog.quote(pricing);
    match (dialog.mode(), dialog.preview_ends_at(now)) {
        (BoostMode::Extending(boost_id), Some(ends_at)) => format!(
            "Extend boost {boost_id} by {hours}h for {cost} tokens, new end {}",
            NairobiTZDateTime::from(ends_at)
        ),
        _ => {
            let area = form
                .area()
                .map_or_else(|| "no county".to_string(), |county| county.to_string());
            format!(
                "Create {} boost in {area} ({} km) for {hours}h at {cost} tokens",
                form.category(),
                form.radius_km().get()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{render_failure, render_quote, render_status};
    use boost_api::envelope::ApiError;
    use boost_api::interactor::SubmitBoostError;
    use boosts::boost::{Boost, BoostId, TargetArea};
    use boosts::category::TargetCategory;
    use boosts::counties::County;
    use boosts::dialog::BoostDialog;
    use boosts::form::{BoostHours, ProfileDefaults, RadiusKm};
    use boosts::pricing::{Pricing, PricingSettings};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn pricing() -> Pricing {
        Pricing::try_from(&PricingSettings {
            tokens_per_currency_unit: 1.0,
            boost_price_per_hour: 15.0,
        })
        .unwrap()
    }

    fn dialog(boosts: Vec<Boost>) -> BoostDialog {
        BoostDialog::open(
            ProfileDefaults {
                county: Some(County::Kiambu),
                category: TargetCategory::Sponsor,
            },
            boosts,
            now(),
        )
    }

    fn kiambu_boost() -> Boost {
        Boost {
            id: BoostId::from("1"),
            target_category: Some(TargetCategory::Sponsor),
            target_area: TargetArea::County(County::Kiambu),
            coordinates: None,
            radius_km: RadiusKm::default(),
            ends_at: Some(now() + Duration::hours(3)),
        }
    }

    #[test]
    fn test_status_marks_selected_boost() {
        let rendered = render_status(&dialog(vec![kiambu_boost()]), now());
        assert_eq!(
            rendered,
            "* boost 1 [Sponsor in Kiambu, 10 km] ends Fri 01 Mar 2024, 15:00 EAT (3h 0m left)"
        );
    }

    #[test]
    fn test_status_without_boosts() {
        assert_eq!(render_status(&dialog(vec![]), now()), "No active boosts");
    }

    #[test]
    fn test_extension_quote_shows_new_end() {
        let mut dialog = dialog(vec![kiambu_boost()]);
        dialog.set_hours(BoostHours::parse("2"));
        assert_eq!(
            render_quote(&dialog, &pricing(), now()),
            "Extend boost 1 by 2h for 30 tokens, new end Fri 01 Mar 2024, 17:00 EAT"
        );
    }

    #[test]
    fn test_create_quote_names_the_county() {
        let dialog = dialog(vec![]);
        assert_eq!(
            render_quote(&dialog, &pricing(), now()),
            "Create Sponsor boost in Kiambu (10 km) for 1h at 15 tokens"
        );
    }

    #[test]
    fn test_transport_failure_suggests_retry() {
        let err = SubmitBoostError::Api(ApiError::from(anyhow::anyhow!("connection reset")));
        assert_eq!(
            render_failure(&err, err.is_retryable()),
            "connection reset. This looks temporary, try again in a moment."
        );
    }

    #[test]
    fn test_rejection_is_shown_verbatim() {
        let err = ApiError::Rejected("Boost not found".to_string());
        assert_eq!(render_failure(&err, err.is_retryable()), "Boost not found");
    }
}
