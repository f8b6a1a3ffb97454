use crate::boost::{extension_preview, Boost, BoostId, RemainingTime};
use crate::category::TargetCategory;
use crate::coordinates::Coordinates;
use crate::counties::County;
use crate::form::{BoostFormState, BoostHours, ProfileDefaults, RadiusKm};
use crate::pricing::Pricing;
use crate::selection::{active_boosts, select_boost};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoostFormError {
    #[error("Choose one of the 47 counties before creating a boost")]
    TargetingIncomplete,
}

/// Which server call the dialog resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoostMode {
    Creating,
    Extending(BoostId),
}

#[derive(Clone, Debug, PartialEq)]
pub enum BoostSubmission {
    Create {
        category: TargetCategory,
        county: County,
        coordinates: Option<Coordinates>,
        radius_km: RadiusKm,
        hours: BoostHours,
        cost_tokens: u64,
    },
    Extend {
        boost_id: BoostId,
        hours: BoostHours,
        cost_tokens: u64,
        preview_ends_at: DateTime<Utc>,
    },
}

impl BoostSubmission {
    pub fn cost_tokens(&self) -> u64 {
        match self {
            BoostSubmission::Create { cost_tokens, .. }
            | BoostSubmission::Extend { cost_tokens, .. } => *cost_tokens,
        }
    }
}

/// State behind the boost management dialog: the user's active boosts, an
/// optional explicitly picked boost and the form being edited.
#[derive(Clone, Debug)]
pub struct BoostDialog {
    defaults: ProfileDefaults,
    active: Vec<Boost>,
    pinned: Option<BoostId>,
    form: BoostFormState,
}

impl BoostDialog {
    pub fn open(defaults: ProfileDefaults, boosts: Vec<Boost>, now: DateTime<Utc>) -> Self {
        let mut dialog = BoostDialog {
            defaults,
            active: active_boosts(boosts, now),
            pinned: None,
            form: BoostFormState::new(defaults),
        };
        dialog.follow_selection();
        dialog
    }

    /// Returns the dialog to its just-opened state without the boost list.
    pub fn close(&mut self) {
        self.active.clear();
        self.pinned = None;
        self.form.reset(self.defaults);
    }

    /// Replaces the boost list, e.g. after a status poll or a submission.
    pub fn refresh(&mut self, boosts: Vec<Boost>, now: DateTime<Utc>) {
        self.active = active_boosts(boosts, now);
        if self
            .pinned
            .as_ref()
            .is_some_and(|pinned| !self.active.iter().any(|boost| &boost.id == pinned))
        {
            tracing::debug!(pinned = ?self.pinned, "pinned boost is no longer active");
            self.pinned = None;
        }
        self.follow_selection();
    }

    /// The user picked a boost from the list. Returns false if it is not active.
    pub fn pin(&mut self, boost_id: &BoostId) -> bool {
        if !self.active.iter().any(|boost| &boost.id == boost_id) {
            return false;
        }
        self.pinned = Some(boost_id.clone());
        self.form.resume_following();
        self.follow_selection();
        true
    }

    pub fn form(&self) -> &BoostFormState {
        &self.form
    }

    pub fn active_boosts(&self) -> &[Boost] {
        &self.active
    }

    pub fn edit_category(&mut self, category: TargetCategory) {
        self.form.edit_category(category);
    }

    pub fn edit_area(&mut self, area: Option<County>) {
        self.form.edit_area(area);
    }

    pub fn edit_coordinates(&mut self, coordinates: Option<Coordinates>) {
        self.form.edit_coordinates(coordinates);
    }

    pub fn edit_radius(&mut self, radius_km: RadiusKm) {
        self.form.edit_radius(radius_km);
    }

    pub fn set_hours(&mut self, hours: BoostHours) {
        self.form.set_hours(hours);
    }

    pub fn selected_boost(&self) -> Option<&Boost> {
        select_boost(
            &self.active,
            self.form.category(),
            self.form.area(),
            self.pinned.as_ref(),
        )
    }

    /// Extending when the focused boost was picked explicitly or is aimed at what
    /// the form targets, creating otherwise.
    pub fn mode(&self) -> BoostMode {
        let Some(selected) = self.selected_boost() else {
            return BoostMode::Creating;
        };
        let pinned = self.pinned.as_ref() == Some(&selected.id);
        let same_category = selected.category() == self.form.category();
        let same_area = self
            .form
            .area()
            .map_or(true, |county| selected.target_area.county() == Some(county));
        if pinned || (same_category && same_area) {
            BoostMode::Extending(selected.id.clone())
        } else {
            BoostMode::Creating
        }
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Option<RemainingTime> {
        self.selected_boost()?.remaining(now)
    }

    /// New end time of the boost being extended, `None` while creating.
    pub fn preview_ends_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.mode() {
            BoostMode::Extending(_) => {
                let ends_at = self.selected_boost().and_then(|boost| boost.ends_at);
                Some(extension_preview(ends_at, now, self.form.hours()))
            }
            BoostMode::Creating => None,
        }
    }

    pub fn quote(&self, pricing: &Pricing) -> u64 {
        pricing.boost_cost(self.form.hours())
    }

    pub fn submission(
        &self,
        pricing: &Pricing,
        now: DateTime<Utc>,
    ) -> Result<BoostSubmission, BoostFormError> {
        let hours = self.form.hours();
        let cost_tokens = self.quote(pricing);
        match self.mode() {
            BoostMode::Extending(boost_id) => {
                let ends_at = self.selected_boost().and_then(|boost| boost.ends_at);
                Ok(BoostSubmission::Extend {
                    boost_id,
                    hours,
                    cost_tokens,
                    preview_ends_at: extension_preview(ends_at, now, hours),
                })
            }
            BoostMode::Creating => {
                let county = self
                    .form
                    .area()
                    .ok_or(BoostFormError::TargetingIncomplete)?;
                Ok(BoostSubmission::Create {
                    category: self.form.category(),
                    county,
                    coordinates: self.form.coordinates(),
                    radius_km: self.form.radius_km(),
                    hours,
                    cost_tokens,
                })
            }
        }
    }

    fn follow_selection(&mut self) {
        let Some(selected) = self.selected_boost().cloned() else {
            return;
        };
        if self.form.follow(&selected) {
            tracing::debug!(boost_id = %selected.id, "boost form follows selected boost");
        }
    }
}
