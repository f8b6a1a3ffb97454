use crate::client::BoostApi;
use crate::dto::CreateBoostRequest;
use crate::envelope::ApiError;
use async_trait::async_trait;
use boosts::boost::Boost;
use boosts::dialog::{BoostDialog, BoostFormError, BoostSubmission};
use boosts::form::ProfileDefaults;
use boosts::pricing::{ensure_affordable, InsufficientTokens, Pricing};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubmitBoostError {
    #[error(transparent)]
    Form(#[from] BoostFormError),
    #[error(transparent)]
    InsufficientTokens(#[from] InsufficientTokens),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitBoostError {
    /// Only transport failures are worth retrying, the form and wallet state will
    /// not change by themselves.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitBoostError::Api(err) if err.is_retryable())
    }
}

#[async_trait]
pub trait BoostInteractor: Send + Sync {
    async fn open_dialog(
        &self,
        defaults: ProfileDefaults,
        now: DateTime<Utc>,
    ) -> Result<BoostDialog, ApiError>;

    /// Reloads the boost list. On failure the dialog is left as it was.
    async fn refresh_dialog(
        &self,
        dialog: &mut BoostDialog,
        now: DateTime<Utc>,
    ) -> Result<(), ApiError>;

    /// Sends the create or extend call the dialog resolves to. The dialog itself
    /// is not modified, callers refresh it once the call succeeded.
    async fn submit(
        &self,
        dialog: &BoostDialog,
        now: DateTime<Utc>,
    ) -> Result<Boost, SubmitBoostError>;
}

pub struct BoostInteractorImpl {
    api: Arc<dyn BoostApi>,
    pricing: Pricing,
}

impl BoostInteractorImpl {
    pub fn new(api: Arc<dyn BoostApi>, pricing: Pricing) -> Self {
        Self { api, pricing }
    }
}

#[async_trait]
impl BoostInteractor for BoostInteractorImpl {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn open_dialog(
        &self,
        defaults: ProfileDefaults,
        now: DateTime<Utc>,
    ) -> Result<BoostDialog, ApiError> {
        let boosts = self.api.boosts().await?;
        Ok(BoostDialog::open(defaults, boosts, now))
    }

    #[tracing::instrument(err, skip(self, dialog), level = "info")]
    async fn refresh_dialog(
        &self,
        dialog: &mut BoostDialog,
        now: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        let boosts = self.api.boosts().await?;
        dialog.refresh(boosts, now);
        Ok(())
    }

    #[tracing::instrument(err, skip(self, dialog), level = "info")]
    async fn submit(
        &self,
        dialog: &BoostDialog,
        now: DateTime<Utc>,
    ) -> Result<Boost, SubmitBoostError> {
        let submission = dialog.submission(&self.pricing, now)?;
        let balance = self.api.wallet_balance().await?;
        ensure_affordable(submission.cost_tokens(), balance)?;

        let boost = match submission {
            BoostSubmission::Create {
                category,
                county,
                coordinates,
                radius_km,
                hours,
                ..
            } => {
                let request = CreateBoostRequest {
                    target_category: category,
                    target_area: county,
                    target_lat: coordinates.map(|point| point.lat()),
                    target_lng: coordinates.map(|point| point.lng()),
                    radius_km,
                    hours,
                };
                self.api.create_boost(request).await?
            }
            BoostSubmission::Extend {
                boost_id, hours, ..
            } => self.api.extend_boost(boost_id, hours).await?,
        };
        tracing::info!(boost_id = %boost.id, "boost submitted");
        Ok(boost)
    }
}
