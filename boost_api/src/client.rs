use crate::dto::{
    BoostDto, BoostStatusDto, CreateBoostRequest, ExtendBoostRequest, WalletBalanceDto,
};
use crate::envelope::{ApiEnvelope, ApiError};
use crate::session::Session;
use async_trait::async_trait;
use boosts::boost::{Boost, BoostId};
use boosts::form::BoostHours;
use itertools::Itertools;
#[cfg(test)]
use mockall::automock;
use shared_kernel::http_client::HttpClient;

const BOOST_STATUS_PATH: &str = "boosts/status";
const BOOSTS_PATH: &str = "boosts";
const WALLET_BALANCE_PATH: &str = "wallet/balance";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait BoostApi: Send + Sync {
    /// The caller's boosts in server order.
    async fn boosts(&self) -> Result<Vec<Boost>, ApiError>;

    async fn create_boost(&self, request: CreateBoostRequest) -> Result<Boost, ApiError>;

    async fn extend_boost(&self, boost_id: BoostId, hours: BoostHours) -> Result<Boost, ApiError>;

    async fn wallet_balance(&self) -> Result<u64, ApiError>;
}

pub struct HttpBoostApi {
    session: Session,
}

impl HttpBoostApi {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

fn into_boost(dto: BoostDto) -> Result<Boost, ApiError> {
    Boost::try_from(dto).map_err(|err| ApiError::InvalidResponse(err.to_string()))
}

#[async_trait]
impl BoostApi for HttpBoostApi {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn boosts(&self) -> Result<Vec<Boost>, ApiError> {
        let url = self.session.url(BOOST_STATUS_PATH)?;
        let status = HttpClient::get_with_headers::<ApiEnvelope<BoostStatusDto>>(
            url,
            self.session.headers(),
        )
        .await?
        .into_result()?;

        let (boosts, invalid): (Vec<_>, Vec<_>) = status
            .boosts
            .into_iter()
            .map(Boost::try_from)
            .partition_result();
        if !invalid.is_empty() {
            tracing::warn!(?invalid, "skipping boosts the client cannot interpret");
        }
        Ok(boosts)
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn create_boost(&self, request: CreateBoostRequest) -> Result<Boost, ApiError> {
        let url = self.session.url(BOOSTS_PATH)?;
        let dto = HttpClient::post_json::<ApiEnvelope<BoostDto>, _>(
            url,
            self.session.headers(),
            &request,
        )
        .await?
        .into_result()?;
        into_boost(dto)
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn extend_boost(&self, boost_id: BoostId, hours: BoostHours) -> Result<Boost, ApiError> {
        let url = self
            .session
            .url(&format!("{BOOSTS_PATH}/{boost_id}/extend"))?;
        let dto = HttpClient::post_json::<ApiEnvelope<BoostDto>, _>(
            url,
            self.session.headers(),
            &ExtendBoostRequest {
                hours_to_add: hours,
            },
        )
        .await?
        .into_result()?;
        into_boost(dto)
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn wallet_balance(&self) -> Result<u64, ApiError> {
        let url = self.session.url(WALLET_BALANCE_PATH)?;
        let wallet = HttpClient::get_with_headers::<ApiEnvelope<WalletBalanceDto>>(
            url,
            self.session.headers(),
        )
        .await?
        .into_result()?;
        Ok(wallet.balance)
    }
}
