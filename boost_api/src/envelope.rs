use serde::Deserialize;
use shared_kernel::http_client::HttpClientError;
use thiserror::Error;

/// Every backend response is wrapped as `{ success, data, message }`.
#[derive(Deserialize, Debug)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Rejected(String),
    #[error("The server reported success without data")]
    MissingData,
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    Transport(#[from] HttpClientError),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Transport(HttpClientError::ResponseError(err))
    }
}

impl ApiError {
    /// Transport failures may succeed on retry, rejections will not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

const GENERIC_FAILURE: &str = "Request failed, please try again";

impl<T> ApiEnvelope<T> {
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            let message = self
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return Err(ApiError::Rejected(message));
        }
        self.data.ok_or(ApiError::MissingData)
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiEnvelope, ApiError};
    use serde_json::json;

    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct Balance {
        balance: u64,
    }

    fn parse(value: serde_json::Value) -> Result<Balance, ApiError> {
        serde_json::from_value::<ApiEnvelope<Balance>>(value)
            .unwrap()
            .into_result()
    }

    #[test]
    fn test_successful_envelope_yields_data() {
        let result = parse(json!({ "success": true, "data": { "balance": 30 } }));
        assert_eq!(result.unwrap(), Balance { balance: 30 });
    }

    #[test]
    fn test_failed_envelope_carries_server_message() {
        let result = parse(json!({ "success": false, "message": "Insufficient tokens" }));
        assert!(matches!(result, Err(ApiError::Rejected(message)) if message == "Insufficient tokens"));
    }

    #[test]
    fn test_failed_envelope_without_message_gets_generic_message() {
        let result = parse(json!({ "success": false, "message": "" }));
        assert!(matches!(result, Err(ApiError::Rejected(message)) if !message.is_empty()));
    }

    #[test]
    fn test_success_without_data_is_an_error() {
        let result = parse(json!({ "success": true }));
        assert!(matches!(result, Err(ApiError::MissingData)));
        assert!(!ApiError::MissingData.is_retryable());
    }
}
