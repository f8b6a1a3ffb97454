use anyhow::Context;
use lazy_static::lazy_static;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error as ThisError;
use url::Url;

lazy_static! {
    static ref CLIENT: ClientWithMiddleware = {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        ClientBuilder::new(reqwest::Client::new())
            // Retry failed requests.
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .with(TracingMiddleware::default())
            .build()
    };
    // Writes are not idempotent on the backend, a retried create could buy twice.
    static ref WRITE_CLIENT: ClientWithMiddleware = ClientBuilder::new(reqwest::Client::new())
        .with(TracingMiddleware::default())
        .build();
}

pub struct HttpClient;

#[derive(ThisError, Debug)]
pub enum HttpClientError {
    #[error(transparent)]
    ResponseError(#[from] anyhow::Error),
    #[error("httpBuilderError {0}")]
    HTTPBuilderError(String),
}

pub type Headers = HashMap<&'static str, String>;

/// Authorization header for a bearer session token.
pub fn bearer_headers(token: &Secret<String>) -> Headers {
    HashMap::from([(
        "authorization",
        format!("Bearer {}", token.expose_secret()),
    )])
}

struct HeadersMapGenerator(HeaderMap);

impl HeadersMapGenerator {
    fn into_inner(self) -> HeaderMap {
        self.0
    }
}

impl TryFrom<Headers> for HeadersMapGenerator {
    type Error = HttpClientError;

    fn try_from(value: Headers) -> Result<Self, Self::Error> {
        let mut header_map = HeaderMap::new();

        for (key, value) in value.into_iter() {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|err| HttpClientError::HTTPBuilderError(format!("{err} {key}")))?;
            let value = HeaderValue::from_str(&value)
                .map_err(|err| HttpClientError::HTTPBuilderError(format!("{err} for {key}")))?;
            header_map.insert(name, value);
        }
        Ok(Self(header_map))
    }
}

impl HttpClient {
    pub async fn get_with_headers<DTO: DeserializeOwned>(
        url: Url,
        headers: Headers,
    ) -> Result<DTO, HttpClientError> {
        let header_map = HeadersMapGenerator::try_from(headers)?.into_inner();
        Self::send_json(CLIENT.get(url).headers(header_map)).await
    }

    pub async fn post_json<DTO: DeserializeOwned, Body: Serialize + ?Sized>(
        url: Url,
        headers: Headers,
        body: &Body,
    ) -> Result<DTO, HttpClientError> {
        let header_map = HeadersMapGenerator::try_from(headers)?.into_inner();
        Self::send_json(WRITE_CLIENT.post(url).headers(header_map).json(body)).await
    }

    async fn send_json<DTO: DeserializeOwned>(
        request: RequestBuilder,
    ) -> Result<DTO, HttpClientError> {
        request
            .send()
            .await
            .context("Failed to get json response")
            .map_err(HttpClientError::ResponseError)?
            .json::<DTO>()
            .await
            .context("Failed to deserialize response")
            .map_err(HttpClientError::ResponseError)
    }
}
