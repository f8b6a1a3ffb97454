use anyhow::Context;
use serde::Deserialize;
use shared_kernel::http_client::Headers;
use std::collections::HashMap;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct GeocoderSettings {
    pub host: String,
    /// The public geocoder refuses anonymous clients.
    pub user_agent: String,
}

/// Client for a Nominatim style geocoder.
#[derive(Clone, Debug)]
pub struct Searcher {
    config: GeocoderSettings,
}

impl Searcher {
    pub fn new(config: GeocoderSettings) -> Self {
        Searcher { config }
    }

    pub(crate) fn url(&self, path: &str, params: &[(&str, &str)]) -> anyhow::Result<Url> {
        let host = self.config.host.trim_end_matches('/');
        Url::parse_with_params(&format!("{host}{path}"), params)
            .with_context(|| format!("Failed to parse geocoder url for {path}"))
    }

    pub(crate) fn headers(&self) -> Headers {
        HashMap::from([("user-agent", self.config.user_agent.clone())])
    }
}
