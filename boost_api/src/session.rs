use anyhow::Context;
use secrecy::Secret;
use serde::Deserialize;
use shared_kernel::http_client::{bearer_headers, Headers};
use url::Url;

/// Backend section of the application settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub token: Secret<String>,
}

/// Who is calling the backend and where. Passed explicitly to every client
/// instead of being read from ambient storage.
#[derive(Debug, Clone)]
pub struct Session {
    base_url: Url,
    token: Secret<String>,
}

impl Session {
    pub fn new(host: &str, token: Secret<String>) -> anyhow::Result<Self> {
        // Without the trailing slash `Url::join` would drop the last path segment.
        let host = if host.ends_with('/') {
            host.to_owned()
        } else {
            format!("{host}/")
        };
        let base_url = Url::parse(&host).with_context(|| format!("Invalid api host {host}"))?;
        Ok(Session { base_url, token })
    }

    pub fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Failed to build url for {path}"))
    }

    pub fn headers(&self) -> Headers {
        bearer_headers(&self.token)
    }
}

impl TryFrom<&ApiSettings> for Session {
    type Error = anyhow::Error;

    fn try_from(settings: &ApiSettings) -> Result<Self, Self::Error> {
        Session::new(&settings.host, settings.token.clone())
    }
}
