use crate::searcher::Searcher;
use anyhow::Context;
use async_trait::async_trait;
use boosts::coordinates::Coordinates;
use boosts::counties::{AddressComponents, County};
use serde::Deserialize;
use shared_kernel::http_client::HttpClient;

const REVERSE_PATH: &str = "/reverse";

/// A map-picked point together with the county it falls in, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetLocation {
    pub coordinates: Coordinates,
    pub county: Option<County>,
    pub display_name: Option<String>,
}

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn locate(&self, coordinates: Coordinates) -> anyhow::Result<TargetLocation>;
}

#[derive(Deserialize, Debug)]
struct ReverseResponse {
    display_name: Option<String>,
    #[serde(default)]
    address: AddressComponents,
    /// Set instead of an address for points in the sea or outside coverage.
    error: Option<String>,
}

#[async_trait]
impl ReverseGeocoder for Searcher {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn locate(&self, coordinates: Coordinates) -> anyhow::Result<TargetLocation> {
        let url = self.url(
            REVERSE_PATH,
            &[
                ("format", "jsonv2"),
                ("lat", &coordinates.lat().to_string()),
                ("lon", &coordinates.lng().to_string()),
                ("zoom", "10"),
                ("addressdetails", "1"),
            ],
        )?;
        let response: ReverseResponse = HttpClient::get_with_headers(url, self.headers())
            .await
            .context("Reverse geocoding failed")?;

        if let Some(error) = &response.error {
            tracing::debug!(%error, "geocoder found no address for point");
        }
        let county = response.address.county();
        if county.is_none() {
            tracing::debug!(address = ?response.address, "point is outside the 47 counties");
        }

        Ok(TargetLocation {
            coordinates,
            county,
            display_name: response.display_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ReverseGeocoder;
    use crate::searcher::{GeocoderSettings, Searcher};
    use boosts::coordinates::Coordinates;
    use boosts::counties::County;
    use httpmock::prelude::*;
    use serde_json::json;

    fn searcher(server: &MockServer) -> Searcher {
        Searcher::new(GeocoderSettings {
            host: server.base_url(),
            user_agent: "tuvibe-tests".to_string(),
        })
    }

    #[tokio::test]
    async fn test_point_is_resolved_to_county() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/reverse")
                    .query_param("format", "jsonv2")
                    .header("user-agent", "tuvibe-tests");
                then.status(200).json_body(json!({
                    "display_name": "Ruaka, Kiambu, Kenya",
                    "address": {
                        "village": "Ruaka",
                        "county": "Kiambu County",
                        "country": "Kenya"
                    }
                }));
            })
            .await;

        let point = Coordinates::new(-1.2059, 36.7782).unwrap();
        let location = searcher(&server).locate(point).await.unwrap();

        mock.assert_async().await;
        assert_eq!(location.county, Some(County::Kiambu));
        assert_eq!(location.coordinates, point);
    }

    #[tokio::test]
    async fn test_point_without_address_has_no_county() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/reverse");
                then.status(200).json_body(json!({ "error": "Unable to geocode" }));
            })
            .await;

        let point = Coordinates::new(-4.5, 40.2).unwrap();
        let location = searcher(&server).locate(point).await.unwrap();

        assert_eq!(location.county, None);
        assert_eq!(location.display_name, None);
    }
}
