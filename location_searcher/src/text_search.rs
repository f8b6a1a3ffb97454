use crate::latest::LatestRequest;
use crate::searcher::Searcher;
use anyhow::{anyhow, Context};
use boosts::coordinates::Coordinates;
use boosts::counties::{normalize_county, AddressComponents, County};
use serde::Deserialize;
use shared_kernel::http_client::HttpClient;
use shared_kernel::non_empty_string;

const SEARCH_PATH: &str = "/search";
const SEARCH_LIMIT: &str = "8";

non_empty_string!(LocationSearchText);

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSuggestion {
    pub display_name: String,
    pub coordinates: Option<Coordinates>,
    pub county: Option<County>,
}

#[derive(Deserialize, Debug)]
struct SearchResult {
    display_name: String,
    lat: Option<String>,
    lon: Option<String>,
    #[serde(default)]
    address: AddressComponents,
}

impl From<SearchResult> for PlaceSuggestion {
    fn from(result: SearchResult) -> Self {
        let parse = |value: &Option<String>| value.as_deref().and_then(|v| v.parse::<f64>().ok());
        let county = result
            .address
            .county()
            .or_else(|| normalize_county(&result.display_name));
        PlaceSuggestion {
            coordinates: Coordinates::from_parts(parse(&result.lat), parse(&result.lon)),
            county,
            display_name: result.display_name,
        }
    }
}

impl Searcher {
    /// Free text place search restricted to Kenya.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn search(&self, text: &str) -> anyhow::Result<Vec<PlaceSuggestion>> {
        let text = LocationSearchText::try_from(text)
            .map_err(|err| anyhow!("Cannot search for location with empty text. Error: {err}"))?;
        let url = self.url(
            SEARCH_PATH,
            &[
                ("q", text.as_ref()),
                ("format", "jsonv2"),
                ("countrycodes", "ke"),
                ("addressdetails", "1"),
                ("limit", SEARCH_LIMIT),
            ],
        )?;
        let results: Vec<SearchResult> = HttpClient::get_with_headers(url, self.headers())
            .await
            .context("Location search failed")?;
        Ok(results.into_iter().map(PlaceSuggestion::from).collect())
    }

    /// Like [`Searcher::search`], but yields `None` when a newer search was issued
    /// on `latest` while this one was in flight.
    pub async fn search_latest(
        &self,
        latest: &LatestRequest,
        text: &str,
    ) -> anyhow::Result<Option<Vec<PlaceSuggestion>>> {
        let ticket = latest.issue();
        let results = self.search(text).await;
        // A superseded search is dropped whether it succeeded or not.
        if !latest.is_latest(ticket) {
            tracing::debug!(text, "discarding superseded location search");
            return Ok(None);
        }
        results.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use crate::latest::LatestRequest;
    use crate::searcher::{GeocoderSettings, Searcher};
    use boosts::counties::County;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    fn searcher(server: &MockServer) -> Searcher {
        Searcher::new(GeocoderSettings {
            host: server.base_url(),
            user_agent: "tuvibe-tests".to_string(),
        })
    }

    #[tokio::test]
    async fn test_results_carry_county_and_coordinates() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search")
                    .query_param("q", "Nyali")
                    .query_param("countrycodes", "ke");
                then.status(200).json_body(json!([
                    {
                        "display_name": "Nyali, Mombasa, Kenya",
                        "lat": "-4.0435",
                        "lon": "39.7105",
                        "address": { "suburb": "Nyali", "state": "Mombasa County" }
                    },
                    { "display_name": "Nyali Beach, Kenya", "lat": "bad", "lon": "39.72" }
                ]));
            })
            .await;

        let results = searcher(&server).search(" Nyali ").await.unwrap();

        mock.assert_async().await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].county, Some(County::Mombasa));
        assert!(results[0].coordinates.is_some());
        assert_eq!(results[1].county, None);
        assert_eq!(results[1].coordinates, None);
    }

    #[tokio::test]
    async fn test_blank_search_is_rejected_without_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200).json_body(json!([]));
            })
            .await;

        assert!(searcher(&server).search("   ").await.is_err());
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_superseded_search_is_discarded() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search").query_param("q", "Kis");
                then.status(200)
                    .delay(Duration::from_millis(300))
                    .json_body(json!([{ "display_name": "Kisii, Kenya" }]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search").query_param("q", "Kisumu");
                then.status(200)
                    .json_body(json!([{ "display_name": "Kisumu, Kenya" }]));
            })
            .await;

        let searcher = searcher(&server);
        let latest = LatestRequest::default();
        let slow = searcher.search_latest(&latest, "Kis");
        let fast = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            searcher.search_latest(&latest, "Kisumu").await
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(slow.unwrap(), None);
        let fast = fast.unwrap().unwrap();
        assert_eq!(fast[0].county, Some(County::Kisumu));
    }

    #[tokio::test]
    async fn test_superseded_search_failure_is_discarded() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search").query_param("q", "Nak");
                then.status(404)
                    .delay(Duration::from_millis(300))
                    .body("<html>not found</html>");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search").query_param("q", "Nakuru");
                then.status(200)
                    .json_body(json!([{ "display_name": "Nakuru, Kenya" }]));
            })
            .await;

        let searcher = searcher(&server);
        let latest = LatestRequest::default();
        let slow = searcher.search_latest(&latest, "Nak");
        let fast = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            searcher.search_latest(&latest, "Nakuru").await
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert!(matches!(slow, Ok(None)));
        assert_eq!(fast.unwrap().unwrap()[0].county, Some(County::Nakuru));
    }

    #[tokio::test]
    async fn test_latest_search_failure_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(404).body("<html>not found</html>");
            })
            .await;

        let result = searcher(&server)
            .search_latest(&LatestRequest::default(), "Embu")
            .await;
        assert!(result.is_err());
    }
}
