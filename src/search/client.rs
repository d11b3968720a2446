//! iTunes Search API HTTP client
//!
//! No API key required. Each lookup asks for a single song result.

use std::time::Duration;

use super::{SearchError, TrackLookup, adapter, dto};

/// Default public endpoint
pub const DEFAULT_SEARCH_URL: &str = "https://itunes.apple.com/search";

/// iTunes Search API client
pub struct ItunesClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ItunesClient {
    /// Create a client against `base_url` with a per-request timeout.
    ///
    /// The client sends a User-Agent header identifying the application and
    /// accepts gzip-compressed responses.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// Build the request URL for a free-text term
    pub fn search_url(&self, term: &str) -> String {
        format!(
            "{}?term={}&entity=song&media=music&limit=1",
            self.base_url,
            urlencoding::encode(term)
        )
    }

    /// Search for `term` and interpret the first result
    pub async fn lookup(&self, term: &str) -> Result<TrackLookup, SearchError> {
        let response = self.send_search_request(term).await?;
        Ok(adapter::to_lookup(response))
    }

    async fn send_search_request(&self, term: &str) -> Result<dto::SearchResponse, SearchError> {
        let url = self.search_url(term);
        tracing::debug!(target: "process::download", %url, "Searching");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))
    }
}
