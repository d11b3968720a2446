//! iTunes Search API Data Transfer Objects
//!
//! Only the fields the resolver needs are modeled; everything else in the
//! response is ignored.
//!
//! API Reference: https://performance-partners.apple.com/search-api

use serde::{Deserialize, Serialize};

/// Top-level search response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Number of entries in `results`
    #[serde(default)]
    pub result_count: u64,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// A single song result
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Link to the track on Apple Music; what the downloader consumes
    pub track_view_url: Option<String>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub collection_name: Option<String>,
}
