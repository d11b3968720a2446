//! Track URL resolution via a public music search API.
//!
//! - **DTOs** (`dto.rs`) - exact response shapes
//! - **Adapter** (`adapter.rs`) - DTO to [`TrackLookup`]
//! - **Client** (`client.rs`) - HTTP client for the iTunes Search API
//! - **Traits** (`traits.rs`) - [`TrackSearch`] seam so workers can be
//!   tested without the network

pub mod adapter;
pub mod client;
pub mod dto;
pub mod traits;

pub use client::{DEFAULT_SEARCH_URL, ItunesClient};
pub use traits::TrackSearch;

/// What a search found for one term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackLookup {
    /// A usable track link
    Found { url: String },
    /// Zero results
    NoResults,
    /// A result came back without a track link
    MissingUrl,
}

/// Errors talking to the search API
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// Connection failure or timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("{0}")]
    Status(String),

    /// Body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Parse(String),
}
