//! Trait definition for the search API client.
//!
//! Production code uses [`ItunesClient`](super::ItunesClient); tests
//! substitute [`mocks::MockSearch`].

use async_trait::async_trait;

use super::{SearchError, TrackLookup};

/// Resolve a free-text "artist - title" term to a track link.
#[async_trait]
pub trait TrackSearch: Send + Sync {
    async fn lookup(&self, term: &str) -> Result<TrackLookup, SearchError>;
}

#[async_trait]
impl TrackSearch for super::ItunesClient {
    async fn lookup(&self, term: &str) -> Result<TrackLookup, SearchError> {
        self.lookup(term).await
    }
}
