//! Converts search DTOs into a [`TrackLookup`].

use super::dto::SearchResponse;
use super::TrackLookup;

/// Interpret the first result of a search response.
pub fn to_lookup(response: SearchResponse) -> TrackLookup {
    if response.result_count == 0 {
        return TrackLookup::NoResults;
    }
    let Some(first) = response.results.into_iter().next() else {
        return TrackLookup::NoResults;
    };
    match first.track_view_url {
        Some(url) if !url.trim().is_empty() => TrackLookup::Found { url },
        _ => TrackLookup::MissingUrl,
    }
}
