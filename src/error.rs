//! Search failure taxonomy

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything that can go wrong during a search.
///
/// Transport failures, non-success statuses and malformed payloads all
/// arrive here as `Request`; the only other outcome is a geocoding lookup
/// with zero candidates.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no geocoding match for '{0}'")]
    CityNotFound(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl SearchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SearchError::CityNotFound(_) => FailureKind::CityNotFound,
            SearchError::Request(_) => FailureKind::Fetch,
        }
    }
}

/// Serializable failure tag carried by result actions.
///
/// The full error detail goes to the log; the UI only ever sees the
/// generic notice derived from this tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FailureKind {
    CityNotFound,
    Fetch,
}

impl FailureKind {
    /// User-facing notice text
    pub fn notice(self) -> &'static str {
        match self {
            FailureKind::CityNotFound => "City not found.",
            FailureKind::Fetch => "Error fetching data.",
        }
    }
}
