use serde::{Deserialize, Serialize};

/// A movie record as served by the catalog and as persisted in the
/// favorites list. Field names match the wire format exactly.
///
/// The store treats this as an opaque payload: records are added and
/// removed whole, never partially updated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub release_date: String,
}

// ============================================================================
// Catalog API Types
// ============================================================================

/// Response envelope from GET /movie/{id}/recommendations
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsPage {
    #[serde(default)]
    pub results: Vec<Movie>,
}

// ============================================================================
// Detail View Model
// ============================================================================

/// Outcome of one remote source inside an aggregation.
///
/// `Failed` means the fetch errored and was logged; it is distinct from a
/// successfully-fetched empty result, so callers can tell "nothing there"
/// apart from "couldn't ask".
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Loaded(T),
    Failed,
}

impl<T> FetchOutcome<T> {
    /// Returns the loaded value, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchOutcome::Loaded(value) => Some(value),
            FetchOutcome::Failed => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed)
    }

    pub(crate) fn from_result<E: std::fmt::Display>(result: Result<T, E>, source: &str) -> Self {
        match result {
            Ok(value) => FetchOutcome::Loaded(value),
            Err(e) => {
                tracing::warn!(error = %e, source, "Fetch failed, degrading to default");
                FetchOutcome::Failed
            }
        }
    }
}

/// Ephemeral per-request aggregate for one movie's detail screen.
///
/// Reconstructed on every `load_detail` call and discarded with the
/// requesting screen; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailViewModel {
    pub detail: FetchOutcome<Movie>,
    pub recommendations: FetchOutcome<Vec<Movie>>,
    pub is_favorite: bool,
}

impl DetailViewModel {
    /// The fetched detail record, absent when the fetch failed.
    pub fn detail(&self) -> Option<&Movie> {
        self.detail.loaded()
    }

    /// Recommendations in service order; empty when the fetch failed.
    pub fn recommendations(&self) -> &[Movie] {
        match &self.recommendations {
            FetchOutcome::Loaded(movies) => movies,
            FetchOutcome::Failed => &[],
        }
    }
}
