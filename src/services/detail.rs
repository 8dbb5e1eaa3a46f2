use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    models::{DetailViewModel, FetchOutcome, Movie},
    services::providers::CatalogProvider,
    storage::FavoritesStore,
};

/// Service assembling the movie-detail view model
///
/// Fans out the detail fetch, the recommendations fetch and the
/// favorite-status check concurrently, then merges them. A failure in any
/// one source degrades that source only; the caller always gets a
/// renderable view model.
#[derive(Clone)]
pub struct DetailService {
    provider: Arc<dyn CatalogProvider>,
    favorites: FavoritesStore,
}

impl DetailService {
    pub fn new(provider: Arc<dyn CatalogProvider>, favorites: FavoritesStore) -> Self {
        Self {
            provider,
            favorites,
        }
    }

    /// Loads the aggregated detail view model for `movie_id`.
    ///
    /// The three source reads run concurrently; the merge waits for all of
    /// them. Returns `None` when `cancel` fires first: a torn-down screen
    /// must never have in-flight results applied to it, so they are
    /// discarded instead of merged.
    pub async fn load_detail(
        &self,
        movie_id: u64,
        cancel: &CancellationToken,
    ) -> Option<DetailViewModel> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("load_detail", movie_id, request_id = %request_id);

        async {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(movie_id, "Load cancelled, discarding in-flight results");
                    None
                }
                view_model = self.assemble(movie_id) => Some(view_model),
            }
        }
        .instrument(span)
        .await
    }

    async fn assemble(&self, movie_id: u64) -> DetailViewModel {
        let (detail, recommendations, favorite) = tokio::join!(
            self.provider.fetch_movie(movie_id),
            self.provider.fetch_recommendations(movie_id),
            self.favorites.is_favorite(movie_id),
        );

        let is_favorite = favorite.unwrap_or_else(|e| {
            tracing::warn!(error = %e, movie_id, "Favorite check failed, assuming not favorited");
            false
        });

        DetailViewModel {
            detail: FetchOutcome::from_result(detail, "detail"),
            recommendations: FetchOutcome::from_result(recommendations, "recommendations"),
            is_favorite,
        }
    }

    /// Flips the favorite state for the movie currently on screen.
    ///
    /// `detail` is the already-fetched record persisted when adding; while
    /// it has not resolved yet this is a no-op returning the current state
    /// unchanged. Store failures are logged and leave the reported state
    /// unflipped.
    pub async fn set_favorite(
        &self,
        movie_id: u64,
        detail: Option<&Movie>,
        currently_favorite: bool,
    ) -> bool {
        let Some(movie) = detail else {
            tracing::debug!(movie_id, "Favorite toggle ignored, detail not loaded");
            return currently_favorite;
        };

        match self.favorites.toggle(movie_id, movie).await {
            Ok(now_favorite) => now_favorite,
            Err(e) => {
                tracing::error!(error = %e, movie_id, "Favorite toggle failed");
                currently_favorite
            }
        }
    }
}
