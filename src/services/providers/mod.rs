/// Movie catalog provider abstraction
///
/// The detail screen needs two independent reads per movie: the full
/// detail record and the recommendation list. Implementations must keep
/// the two independent so one failing does not take the other down.
use crate::{error::AppResult, models::Movie};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for remote movie catalogs
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch the full detail record for one movie
    async fn fetch_movie(&self, movie_id: u64) -> AppResult<Movie>;

    /// Fetch the recommendation list for one movie, in service order
    async fn fetch_recommendations(&self, movie_id: u64) -> AppResult<Vec<Movie>>;
}
