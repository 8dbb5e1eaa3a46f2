//! Data layer for a movie-browsing client: a durable favorites store and
//! the aggregation service that assembles a movie-detail view model from
//! two catalog fetches and a favorite-status check.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{DetailViewModel, FetchOutcome, Movie};
pub use services::detail::DetailService;
pub use services::providers::{CatalogProvider, TmdbProvider};
pub use storage::{FavoritesStore, FileStorage, MemoryStorage, Storage, FAVORITES_KEY};
