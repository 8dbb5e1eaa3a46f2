/// Persistence abstraction
///
/// The favorites subsystem only needs an asynchronous string-keyed store
/// with whole-value get/set. Backends are swappable behind the `Storage`
/// trait: a file-per-key backend for durable device-local state and an
/// in-memory backend for tests and ephemeral sessions.
use crate::error::AppResult;

pub mod favorites;
pub mod file;
pub mod memory;

pub use favorites::{FavoritesStore, FAVORITES_KEY};
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Asynchronous string-keyed persistence primitive
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Returns the stored value for `key`, or `None` if the key has never
    /// been written.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> AppResult<()>;
}
