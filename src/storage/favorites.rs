use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::models::Movie;
use crate::storage::Storage;

/// Fixed key under which the favorite list is persisted.
pub const FAVORITES_KEY: &str = "@FavoriteList";

/// Single source of truth for which movies are favorited.
///
/// The whole list lives in one persisted record. Every operation re-reads
/// that record, so separate store instances over the same backend observe
/// each other's committed toggles. Toggles hold a single-writer lock
/// across the read-modify-write, so no toggle is silently dropped by a
/// concurrent one.
#[derive(Clone)]
pub struct FavoritesStore {
    storage: Arc<dyn Storage>,
    write_lock: Arc<Mutex<()>>,
}

impl FavoritesStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Reads the full favorite list, in insertion order.
    ///
    /// An absent record is an empty list, not an error. A record that no
    /// longer parses is surfaced as `CorruptState`.
    pub async fn get_all(&self) -> AppResult<Vec<Movie>> {
        self.read_list().await
    }

    /// Whether `movie_id` is currently favorited. No side effects.
    pub async fn is_favorite(&self, movie_id: u64) -> AppResult<bool> {
        let list = self.read_list().await?;
        Ok(list.iter().any(|m| m.id == movie_id))
    }

    /// Flips `movie_id`'s membership and persists the new list.
    ///
    /// `movie_if_adding` is stored verbatim when the movie was not yet a
    /// favorite; there is no lookup-by-id fallback. Returns the resulting
    /// favorite state. When the persist fails the durable list is
    /// unchanged and the error is returned instead of a flipped state.
    pub async fn toggle(&self, movie_id: u64, movie_if_adding: &Movie) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;

        let mut list = self.read_list().await?;
        let was_favorite = list.iter().any(|m| m.id == movie_id);
        if was_favorite {
            list.retain(|m| m.id != movie_id);
        } else {
            list.push(movie_if_adding.clone());
        }

        let json = serde_json::to_string(&list)
            .map_err(|e| AppError::Internal(format!("Favorites serialization error: {}", e)))?;
        self.storage.set(FAVORITES_KEY, json).await?;

        let now_favorite = !was_favorite;
        tracing::info!(movie_id, now_favorite, total = list.len(), "Favorite toggled");
        Ok(now_favorite)
    }

    async fn read_list(&self) -> AppResult<Vec<Movie>> {
        match self.storage.get(FAVORITES_KEY).await? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| AppError::CorruptState(format!("{}", e))),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, MockStorage};

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: String::new(),
            backdrop_path: None,
            poster_path: None,
            vote_average: 0.0,
            vote_count: 0,
            popularity: 0.0,
            original_language: "en".to_string(),
            release_date: String::new(),
        }
    }

    fn memory_store() -> FavoritesStore {
        FavoritesStore::new(Arc::new(MemoryStorage::new()))
    }

    #[tokio::test]
    async fn test_get_all_empty_before_any_toggle() {
        let store = memory_store();
        assert_eq!(store.get_all().await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let store = memory_store();
        let x = movie(42, "X");

        assert!(store.toggle(42, &x).await.unwrap());
        assert_eq!(store.get_all().await.unwrap(), vec![x.clone()]);

        assert!(!store.toggle(42, &x).await.unwrap());
        assert_eq!(store.get_all().await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_toggle_is_involution_with_other_favorites_present() {
        let store = memory_store();
        let a = movie(1, "A");
        let b = movie(2, "B");

        store.toggle(1, &a).await.unwrap();
        store.toggle(2, &b).await.unwrap();
        let before = store.get_all().await.unwrap();

        store.toggle(1, &a).await.unwrap();
        store.toggle(1, &a).await.unwrap();

        assert_eq!(store.get_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_is_favorite_reflects_last_committed_toggle() {
        let store = memory_store();
        let x = movie(7, "Seven");

        assert!(!store.is_favorite(7).await.unwrap());
        store.toggle(7, &x).await.unwrap();
        assert!(store.is_favorite(7).await.unwrap());
        store.toggle(7, &x).await.unwrap();
        assert!(!store.is_favorite(7).await.unwrap());
    }

    #[tokio::test]
    async fn test_no_duplicate_ids_after_repeated_toggles() {
        let store = memory_store();
        let x = movie(9, "Nine");

        for _ in 0..5 {
            store.toggle(9, &x).await.unwrap();
        }

        let list = store.get_all().await.unwrap();
        let nines = list.iter().filter(|m| m.id == 9).count();
        assert!(nines <= 1);
        assert_eq!(list, vec![x]);
    }

    #[tokio::test]
    async fn test_concurrent_toggles_both_committed() {
        let store = memory_store();
        let a = movie(1, "A");
        let b = movie(2, "B");

        let (ra, rb) = tokio::join!(store.toggle(1, &a), store.toggle(2, &b));
        assert!(ra.unwrap());
        assert!(rb.unwrap());

        let mut ids: Vec<u64> = store.get_all().await.unwrap().iter().map(|m| m.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_insertion_order_preserved() {
        let store = memory_store();
        store.toggle(3, &movie(3, "C")).await.unwrap();
        store.toggle(1, &movie(1, "A")).await.unwrap();
        store.toggle(2, &movie(2, "B")).await.unwrap();

        let ids: Vec<u64> = store.get_all().await.unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_corrupt_record_surfaces_corrupt_state() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(FAVORITES_KEY, "not a json array".to_string())
            .await
            .unwrap();
        let store = FavoritesStore::new(storage);

        assert!(matches!(
            store.get_all().await,
            Err(AppError::CorruptState(_))
        ));
        assert!(matches!(
            store.is_favorite(1).await,
            Err(AppError::CorruptState(_))
        ));
    }

    #[tokio::test]
    async fn test_toggle_refuses_to_clobber_corrupt_record() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(FAVORITES_KEY, "{\"oops\": true}".to_string())
            .await
            .unwrap();
        let store = FavoritesStore::new(storage.clone());

        let result = store.toggle(1, &movie(1, "A")).await;
        assert!(matches!(result, Err(AppError::CorruptState(_))));

        // The malformed record is left in place for recovery
        let raw = storage.get(FAVORITES_KEY).await.unwrap();
        assert_eq!(raw, Some("{\"oops\": true}".to_string()));
    }

    #[tokio::test]
    async fn test_failed_persist_reports_error_not_flipped_state() {
        let mut storage = MockStorage::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .returning(|_, _| Err(AppError::Internal("disk full".to_string())));
        let store = FavoritesStore::new(Arc::new(storage));

        let result = store.toggle(1, &movie(1, "A")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_cross_instance_visibility() {
        let storage = Arc::new(MemoryStorage::new());
        let writer = FavoritesStore::new(storage.clone());
        let reader = FavoritesStore::new(storage);

        writer.toggle(5, &movie(5, "E")).await.unwrap();
        assert!(reader.is_favorite(5).await.unwrap());
    }
}
