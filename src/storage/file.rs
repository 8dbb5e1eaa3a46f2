use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::fs;

use crate::error::AppResult;
use crate::storage::Storage;

/// File-per-key storage backend
///
/// Each key maps to one JSON file under the configured directory. Writes
/// land in a temp file first and are renamed into place, so a reader never
/// observes a partially-written record.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Maps a key to its backing file. Keys may contain characters that
    /// are not filename-safe (e.g. `@FavoriteList`).
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

#[async_trait::async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;

        tracing::debug!(key, path = %path.display(), "Record persisted");
        Ok(())
    }
}
