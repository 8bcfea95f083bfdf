use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use snafu::prelude::*;

use crate::domain::repository::blob::{BlobStore, BlobStoreError, InvalidKeySnafu};

/// A [`BlobStore`] keeping every record in a JSON file named after its key.
/// Writes go to a temporary file first, so a crash never leaves a torn record.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Creates a new [`FileStore`]. The directory is created on first write.
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    fn record_path(&self, key: &str) -> Result<PathBuf, BlobStoreError> {
        validate_key(key)?;
        Ok(self.directory.join(format!("{key}.json")))
    }
}

#[async_trait::async_trait]
impl BlobStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BlobStoreError> {
        let path = self.record_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).whatever_context(format!("Could not read {}", path.display())),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), BlobStoreError> {
        let path = self.record_path(key)?;
        let staging = self.directory.join(format!("{key}.json.tmp"));

        whatever!(
            tokio::fs::create_dir_all(&self.directory).await,
            "Could not create {}",
            self.directory.display()
        );
        whatever!(
            tokio::fs::write(&staging, value).await,
            "Could not write {}",
            staging.display()
        );
        whatever!(
            tokio::fs::rename(&staging, &path).await,
            "Could not replace {}",
            path.display()
        );

        tracing::trace!(path = %path.display(), "Saved record");
        Ok(())
    }
}

/// A [`BlobStore`] that forgets everything when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait::async_trait]
impl BlobStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BlobStoreError> {
        validate_key(key)?;
        Ok(self.entries().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), BlobStoreError> {
        validate_key(key)?;
        self.entries().insert(key.to_owned(), value);
        Ok(())
    }
}

/// Keys become file names, so they must stay a single plain path component.
fn validate_key(key: &str) -> Result<(), BlobStoreError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    ensure!(valid, InvalidKeySnafu { key });
    Ok(())
}
