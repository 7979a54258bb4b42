//! Product image files, kept in a local [`object_store`] rooted at the storage dir.
//!
//! Objects are written under `products/` with random names and exposed to clients
//! as `<public_prefix>/<key>`. Keys are object-store paths, so `..` segments never
//! reach the filesystem.

use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const IMAGE_DIR: &str = "products";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Cannot create storage root {root}: {source}")]
    Root {
        root: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid storage key {key}: {source}")]
    Key {
        key: String,
        source: object_store::path::Error,
    },
    #[error(transparent)]
    Store(#[from] object_store::Error),
}

#[derive(Debug, Clone)]
pub struct ImageStorage {
    root: PathBuf,
    store: Arc<LocalFileSystem>,
    public_prefix: String,
}

impl ImageStorage {
    /// Opens the store, creating `root` if it does not exist yet.
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StorageError::Root {
            root: root.clone(),
            source,
        })?;
        let store = LocalFileSystem::new_with_prefix(&root)?.with_automatic_cleanup(true);
        Ok(Self {
            root,
            store: Arc::new(store),
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
        })
    }

    /// Directory the files are served from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `bytes` under a fresh key and returns it.
    ///
    /// The extension of `original_name` is kept when it is short and alphanumeric.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let file_name = match extension(original_name) {
            Some(ext) => format!("{}.{ext}", uuid::Uuid::new_v4().simple()),
            None => uuid::Uuid::new_v4().simple().to_string(),
        };
        let key = ObjectPath::from_iter([IMAGE_DIR, file_name.as_str()]);
        self.store.put(&key, PutPayload::from(bytes.to_vec())).await?;

        debug!(%key, size = bytes.len(), "Stored object");
        Ok(key.to_string())
    }

    /// Deletes a stored object. An object that is already gone is not an error.
    pub async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let location = ObjectPath::parse(key).map_err(|source| StorageError::Key {
            key: key.to_string(),
            source,
        })?;
        match self.store.delete(&location).await {
            Ok(()) => {
                debug!(%location, "Removed object");
                Ok(())
            }
            Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// URL path under which the storage root is served, without a trailing slash.
    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Public URL of a stored object.
    pub fn url(&self, key: &str) -> String {
        format!("{}/{}", self.public_prefix, key)
    }
}

fn extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    let valid = !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(dir.path().join("public"), "/storage/").unwrap();

        let key = storage.store("Front View.JPG", b"jpeg bytes").await.unwrap();
        assert!(key.starts_with("products/"));
        assert!(key.ends_with(".jpg"));
        assert_eq!(storage.url(&key), format!("/storage/{key}"));

        let full = storage.root().join(&key);
        assert_eq!(tokio::fs::read(&full).await.unwrap(), b"jpeg bytes");

        storage.remove(&key).await.unwrap();
        assert!(!full.exists());
        // second removal is a no-op
        storage.remove(&key).await.unwrap();
    }

    #[test]
    fn test_extension_rules() {
        assert_eq!(extension("a.PNG"), Some("png".into()));
        assert_eq!(extension("noext"), None);
        assert_eq!(extension("weird.p g"), None);
        assert_eq!(extension("x.averyverylongext"), None);
    }

    #[tokio::test]
    async fn test_remove_rejects_keys_outside_root() {
        let dir = tempfile::tempdir().unwrap();
        let secret = dir.path().join("secret.txt");
        std::fs::write(&secret, b"keep").unwrap();
        let storage = ImageStorage::new(dir.path().join("public"), "/storage").unwrap();

        let err = storage.remove("../secret.txt").await.unwrap_err();
        assert!(matches!(err, StorageError::Key { .. }));
        assert!(secret.exists());
    }
}
