//! Flat-directory blob storage for uploaded files
//!
//! Files are stored under their caller-supplied name in a single directory,
//! with no subdirectories and no renaming. A second upload under the same
//! name silently overwrites the first (last write wins).

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{Error, Result};

/// Filesystem-backed store for uploaded file bytes, addressed by name
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Open a blob store rooted at the given directory, creating it if needed
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// The directory this store writes into
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store bytes under the given name, overwriting any existing blob
    pub async fn store(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(name)?;
        fs::write(&path, bytes).await?;
        Ok(())
    }

    /// Remove the blob with the given name
    ///
    /// Returns `Ok(true)` when a file was removed and `Ok(false)` when no
    /// blob by that name existed. A filesystem refusal (lock, permission)
    /// comes back as an error, but callers on the delete path treat it as
    /// advisory and keep going.
    pub async fn remove(&self, name: &str) -> Result<bool> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether a blob with the given name exists
    pub async fn exists(&self, name: &str) -> bool {
        match self.path_for(name) {
            Ok(path) => fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Open a blob for reading
    pub async fn reader(&self, name: &str) -> Result<fs::File> {
        let path = self.path_for(name)?;
        match fs::File::open(&path).await {
            Ok(file) => Ok(file),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::BlobNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read a blob fully into memory
    pub async fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.path_for(name)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::BlobNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a blob name to a path inside the root directory
    ///
    /// Names never address anything outside the flat directory, so path
    /// separators and `..` components are rejected outright.
    fn path_for(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(Error::InvalidInput(format!("invalid file name: {name:?}")));
        }
        Ok(self.root.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup() -> (tempfile::TempDir, BlobStore) {
        let tmp = tempdir().unwrap();
        let store = BlobStore::open(tmp.path().join("uploads")).await.unwrap();
        (tmp, store)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_store_and_read() {
        let (_tmp, store) = setup().await;

        store.store("a.pdf", b"pdf bytes").await.unwrap();
        assert!(store.exists("a.pdf").await);
        assert_eq!(store.read("a.pdf").await.unwrap(), b"pdf bytes");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_store_overwrites_silently() {
        let (_tmp, store) = setup().await;

        store.store("a.pdf", b"first").await.unwrap();
        store.store("a.pdf", b"second").await.unwrap();
        assert_eq!(store.read("a.pdf").await.unwrap(), b"second");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_remove_absent_is_soft() {
        let (_tmp, store) = setup().await;

        let removed = store.remove("missing.pdf").await.unwrap();
        assert!(!removed);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_remove_existing() {
        let (_tmp, store) = setup().await;

        store.store("a.pdf", b"bytes").await.unwrap();
        assert!(store.remove("a.pdf").await.unwrap());
        assert!(!store.exists("a.pdf").await);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_read_missing_blob() {
        let (_tmp, store) = setup().await;

        let err = store.read("missing.pdf").await.unwrap_err();
        assert!(matches!(err, Error::BlobNotFound(name) if name == "missing.pdf"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_rejects_path_traversal() {
        let (_tmp, store) = setup().await;

        for name in ["", ".", "..", "../evil.pdf", "dir/evil.pdf", "dir\\evil.pdf"] {
            let err = store.store(name, b"x").await.unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "name {name:?}");
        }
    }
}
