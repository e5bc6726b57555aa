//! Read/write surface keyed by path.
//!
//! The batch driver only ever reads whole files and replaces whole files, so
//! storage is modelled as a [`ContentStore`]:
//! - [`FsStore`] — the real filesystem via `tokio::fs`
//! - [`MemoryStore`] — an in-memory map for tests and dry runs
//!
//! Neither store creates missing parent directories: writing below a
//! directory that does not exist is a [`GuideGenError::Write`].

use std::collections::BTreeMap;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use guidegen_shared::{GuideGenError, Result};
use tracing::debug;

/// Whole-file storage keyed by path.
pub trait ContentStore: Send + Sync {
    /// Read the file at `path`, or `None` if it does not exist.
    fn read(&self, path: &Path) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Overwrite the file at `path` in place with `contents`.
    ///
    /// An existing symlink is written through and an unwritable file is an
    /// error.
    fn write(&self, path: &Path, contents: &str) -> impl Future<Output = Result<()>> + Send;

    /// Swap `contents` in at `path` in one step, so readers see either the
    /// old file or the new one.
    fn replace(&self, path: &Path, contents: &str) -> impl Future<Output = Result<()>> + Send;
}

// ---------------------------------------------------------------------------
// Filesystem
// ---------------------------------------------------------------------------

/// Filesystem-backed store.
///
/// [`ContentStore::replace`] stages a hidden temp file beside the target and
/// renames it into place.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl ContentStore for FsStore {
    async fn read(&self, path: &Path) -> Result<Option<String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GuideGenError::io(path, e)),
        }
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<()> {
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| GuideGenError::write(path, e))?;

        debug!(path = %path.display(), bytes = contents.len(), "wrote file");
        Ok(())
    }

    async fn replace(&self, path: &Path, contents: &str) -> Result<()> {
        let temp = temp_path(path)?;

        let staged = match tokio::fs::write(&temp, contents).await {
            Ok(()) => tokio::fs::rename(&temp, path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = staged {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(GuideGenError::write(path, e));
        }

        debug!(path = %path.display(), bytes = contents.len(), "replaced file");
        Ok(())
    }
}

/// `dir/.name.tmp` for a target `dir/name`.
fn temp_path(path: &Path) -> Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        GuideGenError::write(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    Ok(path.with_file_name(format!(".{}.tmp", name.to_string_lossy())))
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// In-memory store.
///
/// Directories are implicit except for prefixes registered with
/// [`MemoryStore::deny_writes_under`], which reject writes the way a
/// read-only or missing directory would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<BTreeMap<PathBuf, String>>,
    denied: Mutex<Vec<PathBuf>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or overwrite a file.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.lock_files().insert(path.into(), contents.into());
    }

    /// Current contents of a file, if present.
    pub fn get(&self, path: &Path) -> Option<String> {
        self.lock_files().get(path).cloned()
    }

    /// Every stored path, in sorted order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock_files().keys().cloned().collect()
    }

    /// Make every write at or below `prefix` fail with permission denied.
    pub fn deny_writes_under(&self, prefix: impl Into<PathBuf>) {
        self.denied
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prefix.into());
    }

    fn lock_files(&self) -> MutexGuard<'_, BTreeMap<PathBuf, String>> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_denied(&self, path: &Path) -> bool {
        self.denied
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .any(|prefix| path.starts_with(prefix))
    }
}

impl ContentStore for MemoryStore {
    async fn read(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.get(path))
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if self.is_denied(path) {
            return Err(GuideGenError::write(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "write denied"),
            ));
        }
        self.insert(path, contents);
        Ok(())
    }

    async fn replace(&self, path: &Path, contents: &str) -> Result<()> {
        self.write(path, contents).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gg-storage-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn fs_read_missing_is_none() {
        let tmp = temp_dir();
        let found = FsStore.read(&tmp.join("absent.json")).await.unwrap();
        assert!(found.is_none());
        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn fs_replace_leaves_no_temp_files() {
        let tmp = temp_dir();
        let target = tmp.join("guide.md");

        FsStore.write(&target, "first").await.unwrap();
        FsStore.replace(&target, "second").await.unwrap();

        assert_eq!(FsStore.read(&target).await.unwrap().as_deref(), Some("second"));
        for entry in std::fs::read_dir(&tmp).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.starts_with('.'), "temp file left behind: {name}");
        }

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn fs_write_into_missing_directory_fails() {
        let tmp = temp_dir();
        let target = tmp.join("no-such-dir").join("guide.md");

        let err = FsStore.write(&target, "body").await.unwrap_err();
        assert!(matches!(err, GuideGenError::Write { ref path, .. } if *path == target));
        let err = FsStore.replace(&target, "body").await.unwrap_err();
        assert!(matches!(err, GuideGenError::Write { ref path, .. } if *path == target));
        assert!(!tmp.join("no-such-dir").exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn fs_write_goes_through_symlink() {
        let tmp = temp_dir();
        let real = tmp.join("real.md");
        let link = tmp.join("guide.md");
        std::fs::write(&real, "old").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        FsStore.write(&link, "new").await.unwrap();

        assert_eq!(std::fs::read_to_string(&real).unwrap(), "new");
        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn fs_write_to_read_only_file_fails() {
        let tmp = temp_dir();
        let target = tmp.join("guide.md");
        std::fs::write(&target, "old").unwrap();
        let mut perms = std::fs::metadata(&target).unwrap().permissions();
        perms.set_readonly(true);
        std::fs::set_permissions(&target, perms).unwrap();

        // Privileged users bypass file permissions.
        if std::fs::OpenOptions::new().write(true).open(&target).is_err() {
            let err = FsStore.write(&target, "new").await.unwrap_err();
            assert!(matches!(err, GuideGenError::Write { ref path, .. } if *path == target));
            assert_eq!(std::fs::read_to_string(&target).unwrap(), "old");
        }

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn fs_failed_replace_removes_temp_file() {
        let tmp = temp_dir();
        // A directory in the way makes the rename fail after staging.
        let target = tmp.join("guides.json");
        std::fs::create_dir_all(target.join("occupied")).unwrap();

        let err = FsStore.replace(&target, "{}").await.unwrap_err();
        assert!(matches!(err, GuideGenError::Write { ref path, .. } if *path == target));
        assert!(!tmp.join(".guides.json.tmp").exists());
        assert!(target.join("occupied").is_dir());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn memory_store_roundtrip_and_denial() {
        let store = MemoryStore::new();
        store.insert("/c/a.json", "{}");
        store.deny_writes_under("/locked");

        assert_eq!(store.read(Path::new("/c/a.json")).await.unwrap().as_deref(), Some("{}"));
        assert!(store.read(Path::new("/c/b.json")).await.unwrap().is_none());

        store.write(Path::new("/out/x.md"), "x").await.unwrap();
        assert_eq!(store.get(Path::new("/out/x.md")).as_deref(), Some("x"));

        let err = store.write(Path::new("/locked/y.md"), "y").await.unwrap_err();
        assert!(matches!(err, GuideGenError::Write { .. }));
        let err = store.replace(Path::new("/locked/y.json"), "{}").await.unwrap_err();
        assert!(matches!(err, GuideGenError::Write { .. }));
        assert_eq!(store.paths().len(), 2);
    }
}
