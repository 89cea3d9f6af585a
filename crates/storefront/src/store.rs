//! Durable store adapters for the cart snapshot.
//!
//! A store holds exactly one serialized blob under a fixed key. The cart
//! manager reads it once at startup and overwrites it after every change.
//! Writes are best effort and last-write-wins: a failed save is reported to
//! the caller, who logs it and carries on with the in-memory state.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;

/// Errors raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Key-value persistence for a single serialized blob.
pub trait CartStore {
    /// Read the stored blob, or `None` if nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replace the stored blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn save(&self, blob: &str) -> Result<(), StoreError>;
}

// =============================================================================
// File Store
// =============================================================================

/// Stores the blob as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store for `key` inside `dir`. Nothing is touched on disk
    /// until the first save.
    #[must_use]
    pub fn new(dir: &Path, key: &str) -> Self {
        Self {
            path: dir.join(format!("{key}.json")),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CartStore for FileStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn save(&self, blob: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Rename is atomic on the same filesystem, so readers never see a torn blob.
        let temp = self.temp_path();
        std::fs::write(&temp, blob)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

// =============================================================================
// Memory Store
// =============================================================================

#[derive(Debug, Default)]
struct MemoryInner {
    blob: Option<String>,
    fail_loads: bool,
    fail_saves: bool,
    saves: usize,
}

/// In-process store for ephemeral sessions and tests.
///
/// Clones share the same slot, so a test can keep a handle after passing
/// one to the cart manager. Loads and saves can be made to fail on demand.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a blob.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().blob = Some(blob.into());
        store
    }

    /// Current blob, if any.
    #[must_use]
    pub fn blob(&self) -> Option<String> {
        self.inner.borrow().blob.clone()
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves
    }

    /// Make subsequent loads fail.
    pub fn set_fail_loads(&self, fail: bool) {
        self.inner.borrow_mut().fail_loads = fail;
    }

    /// Make subsequent saves fail.
    pub fn set_fail_saves(&self, fail: bool) {
        self.inner.borrow_mut().fail_saves = fail;
    }
}

impl CartStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        let inner = self.inner.borrow();
        if inner.fail_loads {
            return Err(StoreError::Unavailable("memory store load disabled".to_string()));
        }
        Ok(inner.blob.clone())
    }

    fn save(&self, blob: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_saves {
            return Err(StoreError::Unavailable("memory store save disabled".to_string()));
        }
        inner.blob = Some(blob.to_owned());
        inner.saves += 1;
        Ok(())
    }
}
