//! Versioned on-disk cache store.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hull_core::ResponseBody;

use crate::error::StoreError;

/// Read access to a versioned on-disk cache directory.
///
/// The directory is populated by the external update manager; this side only
/// checks existence and opens files for read.
pub trait DiskCacheStore: Send + Sync {
    /// Whether `relative` names a file under `root`.
    fn exists(&self, root: &Path, relative: &str) -> bool;

    /// Open `relative` under `root` for read.
    fn open(&self, root: &Path, relative: &str) -> Result<ResponseBody, StoreError>;
}

/// `std::fs`-backed disk cache store.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDiskStore;

impl FsDiskStore {
    /// Create a new store.
    pub fn new() -> Self {
        Self
    }

    fn full_path(root: &Path, relative: &str) -> PathBuf {
        root.join(relative)
    }
}

impl DiskCacheStore for FsDiskStore {
    fn exists(&self, root: &Path, relative: &str) -> bool {
        Self::full_path(root, relative).is_file()
    }

    fn open(&self, root: &Path, relative: &str) -> Result<ResponseBody, StoreError> {
        let path = Self::full_path(root, relative);
        match File::open(&path) {
            Ok(file) => Ok(ResponseBody::File(file)),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(path.display().to_string()))
            }
            Err(error) => Err(StoreError::Io(error)),
        }
    }
}
