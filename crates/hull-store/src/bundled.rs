//! Read-only bundled package store.

use std::collections::HashMap;
use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;

use hull_core::ResponseBody;

use crate::error::StoreError;

/// Opaque reference into the bundled resource set, produced by a successful
/// lookup. The platform's blank "not found" sentinel maps to `None` at the
/// trait boundary instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BundledRef(String);

impl BundledRef {
    /// Wrap a resolved internal path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The resolved internal path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Read access to resources packaged with the application.
pub trait BundledStore: Send + Sync {
    /// Resolve `relative` under the package-set root, returning a reference
    /// when the resource exists.
    fn resolve(&self, root: &str, relative: &str) -> Option<BundledRef>;

    /// Open a previously resolved reference for read.
    fn open(&self, reference: &BundledRef) -> Result<ResponseBody, StoreError>;
}

fn join_key(root: &str, relative: &str) -> String {
    let root = root.trim_matches('/');
    if root.is_empty() {
        relative.to_string()
    } else {
        format!("{root}/{relative}")
    }
}

/// Bundled store backed by a directory of assets shipped beside the binary.
#[derive(Debug, Clone)]
pub struct DirBundledStore {
    base: PathBuf,
}

impl DirBundledStore {
    /// Create a store rooted at the unpacked asset directory.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl BundledStore for DirBundledStore {
    fn resolve(&self, root: &str, relative: &str) -> Option<BundledRef> {
        let path = self.base.join(join_key(root, relative));
        if path.is_file() {
            Some(BundledRef::new(path.display().to_string()))
        } else {
            None
        }
    }

    fn open(&self, reference: &BundledRef) -> Result<ResponseBody, StoreError> {
        match File::open(reference.as_str()) {
            Ok(file) => Ok(ResponseBody::File(file)),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(reference.as_str().to_string()))
            }
            Err(error) => Err(StoreError::Io(error)),
        }
    }
}

/// In-memory bundled store, for tests and embedders that compile assets in.
#[derive(Debug, Clone, Default)]
pub struct MemoryBundledStore {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryBundledStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource under its package-relative path.
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl BundledStore for MemoryBundledStore {
    fn resolve(&self, root: &str, relative: &str) -> Option<BundledRef> {
        let key = join_key(root, relative);
        if self.files.contains_key(&key) {
            Some(BundledRef::new(key))
        } else {
            None
        }
    }

    fn open(&self, reference: &BundledRef) -> Result<ResponseBody, StoreError> {
        self.files
            .get(reference.as_str())
            .map(|content| ResponseBody::Bytes(content.clone()))
            .ok_or_else(|| StoreError::NotFound(reference.as_str().to_string()))
    }
}
