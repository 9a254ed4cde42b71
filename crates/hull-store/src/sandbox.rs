//! Sandboxed application files.

use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;

use hull_core::ResponseBody;

use crate::error::StoreError;

/// Read access to the container's private sandbox directory.
///
/// Internal-scheme assets resolve here without going through the version or
/// tier machinery, so this store rejects parent-directory segments itself.
#[derive(Debug, Clone)]
pub struct SandboxFiles {
    root: PathBuf,
}

impl SandboxFiles {
    /// Create a view over the sandbox root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn checked_path(&self, relative: &str) -> Result<PathBuf, StoreError> {
        let relative = relative.trim_start_matches('/');
        if relative.is_empty() || relative.split('/').any(|segment| segment == "..") {
            return Err(StoreError::InvalidPath(relative.to_string()));
        }
        Ok(self.root.join(relative))
    }

    /// Whether `relative` names a file inside the sandbox.
    pub fn contains(&self, relative: &str) -> bool {
        self.checked_path(relative)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    /// Open `relative` for read.
    pub fn open(&self, relative: &str) -> Result<ResponseBody, StoreError> {
        let path = self.checked_path(relative)?;
        match File::open(&path) {
            Ok(file) => Ok(ResponseBody::File(file)),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(path.display().to_string()))
            }
            Err(error) => Err(StoreError::Io(error)),
        }
    }
}
