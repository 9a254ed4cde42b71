//! Per-business version records.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// Cache locations for one independently versioned content package.
///
/// Owned and written by the external update manager; the resolver only reads
/// snapshots. By construction of that manager a business either has a live
/// disk cache or relies on the bundled fallback, never both at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessVersionInfo {
    /// Business identifier this record belongs to.
    pub business_id: String,
    /// Version tag reported by the update manager, for log correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Root of the freshly downloaded on-disk cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_cache_path: Option<PathBuf>,
    /// Root inside the bundled package set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_cache_path: Option<String>,
}

impl BusinessVersionInfo {
    /// Create an empty record for a business id.
    pub fn new(business_id: impl Into<String>) -> Self {
        Self {
            business_id: business_id.into(),
            version: None,
            disk_cache_path: None,
            raw_cache_path: None,
        }
    }

    /// Set the version tag.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the on-disk cache root.
    pub fn with_disk_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.disk_cache_path = Some(path.into());
        self
    }

    /// Set the bundled package root.
    pub fn with_raw_cache_path(mut self, path: impl Into<String>) -> Self {
        self.raw_cache_path = Some(path.into());
        self
    }
}

/// Read-only view of the process-wide version records.
///
/// A lookup returns an owned snapshot. Within one request resolution the
/// caller keeps that snapshot; a second lookup may already observe a newer
/// record published by the update manager.
pub trait VersionDirectory: Send + Sync {
    /// Most recent record for a business id, if any.
    fn last_version_info(&self, business_id: &str) -> Option<BusinessVersionInfo>;
}

/// Process-wide version table.
///
/// `publish` is the update manager's write side; the resolver only consumes
/// the [`VersionDirectory`] read trait. Records are replaced whole, so a
/// reader never observes a half-written record.
#[derive(Debug, Default)]
pub struct VersionTable {
    entries: RwLock<HashMap<String, BusinessVersionInfo>>,
}

impl VersionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace the record for a business id.
    pub fn publish(&self, info: BusinessVersionInfo) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(info.business_id.clone(), info);
    }
}

impl VersionDirectory for VersionTable {
    fn last_version_info(&self, business_id: &str) -> Option<BusinessVersionInfo> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(business_id)
            .cloned()
    }
}
