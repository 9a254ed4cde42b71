//! Cache-tier resolution.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use hull_store::{BundledRef, BundledStore, DiskCacheStore};
use tracing::debug;

use crate::version::BusinessVersionInfo;

/// One ranked local source consulted before falling back to the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTier {
    /// Writable on-disk cache populated by the update manager.
    Disk,
    /// Read-only resources packaged with the application.
    Bundled,
}

impl fmt::Display for CacheTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disk => write!(f, "disk"),
            Self::Bundled => write!(f, "bundled"),
        }
    }
}

/// Location of a resolved resource within its tier.
#[derive(Debug, Clone, PartialEq)]
pub enum TierLocation {
    /// File under a disk cache root.
    Disk { root: PathBuf, relative: String },
    /// Resolved reference into the bundled package set.
    Bundled(BundledRef),
}

/// A successful tier lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct TierHit {
    /// Tier that produced the hit.
    pub tier: CacheTier,
    /// Where to open the content.
    pub location: TierLocation,
}

/// Resolves a normalized path against the cache tiers in priority order.
pub struct TierResolver {
    disk: Arc<dyn DiskCacheStore>,
    bundled: Arc<dyn BundledStore>,
}

impl TierResolver {
    /// Create a resolver over the two tier stores.
    pub fn new(disk: Arc<dyn DiskCacheStore>, bundled: Arc<dyn BundledStore>) -> Self {
        Self { disk, bundled }
    }

    /// Try each tier for `relative`, returning the first hit.
    ///
    /// A configured disk cache owns its business id: when the file is absent
    /// there, the lookup ends in a miss instead of widening to the bundled
    /// tier. Absence under a configured disk root means a stale or partial
    /// cache, not an invitation to serve the older bundled copy.
    pub fn resolve(&self, relative: &str, info: &BusinessVersionInfo) -> Option<TierHit> {
        if let Some(root) = &info.disk_cache_path {
            if self.disk.exists(root, relative) {
                debug!(
                    business = %info.business_id,
                    path = relative,
                    tier = %CacheTier::Disk,
                    "cache hit"
                );
                return Some(TierHit {
                    tier: CacheTier::Disk,
                    location: TierLocation::Disk {
                        root: root.clone(),
                        relative: relative.to_string(),
                    },
                });
            }
            debug!(
                business = %info.business_id,
                path = relative,
                "file absent from configured disk cache, miss"
            );
            return None;
        }

        if let Some(root) = &info.raw_cache_path {
            if let Some(reference) = self.bundled.resolve(root, relative) {
                debug!(
                    business = %info.business_id,
                    path = relative,
                    tier = %CacheTier::Bundled,
                    "cache hit"
                );
                return Some(TierHit {
                    tier: CacheTier::Bundled,
                    location: TierLocation::Bundled(reference),
                });
            }
        }

        debug!(business = %info.business_id, path = relative, "cache miss");
        None
    }
}
