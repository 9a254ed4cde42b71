//! Building resource responses from resolved cache locations.

use std::path::Path;
use std::sync::Arc;

use hull_core::ResourceResponse;
use hull_store::{BundledStore, DiskCacheStore};
use tracing::warn;

use crate::tier::{TierHit, TierLocation};

/// Content-Type for a resolved path, from its extension.
pub fn content_type_for(path: &str) -> Option<&'static str> {
    let extension = Path::new(path).extension()?.to_str()?;
    match extension.to_ascii_lowercase().as_str() {
        "html" | "htm" => Some("text/html; charset=utf-8"),
        "js" | "mjs" => Some("application/javascript; charset=utf-8"),
        "css" => Some("text/css; charset=utf-8"),
        "json" => Some("application/json; charset=utf-8"),
        "txt" => Some("text/plain; charset=utf-8"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        "webp" => Some("image/webp"),
        "ico" => Some("image/x-icon"),
        "woff" => Some("font/woff"),
        "woff2" => Some("font/woff2"),
        "ttf" => Some("font/ttf"),
        "wasm" => Some("application/wasm"),
        _ => None,
    }
}

/// Turns a resolved cache location into a ready response.
///
/// An open failure degrades to a miss: the file may have been deleted
/// between the existence check and the open, and an unreadable body must
/// never reach the rendering surface.
pub struct ResponseBuilder {
    disk: Arc<dyn DiskCacheStore>,
    bundled: Arc<dyn BundledStore>,
}

impl ResponseBuilder {
    /// Create a builder over the two tier stores.
    pub fn new(disk: Arc<dyn DiskCacheStore>, bundled: Arc<dyn BundledStore>) -> Self {
        Self { disk, bundled }
    }

    /// Open the hit's location and build a `200 OK` response around it.
    pub fn build(&self, hit: &TierHit) -> Option<ResourceResponse> {
        let (opened, path) = match &hit.location {
            TierLocation::Disk { root, relative } => {
                (self.disk.open(root, relative), relative.as_str())
            }
            TierLocation::Bundled(reference) => (self.bundled.open(reference), reference.as_str()),
        };

        let body = match opened {
            Ok(body) => body,
            Err(error) => {
                warn!(
                    tier = %hit.tier,
                    path,
                    %error,
                    "resolved file failed to open, degrading to miss"
                );
                return None;
            }
        };

        let mut response = ResourceResponse::ok(body);
        if let Some(content_type) = content_type_for(path) {
            response = response.with_content_type(content_type);
        }
        Some(response)
    }
}
