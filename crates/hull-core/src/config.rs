//! Per-container configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for one embedded web container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Whether the tiered cache resolver is active. When false, a supplied
    /// fallback handler runs in its place.
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
    /// URL prefix served from local caches. Absence disables tiered
    /// resolution for this container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url_prefix: Option<String>,
    /// Scheme marker for first-party bundled assets (e.g. `internal:`).
    #[serde(default = "default_internal_scheme")]
    pub internal_scheme: String,
    /// Root of the sandboxed application files resolved for the internal
    /// scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_root: Option<PathBuf>,
}

fn default_use_cache() -> bool {
    true
}

fn default_internal_scheme() -> String {
    "internal:".to_string()
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            use_cache: default_use_cache(),
            web_url_prefix: None,
            internal_scheme: default_internal_scheme(),
            sandbox_root: None,
        }
    }
}

impl ContainerConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the URL prefix served from local caches.
    pub fn with_web_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.web_url_prefix = Some(prefix.into());
        self
    }

    /// Set the internal scheme marker.
    pub fn with_internal_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.internal_scheme = scheme.into();
        self
    }

    /// Set the sandboxed application-files root.
    pub fn with_sandbox_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.sandbox_root = Some(root.into());
        self
    }

    /// Disable the tiered cache resolver.
    pub fn without_cache(mut self) -> Self {
        self.use_cache = false;
        self
    }
}
