//! URL-to-cache-path normalization.

/// A request URL normalized into a cache-relative path and the business
/// identifier owning it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePath {
    /// Path relative to a cache root.
    pub relative: String,
    /// Key into the version directory, derived from the first path segment.
    pub business_id: String,
}

/// Normalizes request URLs against the container's served prefix.
///
/// Derivation is pure: the same URL always yields the same path and
/// business id.
#[derive(Debug, Clone)]
pub struct PathResolver {
    prefix: String,
}

impl PathResolver {
    /// Create a resolver for a URL prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Normalize a request URL.
    ///
    /// Returns `None` when the URL does not start with the prefix or reduces
    /// to an empty or unsafe path. Fragments and query strings never
    /// participate in path or business-id derivation.
    pub fn normalize(&self, url: &str) -> Option<CachePath> {
        let remainder = url.strip_prefix(&self.prefix)?;
        let remainder = remainder.split(['#', '?']).next().unwrap_or_default();
        let relative = remainder.trim_start_matches('/');

        if relative.is_empty() {
            return None;
        }
        // A cache path must never climb out of its root.
        if relative.split('/').any(|segment| segment == "..") {
            return None;
        }

        let business_id = relative.split('/').next().unwrap_or_default();

        Some(CachePath {
            relative: relative.to_string(),
            business_id: business_id.to_string(),
        })
    }
}
