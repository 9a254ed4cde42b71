//! Interception handlers and pipeline assembly.

use std::sync::Arc;

use hull_core::{
    ContainerConfig, InterceptHandler, InterceptPipeline, ResourceRequest, ResourceResponse,
};
use hull_store::{BundledStore, DiskCacheStore, SandboxFiles};
use tracing::{debug, warn};

use crate::path::PathResolver;
use crate::response::{content_type_for, ResponseBuilder};
use crate::tier::TierResolver;
use crate::version::VersionDirectory;

/// Serves URLs carrying the internal scheme marker straight from the
/// sandboxed application files.
///
/// First-party bundled assets resolve here before any tiered-cache handler,
/// without touching the version or tier machinery.
pub struct InternalSchemeHandler {
    scheme: String,
    files: SandboxFiles,
}

impl InternalSchemeHandler {
    /// Create a handler for a scheme marker (e.g. `internal:`).
    pub fn new(scheme: impl Into<String>, files: SandboxFiles) -> Self {
        Self {
            scheme: scheme.into(),
            files,
        }
    }
}

impl InterceptHandler for InternalSchemeHandler {
    fn name(&self) -> &str {
        "internal-scheme"
    }

    fn intercept(&self, request: &ResourceRequest) -> Option<ResourceResponse> {
        let relative = request.url.strip_prefix(&self.scheme)?;
        match self.files.open(relative) {
            Ok(body) => {
                let mut response = ResourceResponse::ok(body);
                if let Some(content_type) = content_type_for(relative) {
                    response = response.with_content_type(content_type);
                }
                Some(response)
            }
            Err(error) => {
                debug!(url = %request.url, %error, "internal asset unavailable");
                None
            }
        }
    }
}

/// The tiered cache handler.
///
/// Per request: normalize the URL, snapshot the business's version record,
/// resolve the cache tiers, build the response. Every internal failure is
/// swallowed into an abstention; the network path is the safety net.
pub struct TieredCacheHandler {
    resolver: PathResolver,
    directory: Arc<dyn VersionDirectory>,
    tiers: TierResolver,
    builder: ResponseBuilder,
}

impl TieredCacheHandler {
    /// Create a handler for a URL prefix over the given directory and stores.
    pub fn new(
        prefix: impl Into<String>,
        directory: Arc<dyn VersionDirectory>,
        disk: Arc<dyn DiskCacheStore>,
        bundled: Arc<dyn BundledStore>,
    ) -> Self {
        Self {
            resolver: PathResolver::new(prefix),
            directory,
            tiers: TierResolver::new(Arc::clone(&disk), Arc::clone(&bundled)),
            builder: ResponseBuilder::new(disk, bundled),
        }
    }
}

impl InterceptHandler for TieredCacheHandler {
    fn name(&self) -> &str {
        "tiered-cache"
    }

    fn intercept(&self, request: &ResourceRequest) -> Option<ResourceResponse> {
        let path = self.resolver.normalize(&request.url)?;
        // One snapshot per resolution; the record is not re-read mid-request.
        let info = self.directory.last_version_info(&path.business_id)?;
        let hit = self.tiers.resolve(&path.relative, &info)?;
        self.builder.build(&hit)
    }
}

/// Wires a container's interception pipeline during setup.
///
/// Priority is fixed and explicit: the internal-scheme handler always comes
/// first; the tiered handler follows when caching is enabled and a prefix is
/// configured; when caching is disabled a supplied fallback handler takes
/// the tiered handler's slot instead.
pub struct InterceptorBuilder {
    config: ContainerConfig,
    directory: Arc<dyn VersionDirectory>,
    disk: Arc<dyn DiskCacheStore>,
    bundled: Arc<dyn BundledStore>,
    fallback: Option<Arc<dyn InterceptHandler>>,
}

impl InterceptorBuilder {
    /// Create a builder over the container's configuration and stores.
    pub fn new(
        config: ContainerConfig,
        directory: Arc<dyn VersionDirectory>,
        disk: Arc<dyn DiskCacheStore>,
        bundled: Arc<dyn BundledStore>,
    ) -> Self {
        Self {
            config,
            directory,
            disk,
            bundled,
            fallback: None,
        }
    }

    /// Handler to run in place of the tiered resolver when `use_cache` is
    /// off. Its result, including an abstention, is returned unchanged.
    pub fn with_fallback(mut self, handler: Arc<dyn InterceptHandler>) -> Self {
        self.fallback = Some(handler);
        self
    }

    /// Assemble the pipeline.
    pub fn build(self) -> InterceptPipeline {
        let pipeline = InterceptPipeline::new();

        if let Some(root) = &self.config.sandbox_root {
            pipeline.register(Arc::new(InternalSchemeHandler::new(
                self.config.internal_scheme.clone(),
                SandboxFiles::new(root),
            )));
        }

        if self.config.use_cache {
            match &self.config.web_url_prefix {
                Some(prefix) => {
                    pipeline.register(Arc::new(TieredCacheHandler::new(
                        prefix.clone(),
                        self.directory,
                        self.disk,
                        self.bundled,
                    )));
                }
                None => {
                    warn!("no web url prefix configured, tiered resolution disabled");
                }
            }
        } else if let Some(fallback) = self.fallback {
            pipeline.register(fallback);
        }

        pipeline
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use http::StatusCode;
    use hull_store::{FsDiskStore, MemoryBundledStore};

    use super::*;
    use crate::version::{BusinessVersionInfo, VersionTable};

    const PREFIX: &str = "https://cdn.example/app/";

    fn disk_cache_with_file(relative: &str, content: &[u8]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(relative);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("cache subdirs");
        std::fs::write(&path, content).expect("cache file");
        dir
    }

    fn pipeline_for(
        config: ContainerConfig,
        directory: Arc<VersionTable>,
        bundled: MemoryBundledStore,
    ) -> InterceptPipeline {
        InterceptorBuilder::new(
            config,
            directory,
            Arc::new(FsDiskStore::new()),
            Arc::new(bundled),
        )
        .build()
    }

    fn body_string(response: ResourceResponse) -> String {
        let mut content = String::new();
        response
            .body
            .into_reader()
            .read_to_string(&mut content)
            .expect("readable body");
        content
    }

    #[test]
    fn test_disk_hit_with_fragment_in_url() {
        let dir = disk_cache_with_file("v1/page.html", b"<html>cached</html>");
        let directory = Arc::new(VersionTable::new());
        directory.publish(BusinessVersionInfo::new("v1").with_disk_cache_path(dir.path()));

        let pipeline = pipeline_for(
            ContainerConfig::new().with_web_url_prefix(PREFIX),
            directory,
            MemoryBundledStore::new(),
        );

        let request = ResourceRequest::new("https://cdn.example/app/v1/page.html#x=1");
        let response = pipeline.dispatch(&request).expect("disk hit");

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.reason, "OK");
        assert!(response.is_ready());
        assert_eq!(body_string(response), "<html>cached</html>");
    }

    #[test]
    fn test_disk_configured_but_absent_never_falls_back_to_bundled() {
        let dir = tempfile::tempdir().expect("temp dir");
        let directory = Arc::new(VersionTable::new());
        directory.publish(
            BusinessVersionInfo::new("v1")
                .with_disk_cache_path(dir.path())
                .with_raw_cache_path("offline"),
        );

        let bundled =
            MemoryBundledStore::new().with_file("offline/v1/page.html", b"stale".to_vec());
        let pipeline = pipeline_for(
            ContainerConfig::new().with_web_url_prefix(PREFIX),
            directory,
            bundled,
        );

        let request = ResourceRequest::new("https://cdn.example/app/v1/page.html");
        assert!(pipeline.dispatch(&request).is_none());
    }

    #[test]
    fn test_bundled_hit_without_disk_cache() {
        let directory = Arc::new(VersionTable::new());
        directory.publish(BusinessVersionInfo::new("v1").with_raw_cache_path("offline"));

        let bundled =
            MemoryBundledStore::new().with_file("offline/v1/page.html", b"bundled".to_vec());
        let pipeline = pipeline_for(
            ContainerConfig::new().with_web_url_prefix(PREFIX),
            directory,
            bundled,
        );

        let request = ResourceRequest::new("https://cdn.example/app/v1/page.html");
        let response = pipeline.dispatch(&request).expect("bundled hit");
        assert!(response.is_ready());
        assert_eq!(body_string(response), "bundled");
    }

    #[test]
    fn test_prefix_mismatch_abstains() {
        let directory = Arc::new(VersionTable::new());
        let pipeline = pipeline_for(
            ContainerConfig::new().with_web_url_prefix(PREFIX),
            directory,
            MemoryBundledStore::new(),
        );

        let request = ResourceRequest::new("https://other.example/app/v1/page.html");
        assert!(pipeline.dispatch(&request).is_none());
    }

    #[test]
    fn test_unknown_business_id_abstains() {
        let directory = Arc::new(VersionTable::new());
        let pipeline = pipeline_for(
            ContainerConfig::new().with_web_url_prefix(PREFIX),
            directory,
            MemoryBundledStore::new(),
        );

        let request = ResourceRequest::new("https://cdn.example/app/v1/page.html");
        assert!(pipeline.dispatch(&request).is_none());
    }

    #[test]
    fn test_missing_prefix_disables_tiered_resolution() {
        let directory = Arc::new(VersionTable::new());
        directory.publish(BusinessVersionInfo::new("v1").with_raw_cache_path("offline"));

        let bundled =
            MemoryBundledStore::new().with_file("offline/v1/page.html", b"bundled".to_vec());
        let pipeline = pipeline_for(ContainerConfig::new(), directory, bundled);

        let request = ResourceRequest::new("https://cdn.example/app/v1/page.html");
        assert!(pipeline.dispatch(&request).is_none());
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_internal_scheme_served_regardless_of_cache_config() {
        let sandbox = tempfile::tempdir().expect("temp dir");
        let asset = sandbox.path().join("assets/logo.png");
        std::fs::create_dir_all(asset.parent().expect("parent")).expect("sandbox subdirs");
        std::fs::write(&asset, b"png-bytes").expect("sandbox file");

        let directory = Arc::new(VersionTable::new());
        let pipeline = pipeline_for(
            ContainerConfig::new()
                .with_sandbox_root(sandbox.path())
                .without_cache(),
            directory,
            MemoryBundledStore::new(),
        );

        let request = ResourceRequest::new("internal:assets/logo.png");
        let response = pipeline.dispatch(&request).expect("sandbox hit");
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.headers.get("content-type").map(String::as_str),
            Some("image/png")
        );
    }

    #[test]
    fn test_internal_scheme_checked_before_tiered_handler() {
        let sandbox = tempfile::tempdir().expect("temp dir");
        std::fs::write(sandbox.path().join("logo.png"), b"sandbox").expect("sandbox file");

        let directory = Arc::new(VersionTable::new());
        let pipeline = pipeline_for(
            ContainerConfig::new()
                .with_web_url_prefix(PREFIX)
                .with_sandbox_root(sandbox.path()),
            directory,
            MemoryBundledStore::new(),
        );

        assert_eq!(pipeline.len(), 2);
        let request = ResourceRequest::new("internal:logo.png");
        let response = pipeline.dispatch(&request).expect("sandbox hit");
        assert_eq!(body_string(response), "sandbox");
    }

    #[test]
    fn test_custom_internal_scheme_marker() {
        let sandbox = tempfile::tempdir().expect("temp dir");
        std::fs::write(sandbox.path().join("splash.html"), b"<html>splash</html>")
            .expect("sandbox file");

        let directory = Arc::new(VersionTable::new());
        let pipeline = pipeline_for(
            ContainerConfig::new()
                .with_internal_scheme("app-asset:")
                .with_sandbox_root(sandbox.path()),
            directory,
            MemoryBundledStore::new(),
        );

        assert!(pipeline
            .dispatch(&ResourceRequest::new("internal:splash.html"))
            .is_none());
        let response = pipeline
            .dispatch(&ResourceRequest::new("app-asset:splash.html"))
            .expect("sandbox hit");
        assert_eq!(body_string(response), "<html>splash</html>");
    }

    #[test]
    fn test_cache_disabled_runs_fallback_instead_of_tiers() {
        let dir = disk_cache_with_file("v1/page.html", b"cached");
        let directory = Arc::new(VersionTable::new());
        directory.publish(BusinessVersionInfo::new("v1").with_disk_cache_path(dir.path()));

        let calls = Arc::new(AtomicUsize::new(0));
        let fallback_calls = Arc::clone(&calls);
        let fallback = Arc::new(hull_core::FnHandler::new("fallback", move |_request| {
            fallback_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(ResourceResponse::ok(b"fallback".to_vec())))
        }));

        let pipeline = InterceptorBuilder::new(
            ContainerConfig::new()
                .with_web_url_prefix(PREFIX)
                .without_cache(),
            directory,
            Arc::new(FsDiskStore::new()),
            Arc::new(MemoryBundledStore::new()),
        )
        .with_fallback(fallback)
        .build();

        let request = ResourceRequest::new("https://cdn.example/app/v1/page.html");
        let response = pipeline.dispatch(&request).expect("fallback response");
        assert_eq!(body_string(response), "fallback");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cache_disabled_fallback_abstention_is_returned_unchanged() {
        let directory = Arc::new(VersionTable::new());
        let fallback = Arc::new(hull_core::FnHandler::new("fallback", |_request| Ok(None)));

        let pipeline = InterceptorBuilder::new(
            ContainerConfig::new()
                .with_web_url_prefix(PREFIX)
                .without_cache(),
            directory,
            Arc::new(FsDiskStore::new()),
            Arc::new(MemoryBundledStore::new()),
        )
        .with_fallback(fallback)
        .build();

        let request = ResourceRequest::new("https://cdn.example/app/v1/page.html");
        assert!(pipeline.dispatch(&request).is_none());
    }
}
