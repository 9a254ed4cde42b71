//! Public SDK for the hybrid web container shell.
//!
//! This crate re-exports the interception engine:
//!
//! ```ignore
//! use std::sync::Arc;
//! use hull_sdk::prelude::*;
//!
//! let config = ContainerConfig::new()
//!     .with_web_url_prefix("https://cdn.example/app/")
//!     .with_sandbox_root("/data/app/files");
//!
//! let directory = Arc::new(VersionTable::new());
//! let pipeline = InterceptorBuilder::new(
//!     config,
//!     Arc::clone(&directory) as Arc<dyn VersionDirectory>,
//!     Arc::new(FsDiskStore::new()),
//!     Arc::new(DirBundledStore::new("/data/app/packages")),
//! )
//! .build();
//!
//! // wired into the rendering surface's interception callback:
//! // |request| pipeline.dispatch(&request)
//! ```

pub use hull_cache;
pub use hull_core;
pub use hull_store;

/// Prelude for convenient imports.
pub mod prelude {
    pub use hull_cache::*;
    pub use hull_core::*;
    pub use hull_store::*;
}
