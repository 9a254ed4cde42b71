//! Tiered cache resolution for the hybrid web container shell.
//!
//! This crate provides:
//! - `PathResolver` - URL-to-cache-path normalization
//! - `VersionDirectory` / `VersionTable` - per-business version records
//! - `TierResolver` - disk-then-bundled cache tier policy
//! - `ResponseBuilder` - resolved locations into resource responses
//! - `InterceptorBuilder` - pipeline assembly for one container
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hull_cache::{InterceptorBuilder, VersionTable};
//! use hull_core::ContainerConfig;
//! use hull_store::{DirBundledStore, FsDiskStore};
//!
//! let config = ContainerConfig::new()
//!     .with_web_url_prefix("https://cdn.example/app/")
//!     .with_sandbox_root("/data/app/files");
//!
//! let directory = Arc::new(VersionTable::new());
//! let pipeline = InterceptorBuilder::new(
//!     config,
//!     directory,
//!     Arc::new(FsDiskStore::new()),
//!     Arc::new(DirBundledStore::new("/data/app/packages")),
//! )
//! .build();
//!
//! // per resource request, on the rendering surface's evaluation path:
//! // pipeline.dispatch(&request)
//! ```

mod intercept;
mod path;
mod response;
mod tier;
mod version;

pub use intercept::*;
pub use path::*;
pub use response::*;
pub use tier::*;
pub use version::*;
