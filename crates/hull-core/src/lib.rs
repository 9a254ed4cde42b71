//! Core abstractions for the hybrid web container shell.
//!
//! This crate provides the fundamental types and traits:
//! - `ResourceRequest` / `ResourceResponse` - the resource fetch model
//! - `InterceptHandler` trait - request interception interface
//! - `InterceptPipeline` - ordered first-hit-wins dispatch
//! - `ContainerConfig` - per-container configuration

mod config;
mod pipeline;
mod request;
mod response;

pub use config::*;
pub use pipeline::*;
pub use request::*;
pub use response::*;
