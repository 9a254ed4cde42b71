//! Resource response model.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read};

use http::StatusCode;

use crate::request::Headers;

/// Content source backing a locally served response.
///
/// Either an open read-only file handle or owned bytes. A file handle is
/// released when the body is dropped, including on early-miss paths.
#[derive(Debug)]
pub enum ResponseBody {
    /// An open file handle served straight from a local store.
    File(File),
    /// In-memory content.
    Bytes(Vec<u8>),
}

impl ResponseBody {
    /// Content length, when cheaply known.
    pub fn len(&self) -> Option<u64> {
        match self {
            Self::File(file) => file.metadata().ok().map(|m| m.len()),
            Self::Bytes(bytes) => Some(bytes.len() as u64),
        }
    }

    /// Consume the body into a reader for the rendering surface.
    pub fn into_reader(self) -> Box<dyn Read + Send> {
        match self {
            Self::File(file) => Box::new(file),
            Self::Bytes(bytes) => Box::new(Cursor::new(bytes)),
        }
    }
}

impl From<Vec<u8>> for ResponseBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<File> for ResponseBody {
    fn from(file: File) -> Self {
        Self::File(file)
    }
}

/// A resource response produced by an interception handler.
///
/// `ready` marks a response that is safe to hand to the rendering surface;
/// the pipeline treats a non-ready response as an abstention.
#[derive(Debug)]
pub struct ResourceResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Reason phrase sent alongside the status.
    pub reason: String,
    /// Response headers.
    pub headers: Headers,
    /// Content source.
    pub body: ResponseBody,
    /// Whether the response is complete and consumable.
    pub ready: bool,
}

impl ResourceResponse {
    /// Create a ready `200 OK` response around a body.
    pub fn ok(body: impl Into<ResponseBody>) -> Self {
        Self {
            status: StatusCode::OK,
            reason: StatusCode::OK.canonical_reason().unwrap_or("OK").to_string(),
            headers: HashMap::new(),
            body: body.into(),
            ready: true,
        }
    }

    /// Add a response header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the Content-Type header.
    pub fn with_content_type(self, value: impl Into<String>) -> Self {
        self.with_header("content-type", value)
    }

    /// Whether the response is safe to hand to the rendering surface.
    pub fn is_ready(&self) -> bool {
        self.ready
    }
}
