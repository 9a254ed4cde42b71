//! Resource request model.

use std::collections::HashMap;

use http::Method;

/// HTTP-style headers on a request or response.
pub type Headers = HashMap<String, String>;

/// A single outgoing resource request issued by the embedded page.
///
/// Supplied by the rendering surface once per fetch. The interception
/// pipeline only reads it.
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    /// Full request URL as the page issued it.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Request headers.
    pub headers: Headers,
}

impl ResourceRequest {
    /// Create a GET request for a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::GET,
            headers: HashMap::new(),
        }
    }

    /// Set the HTTP method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Get a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        let name_lower = name.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == name_lower)
            .map(|(_, v)| v.as_str())
    }
}
