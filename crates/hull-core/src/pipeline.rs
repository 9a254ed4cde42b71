//! Ordered request-interception pipeline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::request::ResourceRequest;
use crate::response::ResourceResponse;

/// A request interception handler.
///
/// Handlers are consulted in registration order and the first ready response
/// wins. A handler swallows its own failures and abstains with `None`; a
/// failed interception must never abort the page load.
pub trait InterceptHandler: Send + Sync {
    /// Short name used in log events.
    fn name(&self) -> &str;

    /// Inspect a request and either produce a response or abstain.
    fn intercept(&self, request: &ResourceRequest) -> Option<ResourceResponse>;
}

/// Identifier for a registered handler, usable for deregistration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Ordered, first-hit-wins dispatch over registered handlers.
///
/// Registration normally happens once during container setup. The list is
/// kept behind a read/write lock and `dispatch` walks a snapshot of it, so a
/// late registration cannot tear an in-flight dispatch.
pub struct InterceptPipeline {
    handlers: RwLock<Vec<(HandlerId, Arc<dyn InterceptHandler>)>>,
    next_id: AtomicU64,
}

impl InterceptPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Append a handler. Evaluation order is registration order; duplicate
    /// registrations are permitted.
    pub fn register(&self, handler: Arc<dyn InterceptHandler>) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, handler));
        id
    }

    /// Remove a previously registered handler.
    ///
    /// Returns `false` if the id is not (or no longer) registered.
    pub fn deregister(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        let before = handlers.len();
        handlers.retain(|(registered, _)| *registered != id);
        handlers.len() != before
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatch a request through the handler chain.
    ///
    /// Returns the first ready response, or `None` when every handler
    /// abstains and the network should proceed.
    pub fn dispatch(&self, request: &ResourceRequest) -> Option<ResourceResponse> {
        let snapshot: Vec<Arc<dyn InterceptHandler>> = {
            let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
            handlers.iter().map(|(_, h)| Arc::clone(h)).collect()
        };

        for handler in snapshot {
            match handler.intercept(request) {
                Some(response) if response.is_ready() => {
                    debug!(
                        handler = handler.name(),
                        url = %request.url,
                        "request served locally"
                    );
                    return Some(response);
                }
                Some(_) => {
                    debug!(
                        handler = handler.name(),
                        url = %request.url,
                        "non-ready response treated as abstention"
                    );
                }
                None => {}
            }
        }

        None
    }
}

impl Default for InterceptPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Adapter turning a fallible closure into a handler.
///
/// Embedder-supplied logic usually wants `?` over its own error types.
/// Errors are logged and converted into an abstention so the network path
/// stays the safety net.
pub struct FnHandler<F> {
    name: String,
    func: F,
}

impl<F> FnHandler<F>
where
    F: Fn(&ResourceRequest) -> anyhow::Result<Option<ResourceResponse>> + Send + Sync,
{
    /// Wrap a closure under a handler name.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> InterceptHandler for FnHandler<F>
where
    F: Fn(&ResourceRequest) -> anyhow::Result<Option<ResourceResponse>> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn intercept(&self, request: &ResourceRequest) -> Option<ResourceResponse> {
        match (self.func)(request) {
            Ok(response) => response,
            Err(error) => {
                warn!(
                    handler = %self.name,
                    url = %request.url,
                    %error,
                    "handler failed, falling through to network"
                );
                None
            }
        }
    }
}
