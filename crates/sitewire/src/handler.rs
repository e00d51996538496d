// File: src/handler.rs
// Purpose: Route handler type and the registry declaration values resolve against

use crate::request_context::RequestContext;
use axum::response::Response;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by route handlers
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// An async request handler bound to one declared route
pub type RouteHandler = Arc<dyn Fn(RequestContext) -> HandlerFuture + Send + Sync>;

/// Wrap an async function into a [`RouteHandler`]
pub fn route_handler<F, Fut>(f: F) -> RouteHandler
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

/// Explicit mapping from (route prefix, declared name) to handler functions
///
/// Declaration values name their handlers; the registry is where those names
/// are bound before loading. A name with no binding falls back to a template
/// view in the declaring directory.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<(String, String), RouteHandler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` under a route prefix (`"/"` for the root directory)
    pub fn register(
        &mut self,
        prefix: impl Into<String>,
        name: impl Into<String>,
        handler: RouteHandler,
    ) {
        self.handlers.insert((prefix.into(), name.into()), handler);
    }

    /// Look up the handler bound to `name` under `prefix`
    pub fn get(&self, prefix: &str, name: &str) -> Option<RouteHandler> {
        self.handlers
            .get(&(prefix.to_string(), name.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
