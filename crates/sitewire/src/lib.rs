// Sitewire - convention-based route loader for axum
// Walks a site tree for per-directory route declarations and wires each entry
// to a registered handler or a Tera template view

pub mod config;
pub mod declaration;
pub mod handler;
pub mod loader;
pub mod request_context;
pub mod view;

// Re-export framework types
pub use config::{SiteConfig, ENV_VAR};
pub use declaration::{RouteDeclaration, RouteKey, DECLARATION_FILE};
pub use handler::{route_handler, HandlerFuture, HandlerRegistry, RouteHandler};
pub use loader::SiteLoader;
pub use request_context::{QueryParams, RequestContext};
pub use view::{TemplateEngine, TEMPLATE_EXT};

// Re-export commonly used types from dependencies
pub use axum;
pub use axum::http::StatusCode;
