// File: src/loader.rs
// Purpose: Walks a site tree and registers every declared route on an axum Router

use crate::config::SiteConfig;
use crate::declaration::{RouteDeclaration, RouteKey, DECLARATION_FILE};
use crate::handler::{HandlerFuture, HandlerRegistry, RouteHandler};
use crate::request_context::{QueryParams, RequestContext};
use crate::view::{fallback_view, TemplateEngine};
use anyhow::{Context, Result};
use axum::extract::Query;
use axum::http::{HeaderMap, Method, Uri};
use axum::routing::on;
use axum::Router;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Convention-based route loader
///
/// Walks `root` for [`DECLARATION_FILE`] files and registers every declared
/// entry on the supplied router. Handler names resolve against the registry
/// first, then fall back to a sibling Tera template.
pub struct SiteLoader {
    root: PathBuf,
    config: SiteConfig,
    registry: HandlerRegistry,
}

impl SiteLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let config = SiteConfig::new(&root);
        Self {
            root,
            config,
            registry: HandlerRegistry::new(),
        }
    }

    /// Replace the handler registry declaration values resolve against
    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Override the env-derived template cache flag
    pub fn with_template_cache(mut self, cache_templates: bool) -> Self {
        self.config = self.config.with_template_cache(cache_templates);
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Register every declared route under the loader's root
    ///
    /// Runs to completion before the application serves. A directory read
    /// failure, malformed declaration, invalid route key, or unresolvable
    /// handler name aborts the whole load.
    pub fn mount(&self, router: Router) -> Result<Router> {
        let config = Arc::new(self.config.clone());
        let engine = Arc::new(TemplateEngine::new(config.cache_templates));
        self.step(router, &self.root, &config, &engine)
    }

    /// Recursive stepping over one directory level
    fn step(
        &self,
        mut router: Router,
        dir: &Path,
        config: &Arc<SiteConfig>,
        engine: &Arc<TemplateEngine>,
    ) -> Result<Router> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("failed to read directory {}", dir.display()))?;

        for entry in entries {
            let entry =
                entry.with_context(|| format!("failed to read directory {}", dir.display()))?;
            let path = entry.path();

            // stat, not lstat: directories behind symlinks are recursed into
            let stat = fs::metadata(&path)
                .with_context(|| format!("failed to stat {}", path.display()))?;

            if stat.is_dir() {
                router = self.step(router, &path, config, engine)?;
            } else if entry.file_name() == DECLARATION_FILE {
                let declaration = RouteDeclaration::load(&path)?;
                router = self.register_directory(router, dir, &declaration, config, engine)?;
            }
        }

        Ok(router)
    }

    /// Register all entries declared by one directory
    fn register_directory(
        &self,
        mut router: Router,
        dir: &Path,
        declaration: &RouteDeclaration,
        config: &Arc<SiteConfig>,
        engine: &Arc<TemplateEngine>,
    ) -> Result<Router> {
        let prefix = self.route_prefix(dir);
        let lookup_prefix = if prefix.is_empty() { "/" } else { prefix.as_str() };

        tracing::debug!("routes: {}", lookup_prefix);

        for (key, target) in declaration.entries() {
            let route = RouteKey::parse(key)
                .with_context(|| format!("invalid route key {key:?} in {}", dir.display()))?;
            let path = route.route_path(&prefix);

            tracing::debug!("{} {} -> .{}", route.method, path, target);

            let handler = match self.registry.get(lookup_prefix, target) {
                Some(handler) => handler,
                None => fallback_view(dir, target, config.clone(), engine.clone())?,
            };

            router = router.route(&path, on(route.filter, into_axum_handler(handler)));
        }

        Ok(router)
    }

    /// Route prefix of `dir` relative to the loader root (empty for the root itself)
    fn route_prefix(&self, dir: &Path) -> String {
        let rel = dir.strip_prefix(&self.root).unwrap_or(dir);
        let rel = rel.to_string_lossy().replace('\\', "/");

        if rel.is_empty() {
            String::new()
        } else {
            format!("/{rel}")
        }
    }
}

/// Adapt a [`RouteHandler`] to axum's extractor-based handler shape
fn into_axum_handler(
    handler: RouteHandler,
) -> impl Fn(Method, Uri, Query<HashMap<String, String>>, HeaderMap) -> HandlerFuture
       + Clone
       + Send
       + Sync
       + 'static {
    move |method: Method,
          uri: Uri,
          Query(query): Query<HashMap<String, String>>,
          headers: HeaderMap|
          -> HandlerFuture {
        let handler = handler.clone();
        let ctx = RequestContext::new(
            method,
            uri.path().to_string(),
            QueryParams::new(query),
            headers,
        );
        Box::pin(async move { handler(ctx).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_prefix_strips_root() {
        let loader = SiteLoader::new("/srv/site");

        assert_eq!(loader.route_prefix(Path::new("/srv/site")), "");
        assert_eq!(loader.route_prefix(Path::new("/srv/site/blog")), "/blog");
        assert_eq!(
            loader.route_prefix(Path::new("/srv/site/blog/2024")),
            "/blog/2024"
        );
    }
}
