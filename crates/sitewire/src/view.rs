// File: src/view.rs
// Purpose: Template engine and the fallback view for routes without handlers

use crate::config::SiteConfig;
use crate::handler::RouteHandler;
use anyhow::{bail, Context, Result};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use std::path::Path;
use std::sync::Arc;
use tera::Tera;
use tokio::sync::RwLock;

/// Extension appended to declared template base names
pub const TEMPLATE_EXT: &str = "tera";

/// Renders Tera templates, reusing compiled templates only when caching is on
///
/// With caching disabled every render compiles a fresh single-file instance,
/// so on-disk template edits are visible between successive renders.
pub struct TemplateEngine {
    cache_templates: bool,
    compiled: RwLock<Tera>,
}

impl TemplateEngine {
    pub fn new(cache_templates: bool) -> Self {
        Self {
            cache_templates,
            compiled: RwLock::new(Tera::default()),
        }
    }

    /// Render `template` with the request path and the loader's config
    ///
    /// Templates see three parameters: `path`, `basedir`, and `cache`.
    pub async fn render(&self, template: &Path, path: &str, config: &SiteConfig) -> Result<String> {
        let mut ctx = tera::Context::new();
        ctx.insert("path", path);
        ctx.insert("basedir", &config.base_dir.display().to_string());
        ctx.insert("cache", &config.cache_templates);

        let name = template.to_string_lossy().into_owned();

        if !self.cache_templates {
            let mut tera = Tera::default();
            tera.add_template_file(template, Some(&name))
                .with_context(|| format!("failed to compile template {}", template.display()))?;
            return tera
                .render(&name, &ctx)
                .with_context(|| format!("failed to render template {}", template.display()));
        }

        {
            let compiled = self.compiled.read().await;
            if compiled.get_template_names().any(|n| n == name) {
                return compiled
                    .render(&name, &ctx)
                    .with_context(|| format!("failed to render template {}", template.display()));
            }
        }

        let mut compiled = self.compiled.write().await;
        if !compiled.get_template_names().any(|n| n == name) {
            compiled
                .add_template_file(template, Some(&name))
                .with_context(|| format!("failed to compile template {}", template.display()))?;
        }
        compiled
            .render(&name, &ctx)
            .with_context(|| format!("failed to render template {}", template.display()))
    }
}

/// Build the fallback view for a declared name with no registered handler
///
/// The template must exist when the route is registered; a missing file
/// aborts loading instead of surfacing on the first request. Render failures
/// at request time answer 500 and leave the process up.
pub fn fallback_view(
    dir: &Path,
    name: &str,
    config: Arc<SiteConfig>,
    engine: Arc<TemplateEngine>,
) -> Result<RouteHandler> {
    let template = dir.join(format!("{name}.{TEMPLATE_EXT}"));
    if !template.exists() {
        bail!("{}: template {} does not exist", dir.display(), name);
    }

    Ok(Arc::new(move |ctx| {
        let template = template.clone();
        let config = config.clone();
        let engine = engine.clone();
        Box::pin(async move {
            match engine.render(&template, &ctx.path, &config).await {
                Ok(body) => Html(body).into_response(),
                Err(err) => {
                    tracing::error!("failed to render {}: {err:#}", template.display());
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        })
    }))
}
