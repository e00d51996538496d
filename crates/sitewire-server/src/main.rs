mod config;

use anyhow::{Context, Result};
use axum::response::IntoResponse;
use axum::{Json, Router};
use config::Config;
use sitewire::{route_handler, HandlerRegistry, SiteLoader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load_default().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}, using defaults", e);
        Config::default()
    });

    info!("site root: {}", config.site.root);

    let loader = SiteLoader::new(&config.site.root).with_registry(default_registry());
    info!(
        "template cache: {}",
        if loader.config().cache_templates { "on" } else { "off" }
    );

    let app = loader
        .mount(Router::new())
        .context("failed to load site routes")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("server running at http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Handlers the demo site's declarations resolve against
fn default_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();

    registry.register(
        "/",
        "status",
        route_handler(|ctx| async move {
            if ctx.accepts_json() {
                Json(serde_json::json!({ "status": "ok", "path": ctx.path })).into_response()
            } else {
                format!("ok {}", ctx.path).into_response()
            }
        }),
    );

    registry
}
