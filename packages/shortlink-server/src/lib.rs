//! HTTP front end for the shortcut index.
//!
//! ## Routes
//!
//! | Method | Path              | Behavior                                         |
//! |--------|-------------------|--------------------------------------------------|
//! | GET    | `/`               | 301 to `/index.html`                             |
//! | any    | `/index.html`     | empty create form                                |
//! | GET    | `/opensearch.xml` | OpenSearch description                           |
//! | GET    | `/{alias}`        | 303 to the URL, or the form with fuzzy matches   |
//! | POST   | `/`, `/{alias}`   | create; 303 to the URL, stored in the background |

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    routing::{any, get},
    Router,
};
use shortlink_core::ShortcutIndex;
use tracing::info;

pub mod config;
pub mod error;
pub mod fetcher;
mod handlers;
pub mod jobs;
pub mod templates;

#[cfg(test)]
mod tests;

use config::ServerConfig;
use fetcher::DescriptionFetcher;
use templates::{ServiceInfo, Templates};

/// Shared request state. The index is opened once at startup and every
/// handler works on clones of the same handle.
#[derive(Clone)]
pub struct AppState {
    pub index: ShortcutIndex,
    pub templates: Arc<Templates>,
    pub fetcher: Arc<DescriptionFetcher>,
    pub service: ServiceInfo,
}

impl AppState {
    /// Build everything except the index from `config`.
    pub fn new(index: ShortcutIndex, config: &ServerConfig) -> Result<Self> {
        let templates = Templates::load(config.templates_dir.as_deref())
            .context("failed to load templates")?;
        let fetcher = DescriptionFetcher::new(config.fetch_attempts, config.fetch_timeout())
            .context("failed to build HTTP client")?;

        Ok(Self {
            index,
            templates: Arc::new(templates),
            fetcher: Arc::new(fetcher),
            service: ServiceInfo {
                service_name: config.service_name.clone(),
                service_host: config.service_host.clone(),
                port: config.port,
            },
        })
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::redirect_to_index).post(handlers::create_root),
        )
        .route("/index.html", any(handlers::empty_form))
        .route("/opensearch.xml", get(handlers::opensearch))
        .route(
            "/*shortform",
            get(handlers::lookup).post(handlers::create_at),
        )
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(state: AppState, bind_addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("HTTP server failed")
}
