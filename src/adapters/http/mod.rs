pub mod error;
pub mod handlers;

use crate::core::catalog::CatalogResolver;
use crate::domain::ports::ObjectStore;
use crate::utils::error::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use url::Url;

pub struct AppState<S: ObjectStore> {
    pub resolver: Arc<CatalogResolver<S>>,
    /// Base URL thumbnails are publicly served from, e.g. a CDN in front of the bucket.
    pub public_base_url: Option<Url>,
}

impl<S: ObjectStore> AppState<S> {
    pub fn new(resolver: CatalogResolver<S>, public_base_url: Option<Url>) -> Self {
        Self {
            resolver: Arc::new(resolver),
            public_base_url,
        }
    }
}

impl<S: ObjectStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            public_base_url: self.public_base_url.clone(),
        }
    }
}

pub fn create_router<S: ObjectStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(handlers::list_portfolios::<S>))
        .route("/health", get(handlers::health))
        .route("/portfolio/{portfolio_id}", get(handlers::list_albums::<S>))
        .route(
            "/portfolio/{portfolio_id}/album/{album_id}",
            get(handlers::list_photos::<S>),
        )
        .route(
            "/portfolio/{portfolio_id}/album/{album_id}/photo/{photo_id}",
            get(handlers::get_photo::<S>),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until Ctrl-C. Dropping a connection drops its handler future, which
/// cancels any listing still in flight for it.
pub async fn serve<S: ObjectStore + 'static>(listener: TcpListener, state: AppState<S>) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("🌐 Listening on http://{}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
