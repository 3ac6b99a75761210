//! Axum server setup
//!
//! Each service is a self-contained `Router` carrying its own state, so the
//! binary can serve any one of them and tests can drive them directly.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::soap;
use crate::store::{AnalyticsStore, MarketStore};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8000)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            cors_permissive: false,
        }
    }
}

/// State for the marketplace service
#[derive(Clone)]
pub struct MarketState {
    pub store: Arc<dyn MarketStore>,
}

/// State for the analytics collector
#[derive(Clone)]
pub struct AnalyticsState {
    pub store: Arc<dyn AnalyticsStore>,
}

/// Products, users, orders, and reviews, documented under `/api-docs`
pub fn market_app(store: Arc<dyn MarketStore>) -> Router {
    Router::new()
        .merge(routes::health::router("market"))
        .merge(routes::openapi::router())
        .merge(routes::products::router())
        .merge(routes::users::router())
        .merge(routes::orders::router())
        .merge(routes::reviews::router())
        .with_state(MarketState { store })
}

/// Views, actions, and goals
pub fn analytics_app(store: Arc<dyn AnalyticsStore>) -> Router {
    Router::new()
        .merge(routes::health::router("analytics"))
        .merge(routes::analytics::router())
        .with_state(AnalyticsState { store })
}

/// SOAP product creation over the marketplace store
pub fn soap_app(store: Arc<dyn MarketStore>) -> Router {
    Router::new()
        .merge(routes::health::router("soap"))
        .merge(soap::router())
        .with_state(MarketState { store })
}

/// Serve `app` until Ctrl+C or SIGTERM.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(PgStore::new(create_pool(&database_url).await?));
/// run_server(market_app(store), ServerConfig::default()).await?;
/// ```
pub async fn run_server(app: Router, config: ServerConfig) -> Result<(), ServerError> {
    let cors = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin([
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://localhost:8000"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
                HeaderValue::from_static("http://127.0.0.1:8000"),
            ])
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = app.layer(cors).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
