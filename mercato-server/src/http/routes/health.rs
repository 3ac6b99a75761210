//! Liveness endpoint shared by the market, analytics, and SOAP services

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Body of GET /health, naming which of the three services answered
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    fn ok(service: &'static str) -> Self {
        Self {
            status: "ok",
            service,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// GET /health for the service called `service`
pub fn router<S>(service: &'static str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/health",
        get(move || async move { Json(HealthResponse::ok(service)) }),
    )
}
