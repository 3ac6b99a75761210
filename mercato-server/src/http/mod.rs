//! HTTP layer
//!
//! Axum routers for the three services with:
//! - CORS (localhost only by default)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use server::{analytics_app, market_app, run_server, soap_app, ServerConfig, ServerError};
