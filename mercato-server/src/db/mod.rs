//! Database layer - connection pool, schema, repositories
//!
//! - Connection pool (default 5 connections)
//! - Runtime queries with `FromRow` row types, converted to domain types
//! - Order and review reads batch their lookups (no N+1)

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
