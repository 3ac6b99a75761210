//! HTTP server command
//!
//! Runs a single service per process, matching how the services are deployed.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use mercato_server::http::{analytics_app, market_app, run_server, soap_app, ServerConfig};
use mercato_server::store::{AnalyticsStore, MarketStore};
use mercato_server::{MemoryAnalyticsStore, MemoryStore};

use super::DatabaseArgs;

/// Which service to expose
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Products, users, orders, reviews (REST)
    Market,
    /// Views, actions, goals (REST)
    Analytics,
    /// CreateProduct over SOAP
    Soap,
}

/// Where records are kept
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    /// Process memory; everything is lost on exit
    Memory,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Service to run
    #[arg(long, value_enum, default_value_t = Service::Market)]
    pub service: Service,

    /// Storage backend
    #[arg(long, value_enum, env = "MERCATO_STORE", default_value_t = StoreKind::Postgres)]
    pub store: StoreKind,

    /// Address to bind to
    #[arg(long, short = 'b', env = "MERCATO_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Run the HTTP server until shutdown
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    let (market, analytics, pg): (Arc<dyn MarketStore>, Arc<dyn AnalyticsStore>, _) =
        match args.store {
            StoreKind::Postgres => {
                let store = args.db.open_store().await?;
                (Arc::new(store.clone()), Arc::new(store.clone()), Some(store))
            }
            StoreKind::Memory => {
                tracing::warn!("Using in-memory store; data will not survive a restart");
                (
                    Arc::new(MemoryStore::new()),
                    Arc::new(MemoryAnalyticsStore::new()),
                    None,
                )
            }
        };

    tracing::info!(service = ?args.service, store = ?args.store, "Starting mercato on {}", args.bind);

    let app = match args.service {
        Service::Market => market_app(market),
        Service::Analytics => analytics_app(analytics),
        Service::Soap => soap_app(market),
    };

    let result = run_server(app, config).await;

    if let Some(store) = pg {
        store.pool().close().await;
        tracing::debug!("Database pool closed");
    }

    result.context("Server error")
}
