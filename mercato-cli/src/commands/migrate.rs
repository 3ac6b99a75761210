//! Schema migration command

use anyhow::Result;
use clap::Parser;

use super::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let store = args.db.open_store().await?;
    tracing::info!("Database schema is up to date");
    store.pool().close().await;
    Ok(())
}
