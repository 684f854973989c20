//! Recreates the target database and its schema without seeding.
//!
//! Run with:
//! ```
//! cargo run --bin reset-db
//! ```

use krankmeldung_dbtools::config::DbConfig;
use krankmeldung_dbtools::db::{connect_admin, connect_target, create_schema, reset_database};
use sqlx::Connection;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = DbConfig::from_env();

    let mut admin = connect_admin(&config).await?;
    reset_database(&mut admin, &config.database).await?;
    admin.close().await?;

    let mut conn = connect_target(&config).await?;
    let report = create_schema(&mut conn).await;
    conn.close().await?;

    tracing::info!(
        "Reset complete: {} DDL units applied, {} skipped",
        report.applied.len(),
        report.failed.len()
    );

    Ok(())
}
