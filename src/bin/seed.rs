//! Full database lifecycle: reset, schema, seed, summary.
//!
//! Run with:
//! ```
//! cargo run --bin seed
//! ```
//!
//! Connection settings come from `PGHOST`/`PGPORT`/`PGUSER`/`PGPASSWORD`/
//! `KRANKMELDUNG_DB`; `SEED` overrides the RNG seed for a different dataset.

use krankmeldung_dbtools::builders::ScenarioBuilder;
use krankmeldung_dbtools::config::DbConfig;
use krankmeldung_dbtools::db::{
    Seeder, connect_admin, connect_target, create_schema, reset_database,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
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
    if !report.is_clean() {
        tracing::warn!(
            "{} DDL units were skipped; continuing against the existing schema",
            report.failed.len()
        );
    }

    let seed = std::env::var("SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(12345);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut seeder = Seeder::new(conn);
    let outcome = ScenarioBuilder::new().seed(&mut seeder, &mut rng).await?;

    tracing::info!("Seed completed!");
    tracing::info!("  Users: {}", outcome.counts.users);
    tracing::info!("  Employees: {}", outcome.counts.employees);
    tracing::info!("  Sick leaves: {}", outcome.counts.sick_leaves);
    tracing::info!("  Audit entries: {}", outcome.counts.audit_entries);

    Ok(())
}
