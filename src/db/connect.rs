//! The single network I/O boundary: opening administrative connections.
//!
//! Every other component borrows one of these connections and never opens
//! its own. Two modes exist because `CREATE DATABASE` and `DROP DATABASE`
//! cannot run inside a transaction: the admin connection targets the
//! maintenance database and runs implicitly committed statements, while the
//! target connection is where seeding opens explicit transactions.

use sqlx::{Connection, PgConnection};
use tracing::{error, info};

use crate::config::{DbConfig, MAINTENANCE_DB};
use crate::error::SetupError;

/// Opens a connection to the maintenance database for DDL that must run
/// outside a transaction.
pub async fn connect_admin(config: &DbConfig) -> Result<PgConnection, SetupError> {
    info!(
        "Connecting to {} on {}:{}...",
        MAINTENANCE_DB, config.host, config.port
    );
    open(&config.admin_url()).await
}

/// Opens a connection to the target database for schema creation and seeding.
pub async fn connect_target(config: &DbConfig) -> Result<PgConnection, SetupError> {
    info!(
        "Connecting to {} on {}:{}...",
        config.database, config.host, config.port
    );
    open(&config.target_url()).await
}

async fn open(url: &str) -> Result<PgConnection, SetupError> {
    match PgConnection::connect(url).await {
        Ok(conn) => {
            info!("Connection established");
            Ok(conn)
        }
        Err(e) => {
            error!("Connection failed: {e}");
            Err(SetupError::Connection(e))
        }
    }
}
