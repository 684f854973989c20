//! Destructive recreation of the target database.
//!
//! Runs on the admin connection against the maintenance database. Active
//! sessions on the target are evicted before the drop; if the database
//! cannot be dropped by either attempt, the whole run aborts rather than
//! seeding into a half-reset database.

use sqlx::PgConnection;
use tracing::{error, info, warn};

use crate::error::SetupError;

/// Brings the named database to a known-empty state.
///
/// Resetting a nonexistent database is equivalent to plain creation.
pub async fn reset_database(admin: &mut PgConnection, name: &str) -> Result<(), SetupError> {
    if database_exists(admin, name).await? {
        info!("Database {name} exists, evicting sessions before dropping it");
        drop_database(admin, name).await?;
    } else {
        info!("Database {name} does not exist, creating it fresh");
    }

    create_database(admin, name).await
}

async fn database_exists(admin: &mut PgConnection, name: &str) -> Result<bool, sqlx::Error> {
    let row: Option<i32> = sqlx::query_scalar("SELECT 1 FROM pg_database WHERE datname = $1")
        .bind(name)
        .fetch_optional(&mut *admin)
        .await?;
    Ok(row.is_some())
}

async fn drop_database(admin: &mut PgConnection, name: &str) -> Result<(), SetupError> {
    // Keep new sessions out while we evict the existing ones.
    if let Err(e) = sqlx::query(&format!(r#"ALTER DATABASE "{name}" WITH ALLOW_CONNECTIONS false"#))
        .execute(&mut *admin)
        .await
    {
        warn!("Could not block new connections to {name}: {e}");
    }

    terminate_sessions(admin, name).await?;

    if let Err(e) = sqlx::query(&format!(r#"DROP DATABASE "{name}""#))
        .execute(&mut *admin)
        .await
    {
        warn!("Dropping {name} failed ({e}), retrying with FORCE");
        if let Err(e) = sqlx::query(&format!(r#"DROP DATABASE IF EXISTS "{name}" WITH (FORCE)"#))
            .execute(&mut *admin)
            .await
        {
            error!("Forced drop of {name} failed: {e}");
        }
    }

    if database_exists(admin, name).await? {
        error!("Database {name} still exists after both drop attempts, aborting");
        return Err(SetupError::RecreateFailed {
            name: name.to_string(),
        });
    }

    info!("Database {name} dropped");
    Ok(())
}

/// Terminates every other session bound to the database. One failed kill
/// must not prevent the remaining sessions from being terminated.
async fn terminate_sessions(admin: &mut PgConnection, name: &str) -> Result<(), SetupError> {
    let pids: Vec<i32> = sqlx::query_scalar(
        "SELECT pid FROM pg_stat_activity WHERE datname = $1 AND pid <> pg_backend_pid()",
    )
    .bind(name)
    .fetch_all(&mut *admin)
    .await?;

    if pids.is_empty() {
        return Ok(());
    }

    info!("Terminating {} active sessions on {name}", pids.len());
    for pid in pids {
        let killed: Result<bool, sqlx::Error> = sqlx::query_scalar("SELECT pg_terminate_backend($1)")
            .bind(pid)
            .fetch_one(&mut *admin)
            .await;
        match killed {
            Ok(true) => info!("Terminated session {pid}"),
            Ok(false) => warn!("Session {pid} was already gone"),
            Err(e) => warn!("Could not terminate session {pid}: {e}"),
        }
    }

    Ok(())
}

async fn create_database(admin: &mut PgConnection, name: &str) -> Result<(), SetupError> {
    info!("Creating database {name}");

    // German locale, accent-sensitive. Case-insensitive comparisons come from
    // the nondeterministic collation the schema builder creates, since
    // Postgres does not accept one as the database default.
    sqlx::query(&format!(
        r#"CREATE DATABASE "{name}" TEMPLATE template0 ENCODING 'UTF8' LOCALE_PROVIDER icu ICU_LOCALE 'de-DE'"#
    ))
    .execute(&mut *admin)
    .await?;

    sqlx::query(&format!(r#"ALTER DATABASE "{name}" WITH ALLOW_CONNECTIONS true"#))
        .execute(&mut *admin)
        .await?;
    sqlx::query(&format!(
        r#"ALTER DATABASE "{name}" SET default_transaction_read_only = off"#
    ))
    .execute(&mut *admin)
    .await?;

    info!("Database {name} created and writable");
    Ok(())
}
