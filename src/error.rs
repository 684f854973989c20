use thiserror::Error;

/// Errors from database lifecycle operations (connect, recreate, DDL).
#[derive(Error, Debug)]
pub enum SetupError {
    /// Establishing a connection failed. Fatal; nothing can proceed without
    /// the administrative connection.
    #[error("Connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// Both drop attempts failed and the database still exists. Seeding into
    /// a half-reset database would corrupt the result, so the run aborts.
    #[error("Database {name} could not be dropped for recreation")]
    RecreateFailed { name: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
