//! Database lifecycle toolkit for the GFU Krankmeldung application.
//!
//! This crate (re)creates the sick-leave tracking database from scratch and
//! fills it with referentially consistent synthetic data, including a
//! fabricated audit trail narrating how each record came to be.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use krankmeldung_dbtools::prelude::*;
//!
//! let config = DbConfig::from_env();
//! let mut admin = connect_admin(&config).await?;
//! reset_database(&mut admin, &config.database).await?;
//!
//! let mut conn = connect_target(&config).await?;
//! create_schema(&mut conn).await;
//!
//! let mut seeder = Seeder::new(conn);
//! let outcome = ScenarioBuilder::new().seed(&mut seeder, &mut rng).await?;
//! ```

pub mod builders;
pub mod config;
pub mod db;
pub mod error;
pub mod generators;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{ScenarioBuilder, ScenarioData, SeedOutcome};
    pub use crate::config::DbConfig;
    pub use crate::db::{
        SchemaReport, SeedError, Seeder, TableCounts, connect_admin, connect_target,
        create_schema, reset_database,
    };
    pub use crate::error::SetupError;
    pub use crate::generators::{
        AuditAction, AuditSynthesizer, AuditTarget, EmployeeGenerator, LeaveStatus,
        SickLeaveGenerator, UserGenerator,
    };
}
