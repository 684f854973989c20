//! Database integration: connections, recreation, schema, and seeding.
//!
//! The [`Seeder`] inserts generated data in checkpointed batches; the
//! recreation and schema functions bring the target database to a
//! known-empty, fully-built state first.

mod connect;
mod recreate;
mod schema;
mod seeder;

pub use connect::{connect_admin, connect_target};
pub use recreate::reset_database;
pub use schema::{DdlUnit, SchemaReport, create_schema, ddl_units};
pub use seeder::{SeedError, Seeder, TableCounts};
