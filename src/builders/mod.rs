//! Orchestration of complete seeding runs.

mod scenario;

pub use scenario::{ScenarioBuilder, ScenarioData, SeedOutcome};
