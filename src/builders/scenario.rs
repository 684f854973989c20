//! The seeding orchestrator: generation plus checkpointed insertion.
//!
//! Entities are generated and inserted in dependency order. Each batch
//! commits before the next begins, so a fault in a later batch never rolls
//! back earlier ones, while the faulty batch itself is undone in full.

use rand::Rng;
use time::{Date, OffsetDateTime};

use crate::db::{SeedError, Seeder, TableCounts};
use crate::generators::{
    AuditGenConfig, AuditSynthesizer, EmployeeGenConfig, EmployeeGenerator, GeneratedAuditEntry,
    GeneratedEmployee, GeneratedSickLeave, GeneratedUser, LeaveGenConfig, SickLeaveGenerator,
    UserGenerator,
};

/// Everything generated for one seeding run, grouped by checkpoint batch.
#[derive(Debug)]
pub struct ScenarioData {
    pub users: Vec<GeneratedUser>,
    pub employees: Vec<GeneratedEmployee>,
    pub completed: Vec<GeneratedSickLeave>,
    pub active: Vec<GeneratedSickLeave>,
    pub cancelled: Vec<GeneratedSickLeave>,
    pub completed_audits: Vec<GeneratedAuditEntry>,
    pub active_audits: Vec<GeneratedAuditEntry>,
    pub cancelled_audits: Vec<GeneratedAuditEntry>,
}

impl ScenarioData {
    /// All sick-leave records across the three batches.
    pub fn records(&self) -> impl Iterator<Item = &GeneratedSickLeave> {
        self.completed
            .iter()
            .chain(self.active.iter())
            .chain(self.cancelled.iter())
    }

    /// All audit entries across the three batches.
    pub fn audit_entries(&self) -> impl Iterator<Item = &GeneratedAuditEntry> {
        self.completed_audits
            .iter()
            .chain(self.active_audits.iter())
            .chain(self.cancelled_audits.iter())
    }
}

/// Result of building and seeding a scenario.
#[derive(Debug)]
pub struct SeedOutcome {
    pub data: ScenarioData,
    pub counts: TableCounts,
}

/// Builder for a complete seeding scenario.
///
/// # Example
///
/// ```rust,ignore
/// let outcome = ScenarioBuilder::new()
///     .with_leave_config(LeaveGenConfig { completed_count: 100, ..Default::default() })
///     .seed(&mut seeder, &mut rng)
///     .await?;
/// ```
pub struct ScenarioBuilder {
    employee_config: EmployeeGenConfig,
    leave_config: LeaveGenConfig,
    audit_config: AuditGenConfig,
    today: Option<Date>,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self {
            employee_config: EmployeeGenConfig::default(),
            leave_config: LeaveGenConfig::default(),
            audit_config: AuditGenConfig::default(),
            today: None,
        }
    }

    pub fn with_employee_config(mut self, config: EmployeeGenConfig) -> Self {
        self.employee_config = config;
        self
    }

    pub fn with_leave_config(mut self, config: LeaveGenConfig) -> Self {
        self.leave_config = config;
        self
    }

    pub fn with_audit_config(mut self, config: AuditGenConfig) -> Self {
        self.audit_config = config;
        self
    }

    /// Pins "now" for date generation; defaults to the current UTC date.
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    /// Generates all data without touching the database.
    pub fn build_data(&self, rng: &mut impl Rng) -> ScenarioData {
        let today = self
            .today
            .unwrap_or_else(|| OffsetDateTime::now_utc().date());

        let users = UserGenerator::generate_roster();
        let employees =
            EmployeeGenerator::with_config(self.employee_config.clone()).generate_roster(rng);

        let leave_gen = SickLeaveGenerator::with_config(self.leave_config.clone());
        let synthesizer = AuditSynthesizer::with_config(self.audit_config.clone());

        let completed = leave_gen.generate_completed(today, &employees, &users, rng);
        let completed_audits = narrate_all(&synthesizer, &completed, &users, rng);

        let active = leave_gen.generate_active(today, &employees, &users, rng);
        let active_audits = narrate_all(&synthesizer, &active, &users, rng);

        let cancelled = leave_gen.generate_cancelled(today, &employees, &users, rng);
        let cancelled_audits = narrate_all(&synthesizer, &cancelled, &users, rng);

        ScenarioData {
            users,
            employees,
            completed,
            active,
            cancelled,
            completed_audits,
            active_audits,
            cancelled_audits,
        }
    }

    /// Generates and seeds the scenario with a commit checkpoint after each
    /// batch: users, employees, then the three leave batches with their
    /// audit entries. Returns the data and the final per-table counts.
    pub async fn seed(
        &self,
        seeder: &mut Seeder,
        rng: &mut impl Rng,
    ) -> Result<SeedOutcome, SeedError> {
        let data = self.build_data(rng);

        seeder.seed_users(&data.users).await?;
        seeder.seed_employees(&data.employees).await?;
        seeder
            .seed_leave_batch("completed", &data.completed, &data.completed_audits)
            .await?;
        seeder
            .seed_leave_batch("active", &data.active, &data.active_audits)
            .await?;
        seeder
            .seed_leave_batch("cancelled", &data.cancelled, &data.cancelled_audits)
            .await?;

        let counts = seeder.counts().await?;
        Ok(SeedOutcome { data, counts })
    }
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn narrate_all(
    synthesizer: &AuditSynthesizer,
    records: &[GeneratedSickLeave],
    users: &[GeneratedUser],
    rng: &mut impl Rng,
) -> Vec<GeneratedAuditEntry> {
    records
        .iter()
        .flat_map(|record| synthesizer.narrate(record, users, rng))
        .collect()
}
