//! Sick-leave record generation in three lifecycle batches.
//!
//! Each batch draws its employee and creating user uniformly from the
//! already-materialized rosters, so every reference resolves to a row
//! committed in an earlier checkpoint.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use time::{Date, Duration};
use uuid::Uuid;

use super::employee::GeneratedEmployee;
use super::user::GeneratedUser;

/// Lifecycle state of a sick-leave record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveStatus {
    Active,
    Completed,
    Cancelled,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Active => "active",
            LeaveStatus::Completed => "completed",
            LeaveStatus::Cancelled => "cancelled",
        }
    }
}

/// Generated sick-leave row ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedSickLeave {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub doctor_visit_date: Option<Date>,
    pub notes: String,
    pub status: LeaveStatus,
    pub created_by: Uuid,
}

/// Rationale appended to the notes of cancelled records.
pub const CANCELLATION_SUFFIX: &str = " - Storniert: Mitarbeiter erschien doch zur Arbeit";

const LEAVE_REASONS: &[&str] = &[
    "Grippe",
    "Erkältung",
    "Magen-Darm-Infektion",
    "Kopfschmerzen",
    "Rückenschmerzen",
    "COVID-19",
    "Zahnschmerzen",
    "Allergische Reaktion",
    "Migräne",
    "Verletzung durch Unfall",
    "Burnout",
    "Erschöpfung",
    "Fieber",
    "Mandeln-OP",
    "Augen-OP",
    "Knie-OP",
    "Bandscheibenvorfall",
    "Lungenentzündung",
    "Bronchitis",
    "Muskelzerrung",
    "Bänderriss",
    "Knochenbruch",
];

/// Configuration for sick-leave generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveGenConfig {
    /// Completed records to generate.
    pub completed_count: usize,
    /// Attempted active records; windows that already ended are dropped, so
    /// the batch may come up short.
    pub active_attempts: usize,
    /// Cancelled records to generate.
    pub cancelled_count: usize,
    /// Probability of a doctor-visit date on completed and active records.
    pub doctor_visit_probability: f64,
    /// Probability of a doctor-visit date on cancelled records.
    pub cancelled_doctor_visit_probability: f64,
}

impl Default for LeaveGenConfig {
    fn default() -> Self {
        Self {
            completed_count: 30,
            active_attempts: 10,
            cancelled_count: 5,
            doctor_visit_probability: 0.8,
            cancelled_doctor_visit_probability: 0.6,
        }
    }
}

/// Generates sick-leave records for the three lifecycle states.
///
/// The employee and user rosters passed to the generate methods must be
/// non-empty; every record references one entry of each.
pub struct SickLeaveGenerator {
    config: LeaveGenConfig,
}

impl SickLeaveGenerator {
    pub fn new() -> Self {
        Self {
            config: LeaveGenConfig::default(),
        }
    }

    pub fn with_config(config: LeaveGenConfig) -> Self {
        Self { config }
    }

    /// Past leave: start 14-90 days back, 1-10 days long, so the end date
    /// never lands after `today`.
    pub fn generate_completed(
        &self,
        today: Date,
        employees: &[GeneratedEmployee],
        users: &[GeneratedUser],
        rng: &mut impl Rng,
    ) -> Vec<GeneratedSickLeave> {
        (0..self.config.completed_count)
            .map(|_| {
                let start_date = today - Duration::days(rng.gen_range(14..=90));
                let end_date = start_date + Duration::days(rng.gen_range(1..=10));
                GeneratedSickLeave {
                    id: Uuid::new_v4(),
                    employee_id: pick_id(employees, rng, |e| e.id),
                    start_date,
                    end_date,
                    doctor_visit_date: self.doctor_visit(
                        start_date,
                        self.config.doctor_visit_probability,
                        rng,
                    ),
                    notes: pick_reason(rng),
                    status: LeaveStatus::Completed,
                    created_by: pick_id(users, rng, |u| u.id),
                }
            })
            .collect()
    }

    /// Currently running leave: start 0-5 days back, 3-14 days long.
    ///
    /// A drawn window that has already ended is dropped, not clamped or
    /// redrawn, so fewer than `active_attempts` records may come back.
    pub fn generate_active(
        &self,
        today: Date,
        employees: &[GeneratedEmployee],
        users: &[GeneratedUser],
        rng: &mut impl Rng,
    ) -> Vec<GeneratedSickLeave> {
        let mut records = Vec::new();

        for _ in 0..self.config.active_attempts {
            let start_date = today - Duration::days(rng.gen_range(0..=5));
            let end_date = start_date + Duration::days(rng.gen_range(3..=14));
            if end_date <= today {
                continue;
            }

            records.push(GeneratedSickLeave {
                id: Uuid::new_v4(),
                employee_id: pick_id(employees, rng, |e| e.id),
                start_date,
                end_date,
                doctor_visit_date: self.doctor_visit(
                    start_date,
                    self.config.doctor_visit_probability,
                    rng,
                ),
                notes: pick_reason(rng),
                status: LeaveStatus::Active,
                created_by: pick_id(users, rng, |u| u.id),
            });
        }

        records
    }

    /// Cancelled leave: start 5-30 days back, 2-7 days long, notes annotated
    /// with the cancellation rationale.
    pub fn generate_cancelled(
        &self,
        today: Date,
        employees: &[GeneratedEmployee],
        users: &[GeneratedUser],
        rng: &mut impl Rng,
    ) -> Vec<GeneratedSickLeave> {
        (0..self.config.cancelled_count)
            .map(|_| {
                let start_date = today - Duration::days(rng.gen_range(5..=30));
                let end_date = start_date + Duration::days(rng.gen_range(2..=7));
                GeneratedSickLeave {
                    id: Uuid::new_v4(),
                    employee_id: pick_id(employees, rng, |e| e.id),
                    start_date,
                    end_date,
                    doctor_visit_date: self.doctor_visit(
                        start_date,
                        self.config.cancelled_doctor_visit_probability,
                        rng,
                    ),
                    notes: format!("{}{CANCELLATION_SUFFIX}", pick_reason(rng)),
                    status: LeaveStatus::Cancelled,
                    created_by: pick_id(users, rng, |u| u.id),
                }
            })
            .collect()
    }

    /// A doctor visit, when present, falls on the start date.
    fn doctor_visit(&self, start_date: Date, probability: f64, rng: &mut impl Rng) -> Option<Date> {
        rng.gen_bool(probability).then_some(start_date)
    }
}

impl Default for SickLeaveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn pick_id<T>(pool: &[T], rng: &mut impl Rng, id: impl Fn(&T) -> Uuid) -> Uuid {
    pool.choose(rng).map(&id).expect("roster must not be empty")
}

fn pick_reason(rng: &mut impl Rng) -> String {
    LEAVE_REASONS
        .choose(rng)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{EmployeeGenerator, UserGenerator};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::date;

    const TODAY: Date = date!(2026 - 08 - 27);

    fn rosters(rng: &mut impl Rng) -> (Vec<GeneratedEmployee>, Vec<GeneratedUser>) {
        (
            EmployeeGenerator::new().generate_roster(rng),
            UserGenerator::generate_roster(),
        )
    }

    #[test]
    fn test_completed_always_in_the_past() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (employees, users) = rosters(&mut rng);
            let records = SickLeaveGenerator::new()
                .generate_completed(TODAY, &employees, &users, &mut rng);

            assert_eq!(records.len(), 30);
            for record in &records {
                assert!(record.end_date <= TODAY);
                assert!(record.end_date >= record.start_date);
                assert_eq!(record.status, LeaveStatus::Completed);
            }
        }
    }

    #[test]
    fn test_active_window_always_open() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (employees, users) = rosters(&mut rng);
            let records =
                SickLeaveGenerator::new().generate_active(TODAY, &employees, &users, &mut rng);

            assert!(records.len() <= 10);
            for record in &records {
                assert!(record.end_date > TODAY, "active record already ended");
                assert_eq!(record.status, LeaveStatus::Active);
            }
        }
    }

    #[test]
    fn test_cancelled_notes_carry_rationale() {
        let mut rng = StdRng::seed_from_u64(11);
        let (employees, users) = rosters(&mut rng);
        let records =
            SickLeaveGenerator::new().generate_cancelled(TODAY, &employees, &users, &mut rng);

        assert_eq!(records.len(), 5);
        for record in &records {
            assert!(record.notes.ends_with(CANCELLATION_SUFFIX));
            assert_eq!(record.status, LeaveStatus::Cancelled);
            assert!(record.end_date >= record.start_date);
        }
    }

    #[test]
    fn test_doctor_visit_falls_on_start_date() {
        let mut rng = StdRng::seed_from_u64(4);
        let (employees, users) = rosters(&mut rng);
        let generator = SickLeaveGenerator::new();

        let mut records = generator.generate_completed(TODAY, &employees, &users, &mut rng);
        records.extend(generator.generate_cancelled(TODAY, &employees, &users, &mut rng));

        for record in records.iter().filter(|r| r.doctor_visit_date.is_some()) {
            assert_eq!(record.doctor_visit_date, Some(record.start_date));
        }
    }

    #[test]
    fn test_references_resolve_to_rosters() {
        let mut rng = StdRng::seed_from_u64(23);
        let (employees, users) = rosters(&mut rng);
        let generator = SickLeaveGenerator::new();

        let mut records = generator.generate_completed(TODAY, &employees, &users, &mut rng);
        records.extend(generator.generate_active(TODAY, &employees, &users, &mut rng));
        records.extend(generator.generate_cancelled(TODAY, &employees, &users, &mut rng));

        for record in &records {
            assert!(employees.iter().any(|e| e.id == record.employee_id));
            assert!(users.iter().any(|u| u.id == record.created_by));
        }
    }

    #[test]
    fn test_deterministic_with_fixed_seed() {
        let generate = || {
            let mut rng = StdRng::seed_from_u64(42);
            let employees = EmployeeGenerator::new().generate_roster(&mut rng);
            let users = UserGenerator::generate_roster();
            SickLeaveGenerator::new().generate_completed(TODAY, &employees, &users, &mut rng)
        };

        let a = generate();
        let b = generate();
        let dates =
            |records: &[GeneratedSickLeave]| -> Vec<(Date, Date)> {
                records.iter().map(|r| (r.start_date, r.end_date)).collect()
            };
        assert_eq!(dates(&a), dates(&b));
    }
}
