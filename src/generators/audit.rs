//! Fabricated audit-log entries narrating each record's lifecycle.
//!
//! The audit log is the mutation history of the other tables, so the
//! synthesizer has to emit entries a reader would believe: an `INSERT`
//! snapshot of creation-time state for every record, a completion `UPDATE`
//! for most completed records, and a cancellation `UPDATE` performed by a
//! second party for every cancelled record.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use super::sick_leave::{CANCELLATION_SUFFIX, GeneratedSickLeave, LeaveStatus};
use super::user::GeneratedUser;

/// Placeholder client metadata carried by every synthetic entry.
pub const SEED_USER_AGENT: &str = "Seed Script";
pub const SEED_IP_ADDRESS: &str = "127.0.0.1";

/// Soft reference into one of the audited tables.
///
/// `record_id` is not a real foreign key because the target table varies,
/// so the pair is modeled as a tagged union instead of a single FK column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditTarget {
    User(Uuid),
    Employee(Uuid),
    SickLeave(Uuid),
}

impl AuditTarget {
    pub fn table_name(&self) -> &'static str {
        match self {
            AuditTarget::User(_) => "users",
            AuditTarget::Employee(_) => "employees",
            AuditTarget::SickLeave(_) => "sick_leaves",
        }
    }

    pub fn record_id(&self) -> Uuid {
        match self {
            AuditTarget::User(id) | AuditTarget::Employee(id) | AuditTarget::SickLeave(id) => *id,
        }
    }
}

/// Recorded mutation kind. Entries are append-only; there is no DELETE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Insert,
    Update,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Insert => "INSERT",
            AuditAction::Update => "UPDATE",
        }
    }
}

/// Generated audit-log row ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedAuditEntry {
    pub id: Uuid,
    pub target: AuditTarget,
    pub action: AuditAction,
    pub old_values: Option<Value>,
    pub new_values: Option<Value>,
    pub user_id: Uuid,
    pub user_agent: String,
    pub ip_address: String,
}

/// Configuration for audit synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditGenConfig {
    /// Probability that a completed record also gets a completion UPDATE.
    pub completion_update_probability: f64,
}

impl Default for AuditGenConfig {
    fn default() -> Self {
        Self {
            completion_update_probability: 0.7,
        }
    }
}

/// Fabricates the audit narrative for generated sick-leave records.
pub struct AuditSynthesizer {
    config: AuditGenConfig,
}

impl AuditSynthesizer {
    pub fn new() -> Self {
        Self {
            config: AuditGenConfig::default(),
        }
    }

    pub fn with_config(config: AuditGenConfig) -> Self {
        Self { config }
    }

    /// Emits the audit entries for one record: exactly one INSERT, plus the
    /// state-transition UPDATE its lifecycle calls for.
    pub fn narrate(
        &self,
        record: &GeneratedSickLeave,
        users: &[GeneratedUser],
        rng: &mut impl Rng,
    ) -> Vec<GeneratedAuditEntry> {
        let mut entries = vec![self.insert_entry(record)];

        match record.status {
            LeaveStatus::Completed => {
                if rng.gen_bool(self.config.completion_update_probability) {
                    entries.push(self.completion_update(record));
                }
            }
            LeaveStatus::Cancelled => {
                entries.push(self.cancellation_update(record, users, rng));
            }
            LeaveStatus::Active => {}
        }

        entries
    }

    /// INSERT entry mirroring the record's creation-time state. For
    /// cancelled records that state predates the cancellation: status was
    /// still `active` and the notes had no rationale suffix yet.
    fn insert_entry(&self, record: &GeneratedSickLeave) -> GeneratedAuditEntry {
        let (status, notes) = match record.status {
            LeaveStatus::Cancelled => ("active", original_notes(record)),
            status => (status.as_str(), record.notes.as_str()),
        };

        self.entry(
            record,
            AuditAction::Insert,
            None,
            Some(json!({
                "employee_id": record.employee_id,
                "start_date": record.start_date.to_string(),
                "end_date": record.end_date.to_string(),
                "status": status,
                "notes": notes,
            })),
            record.created_by,
        )
    }

    /// UPDATE from `active` to `completed`, by the same user who created
    /// the record.
    fn completion_update(&self, record: &GeneratedSickLeave) -> GeneratedAuditEntry {
        self.entry(
            record,
            AuditAction::Update,
            Some(json!({ "status": "active" })),
            Some(json!({ "status": "completed" })),
            record.created_by,
        )
    }

    /// Cancellation UPDATE attributed to a different user than the creator,
    /// modeling a second party performing the cancellation. When the roster
    /// holds no second user, the creator is the only possible actor.
    fn cancellation_update(
        &self,
        record: &GeneratedSickLeave,
        users: &[GeneratedUser],
        rng: &mut impl Rng,
    ) -> GeneratedAuditEntry {
        let others: Vec<Uuid> = users
            .iter()
            .map(|u| u.id)
            .filter(|id| *id != record.created_by)
            .collect();
        let actor = others.choose(rng).copied().unwrap_or(record.created_by);

        self.entry(
            record,
            AuditAction::Update,
            Some(json!({ "status": "active", "notes": original_notes(record) })),
            Some(json!({ "status": "cancelled", "notes": record.notes })),
            actor,
        )
    }

    fn entry(
        &self,
        record: &GeneratedSickLeave,
        action: AuditAction,
        old_values: Option<Value>,
        new_values: Option<Value>,
        user_id: Uuid,
    ) -> GeneratedAuditEntry {
        GeneratedAuditEntry {
            id: Uuid::new_v4(),
            target: AuditTarget::SickLeave(record.id),
            action,
            old_values,
            new_values,
            user_id,
            user_agent: SEED_USER_AGENT.to_string(),
            ip_address: SEED_IP_ADDRESS.to_string(),
        }
    }
}

impl Default for AuditSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Notes as they read before the cancellation rationale was appended.
fn original_notes(record: &GeneratedSickLeave) -> &str {
    record
        .notes
        .strip_suffix(CANCELLATION_SUFFIX)
        .unwrap_or(&record.notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{EmployeeGenerator, SickLeaveGenerator, UserGenerator};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::Date;
    use time::macros::date;

    const TODAY: Date = date!(2026 - 08 - 27);

    fn narrate_batch(
        status: LeaveStatus,
        seed: u64,
    ) -> (Vec<GeneratedSickLeave>, Vec<Vec<GeneratedAuditEntry>>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let employees = EmployeeGenerator::new().generate_roster(&mut rng);
        let users = UserGenerator::generate_roster();
        let generator = SickLeaveGenerator::new();

        let records = match status {
            LeaveStatus::Completed => {
                generator.generate_completed(TODAY, &employees, &users, &mut rng)
            }
            LeaveStatus::Active => generator.generate_active(TODAY, &employees, &users, &mut rng),
            LeaveStatus::Cancelled => {
                generator.generate_cancelled(TODAY, &employees, &users, &mut rng)
            }
        };

        let synthesizer = AuditSynthesizer::new();
        let narratives = records
            .iter()
            .map(|r| synthesizer.narrate(r, &users, &mut rng))
            .collect();
        (records, narratives)
    }

    #[test]
    fn test_every_record_gets_exactly_one_insert() {
        for status in [
            LeaveStatus::Completed,
            LeaveStatus::Active,
            LeaveStatus::Cancelled,
        ] {
            let (records, narratives) = narrate_batch(status, 5);
            for (record, entries) in records.iter().zip(&narratives) {
                let inserts: Vec<_> = entries
                    .iter()
                    .filter(|e| e.action == AuditAction::Insert)
                    .collect();
                assert_eq!(inserts.len(), 1);
                assert_eq!(inserts[0].target, AuditTarget::SickLeave(record.id));
                assert_eq!(inserts[0].user_id, record.created_by);
                assert!(inserts[0].old_values.is_none());
            }
        }
    }

    #[test]
    fn test_active_records_get_no_update() {
        let (_, narratives) = narrate_batch(LeaveStatus::Active, 8);
        for entries in &narratives {
            assert_eq!(entries.len(), 1);
        }
    }

    #[test]
    fn test_completed_update_transitions_status() {
        let (_, narratives) = narrate_batch(LeaveStatus::Completed, 13);
        let updates: Vec<_> = narratives
            .iter()
            .flatten()
            .filter(|e| e.action == AuditAction::Update)
            .collect();

        // p=0.7 over 30 records; a fixed seed keeps this stable.
        assert!(!updates.is_empty());
        for update in updates {
            assert_eq!(update.old_values, Some(json!({ "status": "active" })));
            assert_eq!(update.new_values, Some(json!({ "status": "completed" })));
        }
    }

    #[test]
    fn test_completed_update_attributed_to_creator() {
        let (records, narratives) = narrate_batch(LeaveStatus::Completed, 21);
        for (record, entries) in records.iter().zip(&narratives) {
            for entry in entries {
                assert_eq!(entry.user_id, record.created_by);
            }
        }
    }

    #[test]
    fn test_cancelled_records_get_two_entries_with_distinct_actors() {
        for seed in 0..20 {
            let (records, narratives) = narrate_batch(LeaveStatus::Cancelled, seed);
            for (record, entries) in records.iter().zip(&narratives) {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].action, AuditAction::Insert);
                assert_eq!(entries[1].action, AuditAction::Update);
                assert_eq!(entries[0].user_id, record.created_by);
                assert_ne!(
                    entries[1].user_id, entries[0].user_id,
                    "cancellation must be performed by a second party"
                );
            }
        }
    }

    #[test]
    fn test_cancellation_by_sole_user_falls_back_to_creator() {
        let mut rng = StdRng::seed_from_u64(31);
        let users = vec![UserGenerator::generate_roster().swap_remove(0)];
        let record = GeneratedSickLeave {
            id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            start_date: date!(2026 - 08 - 10),
            end_date: date!(2026 - 08 - 14),
            doctor_visit_date: None,
            notes: format!("Grippe{CANCELLATION_SUFFIX}"),
            status: LeaveStatus::Cancelled,
            created_by: users[0].id,
        };

        let entries = AuditSynthesizer::new().narrate(&record, &users, &mut rng);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].action, AuditAction::Update);
        assert_eq!(entries[1].user_id, record.created_by);
    }

    #[test]
    fn test_insert_snapshot_dates_are_iso_formatted() {
        let (records, narratives) = narrate_batch(LeaveStatus::Completed, 9);
        for (record, entries) in records.iter().zip(&narratives) {
            let snapshot = entries[0].new_values.as_ref().unwrap();
            assert_eq!(snapshot["start_date"], record.start_date.to_string());
            assert_eq!(snapshot["end_date"], record.end_date.to_string());

            let rendered = snapshot["start_date"].as_str().unwrap();
            assert_eq!(rendered.len(), 10);
            assert_eq!(&rendered[4..5], "-");
            assert_eq!(&rendered[7..8], "-");
        }
    }

    #[test]
    fn test_cancelled_insert_snapshot_shows_pre_cancellation_state() {
        let (records, narratives) = narrate_batch(LeaveStatus::Cancelled, 17);
        for (record, entries) in records.iter().zip(&narratives) {
            let snapshot = entries[0].new_values.as_ref().unwrap();
            assert_eq!(snapshot["status"], "active");
            let notes = snapshot["notes"].as_str().unwrap();
            assert!(!notes.contains("Storniert"));
            assert!(record.notes.starts_with(notes));

            let update_new = entries[1].new_values.as_ref().unwrap();
            assert_eq!(update_new["status"], "cancelled");
            assert_eq!(update_new["notes"], record.notes.as_str());
        }
    }

    #[test]
    fn test_entries_carry_placeholder_client_metadata() {
        let (_, narratives) = narrate_batch(LeaveStatus::Cancelled, 2);
        for entry in narratives.iter().flatten() {
            assert_eq!(entry.user_agent, SEED_USER_AGENT);
            assert_eq!(entry.ip_address, SEED_IP_ADDRESS);
        }
    }
}
