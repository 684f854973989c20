//! Entity generators for synthetic seed data.
//!
//! This module provides generators for structurally valid, referentially
//! consistent entities:
//! - [`UserGenerator`]: the fixed application user roster
//! - [`EmployeeGenerator`]: employees partitioned across departments
//! - [`SickLeaveGenerator`]: sick-leave records in three lifecycle batches
//! - [`AuditSynthesizer`]: audit-log entries narrating each record's history

pub mod audit;
pub mod employee;
pub mod sick_leave;
pub mod user;

pub use audit::{
    AuditAction, AuditGenConfig, AuditSynthesizer, AuditTarget, GeneratedAuditEntry,
    SEED_IP_ADDRESS, SEED_USER_AGENT,
};
pub use employee::{DEPARTMENTS, Department, EmployeeGenConfig, EmployeeGenerator, GeneratedEmployee};
pub use sick_leave::{
    CANCELLATION_SUFFIX, GeneratedSickLeave, LeaveGenConfig, LeaveStatus, SickLeaveGenerator,
};
pub use user::{GeneratedUser, UserGenerator};
