//! Checkpointed insertion of generated seed data.
//!
//! Every `seed_*` method runs inside its own transaction and commits before
//! returning. A failure rolls back only the in-progress batch (the
//! transaction rolls back when dropped); batches committed earlier stay
//! durable.

use sqlx::{Connection, PgConnection};
use thiserror::Error;
use tracing::{error, info};

use crate::generators::{
    GeneratedAuditEntry, GeneratedEmployee, GeneratedSickLeave, GeneratedUser,
};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Row counts per table after a seeding run.
#[derive(Debug, Clone, Copy)]
pub struct TableCounts {
    pub users: i64,
    pub employees: i64,
    pub sick_leaves: i64,
    pub audit_entries: i64,
}

/// Inserts generated data over the exclusively-owned target connection.
pub struct Seeder {
    conn: PgConnection,
}

impl Seeder {
    pub fn new(conn: PgConnection) -> Self {
        Self { conn }
    }

    /// Inserts the user roster and commits.
    pub async fn seed_users(&mut self, users: &[GeneratedUser]) -> Result<(), SeedError> {
        info!("Seeding {} users...", users.len());

        self.insert_users(users).await.inspect_err(|e| {
            error!("Seeding users failed, batch rolled back: {e}");
        })?;

        info!("Seeded {} users", users.len());
        Ok(())
    }

    async fn insert_users(&mut self, users: &[GeneratedUser]) -> Result<(), SeedError> {
        let mut tx = self.conn.begin().await?;
        for user in users {
            sqlx::query(
                r#"
                INSERT INTO users (id, email, password, first_name, last_name, is_admin)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.is_admin)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Inserts the employee roster and commits.
    pub async fn seed_employees(
        &mut self,
        employees: &[GeneratedEmployee],
    ) -> Result<(), SeedError> {
        info!("Seeding {} employees...", employees.len());

        self.insert_employees(employees).await.inspect_err(|e| {
            error!("Seeding employees failed, batch rolled back: {e}");
        })?;

        info!("Seeded {} employees", employees.len());
        Ok(())
    }

    async fn insert_employees(
        &mut self,
        employees: &[GeneratedEmployee],
    ) -> Result<(), SeedError> {
        let mut tx = self.conn.begin().await?;
        for employee in employees {
            sqlx::query(
                r#"
                INSERT INTO employees (id, personnel_number, first_name, last_name, position)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(employee.id)
            .bind(&employee.personnel_number)
            .bind(&employee.first_name)
            .bind(&employee.last_name)
            .bind(&employee.position)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Inserts one sick-leave batch together with its audit narrative,
    /// all-or-nothing, and commits.
    pub async fn seed_leave_batch(
        &mut self,
        label: &str,
        records: &[GeneratedSickLeave],
        audits: &[GeneratedAuditEntry],
    ) -> Result<(), SeedError> {
        info!(
            "Seeding {label} batch: {} records, {} audit entries...",
            records.len(),
            audits.len()
        );

        let result = self.insert_leave_batch(records, audits).await;
        if let Err(e) = &result {
            error!("Seeding {label} batch failed, batch rolled back: {e}");
        } else {
            info!("Seeded {label} batch");
        }
        result
    }

    async fn insert_leave_batch(
        &mut self,
        records: &[GeneratedSickLeave],
        audits: &[GeneratedAuditEntry],
    ) -> Result<(), SeedError> {
        let mut tx = self.conn.begin().await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO sick_leaves
                    (id, employee_id, start_date, end_date, doctor_visit_date, notes, status, created_by)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(record.id)
            .bind(record.employee_id)
            .bind(record.start_date)
            .bind(record.end_date)
            .bind(record.doctor_visit_date)
            .bind(&record.notes)
            .bind(record.status.as_str())
            .bind(record.created_by)
            .execute(&mut *tx)
            .await?;
        }

        for entry in audits {
            sqlx::query(
                r#"
                INSERT INTO audit_log
                    (id, table_name, record_id, action, old_values, new_values, user_id, user_agent, ip_address)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(entry.id)
            .bind(entry.target.table_name())
            .bind(entry.target.record_id())
            .bind(entry.action.as_str())
            .bind(&entry.old_values)
            .bind(&entry.new_values)
            .bind(entry.user_id)
            .bind(&entry.user_agent)
            .bind(&entry.ip_address)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Queries `count(*)` per table for the final summary.
    pub async fn counts(&mut self) -> Result<TableCounts, SeedError> {
        Ok(TableCounts {
            users: self.count("users").await?,
            employees: self.count("employees").await?,
            sick_leaves: self.count("sick_leaves").await?,
            audit_entries: self.count("audit_log").await?,
        })
    }

    async fn count(&mut self, table: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&mut self.conn)
            .await
    }
}
