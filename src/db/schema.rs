//! Best-effort schema creation for the sick-leave tracking tables.
//!
//! Each DDL unit runs independently: a failure ("already exists" on a
//! re-run) is logged and recorded, and the remaining units still execute.
//! Re-running against a partially-built schema converges it without a fatal
//! abort.

use sqlx::PgConnection;
use tracing::{info, warn};

/// A single DDL statement executed independently of the others.
#[derive(Debug, Clone, Copy)]
pub struct DdlUnit {
    pub name: &'static str,
    pub sql: &'static str,
}

/// DDL units in dependency order: collation, tables, then indexes.
///
/// Foreign keys use NO ACTION on delete and update; the application layer
/// enforces cascades. The audit log's `record_id` is deliberately not a
/// foreign key since it points into different tables.
const DDL_UNITS: &[DdlUnit] = &[
    DdlUnit {
        name: "collation case_insensitive",
        sql: r#"
            CREATE COLLATION case_insensitive
            (provider = icu, locale = 'de-DE-u-ks-level2', deterministic = false)
        "#,
    },
    DdlUnit {
        name: "table users",
        sql: r#"
            CREATE TABLE users (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                email TEXT COLLATE case_insensitive NOT NULL UNIQUE,
                password TEXT NULL,
                first_name TEXT NULL,
                last_name TEXT NULL,
                is_admin BOOLEAN NOT NULL DEFAULT false,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NULL
            )
        "#,
    },
    DdlUnit {
        name: "table employees",
        sql: r#"
            CREATE TABLE employees (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                personnel_number TEXT COLLATE case_insensitive NOT NULL UNIQUE,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                position TEXT NULL,
                is_active BOOLEAN NOT NULL DEFAULT true,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NULL
            )
        "#,
    },
    DdlUnit {
        name: "table sick_leaves",
        sql: r#"
            CREATE TABLE sick_leaves (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                employee_id UUID NOT NULL,
                start_date DATE NOT NULL,
                end_date DATE NOT NULL,
                doctor_visit_date DATE NULL,
                notes TEXT NULL,
                status TEXT NOT NULL DEFAULT 'active',
                created_by UUID NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NULL,
                updated_by UUID NULL,
                FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE NO ACTION ON UPDATE NO ACTION,
                FOREIGN KEY (created_by) REFERENCES users(id) ON DELETE NO ACTION ON UPDATE NO ACTION,
                FOREIGN KEY (updated_by) REFERENCES users(id) ON DELETE NO ACTION ON UPDATE NO ACTION
            )
        "#,
    },
    DdlUnit {
        name: "table audit_log",
        sql: r#"
            CREATE TABLE audit_log (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                table_name TEXT NOT NULL,
                record_id UUID NOT NULL,
                action TEXT NOT NULL,
                old_values JSONB NULL,
                new_values JSONB NULL,
                user_id UUID NOT NULL,
                user_agent TEXT NULL,
                ip_address TEXT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE NO ACTION ON UPDATE NO ACTION
            )
        "#,
    },
    DdlUnit {
        name: "index employees(last_name)",
        sql: "CREATE INDEX ix_employees_last_name ON employees(last_name)",
    },
    DdlUnit {
        name: "index employees(is_active)",
        sql: "CREATE INDEX ix_employees_is_active ON employees(is_active)",
    },
    DdlUnit {
        name: "index sick_leaves(employee_id)",
        sql: "CREATE INDEX ix_sick_leaves_employee_id ON sick_leaves(employee_id)",
    },
    DdlUnit {
        name: "index sick_leaves(status)",
        sql: "CREATE INDEX ix_sick_leaves_status ON sick_leaves(status)",
    },
    DdlUnit {
        name: "index sick_leaves(start_date)",
        sql: "CREATE INDEX ix_sick_leaves_start_date ON sick_leaves(start_date)",
    },
    DdlUnit {
        name: "index sick_leaves(end_date)",
        sql: "CREATE INDEX ix_sick_leaves_end_date ON sick_leaves(end_date)",
    },
    DdlUnit {
        name: "index audit_log(table_name)",
        sql: "CREATE INDEX ix_audit_log_table_name ON audit_log(table_name)",
    },
    DdlUnit {
        name: "index audit_log(record_id)",
        sql: "CREATE INDEX ix_audit_log_record_id ON audit_log(record_id)",
    },
    DdlUnit {
        name: "index audit_log(user_id)",
        sql: "CREATE INDEX ix_audit_log_user_id ON audit_log(user_id)",
    },
];

/// The DDL units in execution order.
pub fn ddl_units() -> &'static [DdlUnit] {
    DDL_UNITS
}

/// Outcome of a schema creation pass.
#[derive(Debug)]
pub struct SchemaReport {
    pub applied: Vec<&'static str>,
    pub failed: Vec<(&'static str, sqlx::Error)>,
}

impl SchemaReport {
    /// True when every unit applied cleanly (a fresh database).
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Creates tables and indexes, tolerating individual statement failures.
pub async fn create_schema(conn: &mut PgConnection) -> SchemaReport {
    let mut report = SchemaReport {
        applied: Vec::new(),
        failed: Vec::new(),
    };

    for unit in DDL_UNITS {
        match sqlx::query(unit.sql).execute(&mut *conn).await {
            Ok(_) => {
                info!("Applied {}", unit.name);
                report.applied.push(unit.name);
            }
            Err(e) => {
                warn!("Skipped {}: {e}", unit.name);
                report.failed.push((unit.name, e));
            }
        }
    }

    info!(
        "Schema pass finished: {} applied, {} skipped",
        report.applied.len(),
        report.failed.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_names_unique() {
        let units = ddl_units();
        let names: std::collections::HashSet<_> = units.iter().map(|u| u.name).collect();
        assert_eq!(names.len(), units.len());
    }

    #[test]
    fn test_all_tables_and_indexes_present() {
        let tables = ddl_units()
            .iter()
            .filter(|u| u.sql.contains("CREATE TABLE"))
            .count();
        let indexes = ddl_units()
            .iter()
            .filter(|u| u.sql.contains("CREATE INDEX"))
            .count();
        assert_eq!(tables, 4);
        assert_eq!(indexes, 9);
    }

    #[test]
    fn test_dependency_order() {
        let units = ddl_units();
        let position = |name: &str| {
            units
                .iter()
                .position(|u| u.name == name)
                .unwrap_or_else(|| panic!("missing unit {name}"))
        };

        // Referenced tables come before their dependents, tables before indexes.
        assert!(position("table users") < position("table sick_leaves"));
        assert!(position("table employees") < position("table sick_leaves"));
        assert!(position("table users") < position("table audit_log"));

        let first_index = units
            .iter()
            .position(|u| u.sql.contains("CREATE INDEX"))
            .unwrap();
        let last_table = units
            .iter()
            .rposition(|u| u.sql.contains("CREATE TABLE"))
            .unwrap();
        assert!(last_table < first_index);
    }

    #[test]
    fn test_audit_record_id_is_soft_reference() {
        let audit = ddl_units()
            .iter()
            .find(|u| u.name == "table audit_log")
            .unwrap();
        // record_id points into varying tables; only user_id is a real FK.
        assert_eq!(audit.sql.matches("FOREIGN KEY").count(), 1);
        assert!(audit.sql.contains("FOREIGN KEY (user_id)"));
    }
}
