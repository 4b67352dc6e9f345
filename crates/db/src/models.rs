//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models — they carry no domain behaviour.
//! Domain types live in the `directory` crate.

use chrono::{DateTime, Utc};
use directory::Employee;
use sqlx::FromRow;

/// Column list shared by every query that returns an [`EmployeeRow`].
pub(crate) const EMPLOYEE_COLUMNS: &str =
    "id, name, email, position, department, salary, created_at, updated_at";

/// A persisted employee row.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            position: row.position,
            department: row.department,
            salary: row.salary,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
