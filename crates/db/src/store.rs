//! The `EmployeeStore` trait — the contract every record store must fulfil.

use async_trait::async_trait;
use directory::{Employee, EmployeeInput};
use tracing::debug;

use crate::{repository::employees as repo, DbError, DbPool};

/// Durable storage for employee records.
///
/// Ids are assigned by the store and never change.  Email uniqueness is the
/// store's job: violating it yields [`DbError::Conflict`].
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn create(&self, input: EmployeeInput) -> Result<Employee, DbError>;

    async fn get(&self, id: i64) -> Result<Employee, DbError>;

    /// Full-record replacement.
    async fn update(&self, id: i64, input: EmployeeInput) -> Result<Employee, DbError>;

    /// Hard delete.
    async fn delete(&self, id: i64) -> Result<(), DbError>;

    /// Newest first, optionally filtered by a case-insensitive substring
    /// across name, email, position and department.
    async fn list(&self, search: Option<&str>) -> Result<Vec<Employee>, DbError>;

    /// Whether the backing store is reachable.
    async fn is_healthy(&self) -> bool {
        true
    }
}

/// [`EmployeeStore`] backed by the Postgres `employees` table.
#[derive(Debug, Clone)]
pub struct PgEmployeeStore {
    pool: DbPool,
}

impl PgEmployeeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn create(&self, input: EmployeeInput) -> Result<Employee, DbError> {
        let row = repo::create_employee(&self.pool, &input).await?;
        debug!(id = row.id, "employee created");
        Ok(row.into())
    }

    async fn get(&self, id: i64) -> Result<Employee, DbError> {
        Ok(repo::get_employee(&self.pool, id).await?.into())
    }

    async fn update(&self, id: i64, input: EmployeeInput) -> Result<Employee, DbError> {
        let row = repo::update_employee(&self.pool, id, &input).await?;
        debug!(id, "employee updated");
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        repo::delete_employee(&self.pool, id).await?;
        debug!(id, "employee deleted");
        Ok(())
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<Employee>, DbError> {
        let rows = repo::list_employees(&self.pool, search).await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn is_healthy(&self) -> bool {
        self.pool.acquire().await.is_ok()
    }
}
