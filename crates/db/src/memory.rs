//! In-process [`EmployeeStore`], used by tests and `serve --in-memory`.
//!
//! All writes go through a single `RwLock`, so the email uniqueness check
//! and the insert are atomic with respect to each other.

use async_trait::async_trait;
use chrono::Utc;
use directory::{search, Employee, EmployeeInput};
use tokio::sync::RwLock;

use crate::{DbError, EmployeeStore};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: Vec<Employee>,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.rows
            .iter()
            .any(|e| e.email == email && Some(e.id) != except)
    }
}

#[derive(Debug, Default)]
pub struct MemoryEmployeeStore {
    table: RwLock<Table>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn create(&self, input: EmployeeInput) -> Result<Employee, DbError> {
        let mut table = self.table.write().await;
        if table.email_taken(&input.email, None) {
            return Err(DbError::Conflict);
        }
        table.last_id += 1;
        let employee = Employee::from_input(table.last_id, input, Utc::now());
        table.rows.push(employee.clone());
        Ok(employee)
    }

    async fn get(&self, id: i64) -> Result<Employee, DbError> {
        let table = self.table.read().await;
        table
            .rows
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(DbError::NotFound)
    }

    async fn update(&self, id: i64, input: EmployeeInput) -> Result<Employee, DbError> {
        let mut table = self.table.write().await;
        let index = table
            .rows
            .iter()
            .position(|e| e.id == id)
            .ok_or(DbError::NotFound)?;
        if table.email_taken(&input.email, Some(id)) {
            return Err(DbError::Conflict);
        }
        let employee = &mut table.rows[index];
        employee.replace(input, Utc::now());
        Ok(employee.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|e| e.id != id);
        if table.rows.len() == before {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    async fn list(&self, term: Option<&str>) -> Result<Vec<Employee>, DbError> {
        let table = self.table.read().await;
        let mut rows: Vec<Employee> = search(&table.rows, term.unwrap_or_default())
            .into_iter()
            .cloned()
            .collect();
        // Ids are handed out in insertion order, so they order by creation.
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn input(name: &str, email: &str, department: &str) -> EmployeeInput {
        EmployeeInput {
            name: name.into(),
            email: email.into(),
            position: "Engineer".into(),
            department: department.into(),
            salary: 1000.0,
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = MemoryEmployeeStore::new();
        let a = store.create(input("A", "a@example.com", "design")).await.unwrap();
        let b = store.create(input("B", "b@example.com", "design")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(a.created_at, a.updated_at);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryEmployeeStore::new();
        store.create(input("A", "a@example.com", "design")).await.unwrap();
        let err = store.create(input("B", "a@example.com", "sales")).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_with_one_email_admit_exactly_one() {
        let store = Arc::new(MemoryEmployeeStore::new());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .create(input(&format!("Worker {i}"), "same@example.com", "sales"))
                        .await
                })
            })
            .collect();

        let (mut ok, mut conflict) = (0, 0);
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(DbError::Conflict) => conflict += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!((ok, conflict), (1, 15));
        assert_eq!(store.list(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_order_follows_ids_not_timestamps() {
        let store = MemoryEmployeeStore::new();
        store.create(input("A", "a@example.com", "sales")).await.unwrap();
        store.create(input("B", "b@example.com", "sales")).await.unwrap();

        // Make the older row look newer, as after a clock step.
        {
            let mut table = store.table.write().await;
            table.rows[0].created_at = Utc::now() + chrono::Duration::hours(1);
        }

        let ids: Vec<i64> = store.list(None).await.unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_searchable() {
        let store = MemoryEmployeeStore::new();
        store.create(input("Ada", "ada@example.com", "engineering")).await.unwrap();
        store.create(input("Bob", "bob@example.com", "sales")).await.unwrap();
        store.create(input("Cy", "cy@example.com", "engineering")).await.unwrap();

        let all: Vec<i64> = store.list(None).await.unwrap().iter().map(|e| e.id).collect();
        assert_eq!(all, vec![3, 2, 1]);

        let found: Vec<i64> = store
            .list(Some("ENGINEERING"))
            .await
            .unwrap()
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(found, vec![3, 1]);

        assert_eq!(store.list(Some("")).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_identity() {
        let store = MemoryEmployeeStore::new();
        let created = store.create(input("Ada", "ada@example.com", "design")).await.unwrap();

        let updated = store
            .update(created.id, input("Ada L.", "ada@example.com", "product"))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "Ada L.");
        assert_eq!(updated.department, "product");
        assert_eq!(store.get(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_checks_existence_and_uniqueness() {
        let store = MemoryEmployeeStore::new();
        store.create(input("A", "a@example.com", "design")).await.unwrap();
        let b = store.create(input("B", "b@example.com", "design")).await.unwrap();

        let err = store.update(99, input("X", "x@example.com", "design")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound));

        let err = store.update(b.id, input("B", "a@example.com", "design")).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict));
    }

    #[tokio::test]
    async fn delete_is_hard_and_reports_missing_rows() {
        let store = MemoryEmployeeStore::new();
        let a = store.create(input("A", "a@example.com", "design")).await.unwrap();

        store.delete(a.id).await.unwrap();
        assert!(matches!(store.get(a.id).await, Err(DbError::NotFound)));
        assert!(matches!(store.delete(a.id).await, Err(DbError::NotFound)));

        // The freed email can be reused.
        assert!(store.create(input("A2", "a@example.com", "design")).await.is_ok());
    }
}
