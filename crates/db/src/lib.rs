//! `db` crate — the employee record store.
//!
//! Provides a connection pool, the `employees` row struct, repository
//! functions over Postgres, and the [`EmployeeStore`] trait the API layer is
//! written against.  Input is assumed valid; no business rules live here.

pub mod error;
pub mod pool;
pub mod repository;
pub mod models;
pub mod store;
pub mod memory;

pub use pool::{DbPool, PoolSettings};
pub use error::DbError;
pub use store::{EmployeeStore, PgEmployeeStore};
pub use memory::MemoryEmployeeStore;
