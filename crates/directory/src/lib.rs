//! `directory` crate — core domain models, input sanitization, validation,
//! search and department aggregation.
//!
//! Everything here is synchronous and side-effect free.  Persistence lives in
//! the `db` crate and HTTP plumbing in `api`.

pub mod models;
pub mod error;
pub mod sanitize;
pub mod validation;
pub mod search;
pub mod stats;

pub use models::{Department, Employee, EmployeeInput, RawEmployeeInput};
pub use error::{Field, FieldIssue, ValidationError};
pub use sanitize::{sanitize, SalaryValue, SanitizedInput, TextValue};
pub use validation::{validate, validate_raw, DepartmentPolicy};
pub use search::{search, search_fields, SearchFields};
pub use stats::{
    aggregate, department_stats, filter_departments, sort_departments, DashboardStats,
    DepartmentSort, DepartmentStats, DepartmentSummary,
};
