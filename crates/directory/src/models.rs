//! Core domain models for the employee directory.
//!
//! `RawEmployeeInput` is what arrives over the wire, untyped.  `EmployeeInput`
//! is what survives validation and is handed to the store.  `Employee` is a
//! stored record with its generated id and timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Department
// ---------------------------------------------------------------------------

/// The department catalogue offered by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Department {
    Engineering,
    Design,
    Product,
    Marketing,
    Sales,
    HumanResources,
}

impl Department {
    /// Every catalogue entry, in display order.
    pub const ALL: [Department; 6] = [
        Self::Engineering,
        Self::Design,
        Self::Product,
        Self::Marketing,
        Self::Sales,
        Self::HumanResources,
    ];

    /// The value stored in the `department` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engineering    => "engineering",
            Self::Design         => "design",
            Self::Product        => "product",
            Self::Marketing      => "marketing",
            Self::Sales          => "sales",
            Self::HumanResources => "human-resources",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Engineering    => "Engineering",
            Self::Design         => "Design",
            Self::Product        => "Product",
            Self::Marketing      => "Marketing",
            Self::Sales          => "Sales",
            Self::HumanResources => "Human Resources",
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Department {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown department: {s}"))
    }
}

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Untyped request body for create and update.
///
/// Every field is an arbitrary JSON value; `null` and a missing key both
/// deserialize to `None`.  Nothing here has been checked yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEmployeeInput {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub position: Option<Value>,
    pub department: Option<Value>,
    pub salary: Option<Value>,
}

/// A fully validated, normalized employee record without store-managed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeInput {
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
}

// ---------------------------------------------------------------------------
// Employee
// ---------------------------------------------------------------------------

/// A stored employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Build a record from validated input, as a store would on insert.
    pub fn from_input(id: i64, input: EmployeeInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            position: input.position,
            department: input.department,
            salary: input.salary,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field, keeping id and `created_at`.
    pub fn replace(&mut self, input: EmployeeInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.email = input.email;
        self.position = input.position;
        self.department = input.department;
        self.salary = input.salary;
        self.updated_at = now;
    }
}
