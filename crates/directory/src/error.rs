//! Validation error types.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// The validated fields, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Position,
    Department,
    Salary,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name       => "name",
            Self::Email      => "email",
            Self::Position   => "position",
            Self::Department => "department",
            Self::Salary     => "salary",
        }
    }

    /// Capitalised name used at the start of messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name       => "Name",
            Self::Email      => "Email",
            Self::Position   => "Position",
            Self::Department => "Department",
            Self::Salary     => "Salary",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violated field rule.
///
/// Serializes as `{"path": ["<field>"], "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    #[serde(serialize_with = "serialize_path")]
    pub path: Field,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: Field, message: impl Into<String>) -> Self {
        Self { path, message: message.into() }
    }
}

fn serialize_path<S: Serializer>(field: &Field, serializer: S) -> Result<S::Ok, S::Error> {
    [field.as_str()].serialize(serializer)
}

/// Input rejected by the validation schema.  `issues` is never empty.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("validation failed with {} issue(s)", .issues.len())]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Messages in report order.
    pub fn messages(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.message.as_str()).collect()
    }

    /// The first issue reported for `field`, if any.
    pub fn issue_for(&self, field: Field) -> Option<&FieldIssue> {
        self.issues.iter().find(|i| i.path == field)
    }
}
