//! Input normalization applied before validation.
//!
//! - Text fields are trimmed; `null` / missing stays missing.
//! - `email` is additionally lowercased.
//! - A string `salary` is parsed as a float.  Strings that do not parse in
//!   full become [`SalaryValue::NotANumber`] so validation rejects them.

use serde_json::Value;

use crate::models::{EmployeeInput, RawEmployeeInput};

/// A sanitized text field.
#[derive(Debug, Clone, PartialEq)]
pub enum TextValue {
    Text(String),
    /// Any non-string JSON value, passed through untouched.
    NotText(Value),
}

impl TextValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::NotText(_) => None,
        }
    }
}

/// A sanitized salary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SalaryValue {
    Number(f64),
    NotANumber,
}

/// Output of [`sanitize`]; input to [`crate::validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SanitizedInput {
    pub name: Option<TextValue>,
    pub email: Option<TextValue>,
    pub position: Option<TextValue>,
    pub department: Option<TextValue>,
    pub salary: Option<SalaryValue>,
}

impl From<EmployeeInput> for SanitizedInput {
    fn from(input: EmployeeInput) -> Self {
        Self {
            name: Some(TextValue::Text(input.name)),
            email: Some(TextValue::Text(input.email)),
            position: Some(TextValue::Text(input.position)),
            department: Some(TextValue::Text(input.department)),
            salary: Some(SalaryValue::Number(input.salary)),
        }
    }
}

/// Normalize raw request data.  Never fails.
pub fn sanitize(raw: RawEmployeeInput) -> SanitizedInput {
    SanitizedInput {
        name: raw.name.map(trim_text),
        email: raw.email.map(|v| match trim_text(v) {
            TextValue::Text(s) => TextValue::Text(s.to_lowercase()),
            other => other,
        }),
        position: raw.position.map(trim_text),
        department: raw.department.map(trim_text),
        salary: raw.salary.map(coerce_salary),
    }
}

fn trim_text(value: Value) -> TextValue {
    match value {
        Value::String(s) => TextValue::Text(s.trim().to_owned()),
        other => TextValue::NotText(other),
    }
}

fn coerce_salary(value: Value) -> SalaryValue {
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => SalaryValue::Number(n),
        _ => SalaryValue::NotANumber,
    }
}
