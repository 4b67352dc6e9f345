//! The employee validation schema.
//!
//! Rules per field, checked in order; only the first violated rule of each
//! field is reported:
//! 1. `name`       — required, at most 100 characters.
//! 2. `email`      — well-formed address, at most 255 characters.
//! 3. `position`   — required, at most 100 characters.
//! 4. `department` — required; catalogue membership under [`DepartmentPolicy::Catalogue`].
//! 5. `salary`     — required number in `0..=10_000_000`.
//!
//! Every field is checked, so one call reports all failing fields at once.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::{
    error::{Field, FieldIssue, ValidationError},
    models::{Department, EmployeeInput, RawEmployeeInput},
    sanitize::{sanitize, SalaryValue, SanitizedInput, TextValue},
};

pub const MAX_TEXT_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MIN_SALARY: f64 = 0.0;
pub const MAX_SALARY: f64 = 10_000_000.0;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// How strictly `department` is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DepartmentPolicy {
    /// Any non-empty value is accepted.
    #[default]
    Lenient,
    /// The value must be one of [`Department::ALL`].
    Catalogue,
}

/// Sanitize then validate a raw request body.
pub fn validate_raw(
    raw: RawEmployeeInput,
    policy: DepartmentPolicy,
) -> Result<EmployeeInput, ValidationError> {
    validate(sanitize(raw), policy)
}

/// Validate sanitized input, collecting at most one issue per field.
///
/// # Errors
/// [`ValidationError`] listing the failing fields in declaration order.
pub fn validate(
    input: SanitizedInput,
    policy: DepartmentPolicy,
) -> Result<EmployeeInput, ValidationError> {
    let name = required_text(Field::Name, input.name);
    let email = email(input.email);
    let position = required_text(Field::Position, input.position);
    let department = department(input.department, policy);
    let salary = salary(input.salary);

    match (name, email, position, department, salary) {
        (Ok(name), Ok(email), Ok(position), Ok(department), Ok(salary)) => Ok(EmployeeInput {
            name,
            email,
            position,
            department,
            salary,
        }),
        (name, email, position, department, salary) => {
            let issues: Vec<FieldIssue> = [
                name.err(),
                email.err(),
                position.err(),
                department.err(),
                salary.err(),
            ]
            .into_iter()
            .flatten()
            .collect();
            debug!(count = issues.len(), "employee input rejected");
            Err(ValidationError { issues })
        }
    }
}

fn text(field: Field, value: Option<TextValue>) -> Result<Option<String>, FieldIssue> {
    match value {
        None => Ok(None),
        Some(TextValue::Text(s)) => Ok(Some(s)),
        Some(TextValue::NotText(_)) => Err(FieldIssue::new(
            field,
            format!("{} must be a string", field.label()),
        )),
    }
}

fn required_text(field: Field, value: Option<TextValue>) -> Result<String, FieldIssue> {
    let value = text(field, value)?.unwrap_or_default();
    if value.is_empty() {
        return Err(FieldIssue::new(field, format!("{} is required", field.label())));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(FieldIssue::new(
            field,
            format!("{} must be less than {MAX_TEXT_LEN} characters", field.label()),
        ));
    }
    Ok(value)
}

fn email(value: Option<TextValue>) -> Result<String, FieldIssue> {
    let value = text(Field::Email, value)?.unwrap_or_default();
    if !EMAIL_RE.is_match(&value) {
        return Err(FieldIssue::new(Field::Email, "Invalid email address"));
    }
    if value.chars().count() > MAX_EMAIL_LEN {
        return Err(FieldIssue::new(
            Field::Email,
            format!("Email must be less than {MAX_EMAIL_LEN} characters"),
        ));
    }
    Ok(value)
}

fn department(value: Option<TextValue>, policy: DepartmentPolicy) -> Result<String, FieldIssue> {
    let value = text(Field::Department, value)?.unwrap_or_default();
    if value.is_empty() {
        return Err(FieldIssue::new(Field::Department, "Department is required"));
    }
    if policy == DepartmentPolicy::Catalogue && value.parse::<Department>().is_err() {
        return Err(FieldIssue::new(Field::Department, "Invalid department"));
    }
    Ok(value)
}

fn salary(value: Option<SalaryValue>) -> Result<f64, FieldIssue> {
    match value {
        None => Err(FieldIssue::new(Field::Salary, "Salary is required")),
        Some(SalaryValue::NotANumber) => Err(FieldIssue::new(Field::Salary, "Salary must be a number")),
        Some(SalaryValue::Number(n)) if n < MIN_SALARY => Err(FieldIssue::new(
            Field::Salary,
            "Salary must be greater than or equal to 0",
        )),
        Some(SalaryValue::Number(n)) if n > MAX_SALARY => Err(FieldIssue::new(
            Field::Salary,
            "Salary must be less than 10,000,000",
        )),
        Some(SalaryValue::Number(n)) => Ok(n),
    }
}
