//! Employee CRUD operations.

use directory::EmployeeInput;
use sqlx::PgPool;

use crate::{
    models::{EmployeeRow, EMPLOYEE_COLUMNS},
    DbError,
};

/// Insert a new employee.
///
/// Returns [`DbError::Conflict`] when the email is already taken.
pub async fn create_employee(pool: &PgPool, input: &EmployeeInput) -> Result<EmployeeRow, DbError> {
    let sql = format!(
        r#"
        INSERT INTO employees (name, email, position, department, salary)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {EMPLOYEE_COLUMNS}
        "#
    );

    sqlx::query_as::<_, EmployeeRow>(&sql)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.position)
        .bind(&input.department)
        .bind(input.salary)
        .fetch_one(pool)
        .await
        .map_err(DbError::from_write)
}

/// Fetch a single employee by its primary key.
pub async fn get_employee(pool: &PgPool, id: i64) -> Result<EmployeeRow, DbError> {
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1");

    let row = sqlx::query_as::<_, EmployeeRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Return employees ordered by creation time (newest first).
///
/// When `search` is non-empty only rows whose name, email, position or
/// department contain it (ignoring case) are returned.
pub async fn list_employees(pool: &PgPool, search: Option<&str>) -> Result<Vec<EmployeeRow>, DbError> {
    let search = search.filter(|s| !s.is_empty());
    let sql = format!(
        r#"
        SELECT {EMPLOYEE_COLUMNS}
        FROM employees
        WHERE $1::text IS NULL
           OR strpos(lower(name), lower($1)) > 0
           OR strpos(lower(email), lower($1)) > 0
           OR strpos(lower(position), lower($1)) > 0
           OR strpos(lower(department), lower($1)) > 0
        ORDER BY created_at DESC, id DESC
        "#
    );

    let rows = sqlx::query_as::<_, EmployeeRow>(&sql)
        .bind(search)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Replace every mutable column of an employee and bump `updated_at`.
///
/// Returns `DbError::NotFound` if no row matched, `DbError::Conflict` if the
/// new email belongs to another employee.
pub async fn update_employee(
    pool: &PgPool,
    id: i64,
    input: &EmployeeInput,
) -> Result<EmployeeRow, DbError> {
    let sql = format!(
        r#"
        UPDATE employees
        SET name = $1, email = $2, position = $3, department = $4, salary = $5,
            updated_at = now()
        WHERE id = $6
        RETURNING {EMPLOYEE_COLUMNS}
        "#
    );

    sqlx::query_as::<_, EmployeeRow>(&sql)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.position)
        .bind(&input.department)
        .bind(input.salary)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(DbError::from_write)?
        .ok_or(DbError::NotFound)
}

/// Permanently delete an employee by its primary key.
///
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn delete_employee(pool: &PgPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}
