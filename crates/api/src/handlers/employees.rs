use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use directory::{search_fields, validate_raw, Employee, EmployeeInput, RawEmployeeInput, SearchFields};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult, Operation},
    AppState,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub search: Option<String>,
    /// `false` matches the term against name, email and position only.
    pub include_department: Option<bool>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Employee>>> {
    let term = params.search.as_deref().unwrap_or_default();

    if params.include_department == Some(false) && !term.is_empty() {
        let everyone = state
            .store
            .list(None)
            .await
            .map_err(ApiError::store(Operation::List))?;
        let found = search_fields(&everyone, term, SearchFields::CONTACT)
            .into_iter()
            .cloned()
            .collect();
        return Ok(Json(found));
    }

    let employees = state
        .store
        .list(Some(term))
        .await
        .map_err(ApiError::store(Operation::List))?;
    Ok(Json(employees))
}

pub async fn get(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<Employee>> {
    let id = parse_id(&id)?;
    let employee = state
        .store
        .get(id)
        .await
        .map_err(ApiError::store(Operation::Fetch))?;
    Ok(Json(employee))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<RawEmployeeInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let input = checked_input(&state, body, Operation::Create)?;
    let employee = state
        .store
        .create(input)
        .await
        .map_err(ApiError::store(Operation::Create))?;
    info!(id = employee.id, "employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn update(
    Path(id): Path<String>,
    State(state): State<AppState>,
    body: Result<Json<RawEmployeeInput>, JsonRejection>,
) -> ApiResult<Json<Employee>> {
    let id = parse_id(&id)?;
    let input = checked_input(&state, body, Operation::Update)?;
    let employee = state
        .store
        .update(id, input)
        .await
        .map_err(ApiError::store(Operation::Update))?;
    info!(id, "employee updated");
    Ok(Json(employee))
}

pub async fn delete(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    state
        .store
        .delete(id)
        .await
        .map_err(ApiError::store(Operation::Delete))?;
    info!(id, "employee deleted");
    Ok(Json(json!({ "message": "Employee deleted successfully" })))
}

fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse().map_err(|_| ApiError::InvalidId)
}

/// Unwrap the body, then sanitize and validate it before it can reach the store.
fn checked_input(
    state: &AppState,
    body: Result<Json<RawEmployeeInput>, JsonRejection>,
    op: Operation,
) -> ApiResult<EmployeeInput> {
    let Json(raw) = body.map_err(|rejection| {
        warn!(operation = ?op, error = %rejection, "unreadable request body");
        ApiError::Unexpected(op)
    })?;

    validate_raw(raw, state.department_policy).map_err(|err| {
        warn!(operation = ?op, issues = err.issues.len(), "employee input rejected");
        ApiError::from(err)
    })
}
