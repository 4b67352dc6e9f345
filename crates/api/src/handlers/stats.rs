use axum::{
    extract::{Query, State},
    Json,
};
use directory::{
    aggregate, department_stats, filter_departments, sort_departments, DashboardStats,
    Department, DepartmentSort, DepartmentStats,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ApiResult, Operation},
    AppState,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentParams {
    pub search: Option<String>,
    /// `name`, `employees`, `salary` or `total`; anything else sorts by name.
    pub sort_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogueEntry {
    pub value: &'static str,
    pub label: &'static str,
}

pub async fn dashboard(State(state): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    let employees = state
        .store
        .list(None)
        .await
        .map_err(ApiError::store(Operation::Stats))?;
    Ok(Json(aggregate(&employees)))
}

pub async fn departments(
    State(state): State<AppState>,
    Query(params): Query<DepartmentParams>,
) -> ApiResult<Json<Vec<DepartmentStats>>> {
    let employees = state
        .store
        .list(None)
        .await
        .map_err(ApiError::store(Operation::Stats))?;

    let sort = params
        .sort_by
        .as_deref()
        .and_then(|s| s.parse::<DepartmentSort>().ok())
        .unwrap_or_default();

    let mut stats = filter_departments(
        department_stats(&employees),
        params.search.as_deref().unwrap_or_default(),
    );
    sort_departments(&mut stats, sort);
    Ok(Json(stats))
}

pub async fn catalogue() -> Json<Vec<CatalogueEntry>> {
    Json(
        Department::ALL
            .iter()
            .map(|d| CatalogueEntry { value: d.as_str(), label: d.label() })
            .collect(),
    )
}
