//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   GET    /api/employees?search=&includeDepartment=
//!   POST   /api/employees
//!   GET    /api/employees/:id
//!   PUT    /api/employees/:id
//!   DELETE /api/employees/:id
//!   GET    /api/stats
//!   GET    /api/departments?search=&sortBy=
//!   GET    /api/departments/catalogue
//!   GET    /health

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use db::EmployeeStore;
use directory::DepartmentPolicy;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use handlers::{employees, stats};

pub use error::{ApiError, Operation};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EmployeeStore>,
    pub department_policy: DepartmentPolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn EmployeeStore>, department_policy: DepartmentPolicy) -> Self {
        Self { store, department_policy }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/employees", get(employees::list).post(employees::create))
        .route(
            "/api/employees/:id",
            get(employees::get)
                .put(employees::update)
                .delete(employees::delete),
        )
        .route("/api/stats", get(stats::dashboard))
        .route("/api/departments", get(stats::departments))
        .route("/api/departments/catalogue", get(stats::catalogue))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind to `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let store_ok = state.store.is_healthy().await;
    let status = if store_ok { "ok" } else { "degraded" };
    Json(json!({ "status": status, "store": store_ok }))
}
