//! API error type and its JSON rendering.
//!
//! | variant      | status | body                                              |
//! |--------------|--------|---------------------------------------------------|
//! | `Validation` | 400    | `{"error": "Validation failed", "issues": [...]}` |
//! | `InvalidId`  | 400    | `{"error": "Invalid employee ID"}`                |
//! | `NotFound`   | 404    | `{"error": "Employee not found"}`                 |
//! | `Conflict`   | 409    | `{"error": "Email already exists"}`               |
//! | `Unexpected` | 500    | `{"error": "Failed to <operation>"}`              |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use db::DbError;
use directory::ValidationError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// The operation a handler was performing, used for generic failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Fetch,
    Create,
    Update,
    Delete,
    Stats,
}

impl Operation {
    fn failure_message(&self) -> &'static str {
        match self {
            Self::List   => "Failed to fetch employees",
            Self::Fetch  => "Failed to fetch employee",
            Self::Create => "Failed to create employee",
            Self::Update => "Failed to update employee",
            Self::Delete => "Failed to delete employee",
            Self::Stats  => "Failed to compute statistics",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid employee id")]
    InvalidId,

    #[error("employee not found")]
    NotFound,

    #[error("email already exists")]
    Conflict,

    /// Anything else.  Details are logged, never returned.
    #[error("unexpected failure during {0:?}")]
    Unexpected(Operation),
}

impl ApiError {
    /// Translate a store error for the given operation.
    ///
    /// Use as `.map_err(ApiError::store(Operation::Create))`.
    pub fn store(op: Operation) -> impl FnOnce(DbError) -> Self {
        move |err| match err {
            DbError::NotFound => Self::NotFound,
            DbError::Conflict => Self::Conflict,
            other => {
                error!(operation = ?op, error = %other, "store failure");
                Self::Unexpected(op)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Validation(err) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Validation failed", "issues": err.issues }),
            ),
            Self::InvalidId => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid employee ID" }),
            ),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Employee not found" }),
            ),
            Self::Conflict => (
                StatusCode::CONFLICT,
                json!({ "error": "Email already exists" }),
            ),
            Self::Unexpected(op) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": op.failure_message() }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
