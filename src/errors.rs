use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },
    #[error("No resource matches identifier: {0}")]
    InvalidIdentifier(String),
    #[error("{0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn course_not_found(id: i64) -> Self {
        AppError::NotFound {
            resource: "Course",
            id,
        }
    }

    pub fn validation(err: impl std::fmt::Display) -> Self {
        AppError::Validation(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } | AppError::InvalidIdentifier(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidIdentifier(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::NotFound { .. } | AppError::InvalidIdentifier(_) => "Not found",
            AppError::Validation(_) => "Validation failed",
            AppError::Store(_) => "Database error",
            AppError::Internal(_) => "Internal server error",
        };

        // Server-side failures are logged in full and reported generically.
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
            error_message.to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": error_message,
            "message": message,
        }));

        (status, body).into_response()
    }
}
