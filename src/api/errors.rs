//! API errors and how they map onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;
use crate::validation::ValidationError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed validation (422)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Store unreachable or write failed (500)
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(err) => {
                tracing::debug!(fields = ?err.fields(), "rejected project input");
                (status, Json(json!({ "detail": err.errors }))).into_response()
            }
            ApiError::Store(err) => {
                tracing::error!(error = %err, "store operation failed");
                (status, Json(json!({ "detail": "Internal Server Error" }))).into_response()
            }
        }
    }
}
