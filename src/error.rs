// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::services::provider::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            // Provider details (status bodies, URLs) stay in the logs.
            AppError::Provider(e) => {
                match e {
                    ProviderError::Status { status, body } => {
                        error!(status, body = %body, "completion provider rejected request");
                    }
                    other => error!(error = %other, "completion provider call failed"),
                }
                (StatusCode::BAD_GATEWAY, "completion provider unavailable".to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
