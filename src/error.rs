use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::provider::ProviderError;

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    Provider(ProviderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Validation(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail),
            AppError::Provider(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

// Every body rejection is a 422, including an empty body with no content type.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}
