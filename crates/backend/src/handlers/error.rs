use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::domain::common::AggregateId;
use contracts::shared::error::{ConfirmRequest, DomainError};
use serde_json::json;
use thiserror::Error;

/// Where the client goes when a record it asked for is gone
pub const NOT_FOUND_FALLBACK: &str = "/dashboard";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("malformed id: {0}")]
    BadId(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Parses a path segment into an aggregate id
pub fn parse_id<T: AggregateId>(raw: &str) -> ApiResult<T> {
    T::from_string(raw).map_err(|_| ApiError::BadId(raw.to_string()))
}

/// A missing or unreadable confirmation body counts as not confirmed
pub fn confirmed(body: Option<Json<ConfirmRequest>>) -> bool {
    body.is_some_and(|Json(confirm)| confirm.confirmed)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            ApiError::BadId(_) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            ApiError::Domain(DomainError::Validation(errors)) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": message, "fields": errors.fields }),
            ),
            ApiError::Domain(DomainError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": message,
                    "entity": entity,
                    "id": id,
                    "fallback": NOT_FOUND_FALLBACK,
                }),
            ),
            ApiError::Domain(DomainError::InvalidTransition { .. })
            | ApiError::Domain(DomainError::Conflict(_)) => {
                (StatusCode::CONFLICT, json!({ "error": message }))
            }
            ApiError::Domain(DomainError::ConfirmationRequired(action)) => (
                StatusCode::PRECONDITION_REQUIRED,
                json!({ "error": message, "action": action }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
