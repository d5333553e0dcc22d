//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jotlet_core::error::Error;
use serde_json::json;
use tracing::error;

/// Wrapper turning domain errors into HTTP responses.
///
/// Client-caused errors surface their message; server-side failures
/// are logged and replaced with a generic body so internals never
/// leak.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::AuthenticationFailed { .. } => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            Error::AuthorizationDenied { reason } => (StatusCode::FORBIDDEN, reason.clone()),
            Error::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
            Error::NotFound { entity, .. } => {
                (StatusCode::NOT_FOUND, format!("{entity} not found"))
            }
            Error::AlreadyExists { entity } => {
                (StatusCode::CONFLICT, format!("{entity} already exists"))
            }
            Error::Unavailable(detail) => {
                error!(%detail, "database unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service temporarily unavailable".to_string(),
                )
            }
            Error::Database(detail) | Error::Crypto(detail) | Error::Internal(detail) => {
                error!(%detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Missing or invalid session, independent of the inner cause.
pub fn unauthorized() -> ApiError {
    ApiError(Error::AuthenticationFailed {
        reason: "missing or invalid session".into(),
    })
}
