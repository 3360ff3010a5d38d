use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::warn;

use barista_auth::AuthError;
use barista_core::BaristaError;

/// Error half of every handler. Auth failures keep the identity-provider
/// error shape (`{"code", "description"}`); everything else uses the
/// `{"success": false, "error", "message"}` envelope.
pub enum ApiError {
    Auth(AuthError),
    Status(StatusCode, String),
}

impl ApiError {
    pub fn status(status: StatusCode, message: String) -> Self {
        ApiError::Status(status, message)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<BaristaError> for ApiError {
    fn from(err: BaristaError) -> Self {
        match err {
            BaristaError::DrinkNotFound(_) => {
                ApiError::Status(StatusCode::NOT_FOUND, "Not Found".into())
            }
            BaristaError::Unprocessable(msg) => {
                ApiError::Status(StatusCode::UNPROCESSABLE_ENTITY, msg)
            }
            other => {
                warn!(error = %other, "request failed");
                ApiError::Status(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".into(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(err) => {
                let status = StatusCode::from_u16(err.status())
                    .unwrap_or(StatusCode::UNAUTHORIZED);
                let body = json!({
                    "code": err.code(),
                    "description": err.to_string(),
                });
                (status, Json(body)).into_response()
            }
            ApiError::Status(status, message) => {
                let body = json!({
                    "success": false,
                    "error": status.as_u16(),
                    "message": message,
                });
                (status, Json(body)).into_response()
            }
        }
    }
}
