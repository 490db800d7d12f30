//! Handler error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use chunkradar_core::Error;

/// Error returned by route handlers as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    /// Map a store error. Client errors keep their own message; anything
    /// else is replaced by the generic `context` message.
    pub fn from_core(err: Error, context: &str) -> Self {
        if !err.is_client_error() {
            error!("{}: {}", context, err);
            return Self::internal(context);
        }

        warn!("{}: {}", context, err);
        match err {
            Error::NotFound(_) => Self::not_found(err.to_string()),
            _ => Self::bad_request(err.to_string()),
        }
    }
}

/// Adapter for `.map_err(on_error("Failed to ..."))`.
pub fn on_error(context: &'static str) -> impl Fn(Error) -> ApiError {
    move |err| ApiError::from_core(err, context)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping() {
        let e = ApiError::from_core(Error::NotFound("Group".into()), "Failed to update group");
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.message, "Group not found");

        let e = ApiError::from_core(Error::Conflict("Group".into()), "Failed to create group");
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "Group already exists");

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e = ApiError::from_core(Error::Io(io), "Failed to save stats");
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.message, "Failed to save stats");
    }
}
