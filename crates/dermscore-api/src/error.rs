use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use dermscore_service::ServiceError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    Unauthenticated(String),
    InvalidArgument(String),
    NotFound(String),
    PermissionDenied(String),
    Internal(String),
}

/// The wire code of a failed response, attached to its extensions for
/// the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode(pub &'static str);

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, "unauthenticated", msg),
            ApiError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, "invalid-argument", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not-found", msg),
            ApiError::PermissionDenied(msg) => (StatusCode::FORBIDDEN, "permission-denied", msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "internal server error".to_string(),
                )
            }
        };

        let mut response = (status, Json(ErrorBody { error: message, code })).into_response();
        response.extensions_mut().insert(ErrorCode(code));
        response
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let message = e.to_string();
        match e {
            ServiceError::Unauthenticated => ApiError::Unauthenticated(message),
            ServiceError::InvalidArgument(_) => ApiError::InvalidArgument(message),
            ServiceError::NotFound(_) => ApiError::NotFound(message),
            ServiceError::PermissionDenied(_) => ApiError::PermissionDenied(message),
            ServiceError::Storage(_)
            | ServiceError::Export(_)
            | ServiceError::Serialization(_)
            | ServiceError::Time(_) => ApiError::Internal(message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidArgument(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use dermscore_storage::StorageError;

    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (
                ServiceError::InvalidArgument("Age must be a number".into()),
                StatusCode::BAD_REQUEST,
            ),
            (ServiceError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (ServiceError::PermissionDenied("no".into()), StatusCode::FORBIDDEN),
            (
                ServiceError::Storage(StorageError::InvalidQuery("bad".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::from(error).into_response().status(), status);
        }
    }

    #[test]
    fn error_responses_carry_their_code() {
        let response = ApiError::from(ServiceError::PermissionDenied("no".into())).into_response();
        assert_eq!(
            response.extensions().get::<ErrorCode>(),
            Some(&ErrorCode("permission-denied"))
        );
    }
}
