use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::error;

use exctrack_core::DomainError;
use exctrack_infra::StoreError;

use crate::app::services::ServiceError;

/// Map a service failure to a response.
///
/// Errors that already carry a meaning for the caller pass through with their
/// own status. Everything else is a 500 whose message is `failure` (when
/// given) followed by the underlying description.
pub fn service_error_to_response(
    err: ServiceError,
    failure: Option<&str>,
) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::Store(StoreError::NotFound(_)) => not_found(),
        ServiceError::Store(e) => {
            let message = match failure {
                Some(prefix) => format!("{prefix}: {e}"),
                None => e.to_string(),
            };
            error!(error = %e, "request failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", message)
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => not_found(),
    }
}

/// Malformed, incomplete or over-specified JSON bodies are client errors.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(
        StatusCode::BAD_REQUEST,
        "validation_error",
        rejection.body_text(),
    )
}

pub fn not_found() -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "not_found", DomainError::NotFound.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
