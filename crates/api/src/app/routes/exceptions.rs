use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use exctrack_core::{ExceptionId, NewException};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

fn parse_id(raw: &str) -> Result<ExceptionId, axum::response::Response> {
    raw.parse().map_err(errors::domain_error_to_response)
}

/// POST /exceptions/
pub async fn create_exception(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<NewException>, JsonRejection>,
) -> axum::response::Response {
    let Json(new) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.create_exception(new).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::service_error_to_response(e, None),
    }
}

/// GET /exceptions/
pub async fn list_exceptions(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_exceptions().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => errors::service_error_to_response(e, None),
    }
}

/// GET /exceptions/:id
pub async fn get_exception(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.get_exception(id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::service_error_to_response(e, None),
    }
}

/// POST /exceptions/:id/retry
pub async fn retry_exception(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.retry_exception(id).await {
        Ok(record) => (
            StatusCode::OK,
            Json(dto::ExceptionActionResponse::retry_initiated(record)),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e, Some("Failed to retry job")),
    }
}

/// POST /exceptions/:id/notify
pub async fn notify_exception(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.notify_exception(id).await {
        Ok(record) => (
            StatusCode::OK,
            Json(dto::ExceptionActionResponse::notification_sent(record)),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e, Some("Failed to notify team")),
    }
}
