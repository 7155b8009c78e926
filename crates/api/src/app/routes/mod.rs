use axum::{
    Router,
    routing::{get, post},
};

pub mod exceptions;
pub mod system;

/// Router for the exception endpoints.
///
/// The collection is served with and without the trailing slash so clients of
/// either spelling land on the same handlers.
pub fn router() -> Router {
    Router::new()
        .route(
            "/exceptions",
            post(exceptions::create_exception).get(exceptions::list_exceptions),
        )
        .route(
            "/exceptions/",
            post(exceptions::create_exception).get(exceptions::list_exceptions),
        )
        .route("/exceptions/:id", get(exceptions::get_exception))
        .route("/exceptions/:id/retry", post(exceptions::retry_exception))
        .route("/exceptions/:id/notify", post(exceptions::notify_exception))
}
