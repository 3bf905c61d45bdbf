//! REST route registration for the Calculator module.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::{Extension, Router};

use super::handlers;
use crate::domain::service::CalculatorService;

/// Registers the calculator routes on `router` and attaches `service` to them.
#[must_use]
pub fn register_routes(router: Router, service: Arc<CalculatorService>) -> Router {
    tracing::debug!("Registering calculator routes");

    router
        .route("/init", post(handlers::init))
        .route("/operation", post(handlers::operation))
        .route("/undo", put(handlers::undo))
        .route("/reset", get(handlers::reset))
        .layer(Extension(service))
}
