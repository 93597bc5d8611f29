//! axum routes over [`LightsOutService`]
//!
//! The router is built but never bound here; callers choose the listener.

use super::{LightsOutService, ServiceResponse};
use axum::{
    Json, Router,
    extract::State,
    http::{Method, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;

/// Create the router for the solve service
pub fn create_router(service: LightsOutService) -> Router {
    Router::new()
        .route("/solve", post(handle_solve))
        .route("/health", get(handle_health))
        .fallback(handle_not_found)
        .with_state(Arc::new(service))
}

impl IntoResponse for ServiceResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Handle POST /solve requests
async fn handle_solve(
    State(service): State<Arc<LightsOutService>>,
    body: String,
) -> ServiceResponse {
    service.handle_solve(&body)
}

/// Handle GET /health requests
async fn handle_health(State(service): State<Arc<LightsOutService>>) -> ServiceResponse {
    service.health()
}

async fn handle_not_found(method: Method, uri: Uri) -> ServiceResponse {
    ServiceResponse::not_found(&method, uri.path())
}
