//! Request/response boundary around the solver
//!
//! Exposes the JSON contract of the solve service, as a plain handler and as
//! an axum router, without binding a socket:
//! - POST /solve - body `{"board": [[0, 1, ...], ...]}`, returns the flat press pattern
//! - GET /health - liveness check, always `{"status": "ok"}`

pub mod handler;
pub mod router;

pub use handler::{
    ErrorResponse, HealthResponse, LightsOutService, ServiceResponse, SolveRequest, SolveResponse,
};
pub use router::create_router;
