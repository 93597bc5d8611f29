use crate::board::Board;
use crate::config::Settings;
use crate::error::LightsOutError;
use crate::puzzle::LightsOutSolver;
use axum::http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Request body for /solve
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolveRequest {
    /// Square board of 0/1 values
    #[serde(default, alias = "tablero")]
    pub board: Option<Vec<Vec<u8>>>,
}

/// Response body for a successful /solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResponse {
    /// Flat press pattern, index `row * n + col`
    pub solution: Vec<u8>,
    pub message: String,
    /// Only present when uniqueness reporting is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Status code plus JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ServiceResponse {
    fn new<T: Serialize>(status: StatusCode, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status, body },
            Err(e) => Self::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode response: {}", e),
            ),
        }
    }

    fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    pub(crate) fn not_found(method: &Method, path: &str) -> Self {
        Self::error(StatusCode::NOT_FOUND, format!("No route for {} {}", method, path))
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl std::fmt::Display for ServiceResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.body)
    }
}

/// Solve service holding its solver explicitly; no shared mutable state
#[derive(Debug, Clone, Default)]
pub struct LightsOutService {
    solver: LightsOutSolver,
    report_uniqueness: bool,
}

impl LightsOutService {
    pub fn new(solver: LightsOutSolver) -> Self {
        Self {
            solver,
            report_uniqueness: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.build_solver()).with_uniqueness_report(settings.solver.report_uniqueness)
    }

    /// Add the `unique` field to successful solve responses
    pub fn with_uniqueness_report(mut self, enabled: bool) -> Self {
        self.report_uniqueness = enabled;
        self
    }

    /// Route a request by method and path
    pub fn handle(&self, method: &Method, path: &str, body: &str) -> ServiceResponse {
        debug!(%method, path, "handling request");

        match path {
            "/solve" if *method == Method::POST => self.handle_solve(body),
            "/health" if *method == Method::GET => self.health(),
            _ => ServiceResponse::not_found(method, path),
        }
    }

    /// Parse a JSON solve request and answer it
    pub fn handle_solve(&self, body: &str) -> ServiceResponse {
        match serde_json::from_str::<SolveRequest>(body) {
            Ok(request) => self.solve_request(&request),
            Err(e) => ServiceResponse::error(
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", e),
            ),
        }
    }

    pub fn solve_request(&self, request: &SolveRequest) -> ServiceResponse {
        let rows = match request.board.as_deref() {
            Some(rows) if !rows.is_empty() => rows,
            _ => return ServiceResponse::error(StatusCode::BAD_REQUEST, "No board provided"),
        };

        let outcome = if self.report_uniqueness {
            Board::from_rows(rows)
                .and_then(|board| self.solver.solve_detailed(&board))
                .map(|solution| (solution.pattern, Some(solution.unique)))
        } else {
            self.solver.solve_rows(rows).map(|pattern| (pattern, None))
        };

        match outcome {
            Ok((pattern, unique)) => ServiceResponse::new(
                StatusCode::OK,
                &SolveResponse {
                    solution: pattern.into_presses(),
                    message: "Solution found".to_string(),
                    unique,
                },
            ),
            Err(err) => {
                warn!(error = %err, "solve request failed");
                ServiceResponse::new(Self::status_for(&err), &ErrorResponse { error: err.to_string() })
            }
        }
    }

    pub fn health(&self) -> ServiceResponse {
        ServiceResponse::new(
            StatusCode::OK,
            &HealthResponse {
                status: "ok".to_string(),
            },
        )
    }

    /// Shape problems are the caller's fault; an unsolvable board is a
    /// failure of the solve itself
    fn status_for(err: &LightsOutError) -> StatusCode {
        match err {
            LightsOutError::InvalidBoardShape { .. } => StatusCode::BAD_REQUEST,
            LightsOutError::InconsistentSystem { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_single_cell() {
        let service = LightsOutService::default();
        let response = service.handle(&Method::POST, "/solve", r#"{"board": [[1]]}"#);

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["solution"], json!([1]));
        assert_eq!(response.body["message"], json!("Solution found"));
        assert!(response.body.get("unique").is_none());
    }

    #[test]
    fn test_legacy_field_name_accepted() {
        let service = LightsOutService::default();
        let response = service.handle_solve(r#"{"tablero": [[0, 1, 0], [1, 1, 1], [0, 1, 0]]}"#);

        assert!(response.is_success());
        assert_eq!(response.body["solution"], json!([0, 0, 0, 0, 1, 0, 0, 0, 0]));
    }

    #[test]
    fn test_missing_board_is_client_error() {
        let service = LightsOutService::default();

        assert_eq!(service.handle_solve("{}").status, StatusCode::BAD_REQUEST);
        assert_eq!(service.handle_solve(r#"{"board": []}"#).status, StatusCode::BAD_REQUEST);
        assert_eq!(service.handle_solve(r#"{"board": null}"#).status, StatusCode::BAD_REQUEST);
        assert_eq!(service.handle_solve("not json").status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_bad_shape_is_client_error() {
        let service = LightsOutService::default();
        let response = service.handle_solve(r#"{"board": [[1, 0], [1]]}"#);

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(response.body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid board shape"));
    }

    #[test]
    fn test_unsolvable_board_is_server_error() {
        let service = LightsOutService::default();
        let body = json!({
            "board": [
                [1, 0, 0, 0, 0],
                [0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0]
            ]
        })
        .to_string();

        let response = service.handle(&Method::POST, "/solve", &body);
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.body["error"]
            .as_str()
            .unwrap()
            .contains("Inconsistent system"));
    }

    #[test]
    fn test_uniqueness_report() {
        let service = LightsOutService::default().with_uniqueness_report(true);

        let unique = service.handle_solve(r#"{"board": [[1, 1], [1, 1]]}"#);
        assert_eq!(unique.body["unique"], json!(true));

        let board: Vec<Vec<u8>> = vec![vec![1; 5]; 5];
        let several = service.solve_request(&SolveRequest { board: Some(board) });
        assert_eq!(several.status, StatusCode::OK);
        assert_eq!(several.body["unique"], json!(false));
    }

    #[test]
    fn test_health_and_unknown_route() {
        let service = LightsOutService::default();

        let health = service.handle(&Method::GET, "/health", "");
        assert_eq!(health.status, StatusCode::OK);
        assert_eq!(health.body, json!({ "status": "ok" }));

        assert_eq!(service.handle(&Method::GET, "/solve", "").status, StatusCode::NOT_FOUND);
        assert_eq!(service.handle(&Method::DELETE, "/health", "").status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_oversized_board_is_client_error() {
        let mut settings = Settings::default();
        settings.solver.max_board_size = 4;
        let service = LightsOutService::from_settings(&settings);

        let board: Vec<Vec<u8>> = vec![vec![1; 5]; 5];
        let response = service.solve_request(&SolveRequest { board: Some(board) });
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(response.body["error"]
            .as_str()
            .unwrap()
            .contains("largest accepted size is 4x4"));

        let fits: Vec<Vec<u8>> = vec![vec![1; 4]; 4];
        assert!(service.solve_request(&SolveRequest { board: Some(fits) }).is_success());
    }

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        settings.solver.report_uniqueness = true;
        let service = LightsOutService::from_settings(&settings);

        let response = service.handle_solve(r#"{"board": [[0]]}"#);
        assert_eq!(response.body["solution"], json!([0]));
        assert_eq!(response.body["unique"], json!(true));
    }
}
