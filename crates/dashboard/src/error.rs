//! JSON error responses for dashboard handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Handler error, rendered as `{"error": ...}`.
#[derive(Debug)]
pub struct DashboardError(pub moves_core::Error);

impl From<moves_core::Error> for DashboardError {
    fn from(e: moves_core::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            moves_core::Error::MissingSummary(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!(%status, error = %self.0, "Dashboard request failed");

        let body = json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
