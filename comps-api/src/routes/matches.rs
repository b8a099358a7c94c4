//! Match endpoints for comparable-transaction queries

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use comps_core::CompsError;
use comps_services::{write_matches_workbook, DEFAULT_TOP_N, XLSX_CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::AppState;

/// Create match routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/match", post(find_matches))
        .route("/match/export", post(export_matches))
}

/// Request body for a match query
#[derive(Debug, Deserialize)]
struct MatchRequest {
    /// Free-text company profile to match against the reference set
    query: String,
    /// How many comparables to return (defaults to 10)
    #[serde(default)]
    top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Run the match pipeline and return ranked results as JSON
async fn find_matches(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Response {
    let query = request.query.trim().to_string();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Query profile must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let top_n = request.top_n.unwrap_or(DEFAULT_TOP_N);
    info!("Finding top {} matches for query profile", top_n);

    match state.match_service.find_matches(&query, top_n).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Run the match pipeline and return the results as a spreadsheet download
async fn export_matches(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Response {
    let query = request.query.trim().to_string();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Query profile must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let top_n = request.top_n.unwrap_or(DEFAULT_TOP_N);
    info!("Exporting top {} matches for query profile", top_n);

    let report = match state.match_service.find_matches(&query, top_n).await {
        Ok(report) => report,
        Err(e) => return error_response(e),
    };

    match write_matches_workbook(&report.matches) {
        Ok(buffer) => (
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"Top_Matches.xlsx\"",
                ),
            ],
            buffer,
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Render a pipeline failure as an inline error response
///
/// The session stays usable; only the current query is aborted.
fn error_response(err: CompsError) -> Response {
    error!("Match request failed: {}", err);

    let status = match &err {
        CompsError::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
