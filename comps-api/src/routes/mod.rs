//! API route definitions

mod health;
mod matches;

use crate::AppState;
use axum::Router;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(matches::routes())
        .merge(health::routes())
}
