//! Comps Terminal API Server
//!
//! HTTP API server that finds comparable M&A transactions for a pasted
//! company profile and serves the ranked results as JSON or as a
//! downloadable spreadsheet.

mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{header, Method},
    Router,
};
use comps_core::CompsError;
use comps_services::MatchService;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default path of the reference spreadsheet
const DEFAULT_DATASET_PATH: &str = "data/Database.xlsx";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub match_service: Arc<MatchService>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,comps_api=debug")),
        )
        .init();

    info!("Starting Comps Terminal API");

    let api_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| CompsError::config("OPENAI_API_KEY environment variable not set"))?;

    let dataset_path = std::env::var("COMPS_DATASET_PATH")
        .unwrap_or_else(|_| DEFAULT_DATASET_PATH.to_string());
    info!("Using reference dataset at: {}", dataset_path);

    let match_service = Arc::new(MatchService::new(dataset_path, api_key)?);

    let state = AppState { match_service };

    // Configure CORS for frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Build router
    let app = Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .with_state(state);

    // Start server
    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
