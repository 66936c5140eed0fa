pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod localization;
pub mod models;
pub mod repositories;
pub mod services;

// Always available for integration tests but marked as test-only
#[cfg(any(test, debug_assertions, feature = "test-utils"))]
pub mod test_utils;

pub use config::AppConfig;
pub use database::Database;

use anyhow::Result;
use auth::extractors::AppState;
use axum::{extract::DefaultBodyLimit, extract::State, routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Full application: `/`, `/health`, the `/api` tree and stored uploads
/// under `/uploads`.
pub async fn create_app(app_state: AppState) -> Result<Router> {
    let uploads = ServeDir::new(app_state.media.uploads_dir());
    let body_limit = app_state.config.uploads.body_limit();

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::create_router().await?)
        .nest_service("/uploads", uploads)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    Ok(app)
}

async fn root_handler() -> &'static str {
    "CMS-RS: Multilingual content backend"
}

async fn health_handler(State(app_state): State<AppState>) -> &'static str {
    match app_state.database.health_check().await {
        Ok(_) => "OK",
        Err(_) => "Database connection failed",
    }
}
