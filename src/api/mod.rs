pub mod admin;
pub mod auth;
pub mod branches;
pub mod choose_us;
pub mod colleagues;
pub mod extract;
pub mod feedback;
pub mod form;
pub mod likes;
pub mod news;
pub mod response;

use crate::auth::extractors::AppState;
use crate::repositories::OrphanedMediaRepository;
use crate::services::media::OrphanLedger;
use anyhow::Result;
use axum::{routing::get, Router};
use std::sync::Arc;

pub async fn create_router() -> Result<Router<AppState>> {
    let router = Router::new()
        .route("/status", get(status_handler))
        .nest("/auth", auth::create_router().await?)
        .nest("/news", news::create_router().await?)
        .nest("/colleagues", colleagues::create_router().await?)
        .nest("/branches", branches::create_router().await?)
        .nest("/choose-us", choose_us::create_router().await?)
        .nest("/feedback", feedback::create_router().await?)
        .nest("/likes", likes::create_router().await?)
        .nest("/admin/media", admin::create_router().await?);

    Ok(router)
}

/// Ledger that records media no row references any more.
pub(crate) fn orphan_ledger(state: &AppState) -> Arc<dyn OrphanLedger> {
    Arc::new(OrphanedMediaRepository::new(state.database.pool().clone()))
}

async fn status_handler() -> &'static str {
    "API is running"
}
