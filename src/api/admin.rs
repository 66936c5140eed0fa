//! Maintenance of stored media that no row references any more.

use crate::api::orphan_ledger;
use crate::api::response::ApiResponse;
use crate::auth::extractors::{AdminUser, AppState};
use crate::models::OrphanedMedia;
use crate::services::error::ServiceResult;
use crate::services::media::SweepReport;
use anyhow::Result;
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use tracing::info;

pub async fn create_router() -> Result<Router<AppState>> {
    let router = Router::new()
        .route("/orphans", get(list_orphans))
        .route("/sweep", post(sweep_orphans));

    Ok(router)
}

async fn list_orphans(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ServiceResult<ApiResponse<Vec<OrphanedMedia>>> {
    let orphans = orphan_ledger(&state).pending().await?;
    Ok(ApiResponse::ok(orphans))
}

async fn sweep_orphans(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> ServiceResult<ApiResponse<SweepReport>> {
    info!("Media sweep requested by {}", admin.user.username);
    let ledger = orphan_ledger(&state);
    let report = state.media.sweep(ledger.as_ref()).await?;
    Ok(ApiResponse::ok(report))
}
