use crate::api::extract::ApiJson;
use crate::api::response::ApiResponse;
use crate::auth::extractors::{AppState, AuthenticatedUser};
use crate::models::{Like, LikeTarget};
use crate::repositories::{CommentRepository, LikeRepository, NewsRepository};
use crate::services::error::{ServiceError, ServiceResult};
use anyhow::Result;
use axum::{extract::State, routing::post, Router};
use serde::Deserialize;
use tracing::info;

/// Exactly one of `news_id` and `comment_id`.
#[derive(Debug, Deserialize)]
pub struct CreateLikeRequest {
    pub news_id: Option<i64>,
    pub comment_id: Option<i64>,
}

pub async fn create_router() -> Result<Router<AppState>> {
    let router = Router::new().route("/", post(create_like));

    Ok(router)
}

async fn create_like(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ApiJson(request): ApiJson<CreateLikeRequest>,
) -> ServiceResult<ApiResponse<Like>> {
    let target = LikeTarget::from_ids(request.news_id, request.comment_id).ok_or_else(|| {
        ServiceError::Validation("Exactly one of news_id or comment_id is required".to_string())
    })?;

    let pool = state.database.pool().clone();
    match target {
        LikeTarget::News(id) => {
            if !NewsRepository::new(pool.clone()).exists(id).await? {
                return Err(ServiceError::NotFound("News"));
            }
        }
        LikeTarget::Comment(id) => {
            if !CommentRepository::new(pool.clone()).exists(id).await? {
                return Err(ServiceError::NotFound("Comment"));
            }
        }
    }

    let like = LikeRepository::new(pool)
        .create(auth_user.user.id, target)
        .await?
        .ok_or_else(|| ServiceError::Conflict("Already liked".to_string()))?;

    info!("User {} liked {:?}", auth_user.user.username, target);
    Ok(ApiResponse::created(like))
}
