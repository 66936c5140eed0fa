use crate::models::{Like, LikeTarget};
use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

pub struct LikeRepository {
    pool: PgPool,
}

impl LikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts the like; `None` when the user already likes the target.
    pub async fn create(&self, user_id: Uuid, target: LikeTarget) -> Result<Option<Like>> {
        let (news_id, comment_id) = target.columns();
        let like = sqlx::query_as::<_, Like>(
            "INSERT INTO likes (user_id, news_id, comment_id) VALUES ($1, $2, $3) \
             ON CONFLICT DO NOTHING \
             RETURNING id, user_id, news_id, comment_id, created_at",
        )
        .bind(user_id)
        .bind(news_id)
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(like)
    }
}
