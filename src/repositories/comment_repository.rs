use crate::models::Comment;
use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_news(&self, news_id: i64) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT id, news_id, user_id, text, created_at FROM comments WHERE news_id = $1 ORDER BY created_at",
        )
        .bind(news_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    pub async fn create(&self, news_id: i64, user_id: Uuid, text: &str) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (news_id, user_id, text) VALUES ($1, $2, $3) \
             RETURNING id, news_id, user_id, text, created_at",
        )
        .bind(news_id)
        .bind(user_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM comments WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}
