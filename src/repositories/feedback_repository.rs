use crate::database::{Paginated, Repository};
use crate::models::Feedback;
use anyhow::Result;
use sqlx::PgPool;

pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Repository for FeedbackRepository {
    type Entity = Feedback;

    async fn list(&self) -> Result<Vec<Feedback>> {
        let feedbacks = sqlx::query_as::<_, Feedback>(
            "SELECT id, full_name, text_tj, text_ru, text_en, created_at, updated_at FROM feedbacks ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(feedbacks)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Feedback>> {
        let feedback = sqlx::query_as::<_, Feedback>(
            "SELECT id, full_name, text_tj, text_ru, text_en, created_at, updated_at FROM feedbacks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(feedback)
    }

    async fn create(&self, feedback: &Feedback) -> Result<u64> {
        let result = sqlx::query(
            "INSERT INTO feedbacks (full_name, text_tj, text_ru, text_en, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&feedback.full_name)
        .bind(&feedback.text_tj)
        .bind(&feedback.text_ru)
        .bind(&feedback.text_en)
        .bind(feedback.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn update(&self, feedback: &Feedback) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE feedbacks SET full_name = $2, text_tj = $3, text_ru = $4, text_en = $5, updated_at = NOW() WHERE id = $1",
        )
        .bind(feedback.id)
        .bind(&feedback.full_name)
        .bind(&feedback.text_tj)
        .bind(&feedback.text_ru)
        .bind(&feedback.text_en)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM feedbacks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

impl Paginated for FeedbackRepository {
    async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM feedbacks")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<Feedback>> {
        let feedbacks = sqlx::query_as::<_, Feedback>(
            "SELECT id, full_name, text_tj, text_ru, text_en, created_at, updated_at FROM feedbacks \
             ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(feedbacks)
    }
}
