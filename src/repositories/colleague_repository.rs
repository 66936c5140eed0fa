use crate::database::Repository;
use crate::models::Colleague;
use anyhow::Result;
use sqlx::PgPool;

pub struct ColleagueRepository {
    pool: PgPool,
}

impl ColleagueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Repository for ColleagueRepository {
    type Entity = Colleague;

    async fn list(&self) -> Result<Vec<Colleague>> {
        let colleagues = sqlx::query_as::<_, Colleague>(
            "SELECT id, first_name_tj, first_name_ru, first_name_en, last_name_tj, last_name_ru, last_name_en, \
             about_tj, about_ru, about_en, image_path, icons, created_at, updated_at FROM colleagues ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(colleagues)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Colleague>> {
        let colleague = sqlx::query_as::<_, Colleague>(
            "SELECT id, first_name_tj, first_name_ru, first_name_en, last_name_tj, last_name_ru, last_name_en, \
             about_tj, about_ru, about_en, image_path, icons, created_at, updated_at FROM colleagues WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(colleague)
    }

    async fn create(&self, colleague: &Colleague) -> Result<u64> {
        let result = sqlx::query(
            "INSERT INTO colleagues (first_name_tj, first_name_ru, first_name_en, last_name_tj, last_name_ru, last_name_en, \
             about_tj, about_ru, about_en, image_path, icons, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(&colleague.first_name_tj)
        .bind(&colleague.first_name_ru)
        .bind(&colleague.first_name_en)
        .bind(&colleague.last_name_tj)
        .bind(&colleague.last_name_ru)
        .bind(&colleague.last_name_en)
        .bind(&colleague.about_tj)
        .bind(&colleague.about_ru)
        .bind(&colleague.about_en)
        .bind(&colleague.image_path)
        .bind(&colleague.icons)
        .bind(colleague.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn update(&self, colleague: &Colleague) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE colleagues SET first_name_tj = $2, first_name_ru = $3, first_name_en = $4, last_name_tj = $5, \
             last_name_ru = $6, last_name_en = $7, about_tj = $8, about_ru = $9, about_en = $10, image_path = $11, \
             icons = $12, updated_at = NOW() WHERE id = $1",
        )
        .bind(colleague.id)
        .bind(&colleague.first_name_tj)
        .bind(&colleague.first_name_ru)
        .bind(&colleague.first_name_en)
        .bind(&colleague.last_name_tj)
        .bind(&colleague.last_name_ru)
        .bind(&colleague.last_name_en)
        .bind(&colleague.about_tj)
        .bind(&colleague.about_ru)
        .bind(&colleague.about_en)
        .bind(&colleague.image_path)
        .bind(&colleague.icons)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM colleagues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
