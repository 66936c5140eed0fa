use crate::database::Repository;
use crate::models::ChooseUs;
use anyhow::Result;
use sqlx::PgPool;

pub struct ChooseUsRepository {
    pool: PgPool,
}

impl ChooseUsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Repository for ChooseUsRepository {
    type Entity = ChooseUs;

    async fn list(&self) -> Result<Vec<ChooseUs>> {
        let blocks = sqlx::query_as::<_, ChooseUs>(
            "SELECT id, title_tj, title_ru, title_en, description_tj, description_ru, description_en, icon_path, \
             created_at, updated_at FROM choose_us ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(blocks)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ChooseUs>> {
        let block = sqlx::query_as::<_, ChooseUs>(
            "SELECT id, title_tj, title_ru, title_en, description_tj, description_ru, description_en, icon_path, \
             created_at, updated_at FROM choose_us WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(block)
    }

    async fn create(&self, block: &ChooseUs) -> Result<u64> {
        let result = sqlx::query(
            "INSERT INTO choose_us (title_tj, title_ru, title_en, description_tj, description_ru, description_en, icon_path, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&block.title_tj)
        .bind(&block.title_ru)
        .bind(&block.title_en)
        .bind(&block.description_tj)
        .bind(&block.description_ru)
        .bind(&block.description_en)
        .bind(&block.icon_path)
        .bind(block.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn update(&self, block: &ChooseUs) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE choose_us SET title_tj = $2, title_ru = $3, title_en = $4, description_tj = $5, description_ru = $6, \
             description_en = $7, icon_path = $8, updated_at = NOW() WHERE id = $1",
        )
        .bind(block.id)
        .bind(&block.title_tj)
        .bind(&block.title_ru)
        .bind(&block.title_en)
        .bind(&block.description_tj)
        .bind(&block.description_ru)
        .bind(&block.description_en)
        .bind(&block.icon_path)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM choose_us WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
