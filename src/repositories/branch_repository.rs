use crate::database::Repository;
use crate::models::Branch;
use anyhow::Result;
use sqlx::PgPool;

pub struct BranchRepository {
    pool: PgPool,
}

impl BranchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Repository for BranchRepository {
    type Entity = Branch;

    async fn list(&self) -> Result<Vec<Branch>> {
        let branches = sqlx::query_as::<_, Branch>(
            "SELECT id, name_tj, name_ru, name_en, address_tj, address_ru, address_en, phone_number, image_path, \
             created_at, updated_at FROM branches ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(branches)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Branch>> {
        let branch = sqlx::query_as::<_, Branch>(
            "SELECT id, name_tj, name_ru, name_en, address_tj, address_ru, address_en, phone_number, image_path, \
             created_at, updated_at FROM branches WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(branch)
    }

    async fn create(&self, branch: &Branch) -> Result<u64> {
        let result = sqlx::query(
            "INSERT INTO branches (name_tj, name_ru, name_en, address_tj, address_ru, address_en, phone_number, image_path, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&branch.name_tj)
        .bind(&branch.name_ru)
        .bind(&branch.name_en)
        .bind(&branch.address_tj)
        .bind(&branch.address_ru)
        .bind(&branch.address_en)
        .bind(&branch.phone_number)
        .bind(&branch.image_path)
        .bind(branch.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn update(&self, branch: &Branch) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE branches SET name_tj = $2, name_ru = $3, name_en = $4, address_tj = $5, address_ru = $6, \
             address_en = $7, phone_number = $8, image_path = $9, updated_at = NOW() WHERE id = $1",
        )
        .bind(branch.id)
        .bind(&branch.name_tj)
        .bind(&branch.name_ru)
        .bind(&branch.name_en)
        .bind(&branch.address_tj)
        .bind(&branch.address_ru)
        .bind(&branch.address_en)
        .bind(&branch.phone_number)
        .bind(&branch.image_path)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM branches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
