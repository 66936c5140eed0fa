use crate::models::{OrphanReason, OrphanedMedia};
use crate::services::media::OrphanLedger;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct OrphanedMediaRepository {
    pool: PgPool,
}

impl OrphanedMediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrphanLedger for OrphanedMediaRepository {
    async fn mark(&self, urls: &[String], reason: OrphanReason) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for url in urls {
            sqlx::query("INSERT INTO orphaned_media (media_url, reason) VALUES ($1, $2) ON CONFLICT (media_url) DO NOTHING")
                .bind(url)
                .bind(reason)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        Ok(())
    }

    async fn pending(&self) -> Result<Vec<OrphanedMedia>> {
        let orphans = sqlx::query_as::<_, OrphanedMedia>(
            "SELECT id, media_url, reason, marked_at FROM orphaned_media ORDER BY marked_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orphans)
    }

    async fn forget(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM orphaned_media WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
