use crate::database::Repository;
use crate::models::News;
use anyhow::Result;
use sqlx::PgPool;

const SELECT_NEWS: &str = "SELECT n.id, n.title_tj, n.title_ru, n.title_en, n.content_tj, n.content_ru, n.content_en, \
     n.user_id, n.media_url, (SELECT COUNT(*) FROM likes l WHERE l.news_id = n.id) AS like_count, \
     n.created_at, n.updated_at FROM news n";

pub struct NewsRepository {
    pool: PgPool,
}

impl NewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM news WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}

impl Repository for NewsRepository {
    type Entity = News;

    async fn list(&self) -> Result<Vec<News>> {
        let news = sqlx::query_as::<_, News>(&format!("{} ORDER BY n.created_at DESC", SELECT_NEWS))
            .fetch_all(&self.pool)
            .await?;

        Ok(news)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<News>> {
        let news = sqlx::query_as::<_, News>(&format!("{} WHERE n.id = $1", SELECT_NEWS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(news)
    }

    async fn create(&self, news: &News) -> Result<u64> {
        let result = sqlx::query(
            "INSERT INTO news (title_tj, title_ru, title_en, content_tj, content_ru, content_en, user_id, media_url, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&news.title_tj)
        .bind(&news.title_ru)
        .bind(&news.title_en)
        .bind(&news.content_tj)
        .bind(&news.content_ru)
        .bind(&news.content_en)
        .bind(news.user_id)
        .bind(&news.media_url)
        .bind(news.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn update(&self, news: &News) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE news SET title_tj = $2, title_ru = $3, title_en = $4, content_tj = $5, content_ru = $6, \
             content_en = $7, media_url = $8, updated_at = NOW() WHERE id = $1",
        )
        .bind(news.id)
        .bind(&news.title_tj)
        .bind(&news.title_ru)
        .bind(&news.title_en)
        .bind(&news.content_tj)
        .bind(&news.content_ru)
        .bind(&news.content_en)
        .bind(&news.media_url)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
