use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::future::Future;
use std::time::Duration;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Builds a pool that only connects on first use and skips migrations.
    /// Handy for exercising routes that never reach the database.
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(1))
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// A row with a numeric identity.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

/// CRUD operations shared by every content table. Mutations report the
/// number of affected rows; callers treat zero as a failed write.
pub trait Repository: Send + Sync {
    type Entity: Entity;

    fn list(&self) -> impl Future<Output = Result<Vec<Self::Entity>>> + Send;
    fn find_by_id(&self, id: i64) -> impl Future<Output = Result<Option<Self::Entity>>> + Send;
    fn create(&self, entity: &Self::Entity) -> impl Future<Output = Result<u64>> + Send;
    fn update(&self, entity: &Self::Entity) -> impl Future<Output = Result<u64>> + Send;
    fn delete(&self, id: i64) -> impl Future<Output = Result<u64>> + Send;
}

pub trait Paginated: Repository {
    fn count(&self) -> impl Future<Output = Result<i64>> + Send;
    fn list_page(&self, offset: i64, limit: i64) -> impl Future<Output = Result<Vec<Self::Entity>>> + Send;
}
