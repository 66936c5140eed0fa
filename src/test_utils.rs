//! In-memory stand-ins for the database-backed collaborators.

use crate::database::{Entity, Paginated, Repository};
use crate::models::{OrphanReason, OrphanedMedia};
use crate::services::media::OrphanLedger;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// How the next mutations of a [`MemoryRepository`] behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Apply,
    /// Report zero affected rows without changing anything.
    NoRows,
    /// Fail as if the database were unreachable.
    Fail,
}

struct Inner<E> {
    rows: RwLock<Vec<E>>,
    outcome: RwLock<WriteOutcome>,
    next_id: AtomicI64,
}

/// Vec-backed repository. Clones share the same rows.
pub struct MemoryRepository<E> {
    inner: Arc<Inner<E>>,
}

impl<E> Clone for MemoryRepository<E> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                rows: RwLock::new(Vec::new()),
                outcome: RwLock::new(WriteOutcome::Apply),
                next_id: AtomicI64::new(1),
            }),
        }
    }

    pub async fn set_outcome(&self, outcome: WriteOutcome) {
        *self.inner.outcome.write().await = outcome;
    }

    pub async fn rows(&self) -> Vec<E> {
        self.inner.rows.read().await.clone()
    }

    async fn outcome(&self) -> Result<Option<()>> {
        match *self.inner.outcome.read().await {
            WriteOutcome::Apply => Ok(Some(())),
            WriteOutcome::NoRows => Ok(None),
            WriteOutcome::Fail => Err(anyhow::anyhow!("database unavailable")),
        }
    }
}

impl<E: Entity> Repository for MemoryRepository<E> {
    type Entity = E;

    async fn list(&self) -> Result<Vec<E>> {
        Ok(self.rows().await)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<E>> {
        Ok(self.inner.rows.read().await.iter().find(|row| row.id() == id).cloned())
    }

    async fn create(&self, entity: &E) -> Result<u64> {
        if self.outcome().await?.is_none() {
            return Ok(0);
        }

        let mut row = entity.clone();
        row.set_id(self.inner.next_id.fetch_add(1, Ordering::SeqCst));
        self.inner.rows.write().await.push(row);
        Ok(1)
    }

    async fn update(&self, entity: &E) -> Result<u64> {
        if self.outcome().await?.is_none() {
            return Ok(0);
        }

        let mut rows = self.inner.rows.write().await;
        match rows.iter_mut().find(|row| row.id() == entity.id()) {
            Some(row) => {
                *row = entity.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        if self.outcome().await?.is_none() {
            return Ok(0);
        }

        let mut rows = self.inner.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        Ok((before - rows.len()) as u64)
    }
}

impl<E: Entity> Paginated for MemoryRepository<E> {
    async fn count(&self) -> Result<i64> {
        Ok(self.inner.rows.read().await.len() as i64)
    }

    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<E>> {
        let rows = self.inner.rows.read().await;
        Ok(rows
            .iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}

/// Orphan ledger kept in memory.
#[derive(Default)]
pub struct MemoryLedger {
    entries: RwLock<Vec<OrphanedMedia>>,
    next_id: AtomicI64,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn urls(&self) -> Vec<String> {
        self.entries.read().await.iter().map(|e| e.media_url.clone()).collect()
    }
}

#[async_trait]
impl OrphanLedger for MemoryLedger {
    async fn mark(&self, urls: &[String], reason: OrphanReason) -> Result<()> {
        let mut entries = self.entries.write().await;
        for url in urls {
            if entries.iter().any(|e| &e.media_url == url) {
                continue;
            }
            entries.push(OrphanedMedia {
                id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
                media_url: url.clone(),
                reason,
                marked_at: Utc::now(),
            });
        }
        Ok(())
    }

    async fn pending(&self) -> Result<Vec<OrphanedMedia>> {
        Ok(self.entries.read().await.clone())
    }

    async fn forget(&self, id: i64) -> Result<()> {
        self.entries.write().await.retain(|e| e.id != id);
        Ok(())
    }
}
