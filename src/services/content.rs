//! One create/read/update/delete flow for every localized content type.
//!
//! A mutation touches two stores: the upload directory and the database.
//! Files are written first; if the row write then fails (error or zero
//! affected rows) the files written for that request are removed again.
//! Files a committed write stops referencing are recorded in the orphan
//! ledger and left on disk.

use crate::database::{Paginated, Repository};
use crate::localization::{Language, LocalizedEntity};
use crate::models::OrphanReason;
use crate::services::error::{ServiceError, ServiceResult};
use crate::services::media::{MediaStore, MediaUpload, OrphanLedger, StoredMedia};
use crate::services::pagination::{Page, PageFilter};
use std::sync::Arc;
use tracing::{debug, info, warn};

type ViewOf<R> = <<R as Repository>::Entity as LocalizedEntity>::View;

pub struct ContentService<R> {
    repository: R,
    media: MediaStore,
    ledger: Arc<dyn OrphanLedger>,
}

impl<R> ContentService<R>
where
    R: Repository,
    R::Entity: LocalizedEntity,
{
    pub fn new(repository: R, media: MediaStore, ledger: Arc<dyn OrphanLedger>) -> Self {
        Self { repository, media, ledger }
    }

    /// All rows in `language`. An empty table is reported as not found.
    pub async fn list(&self, language: Language) -> ServiceResult<Vec<ViewOf<R>>> {
        let rows = self.repository.list().await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound(R::Entity::NAME));
        }

        debug!("Listing {} {} rows in {}", rows.len(), R::Entity::NAME, language);
        Ok(rows.iter().map(|row| row.view(language)).collect())
    }

    pub async fn get(&self, id: i64, language: Language) -> ServiceResult<ViewOf<R>> {
        Ok(self.find(id).await?.view(language))
    }

    /// The raw row, for callers that need a view other than the default one.
    pub async fn find(&self, id: i64) -> ServiceResult<R::Entity> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(R::Entity::NAME))
    }

    /// Stores `uploads`, builds the row from their URLs and inserts it.
    pub async fn create<F>(&self, uploads: Vec<MediaUpload>, build: F) -> ServiceResult<()>
    where
        F: FnOnce(Vec<StoredMedia>) -> R::Entity + Send,
    {
        let stored = self.media.save_all(&uploads).await?;
        let entity = build(stored.clone());

        self.commit(&stored, self.repository.create(&entity)).await?;

        info!("{} created", R::Entity::NAME);
        Ok(())
    }

    /// Loads row `id`, stores `uploads`, lets `apply` overwrite the row and
    /// writes it back. Media the update stops referencing is marked orphaned.
    pub async fn update<F>(&self, id: i64, uploads: Vec<MediaUpload>, apply: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut R::Entity, Vec<StoredMedia>) + Send,
    {
        let mut entity = self.find(id).await?;
        let previous = entity.media_urls();

        let stored = self.media.save_all(&uploads).await?;
        apply(&mut entity, stored.clone());

        self.commit(&stored, self.repository.update(&entity)).await?;

        let current = entity.media_urls();
        let superseded: Vec<String> = previous.into_iter().filter(|url| !current.contains(url)).collect();
        self.mark_orphaned(&superseded, OrphanReason::Superseded).await;

        info!("{} {} updated", R::Entity::NAME, id);
        Ok(())
    }

    /// Deletes row `id`. Its files stay on disk and are marked orphaned.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let entity = self.find(id).await?;

        self.commit(&[], self.repository.delete(id)).await?;
        self.mark_orphaned(&entity.media_urls(), OrphanReason::Deleted).await;

        info!("{} {} deleted", R::Entity::NAME, id);
        Ok(())
    }

    /// Awaits a row write; on failure removes the files written for it.
    async fn commit(
        &self,
        stored: &[StoredMedia],
        write: impl std::future::Future<Output = anyhow::Result<u64>> + Send,
    ) -> ServiceResult<()> {
        let outcome = match write.await {
            Ok(0) => Err(ServiceError::Persistence),
            Ok(_) => Ok(()),
            Err(e) => Err(ServiceError::from(e)),
        };

        if outcome.is_err() && !stored.is_empty() {
            warn!("{} write failed, discarding {} uploaded file(s)", R::Entity::NAME, stored.len());
            self.media.discard(stored).await;
        }

        outcome
    }

    async fn mark_orphaned(&self, urls: &[String], reason: OrphanReason) {
        if urls.is_empty() {
            return;
        }

        // The row write already committed; a ledger failure only delays cleanup.
        if let Err(e) = self.ledger.mark(urls, reason).await {
            warn!("Failed to record orphaned media {:?}: {}", urls, e);
        }
    }
}

impl<R> ContentService<R>
where
    R: Paginated,
    R::Entity: LocalizedEntity,
{
    /// One page of rows in `language`. An empty table is reported as not found.
    pub async fn page(&self, filter: PageFilter, language: Language) -> ServiceResult<Page<ViewOf<R>>> {
        let (page_number, page_size) = filter.normalize();
        let (offset, limit) = filter.window();

        let total_records = self.repository.count().await?;
        if total_records == 0 {
            return Err(ServiceError::NotFound(R::Entity::NAME));
        }

        let rows = self.repository.list_page(offset, limit).await?;
        Ok(Page {
            items: rows.iter().map(|row| row.view(language)).collect(),
            page_number,
            page_size,
            total_records,
        })
    }
}
