use anyhow::Result;
use chrono::Utc;
use cms_rs::config::UploadConfig;
use cms_rs::localization::Language;
use cms_rs::api::colleagues::apply_media;
use cms_rs::models::{Colleague, Feedback, News};
use cms_rs::services::media::{MediaCategory, MediaStore, MediaUpload, OrphanLedger, UploadedFile};
use cms_rs::services::pagination::PageFilter;
use cms_rs::services::{ContentService, ServiceError};
use cms_rs::test_utils::{MemoryLedger, MemoryRepository, WriteOutcome};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

struct Fixture {
    _dir: TempDir,
    repository: MemoryRepository<News>,
    ledger: Arc<MemoryLedger>,
    store: MediaStore,
    service: ContentService<MemoryRepository<News>>,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().expect("temp dir");
    let store = MediaStore::new(&UploadConfig::with_root(dir.path()));
    let repository = MemoryRepository::new();
    let ledger = Arc::new(MemoryLedger::new());
    let service = ContentService::new(repository.clone(), store.clone(), ledger.clone());
    Fixture { _dir: dir, repository, ledger, store, service }
}

fn news(media_url: Option<String>) -> News {
    News {
        id: 0,
        title_tj: "А".to_string(),
        title_ru: "Б".to_string(),
        title_en: "A".to_string(),
        content_tj: "Матн".to_string(),
        content_ru: "Текст".to_string(),
        content_en: "Text".to_string(),
        user_id: Uuid::new_v4(),
        media_url,
        like_count: 0,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn photo() -> MediaUpload {
    MediaUpload::new(MediaCategory::News, UploadedFile::new("photo.PNG", vec![7u8; 64]))
}

fn stored_files(root: &Path) -> usize {
    std::fs::read_dir(root.join("uploads").join("news"))
        .map(|entries| entries.count())
        .unwrap_or(0)
}

#[tokio::test]
async fn test_create_then_get_resolves_language() -> Result<()> {
    let f = fixture();

    f.service
        .create(vec![photo()], |stored| news(stored.into_iter().next().map(|m| m.url)))
        .await?;

    let id = f.repository.rows().await[0].id;
    let ru = f.service.get(id, Language::Ru).await?;
    let en = f.service.get(id, Language::En).await?;
    let tj = f.service.get(id, Language::Tj).await?;

    assert_eq!(ru.title, "Б");
    assert_eq!(en.title, "A");
    assert_eq!(tj.title, "А");
    assert_eq!(en.content, "Text");

    let url = en.media_url.expect("media url");
    assert!(url.starts_with("/uploads/news/"));
    assert!(url.ends_with(".png"));
    assert!(f.store.path_for_url(&url).expect("path").exists());

    Ok(())
}

#[tokio::test]
async fn test_get_missing_row_is_not_found() {
    let f = fixture();
    let err = f.service.get(42, Language::En).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("News")));
    assert_eq!(err.to_string(), "News not found");
}

#[tokio::test]
async fn test_delete_missing_row_is_not_found() {
    let f = fixture();
    let err = f.service.delete(42).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("News")));
}

#[tokio::test]
async fn test_list_on_empty_table_is_not_found() -> Result<()> {
    let f = fixture();
    let err = f.service.list(Language::En).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    f.service.create(Vec::new(), |_| news(None)).await?;
    let rows = f.service.list(Language::Ru).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Б");

    Ok(())
}

#[tokio::test]
async fn test_update_without_media_keeps_path() -> Result<()> {
    let f = fixture();
    f.service
        .create(vec![photo()], |stored| news(stored.into_iter().next().map(|m| m.url)))
        .await?;
    let before = f.repository.rows().await[0].clone();

    f.service
        .update(before.id, Vec::new(), |row, _| row.title_en = "B".to_string())
        .await?;

    let after = f.repository.rows().await[0].clone();
    assert_eq!(after.title_en, "B");
    assert_eq!(after.media_url, before.media_url);
    assert!(f.ledger.urls().await.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_update_with_media_supersedes_old_file() -> Result<()> {
    let f = fixture();
    f.service
        .create(vec![photo()], |stored| news(stored.into_iter().next().map(|m| m.url)))
        .await?;
    let before = f.repository.rows().await[0].clone();
    let old_url = before.media_url.clone().expect("media url");

    f.service
        .update(before.id, vec![photo()], |row, stored| {
            if let Some(media) = stored.into_iter().next() {
                row.media_url = Some(media.url);
            }
        })
        .await?;

    let after = f.repository.rows().await[0].clone();
    let new_url = after.media_url.expect("media url");
    assert_ne!(new_url, old_url);

    // The superseded file stays retrievable and is recorded for a later sweep.
    assert!(f.store.path_for_url(&old_url).expect("path").exists());
    assert_eq!(f.ledger.urls().await, vec![old_url]);

    Ok(())
}

#[tokio::test]
async fn test_delete_keeps_file_and_marks_it_orphaned() -> Result<()> {
    let f = fixture();
    f.service
        .create(vec![photo()], |stored| news(stored.into_iter().next().map(|m| m.url)))
        .await?;
    let row = f.repository.rows().await[0].clone();
    let url = row.media_url.clone().expect("media url");

    f.service.delete(row.id).await?;

    assert!(f.repository.rows().await.is_empty());
    assert!(f.store.path_for_url(&url).expect("path").exists());
    assert_eq!(f.ledger.urls().await, vec![url.clone()]);

    let report = f.store.sweep(f.ledger.as_ref()).await?;
    assert_eq!(report.removed, 1);
    assert!(!f.store.path_for_url(&url).expect("path").exists());
    assert!(f.ledger.pending().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_zero_affected_rows_discards_uploads() -> Result<()> {
    let f = fixture();
    f.repository.set_outcome(WriteOutcome::NoRows).await;

    let err = f
        .service
        .create(vec![photo()], |stored| news(stored.into_iter().next().map(|m| m.url)))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Persistence));
    assert_eq!(err.to_string(), "Something went wrong");
    assert_eq!(stored_files(f.store.root()), 0);

    Ok(())
}

#[tokio::test]
async fn test_failed_row_write_discards_uploads() -> Result<()> {
    let f = fixture();
    f.service.create(Vec::new(), |_| news(None)).await?;
    let id = f.repository.rows().await[0].id;
    f.repository.set_outcome(WriteOutcome::Fail).await;

    let err = f
        .service
        .update(id, vec![photo()], |row, stored| {
            row.media_url = stored.into_iter().next().map(|m| m.url);
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Database(_)));
    assert_eq!(stored_files(f.store.root()), 0);
    assert!(f.repository.rows().await[0].media_url.is_none());

    Ok(())
}

#[tokio::test]
async fn test_update_of_missing_row_writes_nothing() {
    let f = fixture();

    let err = f.service.update(9, vec![photo()], |_, _| {}).await.unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(stored_files(f.store.root()), 0);
}

#[tokio::test]
async fn test_invalid_upload_rejects_create_before_any_write() {
    let f = fixture();
    let empty = MediaUpload::new(MediaCategory::News, UploadedFile::new("photo.png", Vec::<u8>::new()));

    let err = f
        .service
        .create(vec![photo(), empty], |_| news(None))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(err.to_string(), "Image file is required");
    assert_eq!(stored_files(f.store.root()), 0);
    assert!(f.repository.rows().await.is_empty());
}

fn feedback(n: usize) -> Feedback {
    Feedback {
        id: 0,
        full_name: format!("Visitor {}", n),
        text_tj: None,
        text_ru: Some(format!("Отзыв {}", n)),
        text_en: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

#[tokio::test]
async fn test_feedback_pages() -> Result<()> {
    let dir = TempDir::new()?;
    let repository = MemoryRepository::<Feedback>::new();
    let service = ContentService::new(
        repository.clone(),
        MediaStore::new(&UploadConfig::with_root(dir.path())),
        Arc::new(MemoryLedger::new()),
    );

    let err = service.page(PageFilter::default(), Language::Ru).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("Feedback")));

    for n in 0..12 {
        service.create(Vec::new(), |_| feedback(n)).await?;
    }

    let page = service.page(PageFilter::new(2, 5), Language::Ru).await?;
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total_records, 12);
    assert_eq!(page.total_pages(), 3);
    assert_eq!(page.items[0].text, "Отзыв 5");

    // A language with no text falls back to an empty string.
    let page = service.page(PageFilter::new(3, 5), Language::En).await?;
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].text, "");

    Ok(())
}

fn colleague() -> Colleague {
    Colleague {
        id: 0,
        first_name_tj: "Фарид".to_string(),
        first_name_ru: "Фарид".to_string(),
        first_name_en: "Farid".to_string(),
        last_name_tj: "Раҳимов".to_string(),
        last_name_ru: "Рахимов".to_string(),
        last_name_en: "Rahimov".to_string(),
        about_tj: None,
        about_ru: None,
        about_en: None,
        image_path: None,
        icons: Vec::new(),
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn colleague_upload(category: MediaCategory, name: &str) -> MediaUpload {
    MediaUpload::new(category, UploadedFile::new(name, vec![3u8; 32]))
}

#[tokio::test]
async fn test_colleague_update_replaces_media_selectively() -> Result<()> {
    let dir = TempDir::new()?;
    let store = MediaStore::new(&UploadConfig::with_root(dir.path()));
    let repository = MemoryRepository::<Colleague>::new();
    let ledger = Arc::new(MemoryLedger::new());
    let service = ContentService::new(repository.clone(), store.clone(), ledger.clone());

    let uploads = vec![
        colleague_upload(MediaCategory::Colleague, "me.png"),
        colleague_upload(MediaCategory::Gallery, "rust.png"),
        colleague_upload(MediaCategory::Gallery, "sql.png"),
    ];
    service
        .create(uploads, |stored| {
            let mut row = colleague();
            apply_media(&mut row, stored);
            row
        })
        .await?;
    let original = repository.rows().await[0].clone();
    assert!(original.image_path.is_some());
    assert_eq!(original.icons.len(), 2);

    // No files: nothing changes and nothing is recorded.
    service.update(original.id, Vec::new(), apply_media).await?;
    let unchanged = repository.rows().await[0].clone();
    assert_eq!(unchanged.image_path, original.image_path);
    assert_eq!(unchanged.icons, original.icons);
    assert!(ledger.urls().await.is_empty());

    // Only a new image: icons stay, the old image is orphaned.
    service
        .update(original.id, vec![colleague_upload(MediaCategory::Colleague, "new.png")], apply_media)
        .await?;
    let reimaged = repository.rows().await[0].clone();
    assert_ne!(reimaged.image_path, original.image_path);
    assert_eq!(reimaged.icons, original.icons);
    assert_eq!(ledger.urls().await, original.image_path.iter().cloned().collect::<Vec<_>>());

    // New icons replace the whole list; every old icon is orphaned but kept on disk.
    service
        .update(original.id, vec![colleague_upload(MediaCategory::Gallery, "go.png")], apply_media)
        .await?;
    let reiconed = repository.rows().await[0].clone();
    assert_eq!(reiconed.image_path, reimaged.image_path);
    assert_eq!(reiconed.icons.len(), 1);
    assert!(!original.icons.contains(&reiconed.icons[0]));

    let orphaned = ledger.urls().await;
    for icon in &original.icons {
        assert!(orphaned.contains(icon));
        assert!(store.path_for_url(icon).expect("icon path").exists());
    }

    Ok(())
}
