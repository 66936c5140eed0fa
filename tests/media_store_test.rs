use anyhow::Result;
use cms_rs::config::UploadConfig;
use cms_rs::models::OrphanReason;
use cms_rs::services::media::{MediaCategory, MediaStore, MediaUpload, OrphanLedger, UploadedFile};
use cms_rs::services::ServiceError;
use cms_rs::test_utils::MemoryLedger;
use std::collections::HashSet;
use tempfile::TempDir;

const MIB: usize = 1024 * 1024;

fn store(dir: &TempDir) -> MediaStore {
    MediaStore::new(&UploadConfig::with_root(dir.path()))
}

fn upload(category: MediaCategory, name: &str, len: usize) -> MediaUpload {
    MediaUpload::new(category, UploadedFile::new(name, vec![1u8; len]))
}

#[tokio::test]
async fn test_parallel_uploads_get_distinct_paths() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store(&dir);

    let mut handles = Vec::new();
    for _ in 0..1000 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.save(&upload(MediaCategory::News, "same.jpg", 16)).await
        }));
    }

    let mut urls = HashSet::new();
    for handle in handles {
        let stored = handle.await??;
        assert!(stored.path.exists());
        urls.insert(stored.url);
    }

    assert_eq!(urls.len(), 1000);
    let on_disk = std::fs::read_dir(store.uploads_dir().join("news"))?.count();
    assert_eq!(on_disk, 1000);

    Ok(())
}

#[tokio::test]
async fn test_size_ceilings_per_category() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store(&dir);

    for category in [MediaCategory::Colleague, MediaCategory::Gallery, MediaCategory::Branch, MediaCategory::ChooseUs] {
        let err = store.save(&upload(category, "big.png", 10 * MIB + 1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)), "{:?} accepted an oversized file", category);

        let err = store.save(&upload(category, "empty.png", 0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        store.save(&upload(category, "fits.png", 10 * MIB)).await?;
    }

    // News media has its own, larger ceiling.
    store.save(&upload(MediaCategory::News, "clip.mp4", 10 * MIB + 1)).await?;
    let err = store.save(&upload(MediaCategory::News, "clip.mp4", 100 * MIB + 1)).await.unwrap_err();
    assert_eq!(err.to_string(), "Image file size must be less than 100MB");

    Ok(())
}

#[tokio::test]
async fn test_extension_allow_list() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store(&dir);

    let err = store.save(&upload(MediaCategory::Branch, "shell.php", 8)).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid image format. Allowed formats: .jpg, .jpeg, .png, .gif");

    let stored = store.save(&upload(MediaCategory::Branch, "Front.JPEG", 8)).await?;
    assert!(stored.url.starts_with("/uploads/branches/"));
    assert!(stored.url.ends_with(".jpeg"));

    let mut config = UploadConfig::with_root(dir.path());
    config.news_media_extensions = Some(vec![".mp4".to_string()]);
    let restricted = MediaStore::new(&config);
    assert!(restricted.save(&upload(MediaCategory::News, "clip.mp4", 8)).await.is_ok());
    assert!(restricted.save(&upload(MediaCategory::News, "clip.exe", 8)).await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_save_all_validates_before_writing() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store(&dir);

    let batch = vec![
        upload(MediaCategory::Colleague, "me.png", 8),
        upload(MediaCategory::Gallery, "icon.svg", 8),
    ];
    let err = store.save_all(&batch).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid icon format. Allowed formats: .jpg, .jpeg, .png, .gif");
    assert!(!store.uploads_dir().join("Colleague").exists());

    let batch = vec![
        upload(MediaCategory::Colleague, "me.png", 8),
        upload(MediaCategory::Gallery, "a.png", 8),
        upload(MediaCategory::Gallery, "b.gif", 8),
    ];
    let stored = store.save_all(&batch).await?;
    let categories: Vec<_> = stored.iter().map(|m| m.category).collect();
    assert_eq!(categories, vec![MediaCategory::Colleague, MediaCategory::Gallery, MediaCategory::Gallery]);
    assert!(stored[1].url.starts_with("/uploads/Gallery/"));

    Ok(())
}

#[tokio::test]
async fn test_sweep_removes_recorded_files_only() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store(&dir);
    let ledger = MemoryLedger::new();

    let orphan = store.save(&upload(MediaCategory::ChooseUs, "old.png", 8)).await?;
    let kept = store.save(&upload(MediaCategory::ChooseUs, "new.png", 8)).await?;
    ledger
        .mark(
            &[orphan.url.clone(), "/uploads/news/already-gone.png".to_string(), "/etc/passwd".to_string()],
            OrphanReason::Superseded,
        )
        .await?;

    let report = store.sweep(&ledger).await?;

    assert_eq!(report.removed, 1);
    assert_eq!(report.missing, 2);
    assert_eq!(report.failed, 0);
    assert!(!orphan.path.exists());
    assert!(kept.path.exists());
    assert!(ledger.pending().await?.is_empty());

    Ok(())
}
