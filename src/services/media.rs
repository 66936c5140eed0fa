//! Upload validation and storage.
//!
//! Files land in `{root}/uploads/{category}/{uuid}{.ext}` and are referenced
//! from their rows by the relative URL `/uploads/{category}/{uuid}{.ext}`.
//! Files that stop being referenced are recorded in an [`OrphanLedger`] and
//! only removed from disk by an explicit [`MediaStore::sweep`].

use crate::config::UploadConfig;
use crate::models::{OrphanReason, OrphanedMedia};
use crate::services::error::{ServiceError, ServiceResult};
use async_trait::async_trait;
use axum::body::Bytes;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaCategory {
    News,
    Colleague,
    Gallery,
    Branch,
    ChooseUs,
}

impl MediaCategory {
    pub const ALL: [MediaCategory; 5] = [
        MediaCategory::News,
        MediaCategory::Colleague,
        MediaCategory::Gallery,
        MediaCategory::Branch,
        MediaCategory::ChooseUs,
    ];

    pub fn directory(self) -> &'static str {
        match self {
            MediaCategory::News => "news",
            MediaCategory::Colleague => "Colleague",
            MediaCategory::Gallery => "Gallery",
            MediaCategory::Branch => "branches",
            MediaCategory::ChooseUs => "choose-us",
        }
    }

    fn from_directory(dir: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.directory() == dir)
    }
}

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_bytes: u64,
    /// Lower-case extensions with a leading dot; `None` accepts anything.
    pub allowed_extensions: Option<Vec<String>>,
    /// Noun used in validation messages ("Image", "Icon").
    pub label: &'static str,
}

impl UploadPolicy {
    /// Validates `file` and returns the extension to keep on disk.
    pub fn check(&self, file: &UploadedFile) -> ServiceResult<String> {
        if file.is_empty() {
            return Err(ServiceError::Validation(format!("{} file is required", self.label)));
        }

        if file.len() > self.max_bytes {
            return Err(ServiceError::Validation(format!(
                "{} file size must be less than {}MB",
                self.label,
                self.max_bytes / MIB
            )));
        }

        let extension = file.extension();
        if let Some(allowed) = &self.allowed_extensions {
            if !allowed.iter().any(|a| *a == extension) {
                return Err(ServiceError::Validation(format!(
                    "Invalid {} format. Allowed formats: {}",
                    self.label.to_lowercase(),
                    allowed.join(", ")
                )));
            }
        }

        Ok(extension)
    }
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self { file_name: file_name.into(), bytes: bytes.into() }
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lower-cased extension with its dot, or `""` when the name has none.
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub category: MediaCategory,
    pub file: UploadedFile,
}

impl MediaUpload {
    pub fn new(category: MediaCategory, file: UploadedFile) -> Self {
        Self { category, file }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredMedia {
    pub category: MediaCategory,
    pub url: String,
    pub path: PathBuf,
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct SweepReport {
    pub removed: usize,
    pub missing: usize,
    pub failed: usize,
}

/// Records stored files that no row references any more.
#[async_trait]
pub trait OrphanLedger: Send + Sync {
    async fn mark(&self, urls: &[String], reason: OrphanReason) -> anyhow::Result<()>;
    async fn pending(&self) -> anyhow::Result<Vec<OrphanedMedia>>;
    async fn forget(&self, id: i64) -> anyhow::Result<()>;
}

#[derive(Debug)]
struct Policies {
    news: UploadPolicy,
    image: UploadPolicy,
    icon: UploadPolicy,
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    policies: Arc<Policies>,
}

impl MediaStore {
    pub fn new(config: &UploadConfig) -> Self {
        let image_extensions = Some(config.image_extensions.clone());
        let policies = Policies {
            news: UploadPolicy {
                max_bytes: config.news_media_max_bytes,
                allowed_extensions: config.news_media_extensions.clone(),
                label: "Image",
            },
            image: UploadPolicy {
                max_bytes: config.image_max_bytes,
                allowed_extensions: image_extensions.clone(),
                label: "Image",
            },
            icon: UploadPolicy {
                max_bytes: config.image_max_bytes,
                allowed_extensions: image_extensions,
                label: "Icon",
            },
        };

        Self { root: config.root.clone(), policies: Arc::new(policies) }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join("uploads")
    }

    pub fn policy(&self, category: MediaCategory) -> &UploadPolicy {
        match category {
            MediaCategory::News => &self.policies.news,
            MediaCategory::Colleague | MediaCategory::Branch => &self.policies.image,
            MediaCategory::Gallery | MediaCategory::ChooseUs => &self.policies.icon,
        }
    }

    pub fn validate(&self, upload: &MediaUpload) -> ServiceResult<String> {
        self.policy(upload.category).check(&upload.file)
    }

    pub async fn save(&self, upload: &MediaUpload) -> ServiceResult<StoredMedia> {
        let extension = self.validate(upload)?;
        self.write(upload, &extension).await
    }

    /// Validates every upload before writing any of them. If a write fails,
    /// the files already written for this batch are removed.
    pub async fn save_all(&self, uploads: &[MediaUpload]) -> ServiceResult<Vec<StoredMedia>> {
        let extensions = uploads
            .iter()
            .map(|upload| self.validate(upload))
            .collect::<ServiceResult<Vec<_>>>()?;

        let mut stored = Vec::with_capacity(uploads.len());
        for (upload, extension) in uploads.iter().zip(extensions) {
            match self.write(upload, &extension).await {
                Ok(media) => stored.push(media),
                Err(e) => {
                    self.discard(&stored).await;
                    return Err(e);
                }
            }
        }

        Ok(stored)
    }

    async fn write(&self, upload: &MediaUpload, extension: &str) -> ServiceResult<StoredMedia> {
        let directory = upload.category.directory();
        let dir = self.uploads_dir().join(directory);
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = format!("{}{}", Uuid::new_v4(), extension);
        let path = dir.join(&file_name);

        // create_new: a generated name must never replace an existing file.
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        let written = async {
            file.write_all(&upload.file.bytes).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            error!("Failed to write upload {}: {}", path.display(), e);
            drop(file);
            let _ = tokio::fs::remove_file(&path).await;
            return Err(e.into());
        }

        debug!("Stored {} bytes at {}", upload.file.len(), path.display());
        Ok(StoredMedia {
            category: upload.category,
            url: format!("/uploads/{}/{}", directory, file_name),
            path,
        })
    }

    /// Removes files written for a request whose row write did not happen.
    pub async fn discard(&self, stored: &[StoredMedia]) {
        for media in stored {
            match tokio::fs::remove_file(&media.path).await {
                Ok(()) => debug!("Discarded unreferenced upload {}", media.url),
                Err(e) => warn!("Failed to discard upload {}: {}", media.url, e),
            }
        }
    }

    /// Maps `/uploads/{category}/{name}` back to its location on disk.
    pub fn path_for_url(&self, url: &str) -> Option<PathBuf> {
        let rest = url.strip_prefix("/uploads/")?;
        let (directory, name) = rest.split_once('/')?;
        let category = MediaCategory::from_directory(directory)?;

        let safe_name = !name.is_empty()
            && !name.starts_with('.')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
        if !safe_name {
            return None;
        }

        Some(self.uploads_dir().join(category.directory()).join(name))
    }

    /// Deletes every file recorded in the ledger and clears its entries.
    /// Entries whose file could not be removed stay for the next sweep.
    pub async fn sweep(&self, ledger: &dyn OrphanLedger) -> anyhow::Result<SweepReport> {
        let mut report = SweepReport::default();

        for orphan in ledger.pending().await? {
            let Some(path) = self.path_for_url(&orphan.media_url) else {
                warn!("Dropping ledger entry with unrecognised URL {}", orphan.media_url);
                ledger.forget(orphan.id).await?;
                report.missing += 1;
                continue;
            };

            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    ledger.forget(orphan.id).await?;
                    report.removed += 1;
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    ledger.forget(orphan.id).await?;
                    report.missing += 1;
                }
                Err(e) => {
                    error!("Failed to remove orphaned media {}: {}", path.display(), e);
                    report.failed += 1;
                }
            }
        }

        info!(
            "Media sweep finished: {} removed, {} missing, {} failed",
            report.removed, report.missing, report.failed
        );
        Ok(report)
    }
}
