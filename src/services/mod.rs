pub mod content;
pub mod error;
pub mod media;
pub mod pagination;

pub use content::ContentService;
pub use error::{ServiceError, ServiceResult};
pub use media::{MediaCategory, MediaStore, MediaUpload, OrphanLedger, StoredMedia, UploadedFile};
pub use pagination::{Page, PageFilter};
