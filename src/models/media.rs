use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// A stored file that no row references any more, awaiting a sweep.
#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct OrphanedMedia {
    pub id: i64,
    pub media_url: String,
    pub reason: OrphanReason,
    pub marked_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Type)]
#[sqlx(type_name = "varchar")]
#[sqlx(rename_all = "PascalCase")]
pub enum OrphanReason {
    /// An update replaced the file with a new one.
    Superseded,
    /// The owning row was deleted.
    Deleted,
}
