use crate::database::Entity;
use crate::localization::{FieldTable, Language, LocalizedEntity};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct News {
    pub id: i64,
    pub title_tj: String,
    pub title_ru: String,
    pub title_en: String,
    pub content_tj: String,
    pub content_ru: String,
    pub content_en: String,
    pub user_id: Uuid,
    pub media_url: Option<String>,
    /// Computed from `likes`; ignored on writes.
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewsView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
    pub user_id: Uuid,
    pub media_url: Option<String>,
}

lazy_static! {
    static ref NEWS_FIELDS: FieldTable<News> = FieldTable::new(
        "News",
        vec![
            crate::localized_field!(News, "Title", title_tj, title_ru, title_en),
            crate::localized_field!(News, "Content", content_tj, content_ru, content_en),
        ],
    );
}

impl Entity for News {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl LocalizedEntity for News {
    const NAME: &'static str = "News";
    const LOCALIZED_FIELDS: &'static [&'static str] = &["Title", "Content"];

    type View = NewsView;

    fn field_table() -> &'static FieldTable<Self> {
        &NEWS_FIELDS
    }

    fn view(&self, language: Language) -> NewsView {
        NewsView {
            id: self.id,
            title: self.localized("Title", language),
            content: self.localized("Content", language),
            created_at: self.created_at,
            like_count: self.like_count,
            user_id: self.user_id,
            media_url: self.media_url.clone(),
        }
    }

    fn media_urls(&self) -> Vec<String> {
        self.media_url.iter().cloned().collect()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Comment {
    pub id: i64,
    pub news_id: i64,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Like {
    pub id: i64,
    pub user_id: Uuid,
    pub news_id: Option<i64>,
    pub comment_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// What a like points at. A like has exactly one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeTarget {
    News(i64),
    Comment(i64),
}

impl LikeTarget {
    /// `None` unless exactly one of the ids is given.
    pub fn from_ids(news_id: Option<i64>, comment_id: Option<i64>) -> Option<Self> {
        match (news_id, comment_id) {
            (Some(id), None) => Some(LikeTarget::News(id)),
            (None, Some(id)) => Some(LikeTarget::Comment(id)),
            _ => None,
        }
    }

    /// `(news_id, comment_id)` column values.
    pub fn columns(self) -> (Option<i64>, Option<i64>) {
        match self {
            LikeTarget::News(id) => (Some(id), None),
            LikeTarget::Comment(id) => (None, Some(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn news() -> News {
        News {
            id: 7,
            title_tj: "Хабар".to_string(),
            title_ru: "Новость".to_string(),
            title_en: "News".to_string(),
            content_tj: "Матн".to_string(),
            content_ru: "Текст".to_string(),
            content_en: "Text".to_string(),
            user_id: Uuid::nil(),
            media_url: Some("/uploads/news/a.png".to_string()),
            like_count: 3,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_view_resolves_requested_language() {
        let news = news();
        let view = news.view(Language::Ru);
        assert_eq!(view.title, "Новость");
        assert_eq!(view.content, "Текст");
        assert_eq!(view.like_count, 3);

        let view = news.view(Language::Tj);
        assert_eq!(view.title, "Хабар");
    }

    #[test]
    fn test_media_urls() {
        let mut news = news();
        assert_eq!(news.media_urls(), vec!["/uploads/news/a.png".to_string()]);
        news.media_url = None;
        assert!(news.media_urls().is_empty());
    }

    #[test]
    fn test_like_target_requires_exactly_one_id() {
        assert_eq!(LikeTarget::from_ids(Some(1), None), Some(LikeTarget::News(1)));
        assert_eq!(LikeTarget::from_ids(None, Some(2)), Some(LikeTarget::Comment(2)));
        assert_eq!(LikeTarget::from_ids(Some(1), Some(2)), None);
        assert_eq!(LikeTarget::from_ids(None, None), None);
        assert_eq!(LikeTarget::Comment(2).columns(), (None, Some(2)));
    }
}
