use crate::database::Entity;
use crate::localization::{FieldTable, Language, LocalizedEntity};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Feedback {
    pub id: i64,
    pub full_name: String,
    pub text_tj: Option<String>,
    pub text_ru: Option<String>,
    pub text_en: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackView {
    pub id: i64,
    pub full_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

lazy_static! {
    static ref FEEDBACK_FIELDS: FieldTable<Feedback> =
        FieldTable::new("Feedback", vec![crate::localized_field!(Feedback, "Text", text_tj, text_ru, text_en)]);
}

impl Entity for Feedback {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl LocalizedEntity for Feedback {
    const NAME: &'static str = "Feedback";
    const LOCALIZED_FIELDS: &'static [&'static str] = &["Text"];

    type View = FeedbackView;

    fn field_table() -> &'static FieldTable<Self> {
        &FEEDBACK_FIELDS
    }

    fn view(&self, language: Language) -> FeedbackView {
        FeedbackView {
            id: self.id,
            full_name: self.full_name.clone(),
            text: self.localized("Text", language),
            created_at: self.created_at,
        }
    }

    fn media_urls(&self) -> Vec<String> {
        Vec::new()
    }
}
