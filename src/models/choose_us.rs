use crate::database::Entity;
use crate::localization::{FieldTable, Language, LocalizedEntity};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A "why choose us" marketing block.
#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct ChooseUs {
    pub id: i64,
    pub title_tj: String,
    pub title_ru: String,
    pub title_en: String,
    pub description_tj: String,
    pub description_ru: String,
    pub description_en: String,
    pub icon_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChooseUsView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub icon_path: Option<String>,
}

lazy_static! {
    static ref CHOOSE_US_FIELDS: FieldTable<ChooseUs> = FieldTable::new(
        "ChooseUs",
        vec![
            crate::localized_field!(ChooseUs, "Title", title_tj, title_ru, title_en),
            crate::localized_field!(ChooseUs, "Description", description_tj, description_ru, description_en),
        ],
    );
}

impl Entity for ChooseUs {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl LocalizedEntity for ChooseUs {
    const NAME: &'static str = "ChooseUs";
    const LOCALIZED_FIELDS: &'static [&'static str] = &["Title", "Description"];

    type View = ChooseUsView;

    fn field_table() -> &'static FieldTable<Self> {
        &CHOOSE_US_FIELDS
    }

    fn view(&self, language: Language) -> ChooseUsView {
        ChooseUsView {
            id: self.id,
            title: self.localized("Title", language),
            description: self.localized("Description", language),
            icon_path: self.icon_path.clone(),
        }
    }

    fn media_urls(&self) -> Vec<String> {
        self.icon_path.iter().cloned().collect()
    }
}
