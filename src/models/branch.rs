use crate::database::Entity;
use crate::localization::{FieldTable, Language, LocalizedEntity};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Branch {
    pub id: i64,
    pub name_tj: String,
    pub name_ru: String,
    pub name_en: String,
    pub address_tj: String,
    pub address_ru: String,
    pub address_en: String,
    pub phone_number: String,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BranchView {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub image_path: Option<String>,
}

lazy_static! {
    static ref BRANCH_FIELDS: FieldTable<Branch> = FieldTable::new(
        "Branch",
        vec![
            crate::localized_field!(Branch, "Name", name_tj, name_ru, name_en),
            crate::localized_field!(Branch, "Address", address_tj, address_ru, address_en),
        ],
    );
}

impl Entity for Branch {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl LocalizedEntity for Branch {
    const NAME: &'static str = "Branch";
    const LOCALIZED_FIELDS: &'static [&'static str] = &["Name", "Address"];

    type View = BranchView;

    fn field_table() -> &'static FieldTable<Self> {
        &BRANCH_FIELDS
    }

    fn view(&self, language: Language) -> BranchView {
        BranchView {
            id: self.id,
            name: self.localized("Name", language),
            address: self.localized("Address", language),
            phone_number: self.phone_number.clone(),
            image_path: self.image_path.clone(),
        }
    }

    fn media_urls(&self) -> Vec<String> {
        self.image_path.iter().cloned().collect()
    }
}
