use crate::database::Entity;
use crate::localization::{FieldTable, Language, LocalizedEntity};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Colleague {
    pub id: i64,
    pub first_name_tj: String,
    pub first_name_ru: String,
    pub first_name_en: String,
    pub last_name_tj: String,
    pub last_name_ru: String,
    pub last_name_en: String,
    pub about_tj: Option<String>,
    pub about_ru: Option<String>,
    pub about_en: Option<String>,
    pub image_path: Option<String>,
    /// Icon image URLs in upload order.
    pub icons: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ColleagueWithIcons {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub about: String,
    pub profile_image_path: Option<String>,
    pub knowing_icons: Vec<String>,
}

/// Profile card without the icon gallery.
#[derive(Debug, Serialize, Deserialize)]
pub struct ColleagueProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub about: String,
    pub profile_image: Option<String>,
}

lazy_static! {
    static ref COLLEAGUE_FIELDS: FieldTable<Colleague> = FieldTable::new(
        "Colleague",
        vec![
            crate::localized_field!(Colleague, "FirstName", first_name_tj, first_name_ru, first_name_en),
            crate::localized_field!(Colleague, "LastName", last_name_tj, last_name_ru, last_name_en),
            crate::localized_field!(Colleague, "About", about_tj, about_ru, about_en),
        ],
    );
}

impl Colleague {
    pub fn profile(&self, language: Language) -> ColleagueProfile {
        ColleagueProfile {
            id: self.id,
            first_name: self.localized("FirstName", language),
            last_name: self.localized("LastName", language),
            about: self.localized("About", language),
            profile_image: self.image_path.clone(),
        }
    }
}

impl Entity for Colleague {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl LocalizedEntity for Colleague {
    const NAME: &'static str = "Colleague";
    const LOCALIZED_FIELDS: &'static [&'static str] = &["FirstName", "LastName", "About"];

    type View = ColleagueWithIcons;

    fn field_table() -> &'static FieldTable<Self> {
        &COLLEAGUE_FIELDS
    }

    fn view(&self, language: Language) -> ColleagueWithIcons {
        ColleagueWithIcons {
            id: self.id,
            first_name: self.localized("FirstName", language),
            last_name: self.localized("LastName", language),
            about: self.localized("About", language),
            profile_image_path: self.image_path.clone(),
            knowing_icons: self.icons.clone(),
        }
    }

    fn media_urls(&self) -> Vec<String> {
        self.image_path.iter().chain(self.icons.iter()).cloned().collect()
    }
}
