//! Language-suffixed content fields.
//!
//! Every translatable attribute of a content row (a *logical* field such as
//! `Title`) is stored as one column per supported language (`title_tj`,
//! `title_ru`, `title_en`). A [`FieldTable`] maps each logical name to one
//! typed accessor per [`Language`], so a table cannot be missing a language
//! and a lookup can never fault at request time: [`FieldTable::resolve`] is
//! total and returns `None` for an unknown logical name.

use crate::database::Entity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Tj,
    Ru,
    En,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Tj, Language::Ru, Language::En];

    pub fn tag(self) -> &'static str {
        match self {
            Language::Tj => "Tj",
            Language::Ru => "Ru",
            Language::En => "En",
        }
    }

    fn slot(self) -> usize {
        match self {
            Language::Tj => 0,
            Language::Ru => 1,
            Language::En => 2,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = LocalizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LocalizationError::UnsupportedLanguage(s.to_string()))
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LocalizationError {
    #[error("Unsupported language '{0}'. Supported languages: Tj, Ru, En")]
    UnsupportedLanguage(String),
    #[error("{entity} has no localized field '{field}'")]
    MissingField { entity: &'static str, field: String },
    #[error("{entity} declares localized field '{field}' more than once")]
    DuplicateField { entity: &'static str, field: &'static str },
}

/// Reads one physical column of an entity.
pub type Accessor<E> = fn(&E) -> Option<&str>;

/// Column types that can back a localized field.
pub trait FieldValue {
    fn field_value(&self) -> Option<&str>;
}

impl FieldValue for String {
    fn field_value(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl FieldValue for Option<String> {
    fn field_value(&self) -> Option<&str> {
        self.as_deref()
    }
}

pub struct LocalizedField<E> {
    name: &'static str,
    accessors: [Accessor<E>; 3],
}

impl<E> LocalizedField<E> {
    /// `accessors` are ordered Tj, Ru, En.
    pub fn new(name: &'static str, accessors: [Accessor<E>; 3]) -> Self {
        Self { name, accessors }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get<'a>(&self, entity: &'a E, language: Language) -> Option<&'a str> {
        (self.accessors[language.slot()])(entity)
    }
}

/// Builds a [`LocalizedField`] from the three language columns of a struct.
///
/// ```ignore
/// localized_field!(News, "Title", title_tj, title_ru, title_en)
/// ```
#[macro_export]
macro_rules! localized_field {
    ($entity:ty, $name:literal, $tj:ident, $ru:ident, $en:ident) => {
        $crate::localization::LocalizedField::<$entity>::new(
            $name,
            [
                {
                    fn tj(e: &$entity) -> Option<&str> {
                        $crate::localization::FieldValue::field_value(&e.$tj)
                    }
                    tj as $crate::localization::Accessor<$entity>
                },
                {
                    fn ru(e: &$entity) -> Option<&str> {
                        $crate::localization::FieldValue::field_value(&e.$ru)
                    }
                    ru as $crate::localization::Accessor<$entity>
                },
                {
                    fn en(e: &$entity) -> Option<&str> {
                        $crate::localization::FieldValue::field_value(&e.$en)
                    }
                    en as $crate::localization::Accessor<$entity>
                },
            ],
        )
    };
}

pub struct FieldTable<E> {
    entity: &'static str,
    fields: Vec<LocalizedField<E>>,
}

impl<E> FieldTable<E> {
    pub fn new(entity: &'static str, fields: Vec<LocalizedField<E>>) -> Self {
        Self { entity, fields }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(LocalizedField::name)
    }

    /// Value of `field` in `language`, or `None` when the entity has no such
    /// logical field or the column is null.
    pub fn resolve<'a>(&self, entity: &'a E, field: &str, language: Language) -> Option<&'a str> {
        self.fields
            .iter()
            .find(|f| f.name == field)
            .and_then(|f| f.get(entity, language))
    }

    /// Fails if any of `required` is missing or a name is declared twice.
    pub fn ensure(&self, required: &[&str]) -> Result<(), LocalizationError> {
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(LocalizationError::DuplicateField { entity: self.entity, field: field.name });
            }
        }

        match required.iter().find(|name| !self.fields.iter().any(|f| f.name == **name)) {
            Some(missing) => Err(LocalizationError::MissingField {
                entity: self.entity,
                field: missing.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// A content row whose translatable columns are described by a [`FieldTable`].
pub trait LocalizedEntity: Entity {
    /// Singular display name used in envelope messages ("News not found").
    const NAME: &'static str;
    /// Logical fields the view reads; checked against the table at startup.
    const LOCALIZED_FIELDS: &'static [&'static str];

    type View: Serialize + Send;

    fn field_table() -> &'static FieldTable<Self>;

    fn view(&self, language: Language) -> Self::View;

    /// Relative URLs of every stored file this row references.
    fn media_urls(&self) -> Vec<String>;

    /// Resolved value with an empty-string fallback.
    fn localized(&self, field: &str, language: Language) -> String {
        Self::field_table()
            .resolve(self, field, language)
            .unwrap_or_default()
            .to_string()
    }
}

pub fn verify<E: LocalizedEntity>() -> Result<(), LocalizationError> {
    E::field_table().ensure(E::LOCALIZED_FIELDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Card {
        caption_tj: String,
        caption_ru: String,
        caption_en: String,
        note_tj: Option<String>,
        note_ru: Option<String>,
        note_en: Option<String>,
    }

    fn table() -> FieldTable<Card> {
        FieldTable::new(
            "Card",
            vec![
                localized_field!(Card, "Caption", caption_tj, caption_ru, caption_en),
                localized_field!(Card, "Note", note_tj, note_ru, note_en),
            ],
        )
    }

    fn card() -> Card {
        Card {
            caption_tj: "Сарлавҳа".to_string(),
            caption_ru: "Заголовок".to_string(),
            caption_en: "Caption".to_string(),
            note_tj: None,
            note_ru: Some("Заметка".to_string()),
            note_en: None,
        }
    }

    #[test]
    fn test_language_parsing_is_case_insensitive() {
        assert_eq!("En".parse::<Language>().unwrap(), Language::En);
        assert_eq!("ru".parse::<Language>().unwrap(), Language::Ru);
        assert_eq!(" TJ ".parse::<Language>().unwrap(), Language::Tj);
        assert_eq!(
            "de".parse::<Language>(),
            Err(LocalizationError::UnsupportedLanguage("de".to_string()))
        );
    }

    #[test]
    fn test_resolve_picks_language_column() {
        let table = table();
        let card = card();

        assert_eq!(table.resolve(&card, "Caption", Language::Tj), Some("Сарлавҳа"));
        assert_eq!(table.resolve(&card, "Caption", Language::Ru), Some("Заголовок"));
        assert_eq!(table.resolve(&card, "Caption", Language::En), Some("Caption"));
        assert_eq!(table.resolve(&card, "Note", Language::Ru), Some("Заметка"));
    }

    #[test]
    fn test_resolve_is_total() {
        let table = table();
        let card = card();

        // Null column and unknown logical name both come back as None.
        assert_eq!(table.resolve(&card, "Note", Language::En), None);
        assert_eq!(table.resolve(&card, "Body", Language::En), None);
        assert_eq!(table.resolve(&card, "caption", Language::En), None);
    }

    #[test]
    fn test_ensure_reports_missing_and_duplicate_fields() {
        let table = table();
        assert!(table.ensure(&["Caption", "Note"]).is_ok());
        assert_eq!(
            table.ensure(&["Caption", "Body"]),
            Err(LocalizationError::MissingField { entity: "Card", field: "Body".to_string() })
        );

        let doubled = FieldTable::new(
            "Card",
            vec![
                localized_field!(Card, "Caption", caption_tj, caption_ru, caption_en),
                localized_field!(Card, "Caption", caption_tj, caption_ru, caption_en),
            ],
        );
        assert_eq!(
            doubled.ensure(&[]),
            Err(LocalizationError::DuplicateField { entity: "Card", field: "Caption" })
        );
    }

    #[test]
    fn test_field_names_keep_declaration_order() {
        let names: Vec<_> = table().field_names().collect();
        assert_eq!(names, vec!["Caption", "Note"]);
    }
}
