//! Extractors whose rejections are rendered through the response envelope.

use crate::localization::Language;
use crate::services::error::ServiceError;
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ServiceError::Validation(e.body_text()))?;
        Ok(ApiQuery(value))
    }
}

pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ServiceError::Validation(e.body_text()))?;
        Ok(ApiPath(value))
    }
}

pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ServiceError::Validation(e.body_text()))?;
        Ok(ApiJson(value))
    }
}

/// `?language=Tj|Ru|En`, case-insensitive.
#[derive(Debug, Default, Deserialize)]
pub struct LanguageQuery {
    pub language: Option<String>,
}

impl LanguageQuery {
    /// The requested language, `default` when the parameter is absent or blank.
    pub fn resolve(&self, default: Language) -> Result<Language, ServiceError> {
        match self.language.as_deref().map(str::trim) {
            None | Some("") => Ok(default),
            Some(tag) => Ok(tag.parse()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(language: Option<&str>) -> LanguageQuery {
        LanguageQuery { language: language.map(str::to_string) }
    }

    #[test]
    fn test_language_defaults_when_absent() {
        assert_eq!(query(None).resolve(Language::En).unwrap(), Language::En);
        assert_eq!(query(Some("")).resolve(Language::Ru).unwrap(), Language::Ru);
    }

    #[test]
    fn test_unknown_language_is_a_validation_error() {
        assert_eq!(query(Some("tj")).resolve(Language::En).unwrap(), Language::Tj);
        let err = query(Some("fr")).resolve(Language::En).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
