//! Multipart form bodies for the content routes.

use crate::services::error::{ServiceError, ServiceResult};
use crate::services::media::UploadedFile;
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use std::collections::HashMap;

/// A fully buffered multipart body: text fields by name and file parts by
/// name in arrival order.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, Vec<UploadedFile>>,
}

impl FormData {
    pub async fn from_multipart(mut multipart: Multipart) -> ServiceResult<Self> {
        let mut form = FormData::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ServiceError::Validation(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await.map_err(|e| ServiceError::Validation(e.body_text()))?;
                    form.add_file(name, UploadedFile::new(file_name, bytes));
                }
                None => {
                    let text = field.text().await.map_err(|e| ServiceError::Validation(e.body_text()))?;
                    form.add_text(name, text);
                }
            }
        }

        Ok(form)
    }

    pub fn add_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn add_file(&mut self, name: impl Into<String>, file: UploadedFile) {
        self.files.entry(name.into()).or_default().push(file);
    }

    /// Non-blank text field.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn required(&self, name: &str) -> ServiceResult<String> {
        self.text(name)
            .ok_or_else(|| ServiceError::Validation(format!("{} is required", name)))
    }

    pub fn id(&self) -> ServiceResult<i64> {
        self.required("id")?
            .parse()
            .map_err(|_| ServiceError::Validation("id must be an integer".to_string()))
    }

    /// First file part under `name` for a required upload. A missing part
    /// comes back as an empty file so the upload policy rejects it.
    pub fn file(&self, name: &str) -> UploadedFile {
        self.files
            .get(name)
            .and_then(|files| files.first())
            .cloned()
            .unwrap_or_else(|| UploadedFile::new("", Bytes::new()))
    }

    /// First non-empty file part under `name`; an empty part on an update
    /// means "keep the current file".
    pub fn replacement(&self, name: &str) -> Option<UploadedFile> {
        self.files
            .get(name)
            .and_then(|files| files.iter().find(|f| !f.is_empty()))
            .cloned()
    }

    /// Every non-empty file part under `name`.
    pub fn files(&self, name: &str) -> Vec<UploadedFile> {
        self.files
            .get(name)
            .map(|files| files.iter().filter(|f| !f.is_empty()).cloned().collect())
            .unwrap_or_default()
    }
}

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ServiceError::Validation(e.body_text()))?;
        Self::from_multipart(multipart).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormData {
        let mut form = FormData::default();
        form.add_text("id", " 42 ");
        form.add_text("title_en", "Hello");
        form.add_text("title_ru", "   ");
        form.add_file("icon_files", UploadedFile::new("a.png", vec![1u8]));
        form.add_file("icon_files", UploadedFile::new("empty.png", Vec::<u8>::new()));
        form.add_file("icon_files", UploadedFile::new("b.png", vec![2u8]));
        form.add_file("media", UploadedFile::new("blank.png", Vec::<u8>::new()));
        form
    }

    #[test]
    fn test_text_fields() {
        let form = form();
        assert_eq!(form.text("title_en").as_deref(), Some("Hello"));
        assert_eq!(form.text("title_ru"), None);
        assert_eq!(form.required("title_ru").unwrap_err().to_string(), "title_ru is required");
        assert_eq!(form.id().unwrap(), 42);
    }

    #[test]
    fn test_file_parts() {
        let form = form();
        let names: Vec<_> = form.files("icon_files").into_iter().map(|f| f.file_name).collect();
        assert_eq!(names, vec!["a.png", "b.png"]);

        // Empty parts count as absent on updates but still reach validation on creates.
        assert!(form.replacement("media").is_none());
        assert!(form.file("media").is_empty());
        assert!(form.file("image").is_empty());
        assert_eq!(form.file("icon_files").file_name, "a.png");
    }

    #[test]
    fn test_non_numeric_id_is_rejected() {
        let mut form = FormData::default();
        form.add_text("id", "abc");
        assert!(matches!(form.id(), Err(ServiceError::Validation(_))));
    }
}
