use crate::api::extract::{ApiPath, ApiQuery, LanguageQuery};
use crate::api::form::FormData;
use crate::api::orphan_ledger;
use crate::api::response::ApiResponse;
use crate::auth::extractors::{AdminUser, AppState};
use crate::localization::Language;
use crate::models::{Colleague, ColleagueProfile, ColleagueWithIcons};
use crate::repositories::ColleagueRepository;
use crate::services::error::ServiceResult;
use crate::services::media::{MediaCategory, MediaUpload, StoredMedia};
use crate::services::ContentService;
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use chrono::Utc;

struct ColleagueText {
    first_name: [String; 3],
    last_name: [String; 3],
    about: [Option<String>; 3],
}

impl ColleagueText {
    fn from_form(form: &FormData) -> ServiceResult<Self> {
        Ok(Self {
            first_name: [
                form.required("first_name_tj")?,
                form.required("first_name_ru")?,
                form.required("first_name_en")?,
            ],
            last_name: [
                form.required("last_name_tj")?,
                form.required("last_name_ru")?,
                form.required("last_name_en")?,
            ],
            about: [form.text("about_tj"), form.text("about_ru"), form.text("about_en")],
        })
    }

    fn into_colleague(self, image_path: Option<String>, icons: Vec<String>) -> Colleague {
        let [first_name_tj, first_name_ru, first_name_en] = self.first_name;
        let [last_name_tj, last_name_ru, last_name_en] = self.last_name;
        let [about_tj, about_ru, about_en] = self.about;
        Colleague {
            id: 0,
            first_name_tj,
            first_name_ru,
            first_name_en,
            last_name_tj,
            last_name_ru,
            last_name_en,
            about_tj,
            about_ru,
            about_en,
            image_path,
            icons,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn apply(self, colleague: &mut Colleague) {
        let [first_name_tj, first_name_ru, first_name_en] = self.first_name;
        let [last_name_tj, last_name_ru, last_name_en] = self.last_name;
        let [about_tj, about_ru, about_en] = self.about;
        colleague.first_name_tj = first_name_tj;
        colleague.first_name_ru = first_name_ru;
        colleague.first_name_en = first_name_en;
        colleague.last_name_tj = last_name_tj;
        colleague.last_name_ru = last_name_ru;
        colleague.last_name_en = last_name_en;
        colleague.about_tj = about_tj;
        colleague.about_ru = about_ru;
        colleague.about_en = about_en;
    }
}

/// Splits stored uploads into the profile image and the icon URLs.
fn split_media(stored: Vec<StoredMedia>) -> (Option<String>, Vec<String>) {
    let mut image = None;
    let mut icons = Vec::new();
    for media in stored {
        match media.category {
            MediaCategory::Colleague => image = Some(media.url),
            _ => icons.push(media.url),
        }
    }
    (image, icons)
}

/// A new profile image replaces the current one; any new icons replace the
/// whole icon list. Omitted files keep the current ones.
pub fn apply_media(colleague: &mut Colleague, stored: Vec<StoredMedia>) {
    let (image_path, icons) = split_media(stored);
    if image_path.is_some() {
        colleague.image_path = image_path;
    }
    if !icons.is_empty() {
        colleague.icons = icons;
    }
}

pub async fn create_router() -> Result<Router<AppState>> {
    let router = Router::new()
        .route("/", get(list_colleagues).post(create_colleague).put(update_colleague))
        .route("/{id}", get(get_colleague).delete(delete_colleague))
        .route("/{id}/profile", get(get_profile));

    Ok(router)
}

fn service(state: &AppState) -> ContentService<ColleagueRepository> {
    ContentService::new(
        ColleagueRepository::new(state.database.pool().clone()),
        state.media.clone(),
        orphan_ledger(state),
    )
}

async fn list_colleagues(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LanguageQuery>,
) -> ServiceResult<ApiResponse<Vec<ColleagueWithIcons>>> {
    let language = query.resolve(Language::En)?;
    Ok(ApiResponse::ok(service(&state).list(language).await?))
}

async fn get_colleague(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<LanguageQuery>,
) -> ServiceResult<ApiResponse<ColleagueWithIcons>> {
    let language = query.resolve(Language::En)?;
    Ok(ApiResponse::ok(service(&state).get(id, language).await?))
}

async fn get_profile(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<LanguageQuery>,
) -> ServiceResult<ApiResponse<ColleagueProfile>> {
    let language = query.resolve(Language::En)?;
    let colleague = service(&state).find(id).await?;
    Ok(ApiResponse::ok(colleague.profile(language)))
}

async fn create_colleague(
    State(state): State<AppState>,
    _admin: AdminUser,
    form: FormData,
) -> ServiceResult<ApiResponse<()>> {
    let text = ColleagueText::from_form(&form)?;
    let mut uploads = vec![MediaUpload::new(MediaCategory::Colleague, form.file("image"))];
    uploads.extend(
        form.files("icon_files")
            .into_iter()
            .map(|file| MediaUpload::new(MediaCategory::Gallery, file)),
    );

    service(&state)
        .create(uploads, |stored| {
            let (image_path, icons) = split_media(stored);
            text.into_colleague(image_path, icons)
        })
        .await?;

    Ok(ApiResponse::message(StatusCode::CREATED, "Colleague created"))
}

async fn update_colleague(
    State(state): State<AppState>,
    _admin: AdminUser,
    form: FormData,
) -> ServiceResult<ApiResponse<()>> {
    let id = form.id()?;
    let text = ColleagueText::from_form(&form)?;
    let mut uploads: Vec<MediaUpload> = form
        .replacement("image")
        .map(|file| MediaUpload::new(MediaCategory::Colleague, file))
        .into_iter()
        .collect();
    uploads.extend(
        form.files("icon_files")
            .into_iter()
            .map(|file| MediaUpload::new(MediaCategory::Gallery, file)),
    );

    service(&state)
        .update(id, uploads, |colleague, stored| {
            text.apply(colleague);
            apply_media(colleague, stored);
        })
        .await?;

    Ok(ApiResponse::message(StatusCode::OK, "Colleague updated"))
}

async fn delete_colleague(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<()>> {
    service(&state).delete(id).await?;
    Ok(ApiResponse::message(StatusCode::OK, "Colleague deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn stored(category: MediaCategory, url: &str) -> StoredMedia {
        StoredMedia { category, url: url.to_string(), path: PathBuf::from(url) }
    }

    #[test]
    fn test_split_media_keeps_icon_order() {
        let (image, icons) = split_media(vec![
            stored(MediaCategory::Gallery, "/uploads/Gallery/1.png"),
            stored(MediaCategory::Colleague, "/uploads/Colleague/me.png"),
            stored(MediaCategory::Gallery, "/uploads/Gallery/2.png"),
        ]);

        assert_eq!(image.as_deref(), Some("/uploads/Colleague/me.png"));
        assert_eq!(icons, vec!["/uploads/Gallery/1.png", "/uploads/Gallery/2.png"]);
    }
}
