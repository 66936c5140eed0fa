use crate::api::extract::{ApiPath, ApiQuery, LanguageQuery};
use crate::api::form::FormData;
use crate::api::orphan_ledger;
use crate::api::response::ApiResponse;
use crate::auth::extractors::{AdminUser, AppState};
use crate::localization::Language;
use crate::models::{ChooseUs, ChooseUsView};
use crate::repositories::ChooseUsRepository;
use crate::services::error::ServiceResult;
use crate::services::media::{MediaCategory, MediaUpload};
use crate::services::ContentService;
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use chrono::Utc;

struct ChooseUsText {
    title: [String; 3],
    description: [String; 3],
}

impl ChooseUsText {
    fn from_form(form: &FormData) -> ServiceResult<Self> {
        Ok(Self {
            title: [form.required("title_tj")?, form.required("title_ru")?, form.required("title_en")?],
            description: [
                form.required("description_tj")?,
                form.required("description_ru")?,
                form.required("description_en")?,
            ],
        })
    }

    fn into_block(self, icon_path: Option<String>) -> ChooseUs {
        let [title_tj, title_ru, title_en] = self.title;
        let [description_tj, description_ru, description_en] = self.description;
        ChooseUs {
            id: 0,
            title_tj,
            title_ru,
            title_en,
            description_tj,
            description_ru,
            description_en,
            icon_path,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn apply(self, block: &mut ChooseUs) {
        let [title_tj, title_ru, title_en] = self.title;
        let [description_tj, description_ru, description_en] = self.description;
        block.title_tj = title_tj;
        block.title_ru = title_ru;
        block.title_en = title_en;
        block.description_tj = description_tj;
        block.description_ru = description_ru;
        block.description_en = description_en;
    }
}

pub async fn create_router() -> Result<Router<AppState>> {
    let router = Router::new()
        .route("/", get(list_blocks).post(create_block).put(update_block))
        .route("/{id}", get(get_block).delete(delete_block));

    Ok(router)
}

fn service(state: &AppState) -> ContentService<ChooseUsRepository> {
    ContentService::new(
        ChooseUsRepository::new(state.database.pool().clone()),
        state.media.clone(),
        orphan_ledger(state),
    )
}

async fn list_blocks(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LanguageQuery>,
) -> ServiceResult<ApiResponse<Vec<ChooseUsView>>> {
    let language = query.resolve(Language::En)?;
    Ok(ApiResponse::ok(service(&state).list(language).await?))
}

async fn get_block(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<LanguageQuery>,
) -> ServiceResult<ApiResponse<ChooseUsView>> {
    let language = query.resolve(Language::En)?;
    Ok(ApiResponse::ok(service(&state).get(id, language).await?))
}

async fn create_block(
    State(state): State<AppState>,
    _admin: AdminUser,
    form: FormData,
) -> ServiceResult<ApiResponse<()>> {
    let text = ChooseUsText::from_form(&form)?;
    let uploads = vec![MediaUpload::new(MediaCategory::ChooseUs, form.file("icon"))];

    service(&state)
        .create(uploads, |stored| text.into_block(stored.into_iter().next().map(|media| media.url)))
        .await?;

    Ok(ApiResponse::message(StatusCode::CREATED, "ChooseUs created"))
}

async fn update_block(
    State(state): State<AppState>,
    _admin: AdminUser,
    form: FormData,
) -> ServiceResult<ApiResponse<()>> {
    let id = form.id()?;
    let text = ChooseUsText::from_form(&form)?;
    let uploads: Vec<MediaUpload> = form
        .replacement("icon")
        .map(|file| MediaUpload::new(MediaCategory::ChooseUs, file))
        .into_iter()
        .collect();

    service(&state)
        .update(id, uploads, |block, stored| {
            text.apply(block);
            if let Some(media) = stored.into_iter().next() {
                block.icon_path = Some(media.url);
            }
        })
        .await?;

    Ok(ApiResponse::message(StatusCode::OK, "ChooseUs updated"))
}

async fn delete_block(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<()>> {
    service(&state).delete(id).await?;
    Ok(ApiResponse::message(StatusCode::OK, "ChooseUs deleted"))
}
