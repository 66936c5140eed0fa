use crate::api::extract::{ApiPath, ApiQuery, LanguageQuery};
use crate::api::form::FormData;
use crate::api::orphan_ledger;
use crate::api::response::ApiResponse;
use crate::auth::extractors::{AdminUser, AppState};
use crate::localization::Language;
use crate::models::{Branch, BranchView};
use crate::repositories::BranchRepository;
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

struct BranchText {
    name: [String; 3],
    address: [String; 3],
    phone_number: String,
}

impl BranchText {
    fn from_form(form: &FormData) -> ServiceResult<Self> {
        Ok(Self {
            name: [form.required("name_tj")?, form.required("name_ru")?, form.required("name_en")?],
            address: [form.required("address_tj")?, form.required("address_ru")?, form.required("address_en")?],
            phone_number: form.required("phone_number")?,
        })
    }

    fn into_branch(self, image_path: Option<String>) -> Branch {
        let [name_tj, name_ru, name_en] = self.name;
        let [address_tj, address_ru, address_en] = self.address;
        Branch {
            id: 0,
            name_tj,
            name_ru,
            name_en,
            address_tj,
            address_ru,
            address_en,
            phone_number: self.phone_number,
            image_path,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn apply(self, branch: &mut Branch) {
        let [name_tj, name_ru, name_en] = self.name;
        let [address_tj, address_ru, address_en] = self.address;
        branch.name_tj = name_tj;
        branch.name_ru = name_ru;
        branch.name_en = name_en;
        branch.address_tj = address_tj;
        branch.address_ru = address_ru;
        branch.address_en = address_en;
        branch.phone_number = self.phone_number;
    }
}

pub async fn create_router() -> Result<Router<AppState>> {
    let router = Router::new()
        .route("/", get(list_branches).post(create_branch).put(update_branch))
        .route("/{id}", get(get_branch).delete(delete_branch));

    Ok(router)
}

fn service(state: &AppState) -> ContentService<BranchRepository> {
    ContentService::new(
        BranchRepository::new(state.database.pool().clone()),
        state.media.clone(),
        orphan_ledger(state),
    )
}

async fn list_branches(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LanguageQuery>,
) -> ServiceResult<ApiResponse<Vec<BranchView>>> {
    let language = query.resolve(Language::En)?;
    Ok(ApiResponse::ok(service(&state).list(language).await?))
}

async fn get_branch(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<LanguageQuery>,
) -> ServiceResult<ApiResponse<BranchView>> {
    let language = query.resolve(Language::En)?;
    Ok(ApiResponse::ok(service(&state).get(id, language).await?))
}

async fn create_branch(
    State(state): State<AppState>,
    _admin: AdminUser,
    form: FormData,
) -> ServiceResult<ApiResponse<()>> {
    let text = BranchText::from_form(&form)?;
    let uploads = vec![MediaUpload::new(MediaCategory::Branch, form.file("image"))];

    service(&state)
        .create(uploads, |stored| text.into_branch(stored.into_iter().next().map(|media| media.url)))
        .await?;

    Ok(ApiResponse::message(StatusCode::CREATED, "Branch created"))
}

async fn update_branch(
    State(state): State<AppState>,
    _admin: AdminUser,
    form: FormData,
) -> ServiceResult<ApiResponse<()>> {
    let id = form.id()?;
    let text = BranchText::from_form(&form)?;
    let uploads: Vec<MediaUpload> = form
        .replacement("image")
        .map(|file| MediaUpload::new(MediaCategory::Branch, file))
        .into_iter()
        .collect();

    service(&state)
        .update(id, uploads, |branch, stored| {
            text.apply(branch);
            if let Some(media) = stored.into_iter().next() {
                branch.image_path = Some(media.url);
            }
        })
        .await?;

    Ok(ApiResponse::message(StatusCode::OK, "Branch updated"))
}

async fn delete_branch(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<()>> {
    service(&state).delete(id).await?;
    Ok(ApiResponse::message(StatusCode::OK, "Branch deleted"))
}
