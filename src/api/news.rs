use crate::api::extract::{ApiJson, ApiPath, ApiQuery, LanguageQuery};
use crate::api::form::FormData;
use crate::api::orphan_ledger;
use crate::api::response::ApiResponse;
use crate::auth::extractors::{AdminUser, AppState, AuthenticatedUser};
use crate::localization::Language;
use crate::models::{Comment, News, NewsView};
use crate::repositories::{CommentRepository, NewsRepository};
use crate::services::error::{ServiceError, ServiceResult};
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
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Per-language text of a news item as posted in a form.
struct NewsText {
    title: [String; 3],
    content: [String; 3],
}

impl NewsText {
    fn from_form(form: &FormData) -> ServiceResult<Self> {
        Ok(Self {
            title: [form.required("title_tj")?, form.required("title_ru")?, form.required("title_en")?],
            content: [form.required("content_tj")?, form.required("content_ru")?, form.required("content_en")?],
        })
    }

    fn into_news(self, user_id: Uuid, media_url: Option<String>) -> News {
        let [title_tj, title_ru, title_en] = self.title;
        let [content_tj, content_ru, content_en] = self.content;
        News {
            id: 0,
            title_tj,
            title_ru,
            title_en,
            content_tj,
            content_ru,
            content_en,
            user_id,
            media_url,
            like_count: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn apply(self, news: &mut News) {
        let [title_tj, title_ru, title_en] = self.title;
        let [content_tj, content_ru, content_en] = self.content;
        news.title_tj = title_tj;
        news.title_ru = title_ru;
        news.title_en = title_en;
        news.content_tj = content_tj;
        news.content_ru = content_ru;
        news.content_en = content_en;
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
}

pub async fn create_router() -> Result<Router<AppState>> {
    let router = Router::new()
        .route("/", get(list_news).post(create_news).put(update_news))
        .route("/{id}", get(get_news).delete(delete_news))
        .route("/{id}/comments", get(list_comments).post(create_comment));

    Ok(router)
}

fn service(state: &AppState) -> ContentService<NewsRepository> {
    ContentService::new(
        NewsRepository::new(state.database.pool().clone()),
        state.media.clone(),
        orphan_ledger(state),
    )
}

async fn list_news(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LanguageQuery>,
) -> ServiceResult<ApiResponse<Vec<NewsView>>> {
    let language = query.resolve(Language::En)?;
    Ok(ApiResponse::ok(service(&state).list(language).await?))
}

async fn get_news(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<LanguageQuery>,
) -> ServiceResult<ApiResponse<NewsView>> {
    let language = query.resolve(Language::En)?;
    Ok(ApiResponse::ok(service(&state).get(id, language).await?))
}

async fn create_news(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    form: FormData,
) -> ServiceResult<ApiResponse<()>> {
    let text = NewsText::from_form(&form)?;
    let uploads = vec![MediaUpload::new(MediaCategory::News, form.file("media"))];
    let author = admin.user.id;

    service(&state)
        .create(uploads, |stored| text.into_news(author, stored.into_iter().next().map(|media| media.url)))
        .await?;

    Ok(ApiResponse::message(StatusCode::CREATED, "News created"))
}

async fn update_news(
    State(state): State<AppState>,
    _admin: AdminUser,
    form: FormData,
) -> ServiceResult<ApiResponse<()>> {
    let id = form.id()?;
    let text = NewsText::from_form(&form)?;
    let uploads: Vec<MediaUpload> = form
        .replacement("media")
        .map(|file| MediaUpload::new(MediaCategory::News, file))
        .into_iter()
        .collect();

    service(&state)
        .update(id, uploads, |news, stored| {
            text.apply(news);
            if let Some(media) = stored.into_iter().next() {
                news.media_url = Some(media.url);
            }
        })
        .await?;

    Ok(ApiResponse::message(StatusCode::OK, "News updated"))
}

async fn delete_news(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<()>> {
    service(&state).delete(id).await?;
    Ok(ApiResponse::message(StatusCode::OK, "News deleted"))
}

async fn list_comments(
    State(state): State<AppState>,
    ApiPath(news_id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<Vec<Comment>>> {
    let pool = state.database.pool().clone();
    if !NewsRepository::new(pool.clone()).exists(news_id).await? {
        return Err(ServiceError::NotFound("News"));
    }

    let comments = CommentRepository::new(pool).list_for_news(news_id).await?;
    Ok(ApiResponse::ok(comments))
}

async fn create_comment(
    State(state): State<AppState>,
    ApiPath(news_id): ApiPath<i64>,
    auth_user: AuthenticatedUser,
    ApiJson(request): ApiJson<CreateCommentRequest>,
) -> ServiceResult<ApiResponse<Comment>> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(ServiceError::Validation("text is required".to_string()));
    }
    request.validate()?;

    let pool = state.database.pool().clone();
    if !NewsRepository::new(pool.clone()).exists(news_id).await? {
        return Err(ServiceError::NotFound("News"));
    }

    let comment = CommentRepository::new(pool).create(news_id, auth_user.user.id, text).await?;
    info!("User {} commented on news {}", auth_user.user.username, news_id);

    Ok(ApiResponse::created(comment))
}
