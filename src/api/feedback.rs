use crate::api::extract::{ApiJson, ApiPath, ApiQuery, LanguageQuery};
use crate::api::orphan_ledger;
use crate::api::response::{ApiResponse, PagedResponse};
use crate::auth::extractors::{AdminUser, AppState};
use crate::localization::Language;
use crate::models::{Feedback, FeedbackView};
use crate::repositories::FeedbackRepository;
use crate::services::error::{ServiceError, ServiceResult};
use crate::services::pagination::PageFilter;
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
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct FeedbackListQuery {
    pub language: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackRequest {
    /// Required on update, ignored on create.
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    pub text_tj: Option<String>,
    pub text_ru: Option<String>,
    pub text_en: Option<String>,
}

impl FeedbackRequest {
    fn check(&self) -> ServiceResult<()> {
        self.validate()?;
        let has_text = [&self.text_tj, &self.text_ru, &self.text_en]
            .iter()
            .any(|text| text.as_deref().is_some_and(|t| !t.trim().is_empty()));
        if !has_text {
            return Err(ServiceError::Validation("Feedback text is required in at least one language".to_string()));
        }
        Ok(())
    }

    fn into_feedback(self) -> Feedback {
        Feedback {
            id: 0,
            full_name: self.full_name,
            text_tj: self.text_tj,
            text_ru: self.text_ru,
            text_en: self.text_en,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn apply(self, feedback: &mut Feedback) {
        feedback.full_name = self.full_name;
        feedback.text_tj = self.text_tj;
        feedback.text_ru = self.text_ru;
        feedback.text_en = self.text_en;
    }
}

pub async fn create_router() -> Result<Router<AppState>> {
    let router = Router::new()
        .route("/", get(list_feedback).post(create_feedback).put(update_feedback))
        .route("/{id}", get(get_feedback).delete(delete_feedback));

    Ok(router)
}

fn service(state: &AppState) -> ContentService<FeedbackRepository> {
    ContentService::new(
        FeedbackRepository::new(state.database.pool().clone()),
        state.media.clone(),
        orphan_ledger(state),
    )
}

async fn list_feedback(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<FeedbackListQuery>,
) -> ServiceResult<PagedResponse<FeedbackView>> {
    let language = LanguageQuery { language: query.language }.resolve(Language::Ru)?;
    let filter = PageFilter { page_number: query.page_number, page_size: query.page_size };

    let page = service(&state).page(filter, language).await?;
    Ok(PagedResponse::from(page))
}

async fn get_feedback(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<LanguageQuery>,
) -> ServiceResult<ApiResponse<FeedbackView>> {
    let language = query.resolve(Language::Ru)?;
    Ok(ApiResponse::ok(service(&state).get(id, language).await?))
}

/// Public: visitors leave feedback without an account.
async fn create_feedback(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<FeedbackRequest>,
) -> ServiceResult<ApiResponse<()>> {
    request.check()?;

    service(&state)
        .create(Vec::new(), |_| request.into_feedback())
        .await?;

    Ok(ApiResponse::message(StatusCode::CREATED, "Feedback created"))
}

async fn update_feedback(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiJson(request): ApiJson<FeedbackRequest>,
) -> ServiceResult<ApiResponse<()>> {
    request.check()?;
    let id = request
        .id
        .ok_or_else(|| ServiceError::Validation("id is required".to_string()))?;

    service(&state)
        .update(id, Vec::new(), |feedback, _| request.apply(feedback))
        .await?;

    Ok(ApiResponse::message(StatusCode::OK, "Feedback updated"))
}

async fn delete_feedback(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<ApiResponse<()>> {
    service(&state).delete(id).await?;
    Ok(ApiResponse::message(StatusCode::OK, "Feedback deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text_ru: Option<&str>) -> FeedbackRequest {
        FeedbackRequest {
            id: None,
            full_name: "Ali".to_string(),
            text_tj: None,
            text_ru: text_ru.map(str::to_string),
            text_en: None,
        }
    }

    #[test]
    fn test_feedback_needs_text_in_some_language() {
        assert!(request(Some("Спасибо")).check().is_ok());
        assert!(matches!(request(Some("  ")).check(), Err(ServiceError::Validation(_))));
        assert!(matches!(request(None).check(), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn test_feedback_needs_a_name() {
        let mut request = request(Some("Спасибо"));
        request.full_name = String::new();
        assert!(matches!(request.check(), Err(ServiceError::Validation(_))));
    }
}
