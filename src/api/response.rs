//! Uniform response envelope.
//!
//! Every endpoint answers `{ "status_code", "message", "data" }`, and the HTTP
//! status always equals `status_code`. `data` is only populated on success.

use crate::services::pagination::Page;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { status_code: StatusCode::OK.as_u16(), message: None, data: Some(data) }
    }

    pub fn created(data: T) -> Self {
        Self { status_code: StatusCode::CREATED.as_u16(), message: None, data: Some(data) }
    }

    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status_code: status.as_u16(), message: Some(message.into()), data: None }
    }
}

impl ApiResponse<()> {
    /// Success without a payload, e.g. "News created".
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status_code: status.as_u16(), message: Some(message.into()), data: None }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Envelope for paginated listings.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T> {
    pub status_code: u16,
    pub message: Option<String>,
    pub data: Option<Vec<T>>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_records: i64,
}

impl<T: Serialize> From<Page<T>> for PagedResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            message: None,
            page_number: page.page_number,
            page_size: page.page_size,
            total_pages: page.total_pages(),
            total_records: page.total_records,
            data: Some(page.items),
        }
    }
}

impl<T: Serialize> IntoResponse for PagedResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_carries_data() {
        let body = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(body, json!({ "status_code": 200, "message": null, "data": [1, 2] }));
    }

    #[test]
    fn test_failure_envelope_has_no_data() {
        let body = serde_json::to_value(ApiResponse::<Vec<i32>>::failure(StatusCode::NOT_FOUND, "News not found"))
            .unwrap();
        assert_eq!(body, json!({ "status_code": 404, "message": "News not found", "data": null }));
    }

    #[test]
    fn test_paged_envelope_reports_page_metadata() {
        let page = Page { items: vec!["a", "b"], page_number: 2, page_size: 2, total_records: 5 };
        let body = serde_json::to_value(PagedResponse::from(page)).unwrap();
        assert_eq!(body["total_pages"], 3);
        assert_eq!(body["page_number"], 2);
        assert_eq!(body["total_records"], 5);
        assert_eq!(body["data"], json!(["a", "b"]));
    }
}
