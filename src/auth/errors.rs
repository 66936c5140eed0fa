use crate::api::response::ApiResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingAuthHeader,
    #[error("Invalid authorization header format")]
    InvalidAuthHeader,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Insufficient permissions")]
    InsufficientPermissions,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User is inactive")]
    UserInactive,
    #[error("Username already exists")]
    UsernameExists,
    #[error("Email already exists")]
    EmailExists,
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("{0}")]
    Validation(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::InvalidToken(_)
            | AuthError::TokenExpired
            | AuthError::InvalidCredentials
            | AuthError::UserNotFound
            | AuthError::UserInactive => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientPermissions | AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthError::UsernameExists | AuthError::EmailExists => StatusCode::CONFLICT,
            AuthError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(err: validator::ValidationErrors) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match &self {
            AuthError::MissingAuthHeader | AuthError::InvalidAuthHeader => {
                "Missing or invalid authorization header".to_string()
            }
            AuthError::InvalidToken(_) | AuthError::TokenExpired => "Invalid or expired token".to_string(),
            AuthError::InvalidCredentials => "Invalid username or password".to_string(),
            AuthError::UserInactive => "User account is inactive".to_string(),
            AuthError::DatabaseError(e) => {
                error!("Authentication failed on database access: {}", e);
                "Internal server error".to_string()
            }
            AuthError::Forbidden(msg) => msg.clone(),
            other => other.to_string(),
        };

        ApiResponse::<()>::failure(self.status(), message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::MissingAuthHeader.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::TokenExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InsufficientPermissions.status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::EmailExists.status(), StatusCode::CONFLICT);
        assert_eq!(AuthError::DatabaseError("down".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_response_uses_envelope_status() {
        let response = AuthError::InsufficientPermissions.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
