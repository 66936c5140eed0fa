use crate::auth::{claims::TokenClaims, errors::AuthError, jwt::JwtService};
use crate::config::AppConfig;
use crate::database::Database;
use crate::models::user::{User, UserRole};
use crate::repositories::user_repository::UserRepository;
use crate::services::media::MediaStore;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::{debug, warn};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub jwt_service: JwtService,
    pub media: MediaStore,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(database: Database, jwt_service: JwtService, config: AppConfig) -> Self {
        let media = MediaStore::new(&config.uploads);
        Self { database, jwt_service, media, config }
    }
}

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub claims: TokenClaims,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_token_from_auth_header(&parts.headers)?;
        extract_authenticated_user(state, &token).await
    }
}

/// Authenticated user holding the `Admin` role. Every content mutation
/// requires one.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_token_from_auth_header(&parts.headers)?;

        // The role claim is checked before touching the database.
        let claims = decode_claims(state, &token)?;
        if claims.role != UserRole::Admin {
            warn!("User {} attempted to access admin endpoint without admin role", claims.username);
            return Err(AuthError::InsufficientPermissions);
        }

        let auth_user = load_user(state, claims).await?;
        if auth_user.user.role != UserRole::Admin {
            warn!("User {} lost the admin role since the token was issued", auth_user.user.username);
            return Err(AuthError::InsufficientPermissions);
        }

        debug!("AdminUser extracted successfully for user: {}", auth_user.user.username);
        Ok(AdminUser(auth_user))
    }
}

fn extract_token_from_auth_header(headers: &axum::http::HeaderMap) -> Result<String, AuthError> {
    let auth_header = headers
        .get("authorization")
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    if let Some(token) = auth_header.strip_prefix("Bearer ") {
        Ok(token.to_string())
    } else {
        Err(AuthError::InvalidAuthHeader)
    }
}

fn decode_claims(state: &AppState, token: &str) -> Result<TokenClaims, AuthError> {
    let claims = state.jwt_service.decode_token(token).map_err(|e| {
        warn!("Rejected bearer token: {}", e);
        AuthError::InvalidToken(e.to_string())
    })?;

    if claims.is_expired() {
        warn!("Token expired for user ID: {}", claims.sub);
        return Err(AuthError::TokenExpired);
    }

    Ok(claims)
}

async fn load_user(state: &AppState, claims: TokenClaims) -> Result<AuthenticatedUser, AuthError> {
    let user_repo = UserRepository::new(state.database.pool().clone());
    let user = user_repo.get_user(claims.sub).await?.ok_or_else(|| {
        warn!("User not found for ID: {}", claims.sub);
        AuthError::UserNotFound
    })?;

    if !user.active {
        warn!("Inactive user attempted to authenticate: {}", user.username);
        return Err(AuthError::UserInactive);
    }

    debug!("AuthenticatedUser extracted successfully: {}", user.username);
    Ok(AuthenticatedUser { user, claims })
}

async fn extract_authenticated_user(state: &AppState, token: &str) -> Result<AuthenticatedUser, AuthError> {
    let claims = decode_claims(state, token)?;
    load_user(state, claims).await
}
