use crate::api::extract::ApiJson;
use crate::api::response::ApiResponse;
use crate::auth::extractors::{AppState, AuthenticatedUser};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::AuthError;
use crate::models::user::{User, UserRole};
use crate::repositories::user_repository::UserRepository;
use anyhow::Result;
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Body of both `/register` and the one-time `/setup`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetupCheckResponse {
    pub needs_setup: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub active: bool,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self { id: user.id, username: user.username, email: user.email, role: user.role, active: user.active }
    }
}

pub async fn create_router() -> Result<Router<AppState>> {
    let router = Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/profile", get(get_profile))
        .route("/setup/check", get(check_setup))
        .route("/setup", post(initial_setup));

    Ok(router)
}

async fn login(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<ApiResponse<AuthResponse>, AuthError> {
    req.validate().map_err(|_| AuthError::InvalidCredentials)?;

    let user_repo = UserRepository::new(app_state.database.pool().clone());
    let user = user_repo
        .find_by_username(&req.username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !user.active {
        return Err(AuthError::UserInactive);
    }

    let is_valid = verify_password(&req.password, &user.password_hash).map_err(|_| AuthError::InvalidCredentials)?;
    if !is_valid {
        warn!("Failed login attempt for {}", req.username);
        return Err(AuthError::InvalidCredentials);
    }

    issue_token(&app_state, user)
}

async fn register(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<ApiResponse<AuthResponse>, AuthError> {
    req.validate()?;

    let user_repo = UserRepository::new(app_state.database.pool().clone());
    let user = create_user(&user_repo, req, UserRole::User).await?;
    info!("Registered user {}", user.username);

    issue_token(&app_state, user)
}

async fn get_profile(auth_user: AuthenticatedUser) -> ApiResponse<UserInfo> {
    ApiResponse::ok(UserInfo::from(auth_user.user))
}

async fn check_setup(State(app_state): State<AppState>) -> Result<ApiResponse<SetupCheckResponse>, AuthError> {
    let user_repo = UserRepository::new(app_state.database.pool().clone());
    let user_count = user_repo.count_users().await?;

    Ok(ApiResponse::ok(SetupCheckResponse { needs_setup: user_count == 0 }))
}

/// Creates the first administrator. Refused once any user exists.
async fn initial_setup(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<ApiResponse<AuthResponse>, AuthError> {
    req.validate()?;

    let user_repo = UserRepository::new(app_state.database.pool().clone());
    if user_repo.count_users().await? > 0 {
        return Err(AuthError::Forbidden("Setup already completed".to_string()));
    }

    let user = create_user(&user_repo, req, UserRole::Admin).await?;
    info!("Initial administrator {} created", user.username);

    issue_token(&app_state, user)
}

async fn create_user(user_repo: &UserRepository, req: RegisterRequest, role: UserRole) -> Result<User, AuthError> {
    if user_repo.find_by_username(&req.username).await?.is_some() {
        return Err(AuthError::UsernameExists);
    }
    if user_repo.find_by_email(&req.email).await?.is_some() {
        return Err(AuthError::EmailExists);
    }

    let password_hash = hash_password(&req.password).map_err(|e| AuthError::DatabaseError(e.to_string()))?;
    let now = chrono::Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        username: req.username,
        email: req.email,
        password_hash,
        role,
        active: true,
        created_at: now,
        updated_at: now,
    };

    Ok(user_repo.create_user(&user).await?)
}

fn issue_token(app_state: &AppState, user: User) -> Result<ApiResponse<AuthResponse>, AuthError> {
    let token = app_state
        .jwt_service
        .create_token_for_user(&user)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    Ok(ApiResponse::ok(AuthResponse { token, user: UserInfo::from(user) }))
}
