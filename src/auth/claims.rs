use crate::models::UserRole;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    pub sub: Uuid, // User ID (subject)
    pub username: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

impl TokenClaims {
    pub fn new(user_id: Uuid, username: String, role: UserRole, expires_in: Duration) -> Self {
        let now = Utc::now();
        Self { sub: user_id, username, role, exp: (now + expires_in).timestamp(), iat: now.timestamp() }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}
