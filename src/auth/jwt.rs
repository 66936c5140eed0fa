use crate::auth::claims::TokenClaims;
use crate::config::AuthConfig;
use crate::models::User;
use anyhow::Result;
use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: Duration,
}

impl JwtService {
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let secret = config.jwt_secret.as_bytes();

        // "24h", "1d", "60m", "30s"; a bare number means hours
        let expires_in = Self::parse_duration(&config.jwt_expires_in)?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            expires_in,
        })
    }

    pub fn encode_token(&self, claims: &TokenClaims) -> Result<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to encode JWT: {}", e))
    }

    pub fn decode_token(&self, token: &str) -> Result<TokenClaims> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| anyhow::anyhow!("Failed to decode JWT: {}", e))
    }

    pub fn create_token_for_user(&self, user: &User) -> Result<String> {
        let claims = TokenClaims::new(user.id, user.username.clone(), user.role, self.expires_in);
        self.encode_token(&claims)
    }

    fn parse_duration(duration_str: &str) -> Result<Duration> {
        let value = duration_str.trim();
        if let Some(hours) = value.strip_suffix('h') {
            Ok(Duration::hours(hours.parse()?))
        } else if let Some(days) = value.strip_suffix('d') {
            Ok(Duration::days(days.parse()?))
        } else if let Some(minutes) = value.strip_suffix('m') {
            Ok(Duration::minutes(minutes.parse()?))
        } else if let Some(seconds) = value.strip_suffix('s') {
            Ok(Duration::seconds(seconds.parse()?))
        } else {
            Ok(Duration::hours(value.parse()?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use chrono::Utc;
    use uuid::Uuid;

    fn service(expires_in: &str) -> JwtService {
        JwtService::new(&AuthConfig { jwt_secret: "test-secret".to_string(), jwt_expires_in: expires_in.to_string() })
            .unwrap()
    }

    fn admin() -> User {
        User {
            id: Uuid::new_v4(),
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: String::new(),
            role: UserRole::Admin,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(JwtService::parse_duration("24h").unwrap(), Duration::hours(24));
        assert_eq!(JwtService::parse_duration("7d").unwrap(), Duration::days(7));
        assert_eq!(JwtService::parse_duration("90m").unwrap(), Duration::minutes(90));
        assert_eq!(JwtService::parse_duration("30s").unwrap(), Duration::seconds(30));
        assert_eq!(JwtService::parse_duration("2").unwrap(), Duration::hours(2));
        assert!(JwtService::parse_duration("soon").is_err());
    }

    #[test]
    fn test_token_round_trip_keeps_role() {
        let jwt = service("1h");
        let user = admin();

        let token = jwt.create_token_for_user(&user).unwrap();
        let claims = jwt.decode_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, UserRole::Admin);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = service("1h").create_token_for_user(&admin()).unwrap();
        let other = JwtService::new(&AuthConfig {
            jwt_secret: "another-secret".to_string(),
            jwt_expires_in: "1h".to_string(),
        })
        .unwrap();

        assert!(other.decode_token(&token).is_err());
    }
}
