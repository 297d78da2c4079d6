//! 세션 토큰 서비스
//!
//! 인증 성공 후 발급되는 무상태 JWT 세션 토큰의 발급과 검증을 담당합니다.
//! 어떤 인증 방식으로 로그인했든 발급되는 토큰의 형태는 동일하며, 토큰에는
//! 어떤 방식으로 인증했는지만 기록됩니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::domain::entities::User;
use crate::domain::models::AuthType;
use crate::errors::{AppError, AppResult};

/// JWT 클레임
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// 사용자 ID
    pub sub: String,
    /// 인증에 사용된 방식
    pub provider: AuthType,
    /// 사용자 이메일
    pub email: String,
    /// 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 고유 식별자
    pub jti: String,
}

/// 발급된 토큰과 남은 유효 시간(초)
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// 세션 토큰 서비스
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
}

impl TokenService {
    pub fn new() -> Self {
        let secret = JwtConfig::secret();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration_hours: JwtConfig::expiration_hours(),
        }
    }

    /// 사용자에 대한 액세스 토큰을 발급합니다.
    pub fn issue(&self, user: &User) -> AppResult<IssuedToken> {
        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("저장되지 않은 사용자입니다".to_string()))?;

        let now = Utc::now();
        let expires_at = now + Duration::hours(self.expiration_hours);

        let claims = Claims {
            sub: user_id,
            provider: user.provider,
            email: user.email.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("토큰 발급 실패: {}", e)))?;

        Ok(IssuedToken {
            access_token,
            expires_in: self.expiration_hours * 3600,
        })
    }

    /// 토큰을 검증하고 클레임을 반환합니다. 만료/변조된 토큰은 401입니다.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()))
    }
}

impl Default for TokenService {
    fn default() -> Self {
        Self::new()
    }
}

/// `Authorization: Bearer {token}` 헤더에서 토큰을 추출합니다.
pub fn extract_bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn saved_user() -> User {
        let mut user = User::new_local("alice@example.com".to_string(), "hash".to_string());
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let service = TokenService::new();
        let user = saved_user();

        let issued = service.issue(&user).unwrap();
        let claims = service.verify(&issued.access_token).unwrap();

        assert_eq!(claims.sub, user.id_string().unwrap());
        assert_eq!(claims.provider, AuthType::Local);
        assert_eq!(claims.email, "alice@example.com");
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
        assert_eq!(issued.expires_in, JwtConfig::expiration_hours() * 3600);
    }

    #[test]
    fn test_issue_rejects_unsaved_user() {
        let service = TokenService::new();
        let user = User::new_local("alice@example.com".to_string(), "hash".to_string());

        assert!(service.issue(&user).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage_token() {
        let service = TokenService::new();

        assert!(matches!(
            service.verify("not.a.token"),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token("Basic abc"), None);
    }
}
