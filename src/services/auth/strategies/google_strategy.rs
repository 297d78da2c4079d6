//! Google OAuth 2.0 전략
//!
//! Authorization Code Grant 플로우를 수행합니다.
//!
//! ```text
//! 1. initiate        → Google 인증 페이지로 리다이렉트 (state 포함)
//! 2. (외부)          → 사용자가 Google에서 인증
//! 3. handle_callback → state 검증 → code를 액세스 토큰으로 교환
//!                      → userinfo 조회 → 정규화된 아이덴티티 산출
//! ```
//!
//! 토큰 서명 검증 등 프로토콜 내부는 Google 서버가 수행하며, 이 전략은 그
//! 결과(userinfo)만 소비합니다.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::core::errors::StrategyError;
use crate::domain::models::{AuthType, ExternalIdentity};
use crate::errors::{AppError, AppResult};
use crate::services::auth::oauth_state;
use crate::services::auth::strategies::{default_callback_url, optional_str, required_str};
use crate::services::auth::strategy::{AuthRedirect, AuthStrategy, CallbackParams};

const GOOGLE_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URI: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const GOOGLE_SCOPE: &str = "openid email profile";

/// Google OAuth 2.0 전략
///
/// 필수 설정: `clientId`, `clientSecret`. `callbackUrl`은 생략 시 게이트웨이
/// 기본 콜백 경로로 대체됩니다.
pub struct GoogleStrategy {
    client_id: String,
    client_secret: String,
    callback_url: String,
    http: reqwest::Client,
}

/// 토큰 교환 응답 (필요한 필드만 역직렬화)
#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
}

/// userinfo 응답 (필요한 필드만 역직렬화)
#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    id: String,
    email: Option<String>,
}

impl GoogleStrategy {
    /// 설정 블롭으로부터 전략을 구성합니다. 네트워크 호출은 없습니다.
    pub fn from_config(config: &Value, http: reqwest::Client) -> Result<Self, StrategyError> {
        let client_id = required_str(config, "clientId", AuthType::Google)?;
        let client_secret = required_str(config, "clientSecret", AuthType::Google)?;
        let callback_url = optional_str(config, "callbackUrl")
            .unwrap_or_else(|| default_callback_url(AuthType::Google));

        Ok(Self {
            client_id,
            client_secret,
            callback_url,
            http,
        })
    }

    /// 인증 코드를 액세스 토큰으로 교환합니다.
    async fn exchange_code(&self, code: &str) -> AppResult<GoogleTokenResponse> {
        let response = self
            .http
            .post(GOOGLE_TOKEN_URI)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.callback_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 교환 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::AuthenticationError(
                "Google 토큰 교환이 거부되었습니다".to_string(),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 응답 파싱 실패: {}", e)))
    }

    /// 액세스 토큰으로 사용자 프로필을 조회합니다.
    async fn fetch_userinfo(&self, access_token: &str) -> AppResult<GoogleUserInfo> {
        let response = self
            .http
            .get(GOOGLE_USERINFO_URI)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google userinfo 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::AuthenticationError(
                "Google userinfo 조회가 거부되었습니다".to_string(),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google userinfo 파싱 실패: {}", e)))
    }
}

#[async_trait]
impl AuthStrategy for GoogleStrategy {
    fn auth_type(&self) -> AuthType {
        AuthType::Google
    }

    fn initiate(&self) -> AppResult<AuthRedirect> {
        let state = oauth_state::issue_state();

        let location = format!(
            "{}?client_id={}&redirect_uri={}&scope={}&response_type=code&state={}",
            GOOGLE_AUTH_URI,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.callback_url),
            urlencoding::encode(GOOGLE_SCOPE),
            urlencoding::encode(&state),
        );

        Ok(AuthRedirect { location })
    }

    async fn handle_callback(&self, params: &CallbackParams) -> AppResult<ExternalIdentity> {
        let state = params
            .state
            .as_deref()
            .ok_or_else(|| AppError::AuthenticationError("state 파라미터가 없습니다".to_string()))?;
        oauth_state::verify_state(state)?;

        let code = params
            .code
            .as_deref()
            .ok_or_else(|| AppError::AuthenticationError("인증 코드가 없습니다".to_string()))?;

        let token = self.exchange_code(code).await?;
        let userinfo = self.fetch_userinfo(&token.access_token).await?;

        Ok(ExternalIdentity::new(AuthType::Google, userinfo.id, userinfo.email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_config() -> Value {
        json!({
            "clientId": "test-client-id",
            "clientSecret": "test-client-secret",
            "callbackUrl": "http://localhost:8080/api/v1/auth/google/callback"
        })
    }

    #[test]
    fn test_from_config_requires_client_id_and_secret() {
        let http = reqwest::Client::new();

        let missing_secret = json!({ "clientId": "id-only" });
        assert!(matches!(
            GoogleStrategy::from_config(&missing_secret, http.clone()),
            Err(StrategyError::ConfigInvalid { .. })
        ));

        let missing_id = json!({ "clientSecret": "secret-only" });
        assert!(matches!(
            GoogleStrategy::from_config(&missing_id, http),
            Err(StrategyError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn test_from_config_defaults_callback_url() {
        let config = json!({ "clientId": "id", "clientSecret": "secret" });
        let strategy = GoogleStrategy::from_config(&config, reqwest::Client::new()).unwrap();

        assert!(strategy.callback_url.ends_with("/api/v1/auth/google/callback"));
    }

    #[test]
    fn test_initiate_builds_authorization_url() {
        let strategy = GoogleStrategy::from_config(&valid_config(), reqwest::Client::new()).unwrap();
        let redirect = strategy.initiate().unwrap();

        assert!(redirect.location.starts_with(GOOGLE_AUTH_URI));
        assert!(redirect.location.contains("client_id=test-client-id"));
        assert!(redirect.location.contains("response_type=code"));
        assert!(redirect.location.contains("state="));
    }

    #[actix_web::test]
    async fn test_callback_rejects_missing_state() {
        let strategy = GoogleStrategy::from_config(&valid_config(), reqwest::Client::new()).unwrap();
        let params = CallbackParams::oauth(Some("code".to_string()), None);

        let result = strategy.handle_callback(&params).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_callback_rejects_missing_code() {
        let strategy = GoogleStrategy::from_config(&valid_config(), reqwest::Client::new()).unwrap();
        let params = CallbackParams::oauth(None, Some(oauth_state::issue_state()));

        let result = strategy.handle_callback(&params).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }
}
