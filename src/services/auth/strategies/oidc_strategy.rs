//! OpenID Connect 전략
//!
//! 구성 시점에 발급자(issuer)의 디스커버리 문서를 조회하여 엔드포인트를
//! 확정합니다. 발급자 URL이 잘못되었거나 도달할 수 없으면 구성 자체가
//! 실패하며, 레지스트리는 이를 잡아 해당 방식을 비활성 상태로 남겨둡니다
//! (이전에 활성화된 전략이 있었다면 그대로 유지됩니다).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::core::errors::StrategyError;
use crate::domain::models::{AuthType, ExternalIdentity};
use crate::errors::{AppError, AppResult};
use crate::services::auth::oauth_state;
use crate::services::auth::strategies::{default_callback_url, optional_str, required_str};
use crate::services::auth::strategy::{AuthRedirect, AuthStrategy, CallbackParams};

const DEFAULT_SCOPE: &str = "openid email profile";

/// OIDC 디스커버리 문서 (필요한 엔드포인트만 역직렬화)
#[derive(Debug, Deserialize)]
struct DiscoveryDocument {
    authorization_endpoint: String,
    token_endpoint: String,
    userinfo_endpoint: String,
}

/// 토큰 교환 응답
#[derive(Debug, Deserialize)]
struct OidcTokenResponse {
    access_token: String,
}

/// userinfo 응답 — `sub`가 주체 식별자입니다
#[derive(Debug, Deserialize)]
struct OidcUserInfo {
    sub: String,
    email: Option<String>,
}

/// OpenID Connect 전략
///
/// 필수 설정: `issuer`, `clientId`, `clientSecret`.
/// 선택 설정: `callbackUrl`(기본 콜백 경로), `scope`(기본 `openid email profile`).
pub struct OidcStrategy {
    client_id: String,
    client_secret: String,
    callback_url: String,
    scope: String,
    authorization_endpoint: String,
    token_endpoint: String,
    userinfo_endpoint: String,
    http: reqwest::Client,
}

/// 발급자 URL에서 디스커버리 문서 URL을 만듭니다.
fn discovery_url(issuer: &str) -> String {
    format!(
        "{}/.well-known/openid-configuration",
        issuer.trim_end_matches('/')
    )
}

impl OidcStrategy {
    /// 설정 검증 후 디스커버리를 수행하여 전략을 구성합니다.
    ///
    /// 디스커버리는 네트워크 호출이므로 호출자는 락을 잡지 않은 상태여야
    /// 합니다 (construct-then-swap).
    pub async fn discover(config: &Value, http: reqwest::Client) -> Result<Self, StrategyError> {
        let issuer = required_str(config, "issuer", AuthType::Oidc)?;
        let client_id = required_str(config, "clientId", AuthType::Oidc)?;
        let client_secret = required_str(config, "clientSecret", AuthType::Oidc)?;
        let callback_url = optional_str(config, "callbackUrl")
            .unwrap_or_else(|| default_callback_url(AuthType::Oidc));
        let scope = optional_str(config, "scope").unwrap_or_else(|| DEFAULT_SCOPE.to_string());

        let document = Self::fetch_discovery(&http, &issuer).await?;

        Ok(Self {
            client_id,
            client_secret,
            callback_url,
            scope,
            authorization_endpoint: document.authorization_endpoint,
            token_endpoint: document.token_endpoint,
            userinfo_endpoint: document.userinfo_endpoint,
            http,
        })
    }

    async fn fetch_discovery(http: &reqwest::Client, issuer: &str) -> Result<DiscoveryDocument, StrategyError> {
        let url = discovery_url(issuer);

        let response = http.get(&url).send().await.map_err(|e| {
            StrategyError::construction_failed(AuthType::Oidc, format!("디스커버리 요청 실패 ({}): {}", url, e))
        })?;

        if !response.status().is_success() {
            return Err(StrategyError::construction_failed(
                AuthType::Oidc,
                format!("디스커버리 응답 상태 {} ({})", response.status(), url),
            ));
        }

        response.json().await.map_err(|e| {
            StrategyError::construction_failed(AuthType::Oidc, format!("디스커버리 문서 파싱 실패: {}", e))
        })
    }

    async fn exchange_code(&self, code: &str) -> AppResult<OidcTokenResponse> {
        let response = self
            .http
            .post(&self.token_endpoint)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.callback_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("OIDC 토큰 교환 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::AuthenticationError(
                "OIDC 토큰 교환이 거부되었습니다".to_string(),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("OIDC 토큰 응답 파싱 실패: {}", e)))
    }

    async fn fetch_userinfo(&self, access_token: &str) -> AppResult<OidcUserInfo> {
        let response = self
            .http
            .get(&self.userinfo_endpoint)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("OIDC userinfo 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::AuthenticationError(
                "OIDC userinfo 조회가 거부되었습니다".to_string(),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("OIDC userinfo 파싱 실패: {}", e)))
    }
}

#[async_trait]
impl AuthStrategy for OidcStrategy {
    fn auth_type(&self) -> AuthType {
        AuthType::Oidc
    }

    fn initiate(&self) -> AppResult<AuthRedirect> {
        let state = oauth_state::issue_state();

        let location = format!(
            "{}?client_id={}&redirect_uri={}&scope={}&response_type=code&state={}",
            self.authorization_endpoint,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.callback_url),
            urlencoding::encode(&self.scope),
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

        Ok(ExternalIdentity::new(AuthType::Oidc, userinfo.sub, userinfo.email))
    }
}
