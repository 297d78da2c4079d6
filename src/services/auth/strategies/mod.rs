//! 프로토콜 어댑터(전략) 구현
//!
//! 영속화된 설정 블롭을 실행 가능한 전략 인스턴스로 구성하는 계층입니다.
//! 프로토콜별 암호학적 내부(토큰 서명 검증, XML 정규화 등)는 구현 범위가
//! 아니며, 외부 프로바이더의 검증 결과를 소비하는 방법만 구현합니다.

pub mod google_strategy;
pub mod local_strategy;
pub mod oidc_strategy;
pub mod saml_strategy;

pub use google_strategy::GoogleStrategy;
pub use local_strategy::LocalStrategy;
pub use oidc_strategy::OidcStrategy;
pub use saml_strategy::SamlStrategy;

use serde_json::Value;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::errors::StrategyError;
use crate::domain::models::AuthType;
use crate::repositories::UserStore;
use crate::services::auth::strategy::AuthStrategy;
use crate::services::users::password_hasher::PasswordHasher;

/// 전략 구성에 필요한 공유 의존성 묶음
///
/// 레지스트리가 소유하며, 전략을 (재)구성할 때마다 참조로 전달됩니다.
#[derive(Clone)]
pub struct StrategyContext {
    pub users: Arc<dyn UserStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub http: reqwest::Client,
}

/// 설정 블롭으로부터 연합 전략을 구성합니다.
///
/// 필수 필드 검증은 구성 시도 전에 끝나며(`ConfigInvalid`), 네트워크가 필요한
/// 구성(OIDC 디스커버리)은 이 함수 안에서 수행됩니다. 호출자는 어떤 락도 잡지
/// 않은 상태여야 합니다.
pub async fn build(
    auth_type: AuthType,
    config: &Value,
    ctx: &StrategyContext,
) -> Result<Arc<dyn AuthStrategy>, StrategyError> {
    match auth_type {
        // 로컬 전략은 설정 기반 활성화 대상이 아닙니다 (항상 설치됨)
        AuthType::Local => Err(StrategyError::UnsupportedAuthType("local".to_string())),
        AuthType::Google => Ok(Arc::new(GoogleStrategy::from_config(config, ctx.http.clone())?)),
        AuthType::Oidc => Ok(Arc::new(OidcStrategy::discover(config, ctx.http.clone()).await?)),
        AuthType::Saml => Ok(Arc::new(SamlStrategy::from_config(config)?)),
    }
}

/// 설정 블롭에서 필수 문자열 필드를 읽습니다.
///
/// 누락되었거나 비어 있으면 `ConfigInvalid`를 반환합니다.
pub(crate) fn required_str(config: &Value, key: &str, auth_type: AuthType) -> Result<String, StrategyError> {
    match config.get(key).and_then(Value::as_str) {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        _ => Err(StrategyError::config_invalid(
            auth_type,
            format!("필수 필드 {}가 없습니다", key),
        )),
    }
}

/// 설정 블롭에서 선택 문자열 필드를 읽습니다. 빈 문자열은 없는 것으로 봅니다.
pub(crate) fn optional_str(config: &Value, key: &str) -> Option<String> {
    config
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.to_string())
}

/// 설정이 `callbackUrl`을 생략한 경우 사용할 기본 콜백 URL
pub(crate) fn default_callback_url(auth_type: AuthType) -> String {
    format!(
        "{}/api/v1/auth/{}/callback",
        ServerConfig::public_base_url(),
        auth_type
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_str_present() {
        let config = json!({ "clientId": "abc" });
        assert_eq!(
            required_str(&config, "clientId", AuthType::Google).unwrap(),
            "abc"
        );
    }

    #[test]
    fn test_required_str_missing_or_empty() {
        let config = json!({ "clientSecret": "   " });

        assert!(matches!(
            required_str(&config, "clientId", AuthType::Google),
            Err(StrategyError::ConfigInvalid { .. })
        ));
        assert!(matches!(
            required_str(&config, "clientSecret", AuthType::Google),
            Err(StrategyError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn test_optional_str_filters_empty() {
        let config = json!({ "scope": "", "callbackUrl": "http://cb" });

        assert_eq!(optional_str(&config, "scope"), None);
        assert_eq!(optional_str(&config, "callbackUrl").as_deref(), Some("http://cb"));
    }

    #[test]
    fn test_default_callback_url_contains_method() {
        let url = default_callback_url(AuthType::Oidc);
        assert!(url.ends_with("/api/v1/auth/oidc/callback"));
    }
}
