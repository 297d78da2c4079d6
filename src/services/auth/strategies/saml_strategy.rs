//! SAML 2.0 전략
//!
//! IdP 엔트리 포인트로의 리다이렉트와, IdP가 브라우저를 통해 POST하는
//! base64 인코딩 응답의 소비를 담당합니다.
//!
//! 어설션 서명 검증과 XML 정규화는 이 게이트웨이의 구현 범위가 아닙니다.
//! 이 전략은 검증이 끝난 응답에서 주체 식별자(`NameID`)와 이메일 속성을
//! 추출하는 소비 단계만 수행합니다.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::core::errors::StrategyError;
use crate::domain::models::{AuthType, ExternalIdentity};
use crate::errors::{AppError, AppResult};
use crate::services::auth::strategies::{default_callback_url, optional_str, required_str};
use crate::services::auth::strategy::{AuthRedirect, AuthStrategy, CallbackParams};

/// SAML 2.0 전략
///
/// 필수 설정: `entryPoint`, `issuer`. 선택 설정: `callbackUrl`, `cert`
/// (IdP 인증서 — 불투명하게 보관만 합니다).
pub struct SamlStrategy {
    entry_point: String,
    #[allow(dead_code)]
    issuer: String,
    #[allow(dead_code)]
    callback_url: String,
    #[allow(dead_code)]
    cert: Option<String>,
}

impl SamlStrategy {
    /// 설정 블롭으로부터 전략을 구성합니다. 네트워크 호출은 없습니다.
    pub fn from_config(config: &Value) -> Result<Self, StrategyError> {
        let entry_point = required_str(config, "entryPoint", AuthType::Saml)?;
        let issuer = required_str(config, "issuer", AuthType::Saml)?;
        let callback_url = optional_str(config, "callbackUrl")
            .unwrap_or_else(|| default_callback_url(AuthType::Saml));
        let cert = optional_str(config, "cert");

        Ok(Self {
            entry_point,
            issuer,
            callback_url,
            cert,
        })
    }
}

#[async_trait]
impl AuthStrategy for SamlStrategy {
    fn auth_type(&self) -> AuthType {
        AuthType::Saml
    }

    fn initiate(&self) -> AppResult<AuthRedirect> {
        Ok(AuthRedirect {
            location: self.entry_point.clone(),
        })
    }

    async fn handle_callback(&self, params: &CallbackParams) -> AppResult<ExternalIdentity> {
        let encoded = params
            .saml_response
            .as_deref()
            .ok_or_else(|| AppError::AuthenticationError("SAMLResponse가 없습니다".to_string()))?;

        // 브라우저 폼 전송 과정에서 끼어드는 공백/개행 제거
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

        let decoded = STANDARD
            .decode(compact.as_bytes())
            .map_err(|_| AppError::AuthenticationError("SAMLResponse 디코딩에 실패했습니다".to_string()))?;
        let xml = String::from_utf8_lossy(&decoded);

        let name_id = element_text(&xml, "NameID").ok_or_else(|| {
            AppError::AuthenticationError("SAML 응답에서 NameID를 찾을 수 없습니다".to_string())
        })?;

        let email = attribute_value(&xml, "email")
            .or_else(|| name_id.contains('@').then(|| name_id.clone()));

        Ok(ExternalIdentity::new(AuthType::Saml, name_id, email))
    }
}

/// 네임스페이스 접두사와 무관하게 로컬 이름이 일치하는 첫 요소의 텍스트를
/// 찾습니다.
fn element_text(xml: &str, local_name: &str) -> Option<String> {
    for (idx, _) in xml.match_indices('<') {
        let rest = &xml[idx + 1..];
        let gt = rest.find('>')?;
        let tag = &rest[..gt];

        if tag.starts_with('/') || tag.ends_with('/') {
            continue;
        }

        let name = tag
            .split([' ', '\t', '\r', '\n'])
            .next()
            .unwrap_or_default();
        let local = name.rsplit(':').next().unwrap_or(name);
        if local != local_name {
            continue;
        }

        let body = &rest[gt + 1..];
        if let Some(end) = body.find('<') {
            let text = body[..end].trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }

    None
}

/// `Name="{attr_name}"` 속성 선언 다음의 `AttributeValue` 텍스트를 찾습니다.
fn attribute_value(xml: &str, attr_name: &str) -> Option<String> {
    let needle = format!("Name=\"{}\"", attr_name);
    let pos = xml.find(&needle)?;
    element_text(&xml[pos..], "AttributeValue")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE_ASSERTION: &str = r#"<samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol">
  <saml:Assertion xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion">
    <saml:Subject>
      <saml:NameID Format="urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress">user-42</saml:NameID>
    </saml:Subject>
    <saml:AttributeStatement>
      <saml:Attribute Name="email">
        <saml:AttributeValue>alice@example.com</saml:AttributeValue>
      </saml:Attribute>
    </saml:AttributeStatement>
  </saml:Assertion>
</samlp:Response>"#;

    fn valid_config() -> Value {
        json!({
            "entryPoint": "https://idp.example.com/sso",
            "issuer": "auth-gateway",
            "cert": "MIIC..."
        })
    }

    #[test]
    fn test_from_config_requires_entry_point_and_issuer() {
        let missing_entry = json!({ "issuer": "auth-gateway" });
        assert!(matches!(
            SamlStrategy::from_config(&missing_entry),
            Err(StrategyError::ConfigInvalid { .. })
        ));

        let missing_issuer = json!({ "entryPoint": "https://idp.example.com/sso" });
        assert!(matches!(
            SamlStrategy::from_config(&missing_issuer),
            Err(StrategyError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn test_initiate_redirects_to_entry_point() {
        let strategy = SamlStrategy::from_config(&valid_config()).unwrap();
        let redirect = strategy.initiate().unwrap();

        assert_eq!(redirect.location, "https://idp.example.com/sso");
    }

    #[actix_web::test]
    async fn test_callback_extracts_name_id_and_email() {
        let strategy = SamlStrategy::from_config(&valid_config()).unwrap();
        let encoded = STANDARD.encode(SAMPLE_ASSERTION);

        let identity = strategy
            .handle_callback(&CallbackParams::saml(encoded))
            .await
            .unwrap();

        assert_eq!(identity.provider, AuthType::Saml);
        assert_eq!(identity.provider_id, "user-42");
        assert_eq!(identity.email.as_deref(), Some("alice@example.com"));
    }

    #[actix_web::test]
    async fn test_callback_uses_name_id_as_email_when_it_is_one() {
        let strategy = SamlStrategy::from_config(&valid_config()).unwrap();
        let assertion = r#"<saml:NameID xmlns:saml="urn:x">bob@example.com</saml:NameID>"#;
        let encoded = STANDARD.encode(assertion);

        let identity = strategy
            .handle_callback(&CallbackParams::saml(encoded))
            .await
            .unwrap();

        assert_eq!(identity.provider_id, "bob@example.com");
        assert_eq!(identity.email.as_deref(), Some("bob@example.com"));
    }

    #[actix_web::test]
    async fn test_callback_rejects_response_without_name_id() {
        let strategy = SamlStrategy::from_config(&valid_config()).unwrap();
        let encoded = STANDARD.encode("<samlp:Response></samlp:Response>");

        let result = strategy.handle_callback(&CallbackParams::saml(encoded)).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_callback_rejects_invalid_base64() {
        let strategy = SamlStrategy::from_config(&valid_config()).unwrap();

        let result = strategy
            .handle_callback(&CallbackParams::saml("%%%not-base64%%%".to_string()))
            .await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_element_text_ignores_self_closing_and_close_tags() {
        let xml = r#"<a><NameID/></a><b><x:NameID attr="v">id-1</x:NameID></b>"#;
        assert_eq!(element_text(xml, "NameID").as_deref(), Some("id-1"));
    }
}
