//! 인증 방식 식별자
//!
//! 게이트웨이가 지원하는 인증 방식의 닫힌 집합입니다.
//! 데이터베이스의 `auth_type` 문자열과 URL 경로의 메서드 이름이 이 타입으로
//! 파싱되며, 문자열 분기 대신 태그된 variant로 디스패치합니다.

use std::fmt;
use serde::{Deserialize, Serialize};

/// 인증 방식 (auth_type)
///
/// 전략 레지스트리의 키이자 사용자 레코드의 `provider` 필드입니다.
/// 직렬화 시 소문자 이름(`local`, `google`, `oidc`, `saml`)을 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// 이메일/비밀번호 로컬 인증
    Local,
    /// Google OAuth 2.0
    Google,
    /// OpenID Connect (디스커버리 기반)
    Oidc,
    /// SAML 2.0
    Saml,
}

impl AuthType {
    /// 소문자 식별자 문자열을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::Local => "local",
            AuthType::Google => "google",
            AuthType::Oidc => "oidc",
            AuthType::Saml => "saml",
        }
    }

    /// `auth_type` 문자열을 파싱합니다. 대소문자를 구분하지 않습니다.
    ///
    /// 알 수 없는 값은 `None`을 반환하며, 호출자(레지스트리)가 경고 로그 후
    /// 건너뜁니다.
    pub fn parse(value: &str) -> Option<AuthType> {
        match value.to_lowercase().as_str() {
            "local" => Some(AuthType::Local),
            "google" => Some(AuthType::Google),
            "oidc" => Some(AuthType::Oidc),
            "saml" => Some(AuthType::Saml),
            _ => None,
        }
    }

    /// 리다이렉트 기반 연합 인증 방식인지 확인합니다.
    pub fn is_federated(&self) -> bool {
        !matches!(self, AuthType::Local)
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_types() {
        assert_eq!(AuthType::parse("local"), Some(AuthType::Local));
        assert_eq!(AuthType::parse("google"), Some(AuthType::Google));
        assert_eq!(AuthType::parse("oidc"), Some(AuthType::Oidc));
        assert_eq!(AuthType::parse("saml"), Some(AuthType::Saml));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(AuthType::parse("Google"), Some(AuthType::Google));
        assert_eq!(AuthType::parse("SAML"), Some(AuthType::Saml));
    }

    #[test]
    fn test_parse_unknown_type() {
        assert_eq!(AuthType::parse("kakao"), None);
        assert_eq!(AuthType::parse(""), None);
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(AuthType::Google.to_string(), "google");
        assert_eq!(AuthType::Local.as_str(), "local");
    }

    #[test]
    fn test_is_federated() {
        assert!(!AuthType::Local.is_federated());
        assert!(AuthType::Google.is_federated());
        assert!(AuthType::Oidc.is_federated());
        assert!(AuthType::Saml.is_federated());
    }

    #[test]
    fn test_serde_lowercase_roundtrip() {
        let json = serde_json::to_string(&AuthType::Oidc).unwrap();
        assert_eq!(json, "\"oidc\"");

        let parsed: AuthType = serde_json::from_str("\"saml\"").unwrap();
        assert_eq!(parsed, AuthType::Saml);
    }
}
