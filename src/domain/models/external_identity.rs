//! 정규화된 외부 아이덴티티
//!
//! 모든 연합 전략(Google, OIDC, SAML)은 프로토콜과 무관하게 동일한 형태의
//! 아이덴티티 `(provider, provider_id, email)`를 산출합니다.
//! 아이덴티티 해석기는 이 값만으로 로컬 사용자 레코드를 찾거나 생성합니다.

use serde::{Deserialize, Serialize};

use crate::domain::models::AuthType;

/// 연합 로그인 성공 시 전략이 산출하는 정규화된 외부 아이덴티티
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    /// 아이덴티티를 발급한 프로바이더
    pub provider: AuthType,
    /// 프로바이더 측 주체 식별자 (Google의 `id`, OIDC의 `sub`, SAML의 `NameID`)
    pub provider_id: String,
    /// 프로바이더가 제공한 이메일. 제공하지 않는 프로바이더도 있습니다.
    pub email: Option<String>,
}

impl ExternalIdentity {
    pub fn new(provider: AuthType, provider_id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            provider,
            provider_id: provider_id.into(),
            email,
        }
    }

    /// 사용자 레코드에 기록할 이메일을 결정합니다.
    ///
    /// 프로바이더가 이메일을 제공하지 않은 경우 `.invalid` 예약 도메인을 사용한
    /// 플레이스홀더(`{provider_id}@{provider}.invalid`)를 생성합니다.
    pub fn resolved_email(&self) -> String {
        match &self.email {
            Some(email) if !email.is_empty() => email.clone(),
            _ => format!("{}@{}.invalid", self.provider_id, self.provider),
        }
    }
}
