//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 로컬 인증과 연합 인증(Google/OIDC/SAML)을 모두 지원하는 통합된 사용자 모델을
//! 제공합니다.

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::domain::models::AuthType;

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
///
/// ## 불변식
///
/// - 이메일은 동일 프로바이더 내에서 유일합니다. 서로 다른 프로바이더의 두
///   계정은 같은 이메일을 가질 수 있으며, 절대 하나로 병합되지 않습니다
///   (문서화된 설계 제한)
/// - `provider != local`인 경우 `(provider, provider_id)` 쌍은 유일합니다
/// - `provider`와 `provider_id`는 생성 이후 변경되지 않습니다
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (프로바이더 내 unique)
    pub email: String,
    /// 해시된 비밀번호 (연합 인증 사용자의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// 인증 프로바이더
    pub provider: AuthType,
    /// 프로바이더 측 주체 식별자 (로컬 사용자의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    /// 생성 시간
    pub created_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (이메일/패스워드)
    ///
    /// 로컬 사용자는 명시적인 회원가입 경로에서만 생성됩니다. 로그인 과정에서
    /// 생성되는 일은 없습니다.
    pub fn new_local(email: String, password_hash: String) -> Self {
        Self {
            id: None,
            email,
            password_hash: Some(password_hash),
            provider: AuthType::Local,
            provider_id: None,
            created_at: DateTime::now(),
        }
    }

    /// 새 연합 인증 사용자 생성
    ///
    /// 처음 보는 `(provider, provider_id)` 쌍의 로그인이 성공했을 때
    /// 아이덴티티 해석기가 호출합니다. 비밀번호 해시는 없습니다.
    pub fn new_federated(email: String, provider: AuthType, provider_id: String) -> Self {
        Self {
            id: None,
            email,
            password_hash: None,
            provider,
            provider_id: Some(provider_id),
            created_at: DateTime::now(),
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 비밀번호 인증이 가능한 사용자인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        matches!(self.provider, AuthType::Local) && self.password_hash.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_local_has_password_hash() {
        let user = User::new_local("alice@example.com".to_string(), "hash".to_string());

        assert_eq!(user.provider, AuthType::Local);
        assert!(user.provider_id.is_none());
        assert!(user.can_authenticate_with_password());
    }

    #[test]
    fn test_new_federated_has_no_password() {
        let user = User::new_federated(
            "bob@example.com".to_string(),
            AuthType::Google,
            "g-77".to_string(),
        );

        assert_eq!(user.provider, AuthType::Google);
        assert_eq!(user.provider_id.as_deref(), Some("g-77"));
        assert!(user.password_hash.is_none());
        assert!(!user.can_authenticate_with_password());
    }
}
