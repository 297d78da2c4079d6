//! Client Entity Implementation
//!
//! 영속화되는 인증 방식 설정(클라이언트) 엔티티입니다.
//! 설정 블롭의 형태는 `auth_type`에 따라 다르며, 저장 시점에는 검증하지 않습니다.
//! 검증과 거부는 전략 활성화 시점에 레지스트리가 수행합니다.

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// 인증 방식 설정 엔티티
///
/// 하나의 `auth_type`에 대해 여러 레코드가 저장될 수는 있으나, 레지스트리는
/// 관리 API의 upsert 규칙(같은 `auth_type`은 in-place 갱신)과 "마지막 쓰기
/// 우선" 활성화로 방식당 하나의 활성 설정만 의미를 갖게 합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 표시용 이름
    pub name: String,
    /// 인증 방식 키 (예: "google", "oidc", "saml")
    pub auth_type: String,
    /// 방식별 설정 블롭 (clientId/clientSecret/issuer/entryPoint 등)
    pub config: serde_json::Value,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl Client {
    pub fn new(name: String, auth_type: String, config: serde_json::Value) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            auth_type,
            config,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}
