//! 응답 DTO
//!
//! 엔티티를 민감 정보(비밀번호 해시 등)를 제외한 형태로 변환하여 반환합니다.

use serde::Serialize;

use crate::core::registry::StrategyRegistry;
use crate::domain::entities::{Client, User};
use crate::domain::models::AuthType;

/// 사용자 응답 DTO
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub provider: AuthType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            email: user.email,
            provider: user.provider,
            provider_id: user.provider_id,
            created_at: user.created_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

/// 인증 성공 응답 (사용자 + 세션 토큰)
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// 클라이언트 설정 응답 DTO
///
/// 영속 레코드에 현재 레지스트리의 활성화 여부(`initialized`)를 주석으로
/// 붙여 반환합니다.
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    pub id: String,
    pub name: String,
    pub auth_type: String,
    pub config: serde_json::Value,
    pub created_at: String,
    pub updated_at: String,
    /// 이 auth_type의 전략이 현재 레지스트리에 설치되어 있는지 여부
    pub initialized: bool,
}

impl ClientResponse {
    /// 영속 레코드와 레지스트리 상태를 묶어 응답을 생성합니다.
    pub fn annotated(client: Client, registry: &StrategyRegistry) -> Self {
        let initialized = registry.is_initialized_name(&client.auth_type);

        Self {
            id: client.id_string().unwrap_or_default(),
            name: client.name,
            auth_type: client.auth_type,
            config: client.config,
            created_at: client.created_at.try_to_rfc3339_string().unwrap_or_default(),
            updated_at: client.updated_at.try_to_rfc3339_string().unwrap_or_default(),
            initialized,
        }
    }
}

/// 활성화된 전략 목록 응답
#[derive(Debug, Serialize)]
pub struct InitializedStrategiesResponse {
    pub strategies: Vec<AuthType>,
}
