//! 데이터 액세스 계층
//!
//! 레지스트리와 서비스 계층은 저장 엔진이 아니라 이 모듈의 저장소 인터페이스
//! (`UserStore`, `ClientStore`)만 소비합니다. 덕분에 코어 로직은 MongoDB 없이
//! 인메모리 페이크로 단독 테스트할 수 있습니다.

pub mod client_repo;
pub mod user_repo;

pub use client_repo::ClientRepository;
pub use user_repo::UserRepository;

use async_trait::async_trait;

use crate::domain::entities::{Client, User};
use crate::domain::models::AuthType;
use crate::errors::AppResult;

/// 사용자 부분 갱신 필드
///
/// 프로필 인접 필드만 갱신 대상입니다. `provider`/`provider_id`는 생성 이후
/// 변경되지 않습니다.
#[derive(Debug, Default, Clone)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password_hash.is_none()
    }
}

/// 사용자 영속화 인터페이스
#[async_trait]
pub trait UserStore: Send + Sync {
    /// ID로 사용자 조회
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// 이메일로 **로컬** 사용자 조회
    ///
    /// 이메일 유일성은 프로바이더 단위로만 보장되므로, 회원가입 중복 검사와
    /// 로컬 로그인은 로컬 계정만 대상으로 합니다. 같은 이메일의 연합 계정은
    /// 별개 레코드로 공존합니다.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// `(provider, provider_id)` 쌍으로 연합 사용자 조회
    async fn find_by_provider(&self, provider: AuthType, provider_id: &str) -> AppResult<Option<User>>;

    /// 사용자 생성. 유일성 제약 위반 시 `ConflictError`를 반환합니다.
    async fn create(&self, user: User) -> AppResult<User>;

    /// 프로필 인접 필드 부분 갱신. 대상이 없으면 `Ok(None)`.
    async fn update(&self, id: &str, update: UserUpdate) -> AppResult<Option<User>>;
}

/// 인증 방식 설정 영속화 인터페이스
///
/// 저장 계층은 설정 블롭을 검증하지 않습니다. 불완전한 설정도 저장은 되며,
/// 활성화 시점에 레지스트리가 거부합니다.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// auth_type으로 설정 조회
    async fn find_by_auth_type(&self, auth_type: &str) -> AppResult<Option<Client>>;

    /// 저장된 모든 설정 조회
    async fn get_all(&self) -> AppResult<Vec<Client>>;

    /// 설정 생성
    async fn create(&self, client: Client) -> AppResult<Client>;

    /// 설정 갱신 (`updated_at` 자동 갱신). 대상이 없으면 `Ok(None)`.
    async fn update(
        &self,
        id: &str,
        name: &str,
        auth_type: &str,
        config: &serde_json::Value,
    ) -> AppResult<Option<Client>>;
}
