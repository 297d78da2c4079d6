//! 로컬 비밀번호 전략
//!
//! 구성 단계가 필요 없는 퇴화(degenerate) 어댑터로, 레지스트리 생성 시점에
//! 항상 설치됩니다. 연합 방식과 달리 아이덴티티 해석 경로를 타지 않고
//! 저장소의 기존 사용자를 직접 반환합니다.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::models::AuthType;
use crate::errors::{AppError, AppResult};
use crate::services::auth::strategy::AuthStrategy;
use crate::services::users::password_hasher::PasswordHasher;
use crate::repositories::UserStore;

/// 계정 열거 방지를 위해 모든 실패 원인에 동일하게 사용하는 메시지.
/// "사용자 없음"과 "비밀번호 불일치"를 구분할 수 있는 신호를 주지 않습니다.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "이메일 또는 비밀번호가 올바르지 않습니다";

/// 로컬 비밀번호 전략
pub struct LocalStrategy {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl LocalStrategy {
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    fn invalid_credentials() -> AppError {
        AppError::AuthenticationError(INVALID_CREDENTIALS_MESSAGE.to_string())
    }
}

#[async_trait]
impl AuthStrategy for LocalStrategy {
    fn auth_type(&self) -> AuthType {
        AuthType::Local
    }

    async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(Self::invalid_credentials)?;

        // 연합 계정 등 비밀번호 해시가 없는 계정도 동일한 실패로 처리
        let password_hash = user
            .password_hash
            .as_deref()
            .ok_or_else(Self::invalid_credentials)?;

        if !self.hasher.verify(password, password_hash)? {
            return Err(Self::invalid_credentials());
        }

        Ok(user)
    }
}
