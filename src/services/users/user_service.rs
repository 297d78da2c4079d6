//! 사용자 서비스
//!
//! 로컬 회원가입과 사용자 조회 유스케이스를 담당합니다. 연합 사용자 생성은
//! 아이덴티티 해석기의 몫이며 이 서비스는 관여하지 않습니다.

use log::info;
use std::sync::Arc;

use crate::domain::dto::SignupRequest;
use crate::domain::entities::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::UserStore;
use crate::services::users::password_hasher::PasswordHasher;

/// 사용자 서비스
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// 로컬 회원가입
    ///
    /// 같은 이메일의 로컬 계정이 이미 있으면 `ConflictError`를 반환합니다.
    /// 같은 이메일의 연합 계정은 중복으로 보지 않습니다.
    pub async fn signup(&self, request: SignupRequest) -> AppResult<User> {
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::ConflictError(
                "이미 사용 중인 이메일입니다".to_string(),
            ));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new_local(request.email, password_hash);

        // 사전 검사와 생성 사이의 경합은 저장소의 유일성 제약이 잡아냅니다
        let created = self.users.create(user).await?;

        info!("로컬 사용자 가입 완료: {}", created.email);
        Ok(created)
    }

    /// ID로 사용자를 조회합니다. 없으면 404입니다.
    pub async fn find_by_id(&self, id: &str) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }
}
