//! 비밀번호 해싱 능력
//!
//! 해싱 프리미티브는 불투명한 능력(trait)으로 소비합니다. 프로덕션 구현은
//! bcrypt이며, 테스트에서는 평문 비교 페이크로 대체합니다.

use crate::config::PasswordConfig;
use crate::errors::{AppError, AppResult};

/// 해시/검증 능력 인터페이스
pub trait PasswordHasher: Send + Sync {
    /// 평문을 해시 다이제스트로 변환합니다.
    fn hash(&self, plaintext: &str) -> AppResult<String>;

    /// 평문이 다이제스트와 일치하는지 검증합니다.
    fn verify(&self, plaintext: &str, digest: &str) -> AppResult<bool>;
}

/// bcrypt 기반 구현
///
/// cost는 환경 변수 `BCRYPT_COST`로 조절합니다. bcrypt는 솔트를 자동 생성하며
/// 검증 시간이 일정하여 타이밍 공격을 완화합니다.
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new() -> Self {
        Self {
            cost: PasswordConfig::bcrypt_cost(),
        }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> AppResult<String> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> AppResult<bool> {
        bcrypt::verify(plaintext, digest)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))
    }
}
