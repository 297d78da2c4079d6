//! 전략 활성화 에러
//!
//! 전략 레지스트리 내부에서만 사용하는 에러 타입입니다. 이 에러들은 모두
//! 레지스트리 경계에서 잡혀 경고 로그로 변환되며, 요청 경로로 전파되지
//! 않습니다. `initialize_all()`이 전체 실패하는 일은 없습니다.

use thiserror::Error;

use crate::domain::models::AuthType;

/// 전략 활성화 단계에서 발생하는 에러
#[derive(Error, Debug)]
pub enum StrategyError {
    /// 알 수 없는(또는 설정 기반 활성화 대상이 아닌) auth_type
    #[error("알 수 없는 auth_type: {0}")]
    UnsupportedAuthType(String),

    /// 필수 설정 필드 누락 — 해당 방식은 비활성 상태로 남습니다
    #[error("{auth_type} 설정이 유효하지 않습니다: {reason}")]
    ConfigInvalid { auth_type: AuthType, reason: String },

    /// 핸들러 구성 실패(네트워크/파싱) — 이전 활성 상태가 보존됩니다
    #[error("{auth_type} 전략 구성에 실패했습니다: {reason}")]
    ConstructionFailed { auth_type: AuthType, reason: String },
}

impl StrategyError {
    pub fn config_invalid(auth_type: AuthType, reason: impl Into<String>) -> Self {
        StrategyError::ConfigInvalid {
            auth_type,
            reason: reason.into(),
        }
    }

    pub fn construction_failed(auth_type: AuthType, reason: impl Into<String>) -> Self {
        StrategyError::ConstructionFailed {
            auth_type,
            reason: reason.into(),
        }
    }
}
