//! 인증 전략 인터페이스
//!
//! 모든 인증 방식(로컬, Google, OIDC, SAML)은 하나의 능력 인터페이스
//! [`AuthStrategy`] 뒤에 놓입니다. 레지스트리는 방식 이름을 이 인터페이스의
//! 인스턴스로 해석할 뿐, 개별 프로토콜을 알지 못합니다.
//!
//! 연합 방식의 "중단점"은 외부(사용자 브라우저의 프로바이더 방문)에 있으므로
//! `initiate`와 `handle_callback`은 서로 독립적인 무상태 진입점입니다.
//! 두 호출 사이에 프로세스 내 상태를 보관하지 않으며, 필요한 연결 고리는
//! 프로토콜 자체의 state 파라미터가 담당합니다.

use async_trait::async_trait;

use crate::domain::entities::User;
use crate::domain::models::{AuthType, ExternalIdentity};
use crate::errors::{AppError, AppResult};

/// 연합 로그인 시작 결과 — 프로바이더로의 리다이렉트 대상
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRedirect {
    /// 사용자의 브라우저가 이동할 프로바이더 URL
    pub location: String,
}

/// 콜백 진입점으로 전달되는 프로토콜 파라미터 묶음
///
/// OAuth2/OIDC는 `code`/`state`를, SAML은 `saml_response`를 사용합니다.
#[derive(Debug, Default, Clone)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub saml_response: Option<String>,
}

impl CallbackParams {
    /// OAuth2/OIDC 콜백 파라미터
    pub fn oauth(code: Option<String>, state: Option<String>) -> Self {
        Self {
            code,
            state,
            saml_response: None,
        }
    }

    /// SAML 콜백 파라미터
    pub fn saml(saml_response: String) -> Self {
        Self {
            code: None,
            state: None,
            saml_response: Some(saml_response),
        }
    }
}

/// 인증 전략 능력 인터페이스
///
/// 세 가지 연산 중 전략이 지원하는 것만 구현합니다. 기본 구현은 모두
/// "지원하지 않음" 에러를 반환하므로, 잘못된 조합(예: 로컬 전략에 대한
/// 리다이렉트 시작)은 타입이 아니라 런타임 에러로 정리됩니다.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// 이 전략이 처리하는 인증 방식
    fn auth_type(&self) -> AuthType;

    /// 연합 로그인 시작: 프로바이더로의 리다이렉트 대상을 생성합니다.
    fn initiate(&self) -> AppResult<AuthRedirect> {
        Err(AppError::ValidationError(format!(
            "{} 방식은 리다이렉트 플로우를 지원하지 않습니다",
            self.auth_type()
        )))
    }

    /// 연합 로그인 콜백: 프로바이더 응답을 검증하고 정규화된 외부
    /// 아이덴티티를 산출합니다.
    async fn handle_callback(&self, _params: &CallbackParams) -> AppResult<ExternalIdentity> {
        Err(AppError::ValidationError(format!(
            "{} 방식은 콜백 처리를 지원하지 않습니다",
            self.auth_type()
        )))
    }

    /// 로컬 로그인: 이메일/비밀번호를 검증하고 기존 사용자를 반환합니다.
    /// 로그인 과정에서 사용자가 생성되는 일은 없습니다.
    async fn verify_credentials(&self, _email: &str, _password: &str) -> AppResult<User> {
        Err(AppError::ValidationError(format!(
            "{} 방식은 비밀번호 인증을 지원하지 않습니다",
            self.auth_type()
        )))
    }
}
