//! 요청 DTO
//!
//! HTTP 요청 본문/쿼리를 역직렬화하고 `validator`로 검증하는 타입들입니다.

use serde::Deserialize;
use validator::Validate;

/// 로컬 회원가입 요청
///
/// `POST /api/v1/auth/signup`
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// 사용자 이메일
    #[validate(email(message = "올바른 이메일 형식이 아닙니다"))]
    pub email: String,
    /// 평문 비밀번호 (저장 전 bcrypt로 해싱됨)
    #[validate(length(min = 8, message = "비밀번호는 8자 이상이어야 합니다"))]
    pub password: String,
}

/// 로컬 로그인 요청
///
/// `POST /api/v1/auth/login`
#[derive(Debug, Deserialize, Validate)]
pub struct LocalLoginRequest {
    #[validate(length(min = 1, message = "이메일을 입력해주세요"))]
    pub email: String,
    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 클라이언트 설정 생성/갱신 요청
///
/// `POST /api/v1/clients`
///
/// `id`가 주어지면 해당 레코드를 직접 갱신하고, 없으면 `auth_type` 기준으로
/// upsert합니다. 설정 블롭 자체는 저장 시점에 검증하지 않습니다.
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertClientRequest {
    /// 갱신 대상 레코드 ID (선택)
    pub id: Option<String>,
    #[validate(length(min = 1, message = "name은 필수입니다"))]
    pub name: String,
    #[validate(length(min = 1, message = "auth_type은 필수입니다"))]
    pub auth_type: String,
    /// 방식별 설정 블롭
    pub config: serde_json::Value,
}

/// OAuth2/OIDC 콜백 쿼리 파라미터
///
/// `GET /api/v1/auth/{method}/callback?code=...&state=...`
///
/// 프로바이더가 동의 거부 등으로 에러를 돌려준 경우 `error` 필드가 채워집니다.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// SAML 콜백 폼 파라미터
///
/// `POST /api/v1/auth/saml/callback` — IdP가 브라우저를 통해 POST하는
/// base64 인코딩된 응답입니다.
#[derive(Debug, Deserialize)]
pub struct SamlCallbackForm {
    #[serde(rename = "SAMLResponse")]
    pub saml_response: String,
    /// IdP가 에코하는 RelayState. 리다이렉트 대상은 서버 설정으로 결정하므로
    /// 수신만 하고 사용하지 않습니다.
    #[serde(rename = "RelayState")]
    #[allow(dead_code)]
    pub relay_state: Option<String>,
}
