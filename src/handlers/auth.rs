//! 인증 HTTP 핸들러
//!
//! 로컬 회원가입/로그인과 연합 로그인(시작/콜백), 세션 토큰 기반의 현재
//! 사용자 조회를 처리합니다.
//!
//! # Endpoints
//!
//! - `POST /api/v1/auth/signup` — 로컬 회원가입
//! - `POST /api/v1/auth/login` — 로컬 로그인
//! - `GET  /api/v1/auth/{method}/login` — 연합 로그인 시작 (302)
//! - `GET  /api/v1/auth/{method}/callback` — OAuth2/OIDC 콜백
//! - `POST /api/v1/auth/saml/callback` — SAML 콜백 (IdP form POST)
//! - `GET  /api/v1/auth/me` — 세션 토큰으로 현재 사용자 조회

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use std::sync::Arc;
use validator::Validate;

use crate::core::StrategyRegistry;
use crate::domain::dto::{
    AuthResponse, LocalLoginRequest, OAuthCallbackQuery, SamlCallbackForm, SignupRequest,
    UserResponse,
};
use crate::domain::entities::User;
use crate::domain::models::AuthType;
use crate::errors::AppError;
use crate::services::auth::strategy::CallbackParams;
use crate::services::auth::token_service::extract_bearer_token;
use crate::services::auth::{IdentityResolver, TokenService};
use crate::services::users::UserService;
use crate::config::FrontendConfig;

/// 사용자와 세션 토큰을 묶어 인증 응답을 만듭니다.
fn auth_response(user: User, tokens: &TokenService) -> Result<AuthResponse, AppError> {
    let issued = tokens.issue(&user)?;

    Ok(AuthResponse {
        user: UserResponse::from(user),
        access_token: issued.access_token,
        token_type: "Bearer".to_string(),
        expires_in: issued.expires_in,
    })
}

/// 연합 로그인 실패 시 프론트엔드로 보내는 리다이렉트 응답
fn failure_redirect(method: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header(("Location", FrontendConfig::failure_url(method)))
        .finish()
}

/// 로컬 회원가입 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/signup`
#[post("/signup")]
pub async fn signup(
    payload: web::Json<SignupRequest>,
    users: web::Data<Arc<UserService>>,
    tokens: web::Data<Arc<TokenService>>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = users.signup(payload.into_inner()).await?;
    let response = auth_response(user, &tokens)?;

    Ok(HttpResponse::Created().json(response))
}

/// 로컬 로그인 핸들러
///
/// 항상 설치되어 있는 로컬 전략을 통해 자격 증명을 검증합니다.
/// 실패 원인("사용자 없음" vs "비밀번호 불일치")은 응답에서 구분되지 않습니다.
///
/// # Endpoint
/// `POST /api/v1/auth/login`
#[post("/login")]
pub async fn local_login(
    payload: web::Json<LocalLoginRequest>,
    registry: web::Data<Arc<StrategyRegistry>>,
    tokens: web::Data<Arc<TokenService>>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let strategy = registry.lookup(AuthType::Local).ok_or_else(|| {
        AppError::InternalError("로컬 전략이 설치되어 있지 않습니다".to_string())
    })?;

    let user = strategy
        .verify_credentials(&payload.email, &payload.password)
        .await?;

    log::info!("로컬 로그인 성공: {}", user.email);

    let response = auth_response(user, &tokens)?;
    Ok(HttpResponse::Ok().json(response))
}

/// 연합 로그인 시작 핸들러
///
/// 해당 방식의 전략이 활성화되어 있으면 프로바이더로의 302 리다이렉트를
/// 반환하고, 없으면 503을 반환합니다.
///
/// # Endpoint
/// `GET /api/v1/auth/{method}/login`
#[get("/{method}/login")]
pub async fn federated_login(
    path: web::Path<String>,
    registry: web::Data<Arc<StrategyRegistry>>,
) -> Result<HttpResponse, AppError> {
    let method = path.into_inner();

    let auth_type = AuthType::parse(&method).filter(|t| t.is_federated()).ok_or_else(|| {
        AppError::ValidationError(format!("지원하지 않는 인증 방식입니다: {}", method))
    })?;

    let strategy = registry.lookup(auth_type).ok_or_else(|| {
        AppError::ServiceUnavailable(format!("{} 인증이 설정되지 않았습니다", auth_type))
    })?;

    let redirect = strategy.initiate()?;

    Ok(HttpResponse::Found()
        .insert_header(("Location", redirect.location))
        .finish())
}

/// OAuth2/OIDC 콜백 핸들러
///
/// 브라우저가 최종 수신자이므로 실패 시 에러 응답 대신 프론트엔드 실패
/// 페이지로 리다이렉트합니다. 실패 원인은 서버 로그에만 남습니다.
///
/// # Endpoint
/// `GET /api/v1/auth/{method}/callback?code={code}&state={state}`
#[get("/{method}/callback")]
pub async fn oauth_callback(
    path: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
    registry: web::Data<Arc<StrategyRegistry>>,
    resolver: web::Data<Arc<IdentityResolver>>,
    tokens: web::Data<Arc<TokenService>>,
) -> Result<HttpResponse, AppError> {
    let method = path.into_inner();

    // 프로바이더가 동의 거부 등으로 에러를 돌려준 경우
    if let Some(error) = &query.error {
        log::warn!(
            "{} 콜백에서 프로바이더 에러: {} - {}",
            method,
            error,
            query.error_description.as_deref().unwrap_or("")
        );
        return Ok(failure_redirect(&method));
    }

    let params = CallbackParams::oauth(query.code.clone(), query.state.clone());
    complete_federated_login(&method, params, &registry, &resolver, &tokens).await
}

/// SAML 콜백 핸들러
///
/// IdP가 브라우저를 통해 POST하는 base64 인코딩 응답을 소비합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/saml/callback`
#[post("/saml/callback")]
pub async fn saml_callback(
    form: web::Form<SamlCallbackForm>,
    registry: web::Data<Arc<StrategyRegistry>>,
    resolver: web::Data<Arc<IdentityResolver>>,
    tokens: web::Data<Arc<TokenService>>,
) -> Result<HttpResponse, AppError> {
    let params = CallbackParams::saml(form.into_inner().saml_response);
    complete_federated_login("saml", params, &registry, &resolver, &tokens).await
}

/// 콜백 공통 경로: 전략 조회 → 교환 검증 → 아이덴티티 해석 → 토큰 발급 →
/// 프론트엔드 리다이렉트
async fn complete_federated_login(
    method: &str,
    params: CallbackParams,
    registry: &StrategyRegistry,
    resolver: &IdentityResolver,
    tokens: &TokenService,
) -> Result<HttpResponse, AppError> {
    let Some(auth_type) = AuthType::parse(method).filter(|t| t.is_federated()) else {
        return Ok(failure_redirect(method));
    };

    let Some(strategy) = registry.lookup(auth_type) else {
        log::warn!("미설정 방식 {}에 대한 콜백 요청", auth_type);
        return Ok(failure_redirect(method));
    };

    let identity = match strategy.handle_callback(&params).await {
        Ok(identity) => identity,
        Err(e) => {
            log::warn!("{} 콜백 처리 실패: {}", auth_type, e);
            return Ok(failure_redirect(method));
        }
    };

    let user = resolver.resolve(identity).await?;
    let issued = tokens.issue(&user)?;

    log::info!("{} 연합 로그인 성공: {}", auth_type, user.email);

    let location = format!(
        "{}?token={}",
        FrontendConfig::success_url(),
        urlencoding::encode(&issued.access_token)
    );

    Ok(HttpResponse::Found()
        .insert_header(("Location", location))
        .finish())
}

/// 현재 사용자 조회 핸들러
///
/// `Authorization: Bearer` 헤더의 세션 토큰을 검증하고, 토큰 주체의 최신
/// 사용자 레코드를 반환합니다.
///
/// # Endpoint
/// `GET /api/v1/auth/me`
#[get("/me")]
pub async fn me(
    request: HttpRequest,
    users: web::Data<Arc<UserService>>,
    tokens: web::Data<Arc<TokenService>>,
) -> Result<HttpResponse, AppError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(extract_bearer_token)
        .ok_or_else(|| {
            AppError::AuthenticationError("인증 토큰이 필요합니다".to_string())
        })?;

    let claims = tokens.verify(token)?;
    let user = users.find_by_id(&claims.sub).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
