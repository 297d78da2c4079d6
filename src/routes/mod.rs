//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 인증 라우트, 인증 방식 설정 관리 라우트와 헬스체크 엔드포인트를 포함합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use actix_web::{HttpResponse, get, web};
use serde_json::json;

use crate::handlers;

/// 모든 라우트를 설정합니다
///
/// 기능별로 분할된 라우트들을 통합하여 애플리케이션에 등록합니다.
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_auth_routes(cfg);
    configure_client_routes(cfg);
}

/// 인증 관련 라우트를 설정합니다
///
/// 모든 인증 라우트는 Public 접근이 가능합니다 (인증을 위한 엔드포인트이므로).
///
/// # Available Routes
///
/// ## 로컬 인증
/// - `POST /api/v1/auth/signup` - 이메일/비밀번호 회원가입
/// - `POST /api/v1/auth/login` - 이메일/비밀번호 로그인
/// - `GET /api/v1/auth/me` - 현재 사용자 정보 조회
///
/// ## 연합 인증 (활성화된 방식에 한해)
/// - `GET /api/v1/auth/{method}/login` - 프로바이더로 리다이렉트
/// - `GET /api/v1/auth/{method}/callback` - OAuth2/OIDC 콜백
/// - `POST /api/v1/auth/saml/callback` - SAML 콜백
///
/// # Examples
///
/// ```bash
/// # 로컬 로그인
/// curl -X POST http://localhost:8080/api/v1/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"user@example.com","password":"password123"}'
///
/// # Google 로그인 시작 (302 응답)
/// curl -i http://localhost:8080/api/v1/auth/google/login
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            // 로컬 인증
            .service(handlers::auth::signup)
            .service(handlers::auth::local_login)
            .service(handlers::auth::me)
            // 연합 인증 — 고정 경로(saml/callback)를 {method} 패턴보다 먼저 등록
            .service(handlers::auth::saml_callback)
            .service(handlers::auth::federated_login)
            .service(handlers::auth::oauth_callback),
    );
}

/// 인증 방식 설정 관리 라우트를 설정합니다
///
/// # Available Routes
///
/// - `GET /api/v1/clients` - 설정 전체 목록 (활성화 여부 포함)
/// - `GET /api/v1/clients/{auth_type}` - 방식 이름으로 설정 단건 조회
/// - `POST /api/v1/clients` - 설정 생성/갱신 + 전략 핫 리로드
/// - `GET /api/v1/strategies/initialized` - 활성화된 방식 목록
///
/// # Examples
///
/// ```bash
/// # Google OAuth 설정 등록 (재시작 없이 즉시 활성화)
/// curl -X POST http://localhost:8080/api/v1/clients \
///   -H "Content-Type: application/json" \
///   -d '{"name":"Google 로그인","auth_type":"google","config":{"clientId":"...","clientSecret":"..."}}'
/// ```
fn configure_client_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/clients")
            .service(handlers::clients::get_all_clients)
            .service(handlers::clients::upsert_client)
            .service(handlers::clients::get_client),
    );

    cfg.service(
        web::scope("/api/v1/strategies")
            .service(handlers::clients::get_initialized_strategies),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "auth-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
