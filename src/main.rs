//! 인증 게이트웨이 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 전략 레지스트리를 초기화합니다.
//! MongoDB에 저장된 인증 방식 설정을 읽어 전략을 일괄 활성화하고, JWT 기반의
//! 무상태 인증 REST API를 제공합니다.

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Duration;

use auth_gateway_backend::config::{
    FrontendConfig, HttpClientConfig, RateLimitConfig, ServerConfig,
};
use auth_gateway_backend::core::StrategyRegistry;
use auth_gateway_backend::db::Database;
use auth_gateway_backend::repositories::{
    ClientRepository, ClientStore, UserRepository, UserStore,
};
use auth_gateway_backend::routes::configure_all_routes;
use auth_gateway_backend::services::auth::strategies::StrategyContext;
use auth_gateway_backend::services::auth::{IdentityResolver, TokenService};
use auth_gateway_backend::services::clients::ClientService;
use auth_gateway_backend::services::users::{BcryptHasher, PasswordHasher, UserService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 인증 게이트웨이 시작중...");

    // 데이터 스토어 초기화
    let database = initialize_database().await;

    // 저장소 구성 및 인덱스 보장
    let user_repo = UserRepository::new(database.clone());
    if let Err(e) = user_repo.ensure_indexes().await {
        warn!("사용자 인덱스 생성 실패 (기동은 계속합니다): {}", e);
    }

    let users: Arc<dyn UserStore> = Arc::new(user_repo);
    let clients: Arc<dyn ClientStore> = Arc::new(ClientRepository::new(database.clone()));

    // 공유 의존성 구성
    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::new());
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(HttpClientConfig::timeout_seconds()))
        .build()
        .expect("HTTP 클라이언트 생성 실패");

    // 전역 싱글턴이 아니라 여기서 명시적으로 생성해 핸들러에 주입합니다
    let registry = Arc::new(StrategyRegistry::new(
        clients.clone(),
        StrategyContext {
            users: users.clone(),
            hasher: hasher.clone(),
            http,
        },
    ));

    // 저장된 설정으로 전략 일괄 활성화 (개별 실패는 경고 후 계속)
    registry.initialize_all().await;
    info!("✅ 활성화된 인증 방식: {:?}", registry.list_initialized());

    let user_service = Arc::new(UserService::new(users.clone(), hasher.clone()));
    let client_service = Arc::new(ClientService::new(clients.clone(), registry.clone()));
    let identity_resolver = Arc::new(IdentityResolver::new(users.clone()));
    let token_service = Arc::new(TokenService::new());

    // HTTP 서버 시작
    start_http_server(
        registry,
        user_service,
        client_service,
        identity_resolver,
        token_service,
    )
    .await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, Rate Limiting, 경로 정규화 미들웨어를 포함하며, 부팅 시
/// 구성된 서비스 객체들을 `web::Data`로 핸들러에 주입합니다.
async fn start_http_server(
    registry: Arc<StrategyRegistry>,
    user_service: Arc<UserService>,
    client_service: Arc<ClientService>,
    identity_resolver: Arc<IdentityResolver>,
    token_service: Arc<TokenService>,
) -> std::io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    // Rate Limiting 설정
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(RateLimitConfig::per_second())
        .burst_size(RateLimitConfig::burst_size())
        .use_headers()
        .finish()
        .unwrap();

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        RateLimitConfig::per_second(),
        RateLimitConfig::burst_size()
    );

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            // 서비스 주입
            .app_data(web::Data::new(registry.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(client_service.clone()))
            .app_data(web::Data::new(identity_resolver.clone()))
            .app_data(web::Data::new(token_service.clone()))
            // 라우트 설정
            .configure(configure_all_routes)
    })
    .bind(&bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// PROFILE 환경변수에 따라 적절한 .env 파일을 로드합니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// 환경변수 RUST_LOG를 기반으로 로깅 레벨을 설정합니다.
/// 기본값은 info 레벨이며, actix_web은 debug 레벨로 설정됩니다.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB 연결을 초기화합니다
///
/// # Panics
///
/// * MongoDB 연결 실패 시
async fn initialize_database() -> Arc<Database> {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(Database::new().await.expect("데이터베이스 연결 실패"));

    info!("✅ MongoDB 연결 성공");
    database
}

/// CORS 설정을 구성합니다
///
/// 프론트엔드와의 통신을 위한 CORS 설정입니다. 프론트엔드 베이스 URL과
/// 로컬 개발 주소를 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin(&FrontendConfig::base_url())
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600)
}
