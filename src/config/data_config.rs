//! 서버/데이터 스토어/프론트엔드 설정
//!
//! 환경 변수에서 읽어오는 인프라 관련 설정값들입니다.

use std::env;

/// HTTP 서버 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버 바인드 호스트 (기본값: `127.0.0.1`)
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    /// 서버 포트 (기본값: `8080`)
    pub fn port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(8080)
    }

    /// 워커 스레드 수 (기본값: `4`)
    pub fn workers() -> usize {
        env::var("WORKERS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(4)
    }

    /// 외부에서 접근 가능한 게이트웨이 베이스 URL (기본값: `http://localhost:8080`)
    ///
    /// 클라이언트 설정이 `callbackUrl`을 생략했을 때 기본 콜백 URL을 만드는 데
    /// 사용됩니다.
    pub fn public_base_url() -> String {
        env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
    }
}

/// MongoDB 연결 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    /// MongoDB 연결 URI (기본값: `mongodb://localhost:27017`)
    pub fn uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    /// 데이터베이스 이름 (기본값: `auth_gateway_dev`)
    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "auth_gateway_dev".to_string())
    }
}

/// 프론트엔드 리다이렉트 설정
///
/// 연합 로그인 콜백 처리 후 사용자의 브라우저가 이동할 위치입니다.
pub struct FrontendConfig;

impl FrontendConfig {
    /// 프론트엔드 베이스 URL (기본값: `http://localhost:3000`)
    pub fn base_url() -> String {
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
    }

    /// 연합 로그인 성공 시 리다이렉트 URL
    pub fn success_url() -> String {
        format!("{}/home", Self::base_url())
    }

    /// 연합 로그인 실패 시 리다이렉트 URL. 실패 원인 대신 방식 이름만 노출합니다.
    pub fn failure_url(method: &str) -> String {
        format!("{}/login?error={}", Self::base_url(), method)
    }
}

/// Rate Limiting 설정
pub struct RateLimitConfig;

impl RateLimitConfig {
    /// 초당 허용 요청 수 (기본값: `10`)
    pub fn per_second() -> u64 {
        env::var("RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(10)
    }

    /// 버스트 허용량 (기본값: `20`)
    pub fn burst_size() -> u32 {
        env::var("RATE_LIMIT_BURST_SIZE")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(20)
    }
}
