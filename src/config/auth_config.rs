//! 인증 관련 설정
//!
//! JWT 세션 토큰, 비밀번호 해싱, OAuth state 서명, 외부 HTTP 호출 타임아웃
//! 설정을 담당합니다.
//!
//! # 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_EXPIRATION_HOURS="24"
//! export BCRYPT_COST="12"
//! export OAUTH_STATE_SECRET="oauth-state-secret"
//! export HTTP_CLIENT_TIMEOUT_SECONDS="10"
//! ```

use std::env;

/// JWT 세션 토큰 설정
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명 비밀키
    ///
    /// 프로덕션에서는 반드시 `JWT_SECRET` 환경 변수를 설정해야 합니다.
    /// 기본값은 개발 환경 전용입니다.
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET이 설정되지 않아 개발용 기본값을 사용합니다");
            "dev-only-jwt-secret".to_string()
        })
    }

    /// 액세스 토큰 만료 시간 (기본값: 24시간)
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(24)
    }
}

/// 비밀번호 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt cost (기본값: `bcrypt::DEFAULT_COST`, 허용 범위 4-15)
    pub fn bcrypt_cost() -> u32 {
        let cost = env::var("BCRYPT_COST")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(bcrypt::DEFAULT_COST);

        clamp_bcrypt_cost(cost)
    }
}

/// bcrypt가 허용하는 4-15 범위로 cost를 보정합니다.
fn clamp_bcrypt_cost(cost: u32) -> u32 {
    cost.clamp(4, 15)
}

/// OAuth state 파라미터 설정
///
/// 리다이렉트 왕복 사이에 서버가 상태를 보관하지 않도록, state 값은
/// 타임스탬프와 서버 비밀키 기반 다이제스트로 구성됩니다.
pub struct OAuthStateConfig;

impl OAuthStateConfig {
    /// state 다이제스트 생성용 비밀키
    pub fn secret() -> String {
        env::var("OAUTH_STATE_SECRET").unwrap_or_else(|_| "dev-only-state-secret".to_string())
    }

    /// state 유효 시간 (기본값: 600초)
    pub fn ttl_seconds() -> i64 {
        env::var("OAUTH_STATE_TTL_SECONDS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(600)
    }
}

/// 외부 프로바이더 HTTP 호출 설정
///
/// 토큰 교환, userinfo 조회, OIDC 디스커버리 요청에 적용되는 타임아웃입니다.
/// 타임아웃 만료는 실패로 처리되며 레지스트리가 자동으로 재시도하지 않습니다.
pub struct HttpClientConfig;

impl HttpClientConfig {
    /// 요청 타임아웃 (기본값: 10초)
    pub fn timeout_seconds() -> u64 {
        env::var("HTTP_CLIENT_TIMEOUT_SECONDS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_bcrypt_cost_within_range() {
        assert_eq!(clamp_bcrypt_cost(12), 12);
    }

    #[test]
    fn test_clamp_bcrypt_cost_too_low() {
        assert_eq!(clamp_bcrypt_cost(1), 4);
    }

    #[test]
    fn test_clamp_bcrypt_cost_too_high() {
        assert_eq!(clamp_bcrypt_cost(31), 15);
    }
}
