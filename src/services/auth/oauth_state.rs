//! OAuth state 파라미터 생성/검증
//!
//! 리다이렉트 기반 플로우의 CSRF 방지용 state 값입니다.
//!
//! 시작(initiate)과 콜백 사이에 서버가 세션 상태를 보관하지 않도록 state 값
//! 자체가 검증에 필요한 모든 정보를 담습니다:
//!
//! ```text
//! state     = "{timestamp}.{digest}"
//! digest    = base64url( sha256("{timestamp}:{secret}") )
//! ```
//!
//! 검증은 형식 확인 → 만료 확인 → 다이제스트 재계산 순으로 진행됩니다.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::config::OAuthStateConfig;
use crate::errors::{AppError, AppResult};

/// 새 state 값을 발급합니다.
pub fn issue_state() -> String {
    let timestamp = Utc::now().timestamp();
    format!("{}.{}", timestamp, digest_for(timestamp, &OAuthStateConfig::secret()))
}

/// 콜백으로 돌아온 state 값을 검증합니다.
///
/// 형식 오류, 만료, 다이제스트 불일치는 모두 동일한 `AuthenticationError`로
/// 처리됩니다.
pub fn verify_state(state: &str) -> AppResult<()> {
    verify_with(state, &OAuthStateConfig::secret(), OAuthStateConfig::ttl_seconds())
}

fn digest_for(timestamp: i64, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}:{}", timestamp, secret).as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

fn verify_with(state: &str, secret: &str, ttl_seconds: i64) -> AppResult<()> {
    let invalid = || AppError::AuthenticationError("유효하지 않은 state 파라미터입니다".to_string());

    let (timestamp_raw, digest) = state.split_once('.').ok_or_else(invalid)?;
    let timestamp: i64 = timestamp_raw.parse().map_err(|_| invalid())?;

    let age = Utc::now().timestamp() - timestamp;
    if age < 0 || age > ttl_seconds {
        return Err(invalid());
    }

    if digest_for(timestamp, secret) != digest {
        return Err(invalid());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_state_verifies() {
        let timestamp = Utc::now().timestamp();
        let state = format!("{}.{}", timestamp, digest_for(timestamp, "secret"));

        assert!(verify_with(&state, "secret", 600).is_ok());
    }

    #[test]
    fn test_expired_state_rejected() {
        let timestamp = Utc::now().timestamp() - 3600;
        let state = format!("{}.{}", timestamp, digest_for(timestamp, "secret"));

        assert!(verify_with(&state, "secret", 600).is_err());
    }

    #[test]
    fn test_tampered_digest_rejected() {
        let timestamp = Utc::now().timestamp();
        let state = format!("{}.not-the-right-digest", timestamp);

        assert!(verify_with(&state, "secret", 600).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let timestamp = Utc::now().timestamp();
        let state = format!("{}.{}", timestamp, digest_for(timestamp, "other-secret"));

        assert!(verify_with(&state, "secret", 600).is_err());
    }

    #[test]
    fn test_malformed_state_rejected() {
        assert!(verify_with("no-separator", "secret", 600).is_err());
        assert!(verify_with("abc.def", "secret", 600).is_err());
    }
}
