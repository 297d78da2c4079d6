//! 도메인 모델
//!
//! 저장소 엔티티가 아닌, 인증 플로우 내부에서 오가는 값 타입들입니다.

pub mod auth_type;
pub mod external_identity;

pub use auth_type::AuthType;
pub use external_identity::ExternalIdentity;
