//! 인증 서비스 계층
//!
//! 전략 트레이트와 프로토콜 어댑터, 아이덴티티 해석기, 세션 토큰 서비스를
//! 포함합니다.

pub mod identity_resolver;
pub mod oauth_state;
pub mod strategies;
pub mod strategy;
pub mod token_service;

pub use identity_resolver::IdentityResolver;
pub use token_service::TokenService;
