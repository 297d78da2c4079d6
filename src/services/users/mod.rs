//! 사용자 서비스

pub mod password_hasher;
pub mod user_service;

pub use password_hasher::{BcryptHasher, PasswordHasher};
pub use user_service::UserService;
