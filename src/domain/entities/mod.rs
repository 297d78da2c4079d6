//! 영속화 엔티티

pub mod client;
pub mod user;

pub use client::Client;
pub use user::User;
