//! 인증 방식 설정 관리 서비스

pub mod client_service;

pub use client_service::ClientService;
