//! Configuration Module
//!
//! 게이트웨이의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, 데이터베이스, 프론트엔드 관련 설정
//! - [`auth_config`] - JWT, 비밀번호 해싱, OAuth state 관련 설정
//!
//! ## 설계 원칙
//!
//! - 민감한 정보는 환경 변수로만 제공합니다
//! - 기본값은 개발 환경에서만 안전합니다
//! - 동적으로 바뀌는 인증 방식 설정(클라이언트 설정 블롭)은 여기가 아니라
//!   데이터베이스에 저장되며, 전략 레지스트리가 소비합니다

pub mod auth_config;
pub mod data_config;

pub use auth_config::*;
pub use data_config::*;
