//! 도메인 계층
//!
//! 엔티티, 값 모델, 요청/응답 DTO를 포함합니다.

pub mod dto;
pub mod entities;
pub mod models;
