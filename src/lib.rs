//! 인증 게이트웨이 백엔드
//!
//! 하나의 백엔드가 여러 로그인 방식(로컬 비밀번호, Google OAuth 2.0, OIDC, SAML)을
//! 동시에 지원하도록 하는 인증 게이트웨이입니다. 연합 프로바이더 설정은 배포 시점에
//! 고정되지 않고 데이터베이스에 저장되며, 서비스가 실행 중인 상태에서 추가·교체·제거할 수
//! 있습니다.
//!
//! # Features
//!
//! - **동적 전략 레지스트리**: 인증 방식 이름 → 실행 가능한 프로토콜 핸들러 매핑을
//!   런타임에 (재)구성. construct-then-swap 규칙으로 교체 중에도 요청 경로가 끊기지 않음
//! - **로컬 인증**: 이메일/비밀번호 회원가입 및 로그인 (bcrypt 해싱)
//! - **연합 인증**: Google OAuth 2.0, OIDC(디스커버리 포함), SAML 리다이렉트 플로우
//! - **아이덴티티 해석**: `(provider, provider_id)` 기준 사용자 찾기/생성,
//!   프로바이더 간 계정 병합 없음
//! - **관리 API**: auth_type 기준 설정 upsert 후 해당 전략 즉시 재활성화
//! - **MongoDB**: 사용자/클라이언트 설정 영구 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐      ┌──────────────────────┐
//! │    Services     │ ───► │  Strategy Registry   │ ← 활성 전략 매핑 (core)
//! └─────────────────┘      └──────────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore / ClientStore 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     MongoDB     │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use auth_gateway_backend::core::registry::StrategyRegistry;
//! use auth_gateway_backend::domain::models::AuthType;
//!
//! // 레지스트리는 전역 싱글톤이 아니라 명시적으로 생성해 주입합니다
//! let registry = Arc::new(StrategyRegistry::new(clients, context));
//! registry.initialize_all().await;
//!
//! if let Some(strategy) = registry.lookup(AuthType::Google) {
//!     let redirect = strategy.initiate()?;
//! }
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;

#[cfg(test)]
pub mod test_support;
