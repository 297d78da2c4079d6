//! 인증 방식 설정 관리 HTTP 핸들러
//!
//! 운영자용 관리 API입니다. 설정을 저장하면 게이트웨이 재시작 없이 해당
//! 전략이 즉시 (재)활성화됩니다.
//!
//! # Endpoints
//!
//! - `GET  /api/v1/clients` — 저장된 설정 전체 목록
//! - `GET  /api/v1/clients/{auth_type}` — 방식 이름으로 설정 단건 조회
//! - `POST /api/v1/clients` — 설정 생성/갱신 + 전략 핫 리로드
//! - `GET  /api/v1/strategies/initialized` — 활성화된 방식 목록

use actix_web::{HttpResponse, get, post, web};
use std::sync::Arc;
use validator::Validate;

use crate::core::StrategyRegistry;
use crate::domain::dto::{ClientResponse, InitializedStrategiesResponse, UpsertClientRequest};
use crate::errors::AppError;
use crate::services::clients::ClientService;

/// 설정 전체 목록 조회 핸들러
///
/// 각 레코드에 현재 레지스트리의 활성화 여부(`initialized`)를 붙여 반환합니다.
///
/// # Endpoint
/// `GET /api/v1/clients`
#[get("")]
pub async fn get_all_clients(
    service: web::Data<Arc<ClientService>>,
    registry: web::Data<Arc<StrategyRegistry>>,
) -> Result<HttpResponse, AppError> {
    let clients = service.get_all().await?;

    let response: Vec<ClientResponse> = clients
        .into_iter()
        .map(|client| ClientResponse::annotated(client, &registry))
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

/// 설정 단건 조회 핸들러
///
/// 레코드 ID가 아니라 방식 이름(`auth_type`)으로 조회합니다.
/// 해당 방식의 설정이 저장되어 있지 않으면 404입니다.
///
/// # Endpoint
/// `GET /api/v1/clients/{auth_type}`
#[get("/{auth_type}")]
pub async fn get_client(
    path: web::Path<String>,
    service: web::Data<Arc<ClientService>>,
    registry: web::Data<Arc<StrategyRegistry>>,
) -> Result<HttpResponse, AppError> {
    let client = service.find_by_auth_type(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ClientResponse::annotated(client, &registry)))
}

/// 설정 생성/갱신 핸들러
///
/// 저장 후 해당 전략의 활성화를 시도합니다. 활성화 실패는 요청 실패가
/// 아닙니다 — 저장된 레코드와 함께 `initialized: false`로 응답하며, 기존에
/// 활성화되어 있던 전략은 그대로 유지됩니다.
///
/// # Endpoint
/// `POST /api/v1/clients`
#[post("")]
pub async fn upsert_client(
    payload: web::Json<UpsertClientRequest>,
    service: web::Data<Arc<ClientService>>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let (client, initialized) = service.upsert_and_activate(payload.into_inner()).await?;

    // 조회 시점의 레지스트리 상태가 아니라 방금의 활성화 결과를 보고합니다
    let response = ClientResponse {
        id: client.id_string().unwrap_or_default(),
        name: client.name,
        auth_type: client.auth_type,
        config: client.config,
        created_at: client.created_at.try_to_rfc3339_string().unwrap_or_default(),
        updated_at: client.updated_at.try_to_rfc3339_string().unwrap_or_default(),
        initialized,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// 활성화된 방식 목록 조회 핸들러
///
/// # Endpoint
/// `GET /api/v1/strategies/initialized`
#[get("/initialized")]
pub async fn get_initialized_strategies(
    registry: web::Data<Arc<StrategyRegistry>>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(InitializedStrategiesResponse {
        strategies: registry.list_initialized(),
    }))
}
