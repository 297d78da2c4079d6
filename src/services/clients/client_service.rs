//! 인증 방식 설정(클라이언트) 관리 서비스
//!
//! 관리 API의 설정 저장과 전략 핫 리로드를 연결합니다. 저장은 항상 성공
//! 기준으로 처리하고, 활성화 실패는 저장을 되돌리지 않습니다 — 운영자는
//! 저장된 설정을 수정해 재시도할 수 있습니다.

use log::warn;
use std::sync::Arc;

use crate::core::StrategyRegistry;
use crate::domain::dto::UpsertClientRequest;
use crate::domain::entities::Client;
use crate::errors::{AppError, AppResult};
use crate::repositories::ClientStore;

/// 인증 방식 설정 서비스
pub struct ClientService {
    clients: Arc<dyn ClientStore>,
    registry: Arc<StrategyRegistry>,
}

impl ClientService {
    pub fn new(clients: Arc<dyn ClientStore>, registry: Arc<StrategyRegistry>) -> Self {
        Self { clients, registry }
    }

    /// 설정을 저장(upsert)하고 해당 전략의 재활성화를 시도합니다.
    ///
    /// - `id`가 있으면 해당 레코드를 갱신합니다 (없는 id는 404)
    /// - `id`가 없고 같은 `auth_type` 레코드가 있으면 그 레코드를 갱신합니다
    /// - 둘 다 아니면 새로 생성합니다
    ///
    /// 반환값의 두 번째 요소는 저장 직후의 활성화 성공 여부입니다.
    pub async fn upsert_and_activate(
        &self,
        request: UpsertClientRequest,
    ) -> AppResult<(Client, bool)> {
        let saved = match &request.id {
            Some(id) => self
                .clients
                .update(id, &request.name, &request.auth_type, &request.config)
                .await?
                .ok_or_else(|| AppError::NotFound("설정을 찾을 수 없습니다".to_string()))?,
            None => match self.clients.find_by_auth_type(&request.auth_type).await? {
                Some(existing) => {
                    let id = existing
                        .id_string()
                        .ok_or_else(|| AppError::InternalError("저장된 설정에 ID가 없습니다".to_string()))?;
                    self.clients
                        .update(&id, &request.name, &request.auth_type, &request.config)
                        .await?
                        .ok_or_else(|| AppError::NotFound("설정을 찾을 수 없습니다".to_string()))?
                }
                None => {
                    let client = Client::new(request.name, request.auth_type, request.config);
                    self.clients.create(client).await?
                }
            },
        };

        let initialized = match self.registry.activate(&saved.auth_type, &saved.config).await {
            Ok(_) => true,
            Err(e) => {
                warn!("설정은 저장되었으나 활성화에 실패했습니다: {}", e);
                false
            }
        };

        Ok((saved, initialized))
    }

    /// 저장된 모든 설정을 조회합니다.
    pub async fn get_all(&self) -> AppResult<Vec<Client>> {
        self.clients.get_all().await
    }

    /// 방식 이름(`auth_type`)으로 설정을 조회합니다. 없으면 404입니다.
    pub async fn find_by_auth_type(&self, auth_type: &str) -> AppResult<Client> {
        self.clients
            .find_by_auth_type(auth_type)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} 설정을 찾을 수 없습니다", auth_type)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::domain::models::AuthType;
    use crate::services::auth::strategies::StrategyContext;
    use crate::test_support::{MemoryClientStore, MemoryUserStore, PlainTextHasher};

    fn service() -> (ClientService, Arc<MemoryClientStore>, Arc<StrategyRegistry>) {
        let clients = Arc::new(MemoryClientStore::new());
        let context = StrategyContext {
            users: Arc::new(MemoryUserStore::new()),
            hasher: Arc::new(PlainTextHasher),
            http: reqwest::Client::new(),
        };
        let registry = Arc::new(StrategyRegistry::new(clients.clone(), context));

        (
            ClientService::new(clients.clone(), registry.clone()),
            clients,
            registry,
        )
    }

    fn google_request(id: Option<String>, config: serde_json::Value) -> UpsertClientRequest {
        UpsertClientRequest {
            id,
            name: "구글 로그인".to_string(),
            auth_type: "google".to_string(),
            config,
        }
    }

    #[actix_web::test]
    async fn test_upsert_creates_and_activates() {
        let (service, clients, registry) = service();

        let (saved, initialized) = service
            .upsert_and_activate(google_request(
                None,
                json!({ "clientId": "id", "clientSecret": "secret" }),
            ))
            .await
            .unwrap();

        assert!(saved.id.is_some());
        assert!(initialized);
        assert!(registry.is_initialized(AuthType::Google));
        assert_eq!(clients.get_all().await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_upsert_saves_invalid_config_but_reports_uninitialized() {
        let (service, clients, registry) = service();

        let (saved, initialized) = service
            .upsert_and_activate(google_request(None, json!({ "clientId": "id" })))
            .await
            .unwrap();

        // 저장은 되고 활성화만 실패합니다
        assert!(saved.id.is_some());
        assert!(!initialized);
        assert!(!registry.is_initialized(AuthType::Google));
        assert_eq!(clients.get_all().await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_upsert_without_id_updates_existing_auth_type_record() {
        let (service, clients, _) = service();
        service
            .upsert_and_activate(google_request(
                None,
                json!({ "clientId": "old", "clientSecret": "old" }),
            ))
            .await
            .unwrap();

        let (saved, _) = service
            .upsert_and_activate(google_request(
                None,
                json!({ "clientId": "new", "clientSecret": "new" }),
            ))
            .await
            .unwrap();

        // 같은 auth_type은 레코드가 늘어나지 않고 in-place 갱신됩니다
        assert_eq!(clients.get_all().await.unwrap().len(), 1);
        assert_eq!(saved.config["clientId"], "new");
    }

    #[actix_web::test]
    async fn test_upsert_with_unknown_id_is_not_found() {
        let (service, _, _) = service();

        let result = service
            .upsert_and_activate(google_request(
                Some("65f000000000000000000000".to_string()),
                json!({ "clientId": "id", "clientSecret": "secret" }),
            ))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
