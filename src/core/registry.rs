//! 전략 레지스트리
//!
//! 활성 인증 전략의 단일 진실 공급원입니다. 전역 싱글턴이 아니라 부팅 시점에
//! 명시적으로 생성되어 핸들러에 주입되는 일반 객체이며, 내부적으로
//! `RwLock<HashMap>`으로 동시 조회와 드문 교체를 조정합니다.
//!
//! ## 교체 규율 (construct-then-swap)
//!
//! 새 전략의 구성(설정 검증, OIDC 디스커버리 같은 네트워크 호출 포함)은 락을
//! 잡지 않은 상태에서 끝까지 수행하고, 성공했을 때만 쓰기 락을 잡아 맵 엔트리를
//! 교체합니다. 구성 실패 시 기존 엔트리는 그대로 남으므로, 이미 활성화된 방식이
//! 잘못된 재설정 시도 때문에 비활성화되는 일은 없습니다. 진행 중인 인증 플로우는
//! 교체 전에 잡은 `Arc`를 통해 이전 전략으로 끝까지 진행됩니다.

use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::core::errors::StrategyError;
use crate::domain::models::AuthType;
use crate::repositories::ClientStore;
use crate::services::auth::strategies::{self, LocalStrategy, StrategyContext};
use crate::services::auth::strategy::AuthStrategy;

/// 전략 레지스트리
pub struct StrategyRegistry {
    clients: Arc<dyn ClientStore>,
    context: StrategyContext,
    strategies: RwLock<HashMap<AuthType, Arc<dyn AuthStrategy>>>,
}

impl StrategyRegistry {
    /// 로컬 전략이 설치된 레지스트리를 생성합니다.
    ///
    /// 로컬 비밀번호 인증은 외부 설정이 필요 없으므로 생성 시점에 무조건
    /// 등록되며, 이후 비활성화되지 않습니다.
    pub fn new(clients: Arc<dyn ClientStore>, context: StrategyContext) -> Self {
        let local = LocalStrategy::new(context.users.clone(), context.hasher.clone());

        let mut strategies: HashMap<AuthType, Arc<dyn AuthStrategy>> = HashMap::new();
        strategies.insert(AuthType::Local, Arc::new(local));

        Self {
            clients,
            context,
            strategies: RwLock::new(strategies),
        }
    }

    /// 저장된 모든 설정으로 전략을 일괄 활성화합니다 (부팅 시 1회).
    ///
    /// 개별 설정의 실패는 경고 로그만 남기고 다음 설정으로 넘어갑니다.
    /// 설정이 하나도 유효하지 않아도 게이트웨이는 로컬 인증만으로 기동합니다.
    pub async fn initialize_all(&self) {
        let clients = match self.clients.get_all().await {
            Ok(clients) => clients,
            Err(e) => {
                warn!("인증 방식 설정 조회 실패, 로컬 인증만으로 기동합니다: {}", e);
                return;
            }
        };

        info!("저장된 인증 방식 설정 {}건 초기화 시작", clients.len());

        for client in &clients {
            match self.activate(&client.auth_type, &client.config).await {
                Ok(auth_type) => info!("인증 방식 활성화 완료: {}", auth_type),
                Err(e) => warn!("인증 방식 활성화 실패 (건너뜀): {}", e),
            }
        }
    }

    /// 설정 블롭으로 전략 하나를 (재)활성화합니다.
    ///
    /// 파싱 → 검증 → 구성까지 락 없이 진행하고, 완성된 인스턴스만 쓰기 락
    /// 아래에서 교체합니다. 어느 단계든 실패하면 기존 등록 상태는 변하지
    /// 않습니다.
    pub async fn activate(
        &self,
        auth_type: &str,
        config: &serde_json::Value,
    ) -> Result<AuthType, StrategyError> {
        let parsed = AuthType::parse(auth_type)
            .ok_or_else(|| StrategyError::UnsupportedAuthType(auth_type.to_string()))?;

        let strategy = strategies::build(parsed, config, &self.context).await?;

        self.strategies.write().unwrap().insert(parsed, strategy);
        Ok(parsed)
    }

    /// 전략 등록을 해제합니다. 로컬 전략은 해제할 수 없습니다.
    pub fn deactivate(&self, auth_type: AuthType) -> Result<(), StrategyError> {
        if auth_type == AuthType::Local {
            return Err(StrategyError::UnsupportedAuthType(
                "local 전략은 해제할 수 없습니다".to_string(),
            ));
        }

        self.strategies.write().unwrap().remove(&auth_type);
        Ok(())
    }

    /// 활성 전략 조회. 진행 중인 플로우는 반환된 `Arc`를 통해 교체와 무관하게
    /// 완료됩니다.
    pub fn lookup(&self, auth_type: AuthType) -> Option<Arc<dyn AuthStrategy>> {
        self.strategies.read().unwrap().get(&auth_type).cloned()
    }

    /// 해당 방식이 현재 활성 상태인지 확인합니다.
    pub fn is_initialized(&self, auth_type: AuthType) -> bool {
        self.strategies.read().unwrap().contains_key(&auth_type)
    }

    /// 문자열 키로 활성 여부를 확인합니다. 알 수 없는 키는 비활성으로 봅니다.
    pub fn is_initialized_name(&self, auth_type: &str) -> bool {
        AuthType::parse(auth_type)
            .map(|parsed| self.is_initialized(parsed))
            .unwrap_or(false)
    }

    /// 현재 활성화된 방식 목록 (정렬된 순서)
    pub fn list_initialized(&self) -> Vec<AuthType> {
        let mut initialized: Vec<AuthType> =
            self.strategies.read().unwrap().keys().copied().collect();
        initialized.sort();
        initialized
    }
}
