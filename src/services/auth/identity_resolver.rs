//! 아이덴티티 해석기
//!
//! 프로토콜 어댑터가 산출한 정규화된 외부 아이덴티티를 내부 사용자 레코드로
//! 해석합니다. `(provider, provider_id)` 쌍이 처음이면 사용자를 새로 만들고
//! (just-in-time provisioning), 이미 있으면 기존 레코드를 반환합니다.

use log::info;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::models::{AuthType, ExternalIdentity};
use crate::errors::{AppError, AppResult};
use crate::repositories::UserStore;

/// 아이덴티티 해석기
pub struct IdentityResolver {
    users: Arc<dyn UserStore>,
}

impl IdentityResolver {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// 외부 아이덴티티를 사용자 레코드로 해석합니다.
    ///
    /// 이메일이 없는 아이덴티티는 플레이스홀더 이메일로 생성됩니다. 같은
    /// 이메일의 로컬 계정이 있더라도 연합 계정은 별개 레코드로 공존하며
    /// 병합되지 않습니다.
    pub async fn resolve(&self, identity: ExternalIdentity) -> AppResult<User> {
        // 로컬 아이덴티티는 이 경로로 올 수 없습니다
        if identity.provider == AuthType::Local {
            return Err(AppError::InternalError(
                "로컬 아이덴티티는 해석 대상이 아닙니다".to_string(),
            ));
        }

        if let Some(existing) = self
            .users
            .find_by_provider(identity.provider, &identity.provider_id)
            .await?
        {
            return Ok(existing);
        }

        let email = identity.resolved_email();
        let user = User::new_federated(email, identity.provider, identity.provider_id.clone());
        let created = self.users.create(user).await?;

        info!(
            "연합 사용자 신규 생성: provider={}, provider_id={}",
            identity.provider, identity.provider_id
        );

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryUserStore;

    fn resolver() -> (IdentityResolver, Arc<MemoryUserStore>) {
        let users = Arc::new(MemoryUserStore::new());
        (IdentityResolver::new(users.clone()), users)
    }

    fn google_identity(provider_id: &str, email: Option<&str>) -> ExternalIdentity {
        ExternalIdentity::new(
            AuthType::Google,
            provider_id.to_string(),
            email.map(|e| e.to_string()),
        )
    }

    #[actix_web::test]
    async fn test_first_login_creates_then_second_returns_same_user() {
        let (resolver, users) = resolver();

        let first = resolver
            .resolve(google_identity("g-1", Some("alice@example.com")))
            .await
            .unwrap();
        let second = resolver
            .resolve(google_identity("g-1", Some("alice@example.com")))
            .await
            .unwrap();

        assert_eq!(first.id_string(), second.id_string());
        assert_eq!(users.len(), 1);
    }

    #[actix_web::test]
    async fn test_missing_email_gets_placeholder() {
        let (resolver, _) = resolver();

        let user = resolver.resolve(google_identity("g-2", None)).await.unwrap();

        assert_eq!(user.email, "g-2@google.invalid");
        assert!(user.password_hash.is_none());
    }

    #[actix_web::test]
    async fn test_federated_account_coexists_with_local_same_email() {
        let (resolver, users) = resolver();
        let local = users.seed_local("alice@example.com", "plain:pw").await;

        let federated = resolver
            .resolve(google_identity("g-3", Some("alice@example.com")))
            .await
            .unwrap();

        assert_ne!(local.id_string(), federated.id_string());
        assert_eq!(users.len(), 2);

        // 로컬 로그인 경로의 이메일 조회는 여전히 로컬 계정을 돌려줍니다
        let by_email = users.find_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id_string(), local.id_string());
    }

    #[actix_web::test]
    async fn test_local_identity_is_rejected() {
        let (resolver, _) = resolver();
        let identity = ExternalIdentity::new(AuthType::Local, "x".to_string(), None);

        assert!(resolver.resolve(identity).await.is_err());
    }
}
