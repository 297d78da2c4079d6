//! 테스트 전용 인메모리 페이크
//!
//! 저장소 트레이트의 인메모리 구현과 평문 해셔를 제공합니다. MongoDB 없이
//! 레지스트리/서비스/전략 로직을 단독으로 검증하는 데 사용합니다.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

use crate::domain::entities::{Client, User};
use crate::domain::models::AuthType;
use crate::errors::{AppError, AppResult};
use crate::repositories::{ClientStore, UserStore, UserUpdate};
use crate::services::users::password_hasher::PasswordHasher;

/// 인메모리 사용자 저장소
///
/// 실제 저장소와 동일한 유일성 규칙을 흉내냅니다:
/// `(provider, email)` 유일, `(provider, provider_id)` 유일.
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }

    /// 로컬 사용자를 바로 심습니다.
    pub async fn seed_local(&self, email: &str, password_hash: &str) -> User {
        let user = User::new_local(email.to_string(), password_hash.to_string());
        self.create(user).await.unwrap()
    }

    /// 연합 사용자를 바로 심습니다.
    pub async fn seed_federated(&self, provider_id: &str, provider: AuthType, email: &str) -> User {
        let user = User::new_federated(email.to_string(), provider, provider_id.to_string());
        self.create(user).await.unwrap()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.id_string().as_deref() == Some(id))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.provider == AuthType::Local && u.email == email)
            .cloned())
    }

    async fn find_by_provider(&self, provider: AuthType, provider_id: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.provider == provider && u.provider_id.as_deref() == Some(provider_id))
            .cloned())
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();

        let duplicate = users.iter().any(|u| {
            (u.provider == user.provider && u.email == user.email)
                || (u.provider_id.is_some()
                    && u.provider == user.provider
                    && u.provider_id == user.provider_id)
        });
        if duplicate {
            return Err(AppError::ConflictError("이미 존재하는 사용자입니다".to_string()));
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: &str, update: UserUpdate) -> AppResult<Option<User>> {
        let mut users = self.users.lock().unwrap();

        let Some(user) = users.iter_mut().find(|u| u.id_string().as_deref() == Some(id)) else {
            return Ok(None);
        };

        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(password_hash) = update.password_hash {
            user.password_hash = Some(password_hash);
        }

        Ok(Some(user.clone()))
    }
}

/// 인메모리 설정 저장소
pub struct MemoryClientStore {
    clients: Mutex<Vec<Client>>,
}

impl MemoryClientStore {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(Vec::new()),
        }
    }

    /// 설정 레코드를 바로 심습니다.
    pub async fn seed(&self, name: &str, auth_type: &str, config: serde_json::Value) -> Client {
        let client = Client::new(name.to_string(), auth_type.to_string(), config);
        self.create(client).await.unwrap()
    }
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn find_by_auth_type(&self, auth_type: &str) -> AppResult<Option<Client>> {
        let clients = self.clients.lock().unwrap();
        Ok(clients.iter().find(|c| c.auth_type == auth_type).cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<Client>> {
        let clients = self.clients.lock().unwrap();
        Ok(clients.clone())
    }

    async fn create(&self, mut client: Client) -> AppResult<Client> {
        let mut clients = self.clients.lock().unwrap();

        client.id = Some(ObjectId::new());
        clients.push(client.clone());
        Ok(client)
    }

    async fn update(
        &self,
        id: &str,
        name: &str,
        auth_type: &str,
        config: &serde_json::Value,
    ) -> AppResult<Option<Client>> {
        let mut clients = self.clients.lock().unwrap();

        let Some(client) = clients.iter_mut().find(|c| c.id_string().as_deref() == Some(id)) else {
            return Ok(None);
        };

        client.name = name.to_string();
        client.auth_type = auth_type.to_string();
        client.config = config.clone();
        client.updated_at = mongodb::bson::DateTime::now();

        Ok(Some(client.clone()))
    }
}

/// 평문 해셔 (`plain:` 접두사만 붙입니다)
///
/// bcrypt의 느린 해싱을 피해 테스트를 빠르게 유지합니다.
pub struct PlainTextHasher;

impl PasswordHasher for PlainTextHasher {
    fn hash(&self, plaintext: &str) -> AppResult<String> {
        Ok(format!("plain:{}", plaintext))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> AppResult<bool> {
        Ok(digest == format!("plain:{}", plaintext))
    }
}
