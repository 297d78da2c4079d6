//! 사용자 리포지토리 구현
//!
//! `UserStore` 인터페이스의 MongoDB 구현체입니다.
//!
//! ## 인덱스
//!
//! - `(provider, email)` unique — 이메일 유일성은 프로바이더 단위로만 강제됩니다.
//!   로컬 계정과 연합 계정이 같은 이메일로 공존하는 것은 의도된 동작입니다
//! - `(provider, provider_id)` unique(partial) — 연합 계정 중복 생성 방지

use async_trait::async_trait;
use mongodb::{
    IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::{IndexOptions, ReturnDocument},
};
use std::sync::Arc;

use crate::db::Database;
use crate::domain::entities::User;
use crate::domain::models::AuthType;
use crate::errors::{AppError, AppResult};
use crate::repositories::{UserStore, UserUpdate};

const COLLECTION_NAME: &str = "users";

/// 사용자 데이터 액세스 리포지토리
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> mongodb::Collection<User> {
        self.db.get_database().collection(COLLECTION_NAME)
    }

    /// 유일성 인덱스를 생성합니다. 프로세스 시작 시 한 번 호출됩니다.
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "provider": 1, "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        let provider_index = IndexModel::builder()
            .keys(doc! { "provider": 1, "provider_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .partial_filter_expression(doc! { "provider_id": { "$exists": true } })
                    .build(),
            )
            .build();

        self.collection()
            .create_indexes(vec![email_index, provider_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        log::info!("users 컬렉션 인덱스 준비 완료");
        Ok(())
    }

    fn parse_object_id(id: &str) -> AppResult<ObjectId> {
        ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError(format!("잘못된 사용자 ID 형식입니다: {}", id)))
    }
}

/// MongoDB 중복 키 에러(코드 11000)인지 확인합니다.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        _ => false,
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let oid = Self::parse_object_id(id)?;

        self.collection()
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "email": email, "provider": AuthType::Local.as_str() })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_provider(&self, provider: AuthType, provider_id: &str) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "provider": provider.as_str(), "provider_id": provider_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, user: User) -> AppResult<User> {
        let result = self.collection().insert_one(&user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::ConflictError("이미 등록된 사용자입니다".to_string())
            } else {
                AppError::DatabaseError(e.to_string())
            }
        })?;

        let inserted_id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError("삽입된 사용자 ID를 읽을 수 없습니다".to_string()))?;

        self.collection()
            .find_one(doc! { "_id": inserted_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AppError::DatabaseError("생성된 사용자를 조회할 수 없습니다".to_string()))
    }

    async fn update(&self, id: &str, update: UserUpdate) -> AppResult<Option<User>> {
        let oid = Self::parse_object_id(id)?;

        if update.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut set = Document::new();
        if let Some(email) = update.email {
            set.insert("email", email);
        }
        if let Some(password_hash) = update.password_hash {
            set.insert("password_hash", password_hash);
        }

        self.collection()
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
