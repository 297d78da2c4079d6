//! 클라이언트 설정 리포지토리 구현
//!
//! `ClientStore` 인터페이스의 MongoDB 구현체입니다.
//! 설정 블롭은 불투명한 값으로 취급하며, 저장 시점에는 어떤 검증도 하지 않습니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{DateTime, doc, oid::ObjectId},
    options::ReturnDocument,
};
use std::sync::Arc;

use crate::db::Database;
use crate::domain::entities::Client;
use crate::errors::{AppError, AppResult};
use crate::repositories::ClientStore;

const COLLECTION_NAME: &str = "clients";

/// 인증 방식 설정 데이터 액세스 리포지토리
pub struct ClientRepository {
    db: Arc<Database>,
}

impl ClientRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> mongodb::Collection<Client> {
        self.db.get_database().collection(COLLECTION_NAME)
    }

    fn parse_object_id(id: &str) -> AppResult<ObjectId> {
        ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError(format!("잘못된 클라이언트 ID 형식입니다: {}", id)))
    }
}

#[async_trait]
impl ClientStore for ClientRepository {
    async fn find_by_auth_type(&self, auth_type: &str) -> AppResult<Option<Client>> {
        self.collection()
            .find_one(doc! { "auth_type": auth_type })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn get_all(&self) -> AppResult<Vec<Client>> {
        let cursor = self
            .collection()
            .find(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, client: Client) -> AppResult<Client> {
        let result = self
            .collection()
            .insert_one(&client)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let inserted_id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError("삽입된 클라이언트 ID를 읽을 수 없습니다".to_string()))?;

        self.collection()
            .find_one(doc! { "_id": inserted_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AppError::DatabaseError("생성된 클라이언트를 조회할 수 없습니다".to_string()))
    }

    async fn update(
        &self,
        id: &str,
        name: &str,
        auth_type: &str,
        config: &serde_json::Value,
    ) -> AppResult<Option<Client>> {
        let oid = Self::parse_object_id(id)?;

        let config_bson = mongodb::bson::to_bson(config)
            .map_err(|e| AppError::ValidationError(format!("설정 블롭 변환 실패: {}", e)))?;

        self.collection()
            .find_one_and_update(
                doc! { "_id": oid },
                doc! {
                    "$set": {
                        "name": name,
                        "auth_type": auth_type,
                        "config": config_bson,
                        "updated_at": DateTime::now(),
                    }
                },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
