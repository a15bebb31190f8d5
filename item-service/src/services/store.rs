//! Storage seam for the item handlers.
//!
//! Each method is exactly one database round trip.

use crate::models::{Item, ItemPatch};
use crate::services::MongoDb;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use service_core::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn health_check(&self) -> Result<(), AppError>;

    /// Store a new item and return the identifier the server assigned.
    async fn insert(&self, item: Item) -> Result<ObjectId, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Item>, AppError>;

    /// Every stored item, in storage order.
    async fn find_all(&self) -> Result<Vec<Item>, AppError>;

    async fn update(&self, id: ObjectId, patch: &ItemPatch) -> Result<UpdateOutcome, AppError>;

    /// Number of documents removed (0 or 1).
    async fn delete(&self, id: ObjectId) -> Result<u64, AppError>;
}

#[async_trait]
impl ItemStore for MongoDb {
    async fn health_check(&self) -> Result<(), AppError> {
        MongoDb::health_check(self).await
    }

    async fn insert(&self, item: Item) -> Result<ObjectId, AppError> {
        let result = self.items().insert_one(&item, None).await?;
        result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError(anyhow::anyhow!(
                "server assigned a non-ObjectId identifier: {}",
                result.inserted_id
            ))
        })
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Item>, AppError> {
        Ok(self.items().find_one(doc! { "_id": id }, None).await?)
    }

    async fn find_all(&self) -> Result<Vec<Item>, AppError> {
        let cursor = self.items().find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update(&self, id: ObjectId, patch: &ItemPatch) -> Result<UpdateOutcome, AppError> {
        let result = self
            .items()
            .update_one(doc! { "_id": id }, patch.to_update_document(), None)
            .await?;
        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, AppError> {
        let result = self.items().delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count)
    }
}
