use crate::models::{Item, ItemPatch};
use crate::services::store::{ItemStore, UpdateOutcome};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory `ItemStore` for tests and local runs without MongoDB.
///
/// Items are kept in insertion order. `failing` turns every call into a
/// `DatabaseError`; `with_latency` delays every call, which is how deadline
/// handling gets exercised.
pub struct MockItemStore {
    items: Mutex<Vec<Item>>,
    failure: Option<String>,
    latency: Option<Duration>,
    calls: AtomicUsize,
}

impl Default for MockItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockItemStore {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            failure: None,
            latency: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of storage calls made so far, health checks excluded.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn enter(&self) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match &self.failure {
            Some(message) => Err(AppError::DatabaseError(anyhow::anyhow!(message.clone()))),
            None => Ok(()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Item>>, AppError> {
        self.items.lock().map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("Mock store mutex poisoned: {}", e))
        })
    }
}

#[async_trait]
impl ItemStore for MockItemStore {
    async fn health_check(&self) -> Result<(), AppError> {
        match &self.failure {
            Some(message) => Err(AppError::DatabaseError(anyhow::anyhow!(message.clone()))),
            None => Ok(()),
        }
    }

    async fn insert(&self, mut item: Item) -> Result<ObjectId, AppError> {
        self.enter().await?;
        let id = ObjectId::new();
        item.id = Some(id);
        self.lock()?.push(item);
        Ok(id)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Item>, AppError> {
        self.enter().await?;
        Ok(self.lock()?.iter().find(|item| item.id == Some(id)).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Item>, AppError> {
        self.enter().await?;
        Ok(self.lock()?.clone())
    }

    async fn update(&self, id: ObjectId, patch: &ItemPatch) -> Result<UpdateOutcome, AppError> {
        self.enter().await?;
        let mut items = self.lock()?;
        match items.iter_mut().find(|item| item.id == Some(id)) {
            Some(item) => {
                let changed = patch.apply_to(item);
                Ok(UpdateOutcome {
                    matched_count: 1,
                    modified_count: u64::from(changed),
                })
            }
            None => Ok(UpdateOutcome {
                matched_count: 0,
                modified_count: 0,
            }),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, AppError> {
        self.enter().await?;
        let mut items = self.lock()?;
        let before = items.len();
        items.retain(|item| item.id != Some(id));
        Ok((before - items.len()) as u64)
    }
}
