//! Infrastructure layer
//!
//! Score storage behind the [`ReceiptStore`] trait. The in-memory backend is
//! the default; the Redis backend is used when a Redis URL is configured.

pub mod memory_store;
pub mod redis_store;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::StoreError;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;

/// Key to score mapping. Implementations handle their own synchronization.
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Stores `points` under a freshly generated id.
    async fn save(&self, points: u64) -> Result<Uuid, StoreError>;

    /// Points stored under `id`, or [`StoreError::NotFound`].
    async fn points(&self, id: Uuid) -> Result<u64, StoreError>;

    /// Number of stored receipts.
    async fn count(&self) -> Result<usize, StoreError>;
}
