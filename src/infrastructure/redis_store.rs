use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use uuid::Uuid;

use super::ReceiptStore;
use crate::errors::StoreError;

const POINTS_KEY: &str = "receipt_points";

/// Scores kept in a single Redis hash, field = receipt id.
#[derive(Clone)]
pub struct RedisStore {
    conn_manager: ConnectionManager,
    key: String,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        Self::connect_with_key(redis_url, POINTS_KEY).await
    }

    /// Like [`RedisStore::connect`] but stores under a custom hash key.
    pub async fn connect_with_key(redis_url: &str, key: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)?;
        let conn_manager = ConnectionManager::new(client).await?;
        Ok(Self {
            conn_manager,
            key: key.to_string(),
        })
    }
}

#[async_trait]
impl ReceiptStore for RedisStore {
    async fn save(&self, points: u64) -> Result<Uuid, StoreError> {
        let mut con = self.conn_manager.clone();
        loop {
            let id = Uuid::new_v4();
            let inserted: bool = con.hset_nx(&self.key, id.to_string(), points).await?;
            if inserted {
                return Ok(id);
            }
        }
    }

    async fn points(&self, id: Uuid) -> Result<u64, StoreError> {
        let mut con = self.conn_manager.clone();
        let points: Option<u64> = con.hget(&self.key, id.to_string()).await?;
        points.ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let mut con = self.conn_manager.clone();
        Ok(con.hlen(&self.key).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> RedisStore {
        let url = std::env::var("REDIS_URL").expect("REDIS_URL required for redis tests");
        let key = format!("receipt_points_test:{}", Uuid::new_v4());
        RedisStore::connect_with_key(&url, &key).await.unwrap()
    }

    #[tokio::test]
    #[ignore = "needs a running Redis at REDIS_URL"]
    async fn test_save_then_lookup() {
        let store = test_store().await;
        let id = store.save(109).await.unwrap();
        assert_eq!(store.points(id).await.unwrap(), 109);
        assert_eq!(store.count().await.unwrap(), 1);

        let err = store.points(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        let mut con = store.conn_manager.clone();
        let _: () = con.del(&store.key).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_url_is_a_backend_error() {
        let err = RedisStore::connect("not a url").await.err().unwrap();
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
