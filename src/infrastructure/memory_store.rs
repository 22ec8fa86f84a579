use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use super::ReceiptStore;
use crate::errors::StoreError;

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    points: RwLock<HashMap<Uuid, u64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("memory store lock poisoned".to_string())
}

#[async_trait]
impl ReceiptStore for MemoryStore {
    async fn save(&self, points: u64) -> Result<Uuid, StoreError> {
        let mut map = self.points.write().map_err(|_| poisoned())?;
        let mut id = Uuid::new_v4();
        while map.contains_key(&id) {
            id = Uuid::new_v4();
        }
        map.insert(id, points);
        Ok(id)
    }

    async fn points(&self, id: Uuid) -> Result<u64, StoreError> {
        let map = self.points.read().map_err(|_| poisoned())?;
        map.get(&id)
            .copied()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.points.read().map_err(|_| poisoned())?.len())
    }
}
