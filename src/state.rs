//! Application state management
//!
//! Shared by all handlers. Cloning is cheap: everything inside is behind an
//! `Arc` or `Copy`.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::errors::StoreError;
use crate::infrastructure::{MemoryStore, ReceiptStore, RedisStore};
use crate::services::cancel::{CancelSignal, Canceller};

#[derive(Clone)]
pub struct AppState {
    /// Score storage backend
    pub store: Arc<dyn ReceiptStore>,

    /// Fired when the shutdown grace period expires; cancels every
    /// calculation still running
    pub shutdown: Arc<Canceller>,

    /// Upper bound on a single calculation
    pub calculation_timeout: Duration,

    /// Largest request body accepted, in bytes
    pub max_body_size: usize,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ReceiptStore>,
        calculation_timeout: Duration,
        max_body_size: usize,
    ) -> Self {
        Self {
            store,
            shutdown: Arc::new(Canceller::new()),
            calculation_timeout,
            max_body_size,
        }
    }

    /// In-memory state with default limits.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Duration::from_millis(crate::config::DEFAULT_CALCULATION_TIMEOUT_MS),
            crate::config::DEFAULT_MAX_BODY_SIZE,
        )
    }

    /// Builds state from configuration, connecting to Redis when a URL is set.
    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        let store: Arc<dyn ReceiptStore> = match &config.redis_url {
            Some(url) => Arc::new(RedisStore::connect(url).await?),
            None => Arc::new(MemoryStore::new()),
        };
        Ok(Self::new(
            store,
            config.calculation_timeout(),
            config.max_body_size,
        ))
    }

    /// Signal for one request's calculation: fires on shutdown or timeout.
    pub fn calculation_signal(&self) -> CancelSignal {
        self.shutdown.signal().with_timeout(self.calculation_timeout)
    }
}
