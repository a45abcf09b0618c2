//! Memoized resolution of external compendium lookups, scoped to one run.
//!
//! Units that swap stale inline copies for the canonical compendium body all
//! funnel through here. Concurrent requests for one key collapse into a
//! single provider call; a failed or empty lookup is cached as a negative
//! result for the rest of the run and never retried within it. The cache is
//! built fresh per run and dropped with it.

use crate::core::Result;
use crate::document::Document;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, OnceCell};
use tracing::{Level, event};

/// Read-only content library the host exposes for reference resolution.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn fetch_by_key(&self, key: &str) -> Result<Option<Document>>;
}

type Slot = Arc<OnceCell<Option<Arc<Document>>>>;

pub struct ReferenceCache {
    provider: Arc<dyn ContentProvider>,
    slots: Mutex<HashMap<String, Slot>>,
    lookups: AtomicU64,
}

impl ReferenceCache {
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self {
            provider,
            slots: Mutex::new(HashMap::new()),
            lookups: AtomicU64::new(0),
        }
    }

    /// Resolve `key` against the content provider, memoized for this run.
    ///
    /// Provider errors degrade to `None`; the calling unit is expected to
    /// leave prior data untouched in that case.
    pub async fn resolve(&self, key: &str) -> Option<Arc<Document>> {
        let slot = {
            let mut slots = self.slots.lock().await;
            slots.entry(key.to_string()).or_default().clone()
        };
        slot.get_or_init(|| async {
            self.lookups.fetch_add(1, Ordering::Relaxed);
            event!(Level::DEBUG, key = %key, "resolving compendium reference");
            match self.provider.fetch_by_key(key).await {
                Ok(found) => found.map(Arc::new),
                Err(err) => {
                    log::warn!("compendium lookup '{}' failed: {}", key, err);
                    None
                }
            }
        })
        .await
        .clone()
    }

    /// Number of provider calls actually made this run.
    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }
}
