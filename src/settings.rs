//! Settings-store handle for world-level hooks.
//!
//! World hooks migrate global state (permission schemas, default options)
//! that lives outside any single document. The store is passed into the
//! runner explicitly so hooks never reach for ambient globals and tests can
//! substitute their own.

use crate::core::Result;
use serde_json::Value;
use std::collections::HashMap;

pub trait SettingsStore: Send + Sync {
    fn get(&self, namespace: &str, key: &str) -> Option<Value>;
    fn set(&mut self, namespace: &str, key: &str, value: Value) -> Result<()>;
}

/// In-memory store for hosts without durable settings and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    entries: HashMap<(String, String), Value>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, namespace: &str, key: &str) -> Option<Value> {
        self.entries
            .get(&(namespace.to_string(), key.to_string()))
            .cloned()
    }

    fn set(&mut self, namespace: &str, key: &str, value: Value) -> Result<()> {
        self.entries
            .insert((namespace.to_string(), key.to_string()), value);
        Ok(())
    }
}
