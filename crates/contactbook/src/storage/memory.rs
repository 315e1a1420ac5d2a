//! In-memory key-value store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::{KeyValueStore, SlotInfo};
use crate::error::Result;

/// A [`KeyValueStore`] held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, (String, DateTime<Utc>)>,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one slot already populated.
    #[must_use]
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.slots.insert(key.into(), (value.into(), Utc::now()));
        store
    }

    /// Number of `set` calls made against this store.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).map(|(value, _)| value.clone()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots
            .insert(key.to_string(), (value.to_string(), Utc::now()));
        self.writes += 1;
        Ok(())
    }

    fn info(&self, key: &str) -> Result<Option<SlotInfo>> {
        Ok(self.slots.get(key).map(|(value, updated_at)| SlotInfo {
            key: key.to_string(),
            size_bytes: value.len(),
            updated_at: *updated_at,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_slot() {
        let store = MemoryStore::with_slot("users", "[]");
        assert_eq!(store.get("users").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_set_counts_writes() {
        let mut store = MemoryStore::new();
        store.set("users", "a").unwrap();
        store.set("users", "b").unwrap();

        assert_eq!(store.write_count(), 2);
        assert_eq!(store.get("users").unwrap().as_deref(), Some("b"));
        assert_eq!(store.info("users").unwrap().unwrap().size_bytes, 1);
    }
}
