//! Loading and saving the full record list.
//!
//! [`RecordRepository`] is the persistence seam of the record store. The
//! standard implementation, [`SlotRepository`], keeps the list as a JSON
//! array under one key of a [`KeyValueStore`].

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::record::Record;
use crate::storage::{KeyValueStore, SlotInfo};

/// Default slot key for the record list.
pub const DEFAULT_SLOT_KEY: &str = "users";

/// Whole-list persistence for records.
pub trait RecordRepository {
    /// Read every persisted record in stored order.
    ///
    /// An absent slot yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored data is malformed.
    fn load(&self) -> Result<Vec<Record>>;

    /// Replace the persisted list with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    fn save_all(&mut self, records: &[Record]) -> Result<()>;
}

/// A [`RecordRepository`] storing the list as JSON in one key-value slot.
#[derive(Debug)]
pub struct SlotRepository<K> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> SlotRepository<K> {
    /// Use the slot named `key` in `kv`.
    pub fn new(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// Use the default `users` slot.
    pub fn with_default_key(kv: K) -> Self {
        Self::new(kv, DEFAULT_SLOT_KEY)
    }

    /// The slot key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying key-value store.
    #[must_use]
    pub fn backend(&self) -> &K {
        &self.kv
    }

    /// Describe the slot, if anything has been written to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn slot_info(&self) -> Result<Option<SlotInfo>> {
        self.kv.info(&self.key)
    }
}

impl<K: KeyValueStore> RecordRepository for SlotRepository<K> {
    fn load(&self) -> Result<Vec<Record>> {
        let raw = match self.kv.get(&self.key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                debug!("Slot '{}' is empty, starting with no records", self.key);
                return Ok(Vec::new());
            }
        };

        let records: Vec<Record> = serde_json::from_str(&raw).map_err(|source| {
            warn!("Slot '{}' could not be parsed: {}", self.key, source);
            Error::corrupt_slot(self.key.clone(), source)
        })?;

        debug!("Loaded {} records from slot '{}'", records.len(), self.key);
        Ok(records)
    }

    fn save_all(&mut self, records: &[Record]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.kv.set(&self.key, &raw)?;
        debug!("Saved {} records to slot '{}'", records.len(), self.key);
        Ok(())
    }
}
