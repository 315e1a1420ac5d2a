//! The in-memory record list and its persisted mirror.
//!
//! [`RecordStore`] owns the ordered list of records. Every mutation rewrites
//! the whole list through the injected [`RecordRepository`] before returning,
//! so a successful call never leaves a change that exists only in memory.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::record::{Record, RecordId};
use crate::repository::{RecordRepository, SlotRepository};
use crate::storage::SqliteStore;

/// Ordered, persisted list of records.
#[derive(Debug)]
pub struct RecordStore<R> {
    repo: R,
    records: Vec<Record>,
}

impl<R: RecordRepository> RecordStore<R> {
    /// Load the persisted list once and wrap it.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read or holds malformed data.
    pub fn load(repo: R) -> Result<Self> {
        let records = repo.load()?;
        info!("Record store loaded with {} records", records.len());
        Ok(Self { repo, records })
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Position of a record in the full list.
    #[must_use]
    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    /// Borrow the repository.
    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Append a record at the end and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails. The in-memory list keeps the new
    /// record in that case; the next successful save writes it out.
    pub fn append(&mut self, record: Record) -> Result<RecordId> {
        let id = record.id;
        self.records.push(record);
        self.save_all()?;
        debug!("Appended record {}", id);
        Ok(id)
    }

    /// Overwrite the record with the given id, keeping its position, and persist.
    ///
    /// The stored record keeps `id` whatever id `record` carries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no such record exists, or an error
    /// if persisting fails.
    pub fn replace(&mut self, id: RecordId, record: Record) -> Result<()> {
        let index = self.position(id).ok_or(Error::RecordNotFound(id))?;
        self.records[index] = Record { id, ..record };
        self.save_all()?;
        debug!("Replaced record {} at position {}", id, index);
        Ok(())
    }

    /// Remove the record with the given id and persist. Returns the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no such record exists, or an error
    /// if persisting fails.
    pub fn remove(&mut self, id: RecordId) -> Result<Record> {
        let index = self.position(id).ok_or(Error::RecordNotFound(id))?;
        let removed = self.records.remove(index);
        self.save_all()?;
        debug!("Removed record {} from position {}", id, index);
        Ok(removed)
    }

    /// Write the full list to the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    pub fn save_all(&mut self) -> Result<()> {
        self.repo.save_all(&self.records)
    }
}

/// Records kept in a slot of the configured `SQLite` database.
pub type SqliteRecordStore = RecordStore<SlotRepository<SqliteStore>>;

impl SqliteRecordStore {
    /// Open the configured database and load the configured slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the database can't be opened or the slot is malformed.
    pub fn open(config: &Config) -> Result<Self> {
        let kv = SqliteStore::open(config.database_path())?;
        Self::load(SlotRepository::new(kv, config.slot_key()))
    }
}
