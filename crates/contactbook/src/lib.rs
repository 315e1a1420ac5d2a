//! `contactbook` - A small contact book persisted to a single key-value slot
//!
//! Records (first name, last name, phone) are kept in an ordered list that is
//! written out in full after every change. The [`FormController`] drives
//! creates and edits with presence validation, and [`search::filter`] narrows
//! the list by name.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod record;
pub mod render;
pub mod repository;
pub mod search;
pub mod shell;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use form::{FormController, FormMode, SubmitOutcome};
pub use logging::init_logging;
pub use record::{Draft, Field, Record, RecordId};
pub use repository::{RecordRepository, SlotRepository};
pub use search::{filter, SearchView, Selector};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
pub use store::{RecordStore, SqliteRecordStore};
