use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use crate::core::{InvoiceError, next_invoice_id, parse_sequence};

/// Key under which the last issued sequence number is stored.
pub const LAST_INVOICE_NUMBER_KEY: &str = "lastInvoiceNumber";

/// Minimal string key-value store, the shape of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, InvoiceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), InvoiceError>;
}

/// Volatile store, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, InvoiceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), InvoiceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisted as a single flat JSON object file.
///
/// A missing file reads as an empty store. Every `set` rewrites the file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, InvoiceError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(InvoiceError::Store(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };
        serde_json::from_str(&raw).map_err(|e| {
            InvoiceError::Store(format!("failed to parse {}: {e}", self.path.display()))
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, InvoiceError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), InvoiceError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| InvoiceError::Store(format!("failed to serialize store: {e}")))?;
        std::fs::write(&self.path, json).map_err(|e| {
            InvoiceError::Store(format!("failed to write {}: {e}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), key, "store written");
        Ok(())
    }
}

/// Invoice sequence counter backed by a [`KeyValueStore`].
///
/// Read-modify-write without locking; one writer is assumed.
#[derive(Debug, Clone)]
pub struct SequenceCounter<S> {
    store: S,
}

impl<S: KeyValueStore> SequenceCounter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Last issued sequence number. Missing or unparseable values read as `None`.
    pub fn last(&self) -> Result<Option<u64>, InvoiceError> {
        let raw = self.store.get(LAST_INVOICE_NUMBER_KEY)?;
        let last = raw.as_deref().and_then(parse_sequence);
        debug!(stored = ?raw, ?last, "read invoice sequence");
        Ok(last)
    }

    /// Issue the next invoice id for `date` and persist the new sequence number.
    pub fn advance(&mut self, date: NaiveDate) -> Result<String, InvoiceError> {
        let last = self.last()?;
        let (id, sequence) = next_invoice_id(date, last);
        self.store
            .set(LAST_INVOICE_NUMBER_KEY, &sequence.to_string())?;
        debug!(%id, sequence, "issued invoice id");
        Ok(id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
