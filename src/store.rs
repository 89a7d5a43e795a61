//! Journal record persistence.
//!
//! [`EntryStore`] is the read/write contract the journal needs: load every
//! record (newest first) and replace the stored list. [`JsonFileStore`]
//! keeps the list as a JSON array on disk; [`MemoryStore`] keeps it in
//! process.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::types::JournalRecord;
use crate::{MoodlogError, Result};

/// Persistence for journal records.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All stored records, newest first.
    async fn load(&self) -> Result<Vec<JournalRecord>>;

    /// Replace the stored records.
    async fn save(&self, records: &[JournalRecord]) -> Result<()>;
}

fn newest_first(records: &mut [JournalRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

// ============================================================================
// JsonFileStore
// ============================================================================

/// Stores records as a JSON array in a single file.
///
/// A missing or empty file reads as no records. A file that no longer
/// parses is reported and read as no records, so the journal stays usable.
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
}

#[async_trait]
impl EntryStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<JournalRecord>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(MoodlogError::Storage(format!(
                    "failed to read {:?}: {e}",
                    self.path
                )));
            }
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<JournalRecord>>(&raw) {
            Ok(mut records) => {
                newest_first(&mut records);
                debug!(path = ?self.path, count = records.len(), "entries loaded");
                Ok(records)
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "stored entries are unreadable, starting empty");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, records: &[JournalRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                MoodlogError::Storage(format!("failed to create {parent:?}: {e}"))
            })?;
        }
        let json = serde_json::to_vec(records)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| MoodlogError::Storage(format!("failed to write {:?}: {e}", self.path)))?;
        debug!(path = ?self.path, count = records.len(), "entries saved");
        Ok(())
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

/// Keeps records in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<JournalRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `records`.
    pub fn with_records(records: Vec<JournalRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn load(&self) -> Result<Vec<JournalRecord>> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| MoodlogError::Storage("memory store lock poisoned".to_string()))?
            .clone();
        newest_first(&mut records);
        Ok(records)
    }

    async fn save(&self, records: &[JournalRecord]) -> Result<()> {
        let mut stored = self
            .records
            .lock()
            .map_err(|_| MoodlogError::Storage("memory store lock poisoned".to_string()))?;
        *stored = records.to_vec();
        Ok(())
    }
}
