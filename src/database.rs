//! Persistent short code to URL mappings
//!
//! All mappings live in one redb table. Every operation opens its own
//! transaction and commits (or aborts) it before returning, so the store
//! keeps no state between calls beyond the shared database handle.
//! redb gives a single writer and any number of MVCC readers; a write
//! transaction waits for the current writer to finish.

use redb::{
    Database, ReadableDatabase, ReadableTableMetadata, TableDefinition, TableError, TableHandle,
};
use std::path::Path;
use std::sync::Arc;

use crate::error::StoreError;
use crate::shortcode::ShortCode;

/// Table holding every mapping
///
/// Key: short code (e.g. "2cf24dba")
/// Value: raw bytes of the original URL
pub const TABLE_SHORTURLS: TableDefinition<&str, &[u8]> = TableDefinition::new("shorturls");

/// Transactional handle over the mappings table.
///
/// Cloning is cheap; all clones share the same underlying database.
#[derive(Clone)]
pub struct MappingStore {
    db: Arc<Database>,
}

impl MappingStore {
    /// Creates or opens the database file at `path`.
    ///
    /// The table itself is created lazily by the first [`MappingStore::create`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = Database::create(path)?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Writes `code -> url`, creating the table if needed.
    ///
    /// An existing entry under `code` is replaced (last writer wins).
    pub fn create(&self, code: &ShortCode, url: &str) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TABLE_SHORTURLS)?;
            let previous = table.insert(code.as_str(), url.as_bytes())?;
            if let Some(previous) = previous {
                if previous.value() != url.as_bytes() {
                    tracing::warn!(%code, "short code collision, overwriting existing mapping");
                }
            }
        }
        write_txn.commit()?;

        tracing::debug!(%code, "mapping stored");
        Ok(())
    }

    /// Looks up the URL stored under `code`.
    pub fn resolve(&self, code: &ShortCode) -> Result<String, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(TABLE_SHORTURLS) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Err(StoreError::NotFound),
            Err(e) => return Err(e.into()),
        };

        let url = match table.get(code.as_str())? {
            Some(guard) => String::from_utf8_lossy(guard.value()).into_owned(),
            None => return Err(StoreError::NotFound),
        };
        if url.is_empty() {
            return Err(StoreError::NotFound);
        }

        Ok(url)
    }

    /// Removes `code` if present.
    ///
    /// Fails with [`StoreError::NotFound`] only when the table was never
    /// created; removing an absent key from an existing table succeeds.
    pub fn delete(&self, code: &ShortCode) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write()?;
        // open_table would create the table inside a write transaction, so check first.
        let exists = write_txn
            .list_tables()?
            .any(|handle| handle.name() == TABLE_SHORTURLS.name());
        if !exists {
            write_txn.abort()?;
            return Err(StoreError::NotFound);
        }

        let removed = write_txn
            .open_table(TABLE_SHORTURLS)?
            .remove(code.as_str())?
            .is_some();
        write_txn.commit()?;

        tracing::debug!(%code, removed, "mapping deleted");
        Ok(())
    }

    /// Number of stored mappings; zero when the table does not exist yet.
    pub fn count(&self) -> Result<u64, StoreError> {
        let read_txn = self.db.begin_read()?;
        match read_txn.open_table(TABLE_SHORTURLS) {
            Ok(table) => Ok(table.len()?),
            Err(TableError::TableDoesNotExist(_)) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub store: MappingStore,

    /// Public prefix for returned short URLs, without a trailing slash
    pub base_url: String,
}
