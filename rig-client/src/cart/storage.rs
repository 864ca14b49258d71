//! redb-based persistence for the cart snapshot
//!
//! One table, one fixed key: the value is the JSON-serialized line
//! sequence, rewritten wholesale on every mutation. There are no partial
//! or append writes and no external writers; the `CartStore` owns this
//! database exclusively.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default: once `commit()`
//! returns, the snapshot survives process death, and the file is always
//! left in a consistent state.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::cart::CartLine;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table holding the persisted cart: key = "lines", value = JSON-serialized Vec<CartLine>
const CART_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("cart");

const LINES_KEY: &str = "lines";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Cart snapshot storage backed by redb
#[derive(Clone)]
pub struct CartStorage {
    db: Arc<Database>,
}

impl CartStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CART_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CART_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Load the persisted line sequence
    ///
    /// A missing snapshot yields an empty cart. A corrupt snapshot is
    /// discarded and also yields an empty cart; the next save overwrites
    /// it.
    pub fn load_lines(&self) -> StorageResult<Vec<CartLine>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CART_TABLE)?;

        match table.get(LINES_KEY)? {
            Some(value) => match serde_json::from_slice(value.value()) {
                Ok(lines) => Ok(lines),
                Err(e) => {
                    tracing::warn!(error = %e, "Corrupt cart snapshot, starting empty");
                    Ok(Vec::new())
                }
            },
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite the persisted snapshot with the full line sequence
    pub fn save_lines(&self, lines: &[CartLine]) -> StorageResult<()> {
        let value = serde_json::to_vec(lines)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(CART_TABLE)?;
            table.insert(LINES_KEY, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Write raw bytes into the snapshot slot (for corruption tests)
    #[cfg(test)]
    pub fn save_raw(&self, bytes: &[u8]) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(CART_TABLE)?;
            table.insert(LINES_KEY, bytes)?;
        }
        txn.commit()?;
        Ok(())
    }
}
