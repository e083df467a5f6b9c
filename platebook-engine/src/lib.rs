//! Storage engine implementation using fjall
//!
//! One keyspace holds a partition per store. Writes that touch more than one
//! key go through a single [`fjall::Batch`], and check-then-write sequences
//! hold the engine's write lock so they are atomic with respect to each other.

use fjall::{Batch, Config, Keyspace, PersistMode};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use platebook_core::store::Stores;
use platebook_core::*;

pub mod collections;
pub mod identities;
pub mod recipes;
pub mod table;

pub use collections::*;
pub use identities::*;
pub use recipes::*;
pub use table::*;

pub(crate) fn storage_err(e: impl std::fmt::Display) -> PlatebookError {
    PlatebookError::Storage(e.to_string())
}

/// Storage engine wrapping fjall keyspace
#[derive(Clone)]
pub struct StorageEngine {
    keyspace: Arc<Keyspace>,
    write_lock: Arc<Mutex<()>>,
}

impl StorageEngine {
    /// Create new storage engine at the given path
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::new(path);
        let keyspace = Arc::new(config.open().map_err(storage_err)?);

        Ok(StorageEngine {
            keyspace,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Create temporary storage engine for testing
    #[cfg(any(test, feature = "test-utils"))]
    pub fn temp() -> Result<(Self, tempfile::TempDir)> {
        let temp_dir = tempfile::tempdir()?;
        let engine = Self::new(temp_dir.path())?;
        Ok((engine, temp_dir))
    }

    /// Create or open a table
    pub fn table(&self, name: &'static str) -> Result<Table> {
        Table::open(self.clone(), name)
    }

    /// Open every store against this keyspace
    pub fn open_stores(&self) -> Result<Stores> {
        Ok(Stores {
            identities: Arc::new(FjallIdentityStore::open(self)?),
            recipes: Arc::new(FjallRecipeStore::open(self)?),
            collections: Arc::new(FjallCollectionStore::open(self)?),
        })
    }

    /// Get the underlying keyspace
    pub(crate) fn keyspace(&self) -> &Keyspace {
        &self.keyspace
    }

    /// Serialize check-then-write sequences
    pub(crate) fn lock_writes(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| PlatebookError::Internal("write lock poisoned".to_string()))
    }

    /// Start an atomic multi-key write
    pub(crate) fn batch(&self) -> Batch {
        self.keyspace.batch()
    }

    /// Apply a batch and persist it
    pub(crate) fn commit(&self, batch: Batch) -> Result<()> {
        batch.commit().map_err(storage_err)?;
        self.persist()
    }

    /// Persist all changes to disk
    pub fn persist(&self) -> Result<()> {
        self.keyspace
            .persist(PersistMode::SyncAll)
            .map_err(storage_err)
    }
}
