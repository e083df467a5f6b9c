//! Table abstraction over fjall partitions

use fjall::{Partition, PartitionCreateOptions};
use serde::de::DeserializeOwned;
use serde::Serialize;
use platebook_core::*;
use crate::{storage_err, StorageEngine};

/// A named partition holding string-keyed records
pub struct Table {
    name: &'static str,
    partition: Partition,
    engine: StorageEngine,
}

impl Table {
    /// Create or open table
    pub(crate) fn open(engine: StorageEngine, name: &'static str) -> Result<Self> {
        let partition = engine
            .keyspace()
            .open_partition(name, PartitionCreateOptions::default())
            .map_err(storage_err)?;

        Ok(Table {
            name,
            partition,
            engine,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn partition(&self) -> &Partition {
        &self.partition
    }

    pub(crate) fn engine(&self) -> &StorageEngine {
        &self.engine
    }

    /// Get raw bytes stored under a key
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.partition.get(key.as_bytes()) {
            Ok(Some(data)) => Ok(Some(data.to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(storage_err(e)),
        }
    }

    /// Get and decode a JSON record
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key)? {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        self.partition
            .contains_key(key.as_bytes())
            .map_err(storage_err)
    }

    /// Store raw bytes under a key
    pub fn put_raw(&self, key: &str, value: &[u8]) -> Result<()> {
        self.partition
            .insert(key.as_bytes(), value)
            .map_err(storage_err)?;

        self.engine.persist()
    }

    /// Encode and store a single JSON record
    pub fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let data = serde_json::to_vec(value)?;

        self.partition
            .insert(key.as_bytes(), data.as_slice())
            .map_err(storage_err)?;

        self.engine.persist()
    }

    /// Remove a single key
    pub fn remove(&self, key: &str) -> Result<()> {
        self.partition
            .remove(key.as_bytes())
            .map_err(storage_err)?;

        self.engine.persist()
    }

    /// All entries whose key starts with `prefix`, in key order
    pub fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let mut entries = Vec::new();

        for item in self.partition.prefix(prefix.as_bytes()) {
            let (key_bytes, value) = item.map_err(|e| storage_err(format!("Scan error: {}", e)))?;

            match std::str::from_utf8(&key_bytes) {
                Ok(key) => entries.push((key.to_string(), value.to_vec())),
                Err(_) => {
                    return Err(PlatebookError::Storage(format!(
                        "non-UTF-8 key in table {}",
                        self.name
                    )))
                }
            }
        }

        Ok(entries)
    }
}
