//! Saved and liked lists in the `collections` partition
//!
//! Each membership is one empty-valued key,
//! `{collection}:{username}:{id:020}`, so listing a user's collection is a
//! prefix scan.

use platebook_core::store::CollectionStore;
use platebook_core::*;

use crate::{StorageEngine, Table};

const PARTITION: &str = "collections";
const ID_WIDTH: usize = 20;

fn member_prefix(username: &str, collection: Collection) -> String {
    format!("{}:{}:", collection.as_str(), username)
}

fn member_key(username: &str, collection: Collection, id: RecipeId) -> String {
    format!("{}{:020}", member_prefix(username, collection), id.get())
}

/// fjall-backed [`CollectionStore`]
pub struct FjallCollectionStore {
    table: Table,
}

impl FjallCollectionStore {
    pub fn open(engine: &StorageEngine) -> Result<Self> {
        Ok(FjallCollectionStore {
            table: engine.table(PARTITION)?,
        })
    }
}

impl CollectionStore for FjallCollectionStore {
    fn add(&self, username: &str, collection: Collection, id: RecipeId) -> Result<bool> {
        let _guard = self.table.engine().lock_writes()?;
        let key = member_key(username, collection, id);

        if self.table.contains(&key)? {
            return Ok(false);
        }

        self.table.put_raw(&key, b"")?;
        Ok(true)
    }

    fn remove(&self, username: &str, collection: Collection, id: RecipeId) -> Result<bool> {
        let _guard = self.table.engine().lock_writes()?;
        let key = member_key(username, collection, id);

        if !self.table.contains(&key)? {
            return Ok(false);
        }

        self.table.remove(&key)?;
        Ok(true)
    }

    fn members(&self, username: &str, collection: Collection) -> Result<Vec<RecipeId>> {
        let prefix = member_prefix(username, collection);

        // A username containing ':' can share this prefix; only keys whose
        // remainder is exactly one padded id belong to this user.
        Ok(self
            .table
            .scan_prefix(&prefix)?
            .into_iter()
            .filter_map(|(key, _)| {
                let rest = &key[prefix.len()..];
                if rest.len() == ID_WIDTH {
                    rest.parse::<RecipeId>().ok()
                } else {
                    None
                }
            })
            .collect())
    }
}
