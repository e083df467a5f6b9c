//! Persistence contracts
//!
//! Every backend implements the same three traits. Handlers only ever see
//! `Arc<dyn ...>` trait objects, so the in-process maps and the on-disk
//! keyspace are interchangeable at startup.

pub mod memory;

pub use memory::*;

use std::sync::Arc;

use crate::{Collection, Identity, Recipe, RecipeDraft, RecipeId, Result};

/// User records keyed by username, with a secondary index on email
pub trait IdentityStore: Send + Sync {
    /// Look up by primary key
    fn get(&self, username: &str) -> Result<Option<Identity>>;

    /// Look up through the email index
    fn find_by_email(&self, email: &str) -> Result<Option<Identity>>;

    /// Insert a new identity if neither its email nor its username exists
    ///
    /// The check and the write are one atomic step. Fails with
    /// `EmailTaken` before `UsernameTaken` when both collide.
    fn insert_new(&self, identity: Identity) -> Result<()>;

    /// Remove an identity and its email index entry
    fn delete(&self, username: &str) -> Result<bool>;
}

/// The recipe catalog
pub trait RecipeStore: Send + Sync {
    /// All recipes in id order
    fn list(&self) -> Result<Vec<Recipe>>;

    fn get(&self, id: RecipeId) -> Result<Option<Recipe>>;

    /// Store a draft under the next free id
    fn add(&self, draft: RecipeDraft) -> Result<Recipe>;

    /// Case-insensitive substring match on the recipe name
    fn search(&self, query: &str) -> Result<Vec<Recipe>> {
        let needle = query.to_lowercase();
        let recipes = self.list()?;

        if needle.is_empty() {
            return Ok(recipes);
        }

        Ok(recipes
            .into_iter()
            .filter(|r| r.name().to_lowercase().contains(&needle))
            .collect())
    }
}

/// Per-user saved and liked recipe ids
pub trait CollectionStore: Send + Sync {
    /// Add an id; returns false if it was already present
    fn add(&self, username: &str, collection: Collection, id: RecipeId) -> Result<bool>;

    /// Remove an id; returns false if it was not present
    fn remove(&self, username: &str, collection: Collection, id: RecipeId) -> Result<bool>;

    fn members(&self, username: &str, collection: Collection) -> Result<Vec<RecipeId>>;
}

/// The set of backends a server runs against
#[derive(Clone)]
pub struct Stores {
    pub identities: Arc<dyn IdentityStore>,
    pub recipes: Arc<dyn RecipeStore>,
    pub collections: Arc<dyn CollectionStore>,
}

impl Stores {
    /// Process-memory backends with the seed catalog loaded
    pub fn in_memory() -> Self {
        Stores {
            identities: Arc::new(MemoryIdentityStore::new()),
            recipes: Arc::new(MemoryRecipeStore::seeded()),
            collections: Arc::new(MemoryCollectionStore::new()),
        }
    }

    /// Catalog recipes in a user's collection, in catalog order
    pub fn collection_recipes(
        &self,
        username: &str,
        collection: Collection,
    ) -> Result<Vec<Recipe>> {
        let members = self.collections.members(username, collection)?;
        if members.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .recipes
            .list()?
            .into_iter()
            .filter(|r| members.contains(&r.id))
            .collect())
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
