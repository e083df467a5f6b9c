//! In-process backends

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock};

use crate::recipes::seed_catalog;
use crate::store::{CollectionStore, IdentityStore, RecipeStore};
use crate::{Collection, Identity, PlatebookError, Recipe, RecipeDraft, RecipeId, Result};

fn poisoned<T>(_: PoisonError<T>) -> PlatebookError {
    PlatebookError::Internal("store lock poisoned".to_string())
}

#[derive(Default)]
struct IdentityTables {
    by_username: HashMap<String, Identity>,
    by_email: HashMap<String, String>,
}

/// Identity store backed by hash maps
#[derive(Default)]
pub struct MemoryIdentityStore {
    tables: RwLock<IdentityTables>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn get(&self, username: &str) -> Result<Option<Identity>> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables.by_username.get(username).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Identity>> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables
            .by_email
            .get(email)
            .and_then(|username| tables.by_username.get(username))
            .cloned())
    }

    fn insert_new(&self, identity: Identity) -> Result<()> {
        let mut tables = self.tables.write().map_err(poisoned)?;

        if tables.by_email.contains_key(&identity.email) {
            return Err(PlatebookError::EmailTaken);
        }
        if tables.by_username.contains_key(&identity.username) {
            return Err(PlatebookError::UsernameTaken);
        }

        tables
            .by_email
            .insert(identity.email.clone(), identity.username.clone());
        tables.by_username.insert(identity.username.clone(), identity);
        Ok(())
    }

    fn delete(&self, username: &str) -> Result<bool> {
        let mut tables = self.tables.write().map_err(poisoned)?;

        match tables.by_username.remove(username) {
            Some(identity) => {
                tables.by_email.remove(&identity.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

struct RecipeTable {
    recipes: BTreeMap<RecipeId, Recipe>,
    next_id: RecipeId,
}

/// Recipe catalog held in a sorted map
pub struct MemoryRecipeStore {
    table: RwLock<RecipeTable>,
}

impl MemoryRecipeStore {
    /// An empty catalog whose first id is 1
    pub fn empty() -> Self {
        MemoryRecipeStore {
            table: RwLock::new(RecipeTable {
                recipes: BTreeMap::new(),
                next_id: RecipeId::new(1),
            }),
        }
    }

    /// The built-in catalog
    pub fn seeded() -> Self {
        let recipes: BTreeMap<_, _> = seed_catalog().into_iter().map(|r| (r.id, r)).collect();
        let next_id = recipes
            .keys()
            .next_back()
            .map(RecipeId::next)
            .unwrap_or(RecipeId::new(1));

        MemoryRecipeStore {
            table: RwLock::new(RecipeTable { recipes, next_id }),
        }
    }
}

impl RecipeStore for MemoryRecipeStore {
    fn list(&self) -> Result<Vec<Recipe>> {
        let table = self.table.read().map_err(poisoned)?;
        Ok(table.recipes.values().cloned().collect())
    }

    fn get(&self, id: RecipeId) -> Result<Option<Recipe>> {
        let table = self.table.read().map_err(poisoned)?;
        Ok(table.recipes.get(&id).cloned())
    }

    fn add(&self, draft: RecipeDraft) -> Result<Recipe> {
        let mut table = self.table.write().map_err(poisoned)?;

        let id = table.next_id;
        let recipe = draft.into_recipe(id);
        table.recipes.insert(id, recipe.clone());
        table.next_id = id.next();

        Ok(recipe)
    }
}

/// Saved and liked lists held per user
#[derive(Default)]
pub struct MemoryCollectionStore {
    members: RwLock<HashMap<(String, Collection), BTreeSet<RecipeId>>>,
}

impl MemoryCollectionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CollectionStore for MemoryCollectionStore {
    fn add(&self, username: &str, collection: Collection, id: RecipeId) -> Result<bool> {
        let mut members = self.members.write().map_err(poisoned)?;
        Ok(members
            .entry((username.to_string(), collection))
            .or_default()
            .insert(id))
    }

    fn remove(&self, username: &str, collection: Collection, id: RecipeId) -> Result<bool> {
        let mut members = self.members.write().map_err(poisoned)?;
        Ok(members
            .get_mut(&(username.to_string(), collection))
            .map(|ids| ids.remove(&id))
            .unwrap_or(false))
    }

    fn members(&self, username: &str, collection: Collection) -> Result<Vec<RecipeId>> {
        let members = self.members.read().map_err(poisoned)?;
        Ok(members
            .get(&(username.to_string(), collection))
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_draft, sample_identity};
    use std::sync::Arc;

    #[test]
    fn test_identity_roundtrip() {
        let store = MemoryIdentityStore::new();
        let alice = sample_identity("alice", "a@x.com", "pw1");

        store.insert_new(alice.clone()).unwrap();

        assert_eq!(store.get("alice").unwrap(), Some(alice.clone()));
        assert_eq!(store.find_by_email("a@x.com").unwrap(), Some(alice));
        assert!(store.get("bob").unwrap().is_none());
        assert!(store.find_by_email("b@x.com").unwrap().is_none());
    }

    #[test]
    fn test_identity_uniqueness() {
        let store = MemoryIdentityStore::new();
        store.insert_new(sample_identity("alice", "a@x.com", "pw1")).unwrap();

        let same_username = store.insert_new(sample_identity("alice", "other@x.com", "pw2"));
        assert!(matches!(same_username, Err(PlatebookError::UsernameTaken)));

        let same_email = store.insert_new(sample_identity("bob", "a@x.com", "pw2"));
        assert!(matches!(same_email, Err(PlatebookError::EmailTaken)));

        let both = store.insert_new(sample_identity("alice", "a@x.com", "pw1"));
        assert!(matches!(both, Err(PlatebookError::EmailTaken)));
    }

    #[test]
    fn test_identity_delete_frees_email() {
        let store = MemoryIdentityStore::new();
        store.insert_new(sample_identity("alice", "a@x.com", "pw1")).unwrap();

        assert!(store.delete("alice").unwrap());
        assert!(!store.delete("alice").unwrap());
        assert!(store.find_by_email("a@x.com").unwrap().is_none());

        store.insert_new(sample_identity("carol", "a@x.com", "pw3")).unwrap();
    }

    #[test]
    fn test_concurrent_registration_single_winner() {
        let store = Arc::new(MemoryIdentityStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.insert_new(sample_identity("alice", &format!("a{}@x.com", i), "pw"))
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| r.is_ok())
            .count();

        assert_eq!(winners, 1);
    }

    #[test]
    fn test_seeded_catalog() {
        let store = MemoryRecipeStore::seeded();
        let recipes = store.list().unwrap();

        assert_eq!(recipes.len(), 6);
        assert_eq!(recipes[0].id, RecipeId::new(1));
        assert_eq!(store.get(RecipeId::new(5)).unwrap().unwrap().name(), "Margherita Pizza");
        assert!(store.get(RecipeId::new(99)).unwrap().is_none());
    }

    #[test]
    fn test_add_assigns_next_id() {
        let store = MemoryRecipeStore::seeded();

        let first = store.add(sample_draft("Quick Soup")).unwrap();
        let second = store.add(sample_draft("Slow Stew")).unwrap();

        assert_eq!(first.id, RecipeId::new(7));
        assert_eq!(second.id, RecipeId::new(8));
        assert_eq!(store.list().unwrap().len(), 8);

        let empty = MemoryRecipeStore::empty();
        assert_eq!(empty.add(sample_draft("First")).unwrap().id, RecipeId::new(1));
    }

    #[test]
    fn test_search() {
        let store = MemoryRecipeStore::seeded();

        let hits = store.search("PASTA").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "Creamy Pasta Carbonara");

        assert_eq!(store.search("").unwrap().len(), 6);
        assert!(store.search("sushi").unwrap().is_empty());
    }

    #[test]
    fn test_collections_are_idempotent() {
        let store = MemoryCollectionStore::new();
        let id = RecipeId::new(3);

        assert!(store.add("alice", Collection::Saved, id).unwrap());
        assert!(!store.add("alice", Collection::Saved, id).unwrap());
        assert_eq!(store.members("alice", Collection::Saved).unwrap(), vec![id]);

        assert!(store.members("alice", Collection::Liked).unwrap().is_empty());
        assert!(store.members("bob", Collection::Saved).unwrap().is_empty());

        assert!(store.remove("alice", Collection::Saved, id).unwrap());
        assert!(!store.remove("alice", Collection::Saved, id).unwrap());
        assert!(!store.remove("nobody", Collection::Liked, id).unwrap());
    }
}
