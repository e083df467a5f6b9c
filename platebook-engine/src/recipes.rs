//! Recipe catalog in the `recipes` partition
//!
//! Layout:
//! - `recipe:{id:020}` -> JSON [`Recipe`]
//! - `meta:next_id` -> JSON number
//!
//! Ids are zero-padded so that key order is id order.

use platebook_core::recipes::seed_catalog;
use platebook_core::store::RecipeStore;
use platebook_core::*;
use tracing::{debug, info};

use crate::{StorageEngine, Table};

const PARTITION: &str = "recipes";
const RECIPE_PREFIX: &str = "recipe:";
const NEXT_ID_KEY: &str = "meta:next_id";

fn recipe_key(id: RecipeId) -> String {
    format!("{}{:020}", RECIPE_PREFIX, id.get())
}

/// fjall-backed [`RecipeStore`]
pub struct FjallRecipeStore {
    table: Table,
}

impl FjallRecipeStore {
    /// Open the catalog, loading the seed recipes on first use
    pub fn open(engine: &StorageEngine) -> Result<Self> {
        let store = FjallRecipeStore {
            table: engine.table(PARTITION)?,
        };
        store.seed_if_new()?;
        Ok(store)
    }

    fn seed_if_new(&self) -> Result<()> {
        let engine = self.table.engine();
        let _guard = engine.lock_writes()?;

        if self.table.contains(NEXT_ID_KEY)? {
            return Ok(());
        }

        let seed = seed_catalog();
        let next_id = seed
            .iter()
            .map(|r| r.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(RecipeId::new(1));

        let mut batch = engine.batch();
        for recipe in &seed {
            batch.insert(
                self.table.partition(),
                recipe_key(recipe.id).into_bytes(),
                serde_json::to_vec(recipe)?,
            );
        }
        batch.insert(
            self.table.partition(),
            NEXT_ID_KEY.as_bytes().to_vec(),
            serde_json::to_vec(&next_id)?,
        );
        engine.commit(batch)?;

        info!("Seeded recipe catalog with {} recipes", seed.len());
        Ok(())
    }
}

impl RecipeStore for FjallRecipeStore {
    fn list(&self) -> Result<Vec<Recipe>> {
        self.table
            .scan_prefix(RECIPE_PREFIX)?
            .into_iter()
            .map(|(_, data)| serde_json::from_slice(&data).map_err(PlatebookError::from))
            .collect()
    }

    fn get(&self, id: RecipeId) -> Result<Option<Recipe>> {
        self.table.get_json(&recipe_key(id))
    }

    fn add(&self, draft: RecipeDraft) -> Result<Recipe> {
        let engine = self.table.engine();
        let _guard = engine.lock_writes()?;

        let id: RecipeId = self
            .table
            .get_json(NEXT_ID_KEY)?
            .unwrap_or(RecipeId::new(1));
        let recipe = draft.into_recipe(id);

        let mut batch = engine.batch();
        batch.insert(
            self.table.partition(),
            recipe_key(id).into_bytes(),
            serde_json::to_vec(&recipe)?,
        );
        batch.insert(
            self.table.partition(),
            NEXT_ID_KEY.as_bytes().to_vec(),
            serde_json::to_vec(&id.next())?,
        );
        engine.commit(batch)?;

        debug!("Stored recipe: id={}, name={}", id, recipe.name());
        Ok(recipe)
    }
}
