//! Core data types for Platebook

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::PasswordDigest;

/// A registered user
///
/// Username and email are each unique across all identities. Records are
/// written once at registration and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub email: String,
    pub password_digest: PasswordDigest,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Create a new identity stamped with the current time
    pub fn new(username: &str, email: &str, password_digest: PasswordDigest) -> Self {
        Identity {
            username: username.to_string(),
            email: email.to_string(),
            password_digest,
            created_at: Utc::now(),
        }
    }

    /// Set a fixed creation time (for testing and imports)
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Numeric recipe identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(u64);

impl RecipeId {
    pub fn new(id: u64) -> Self {
        RecipeId(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// The id that follows this one
    pub fn next(&self) -> Self {
        RecipeId(self.0 + 1)
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecipeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse().map(RecipeId)
    }
}

/// One line of a recipe's shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
    pub cost: f64,
}

impl Ingredient {
    pub fn new(name: &str, amount: &str, cost: f64) -> Self {
        Ingredient {
            name: name.to_string(),
            amount: amount.to_string(),
            cost,
        }
    }
}

/// A catalog recipe as served over the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    #[serde(flatten)]
    pub body: RecipeDraft,
}

impl Recipe {
    pub fn name(&self) -> &str {
        &self.body.name
    }
}

/// Recipe contents before an id has been assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub name: String,
    pub emoji: String,
    pub time: String,
    pub difficulty: String,
    pub servings: u32,
    pub total_cost: f64,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub user_generated: bool,
}

impl RecipeDraft {
    /// Attach an id, producing a catalog entry
    pub fn into_recipe(self, id: RecipeId) -> Recipe {
        Recipe { id, body: self }
    }
}

/// Per-user recipe lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Saved,
    Liked,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Saved => "saved",
            Collection::Liked => "liked",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
