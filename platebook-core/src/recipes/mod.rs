//! Recipe catalog content: the built-in seed set and the keyword generator

pub mod generate;
pub mod seed;

pub use generate::generate_recipe;
pub use seed::seed_catalog;
