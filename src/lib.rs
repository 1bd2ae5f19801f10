//! Workshop calculator for a retro MMO item catalog
//!
//! Resolves crafting trees to a bounded depth, sums the resources a workshop
//! list needs (grouped by marketplace) and lists the runes obtainable by
//! breaking its items. The catalog is read through the [`store`] traits;
//! [`db`] implements them on SQLite.

pub mod db;
pub mod error;
pub mod marketplace;
pub mod models;
pub mod resources;
pub mod runes;
pub mod sample;
pub mod seed;
pub mod store;
pub mod tree;
pub mod workshop;

pub use error::{CatalogError, CatalogResult};
pub use marketplace::{MarketplaceGroup, MarketplaceGroups, group_by_marketplace};
pub use models::*;
pub use resources::aggregate_resources;
pub use runes::extract_unique_runes;
pub use store::{CatalogStore, WorkshopStore};
pub use tree::{DEFAULT_MAX_DEPTH, load_recipe_tree, load_recipe_trees};
