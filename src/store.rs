//! Catalog store traits
//!
//! The calculators only read from the catalog through these traits. The
//! SQLite implementation lives in [`crate::db`].

use crate::error::CatalogResult;
use crate::models::{Item, ItemStat, ItemType, Recipe, Rune};

/// Point lookups against the item catalog
pub trait CatalogStore {
    /// Get an item by storage id with its translations for `language`.
    ///
    /// An item with no translation in `language` is returned with an empty
    /// translation list rather than `None`.
    fn find_item(&self, item_id: i64, language: &str) -> CatalogResult<Option<Item>>;

    /// Get an item by its game (anka) id
    fn find_item_by_anka_id(&self, anka_id: i64, language: &str) -> CatalogResult<Option<Item>>;

    /// Get the recipe producing `item_id`, or `None` for a base material.
    /// Ingredients come back without their items attached.
    fn find_item_recipe(&self, item_id: i64) -> CatalogResult<Option<Recipe>>;

    /// Resolve the type (and marketplace) of an item
    fn find_item_type(&self, item: &Item, language: &str) -> CatalogResult<Option<ItemType>>;

    /// Get the stat lines of an item, in display order
    fn find_item_stats(&self, item_id: i64) -> CatalogResult<Vec<ItemStat>>;

    /// Get the runes tied to a stat type, ordered by rune id.
    /// Each rune's item carries all of its translations.
    fn find_runes_by_stat_type(&self, stat_type_id: i64) -> CatalogResult<Vec<Rune>>;
}

/// A workshop list row with its raw entries
#[derive(Debug, Clone)]
pub struct WorkshopListRecord {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub entries: Vec<WorkshopEntryRecord>,
}

#[derive(Debug, Clone)]
pub struct WorkshopEntryRecord {
    pub id: i64,
    pub item_id: i64,
    pub quantity: i64,
    pub notes: String,
}

/// Read access to user workshop lists
pub trait WorkshopStore {
    /// Get a list and its entries, in insertion order
    fn find_workshop_list(&self, list_id: i64) -> CatalogResult<Option<WorkshopListRecord>>;
}
