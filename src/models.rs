//! Data models for catalog items, recipes, runes and workshop lists

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTranslation {
    pub language: String, // "fr", "en", "es"
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct Item {
    pub id: i64,
    pub anka_id: i64,
    pub type_anka_id: i64,
    pub level: i64,
    pub gfx_id: i64,
    pub translations: Vec<ItemTranslation>,
    pub recipe: Option<Recipe>,
    pub stats: Vec<ItemStat>,
}

impl Item {
    /// Name in `language`, else the first translation available, else empty.
    pub fn display_name(&self, language: &str) -> &str {
        self.translations
            .iter()
            .find(|t| t.language == language && !t.name.is_empty())
            .or_else(|| self.translations.first())
            .map(|t| t.name.as_str())
            .unwrap_or("")
    }

    pub fn is_craftable(&self) -> bool {
        self.recipe.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marketplace {
    pub id: i64,
    pub key: String,
    pub name: String,
    pub display_order: i64,
}

#[derive(Debug, Clone)]
pub struct ItemType {
    pub anka_id: i64,
    pub key_name: String,
    pub name: String,
    pub marketplace: Option<Marketplace>,
}

#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: i64,
    pub item_id: i64, // The item this recipe produces
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone)]
pub struct Ingredient {
    pub item_id: i64,
    pub quantity: i64, // Units consumed per crafted unit
    pub item: Option<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStat {
    pub stat_type_id: i64, // Game effect code, e.g. 0x64 for vitality
    pub min_value: Option<i64>, // None when the stat only has a formula
    pub max_value: Option<i64>,
    pub formula: String,
    pub display_order: i64,
}

/// Potency class of a rune
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuneTier {
    #[serde(rename = "ba")]
    Base,
    Pa,
    Ra,
    Single,
}

impl RuneTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuneTier::Base => "ba",
            RuneTier::Pa => "pa",
            RuneTier::Ra => "ra",
            RuneTier::Single => "single",
        }
    }
}

impl fmt::Display for RuneTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuneTier {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ba" | "base" => Ok(RuneTier::Base),
            "pa" => Ok(RuneTier::Pa),
            "ra" => Ok(RuneTier::Ra),
            "single" => Ok(RuneTier::Single),
            other => Err(CatalogError::InvalidRuneTier(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rune {
    pub id: i64,
    pub stat_type_id: i64,
    pub code: String, // e.g. "fo", "pa_fo"
    pub tier: RuneTier,
    pub weight: f64,
    pub item: Option<Item>, // Carries every translation, not just one language
}

#[derive(Debug, Clone)]
pub struct ListEntry {
    pub id: i64,
    pub item: Item,
    pub quantity: i64,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct WorkshopList {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub items: Vec<ListEntry>,
}

/// A resource needed to craft everything in a workshop list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceRequirement {
    pub item_id: i64,
    pub item_anka_id: i64,
    pub type_anka_id: i64,
    pub gfx_id: i64,
    pub name: String,
    pub total_needed: i64,
    pub marketplace: Option<Marketplace>,
}

/// A rune obtainable by breaking items of a workshop list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuneRequirement {
    pub rune_id: i64,
    pub item_anka_id: i64,
    pub type_anka_id: i64,
    pub gfx_id: i64,
    pub name: String,
    pub code: String,
    pub tier: RuneTier,
    pub weight: f64,
}
