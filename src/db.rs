//! Database schema and operations

use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use tracing::debug;

use crate::error::CatalogResult;
use crate::models::{
    Ingredient, Item, ItemStat, ItemTranslation, ItemType, Marketplace, Recipe, Rune,
};
use crate::seed;
use crate::store::{CatalogStore, WorkshopEntryRecord, WorkshopListRecord, WorkshopStore};

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> CatalogResult<()> {
    conn.execute_batch(
        r#"
        -- Marketplaces (auction houses) an item type is sold in
        CREATE TABLE IF NOT EXISTS marketplaces (
            id INTEGER PRIMARY KEY,
            key TEXT NOT NULL UNIQUE,
            display_order INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS marketplace_translations (
            marketplace_id INTEGER NOT NULL,
            language TEXT NOT NULL,
            name TEXT NOT NULL,
            PRIMARY KEY (marketplace_id, language)
        );

        -- Item categories, keyed by the game's type id
        CREATE TABLE IF NOT EXISTS item_types (
            anka_id INTEGER PRIMARY KEY,
            key_name TEXT NOT NULL DEFAULT '',
            marketplace_id INTEGER
        );

        CREATE TABLE IF NOT EXISTS item_type_translations (
            item_type_anka_id INTEGER NOT NULL,
            language TEXT NOT NULL,
            name TEXT NOT NULL,
            PRIMARY KEY (item_type_anka_id, language)
        );

        CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            anka_id INTEGER NOT NULL DEFAULT 0,
            type_anka_id INTEGER NOT NULL DEFAULT 0,
            level INTEGER NOT NULL DEFAULT 0,
            gfx_id INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS item_translations (
            item_id INTEGER NOT NULL,
            language TEXT NOT NULL,
            name TEXT NOT NULL,
            PRIMARY KEY (item_id, language)
        );

        -- A recipe produces exactly one item
        CREATE TABLE IF NOT EXISTS recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            item_id INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS ingredients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL,
            item_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL CHECK (quantity > 0)
        );

        CREATE TABLE IF NOT EXISTS stat_types (
            id INTEGER PRIMARY KEY,
            code TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS stat_type_translations (
            stat_type_id INTEGER NOT NULL,
            language TEXT NOT NULL,
            name TEXT NOT NULL,
            PRIMARY KEY (stat_type_id, language)
        );

        -- min/max are NULL for formula-only stats
        CREATE TABLE IF NOT EXISTS item_stats (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            item_id INTEGER NOT NULL,
            stat_type_id INTEGER NOT NULL,
            min_value INTEGER,
            max_value INTEGER,
            formula TEXT NOT NULL DEFAULT '',
            display_order INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS runes (
            id INTEGER PRIMARY KEY,
            stat_type_id INTEGER NOT NULL,
            code TEXT NOT NULL UNIQUE,
            tier TEXT NOT NULL,
            weight REAL NOT NULL,
            item_anka_id INTEGER
        );

        CREATE TABLE IF NOT EXISTS workshop_lists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS workshop_list_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            workshop_list_id INTEGER NOT NULL,
            item_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 1,
            notes TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_items_anka_id ON items(anka_id);
        CREATE INDEX IF NOT EXISTS idx_recipes_item_id ON recipes(item_id);
        CREATE INDEX IF NOT EXISTS idx_ingredients_recipe_id ON ingredients(recipe_id);
        CREATE INDEX IF NOT EXISTS idx_item_stats_item_id ON item_stats(item_id);
        CREATE INDEX IF NOT EXISTS idx_runes_stat_type ON runes(stat_type_id);
        CREATE INDEX IF NOT EXISTS idx_workshop_lists_user ON workshop_lists(user_id);
        CREATE INDEX IF NOT EXISTS idx_workshop_list_items_list
            ON workshop_list_items(workshop_list_id);
        "#,
    )?;
    Ok(())
}

/// Write the static stat type, marketplace and rune tables. Safe to call repeatedly.
pub fn seed_reference_data(conn: &Connection) -> CatalogResult<()> {
    let tx = conn.unchecked_transaction()?;

    for stat in seed::STAT_TYPES {
        tx.execute(
            "INSERT OR IGNORE INTO stat_types (id, code) VALUES (?1, ?2)",
            (stat.id, stat.code),
        )?;
        for (language, name) in stat.names {
            tx.execute(
                "INSERT OR REPLACE INTO stat_type_translations (stat_type_id, language, name)
                 VALUES (?1, ?2, ?3)",
                (stat.id, language, name),
            )?;
        }
    }

    for market in seed::MARKETPLACES {
        tx.execute(
            "INSERT OR REPLACE INTO marketplaces (id, key, display_order) VALUES (?1, ?2, ?3)",
            (market.id, market.key, market.display_order),
        )?;
        for (language, name) in market.names {
            tx.execute(
                "INSERT OR REPLACE INTO marketplace_translations (marketplace_id, language, name)
                 VALUES (?1, ?2, ?3)",
                (market.id, language, name),
            )?;
        }
    }

    for rune in seed::RUNES {
        tx.execute(
            "INSERT OR REPLACE INTO runes (id, stat_type_id, code, tier, weight, item_anka_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                rune.id,
                rune.stat_type_id,
                rune.code,
                rune.tier.as_str(),
                rune.weight,
                rune.item_anka_id,
            ),
        )?;
    }

    tx.commit()?;
    debug!(
        stat_types = seed::STAT_TYPES.len(),
        marketplaces = seed::MARKETPLACES.len(),
        runes = seed::RUNES.len(),
        "seeded reference data"
    );
    Ok(())
}

/// Clear all catalog and workshop data (reference tables are kept)
pub fn clear_catalog_data(conn: &Connection) -> CatalogResult<()> {
    conn.execute_batch(
        r#"
        DELETE FROM workshop_list_items;
        DELETE FROM workshop_lists;
        DELETE FROM ingredients;
        DELETE FROM recipes;
        DELETE FROM item_stats;
        DELETE FROM item_translations;
        DELETE FROM items;
        DELETE FROM item_type_translations;
        DELETE FROM item_types;
        "#,
    )?;
    Ok(())
}

/// Insert or replace an item type and its names
pub fn upsert_item_type(
    conn: &Connection,
    anka_id: i64,
    key_name: &str,
    names: &[(&str, &str)],
    marketplace_id: Option<i64>,
) -> CatalogResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO item_types (anka_id, key_name, marketplace_id) VALUES (?1, ?2, ?3)",
        (anka_id, key_name, marketplace_id),
    )?;
    for (language, name) in names {
        conn.execute(
            "INSERT OR REPLACE INTO item_type_translations (item_type_anka_id, language, name)
             VALUES (?1, ?2, ?3)",
            (anka_id, language, name),
        )?;
    }
    Ok(())
}

/// Insert an item with its translations and stats, returning the new storage id.
/// The item's `id` and `recipe` fields are ignored.
pub fn insert_item(conn: &Connection, item: &Item) -> CatalogResult<i64> {
    conn.execute(
        "INSERT INTO items (anka_id, type_anka_id, level, gfx_id) VALUES (?1, ?2, ?3, ?4)",
        (item.anka_id, item.type_anka_id, item.level, item.gfx_id),
    )?;
    let id = conn.last_insert_rowid();

    for t in &item.translations {
        conn.execute(
            "INSERT OR REPLACE INTO item_translations (item_id, language, name)
             VALUES (?1, ?2, ?3)",
            (id, &t.language, &t.name),
        )?;
    }
    for stat in &item.stats {
        insert_item_stat(conn, id, stat)?;
    }
    Ok(id)
}

/// Insert a stat line for an item
pub fn insert_item_stat(conn: &Connection, item_id: i64, stat: &ItemStat) -> CatalogResult<()> {
    conn.execute(
        "INSERT INTO item_stats
             (item_id, stat_type_id, min_value, max_value, formula, display_order)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        (
            item_id,
            stat.stat_type_id,
            stat.min_value,
            stat.max_value,
            &stat.formula,
            stat.display_order,
        ),
    )?;
    Ok(())
}

/// Insert a recipe for `item_id` from `(ingredient item id, quantity)` pairs
pub fn insert_recipe(
    conn: &Connection,
    item_id: i64,
    ingredients: &[(i64, i64)],
) -> CatalogResult<i64> {
    conn.execute("INSERT INTO recipes (item_id) VALUES (?1)", [item_id])?;
    let recipe_id = conn.last_insert_rowid();
    for (ingredient_id, quantity) in ingredients {
        conn.execute(
            "INSERT INTO ingredients (recipe_id, item_id, quantity) VALUES (?1, ?2, ?3)",
            (recipe_id, ingredient_id, quantity),
        )?;
    }
    Ok(recipe_id)
}

/// Check whether an item can be crafted
pub fn item_has_recipe(conn: &Connection, item_id: i64) -> CatalogResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM recipes WHERE item_id = ?1",
        [item_id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

// === Workshop lists ===

#[derive(Debug, Clone)]
pub struct WorkshopListSummary {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub item_count: i64,
    pub updated_at: String,
}

/// Create a new workshop list for a user
pub fn create_workshop_list(
    conn: &Connection,
    user_id: i64,
    name: &str,
    description: &str,
) -> CatalogResult<i64> {
    conn.execute(
        "INSERT INTO workshop_lists (user_id, name, description) VALUES (?1, ?2, ?3)",
        (user_id, name, description),
    )?;
    Ok(conn.last_insert_rowid())
}

/// List a user's workshop lists, most recently updated first
pub fn workshop_lists_for_user(
    conn: &Connection,
    user_id: i64,
) -> CatalogResult<Vec<WorkshopListSummary>> {
    let mut stmt = conn.prepare(
        "SELECT l.id, l.name, l.description, COUNT(li.id), l.updated_at
         FROM workshop_lists l
         LEFT JOIN workshop_list_items li ON li.workshop_list_id = l.id
         WHERE l.user_id = ?1
         GROUP BY l.id
         ORDER BY l.updated_at DESC, l.id DESC",
    )?;

    let rows = stmt.query_map([user_id], |row| {
        Ok(WorkshopListSummary {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            item_count: row.get(3)?,
            updated_at: row.get(4)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// Update a workshop list's name and description
pub fn update_workshop_list(
    conn: &Connection,
    list_id: i64,
    name: &str,
    description: &str,
) -> CatalogResult<bool> {
    let changed = conn.execute(
        "UPDATE workshop_lists SET name = ?2, description = ?3, updated_at = CURRENT_TIMESTAMP
         WHERE id = ?1",
        (list_id, name, description),
    )?;
    Ok(changed > 0)
}

/// Delete a workshop list and all its entries
pub fn delete_workshop_list(conn: &Connection, list_id: i64) -> CatalogResult<bool> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "DELETE FROM workshop_list_items WHERE workshop_list_id = ?1",
        [list_id],
    )?;
    let deleted = tx.execute("DELETE FROM workshop_lists WHERE id = ?1", [list_id])?;
    tx.commit()?;
    Ok(deleted > 0)
}

/// Check whether `user_id` owns the list
pub fn is_workshop_list_owner(
    conn: &Connection,
    list_id: i64,
    user_id: i64,
) -> CatalogResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM workshop_lists WHERE id = ?1 AND user_id = ?2",
        (list_id, user_id),
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Add an item to a list, returning the entry id.
///
/// Quantities below 1 are raised to 1. Adding an item that is already on the
/// list increases its quantity; non-empty `notes` replace the old ones.
pub fn add_item_to_workshop_list(
    conn: &Connection,
    list_id: i64,
    item_id: i64,
    quantity: i64,
    notes: &str,
) -> CatalogResult<i64> {
    let quantity = quantity.max(1);

    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM workshop_list_items WHERE workshop_list_id = ?1 AND item_id = ?2",
            (list_id, item_id),
            |row| row.get(0),
        )
        .optional()?;

    let entry_id = match existing {
        Some(entry_id) => {
            conn.execute(
                "UPDATE workshop_list_items
                 SET quantity = quantity + ?2,
                     notes = CASE WHEN ?3 = '' THEN notes ELSE ?3 END,
                     updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?1",
                (entry_id, quantity, notes),
            )?;
            entry_id
        }
        None => {
            conn.execute(
                "INSERT INTO workshop_list_items (workshop_list_id, item_id, quantity, notes)
                 VALUES (?1, ?2, ?3, ?4)",
                (list_id, item_id, quantity, notes),
            )?;
            conn.last_insert_rowid()
        }
    };

    touch_workshop_list(conn, list_id)?;
    Ok(entry_id)
}

/// Set an entry's quantity (at least 1) and notes
pub fn update_workshop_list_item(
    conn: &Connection,
    entry_id: i64,
    quantity: i64,
    notes: &str,
) -> CatalogResult<bool> {
    let changed = conn.execute(
        "UPDATE workshop_list_items SET quantity = ?2, notes = ?3, updated_at = CURRENT_TIMESTAMP
         WHERE id = ?1",
        (entry_id, quantity.max(1), notes),
    )?;
    Ok(changed > 0)
}

/// Remove an entry from its list
pub fn remove_item_from_workshop_list(conn: &Connection, entry_id: i64) -> CatalogResult<bool> {
    let list_id: Option<i64> = conn
        .query_row(
            "SELECT workshop_list_id FROM workshop_list_items WHERE id = ?1",
            [entry_id],
            |row| row.get(0),
        )
        .optional()?;

    let Some(list_id) = list_id else {
        return Ok(false);
    };

    conn.execute("DELETE FROM workshop_list_items WHERE id = ?1", [entry_id])?;
    touch_workshop_list(conn, list_id)?;
    Ok(true)
}

/// Remove an item from a list by catalog item id
pub fn remove_item_from_workshop_list_by_item_id(
    conn: &Connection,
    list_id: i64,
    item_id: i64,
) -> CatalogResult<bool> {
    let deleted = conn.execute(
        "DELETE FROM workshop_list_items WHERE workshop_list_id = ?1 AND item_id = ?2",
        (list_id, item_id),
    )?;
    if deleted > 0 {
        touch_workshop_list(conn, list_id)?;
    }
    Ok(deleted > 0)
}

pub fn is_item_in_workshop_list(
    conn: &Connection,
    list_id: i64,
    item_id: i64,
) -> CatalogResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM workshop_list_items WHERE workshop_list_id = ?1 AND item_id = ?2",
        (list_id, item_id),
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Number of entries in a list
pub fn workshop_list_item_count(conn: &Connection, list_id: i64) -> CatalogResult<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM workshop_list_items WHERE workshop_list_id = ?1",
        [list_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn touch_workshop_list(conn: &Connection, list_id: i64) -> CatalogResult<()> {
    conn.execute(
        "UPDATE workshop_lists SET updated_at = CURRENT_TIMESTAMP WHERE id = ?1",
        [list_id],
    )?;
    Ok(())
}

// === Catalog lookups ===

const ITEM_COLUMNS: &str = "id, anka_id, type_anka_id, level, gfx_id";

fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        anka_id: row.get(1)?,
        type_anka_id: row.get(2)?,
        level: row.get(3)?,
        gfx_id: row.get(4)?,
        ..Default::default()
    })
}

/// Translations of an item in insertion order, optionally restricted to one language
fn item_translations(
    conn: &Connection,
    item_id: i64,
    language: Option<&str>,
) -> CatalogResult<Vec<ItemTranslation>> {
    let mut stmt = conn.prepare_cached(
        "SELECT language, name FROM item_translations
         WHERE item_id = ?1 AND (?2 IS NULL OR language = ?2)
         ORDER BY rowid",
    )?;
    let rows = stmt.query_map(params![item_id, language], |row| {
        Ok(ItemTranslation {
            language: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

fn item_by_anka_id(
    conn: &Connection,
    anka_id: i64,
    language: Option<&str>,
) -> CatalogResult<Option<Item>> {
    // anka ids are not unique in older imports; the oldest row wins
    let item = conn
        .query_row(
            &format!("SELECT {ITEM_COLUMNS} FROM items WHERE anka_id = ?1 ORDER BY id LIMIT 1"),
            [anka_id],
            row_to_item,
        )
        .optional()?;

    match item {
        Some(mut item) => {
            item.translations = item_translations(conn, item.id, language)?;
            Ok(Some(item))
        }
        None => Ok(None),
    }
}

/// One page of item search results
#[derive(Debug, Clone)]
pub struct ItemSearchPage {
    pub items: Vec<Item>,
    pub total: i64, // Matches across all pages
}

/// Search items by name in `language`, optionally restricted to some item types.
///
/// Matching is a case-insensitive substring match. Names starting with the
/// query come first, then everything is ordered by name. An empty query
/// matches every item named in `language`.
pub fn search_items(
    conn: &Connection,
    query: &str,
    language: &str,
    type_anka_ids: &[i64],
    limit: usize,
    offset: usize,
) -> CatalogResult<ItemSearchPage> {
    let query = query.trim();

    let mut filter = String::from(
        "it.language = ?1 AND (?2 = '' OR LOWER(it.name) LIKE '%' || LOWER(?2) || '%')",
    );
    let mut values = vec![
        Value::Text(language.to_string()),
        Value::Text(query.to_string()),
    ];
    if !type_anka_ids.is_empty() {
        let placeholders: Vec<String> = (0..type_anka_ids.len())
            .map(|i| format!("?{}", i + 3))
            .collect();
        filter.push_str(&format!(" AND i.type_anka_id IN ({})", placeholders.join(", ")));
        values.extend(type_anka_ids.iter().map(|&id| Value::Integer(id)));
    }

    let total: i64 = conn.query_row(
        &format!(
            "SELECT COUNT(*) FROM items i
             JOIN item_translations it ON it.item_id = i.id
             WHERE {filter}"
        ),
        params_from_iter(values.iter()),
        |row| row.get(0),
    )?;

    let mut stmt = conn.prepare(&format!(
        "SELECT i.id, i.anka_id, i.type_anka_id, i.level, i.gfx_id
         FROM items i
         JOIN item_translations it ON it.item_id = i.id
         WHERE {filter}
         ORDER BY CASE WHEN ?2 <> '' AND LOWER(it.name) LIKE LOWER(?2) || '%' THEN 0 ELSE 1 END,
                  it.name, i.id
         LIMIT {limit} OFFSET {offset}"
    ))?;
    let mut items = stmt
        .query_map(params_from_iter(values.iter()), row_to_item)?
        .collect::<Result<Vec<_>, _>>()?;

    for item in &mut items {
        item.translations = item_translations(conn, item.id, Some(language))?;
    }

    debug!(query, total, returned = items.len(), "searched items");
    Ok(ItemSearchPage { items, total })
}

impl CatalogStore for Connection {
    fn find_item(&self, item_id: i64, language: &str) -> CatalogResult<Option<Item>> {
        let item = self
            .query_row(
                &format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"),
                [item_id],
                row_to_item,
            )
            .optional()?;

        match item {
            Some(mut item) => {
                item.translations = item_translations(self, item.id, Some(language))?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    fn find_item_by_anka_id(&self, anka_id: i64, language: &str) -> CatalogResult<Option<Item>> {
        item_by_anka_id(self, anka_id, Some(language))
    }

    fn find_item_recipe(&self, item_id: i64) -> CatalogResult<Option<Recipe>> {
        let recipe_id: Option<i64> = self
            .query_row(
                "SELECT id FROM recipes WHERE item_id = ?1 ORDER BY id LIMIT 1",
                [item_id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(recipe_id) = recipe_id else {
            return Ok(None);
        };

        let mut stmt = self.prepare_cached(
            "SELECT item_id, quantity FROM ingredients WHERE recipe_id = ?1 ORDER BY id",
        )?;
        let ingredients = stmt
            .query_map([recipe_id], |row| {
                Ok(Ingredient {
                    item_id: row.get(0)?,
                    quantity: row.get(1)?,
                    item: None,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Recipe {
            id: recipe_id,
            item_id,
            ingredients,
        }))
    }

    fn find_item_type(&self, item: &Item, language: &str) -> CatalogResult<Option<ItemType>> {
        let item_type = self
            .query_row(
                "SELECT t.anka_id, t.key_name, COALESCE(tt.name, ''),
                        m.id, m.key, m.display_order, COALESCE(mt.name, m.key)
                 FROM item_types t
                 LEFT JOIN item_type_translations tt
                        ON tt.item_type_anka_id = t.anka_id AND tt.language = ?2
                 LEFT JOIN marketplaces m ON m.id = t.marketplace_id
                 LEFT JOIN marketplace_translations mt
                        ON mt.marketplace_id = m.id AND mt.language = ?2
                 WHERE t.anka_id = ?1",
                params![item.type_anka_id, language],
                |row| {
                    let marketplace_id: Option<i64> = row.get(3)?;
                    let marketplace = match marketplace_id {
                        Some(id) => Some(Marketplace {
                            id,
                            key: row.get(4)?,
                            display_order: row.get(5)?,
                            name: row.get(6)?,
                        }),
                        None => None,
                    };
                    Ok(ItemType {
                        anka_id: row.get(0)?,
                        key_name: row.get(1)?,
                        name: row.get(2)?,
                        marketplace,
                    })
                },
            )
            .optional()?;
        Ok(item_type)
    }

    fn find_item_stats(&self, item_id: i64) -> CatalogResult<Vec<ItemStat>> {
        let mut stmt = self.prepare_cached(
            "SELECT stat_type_id, min_value, max_value, formula, display_order
             FROM item_stats WHERE item_id = ?1
             ORDER BY display_order, id",
        )?;
        let stats = stmt
            .query_map([item_id], |row| {
                Ok(ItemStat {
                    stat_type_id: row.get(0)?,
                    min_value: row.get(1)?,
                    max_value: row.get(2)?,
                    formula: row.get(3)?,
                    display_order: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(stats)
    }

    fn find_runes_by_stat_type(&self, stat_type_id: i64) -> CatalogResult<Vec<Rune>> {
        let mut stmt = self.prepare_cached(
            "SELECT id, code, tier, weight, item_anka_id
             FROM runes WHERE stat_type_id = ?1
             ORDER BY id",
        )?;
        let rows = stmt
            .query_map([stat_type_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, Option<i64>>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut runes = Vec::with_capacity(rows.len());
        for (id, code, tier, weight, item_anka_id) in rows {
            let item = match item_anka_id {
                Some(anka_id) => item_by_anka_id(self, anka_id, None)?,
                None => None,
            };
            runes.push(Rune {
                id,
                stat_type_id,
                code,
                tier: tier.parse()?,
                weight,
                item,
            });
        }
        Ok(runes)
    }
}

impl WorkshopStore for Connection {
    fn find_workshop_list(&self, list_id: i64) -> CatalogResult<Option<WorkshopListRecord>> {
        let list = self
            .query_row(
                "SELECT id, user_id, name, description FROM workshop_lists WHERE id = ?1",
                [list_id],
                |row| {
                    Ok(WorkshopListRecord {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        name: row.get(2)?,
                        description: row.get(3)?,
                        entries: Vec::new(),
                    })
                },
            )
            .optional()?;

        let Some(mut list) = list else {
            return Ok(None);
        };

        let mut stmt = self.prepare(
            "SELECT id, item_id, quantity, notes FROM workshop_list_items
             WHERE workshop_list_id = ?1
             ORDER BY id",
        )?;
        list.entries = stmt
            .query_map([list_id], |row| {
                Ok(WorkshopEntryRecord {
                    id: row.get(0)?,
                    item_id: row.get(1)?,
                    quantity: row.get(2)?,
                    notes: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(list))
    }
}
