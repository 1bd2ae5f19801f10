//! Small sample catalog for trying the calculator without game data

use rusqlite::Connection;
use tracing::info;

use crate::db;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Item, ItemStat, ItemTranslation};
use crate::seed;

/// User owning the sample workshop list
pub const SAMPLE_USER_ID: i64 = 1;

fn item(anka_id: i64, type_anka_id: i64, level: i64, fr: &str, en: &str) -> Item {
    Item {
        anka_id,
        type_anka_id,
        level,
        gfx_id: anka_id,
        translations: vec![
            ItemTranslation {
                language: "fr".to_string(),
                name: fr.to_string(),
            },
            ItemTranslation {
                language: "en".to_string(),
                name: en.to_string(),
            },
        ],
        ..Default::default()
    }
}

fn stat(code: &str, min: i64, max: i64, order: i64) -> CatalogResult<ItemStat> {
    let stat_type = seed::stat_type_by_code(code)
        .ok_or_else(|| CatalogError::UnknownStatType(code.to_string()))?;
    Ok(ItemStat {
        stat_type_id: stat_type.id,
        min_value: Some(min),
        max_value: Some(max),
        formula: format!("1d{}+{}", max - min + 1, min - 1),
        display_order: order,
    })
}

fn market(key: &str) -> Option<i64> {
    seed::marketplace_by_key(key).map(|m| m.id)
}

/// Replace the catalog with the sample data and return the sample list id
pub fn load_sample_data(conn: &Connection) -> CatalogResult<i64> {
    db::clear_catalog_data(conn)?;

    db::upsert_item_type(
        conn,
        15,
        "resource",
        &[("fr", "Ressource"), ("en", "Resource")],
        market("resources"),
    )?;
    db::upsert_item_type(
        conn,
        38,
        "wood",
        &[("fr", "Bois"), ("en", "Wood")],
        market("lumberjacks"),
    )?;
    db::upsert_item_type(conn, 39, "ore", &[("fr", "Minerai"), ("en", "Ore")], market("miners"))?;
    db::upsert_item_type(
        conn,
        40,
        "alloy",
        &[("fr", "Alliage"), ("en", "Alloy")],
        market("miners"),
    )?;
    db::upsert_item_type(
        conn,
        48,
        "cereal",
        &[("fr", "Céréale"), ("en", "Cereal")],
        market("farmers"),
    )?;
    db::upsert_item_type(
        conn,
        78,
        "rune",
        &[("fr", "Rune de forgemagie"), ("en", "Smithmagic Rune")],
        market("runes"),
    )?;
    db::upsert_item_type(conn, 16, "hat", &[("fr", "Chapeau"), ("en", "Hat")], None)?;
    db::upsert_item_type(conn, 11, "boots", &[("fr", "Bottes"), ("en", "Boots")], None)?;

    // Base materials
    let ash = db::insert_item(conn, &item(303, 38, 1, "Bois de Frêne", "Ash Wood"))?;
    let iron = db::insert_item(conn, &item(312, 39, 1, "Fer", "Iron"))?;
    let copper = db::insert_item(conn, &item(441, 39, 20, "Cuivre", "Copper"))?;
    let wheat = db::insert_item(conn, &item(289, 48, 1, "Blé", "Wheat"))?;
    let leather = db::insert_item(conn, &item(2478, 15, 10, "Cuir de Sanglier", "Boar Leather"))?;
    let feather = db::insert_item(conn, &item(301, 15, 5, "Plume de Tofu", "Tofu Feather"))?;

    // Intermediate
    let bronze = db::insert_item(conn, &item(6457, 40, 20, "Bronze", "Bronze"))?;
    db::insert_recipe(conn, bronze, &[(iron, 2), (copper, 3)])?;

    // Equipment
    let mut hat = item(8243, 16, 10, "Coiffe de l'Aventurier", "Adventurer Hat");
    hat.stats = vec![stat("vitality", 11, 20, 0)?, stat("wisdom", 1, 5, 1)?];
    let hat = db::insert_item(conn, &hat)?;
    db::insert_recipe(conn, hat, &[(leather, 2), (feather, 3), (bronze, 1)])?;

    let mut boots = item(8244, 11, 12, "Bottes de l'Aventurier", "Adventurer Boots");
    boots.stats = vec![stat("strength", 1, 5, 0)?, stat("intelligence", 1, 5, 1)?];
    let boots = db::insert_item(conn, &boots)?;
    db::insert_recipe(conn, boots, &[(leather, 3), (ash, 4), (bronze, 2)])?;

    // A few rune items, so rune names resolve
    db::insert_item(conn, &item(1519, 78, 1, "Rune Fo", "Strength Rune"))?;
    db::insert_item(conn, &item(1521, 78, 1, "Rune Sa", "Wisdom Rune"))?;
    db::insert_item(conn, &item(1523, 78, 1, "Rune Vi", "Vitality Rune"))?;
    db::insert_item(conn, &item(1548, 78, 1, "Rune Pa Vi", "Vitality Pa Rune"))?;

    let list = db::create_workshop_list(
        conn,
        SAMPLE_USER_ID,
        "Panoplie de l'Aventurier",
        "Hat, boots and some wheat for later",
    )?;
    db::add_item_to_workshop_list(conn, list, hat, 2, "")?;
    db::add_item_to_workshop_list(conn, list, boots, 1, "")?;
    db::add_item_to_workshop_list(conn, list, wheat, 5, "raw, not crafted")?;

    info!(list_id = list, "loaded sample catalog");
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::setup_db;
    use crate::store::{CatalogStore, WorkshopStore};

    #[test]
    fn test_stat_codes_must_exist() {
        assert_eq!(stat("wisdom", 1, 5, 0).unwrap().stat_type_id, 0x76);
        let err = stat("vitalty", 1, 5, 0).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownStatType(ref code) if code == "vitalty"));
    }

    #[test]
    fn test_sample_items_carry_their_stats() {
        let conn = setup_db();
        let list_id = load_sample_data(&conn).unwrap();

        let hat = conn.find_item_by_anka_id(8243, "en").unwrap().unwrap();
        let stats = conn.find_item_stats(hat.id).unwrap();
        let ids: Vec<_> = stats.iter().map(|s| s.stat_type_id).collect();
        assert_eq!(ids, [0x64, 0x76]);

        let list = conn.find_workshop_list(list_id).unwrap().unwrap();
        assert_eq!(list.user_id, SAMPLE_USER_ID);
        assert_eq!(list.entries.len(), 3);
    }
}
