//! Workshop list operations
//!
//! Ties the store, the tree loader and the calculators together for a whole
//! list. Every operation is all-or-nothing: a dangling ingredient anywhere in
//! the list fails the call instead of producing an undercounted result.

use std::fmt;

use tracing::{debug, info};

use crate::error::{CatalogError, CatalogResult};
use crate::marketplace::{MarketplaceGroups, group_by_marketplace};
use crate::models::{ListEntry, ResourceRequirement, RuneRequirement, WorkshopList};
use crate::resources::aggregate_resources;
use crate::runes::extract_unique_runes;
use crate::store::{CatalogStore, WorkshopStore};
use crate::tree::load_recipe_tree;

/// Load a list with every entry's item, stats and recipe tree
pub fn load_workshop_list<S>(
    store: &S,
    list_id: i64,
    language: &str,
    max_depth: usize,
) -> CatalogResult<WorkshopList>
where
    S: CatalogStore + WorkshopStore + ?Sized,
{
    let record = store
        .find_workshop_list(list_id)?
        .ok_or(CatalogError::ListNotFound(list_id))?;

    let mut items = Vec::with_capacity(record.entries.len());
    for entry in record.entries {
        let mut item = store
            .find_item(entry.item_id, language)?
            .ok_or(CatalogError::ItemNotFound(entry.item_id))?;
        item.stats = store.find_item_stats(item.id)?;
        load_recipe_tree(store, &mut item, language, max_depth)?;

        items.push(ListEntry {
            id: entry.id,
            item,
            quantity: entry.quantity,
            notes: entry.notes,
        });
    }

    debug!(list_id, entries = items.len(), "loaded workshop list");
    Ok(WorkshopList {
        id: record.id,
        user_id: record.user_id,
        name: record.name,
        description: record.description,
        items,
    })
}

/// All resources needed to craft a list, unordered
pub fn resources_for_list<S>(
    store: &S,
    list_id: i64,
    language: &str,
    max_depth: usize,
) -> CatalogResult<Vec<ResourceRequirement>>
where
    S: CatalogStore + WorkshopStore + ?Sized,
{
    let list = load_workshop_list(store, list_id, language, max_depth)?;
    aggregate_resources(store, &list.items, language)
}

/// Resources needed to craft a list, grouped by marketplace
pub fn grouped_resources_for_list<S>(
    store: &S,
    list_id: i64,
    language: &str,
    max_depth: usize,
) -> CatalogResult<MarketplaceGroups>
where
    S: CatalogStore + WorkshopStore + ?Sized,
{
    let resources = resources_for_list(store, list_id, language, max_depth)?;
    Ok(group_by_marketplace(resources))
}

/// Unique runes obtainable by breaking a list's items
pub fn runes_for_list<S>(
    store: &S,
    list_id: i64,
    language: &str,
) -> CatalogResult<Vec<RuneRequirement>>
where
    S: CatalogStore + WorkshopStore + ?Sized,
{
    // Runes only need stats, not recipe trees
    let list = load_workshop_list(store, list_id, language, 0)?;
    extract_unique_runes(store, &list.items, language)
}

/// Everything the workshop view shows for one list
#[derive(Debug)]
pub struct WorkshopSummary {
    pub list_name: String,
    pub entries: Vec<(String, i64)>,
    pub resources: MarketplaceGroups,
    pub runes: Vec<RuneRequirement>,
}

/// Build the full summary of a list
pub fn summarize_list<S>(
    store: &S,
    list_id: i64,
    language: &str,
    max_depth: usize,
) -> CatalogResult<WorkshopSummary>
where
    S: CatalogStore + WorkshopStore + ?Sized,
{
    let list = load_workshop_list(store, list_id, language, max_depth)?;
    let resources = group_by_marketplace(aggregate_resources(store, &list.items, language)?);
    let runes = extract_unique_runes(store, &list.items, language)?;

    info!(
        list_id,
        marketplaces = resources.groups.len(),
        runes = runes.len(),
        "summarized workshop list"
    );

    Ok(WorkshopSummary {
        list_name: list.name,
        entries: list
            .items
            .iter()
            .map(|e| (e.item.display_name(language).to_string(), e.quantity))
            .collect(),
        resources,
        runes,
    })
}

impl fmt::Display for WorkshopSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Workshop: {} ===", self.list_name)?;
        for (name, quantity) in &self.entries {
            writeln!(f, "  {}x {}", quantity, name)?;
        }
        writeln!(f)?;

        writeln!(f, "Resources required:")?;
        if self.resources.is_empty() {
            writeln!(f, "  (nothing to craft)")?;
        }
        for group in &self.resources.groups {
            let title = if group.name.is_empty() {
                "No marketplace"
            } else {
                group.name.as_str()
            };
            writeln!(f, "  [{}]", title)?;
            for r in &group.resources {
                writeln!(f, "    {:>6}x {}", r.total_needed, r.name)?;
            }
        }
        writeln!(f)?;

        writeln!(f, "Runes obtainable:")?;
        if self.runes.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for rune in &self.runes {
            writeln!(
                f,
                "  {:<24} {:<6} weight {}",
                rune.name,
                rune.tier.as_str(),
                rune.weight
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::{named, setup_db};
    use crate::db::{
        add_item_to_workshop_list, create_workshop_list, insert_item, insert_recipe,
        upsert_item_type,
    };
    use crate::models::ItemStat;
    use crate::tree::DEFAULT_MAX_DEPTH;

    #[test]
    fn test_missing_list() {
        let conn = setup_db();
        let err = resources_for_list(&conn, 42, "en", DEFAULT_MAX_DEPTH).unwrap_err();
        assert!(matches!(err, CatalogError::ListNotFound(42)));
    }

    #[test]
    fn test_dangling_ingredient_fails_whole_list() {
        let conn = setup_db();
        let wood = insert_item(&conn, &named(303, 38, &[("en", "Ash Wood")])).unwrap();
        let bow = insert_item(&conn, &named(2000, 2, &[("en", "Bow")])).unwrap();
        let broken = insert_item(&conn, &named(2001, 2, &[("en", "Broken Bow")])).unwrap();
        insert_recipe(&conn, bow, &[(wood, 3)]).unwrap();
        insert_recipe(&conn, broken, &[(wood, 1), (4242, 2)]).unwrap();

        let list = create_workshop_list(&conn, 1, "Bows", "").unwrap();
        add_item_to_workshop_list(&conn, list, bow, 1, "").unwrap();
        add_item_to_workshop_list(&conn, list, broken, 1, "").unwrap();

        let result = resources_for_list(&conn, list, "en", DEFAULT_MAX_DEPTH);
        match result {
            Err(CatalogError::ItemNotFound(id)) => assert_eq!(id, 4242),
            other => panic!("expected ItemNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_grouped_resources_for_list() {
        let conn = setup_db();
        upsert_item_type(&conn, 38, "wood", &[("en", "Wood")], Some(2)).unwrap();
        upsert_item_type(&conn, 39, "ore", &[("en", "Ore")], Some(3)).unwrap();
        let wood = insert_item(&conn, &named(303, 38, &[("en", "Ash Wood")])).unwrap();
        let iron = insert_item(&conn, &named(312, 39, &[("en", "Iron")])).unwrap();
        let token = insert_item(&conn, &named(999, 0, &[("en", "Token")])).unwrap();
        let axe = insert_item(&conn, &named(454, 19, &[("en", "Axe")])).unwrap();
        insert_recipe(&conn, axe, &[(iron, 2), (wood, 1), (token, 1)]).unwrap();

        let list = create_workshop_list(&conn, 1, "Tools", "").unwrap();
        add_item_to_workshop_list(&conn, list, axe, 2, "").unwrap();

        let grouped = grouped_resources_for_list(&conn, list, "en", DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(
            grouped.order,
            ["Lumberjacks Marketplace", "Miners Marketplace", ""]
        );
        assert_eq!(
            grouped.get("Miners Marketplace").unwrap().resources[0].total_needed,
            4
        );
    }

    #[test]
    fn test_runes_for_list_read_stats_from_store() {
        let conn = setup_db();
        let mut hat = named(8000, 16, &[("en", "Hat")]);
        hat.stats = vec![ItemStat {
            stat_type_id: 0x73,
            min_value: Some(1),
            max_value: Some(1),
            formula: String::new(),
            display_order: 0,
        }];
        let hat = insert_item(&conn, &hat).unwrap();
        let list = create_workshop_list(&conn, 1, "Hats", "").unwrap();
        add_item_to_workshop_list(&conn, list, hat, 1, "").unwrap();

        let runes = runes_for_list(&conn, list, "en").unwrap();
        assert_eq!(runes.len(), 1);
        assert_eq!(runes[0].code, "ga_pa");
        assert_eq!(runes[0].weight, 100.0);
    }

    #[test]
    fn test_summary_display() {
        let conn = setup_db();
        let wood = insert_item(&conn, &named(303, 38, &[("en", "Ash Wood")])).unwrap();
        let bow = insert_item(&conn, &named(2000, 2, &[("en", "Bow")])).unwrap();
        insert_recipe(&conn, bow, &[(wood, 3)]).unwrap();
        let list = create_workshop_list(&conn, 1, "Bows", "").unwrap();
        add_item_to_workshop_list(&conn, list, bow, 2, "").unwrap();

        let summary = summarize_list(&conn, list, "en", DEFAULT_MAX_DEPTH).unwrap();
        let text = summary.to_string();
        assert!(text.contains("=== Workshop: Bows ==="));
        assert!(text.contains("2x Bow"));
        assert!(text.contains("[No marketplace]"));
        assert!(text.contains("     6x Ash Wood"));
        assert!(text.contains("(none)"));
    }
}
