//! Rune extraction from item stats
//!
//! Breaking an item yields runes for the stats it carries. This collects
//! every distinct rune obtainable from a list's items.

use std::collections::HashSet;

use tracing::trace;

use crate::error::CatalogResult;
use crate::models::{ListEntry, Rune, RuneRequirement};
use crate::store::CatalogStore;

/// Collect the unique runes obtainable from the entries' stats, most valuable first.
///
/// Entries are walked in order, then their stats, then the runes of each stat
/// type in id order; the first occurrence of a rune wins. Ties on weight are
/// broken by rune id.
pub fn extract_unique_runes<S: CatalogStore + ?Sized>(
    store: &S,
    entries: &[ListEntry],
    language: &str,
) -> CatalogResult<Vec<RuneRequirement>> {
    let mut seen = HashSet::new();
    let mut runes = Vec::new();

    for entry in entries {
        for stat in &entry.item.stats {
            for rune in store.find_runes_by_stat_type(stat.stat_type_id)? {
                if !seen.insert(rune.id) {
                    continue;
                }
                trace!(rune_id = rune.id, item_id = entry.item.id, "rune");
                runes.push(requirement(&rune, language));
            }
        }
    }

    runes.sort_by(|a, b| {
        b.weight
            .total_cmp(&a.weight)
            .then_with(|| a.rune_id.cmp(&b.rune_id))
    });
    Ok(runes)
}

fn requirement(rune: &Rune, language: &str) -> RuneRequirement {
    let (item_anka_id, type_anka_id, gfx_id) = rune
        .item
        .as_ref()
        .map_or((0, 0, 0), |i| (i.anka_id, i.type_anka_id, i.gfx_id));

    RuneRequirement {
        rune_id: rune.id,
        item_anka_id,
        type_anka_id,
        gfx_id,
        name: rune_name(rune, language),
        code: rune.code.clone(),
        tier: rune.tier,
        weight: rune.weight,
    }
}

/// Translation in `language`, else the first translation, else the rune code
fn rune_name(rune: &Rune, language: &str) -> String {
    let translations = rune.item.as_ref().map(|i| i.translations.as_slice()).unwrap_or(&[]);

    translations
        .iter()
        .find(|t| t.language == language && !t.name.is_empty())
        .or_else(|| translations.first().filter(|t| !t.name.is_empty()))
        .map(|t| t.name.clone())
        .unwrap_or_else(|| rune.code.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::{named, setup_db};
    use crate::db::insert_item;
    use crate::models::{Item, ItemStat, ItemTranslation, RuneTier};

    fn stat(stat_type_id: i64) -> ItemStat {
        ItemStat {
            stat_type_id,
            min_value: Some(1),
            max_value: Some(10),
            formula: String::new(),
            display_order: 0,
        }
    }

    fn entry(stats: &[i64]) -> ListEntry {
        ListEntry {
            id: 0,
            item: Item {
                stats: stats.iter().copied().map(stat).collect(),
                ..Default::default()
            },
            quantity: 1,
            notes: String::new(),
        }
    }

    fn rune_with(translations: &[(&str, &str)]) -> Rune {
        Rune {
            id: 1,
            stat_type_id: 0x77,
            code: "fo".to_string(),
            tier: RuneTier::Base,
            weight: 1.0,
            item: Some(Item {
                translations: translations
                    .iter()
                    .map(|(language, name)| ItemTranslation {
                        language: language.to_string(),
                        name: name.to_string(),
                    })
                    .collect(),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_shared_stat_yields_one_rune_set() {
        let conn = setup_db();
        // Both items carry strength
        let entries = vec![entry(&[0x77]), entry(&[0x77])];

        let runes = extract_unique_runes(&conn, &entries, "en").unwrap();
        let codes: Vec<_> = runes.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, ["ra_fo", "pa_fo", "fo"]);
    }

    #[test]
    fn test_sorted_by_weight_descending() {
        let conn = setup_db();
        // Summons (30), action points (100), strength runes (10, 3, 1)
        let entries = vec![entry(&[0x75, 0x77]), entry(&[0x73])];

        let runes = extract_unique_runes(&conn, &entries, "en").unwrap();
        let weights: Vec<_> = runes.iter().map(|r| r.weight).collect();
        assert_eq!(weights, [100.0, 30.0, 10.0, 3.0, 1.0]);
    }

    #[test]
    fn test_equal_weights_ordered_by_rune_id() {
        let conn = setup_db();
        // Intelligence then strength: ra_ine (9) and ra_fo (3) both weigh 10
        let entries = vec![entry(&[0x7c, 0x77])];

        let runes = extract_unique_runes(&conn, &entries, "en").unwrap();
        let ids: Vec<_> = runes.iter().take(2).map(|r| r.rune_id).collect();
        assert_eq!(ids, [3, 9]);
    }

    #[test]
    fn test_items_without_rune_stats_yield_nothing() {
        let conn = setup_db();
        let entries = vec![entry(&[0x320]), entry(&[])];
        assert!(extract_unique_runes(&conn, &entries, "fr").unwrap().is_empty());
    }

    #[test]
    fn test_rune_name_uses_catalog_item() {
        let conn = setup_db();
        insert_item(&conn, &named(1519, 78, &[("fr", "Rune Fo"), ("en", "Strength Rune")]))
            .unwrap();

        let runes = extract_unique_runes(&conn, &[entry(&[0x77])], "en").unwrap();
        let fo = runes.iter().find(|r| r.code == "fo").unwrap();
        assert_eq!(fo.name, "Strength Rune");
        assert_eq!(fo.item_anka_id, 1519);

        // pa_fo has no item in this catalog
        let pa_fo = runes.iter().find(|r| r.code == "pa_fo").unwrap();
        assert_eq!(pa_fo.name, "pa_fo");
        assert_eq!(pa_fo.item_anka_id, 0);
    }

    #[test]
    fn test_rune_name_fallback_chain() {
        let both = rune_with(&[("fr", "Rune Fo"), ("en", "Strength Rune")]);
        assert_eq!(rune_name(&both, "en"), "Strength Rune");
        assert_eq!(rune_name(&rune_with(&[("fr", "Rune Fo")]), "es"), "Rune Fo");
        assert_eq!(rune_name(&rune_with(&[]), "es"), "fo");
        assert_eq!(rune_name(&rune_with(&[("fr", "")]), "fr"), "fo");

        let mut bare = rune_with(&[]);
        bare.item = None;
        assert_eq!(rune_name(&bare, "fr"), "fo");
    }
}
