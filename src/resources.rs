//! Resource aggregation over recipe trees

use std::collections::HashMap;

use tracing::trace;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Item, ListEntry, Recipe, ResourceRequirement};
use crate::store::CatalogStore;

/// Sum every ingredient needed to craft the entries of a list.
///
/// Entries must already have their recipe trees loaded. Entries without a
/// recipe add nothing. A craftable ingredient is counted itself and also
/// expanded into its own ingredients, so both the intermediate and the raw
/// materials for it show up. Results come back in first-seen order.
pub fn aggregate_resources<S: CatalogStore + ?Sized>(
    store: &S,
    entries: &[ListEntry],
    language: &str,
) -> CatalogResult<Vec<ResourceRequirement>> {
    let mut aggregate = Aggregate::default();

    for entry in entries {
        let Some(recipe) = &entry.item.recipe else {
            continue;
        };
        aggregate.add_recipe(store, recipe, entry.quantity, language)?;
    }

    Ok(aggregate.resources)
}

#[derive(Default)]
struct Aggregate {
    resources: Vec<ResourceRequirement>,
    index: HashMap<i64, usize>, // item id -> position in `resources`
}

impl Aggregate {
    fn add_recipe<S: CatalogStore + ?Sized>(
        &mut self,
        store: &S,
        recipe: &Recipe,
        multiplier: i64,
        language: &str,
    ) -> CatalogResult<()> {
        for ingredient in &recipe.ingredients {
            let item = ingredient
                .item
                .as_ref()
                .ok_or(CatalogError::UnresolvedIngredient {
                    item_id: ingredient.item_id,
                })?;
            let needed = ingredient.quantity * multiplier;
            trace!(item_id = item.id, needed, "ingredient");

            self.record(store, item, needed, language)?;

            if let Some(sub) = &item.recipe {
                self.add_recipe(store, sub, needed, language)?;
            }
        }
        Ok(())
    }

    fn record<S: CatalogStore + ?Sized>(
        &mut self,
        store: &S,
        item: &Item,
        needed: i64,
        language: &str,
    ) -> CatalogResult<()> {
        if let Some(&pos) = self.index.get(&item.id) {
            self.resources[pos].total_needed += needed;
            return Ok(());
        }

        let marketplace = store
            .find_item_type(item, language)?
            .and_then(|t| t.marketplace);

        self.index.insert(item.id, self.resources.len());
        self.resources.push(ResourceRequirement {
            item_id: item.id,
            item_anka_id: item.anka_id,
            type_anka_id: item.type_anka_id,
            gfx_id: item.gfx_id,
            name: item.display_name(language).to_string(),
            total_needed: needed,
            marketplace,
        });
        Ok(())
    }
}
