//! Recipe tree loading
//!
//! Attaches an item's recipe, then each ingredient's item and recipe, down to
//! a fixed depth. Items below the cap are left without a recipe even when the
//! catalog has one, which also keeps cyclic recipes from looping forever.

use tracing::{debug, trace};

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Item, Recipe};
use crate::store::CatalogStore;

/// Depth used by the workshop list operations
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Load the recipe tree of `item` in place.
///
/// The previous tree, if any, is replaced: a base material or a `max_depth` of
/// 0 leaves the item with no recipe. If any ingredient item cannot be found,
/// the error is returned and `item` is not modified.
pub fn load_recipe_tree<S: CatalogStore + ?Sized>(
    store: &S,
    item: &mut Item,
    language: &str,
    max_depth: usize,
) -> CatalogResult<()> {
    item.recipe = build_recipe(store, item.id, language, max_depth, 0)?;
    Ok(())
}

/// Load the recipe trees of several roots.
///
/// Stops at the first failing root. Trees are attached only once every root
/// has loaded, so on error none of `items` is modified.
pub fn load_recipe_trees<S: CatalogStore + ?Sized>(
    store: &S,
    items: &mut [Item],
    language: &str,
    max_depth: usize,
) -> CatalogResult<()> {
    let recipes = items
        .iter()
        .map(|item| build_recipe(store, item.id, language, max_depth, 0))
        .collect::<CatalogResult<Vec<_>>>()?;

    for (item, recipe) in items.iter_mut().zip(recipes) {
        item.recipe = recipe;
    }
    debug!(roots = items.len(), "loaded recipe trees");
    Ok(())
}

fn build_recipe<S: CatalogStore + ?Sized>(
    store: &S,
    item_id: i64,
    language: &str,
    max_depth: usize,
    depth: usize,
) -> CatalogResult<Option<Recipe>> {
    if depth >= max_depth {
        debug!(item_id, depth, "recipe tree truncated at max depth");
        return Ok(None);
    }

    let Some(mut recipe) = store.find_item_recipe(item_id)? else {
        // Base material
        return Ok(None);
    };
    trace!(
        item_id,
        depth,
        ingredients = recipe.ingredients.len(),
        "loaded recipe"
    );

    for ingredient in &mut recipe.ingredients {
        let mut ingredient_item = store
            .find_item(ingredient.item_id, language)?
            .ok_or(CatalogError::ItemNotFound(ingredient.item_id))?;

        ingredient_item.recipe =
            build_recipe(store, ingredient_item.id, language, max_depth, depth + 1)?;
        ingredient.item = Some(ingredient_item);
    }

    Ok(Some(recipe))
}

/// Depth of the deepest attached recipe (0 for the root's own recipe).
/// `None` when the item has no recipe attached.
pub fn recipe_depth(item: &Item) -> Option<usize> {
    let recipe = item.recipe.as_ref()?;
    let below = recipe
        .ingredients
        .iter()
        .filter_map(|i| i.item.as_ref().and_then(recipe_depth))
        .max();
    Some(below.map_or(0, |d| d + 1))
}

/// Format a loaded recipe tree as a readable string
pub fn format_recipe_tree(item: &Item, language: &str) -> String {
    let mut output = format!("{} (#{})\n", name_or_id(item, language), item.anka_id);
    if let Some(recipe) = &item.recipe {
        format_recipe(recipe, language, 1, &mut output);
    }
    output
}

fn format_recipe(recipe: &Recipe, language: &str, indent: usize, output: &mut String) {
    let prefix = "  ".repeat(indent);
    for ingredient in &recipe.ingredients {
        match &ingredient.item {
            Some(item) => {
                let marker = if item.is_craftable() { "" } else { " (base)" };
                output.push_str(&format!(
                    "{}{}x {}{}\n",
                    prefix,
                    ingredient.quantity,
                    name_or_id(item, language),
                    marker
                ));
                if let Some(sub) = &item.recipe {
                    format_recipe(sub, language, indent + 1, output);
                }
            }
            None => {
                output.push_str(&format!(
                    "{}{}x item {} (not loaded)\n",
                    prefix, ingredient.quantity, ingredient.item_id
                ));
            }
        }
    }
}

fn name_or_id(item: &Item, language: &str) -> String {
    match item.display_name(language) {
        "" => format!("item {}", item.id),
        name => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::{named, setup_db};
    use crate::db::{insert_item, insert_recipe};
    use rusqlite::Connection;

    /// Chain where each item needs 2 of the next one: c0 <- c1 <- ... <- c{len-1}
    fn chain(conn: &Connection, len: usize) -> Vec<i64> {
        let ids: Vec<i64> = (0..len)
            .map(|i| {
                let name = format!("Link {i}");
                insert_item(conn, &named(100 + i as i64, 1, &[("en", name.as_str())])).unwrap()
            })
            .collect();
        for pair in ids.windows(2) {
            insert_recipe(conn, pair[0], &[(pair[1], 2)]).unwrap();
        }
        ids
    }

    #[test]
    fn test_base_material_has_no_recipe() {
        let conn = setup_db();
        let ids = chain(&conn, 1);
        let mut item = conn.find_item(ids[0], "en").unwrap().unwrap();

        load_recipe_tree(&conn, &mut item, "en", DEFAULT_MAX_DEPTH).unwrap();
        assert!(item.recipe.is_none());
        assert_eq!(recipe_depth(&item), None);
    }

    #[test]
    fn test_depth_cap_truncates_tree() {
        let conn = setup_db();
        let ids = chain(&conn, 6);
        let mut root = conn.find_item(ids[0], "en").unwrap().unwrap();

        load_recipe_tree(&conn, &mut root, "en", 3).unwrap();
        assert_eq!(recipe_depth(&root), Some(2));

        // Walk down to the item at depth 3: loaded, but with no recipe attached
        let mut node = &root;
        for _ in 0..3 {
            node = node.recipe.as_ref().unwrap().ingredients[0]
                .item
                .as_ref()
                .unwrap();
        }
        assert_eq!(node.id, ids[3]);
        assert!(node.recipe.is_none());
        assert!(crate::db::item_has_recipe(&conn, node.id).unwrap());
    }

    #[test]
    fn test_cyclic_recipes_terminate() {
        let conn = setup_db();
        let a = insert_item(&conn, &named(1, 1, &[("en", "A")])).unwrap();
        let b = insert_item(&conn, &named(2, 1, &[("en", "B")])).unwrap();
        insert_recipe(&conn, a, &[(b, 1)]).unwrap();
        insert_recipe(&conn, b, &[(a, 1)]).unwrap();

        let mut root = conn.find_item(a, "en").unwrap().unwrap();
        load_recipe_tree(&conn, &mut root, "en", 4).unwrap();
        assert_eq!(recipe_depth(&root), Some(3));
    }

    #[test]
    fn test_missing_ingredient_is_fatal_and_leaves_item_untouched() {
        let conn = setup_db();
        let ids = chain(&conn, 2);
        // Second ingredient points nowhere
        insert_recipe(&conn, ids[1], &[(9999, 1)]).unwrap();

        let mut root = conn.find_item(ids[0], "en").unwrap().unwrap();
        let err = load_recipe_tree(&conn, &mut root, "en", 3).unwrap_err();
        assert!(matches!(err, CatalogError::ItemNotFound(9999)));
        assert!(err.to_string().contains("9999"));
        assert!(root.recipe.is_none());
    }

    #[test]
    fn test_reload_replaces_previous_tree() {
        let conn = setup_db();
        let ids = chain(&conn, 3);
        let mut root = conn.find_item(ids[0], "en").unwrap().unwrap();

        load_recipe_tree(&conn, &mut root, "en", 3).unwrap();
        assert_eq!(recipe_depth(&root), Some(1));

        load_recipe_tree(&conn, &mut root, "en", 1).unwrap();
        assert_eq!(recipe_depth(&root), Some(0));

        load_recipe_tree(&conn, &mut root, "en", 0).unwrap();
        assert!(root.recipe.is_none());
    }

    #[test]
    fn test_load_several_roots() {
        let conn = setup_db();
        let ids = chain(&conn, 3);
        let mut roots = vec![
            conn.find_item(ids[0], "en").unwrap().unwrap(),
            conn.find_item(ids[1], "en").unwrap().unwrap(),
            conn.find_item(ids[2], "en").unwrap().unwrap(),
        ];

        load_recipe_trees(&conn, &mut roots, "en", DEFAULT_MAX_DEPTH).unwrap();
        let depths: Vec<_> = roots.iter().map(recipe_depth).collect();
        assert_eq!(depths, [Some(1), Some(0), None]);
    }

    #[test]
    fn test_failing_root_leaves_every_root_untouched() {
        let conn = setup_db();
        let ids = chain(&conn, 3);
        let broken = insert_item(&conn, &named(500, 1, &[("en", "Broken")])).unwrap();
        insert_recipe(&conn, broken, &[(ids[2], 1), (9999, 1)]).unwrap();

        let mut roots = vec![
            conn.find_item(ids[0], "en").unwrap().unwrap(),
            conn.find_item(broken, "en").unwrap().unwrap(),
        ];
        load_recipe_tree(&conn, &mut roots[0], "en", 1).unwrap();

        let err = load_recipe_trees(&conn, &mut roots, "en", DEFAULT_MAX_DEPTH).unwrap_err();
        assert!(matches!(err, CatalogError::ItemNotFound(9999)));
        // The first root keeps the shallow tree it had before the call
        assert_eq!(recipe_depth(&roots[0]), Some(0));
        assert!(roots[1].recipe.is_none());
    }

    #[test]
    fn test_format_recipe_tree() {
        let conn = setup_db();
        let ids = chain(&conn, 3);
        let mut root = conn.find_item(ids[0], "en").unwrap().unwrap();
        load_recipe_tree(&conn, &mut root, "en", 3).unwrap();

        let text = format_recipe_tree(&root, "en");
        assert_eq!(text, "Link 0 (#100)\n  2x Link 1\n    2x Link 2 (base)\n");
    }
}
