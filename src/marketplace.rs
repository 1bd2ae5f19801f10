//! Grouping of resource requirements by marketplace

use std::collections::HashMap;

use serde::Serialize;

use crate::models::ResourceRequirement;

/// Resources sold in one marketplace, sorted by name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketplaceGroup {
    pub name: String, // Empty for resources with no marketplace
    pub display_order: Option<i64>,
    pub resources: Vec<ResourceRequirement>,
}

/// Resources grouped by marketplace.
///
/// `groups` is laid out in the same order as `order`: marketplaces by display
/// order, then the unnamed group for resources with no marketplace.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketplaceGroups {
    pub groups: Vec<MarketplaceGroup>,
    pub order: Vec<String>,
}

impl MarketplaceGroups {
    pub fn get(&self, name: &str) -> Option<&MarketplaceGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Partition resources by marketplace name and sort them for display.
pub fn group_by_marketplace(resources: Vec<ResourceRequirement>) -> MarketplaceGroups {
    let mut named: Vec<MarketplaceGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unsorted: Vec<ResourceRequirement> = Vec::new();

    for resource in resources {
        let Some(market) = resource.marketplace.as_ref() else {
            unsorted.push(resource);
            continue;
        };
        if market.name.is_empty() {
            unsorted.push(resource);
            continue;
        }

        let pos = match index.get(&market.name) {
            Some(&pos) => pos,
            None => {
                // The first resource seen for a marketplace fixes its display order
                named.push(MarketplaceGroup {
                    name: market.name.clone(),
                    display_order: Some(market.display_order),
                    resources: Vec::new(),
                });
                index.insert(market.name.clone(), named.len() - 1);
                named.len() - 1
            }
        };
        named[pos].resources.push(resource);
    }

    named.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.name.cmp(&b.name))
    });

    if !unsorted.is_empty() {
        named.push(MarketplaceGroup {
            name: String::new(),
            display_order: None,
            resources: unsorted,
        });
    }

    for group in &mut named {
        // Stable: equal names keep their aggregation order
        group.resources.sort_by(|a, b| a.name.cmp(&b.name));
    }

    let order = named.iter().map(|g| g.name.clone()).collect();
    MarketplaceGroups {
        groups: named,
        order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Marketplace;

    fn market(name: &str, display_order: i64) -> Option<Marketplace> {
        Some(Marketplace {
            id: display_order,
            key: name.to_lowercase(),
            name: name.to_string(),
            display_order,
        })
    }

    fn resource(item_id: i64, name: &str, marketplace: Option<Marketplace>) -> ResourceRequirement {
        ResourceRequirement {
            item_id,
            item_anka_id: item_id,
            type_anka_id: 0,
            gfx_id: 0,
            name: name.to_string(),
            total_needed: 1,
            marketplace,
        }
    }

    #[test]
    fn test_groups_follow_display_order_with_unnamed_last() {
        let resources = vec![
            resource(1, "Boar Leather", None),
            resource(2, "Wheat", market("Farmers", 2)),
            resource(3, "Ash Wood", market("Lumberjacks", 1)),
        ];

        let grouped = group_by_marketplace(resources);
        assert_eq!(grouped.order, ["Lumberjacks", "Farmers", ""]);
        let names: Vec<_> = grouped.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, grouped.order);
        assert_eq!(grouped.get("").unwrap().display_order, None);
    }

    #[test]
    fn test_unnamed_group_omitted_when_empty() {
        let grouped = group_by_marketplace(vec![resource(1, "Wheat", market("Farmers", 4))]);
        assert_eq!(grouped.order, ["Farmers"]);
        assert!(grouped.get("").is_none());

        assert!(group_by_marketplace(Vec::new()).is_empty());
    }

    #[test]
    fn test_resources_sorted_by_name_within_group() {
        let resources = vec![
            resource(1, "Bronze Ore", market("Miners", 3)),
            resource(2, "Amber Dust", market("Miners", 3)),
            resource(3, "amber shard", market("Miners", 3)),
        ];

        let grouped = group_by_marketplace(resources);
        let names: Vec<_> = grouped
            .get("Miners")
            .unwrap()
            .resources
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        // Byte order: uppercase before lowercase
        assert_eq!(names, ["Amber Dust", "Bronze Ore", "amber shard"]);
    }

    #[test]
    fn test_equal_names_keep_insertion_order() {
        let resources = vec![
            resource(10, "Flour", None),
            resource(11, "Flour", None),
            resource(9, "Bran", None),
        ];

        let grouped = group_by_marketplace(resources);
        let ids: Vec<_> = grouped.get("").unwrap().resources.iter().map(|r| r.item_id).collect();
        assert_eq!(ids, [9, 10, 11]);
    }
}
