//! Static reference data: stat types, marketplaces and runes
//!
//! These tables never change at runtime. They are written to the catalog by
//! [`crate::db::seed_reference_data`] and looked up through the lazily built
//! maps below.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::RuneTier;

#[derive(Debug)]
pub struct StatTypeSeed {
    pub id: i64,
    pub code: &'static str,
    pub names: &'static [(&'static str, &'static str)], // (language, name)
}

#[derive(Debug)]
pub struct MarketplaceSeed {
    pub id: i64,
    pub key: &'static str,
    pub display_order: i64,
    pub names: &'static [(&'static str, &'static str)],
}

#[derive(Debug)]
pub struct RuneSeed {
    pub id: i64,
    pub code: &'static str,
    pub stat_type_id: i64,
    pub tier: RuneTier,
    pub weight: f64,
    pub item_anka_id: i64,
}

macro_rules! stat {
    ($id:expr, $code:expr, $fr:expr, $en:expr, $es:expr $(,)?) => {
        StatTypeSeed {
            id: $id,
            code: $code,
            names: &[("fr", $fr), ("en", $en), ("es", $es)],
        }
    };
}

pub static STAT_TYPES: &[StatTypeSeed] = &[
    // Characteristics
    stat!(0x64, "vitality", "Vitalité", "Vitality", "Vitalidad"),
    stat!(0x73, "action_points", "PA", "AP", "PA"),
    stat!(0x76, "wisdom", "Sagesse", "Wisdom", "Sabiduría"),
    stat!(0x77, "strength", "Force", "Strength", "Fuerza"),
    stat!(0x7b, "agility", "Agilité", "Agility", "Agilidad"),
    stat!(0x7c, "intelligence", "Intelligence", "Intelligence", "Inteligencia"),
    stat!(0x7d, "chance", "Chance", "Chance", "Suerte"),
    stat!(0x7f, "pods", "Pods", "Pods", "Pods"),
    stat!(0x80, "prospecting", "Prospection", "Prospecting", "Prospección"),
    // Combat
    stat!(0x60, "damage", "Dommages", "Damage", "Daño"),
    stat!(0x62, "damage_percent", "Dommages (%)", "Damage (%)", "Daño (%)"),
    stat!(0x6e, "critical_hit", "Coups Critiques", "Critical Hit", "Golpe Crítico"),
    stat!(0x6f, "initiative", "Initiative", "Initiative", "Iniciativa"),
    stat!(0x70, "range", "Portée", "Range", "Alcance"),
    stat!(0x75, "summon", "Invocations", "Summons", "Invocaciones"),
    stat!(0x99, "range_bonus", "Bonus de Portée", "Range Bonus", "Bonus de Alcance"),
    // Resistances
    stat!(
        0x98,
        "neutral_resist",
        "Résistance Neutre",
        "Neutral Resistance",
        "Resistencia Neutral",
    ),
    stat!(0x9a, "earth_resist", "Résistance Terre", "Earth Resistance", "Resistencia Tierra"),
    stat!(0x9b, "fire_resist", "Résistance Feu", "Fire Resistance", "Resistencia Fuego"),
    stat!(0x9c, "water_resist", "Résistance Eau", "Water Resistance", "Resistencia Agua"),
    stat!(0x9d, "air_resist", "Résistance Air", "Air Resistance", "Resistencia Aire"),
    stat!(
        0x9e,
        "neutral_resist_percent",
        "Résistance Neutre (%)",
        "Neutral Resistance (%)",
        "Resistencia Neutral (%)",
    ),
    stat!(
        0xae,
        "earth_resist_percent",
        "Résistance Terre (%)",
        "Earth Resistance (%)",
        "Resistencia Tierra (%)",
    ),
    // Elemental damage
    stat!(0xf0, "neutral_damage", "Dommages Neutre", "Neutral Damage", "Daño Neutral"),
    stat!(0xf1, "earth_damage", "Dommages Terre", "Earth Damage", "Daño Tierra"),
    stat!(0xf2, "fire_damage", "Dommages Feu", "Fire Damage", "Daño Fuego"),
    stat!(0xf3, "water_damage", "Dommages Eau", "Water Damage", "Daño Agua"),
    stat!(0xf4, "air_damage", "Dommages Air", "Air Damage", "Daño Aire"),
    // Special
    stat!(0x8a, "heal", "Soins", "Heals", "Curas"),
    stat!(0x8b, "reflect_damage", "Renvoie de Dommages", "Reflect Damage", "Reflejo de Daño"),
    stat!(0x209, "ap_reduction", "Retrait PA", "AP Reduction", "Reducción PA"),
    stat!(0x25b, "trap_damage", "Dommages Pièges", "Trap Damage", "Daño de Trampas"),
    stat!(0x259, "trap_power", "Puissance Pièges", "Trap Power", "Poder de Trampas"),
    stat!(0x31b, "dodge", "Esquive", "Dodge", "Esquiva"),
    stat!(0x320, "lock", "Tacle", "Lock", "Placaje"),
    stat!(0x834, "mp_reduction", "Retrait PM", "MP Reduction", "Reducción PM"),
];

pub static MARKETPLACES: &[MarketplaceSeed] = &[
    MarketplaceSeed {
        id: 1,
        key: "resources",
        display_order: 1,
        names: &[
            ("fr", "Hôtel de vente des ressources"),
            ("en", "Resources Marketplace"),
            ("es", "Mercadillo de recursos"),
        ],
    },
    MarketplaceSeed {
        id: 2,
        key: "lumberjacks",
        display_order: 2,
        names: &[
            ("fr", "Hôtel de vente des bûcherons"),
            ("en", "Lumberjacks Marketplace"),
            ("es", "Mercadillo de leñadores"),
        ],
    },
    MarketplaceSeed {
        id: 3,
        key: "miners",
        display_order: 3,
        names: &[
            ("fr", "Hôtel de vente des mineurs"),
            ("en", "Miners Marketplace"),
            ("es", "Mercadillo de mineros"),
        ],
    },
    MarketplaceSeed {
        id: 4,
        key: "farmers",
        display_order: 4,
        names: &[
            ("fr", "Hôtel de vente des paysans"),
            ("en", "Farmers Marketplace"),
            ("es", "Mercadillo de campesinos"),
        ],
    },
    MarketplaceSeed {
        id: 5,
        key: "tailors",
        display_order: 5,
        names: &[
            ("fr", "Hôtel de vente des tailleurs"),
            ("en", "Tailors Marketplace"),
            ("es", "Mercadillo de sastres"),
        ],
    },
    MarketplaceSeed {
        id: 6,
        key: "runes",
        display_order: 6,
        names: &[
            ("fr", "Hôtel de vente des runes"),
            ("en", "Runes Marketplace"),
            ("es", "Mercadillo de runas"),
        ],
    },
];

macro_rules! rune {
    ($id:expr, $code:expr, $stat:expr, $tier:ident, $weight:expr, $item:expr) => {
        RuneSeed {
            id: $id,
            code: $code,
            stat_type_id: $stat,
            tier: RuneTier::$tier,
            weight: $weight,
            item_anka_id: $item,
        }
    };
}

pub static RUNES: &[RuneSeed] = &[
    rune!(1, "fo", 0x77, Base, 1.0, 1519),
    rune!(2, "pa_fo", 0x77, Pa, 3.0, 1545),
    rune!(3, "ra_fo", 0x77, Ra, 10.0, 1551),
    rune!(4, "sa", 0x76, Base, 3.0, 1521),
    rune!(5, "pa_sa", 0x76, Pa, 9.0, 1546),
    rune!(6, "ra_sa", 0x76, Ra, 30.0, 1552),
    rune!(7, "ine", 0x7c, Base, 1.0, 1522),
    rune!(8, "pa_ine", 0x7c, Pa, 3.0, 1547),
    rune!(9, "ra_ine", 0x7c, Ra, 10.0, 1553),
    rune!(10, "vi", 0x64, Base, 1.0, 1523),
    rune!(11, "pa_vi", 0x64, Pa, 3.0, 1548),
    rune!(12, "ra_vi", 0x64, Ra, 10.0, 1554),
    rune!(13, "age", 0x7b, Base, 1.0, 1524),
    rune!(14, "pa_age", 0x7b, Pa, 3.0, 1549),
    rune!(15, "ra_age", 0x7b, Ra, 10.0, 1555),
    rune!(16, "cha", 0x7d, Base, 1.0, 1525),
    rune!(17, "pa_cha", 0x7d, Pa, 3.0, 1550),
    rune!(18, "ra_cha", 0x7d, Ra, 10.0, 1556),
    rune!(19, "ini", 0x6f, Base, 1.0, 7442),
    rune!(20, "pa_ini", 0x6f, Pa, 3.0, 7443),
    rune!(21, "ra_ini", 0x6f, Ra, 10.0, 7444),
    rune!(22, "pod", 0x7f, Base, 1.0, 7445),
    rune!(23, "pa_pod", 0x7f, Pa, 3.0, 7446),
    rune!(24, "ra_pod", 0x7f, Ra, 10.0, 7447),
    rune!(25, "prospe", 0x80, Single, 3.0, 7451),
    rune!(26, "ga_pa", 0x73, Single, 100.0, 1557),
    rune!(27, "po", 0x70, Single, 51.0, 7438),
    rune!(28, "invo", 0x75, Single, 30.0, 7440),
    rune!(29, "do", 0x60, Single, 20.0, 7435),
    rune!(30, "cri", 0x6e, Single, 30.0, 7433),
    rune!(31, "so", 0x8a, Single, 20.0, 7434),
    rune!(32, "per_do", 0x62, Single, 2.0, 7436),
];

static STAT_TYPES_BY_CODE: Lazy<HashMap<&'static str, &'static StatTypeSeed>> =
    Lazy::new(|| STAT_TYPES.iter().map(|s| (s.code, s)).collect());

static MARKETPLACES_BY_KEY: Lazy<HashMap<&'static str, &'static MarketplaceSeed>> =
    Lazy::new(|| MARKETPLACES.iter().map(|m| (m.key, m)).collect());

pub fn stat_type_by_code(code: &str) -> Option<&'static StatTypeSeed> {
    STAT_TYPES_BY_CODE.get(code).copied()
}

pub fn marketplace_by_key(key: &str) -> Option<&'static MarketplaceSeed> {
    MARKETPLACES_BY_KEY.get(key).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let stat_ids: HashSet<_> = STAT_TYPES.iter().map(|s| s.id).collect();
        assert_eq!(stat_ids.len(), STAT_TYPES.len());

        let rune_ids: HashSet<_> = RUNES.iter().map(|r| r.id).collect();
        assert_eq!(rune_ids.len(), RUNES.len());

        let rune_codes: HashSet<_> = RUNES.iter().map(|r| r.code).collect();
        assert_eq!(rune_codes.len(), RUNES.len());
    }

    #[test]
    fn test_every_rune_has_a_known_stat_type() {
        for rune in RUNES {
            assert!(
                STAT_TYPES.iter().any(|s| s.id == rune.stat_type_id),
                "rune {} points at unknown stat type {:#x}",
                rune.code,
                rune.stat_type_id
            );
        }
    }

    #[test]
    fn test_lookups() {
        assert_eq!(stat_type_by_code("strength").map(|s| s.id), Some(0x77));
        assert_eq!(marketplace_by_key("runes").map(|m| m.display_order), Some(6));
        assert!(marketplace_by_key("casino").is_none());
    }
}
