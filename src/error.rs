//! Error type shared by the catalog store and the calculators

/// Errors raised while reading the catalog or walking recipe trees.
///
/// A missing recipe or a missing translation is not an error: lookups return
/// `Ok(None)` or an item with no translations and callers degrade from there.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// An ingredient references an item id the catalog does not know about
    #[error("item {0} could not be resolved in the catalog")]
    ItemNotFound(i64),

    #[error("workshop list {0} not found")]
    ListNotFound(i64),

    /// Aggregation reached an ingredient whose item was never attached
    #[error("ingredient item {item_id} has not been loaded into the recipe tree")]
    UnresolvedIngredient { item_id: i64 },

    #[error("invalid rune tier: {0}")]
    InvalidRuneTier(String),

    #[error("unknown stat type code: {0}")]
    UnknownStatType(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
