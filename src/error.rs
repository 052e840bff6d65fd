//! Error types for anvil-order.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the library.
///
/// Input errors (`EmptyWantedList`, `DuplicateEnchantment`, `Arguments`)
/// mean the caller supplied a bad request. Infeasibility errors
/// (`TooExpensive`, `TooManyPenalty`) mean the search proved no plan exists
/// under the anvil's hard caps; they are definitive, not retryable.
#[derive(Debug, Error)]
pub enum Error {
    /// The wanted list was empty.
    #[error("cannot order an empty enchantment list")]
    EmptyWantedList,

    /// Two entries share a name but differ in level or weight.
    #[error("duplicate enchantment '{0}' with conflicting level or weight")]
    DuplicateEnchantment(String),

    /// Every order that stays under the penalty cap needs an operation over
    /// the per-operation experience cap.
    #[error(
        "no feasible order: the cheapest plan needs {max_experience} levels in one operation (cap {cap})",
        cap = crate::order::OrderingPlan::MAX_EXPERIENCE
    )]
    TooExpensive {
        /// Most expensive single operation of the cheapest plan found.
        max_experience: u64,
    },

    /// The item's prior-work penalty cannot stay under the cap.
    #[error(
        "no feasible order: the item's penalty would reach {penalty} (cap {cap})",
        cap = crate::order::OrderingPlan::MAX_PENALTY
    )]
    TooManyPenalty {
        /// Lowest final penalty any order can reach.
        penalty: u32,
    },

    /// Enchantment name missing from the catalog.
    #[error("enchantment not found: {0}")]
    EnchantmentNotFound(String),

    /// Item kind missing from the catalog.
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// Catalog could not be loaded or parsed.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Settings could not be loaded or persisted.
    #[error("settings error: {0}")]
    Settings(String),

    /// Command-line arguments were inconsistent.
    #[error("invalid arguments: {0}")]
    Arguments(String),
}
