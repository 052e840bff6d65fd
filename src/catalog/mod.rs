//! Enchantment catalog - the collaborator that resolves names to values.
//!
//! The ordering engine only ever consumes resolved
//! [`Enchantment`](crate::types::Enchantment) values; everything that knows
//! about names, item kinds, and compatibility lives behind the [`Catalog`]
//! trait. [`candidate_sets`] performs the incompatibility partitioning that
//! keeps conflicting enchantments out of a single computation.

mod loader;

pub use loader::JsonCatalog;

use crate::types::Enchantment;
use serde::Deserialize;

/// One catalog row: an enchantment definition with its applicability and
/// compatibility metadata.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Canonical name; the key of the row in the catalog file.
    #[serde(skip)]
    pub name: String,
    /// Maximum obtainable level.
    pub level_max: u32,
    /// Anvil weight (experience multiplier per level) when applied from a
    /// book.
    pub weight: u32,
    /// Item kinds this enchantment can go on.
    #[serde(default)]
    pub items: Vec<String>,
    /// Names of enchantments that cannot share an item with this one.
    #[serde(default)]
    pub incompatible: Vec<String>,
    /// Hidden entries are resolvable by name but excluded from per-item
    /// listings (treasure variants and curses).
    #[serde(default)]
    pub hidden: bool,
}

impl CatalogEntry {
    /// Resolved enchantment at its maximum level.
    pub fn enchantment(&self) -> Enchantment {
        Enchantment::new(self.name.clone(), self.level_max, self.weight)
    }

    /// Resolved enchantment at an explicit level.
    pub fn enchantment_at(&self, level: u32) -> Enchantment {
        Enchantment::new(self.name.clone(), level, self.weight)
    }

    /// Whether this enchantment can go on the given item kind.
    pub fn applies_to(&self, item: &str) -> bool {
        self.items.iter().any(|kind| kind.eq_ignore_ascii_case(item))
    }

    /// Whether the two entries conflict, by either side's rules.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.incompatible.iter().any(|name| name == &other.name)
            || other.incompatible.iter().any(|name| name == &self.name)
    }
}

/// Name-resolution boundary. The engine itself never looks anything up;
/// the CLI resolves through this trait and hands the engine values.
pub trait Catalog {
    /// Find an entry by name, case-insensitively.
    fn find(&self, name: &str) -> Option<&CatalogEntry>;

    /// All entries.
    fn entries(&self) -> &[CatalogEntry];

    /// Non-hidden entries applicable to an item kind.
    fn for_item(&self, item: &str) -> Vec<&CatalogEntry> {
        self.entries()
            .iter()
            .filter(|entry| !entry.hidden && entry.applies_to(item))
            .collect()
    }

    /// Every item kind any entry applies to, sorted and deduplicated.
    fn items(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self
            .entries()
            .iter()
            .flat_map(|entry| entry.items.iter().map(String::as_str))
            .collect();
        kinds.sort_unstable();
        kinds.dedup();
        kinds
    }
}

/// Split a set of entries into compatible candidate sets, one per
/// conflicted entry: entries compatible with everything form the shared
/// base, and each entry involved in a conflict gets its own set of
/// `base + that entry`. With no conflicts there is a single set.
///
/// Each returned set is safe to pass to the engine in one call; plans
/// built from different sets are ranked against each other with the plan
/// comparator, never merged.
pub fn candidate_sets(entries: &[&CatalogEntry]) -> Vec<Vec<Enchantment>> {
    let conflicted: Vec<&CatalogEntry> = entries
        .iter()
        .filter(|entry| {
            entries
                .iter()
                .any(|other| entry.name != other.name && entry.conflicts_with(other))
        })
        .copied()
        .collect();

    if conflicted.is_empty() {
        return vec![entries.iter().map(|entry| entry.enchantment()).collect()];
    }

    let base: Vec<&CatalogEntry> = entries
        .iter()
        .filter(|entry| !conflicted.iter().any(|c| c.name == entry.name))
        .copied()
        .collect();

    conflicted
        .iter()
        .map(|pick| {
            base.iter()
                .map(|entry| entry.enchantment())
                .chain(std::iter::once(pick.enchantment()))
                .collect()
        })
        .collect()
}
