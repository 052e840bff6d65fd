//! JSON-backed catalog loading.
//!
//! Catalogs ship as one JSON object per locale under `assets/enchants/`,
//! keyed by enchantment name. Unknown locales fall back to the English
//! file.

use super::{Catalog, CatalogEntry};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Catalog loaded from a per-locale JSON asset.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    entries: Vec<CatalogEntry>,
}

impl JsonCatalog {
    /// Load the catalog for a locale, falling back to English when the
    /// locale has no catalog of its own.
    pub fn for_locale(locale: &str) -> Result<Self> {
        let dir = asset_dir();
        let localized = dir.join(format!("{locale}.json"));
        let path = if localized.is_file() {
            localized
        } else {
            dir.join("en.json")
        };
        Self::from_path(&path)
    }

    /// Load a catalog from an explicit file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Catalog(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    /// Parse a catalog from JSON text: an object keyed by enchantment
    /// name, each value a [`CatalogEntry`] without the name field.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, CatalogEntry> = serde_json::from_str(json)
            .map_err(|e| Error::Catalog(format!("malformed catalog: {e}")))?;

        let mut entries: Vec<CatalogEntry> = Vec::with_capacity(raw.len());
        for (name, mut entry) in raw {
            if entry.level_max == 0 || entry.weight == 0 {
                return Err(Error::Catalog(format!(
                    "entry '{name}' must have level and weight of at least 1"
                )));
            }
            entry.name = name;
            entries.push(entry);
        }
        if entries.is_empty() {
            return Err(Error::Catalog("catalog has no entries".to_string()));
        }
        Ok(Self { entries })
    }
}

impl Catalog for JsonCatalog {
    fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

/// Directory holding the catalog assets: next to the installed binary, or
/// the crate-relative path during development.
fn asset_dir() -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let shipped = dir.join("assets").join("enchants");
            if shipped.is_dir() {
                return shipped;
            }
        }
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("enchants")
}
