//! Core value types.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A named, leveled, weighted enchantment to be applied to an item.
///
/// Immutable for the duration of one computation. Identity within a
/// computation is by name; the engine rejects two entries that share a name
/// but differ in level or weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Enchantment {
    /// Display name, unique within one wanted list.
    pub name: String,
    /// Enchantment level, at least 1.
    pub level: u32,
    /// Anvil weight (experience multiplier per level), at least 1.
    pub weight: u32,
}

impl Enchantment {
    /// Create a new enchantment.
    pub fn new(name: impl Into<String>, level: u32, weight: u32) -> Self {
        Self {
            name: name.into(),
            level,
            weight,
        }
    }

    /// Experience cost of applying this enchantment once, before any
    /// prior-work penalty.
    pub fn experience(&self) -> u64 {
        u64::from(self.level) * u64::from(self.weight)
    }
}

impl Ord for Enchantment {
    /// Total order by `(experience, level, name)`, ascending.
    fn cmp(&self, other: &Self) -> Ordering {
        self.experience()
            .cmp(&other.experience())
            .then_with(|| self.level.cmp(&other.level))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for Enchantment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Enchantment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, roman_numeral(self.level))
    }
}

const ROMAN_PAIRS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Format a level as a Roman numeral, the way enchantment levels are
/// conventionally displayed. Values outside 1..=3999 fall back to decimal.
pub fn roman_numeral(value: u32) -> String {
    if value == 0 || value > 3999 {
        return value.to_string();
    }
    let mut remaining = value;
    let mut out = String::new();
    for (step, glyph) in ROMAN_PAIRS {
        while remaining >= step {
            out.push_str(glyph);
            remaining -= step;
        }
    }
    out
}

/// Parse a Roman numeral back to its value. Accepts either case; returns
/// `None` for anything that is not a well-formed numeral.
pub fn parse_roman_numeral(text: &str) -> Option<u32> {
    if text.is_empty() {
        return None;
    }
    let upper = text.to_ascii_uppercase();
    let mut rest = upper.as_str();
    let mut value = 0u32;
    for (step, glyph) in ROMAN_PAIRS {
        while let Some(stripped) = rest.strip_prefix(glyph) {
            value += step;
            rest = stripped;
        }
    }
    if !rest.is_empty() {
        return None;
    }
    // Round-trip to reject malformed forms like "IIII" or "VX".
    (roman_numeral(value) == upper).then_some(value)
}
