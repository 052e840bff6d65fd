//! Plan and step model - the frozen output of the ordering engine.
//!
//! This module contains pure data structures. A plan is assembled once by
//! the search and never recomputed; comparison is the only cross-plan
//! operation.

use crate::types::Enchantment;
use std::cmp::Ordering;
use std::fmt;

/// One operation applied to the item: the group of enchantments fused by it
/// and the number of elementary anvil actions it stands for.
///
/// A group of `g` enchantments costs `g` elementary combines: `g - 1`
/// pre-merges on a throwaway composite, then one application to the item.
/// Only the application grows the item's own penalty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnchantStep {
    /// Enchantments fused by this step, in canonical order.
    pub enchantments: Vec<Enchantment>,
    /// Elementary combine actions this step contributes.
    pub count: u32,
}

impl EnchantStep {
    pub(crate) fn new(mut enchantments: Vec<Enchantment>) -> Self {
        enchantments.sort();
        let count = u32::try_from(enchantments.len()).unwrap_or(u32::MAX);
        Self {
            enchantments,
            count,
        }
    }

    /// Combined experience of the group, before penalties.
    pub fn experience(&self) -> u64 {
        self.enchantments.iter().map(Enchantment::experience).sum()
    }
}

impl fmt::Display for EnchantStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for enchantment in &self.enchantments {
            if !first {
                write!(f, " + ")?;
            }
            write!(f, "{enchantment}")?;
            first = false;
        }
        Ok(())
    }
}

/// The result of ordering: steps in execution order plus frozen summary
/// metrics.
#[derive(Debug, Clone)]
pub struct OrderingPlan {
    steps: Vec<EnchantStep>,
    penalty: u32,
    max_experience: u64,
    total_experience: u64,
}

impl OrderingPlan {
    /// Hard cap on a single operation's experience cost; above this the
    /// anvil refuses with "Too Expensive!".
    pub const MAX_EXPERIENCE: u64 = 39;

    /// Hard cap on an item's prior-work penalty; at 2^6 the cheapest
    /// possible operation already breaks [`Self::MAX_EXPERIENCE`].
    pub const MAX_PENALTY: u32 = 6;

    pub(crate) fn new(
        steps: Vec<EnchantStep>,
        penalty: u32,
        max_experience: u64,
        total_experience: u64,
    ) -> Self {
        Self {
            steps,
            penalty,
            max_experience,
            total_experience,
        }
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[EnchantStep] {
        &self.steps
    }

    /// The item's penalty after the last step.
    pub fn penalty(&self) -> u32 {
        self.penalty
    }

    /// Most expensive single operation in the plan, pre-merges included.
    pub fn max_experience(&self) -> u64 {
        self.max_experience
    }

    /// Sum of every operation's cost.
    pub fn total_experience(&self) -> u64 {
        self.total_experience
    }

    /// Elementary combine actions across all steps.
    pub fn action_count(&self) -> u32 {
        self.steps.iter().map(|step| step.count).sum()
    }

    /// Whether some operation exceeds [`Self::MAX_EXPERIENCE`].
    ///
    /// Advisory: set only on plans accepted under
    /// [`ScheduleOptions::tolerate_caps`](crate::order::ScheduleOptions);
    /// the strict search fails instead of returning such a plan.
    pub fn is_too_expensive(&self) -> bool {
        self.max_experience > Self::MAX_EXPERIENCE
    }

    /// Whether the final penalty exceeds [`Self::MAX_PENALTY`]. Advisory,
    /// like [`Self::is_too_expensive`].
    pub fn is_too_many_penalty(&self) -> bool {
        self.penalty > Self::MAX_PENALTY
    }

    fn order_key(&self) -> (u32, u64, u64, u32) {
        (
            self.penalty,
            self.total_experience,
            self.max_experience,
            self.action_count(),
        )
    }
}

/// Plans are equal when their ranking metrics are equal; two structurally
/// different plans with identical metrics compare as equal.
impl PartialEq for OrderingPlan {
    fn eq(&self, other: &Self) -> bool {
        self.order_key() == other.order_key()
    }
}

impl Eq for OrderingPlan {}

impl Ord for OrderingPlan {
    /// Lexicographic ranking on `(penalty, total experience, max
    /// experience, action count)`, ascending; a smaller plan is the better
    /// plan.
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl PartialOrd for OrderingPlan {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for OrderingPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, step) in self.steps.iter().enumerate() {
            writeln!(f, "Step {}: {step}", index + 1)?;
        }
        writeln!(f, "Penalty Level: {}", self.penalty)?;
        writeln!(f, "Max Experience Level: {}", self.max_experience)?;
        write!(f, "Total Experience Level: {}", self.total_experience)
    }
}
