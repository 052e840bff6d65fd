//! Merge-order engine.
//!
//! Two halves, both pure and free of I/O:
//! 1. Search - explore pre-merge groupings and application orders
//!    (`search`), minimizing total experience under the anvil's hard caps
//! 2. Plan - the frozen result with its summary metrics and ranking
//!    comparator (`plan`)
//!
//! Callers hand the engine fully resolved [`Enchantment`](crate::types::Enchantment)
//! values; name resolution and compatibility partitioning live in the
//! catalog collaborator.

mod plan;
mod search;

pub use plan::{EnchantStep, OrderingPlan};
pub use search::{ScheduleOptions, schedule, schedule_with};
