//! Cheapest anvil combine order for leveled, weighted enchantments.
//!
//! The core is [`order::schedule`]: given a wanted list and the item's
//! prior-work penalty, it returns the cheapest feasible sequence of combine
//! operations as an [`order::OrderingPlan`], or a definitive infeasibility
//! error when the anvil's hard caps rule every order out. Name resolution
//! ([`catalog`]), localization ([`i18n`]), and persistence ([`settings`])
//! are collaborators around that pure core.

rust_i18n::i18n!("locales", fallback = "en");

pub mod catalog;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod order;
pub mod settings;
pub mod types;

pub use error::{Error, Result};
pub use order::{OrderingPlan, ScheduleOptions, schedule, schedule_with};
pub use types::Enchantment;
