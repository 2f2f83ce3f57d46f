//! Versioned statutory configuration data.
//!
//! Bracket tables and deduction constants are keyed by regime; base salary
//! and regional minimum wages are effective-dated schedules consulted by
//! pure lookup. The engine never fetches or caches this data.

pub mod brackets;
pub mod wages;

pub use brackets::{BracketTableError, RegimeConfig, regime_config};
pub use wages::{social_insurance_cap, unemployment_insurance_cap};
