//! # engine
//!
//! The decision core.  Every component here is a pure function of its inputs:
//! no clock reads, no I/O, no shared mutable state.
//!
//! ```text
//! ValueAreaCalculator ─┐
//! MarketStructureAnalyzer ─┼──▶ (feed assembler) ──▶ MarketSnapshot
//! VixRegimeGuard ──────┘                                 │
//!                                                        ▼
//!                              PremiumSelector ◀── EdgeGateStrategy ──▶ Decision ──▶ render
//! ```

pub mod premium;
pub mod render;
pub mod strategy;
pub mod structure;
pub mod value_area;
pub mod vix_guard;

#[cfg(test)]
pub(crate) mod fixtures;

pub use premium::{PremiumPick, PremiumSelector};
pub use render::{decision_key, render_decision};
pub use strategy::EdgeGateStrategy;
pub use structure::MarketStructureAnalyzer;
pub use value_area::{vwap, ValueAreaCalculator};
pub use vix_guard::VixRegimeGuard;
