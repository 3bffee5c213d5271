//! # Expiry Edge: expiry-day options decision engine
//!
//! Evaluates one [`MarketSnapshot`](models::MarketSnapshot) of an index
//! underlying on its weekly expiry and emits exactly one
//! [`Decision`](models::Decision): BUY an ATM CE/PE, WAIT, or NO_TRADE.
//!
//! ```text
//!  feed::* (collaborators) ──▶ SnapshotAssembler ──▶ MarketSnapshot
//!                                                          │
//!                                            EdgeGateStrategy::evaluate
//!                                                          │
//!                                     Decision ──▶ render ──▶ notify
//! ```
//!
//! Everything under [`engine`] is synchronous and side-effect free.  The
//! binary owns the clock, the files and the network.

pub mod config;
pub mod engine;
pub mod error;
pub mod feed;
pub mod models;
pub mod notify;
