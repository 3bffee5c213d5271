//! # models::snapshot
//!
//! Defines [`MarketSnapshot`]: everything one evaluation cycle knows about
//! one symbol, frozen at a single timestamp.
//!
//! Built fresh every cycle by the feed assembler and owned by that cycle
//! alone.  The strategy reads it by reference and never writes back, which is
//! what makes `evaluate(snapshot)` idempotent.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{
    candle::{CandleSeries, Timeframe},
    option_chain::OptionChain,
    structure::StructureResult,
    value_area::ValueArea,
    vix::VixSnapshot,
};

// ─── TimeframeView ────────────────────────────────────────────────────────────

/// Closed candles of one interval plus the analytics derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeView {
    pub timeframe:  Timeframe,
    pub candles:    CandleSeries,
    pub vwap:       Option<f64>,
    pub value_area: Option<ValueArea>,
    pub structure:  Option<StructureResult>,
}

impl TimeframeView {
    pub fn empty(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            candles:    CandleSeries::empty(),
            vwap:       None,
            value_area: None,
            structure:  None,
        }
    }

    pub fn last_close(&self) -> Option<f64> {
        self.candles.last().map(|c| c.close)
    }
}

// ─── MarketSnapshot ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Underlying, e.g. `"NIFTY"`.
    pub symbol:       String,
    /// Contract expiry.  `None` when the upstream expiry string did not parse,
    /// which the strategy treats as "not expiry day".
    pub expiry:       Option<NaiveDate>,
    /// Evaluation instant.  The only notion of "now" the strategy uses.
    pub timestamp:    DateTime<Utc>,
    /// Execution timeframe (default 5m).
    pub fine:         TimeframeView,
    /// Reference timeframe for the value area (default 15m).
    pub coarse:       TimeframeView,
    pub vix:          VixSnapshot,
    pub option_chain: Option<OptionChain>,
}

impl MarketSnapshot {
    /// Record-level invariants checked once at the boundary.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.symbol.trim().is_empty() {
            return Err(EngineError::InvalidInput("snapshot symbol is empty".into()));
        }
        for view in [&self.fine, &self.coarse] {
            if let Some(va) = &view.value_area {
                if !(va.low <= va.mid && va.mid <= va.high) {
                    return Err(EngineError::InvalidInput(format!(
                        "{} value area is inverted: {} / {} / {}",
                        view.timeframe, va.low, va.mid, va.high
                    )));
                }
            }
            if let Some(last) = view.candles.last() {
                if last.timestamp > self.timestamp {
                    return Err(EngineError::InvalidInput(format!(
                        "{} candle at {} is after the snapshot time {}",
                        view.timeframe, last.timestamp, self.timestamp
                    )));
                }
            }
        }
        Ok(())
    }
}
