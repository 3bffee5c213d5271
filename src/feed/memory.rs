//! # feed::memory
//!
//! [`FeedFile`]: one underlying's collaborator data serialised as JSON.
//!
//! ```json
//! {
//!   "symbol": "NIFTY",
//!   "segment": "IDX_I",
//!   "expiry": "2026-10-16",
//!   "as_of": "2026-10-16T05:00:00Z",
//!   "atr": { "5m": 22.5, "15m": "70" },
//!   "candles": { "5m": [ { "timestamp": "...", "open": 1, ... } ], "15m": [] },
//!   "vix": { "ltp": 12.4, "candles": [] },
//!   "option_chain": { "atm_strike": 24300, "ce": { "top_ask_price": 130 }, "pe": null },
//!   "holidays": ["2026-11-09"]
//! }
//! ```
//!
//! The broker integration that produces these files lives outside this
//! crate.  Once loaded, the file answers the collaborator traits in memory.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::EngineError;
use crate::feed::{CandleHistory, OptionChainSource, SnapshotRequest, VixSource};
use crate::models::{Candle, OptionChain, RawNumber, Timeframe};

fn default_segment() -> String {
    "IDX_I".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VixFeed {
    #[serde(default)]
    pub ltp:     Option<RawNumber>,
    #[serde(default)]
    pub candles: Vec<Candle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedFile {
    pub symbol:       String,
    #[serde(default = "default_segment")]
    pub segment:      String,
    /// Raw expiry string exactly as the broker reported it.
    pub expiry:       String,
    /// Evaluation instant; the runner substitutes "now" when absent.
    #[serde(default)]
    pub as_of:        Option<DateTime<Utc>>,
    /// ATR in points, keyed by timeframe label.
    #[serde(default)]
    pub atr:          BTreeMap<String, RawNumber>,
    /// Candles keyed by timeframe label.
    #[serde(default)]
    pub candles:      BTreeMap<String, Vec<Candle>>,
    #[serde(default)]
    pub vix:          VixFeed,
    #[serde(default)]
    pub option_chain: Option<OptionChain>,
    #[serde(default)]
    pub holidays:     Vec<NaiveDate>,
}

impl FeedFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        let feed: FeedFile = serde_json::from_str(raw)?;
        feed.validate()?;
        Ok(feed)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.symbol.trim().is_empty() {
            return Err(EngineError::InvalidInput("feed symbol is empty".into()));
        }
        for label in self.candles.keys().chain(self.atr.keys()) {
            label.parse::<Timeframe>().map_err(|_| {
                EngineError::InvalidInput(format!("unknown timeframe key {label:?} in feed"))
            })?;
        }
        Ok(())
    }

    pub fn atr(&self, timeframe: Timeframe) -> Option<f64> {
        self.atr.get(timeframe.label()).and_then(RawNumber::as_f64)
    }

    /// The request this file describes, evaluated at `as_of` or `fallback`.
    pub fn request(&self, fine: Timeframe, coarse: Timeframe, fallback: DateTime<Utc>) -> SnapshotRequest {
        SnapshotRequest {
            symbol:     self.symbol.clone(),
            segment:    self.segment.clone(),
            expiry:     self.expiry.clone(),
            as_of:      self.as_of.unwrap_or(fallback),
            atr_fine:   self.atr(fine),
            atr_coarse: self.atr(coarse),
        }
    }

    fn matches(&self, symbol: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(symbol)
    }
}

/// Sorted, deduplicated candles whose start lies in `[from, to]`.
fn window(candles: &[Candle], from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<Candle> {
    let mut out: Vec<Candle> = candles
        .iter()
        .filter(|c| c.timestamp >= from && c.timestamp <= to)
        .copied()
        .collect();
    out.sort_by_key(|c| c.timestamp);
    out.dedup_by_key(|c| c.timestamp);
    out
}

impl CandleHistory for FeedFile {
    fn fetch(
        &self,
        symbol:   &str,
        segment:  &str,
        interval: Timeframe,
        from:     DateTime<Utc>,
        to:       DateTime<Utc>,
    ) -> Vec<Candle> {
        if !self.matches(symbol) || self.segment != segment {
            warn!(symbol, segment, feed = %self.symbol, "⚠️ Candle request for a different instrument");
            return Vec::new();
        }
        match self.candles.get(interval.label()) {
            Some(candles) => window(candles, from, to),
            None => {
                warn!(symbol, interval = %interval, "⚠️ No candles for interval in feed");
                Vec::new()
            }
        }
    }
}

impl VixSource for FeedFile {
    fn last_price(&self) -> Option<f64> {
        self.vix.ltp.as_ref().and_then(RawNumber::as_positive)
    }

    fn ohlc(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<Candle> {
        window(&self.vix.candles, from, to)
    }
}

impl OptionChainSource for FeedFile {
    fn atm_chain(&self, symbol: &str, _expiry: NaiveDate) -> Option<OptionChain> {
        if !self.matches(symbol) {
            return None;
        }
        self.option_chain.clone()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
