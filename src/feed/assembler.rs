//! # feed::assembler
//!
//! Builds one [`MarketSnapshot`] from the collaborator traits.
//!
//! ## Pipeline
//!
//! ```text
//! as_of ─▶ session open (exchange tz) ─▶ fetch fine + coarse candles
//!                                              │
//!                          drop candles still forming at as_of
//!                                              │
//!                 VWAP ─▶ AVRZ(VWAP, ATR, VIX)  +  swing structure
//!                                              │
//!   VIX last price + prior-week OHLC ─▶ VixRegimeGuard
//!   expiry string ─▶ NaiveDate ─▶ ATM option chain
//!                                              │
//!                                   MarketSnapshot::validate
//! ```
//!
//! Collaborator output that fails boundary validation is logged and
//! replaced by an empty series; the strategy then fails closed on it.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::engine::{vwap, MarketStructureAnalyzer, ValueAreaCalculator, VixRegimeGuard};
use crate::error::EngineError;
use crate::feed::{CandleHistory, OptionChainSource, TradingCalendar, VixSource};
use crate::models::{CandleSeries, MarketSnapshot, Timeframe, TimeframeView};

/// Expiry encodings seen from brokers, tried in order.
const EXPIRY_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%d%b%Y"];

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRequest {
    pub symbol:     String,
    pub segment:    String,
    /// Unparsed; see [`parse_expiry`].
    pub expiry:     String,
    pub as_of:      DateTime<Utc>,
    pub atr_fine:   Option<f64>,
    pub atr_coarse: Option<f64>,
}

pub struct SnapshotAssembler<'a> {
    config:     &'a EngineConfig,
    history:    &'a dyn CandleHistory,
    vix:        &'a dyn VixSource,
    chain:      &'a dyn OptionChainSource,
    calculator: ValueAreaCalculator,
    analyzer:   MarketStructureAnalyzer,
    guard:      VixRegimeGuard,
}

impl<'a> SnapshotAssembler<'a> {
    pub fn new(
        config:   &'a EngineConfig,
        calendar: Arc<dyn TradingCalendar>,
        history:  &'a dyn CandleHistory,
        vix:      &'a dyn VixSource,
        chain:    &'a dyn OptionChainSource,
    ) -> Self {
        Self {
            config,
            history,
            vix,
            chain,
            calculator: ValueAreaCalculator::new(config.value_area.clone()),
            analyzer:   MarketStructureAnalyzer::new(config.swing_lookback),
            guard:      VixRegimeGuard::new(config, calendar),
        }
    }

    pub fn assemble(&self, req: &SnapshotRequest) -> Result<MarketSnapshot, EngineError> {
        let session_open = self.session_open(req.as_of)?;

        let vix_series = self.vix.ohlc(self.guard.history_start(req.as_of), req.as_of);
        let vix = self.guard.snapshot(self.vix.last_price(), &vix_series, req.as_of);

        let fine = self.view(req, self.config.fine_timeframe, session_open, req.atr_fine, vix.price);
        let coarse = self.view(req, self.config.coarse_timeframe, session_open, req.atr_coarse, vix.price);

        let expiry = parse_expiry(&req.expiry);
        if expiry.is_none() {
            warn!(symbol = %req.symbol, raw = %req.expiry, "⚠️ Unparseable expiry");
        }
        let option_chain = expiry.and_then(|e| self.chain.atm_chain(&req.symbol, e));

        let snapshot = MarketSnapshot {
            symbol: req.symbol.clone(),
            expiry,
            timestamp: req.as_of,
            fine,
            coarse,
            vix,
            option_chain,
        };
        snapshot.validate()?;

        debug!(
            symbol = %snapshot.symbol,
            fine_candles = snapshot.fine.candles.len(),
            coarse_candles = snapshot.coarse.candles.len(),
            has_chain = snapshot.option_chain.is_some(),
            "📦 Snapshot assembled"
        );
        Ok(snapshot)
    }

    fn session_open(&self, as_of: DateTime<Utc>) -> Result<DateTime<Utc>, EngineError> {
        let tz = self.config.timezone;
        let date = as_of.with_timezone(&tz).date_naive();
        tz.from_local_datetime(&date.and_time(self.config.session_open))
            .single()
            .map(|open| open.with_timezone(&Utc))
            .ok_or_else(|| {
                EngineError::InvalidInput(format!("ambiguous session open on {date} in {tz}"))
            })
    }

    fn view(
        &self,
        req:       &SnapshotRequest,
        timeframe: Timeframe,
        from:      DateTime<Utc>,
        atr:       Option<f64>,
        vix_price: Option<f64>,
    ) -> TimeframeView {
        let raw = self.history.fetch(&req.symbol, &req.segment, timeframe, from, req.as_of);
        let candles = match CandleSeries::new(raw) {
            Ok(series) => series.closed_by(timeframe, req.as_of),
            Err(e) => {
                warn!(symbol = %req.symbol, timeframe = %timeframe, error = %e, "⚠️ Discarding candle series");
                CandleSeries::empty()
            }
        };

        let vwap = vwap(candles.as_slice());
        let value_area = self.calculator.compute(vwap, atr, vix_price);
        let structure = self.analyzer.analyze(&candles, timeframe);

        TimeframeView { timeframe, candles, vwap, value_area, structure }
    }
}

/// `None` when no known format matches.
pub fn parse_expiry(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    EXPIRY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
