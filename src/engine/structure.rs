//! # engine::structure
//!
//! **Market Structure Analyzer**: swing points and break of structure.
//!
//! ## Swing rule (strict, symmetric)
//! ```text
//! swing high at i:  high[i] > max(high[i-L .. i-1])  AND  high[i] > max(high[i+1 .. i+L])
//! swing low  at i:  low[i]  < min(low[i-L .. i-1])   AND  low[i]  < min(low[i+1 .. i+L])
//! ```
//! Only indices with a full `L` candles on both sides are scanned, so fewer
//! than `2L + 1` candles yields no swing points at all.  The latest swing of
//! each kind wins.
//!
//! ## Verdict
//! ```text
//! last close > last swing high  → BULLISH (+ bullish BOS at that level)
//! last close < last swing low   → BEARISH (+ bearish BOS at that level)
//! otherwise                     → RANGE
//! either swing missing          → UNKNOWN
//! ```

use tracing::debug;

use crate::models::{
    BosDirection, BreakOfStructure, Candle, CandleSeries, MarketStructure, StructureResult,
    SwingKind, SwingPoint, Timeframe,
};

/// Candles each side of a swing point when nothing else is configured.
pub const DEFAULT_LOOKBACK: usize = 2;

#[derive(Debug, Clone, Copy)]
pub struct MarketStructureAnalyzer {
    lookback: usize,
}

impl Default for MarketStructureAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKBACK)
    }
}

impl MarketStructureAnalyzer {
    pub fn new(lookback: usize) -> Self {
        Self { lookback: lookback.max(1) }
    }

    /// `None` only for an empty series.
    pub fn analyze(&self, series: &CandleSeries, timeframe: Timeframe) -> Option<StructureResult> {
        let candles = series.as_slice();
        let last = candles.last()?;

        let (swing_high, swing_low) = self.latest_swings(candles);

        let (market_structure, bos) = match (swing_high, swing_low) {
            (Some(high), Some(low)) => {
                if last.close > high.price {
                    (MarketStructure::Bullish, Some(BreakOfStructure {
                        direction: BosDirection::Bullish,
                        level:     high.price,
                        timestamp: last.timestamp,
                    }))
                } else if last.close < low.price {
                    (MarketStructure::Bearish, Some(BreakOfStructure {
                        direction: BosDirection::Bearish,
                        level:     low.price,
                        timestamp: last.timestamp,
                    }))
                } else {
                    (MarketStructure::Range, None)
                }
            }
            _ => (MarketStructure::Unknown, None),
        };

        debug!(
            timeframe = %timeframe,
            candles = candles.len(),
            structure = %market_structure,
            swing_high = ?swing_high.map(|s| s.price),
            swing_low = ?swing_low.map(|s| s.price),
            "Structure analysed"
        );

        Some(StructureResult {
            timeframe,
            market_structure,
            last_swing_high: swing_high,
            last_swing_low: swing_low,
            last_break_of_structure: bos,
        })
    }

    /// Most recent swing high and swing low by scan order.
    fn latest_swings(&self, candles: &[Candle]) -> (Option<SwingPoint>, Option<SwingPoint>) {
        let l = self.lookback;
        if candles.len() < 2 * l + 1 {
            return (None, None);
        }

        let mut swing_high = None;
        let mut swing_low = None;

        for i in l..candles.len() - l {
            let before = &candles[i - l..i];
            let after = &candles[i + 1..=i + l];
            let c = &candles[i];

            let max_before = before.iter().map(|b| b.high).fold(f64::MIN, f64::max);
            let max_after = after.iter().map(|b| b.high).fold(f64::MIN, f64::max);
            if c.high > max_before && c.high > max_after {
                swing_high = Some(SwingPoint {
                    price:     c.high,
                    timestamp: c.timestamp,
                    kind:      SwingKind::High,
                });
            }

            let min_before = before.iter().map(|b| b.low).fold(f64::MAX, f64::min);
            let min_after = after.iter().map(|b| b.low).fold(f64::MAX, f64::min);
            if c.low < min_before && c.low < min_after {
                swing_low = Some(SwingPoint {
                    price:     c.low,
                    timestamp: c.timestamp,
                    kind:      SwingKind::Low,
                });
            }
        }

        (swing_high, swing_low)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
