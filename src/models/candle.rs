//! # models::candle
//!
//! OHLCV candles and the ordered series the analyzers read.
//!
//! A [`CandleSeries`] is validated once at construction (strictly increasing
//! timestamps) and is read-only afterwards, so every analyzer can index into
//! it without re-checking order.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

// ─── Timeframe ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    M1,
    #[serde(rename = "3m")]
    M3,
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "30m")]
    M30,
    #[serde(rename = "1h")]
    H1,
}

impl Timeframe {
    pub fn minutes(self) -> i64 {
        match self {
            Timeframe::M1  => 1,
            Timeframe::M3  => 3,
            Timeframe::M5  => 5,
            Timeframe::M15 => 15,
            Timeframe::M30 => 30,
            Timeframe::H1  => 60,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::minutes(self.minutes())
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::M1  => "1m",
            Timeframe::M3  => "3m",
            Timeframe::M5  => "5m",
            Timeframe::M15 => "15m",
            Timeframe::M30 => "30m",
            Timeframe::H1  => "1h",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1m" | "1"   => Ok(Timeframe::M1),
            "3m" | "3"   => Ok(Timeframe::M3),
            "5m" | "5"   => Ok(Timeframe::M5),
            "15m" | "15" => Ok(Timeframe::M15),
            "30m" | "30" => Ok(Timeframe::M30),
            "1h" | "60"  => Ok(Timeframe::H1),
            other => Err(EngineError::Config(format!("unknown timeframe '{other}'"))),
        }
    }
}

// ─── Candle ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Start of the candle's interval.
    pub timestamp: DateTime<Utc>,
    pub open:      f64,
    pub high:      f64,
    pub low:       f64,
    pub close:     f64,
    /// Index instruments report no volume; `0.0` is normal.
    #[serde(default)]
    pub volume:    f64,
}

impl Candle {
    /// `(high + low + close) / 3`
    #[inline]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// True once the whole interval lies at or before `as_of`.
    #[inline]
    pub fn is_closed(&self, timeframe: Timeframe, as_of: DateTime<Utc>) -> bool {
        self.timestamp + timeframe.duration() <= as_of
    }

    /// Wick swept below `level` but the candle closed back above it.
    #[inline]
    pub fn rejected_below(&self, level: f64) -> bool {
        self.low < level && self.close > level
    }

    /// Wick swept above `level` but the candle closed back below it.
    #[inline]
    pub fn rejected_above(&self, level: f64) -> bool {
        self.high > level && self.close < level
    }

    fn is_well_formed(&self) -> bool {
        [self.open, self.high, self.low, self.close, self.volume]
            .iter()
            .all(|v| v.is_finite())
            && self.high >= self.low
    }
}

// ─── CandleSeries ─────────────────────────────────────────────────────────────

/// Chronological candles for one symbol and interval.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Validates ordering and OHLC sanity.
    pub fn new(candles: Vec<Candle>) -> Result<Self, EngineError> {
        if let Some(bad) = candles.iter().find(|c| !c.is_well_formed()) {
            return Err(EngineError::InvalidInput(format!(
                "malformed candle at {}", bad.timestamp
            )));
        }
        if let Some(pair) = candles.windows(2).find(|w| w[1].timestamp <= w[0].timestamp) {
            return Err(EngineError::InvalidInput(format!(
                "candles out of order or duplicated at {}", pair[1].timestamp
            )));
        }
        Ok(Self { candles })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// The last `n` candles, or `None` if fewer than `n` exist.
    pub fn tail(&self, n: usize) -> Option<&[Candle]> {
        let len = self.candles.len();
        (n > 0 && len >= n).then(|| &self.candles[len - n..])
    }

    /// Drops candles whose interval has not finished by `as_of`.
    pub fn closed_by(self, timeframe: Timeframe, as_of: DateTime<Utc>) -> Self {
        let candles = self
            .candles
            .into_iter()
            .filter(|c| c.is_closed(timeframe, as_of))
            .collect();
        Self { candles }
    }
}

impl<'de> Deserialize<'de> for CandleSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let candles = Vec::<Candle>::deserialize(deserializer)?;
        CandleSeries::new(candles).map_err(serde::de::Error::custom)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
