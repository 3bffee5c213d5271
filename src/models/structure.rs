//! # models::structure
//!
//! Swing points and the market-structure verdict derived from them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::candle::Timeframe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwingKind {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwingPoint {
    pub price:     f64,
    pub timestamp: DateTime<Utc>,
    pub kind:      SwingKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketStructure {
    Bullish,
    Bearish,
    Range,
    /// At least one swing point is missing.
    Unknown,
}

impl fmt::Display for MarketStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MarketStructure::Bullish => "BULLISH",
            MarketStructure::Bearish => "BEARISH",
            MarketStructure::Range   => "RANGE",
            MarketStructure::Unknown => "UNKNOWN",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BosDirection {
    Bullish,
    Bearish,
}

/// Last close beyond the most recent swing extreme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakOfStructure {
    pub direction: BosDirection,
    pub level:     f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureResult {
    pub timeframe:               Timeframe,
    pub market_structure:        MarketStructure,
    pub last_swing_high:         Option<SwingPoint>,
    pub last_swing_low:          Option<SwingPoint>,
    pub last_break_of_structure: Option<BreakOfStructure>,
}
