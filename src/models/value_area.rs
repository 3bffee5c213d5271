//! # models::value_area
//!
//! Defines [`ValueArea`]: the Adaptive Volatility Range Zone (AVRZ) band
//! around a session mid price.  Recomputed on every cycle, never mutated.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── VolRegime ────────────────────────────────────────────────────────────────

/// VIX bucket that chose the band's width multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolRegime {
    Low,
    Normal,
    High,
    /// No VIX reading was available.
    Unknown,
}

impl fmt::Display for VolRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VolRegime::Low     => "LOW",
            VolRegime::Normal  => "NORMAL",
            VolRegime::High    => "HIGH",
            VolRegime::Unknown => "UNKNOWN",
        })
    }
}

// ─── ValueArea ────────────────────────────────────────────────────────────────

/// `low = mid - width_points`, `high = mid + width_points`, so
/// `low <= mid <= high` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueArea {
    pub mid:          f64,
    pub low:          f64,
    pub high:         f64,
    pub width_points: f64,
    pub regime:       VolRegime,
}

impl ValueArea {
    /// Returns `true` if `price` falls inside `[low, high]`.
    #[inline]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.low && price <= self.high
    }

    #[inline]
    pub fn is_above(&self, price: f64) -> bool {
        price > self.high
    }

    #[inline]
    pub fn is_below(&self, price: f64) -> bool {
        price < self.low
    }
}
