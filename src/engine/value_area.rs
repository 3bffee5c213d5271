//! # engine::value_area
//!
//! **Value Area Calculator**: session VWAP and the AVRZ band around it.
//!
//! ```text
//! width = ATR_points × multiplier(vix)
//!
//!   vix > 14  → 1.2  (HIGH)
//!   vix < 10  → 0.8  (LOW)
//!   otherwise → 1.0  (NORMAL, or UNKNOWN when vix is absent)
//!
//! low = mid − width      high = mid + width
//! ```
//!
//! Stateless and deterministic.  Missing `mid` or `atr` means "no value
//! area", which the strategy treats as a kill-switch condition, never as an
//! error.

use tracing::debug;

use crate::config::ValueAreaConfig;
use crate::models::{numeric::round2, Candle, ValueArea, VolRegime};

#[derive(Debug, Clone, Default)]
pub struct ValueAreaCalculator {
    config: ValueAreaConfig,
}

impl ValueAreaCalculator {
    pub fn new(config: ValueAreaConfig) -> Self {
        Self { config }
    }

    /// Builds the band, or `None` when `mid`/`atr_points` is unusable.
    pub fn compute(
        &self,
        mid:        Option<f64>,
        atr_points: Option<f64>,
        vix:        Option<f64>,
    ) -> Option<ValueArea> {
        let mid = mid.filter(|v| v.is_finite())?;
        let atr = atr_points.filter(|v| v.is_finite() && *v >= 0.0)?;
        let vix = vix.filter(|v| v.is_finite());

        let (multiplier, regime) = self.vix_multiplier(vix);
        let width = atr * multiplier;

        let area = ValueArea {
            mid:          round2(mid),
            low:          round2(mid - width),
            high:         round2(mid + width),
            width_points: round2(width),
            regime,
        };

        debug!(
            mid = area.mid,
            low = area.low,
            high = area.high,
            atr,
            multiplier,
            regime = %regime,
            "AVRZ computed"
        );

        Some(area)
    }

    /// Width multiplier and regime label for a VIX reading.
    pub fn vix_multiplier(&self, vix: Option<f64>) -> (f64, VolRegime) {
        let (multiplier, regime) = match vix {
            None                                => (1.0, VolRegime::Unknown),
            Some(v) if v > self.config.high_vix => (self.config.high_multiplier, VolRegime::High),
            Some(v) if v < self.config.low_vix  => (self.config.low_multiplier, VolRegime::Low),
            Some(_)                             => (1.0, VolRegime::Normal),
        };

        if self.config.adaptive {
            (multiplier, regime)
        } else {
            (1.0, regime)
        }
    }
}

/// Volume-weighted typical price.  Falls back to the plain mean of typical
/// prices when the series carries no volume (cash indices).
pub fn vwap(candles: &[Candle]) -> Option<f64> {
    if candles.is_empty() {
        return None;
    }

    let (sum_pv, sum_v) = candles.iter().fold((0.0_f64, 0.0_f64), |(pv, v), c| {
        let volume = c.volume.max(0.0);
        (pv + c.typical_price() * volume, v + volume)
    });

    let value = if sum_v > 0.0 {
        sum_pv / sum_v
    } else {
        candles.iter().map(Candle::typical_price).sum::<f64>() / candles.len() as f64
    };

    value.is_finite().then_some(value)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
