//! # models::vix
//!
//! Defines [`VixSnapshot`]: the volatility-index reading the regime gate
//! consults.  Any component can be missing; a missing component never
//! satisfies the range-regime predicate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VixSnapshot {
    /// Latest VIX print.
    pub price: Option<f64>,
    /// Points per candle over the recent intraday window.
    pub slope: Option<f64>,
    /// Prior trading day's high.
    pub pdh:   Option<f64>,
    /// Lowest low over the prior calendar week.
    pub pwl:   Option<f64>,
}

impl VixSnapshot {
    /// Quiet, range-bound VIX: `|slope| < max_slope` and `pwl <= price <= pdh`.
    ///
    /// Fails closed: any missing component returns `false`.
    pub fn is_range_regime(&self, max_slope: f64) -> bool {
        match (self.price, self.slope, self.pdh, self.pwl) {
            (Some(price), Some(slope), Some(pdh), Some(pwl)) => {
                slope.abs() < max_slope && price >= pwl && price <= pdh
            }
            _ => false,
        }
    }

    /// Both reference levels are present and strictly positive.
    pub fn has_reference_levels(&self) -> bool {
        matches!((self.pdh, self.pwl), (Some(pdh), Some(pwl)) if pdh > 0.0 && pwl > 0.0)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> VixSnapshot {
        VixSnapshot { price: Some(12.4), slope: Some(0.01), pdh: Some(13.1), pwl: Some(11.8) }
    }

    #[test]
    fn test_quiet_vix_is_range() {
        assert!(quiet().is_range_regime(0.02));
        assert!(quiet().has_reference_levels());
    }

    #[test]
    fn test_steep_slope_is_not_range() {
        let vix = VixSnapshot { slope: Some(-0.05), ..quiet() };
        assert!(!vix.is_range_regime(0.02));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let at_pdh = VixSnapshot { price: Some(13.1), ..quiet() };
        let at_pwl = VixSnapshot { price: Some(11.8), ..quiet() };
        assert!(at_pdh.is_range_regime(0.02));
        assert!(at_pwl.is_range_regime(0.02));
    }

    #[test]
    fn test_missing_levels_fail_closed() {
        let no_pdh = VixSnapshot { pdh: None, ..quiet() };
        let no_slope = VixSnapshot { slope: None, ..quiet() };
        assert!(!no_pdh.is_range_regime(0.02));
        assert!(!no_pdh.has_reference_levels());
        assert!(!no_slope.is_range_regime(0.02));
        assert!(!VixSnapshot::default().is_range_regime(0.02));
    }

    #[test]
    fn test_zero_or_negative_levels_are_not_reference_levels() {
        let zero_pwl = VixSnapshot { pwl: Some(0.0), ..quiet() };
        let negative_pdh = VixSnapshot { pdh: Some(-13.1), ..quiet() };
        assert!(zero_pwl.is_range_regime(0.02));
        assert!(!zero_pwl.has_reference_levels());
        assert!(!negative_pdh.has_reference_levels());
    }
}
