//! # models::numeric
//!
//! Nil-safe numeric coercion for upstream market data.
//!
//! Broker payloads are not consistent about how they encode prices: the same
//! field can arrive as `130.5`, `"130.5"`, `""`, `"NaN"` or be missing
//! entirely.  [`RawNumber`] accepts all of them at deserialisation time and
//! only decides what is usable when [`RawNumber::as_f64`] is called.

use serde::{Deserialize, Serialize};

/// A numeric field exactly as the upstream collaborator sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Returns the value if it is a finite float, otherwise `None`.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(s)   => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Like [`RawNumber::as_f64`] but also rejects zero and negatives.
    /// Used for prices, where `0` means "no trade printed yet".
    pub fn as_positive(&self) -> Option<f64> {
        self.as_f64().filter(|v| *v > 0.0)
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

/// Price-scale rounding to 2 decimal places.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ─── Tests ────────────────────────────────────────────────────────────────────
