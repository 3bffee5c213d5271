//! # feed
//!
//! Narrow interfaces to the collaborators the decision core depends on, plus
//! the pieces that turn their output into a [`MarketSnapshot`].
//!
//! ```text
//!  CandleHistory ─┐
//!  VixSource ─────┤
//!  OptionChain ───┼──▶ SnapshotAssembler ──▶ MarketSnapshot ──▶ EdgeGateStrategy
//!  TradingCalendar┘
//! ```
//!
//! All I/O (broker REST, rate limiting, retries) happens behind these traits
//! before the core is called.  None of them can fail across the boundary:
//! a provider that cannot answer returns an empty result.
//!
//! [`MarketSnapshot`]: crate::models::MarketSnapshot

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::{Candle, OptionChain, Timeframe};

pub mod assembler;
pub mod calendar;
pub mod memory;

pub use assembler::{SnapshotAssembler, SnapshotRequest};
pub use calendar::WeekdayCalendar;
pub use memory::FeedFile;

/// How far the calendar walks back before giving up.
const MAX_CALENDAR_WALK_DAYS: i64 = 31;

// ─── TradingCalendar ──────────────────────────────────────────────────────────

/// Dates are always passed in explicitly; the calendar never looks at the
/// wall clock.
pub trait TradingCalendar: Send + Sync {
    fn is_trading_day(&self, date: NaiveDate) -> bool;

    /// `today` if it is a session, otherwise the most recent one before it.
    fn today_or_last_trading_day(&self, today: NaiveDate) -> NaiveDate {
        if self.is_trading_day(today) {
            today
        } else {
            self.last_trading_day(today)
        }
    }

    /// Most recent session strictly before `before`.
    fn last_trading_day(&self, before: NaiveDate) -> NaiveDate {
        (1..=MAX_CALENDAR_WALK_DAYS)
            .map(|back| before - Duration::days(back))
            .find(|d| self.is_trading_day(*d))
            .unwrap_or(before - Duration::days(1))
    }
}

// ─── Market data collaborators ────────────────────────────────────────────────

/// Historical / intraday candles.  Results are deduplicated and sorted; a
/// provider failure yields an empty vector.
pub trait CandleHistory: Send + Sync {
    fn fetch(
        &self,
        symbol:   &str,
        segment:  &str,
        interval: Timeframe,
        from:     DateTime<Utc>,
        to:       DateTime<Utc>,
    ) -> Vec<Candle>;
}

/// The volatility index the regime gate watches.
pub trait VixSource: Send + Sync {
    fn last_price(&self) -> Option<f64>;

    /// OHLC candles with start time in `[from, to]`.
    fn ohlc(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<Candle>;
}

/// ATM slice of the option chain for one expiry.
pub trait OptionChainSource: Send + Sync {
    fn atm_chain(&self, symbol: &str, expiry: NaiveDate) -> Option<OptionChain>;
}
