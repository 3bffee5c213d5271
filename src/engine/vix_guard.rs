//! # engine::vix_guard
//!
//! **VIX Regime Guard**: decides whether volatility is quiet enough for
//! range-edge trades.
//!
//! ```text
//! price  latest VIX print (falls back to the last closed intraday candle)
//! slope  least-squares slope of the last N closed intraday candles, points/candle
//! pdh    high of the previous trading session
//! pwl    lowest low over the 7 calendar days before today (sessions only)
//!
//! range regime ⇔ |slope| < max_slope  AND  pwl <= price <= pdh
//! ```
//!
//! Any component that cannot be computed stays `None`, and a `None` never
//! passes the regime predicate.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::config::EngineConfig;
use crate::feed::TradingCalendar;
use crate::models::{Candle, Timeframe, VixSnapshot};

/// Calendar days that make up the "prior week".
const PRIOR_WEEK_DAYS: i64 = 7;

#[derive(Clone)]
pub struct VixRegimeGuard {
    timezone:     Tz,
    /// VIX candles share the execution timeframe.
    interval:     Timeframe,
    slope_window: usize,
    max_slope:    f64,
    calendar:     Arc<dyn TradingCalendar>,
}

impl VixRegimeGuard {
    pub fn new(config: &EngineConfig, calendar: Arc<dyn TradingCalendar>) -> Self {
        Self {
            timezone:     config.timezone,
            interval:     config.fine_timeframe,
            slope_window: config.vix_slope_window.max(2),
            max_slope:    config.vix_max_slope,
            calendar,
        }
    }

    /// Earliest candle start [`snapshot`](Self::snapshot) can use: local
    /// midnight opening the prior-week window of the session `as_of` maps to.
    pub fn history_start(&self, as_of: DateTime<Utc>) -> DateTime<Utc> {
        let (today, _) = self.session_dates(as_of);
        let week_start = today - Duration::days(PRIOR_WEEK_DAYS);
        self.timezone
            .from_local_datetime(&week_start.and_time(NaiveTime::MIN))
            .earliest()
            .map(|start| start.with_timezone(&Utc))
            .unwrap_or(as_of - Duration::days(PRIOR_WEEK_DAYS + 1))
    }

    /// Builds the snapshot from the latest print and a multi-day candle series.
    pub fn snapshot(
        &self,
        price:  Option<f64>,
        series: &[Candle],
        as_of:  DateTime<Utc>,
    ) -> VixSnapshot {
        let (today, prior_session) = self.session_dates(as_of);
        let week_start = today - Duration::days(PRIOR_WEEK_DAYS);

        let intraday: Vec<&Candle> = series
            .iter()
            .filter(|c| c.is_closed(self.interval, as_of) && self.local_date(c) == today)
            .collect();

        let price = price
            .filter(|p| p.is_finite() && *p > 0.0)
            .or_else(|| intraday.last().map(|c| c.close));

        let closes: Vec<f64> = intraday
            .iter()
            .rev()
            .take(self.slope_window)
            .rev()
            .map(|c| c.close)
            .collect();
        let slope = linear_slope(&closes);

        let pdh = series
            .iter()
            .filter(|c| self.local_date(c) == prior_session)
            .map(|c| c.high)
            .reduce(f64::max);

        let pwl = series
            .iter()
            .filter(|c| {
                let date = self.local_date(c);
                date >= week_start && date < today && self.calendar.is_trading_day(date)
            })
            .map(|c| c.low)
            .reduce(f64::min);

        let snapshot = VixSnapshot { price, slope, pdh, pwl };

        debug!(
            today = %today,
            prior_session = %prior_session,
            price = ?snapshot.price,
            slope = ?snapshot.slope,
            pdh = ?snapshot.pdh,
            pwl = ?snapshot.pwl,
            "VIX snapshot"
        );

        snapshot
    }

    pub fn is_range_regime(&self, snapshot: &VixSnapshot) -> bool {
        snapshot.is_range_regime(self.max_slope)
    }

    /// `(session as_of maps to, the session before it)`.
    fn session_dates(&self, as_of: DateTime<Utc>) -> (NaiveDate, NaiveDate) {
        let local_today = as_of.with_timezone(&self.timezone).date_naive();
        let today = self.calendar.today_or_last_trading_day(local_today);
        (today, self.calendar.last_trading_day(today))
    }

    fn local_date(&self, candle: &Candle) -> NaiveDate {
        candle.timestamp.with_timezone(&self.timezone).date_naive()
    }
}

/// Ordinary least-squares slope against the candle index.
pub fn linear_slope(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n_f;

    let (num, den) = values.iter().enumerate().fold((0.0, 0.0), |(num, den), (i, y)| {
        let dx = i as f64 - mean_x;
        (num + dx * (y - mean_y), den + dx * dx)
    });

    let slope = num / den;
    slope.is_finite().then_some(slope)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::WeekdayCalendar;
    use chrono::TimeZone;

    /// IST 09:15 on the given October 2026 day is 03:45 UTC.
    fn candle(day: u32, minute_offset: i64, high: f64, low: f64, close: f64) -> Candle {
        let open = Utc.with_ymd_and_hms(2026, 10, day, 3, 45, 0).unwrap();
        Candle {
            timestamp: open + Duration::minutes(minute_offset),
            open: close,
            high,
            low,
            close,
            volume: 0.0,
        }
    }

    fn guard() -> VixRegimeGuard {
        VixRegimeGuard::new(&EngineConfig::default(), Arc::new(WeekdayCalendar::default()))
    }

    fn as_of() -> DateTime<Utc> {
        // Friday 2026-10-16 10:30 IST
        Utc.with_ymd_and_hms(2026, 10, 16, 5, 0, 0).unwrap()
    }

    #[test]
    fn test_linear_slope() {
        assert_eq!(linear_slope(&[1.0, 2.0, 3.0, 4.0]), Some(1.0));
        assert_eq!(linear_slope(&[5.0, 5.0, 5.0]), Some(0.0));
        assert_eq!(linear_slope(&[5.0]), None);
    }

    #[test]
    fn test_prior_day_high_and_week_low() {
        let series = vec![
            candle(9, 0, 14.0, 11.2, 12.0),   // Fri prior week (inside 7-day window)
            candle(14, 0, 13.5, 12.1, 12.5),  // Wed
            candle(15, 0, 13.1, 12.0, 12.6),  // Thu = prior session
            candle(15, 60, 12.9, 11.9, 12.2),
            candle(16, 0, 12.45, 12.35, 12.4),
            candle(16, 5, 12.45, 12.35, 12.4),
        ];
        let snap = guard().snapshot(Some(12.4), &series, as_of());
        assert_eq!(snap.pdh, Some(13.1));
        assert_eq!(snap.pwl, Some(11.2));
        assert_eq!(snap.slope, Some(0.0));
        assert!(guard().is_range_regime(&snap));
    }

    #[test]
    fn test_no_history_fails_closed() {
        let series = vec![candle(16, 0, 12.5, 12.3, 12.4), candle(16, 5, 12.5, 12.3, 12.4)];
        let snap = guard().snapshot(Some(12.4), &series, as_of());
        assert!(snap.pdh.is_none());
        assert!(snap.pwl.is_none());
        assert!(!guard().is_range_regime(&snap));
    }

    #[test]
    fn test_price_falls_back_to_last_close() {
        let series = vec![candle(16, 0, 12.5, 12.3, 12.4), candle(16, 5, 12.7, 12.4, 12.6)];
        let snap = guard().snapshot(None, &series, as_of());
        assert_eq!(snap.price, Some(12.6));
    }

    #[test]
    fn test_rising_vix_has_steep_slope() {
        let series = vec![
            candle(15, 0, 13.1, 12.0, 12.6),
            candle(16, 0, 12.6, 12.3, 12.4),
            candle(16, 5, 12.6, 12.3, 12.5),
            candle(16, 10, 12.7, 12.4, 12.6),
        ];
        let snap = guard().snapshot(Some(12.6), &series, as_of());
        let slope = snap.slope.unwrap();
        assert!((slope - 0.1).abs() < 1e-9);
        assert!(!guard().is_range_regime(&snap));
    }

    #[test]
    fn test_forming_candle_is_ignored() {
        let series = vec![
            candle(16, 65, 12.45, 12.35, 12.4), // 04:50 UTC, closed at 04:55
            candle(16, 72, 13.0, 12.4, 12.9),   // 04:57 UTC, still forming at 05:00
        ];
        let snap = guard().snapshot(None, &series, as_of());
        assert_eq!(snap.price, Some(12.4));
        assert!(snap.slope.is_none());
    }

    #[test]
    fn test_history_start_covers_prior_week_from_weekend() {
        // Sunday 2026-10-18 maps to Friday 16th; window opens Friday 9th 00:00 IST.
        let sunday = Utc.with_ymd_and_hms(2026, 10, 18, 5, 0, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2026, 10, 8, 18, 30, 0).unwrap();
        assert_eq!(guard().history_start(sunday), expected);
        assert_eq!(guard().history_start(as_of()), expected);
    }

    #[test]
    fn test_future_candles_ignored() {
        let series = vec![
            candle(16, 0, 12.5, 12.3, 12.4),
            candle(16, 5, 12.5, 12.3, 12.4),
            candle(16, 300, 20.0, 12.3, 19.0), // after as_of
        ];
        let snap = guard().snapshot(None, &series, as_of());
        assert_eq!(snap.price, Some(12.4));
        assert_eq!(snap.slope, Some(0.0));
    }
}
