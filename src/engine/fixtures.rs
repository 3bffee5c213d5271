//! Shared snapshots for engine tests.
//!
//! The base scenario is Friday 2026-10-16 (a weekly expiry) at 10:30 IST:
//! AVRZ 24280–24420 on 15m, a quiet VIX, and a last 5m candle that wicks to
//! 24270 and closes back at 24310.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::config::EngineConfig;
use crate::engine::{
    strategy::EdgeGateStrategy, structure::MarketStructureAnalyzer, value_area::vwap,
    value_area::ValueAreaCalculator,
};
use crate::feed::WeekdayCalendar;
use crate::models::{
    Candle, CandleSeries, ContractQuote, MarketSnapshot, OptionChain, RawNumber, Timeframe,
    TimeframeView, VixSnapshot,
};

pub type Bar = (f64, f64, f64, f64);

pub fn session_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

/// 09:15 IST on the session date.
pub fn session_open() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 3, 45, 0).unwrap()
}

/// 10:30 IST.
pub fn evaluation_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 5, 0, 0).unwrap()
}

pub fn strategy() -> EdgeGateStrategy {
    EdgeGateStrategy::new(Arc::new(EngineConfig::default()), Arc::new(WeekdayCalendar::default()))
}

pub fn candles(timeframe: Timeframe, start: DateTime<Utc>, bars: &[Bar]) -> Vec<Candle> {
    bars.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Candle {
            timestamp: start + timeframe.duration() * i as i32,
            open,
            high,
            low,
            close,
            volume: 0.0,
        })
        .collect()
}

/// 09:15–10:25 IST.  Last swing high 24362, last swing low 24305.
pub const FINE_BARS: [Bar; 15] = [
    (24340.0, 24360.0, 24325.0, 24350.0),
    (24350.0, 24372.0, 24340.0, 24365.0),
    (24365.0, 24390.0, 24355.0, 24380.0),
    (24380.0, 24395.0, 24360.0, 24370.0),
    (24370.0, 24380.0, 24345.0, 24350.0),
    (24350.0, 24365.0, 24330.0, 24340.0),
    (24340.0, 24350.0, 24318.0, 24325.0),
    (24325.0, 24338.0, 24305.0, 24330.0),
    (24330.0, 24352.0, 24322.0, 24345.0),
    (24345.0, 24360.0, 24335.0, 24350.0),
    (24350.0, 24362.0, 24338.0, 24342.0),
    (24342.0, 24350.0, 24320.0, 24330.0),
    (24330.0, 24340.0, 24312.0, 24322.0),
    (24322.0, 24330.0, 24308.0, 24315.0),
    (24300.0, 24320.0, 24270.0, 24310.0),
];

/// 09:15–10:15 IST.
pub const COARSE_BARS: [Bar; 5] = [
    (24340.0, 24390.0, 24325.0, 24380.0),
    (24380.0, 24395.0, 24330.0, 24340.0),
    (24340.0, 24352.0, 24305.0, 24345.0),
    (24345.0, 24362.0, 24320.0, 24330.0),
    (24330.0, 24340.0, 24308.0, 24315.0),
];

pub fn view(timeframe: Timeframe, bars: &[Bar]) -> TimeframeView {
    let series = CandleSeries::new(candles(timeframe, session_open(), bars)).unwrap();
    TimeframeView {
        timeframe,
        vwap: vwap(series.as_slice()),
        value_area: None,
        structure: MarketStructureAnalyzer::default().analyze(&series, timeframe),
        candles: series,
    }
}

pub fn quiet_vix() -> VixSnapshot {
    VixSnapshot { price: Some(12.4), slope: Some(0.01), pdh: Some(13.1), pwl: Some(11.8) }
}

pub fn atm_chain(ce_ask: f64, pe_ask: f64) -> OptionChain {
    let quote = |ask: f64| ContractQuote {
        security_id:   Some("35001".into()),
        top_ask_price: Some(RawNumber::Number(ask)),
        ..Default::default()
    };
    OptionChain { atm_strike: 24300.0, ce: Some(quote(ce_ask)), pe: Some(quote(pe_ask)) }
}

/// Every gate passes and the last 5m candle is a discount rejection.
pub fn discount_snapshot() -> MarketSnapshot {
    let mut coarse = view(Timeframe::M15, &COARSE_BARS);
    // ATR 70 at VIX 12.4 → NORMAL regime, multiplier 1.0
    coarse.value_area = ValueAreaCalculator::default().compute(Some(24350.0), Some(70.0), Some(12.4));

    MarketSnapshot {
        symbol:       "NIFTY".into(),
        expiry:       Some(session_date()),
        timestamp:    evaluation_time(),
        fine:         view(Timeframe::M5, &FINE_BARS),
        coarse,
        vix:          quiet_vix(),
        option_chain: Some(atm_chain(130.0, 112.0)),
    }
}

/// Replaces the trailing fine bars and recomputes fine VWAP and structure.
pub fn with_last_bars(mut md: MarketSnapshot, last: &[Bar]) -> MarketSnapshot {
    let mut bars = FINE_BARS.to_vec();
    let keep = bars.len() - last.len();
    bars.truncate(keep);
    bars.extend_from_slice(last);
    md.fine = view(Timeframe::M5, &bars);
    md
}

/// A VIX series whose snapshot reproduces [`quiet_vix`] closely enough to
/// pass the regime gate.
pub fn quiet_vix_candles() -> Vec<Candle> {
    let thursday = session_open() - Duration::days(1);
    let monday = session_open() - Duration::days(4);
    let mut series = candles(Timeframe::M5, monday, &[(12.0, 12.6, 11.8, 12.2)]);
    series.extend(candles(Timeframe::M5, thursday, &[(12.5, 13.1, 12.3, 12.6)]));
    series.extend(candles(Timeframe::M5, session_open(), &[
        (12.40, 12.45, 12.35, 12.40),
        (12.40, 12.45, 12.35, 12.41),
        (12.41, 12.45, 12.35, 12.40),
        (12.40, 12.45, 12.35, 12.41),
        (12.41, 12.45, 12.35, 12.40),
    ]));
    series
}
