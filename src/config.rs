//! # config
//!
//! Every tunable the decision core uses lives in an explicit struct handed
//! to the components at construction time.  Nothing inside `engine::*`
//! reads the environment.
//!
//! `Default` gives the documented production values; `from_env()` overlays
//! environment variables on top of them (unparseable values keep the
//! default and log a warning).

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::EngineError;
use crate::models::Timeframe;

// ─── ValueAreaConfig ──────────────────────────────────────────────────────────

/// AVRZ width scaling: `width = ATR × multiplier(vix)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAreaConfig {
    /// false = multiplier pinned to 1.0 (the regime label is still reported).
    pub adaptive:        bool,
    /// VIX strictly above this selects `high_multiplier`.
    pub high_vix:        f64,
    /// VIX strictly below this selects `low_multiplier`.
    pub low_vix:         f64,
    pub high_multiplier: f64,
    pub low_multiplier:  f64,
}

impl Default for ValueAreaConfig {
    fn default() -> Self {
        Self {
            adaptive:        true,
            high_vix:        14.0,
            low_vix:         10.0,
            high_multiplier: 1.2,
            low_multiplier:  0.8,
        }
    }
}

impl ValueAreaConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            adaptive:        env_bool("AVRZ_ADAPTIVE", d.adaptive),
            high_vix:        env_parse("AVRZ_HIGH_VIX", d.high_vix),
            low_vix:         env_parse("AVRZ_LOW_VIX", d.low_vix),
            high_multiplier: env_parse("AVRZ_HIGH_MULT", d.high_multiplier),
            low_multiplier:  env_parse("AVRZ_LOW_MULT", d.low_multiplier),
        }
    }
}

// ─── EngineConfig ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Exchange timezone used for the trade window and calendar dates.
    pub timezone:          Tz,
    /// First candle of the session; VWAP accumulates from here.
    pub session_open:      NaiveTime,
    /// Inclusive trade window, exchange-local.
    pub window_start:      NaiveTime,
    pub window_end:        NaiveTime,
    /// Execution timeframe: acceptance, rejection and invalidation.
    pub fine_timeframe:    Timeframe,
    /// Reference timeframe for the gating value area.
    pub coarse_timeframe:  Timeframe,
    /// Consecutive closes beyond the band that count as acceptance.
    pub acceptance_closes: usize,
    /// Max |VIX slope| (points/candle) still considered quiet.
    pub vix_max_slope:     f64,
    /// Intraday VIX candles fed into the slope fit.
    pub vix_slope_window:  usize,
    /// Candles each side of a swing point.
    pub swing_lookback:    usize,
    /// Premiums below this are theta traps.
    pub premium_floor:     f64,
    /// `stop_loss = entry × stop_fraction`.
    pub stop_fraction:     f64,
    /// `target = entry + (entry − stop_loss) × reward_multiple`.
    pub reward_multiple:   f64,
    pub value_area:        ValueAreaConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone:          chrono_tz::Asia::Kolkata,
            session_open:      hm(9, 15),
            window_start:      hm(9, 45),
            window_end:        hm(14, 30),
            fine_timeframe:    Timeframe::M5,
            coarse_timeframe:  Timeframe::M15,
            acceptance_closes: 3,
            vix_max_slope:     0.02,
            vix_slope_window:  5,
            swing_lookback:    2,
            premium_floor:     25.0,
            stop_fraction:     0.75,
            reward_multiple:   1.5,
            value_area:        ValueAreaConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            timezone:          env_parse("MARKET_TZ", d.timezone),
            session_open:      env_time("SESSION_OPEN", d.session_open),
            window_start:      env_time("TRADE_WINDOW_START", d.window_start),
            window_end:        env_time("TRADE_WINDOW_END", d.window_end),
            fine_timeframe:    env_parse("FINE_TIMEFRAME", d.fine_timeframe),
            coarse_timeframe:  env_parse("COARSE_TIMEFRAME", d.coarse_timeframe),
            acceptance_closes: env_parse("ACCEPTANCE_CLOSES", d.acceptance_closes),
            vix_max_slope:     env_parse("VIX_MAX_SLOPE", d.vix_max_slope),
            vix_slope_window:  env_parse("VIX_SLOPE_WINDOW", d.vix_slope_window),
            swing_lookback:    env_parse("SWING_LOOKBACK", d.swing_lookback),
            premium_floor:     env_parse("PREMIUM_FLOOR", d.premium_floor),
            stop_fraction:     env_parse("STOP_FRACTION", d.stop_fraction),
            reward_multiple:   env_parse("REWARD_MULTIPLE", d.reward_multiple),
            value_area:        ValueAreaConfig::from_env(),
        }
    }

    /// Rejects combinations that would break the execution invariants.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.window_start > self.window_end {
            return Err(EngineError::Config(format!(
                "trade window start {} is after end {}",
                self.window_start, self.window_end
            )));
        }
        if !(self.stop_fraction > 0.0 && self.stop_fraction < 1.0) {
            return Err(EngineError::Config(format!(
                "STOP_FRACTION must be in (0, 1), got {}", self.stop_fraction
            )));
        }
        if !(self.premium_floor >= 1.0) {
            return Err(EngineError::Config(format!(
                "PREMIUM_FLOOR must be at least 1, got {}", self.premium_floor
            )));
        }
        if self.reward_multiple <= 0.0 {
            return Err(EngineError::Config(format!(
                "REWARD_MULTIPLE must be positive, got {}", self.reward_multiple
            )));
        }
        if self.acceptance_closes == 0 || self.swing_lookback == 0 || self.vix_slope_window < 2 {
            return Err(EngineError::Config(
                "ACCEPTANCE_CLOSES and SWING_LOOKBACK must be >= 1, VIX_SLOPE_WINDOW >= 2".into(),
            ));
        }
        if self.fine_timeframe.minutes() > self.coarse_timeframe.minutes() {
            return Err(EngineError::Config(format!(
                "fine timeframe {} is coarser than {}",
                self.fine_timeframe, self.coarse_timeframe
            )));
        }
        Ok(())
    }
}

// ─── RunnerConfig ─────────────────────────────────────────────────────────────

/// Binary-only settings: where inputs come from and where decisions go.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Feed files, one per underlying.
    pub inputs:         Vec<PathBuf>,
    /// `None` = single cycle then exit.
    pub watch_interval: Option<Duration>,
    /// `None` = decisions go to the log only.
    pub webhook_url:    Option<String>,
    /// Exchange holidays on top of weekends.
    pub holidays:       Vec<NaiveDate>,
}

impl RunnerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let raw_inputs = std::env::var("EDGE_INPUTS")
            .context("EDGE_INPUTS environment variable is required (comma-separated feed files)")?;

        let inputs: Vec<PathBuf> = raw_inputs
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();
        if inputs.is_empty() {
            anyhow::bail!("EDGE_INPUTS is set but lists no files");
        }

        let watch_interval = match std::env::var("WATCH_INTERVAL_SECS") {
            Ok(v) => Some(Duration::from_secs(
                v.parse().context("WATCH_INTERVAL_SECS must be a number")?,
            )),
            Err(_) => None,
        };

        let holidays = match std::env::var("MARKET_HOLIDAYS") {
            Ok(v) => parse_holidays(&v).context("MARKET_HOLIDAYS must be YYYY-MM-DD dates")?,
            Err(_) => Vec::new(),
        };

        Ok(Self {
            inputs,
            watch_interval,
            webhook_url: std::env::var("NOTIFY_WEBHOOK_URL").ok().filter(|v| !v.is_empty()),
            holidays,
        })
    }
}

pub fn parse_holidays(raw: &str) -> Result<Vec<NaiveDate>, EngineError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|e| EngineError::Config(format!("bad holiday '{s}': {e}")))
        })
        .collect()
}

// ─── Env helpers ──────────────────────────────────────────────────────────────

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, raw = %raw, "Unparseable config value, using default");
            default
        }),
        Err(_) => default,
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v != "false" && v != "0")
        .unwrap_or(default)
}

fn env_time(key: &str, default: NaiveTime) -> NaiveTime {
    match std::env::var(key) {
        Ok(raw) => NaiveTime::parse_from_str(raw.trim(), "%H:%M").unwrap_or_else(|_| {
            warn!(key, raw = %raw, "Expected HH:MM, using default");
            default
        }),
        Err(_) => default,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
