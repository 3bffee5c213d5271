//! # models::decision
//!
//! Defines [`Decision`]: the single directive an evaluation produces.
//!
//! A decision is a pure value: the strategy builds it, the renderer turns it
//! into the fixed-label text block, and whatever sits downstream (notifier,
//! order placement) consumes it.  Nothing in here performs I/O.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    candle::Timeframe,
    option_chain::OptionType,
    structure::MarketStructure,
    value_area::ValueArea,
    vix::VixSnapshot,
};

// ─── Action / Bias ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Buy,
    Wait,
    NoTrade,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Buy     => "BUY",
            Action::Wait    => "WAIT",
            Action::NoTrade => "NO_TRADE",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

impl Bias {
    pub fn from_structure(structure: MarketStructure) -> Self {
        match structure {
            MarketStructure::Bullish => Bias::Bullish,
            MarketStructure::Bearish => Bias::Bearish,
            MarketStructure::Range | MarketStructure::Unknown => Bias::Neutral,
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Bias::Bullish => "BULLISH",
            Bias::Bearish => "BEARISH",
            Bias::Neutral => "NEUTRAL",
        })
    }
}

// ─── HoldReason ───────────────────────────────────────────────────────────────

/// Why no position is taken.  `Display` yields the exact reason strings the
/// notification text carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HoldReason {
    NotExpiryDay,
    TimeWindowClosed,
    VixRegimeInvalid,
    AcceptanceDetected,
    /// The only WAIT reason: regime intact, price inside the band.
    InsideValueArea,
    PremiumUnavailable,
    PremiumTooLow,
    NoEdgeLocation,
}

impl HoldReason {
    pub fn as_str(self) -> &'static str {
        match self {
            HoldReason::NotExpiryDay       => "Not expiry day",
            HoldReason::TimeWindowClosed   => "Time window closed",
            HoldReason::VixRegimeInvalid   => "VIX regime invalid",
            HoldReason::AcceptanceDetected => "Trend/acceptance detected",
            HoldReason::InsideValueArea    => "Inside value area, no edge yet",
            HoldReason::PremiumUnavailable => "Option premium unavailable",
            HoldReason::PremiumTooLow      => "Premium too low (theta trap)",
            HoldReason::NoEdgeLocation     => "No edge location",
        }
    }
}

impl fmt::Display for HoldReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Payload pieces ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionLeg {
    pub option_type: OptionType,
    pub strike:      f64,
    pub expiry:      NaiveDate,
}

/// Premium-denominated execution plan.  Invariant: `target > entry > stop_loss`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    pub entry:       f64,
    pub stop_loss:   f64,
    pub target:      f64,
    pub risk_reward: f64,
}

/// What the underlying looked like when the decision was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderlyingContext {
    pub spot:             Option<f64>,
    pub vwap:             Option<f64>,
    pub value_area:       Option<ValueArea>,
    pub fine_timeframe:   Timeframe,
    pub fine_structure:   MarketStructure,
    pub coarse_timeframe: Timeframe,
    pub coarse_structure: MarketStructure,
    pub vix:              VixSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDirective {
    pub instrument:   String,
    pub bias:         Bias,
    pub option:       OptionLeg,
    pub execution:    Execution,
    /// Underlying level whose fine-timeframe close beyond it voids the idea.
    pub invalidation: f64,
    pub context:      UnderlyingContext,
    pub reason:       String,
    /// Advisory; monitoring them is the position manager's job.
    pub exit_rules:   Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standby {
    pub instrument: String,
    pub bias:       Bias,
    pub reason:     HoldReason,
    /// Extra colour on the reason, e.g. which input was missing.
    pub detail:     Option<String>,
    /// Conditions under which a fresh evaluation could change the outcome.
    pub reevaluate: Vec<String>,
    pub context:    UnderlyingContext,
}

// ─── Decision ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Buy(TradeDirective),
    Wait(Standby),
    NoTrade(Standby),
}

impl Decision {
    pub fn action(&self) -> Action {
        match self {
            Decision::Buy(_)     => Action::Buy,
            Decision::Wait(_)    => Action::Wait,
            Decision::NoTrade(_) => Action::NoTrade,
        }
    }

    pub fn instrument(&self) -> &str {
        match self {
            Decision::Buy(t) => &t.instrument,
            Decision::Wait(s) | Decision::NoTrade(s) => &s.instrument,
        }
    }

    pub fn bias(&self) -> Bias {
        match self {
            Decision::Buy(t) => t.bias,
            Decision::Wait(s) | Decision::NoTrade(s) => s.bias,
        }
    }

    pub fn context(&self) -> &UnderlyingContext {
        match self {
            Decision::Buy(t) => &t.context,
            Decision::Wait(s) | Decision::NoTrade(s) => &s.context,
        }
    }

    /// `None` for BUY.
    pub fn hold_reason(&self) -> Option<HoldReason> {
        match self {
            Decision::Buy(_) => None,
            Decision::Wait(s) | Decision::NoTrade(s) => Some(s.reason),
        }
    }

    pub fn reason(&self) -> String {
        match self {
            Decision::Buy(t) => t.reason.clone(),
            Decision::Wait(s) | Decision::NoTrade(s) => match &s.detail {
                Some(detail) => format!("{} ({detail})", s.reason),
                None => s.reason.to_string(),
            },
        }
    }

    pub fn execution(&self) -> Option<&Execution> {
        match self {
            Decision::Buy(t) => Some(&t.execution),
            _ => None,
        }
    }

    pub fn is_trade(&self) -> bool {
        matches!(self, Decision::Buy(_))
    }
}
