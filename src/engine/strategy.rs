//! # engine::strategy
//!
//! **Edge Gate Strategy**: turns one [`MarketSnapshot`] into exactly one
//! [`Decision`].
//!
//! ## Gate order (short-circuiting, first failure wins)
//!
//! ```text
//! snapshot
//!     │
//!     ├─ [1] Expiry day      expiry == today-or-last-trading-day   else NO_TRADE
//!     ├─ [2] Time window     09:45 <= local time <= 14:30          else NO_TRADE
//!     ├─ [3] VIX regime      quiet slope, pwl <= vix <= pdh        else NO_TRADE
//!     ├─ [4] Acceptance      last 3 fine closes all beyond AVRZ    → NO_TRADE
//!     │                      (missing AVRZ counts as acceptance)
//!     ├─ [5] Inside AVRZ     no rejection pattern                  → WAIT
//!     ├─ [6] Discount reject low < AVRZ low, close back above      → BUY CE
//!     ├─ [7] Premium reject  high > AVRZ high, close back below    → BUY PE
//!     └─ [8] otherwise                                             → NO_TRADE
//! ```
//!
//! Timing and regime gates come first: a structural edge is worthless on
//! the wrong day, outside the window, or in a trending VIX.
//!
//! `evaluate` reads nothing but its argument (no clock, no I/O), so the same
//! snapshot always produces the same decision.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::engine::premium::PremiumSelector;
use crate::feed::TradingCalendar;
use crate::models::{
    numeric::round2, Bias, Candle, Decision, Execution, HoldReason, MarketSnapshot,
    MarketStructure, OptionLeg, OptionType, Standby, TradeDirective, UnderlyingContext, ValueArea,
};

#[derive(Clone)]
pub struct EdgeGateStrategy {
    config:   Arc<EngineConfig>,
    calendar: Arc<dyn TradingCalendar>,
    premium:  PremiumSelector,
}

impl EdgeGateStrategy {
    pub fn new(config: Arc<EngineConfig>, calendar: Arc<dyn TradingCalendar>) -> Self {
        Self { config, calendar, premium: PremiumSelector }
    }

    // ─── Entry point ──────────────────────────────────────────────────────────

    pub fn evaluate(&self, md: &MarketSnapshot) -> Decision {
        let cfg = &*self.config;
        let context = self.context(md);
        // Read once, threaded through every gate below.
        let value_area = md.coarse.value_area;
        let fine = md.fine.timeframe;

        // ── [1] Expiry day ────────────────────────────────────────────────────
        let local = md.timestamp.with_timezone(&cfg.timezone);
        let trading_day = self.calendar.today_or_last_trading_day(local.date_naive());
        let expiry = match md.expiry {
            Some(expiry) if expiry == trading_day => expiry,
            other => {
                debug!(symbol = %md.symbol, expiry = ?other, %trading_day, "❌ Gate REJECTED: not expiry day");
                let detail = match other {
                    Some(e) => format!("expiry {e}, session {trading_day}"),
                    None => "expiry date unavailable".to_string(),
                };
                return self.no_trade(md, context, HoldReason::NotExpiryDay, Some(detail), vec![
                    "Re-evaluate on the contract's expiry session".to_string(),
                ]);
            }
        };

        // ── [2] Time window ───────────────────────────────────────────────────
        let now = local.time();
        if now < cfg.window_start || now > cfg.window_end {
            debug!(symbol = %md.symbol, time = %now, "❌ Gate REJECTED: outside trade window");
            return self.no_trade(md, context, HoldReason::TimeWindowClosed, Some(format!("local time {}", now.format("%H:%M"))), vec![
                format!(
                    "Trade window is {}-{} {}",
                    cfg.window_start.format("%H:%M"),
                    cfg.window_end.format("%H:%M"),
                    cfg.timezone
                ),
            ]);
        }

        // ── [3] VIX regime ────────────────────────────────────────────────────
        if !(md.vix.is_range_regime(cfg.vix_max_slope) && md.vix.has_reference_levels()) {
            debug!(symbol = %md.symbol, vix = ?md.vix, "❌ Gate REJECTED: VIX regime invalid");
            return self.no_trade(md, context, HoldReason::VixRegimeInvalid, None, vec![
                format!("VIX |slope| below {} points/candle", cfg.vix_max_slope),
                match (md.vix.pwl, md.vix.pdh) {
                    (Some(pwl), Some(pdh)) => format!("VIX back inside PWL {pwl:.2} to PDH {pdh:.2}"),
                    _ => "VIX prior-day high and prior-week low available".to_string(),
                },
            ]);
        }

        // ── [4] Acceptance kill-switch ────────────────────────────────────────
        let Some(va) = value_area else {
            debug!(symbol = %md.symbol, "❌ Gate REJECTED: no value area, treating as acceptance");
            return self.no_trade(md, context, HoldReason::AcceptanceDetected, Some("value area unavailable".into()), vec![
                format!("{} VWAP and ATR available to build the AVRZ band", md.coarse.timeframe),
            ]);
        };

        let Some(recent) = md.fine.candles.tail(cfg.acceptance_closes) else {
            debug!(
                symbol = %md.symbol,
                have = md.fine.candles.len(),
                need = cfg.acceptance_closes,
                "❌ Gate REJECTED: too few closes to rule out acceptance"
            );
            return self.no_trade(md, context, HoldReason::AcceptanceDetected, Some(format!(
                "fewer than {} closed {fine} candles", cfg.acceptance_closes
            )), vec![
                format!("At least {} closed {fine} candles in the session", cfg.acceptance_closes),
            ]);
        };

        if let Some(side) = acceptance(recent, &va) {
            debug!(symbol = %md.symbol, side, va_low = va.low, va_high = va.high, "⛔ Acceptance kill-switch");
            return self.no_trade(md, context, HoldReason::AcceptanceDetected, Some(format!(
                "{} {fine} closes {side} AVRZ {:.2}",
                recent.len(),
                if side == "above" { va.high } else { va.low }
            )), vec![
                format!("Price back inside AVRZ {:.2}-{:.2}", va.low, va.high),
            ]);
        }

        // ── [5] Edge location ─────────────────────────────────────────────────
        // `recent` is non-empty: tail() never returns an empty slice.
        let last = recent[recent.len() - 1];
        let discount = last.rejected_below(va.low);
        let premium = last.rejected_above(va.high);

        if va.contains(last.close) && !discount && !premium {
            debug!(symbol = %md.symbol, close = last.close, "⏳ Inside AVRZ, waiting for an edge");
            return Decision::Wait(Standby {
                instrument: md.symbol.clone(),
                bias:       self.hold_bias(md),
                reason:     HoldReason::InsideValueArea,
                detail:     Some(format!("{fine} close {:.2} inside {:.2}-{:.2}", last.close, va.low, va.high)),
                reevaluate: vec![
                    format!("{fine} candle wicks below AVRZ low {:.2} and closes back above it (CE)", va.low),
                    format!("{fine} candle wicks above AVRZ high {:.2} and closes back below it (PE)", va.high),
                ],
                context,
            });
        }

        // ── [6] Discount rejection → CE ───────────────────────────────────────
        if discount {
            return self.trade(md, context, &va, &last, expiry, OptionType::Call);
        }

        // ── [7] Premium rejection → PE ────────────────────────────────────────
        if premium {
            return self.trade(md, context, &va, &last, expiry, OptionType::Put);
        }

        // ── [8] No edge ───────────────────────────────────────────────────────
        debug!(symbol = %md.symbol, close = last.close, "❌ Outside AVRZ without rejection");
        self.no_trade(md, context, HoldReason::NoEdgeLocation, Some(format!(
            "{fine} close {:.2} outside {:.2}-{:.2} without rejection", last.close, va.low, va.high
        )), vec![
            format!("Rejection candle at AVRZ low {:.2} or high {:.2}", va.low, va.high),
        ])
    }

    // ─── Trade construction ───────────────────────────────────────────────────

    fn trade(
        &self,
        md:          &MarketSnapshot,
        context:     UnderlyingContext,
        va:          &ValueArea,
        trigger:     &Candle,
        expiry:      NaiveDate,
        option_type: OptionType,
    ) -> Decision {
        let cfg = &*self.config;
        let fine = md.fine.timeframe;

        let Some(chain) = md.option_chain.as_ref() else {
            debug!(symbol = %md.symbol, "❌ No option chain in snapshot");
            return self.no_trade(md, context, HoldReason::PremiumUnavailable, Some("option chain missing".into()), vec![
                format!("ATM {option_type} quote available"),
            ]);
        };

        let pick = self.premium.pick(chain, option_type);
        let Some(premium) = pick.premium else {
            debug!(symbol = %md.symbol, strike = pick.strike, "❌ ATM premium unavailable");
            return self.no_trade(md, context, HoldReason::PremiumUnavailable, None, vec![
                format!("ATM {option_type} {} shows a usable ask or last price", fmt_strike(pick.strike)),
            ]);
        };

        if premium < cfg.premium_floor {
            debug!(symbol = %md.symbol, premium, floor = cfg.premium_floor, "❌ Premium below floor");
            return self.no_trade(md, context, HoldReason::PremiumTooLow, Some(format!(
                "{premium:.2} < {:.2}", cfg.premium_floor
            )), vec![
                format!("ATM {option_type} premium at or above {:.2}", cfg.premium_floor),
            ]);
        }

        let execution = self.execution(premium);

        let swings = md.fine.structure.as_ref();
        let (bias, invalidation, reason, beyond) = match option_type {
            OptionType::Call => (
                Bias::Bullish,
                swings
                    .and_then(|s| s.last_swing_low)
                    .map(|s| s.price)
                    .unwrap_or(va.low),
                format!(
                    "Discount rejection: {fine} low {:.2} swept AVRZ low {:.2}, closed back at {:.2}",
                    trigger.low, va.low, trigger.close
                ),
                "below",
            ),
            OptionType::Put => (
                Bias::Bearish,
                swings
                    .and_then(|s| s.last_swing_high)
                    .map(|s| s.price)
                    .unwrap_or(va.high),
                format!(
                    "Premium rejection: {fine} high {:.2} swept AVRZ high {:.2}, closed back at {:.2}",
                    trigger.high, va.high, trigger.close
                ),
                "above",
            ),
        };

        let vwap_rule = match md.fine.vwap {
            Some(vwap) => format!(
                "VWAP: exit if two consecutive {fine} candles close {beyond} VWAP {vwap:.2}"
            ),
            None => "VWAP: unavailable, rely on stop-loss and invalidation".to_string(),
        };

        info!(
            symbol      = %md.symbol,
            option      = %option_type,
            strike      = pick.strike,
            entry       = execution.entry,
            stop_loss   = execution.stop_loss,
            target      = execution.target,
            invalidation,
            "🎯 Edge confirmed: BUY"
        );

        Decision::Buy(TradeDirective {
            instrument: md.symbol.clone(),
            bias,
            option: OptionLeg { option_type, strike: pick.strike, expiry },
            execution,
            invalidation: round2(invalidation),
            context,
            reason,
            exit_rules: vec![
                format!("Stop-loss: exit if premium trades at or below {:.2}", execution.stop_loss),
                format!("Invalidation: exit if a {fine} candle closes {beyond} {:.2}", round2(invalidation)),
                vwap_rule,
                format!("Target: book at {:.2}", execution.target),
            ],
        })
    }

    /// Risk-normalised premium levels.  With the defaults:
    /// stop = 75% of entry, target = entry + 1.5 × risk.
    pub fn execution(&self, premium: f64) -> Execution {
        let cfg = &*self.config;
        let entry = round2(premium);
        let stop_loss = round2(entry * cfg.stop_fraction);
        let target = round2(entry + (entry - stop_loss) * cfg.reward_multiple);
        let risk_reward = round2((target - entry) / (entry - stop_loss));

        Execution { entry, stop_loss, target, risk_reward }
    }

    // ─── Helpers ──────────────────────────────────────────────────────────────

    fn no_trade(
        &self,
        md:         &MarketSnapshot,
        context:    UnderlyingContext,
        reason:     HoldReason,
        detail:     Option<String>,
        reevaluate: Vec<String>,
    ) -> Decision {
        Decision::NoTrade(Standby {
            instrument: md.symbol.clone(),
            bias: self.hold_bias(md),
            reason,
            detail,
            reevaluate,
            context,
        })
    }

    fn hold_bias(&self, md: &MarketSnapshot) -> Bias {
        Bias::from_structure(structure_of(md.coarse.structure.as_ref()))
    }

    fn context(&self, md: &MarketSnapshot) -> UnderlyingContext {
        UnderlyingContext {
            spot:             md.fine.last_close(),
            vwap:             md.fine.vwap,
            value_area:       md.coarse.value_area,
            fine_timeframe:   md.fine.timeframe,
            fine_structure:   structure_of(md.fine.structure.as_ref()),
            coarse_timeframe: md.coarse.timeframe,
            coarse_structure: structure_of(md.coarse.structure.as_ref()),
            vix:              md.vix,
        }
    }
}

/// `Some("above" | "below")` when every close sits strictly beyond the band.
fn acceptance(recent: &[Candle], va: &ValueArea) -> Option<&'static str> {
    if recent.iter().all(|c| va.is_above(c.close)) {
        Some("above")
    } else if recent.iter().all(|c| va.is_below(c.close)) {
        Some("below")
    } else {
        None
    }
}

fn structure_of(result: Option<&crate::models::StructureResult>) -> MarketStructure {
    result.map(|s| s.market_structure).unwrap_or(MarketStructure::Unknown)
}

/// Strikes print without decimals when they are whole numbers.
pub fn fmt_strike(strike: f64) -> String {
    if strike.fract() == 0.0 {
        format!("{strike:.0}")
    } else {
        format!("{strike:.2}")
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::*;
    use crate::engine::render::render_decision;
    use crate::models::{Action, ContractQuote, RawNumber};
    use chrono::{Duration, TimeZone, Utc};

    fn quote(ask: Option<f64>, ltp: Option<f64>) -> ContractQuote {
        ContractQuote {
            top_ask_price: ask.map(RawNumber::Number),
            last_price:    ltp.map(RawNumber::Number),
            ..Default::default()
        }
    }

    fn hold_reason(decision: &Decision) -> HoldReason {
        decision.hold_reason().expect("expected a hold decision")
    }

    // ── Scenarios ────────────────────────────────────────────────────────────

    #[test]
    fn test_discount_rejection_buys_call() {
        let decision = strategy().evaluate(&discount_snapshot());

        let Decision::Buy(trade) = &decision else {
            panic!("expected BUY, got {decision:?}");
        };
        assert_eq!(trade.option.option_type, OptionType::Call);
        assert_eq!(trade.option.strike, 24300.0);
        assert_eq!(trade.option.expiry, session_date());
        assert_eq!(trade.bias, Bias::Bullish);
        assert_eq!(trade.execution.entry, 130.0);
        assert_eq!(trade.execution.stop_loss, 97.5);
        assert_eq!(trade.execution.target, 178.75);
        assert_eq!(trade.execution.risk_reward, 1.5);
    }

    #[test]
    fn test_call_invalidation_is_last_swing_low() {
        let Decision::Buy(trade) = strategy().evaluate(&discount_snapshot()) else {
            panic!("expected BUY");
        };
        assert_eq!(trade.invalidation, 24305.0);
        assert_eq!(trade.exit_rules.len(), 4);
        assert!(trade.exit_rules[1].contains("closes below 24305.00"));
    }

    #[test]
    fn test_invalidation_falls_back_to_band_edge() {
        let mut md = discount_snapshot();
        md.fine.structure = None;
        let Decision::Buy(trade) = strategy().evaluate(&md) else {
            panic!("expected BUY");
        };
        assert_eq!(trade.invalidation, 24280.0);
    }

    #[test]
    fn test_missing_ask_zero_ltp_is_unavailable() {
        let mut md = discount_snapshot();
        md.option_chain.as_mut().unwrap().ce = Some(quote(None, Some(0.0)));
        let decision = strategy().evaluate(&md);
        assert_eq!(decision.action(), Action::NoTrade);
        assert_eq!(hold_reason(&decision), HoldReason::PremiumUnavailable);
        assert_eq!(decision.reason(), "Option premium unavailable");
    }

    #[test]
    fn test_missing_chain_is_unavailable() {
        let mut md = discount_snapshot();
        md.option_chain = None;
        assert_eq!(hold_reason(&strategy().evaluate(&md)), HoldReason::PremiumUnavailable);
    }

    #[test]
    fn test_steep_vix_blocks_valid_rejection() {
        let mut md = discount_snapshot();
        md.vix.slope = Some(0.05);
        let decision = strategy().evaluate(&md);
        assert_eq!(hold_reason(&decision), HoldReason::VixRegimeInvalid);
        assert_eq!(decision.reason(), "VIX regime invalid");
    }

    #[test]
    fn test_vix_without_reference_levels_blocks() {
        let mut md = discount_snapshot();
        md.vix.pwl = None;
        assert_eq!(hold_reason(&strategy().evaluate(&md)), HoldReason::VixRegimeInvalid);
    }

    #[test]
    fn test_non_positive_vix_levels_block_even_inside_range() {
        let mut md = discount_snapshot();
        md.vix.pwl = Some(0.0);
        // price 12.4 sits inside [0, 13.1] with a quiet slope
        assert!(md.vix.is_range_regime(0.02));
        assert_eq!(hold_reason(&strategy().evaluate(&md)), HoldReason::VixRegimeInvalid);

        let mut md = discount_snapshot();
        md.vix.pwl = Some(-1.0);
        assert_eq!(hold_reason(&strategy().evaluate(&md)), HoldReason::VixRegimeInvalid);
    }

    // ── Gate ordering ─────────────────────────────────────────────────────────

    #[test]
    fn test_not_expiry_day_wins_over_everything() {
        let mut md = discount_snapshot();
        md.expiry = Some(session_date() + Duration::days(7));
        let decision = strategy().evaluate(&md);
        assert_eq!(hold_reason(&decision), HoldReason::NotExpiryDay);
        assert!(decision.reason().starts_with("Not expiry day"));
    }

    #[test]
    fn test_unparsed_expiry_is_not_expiry_day() {
        let mut md = discount_snapshot();
        md.expiry = None;
        assert_eq!(hold_reason(&strategy().evaluate(&md)), HoldReason::NotExpiryDay);
    }

    #[test]
    fn test_time_window_edges() {
        // 09:44 IST and 14:31 IST are outside; 09:45 and 14:30 are inside.
        let cases = [
            (Utc.with_ymd_and_hms(2026, 10, 16, 4, 14, 0).unwrap(), false),
            (Utc.with_ymd_and_hms(2026, 10, 16, 4, 15, 0).unwrap(), true),
            (Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap(), true),
            (Utc.with_ymd_and_hms(2026, 10, 16, 9, 1, 0).unwrap(), false),
        ];
        for (ts, inside) in cases {
            let mut md = discount_snapshot();
            md.timestamp = ts;
            let decision = strategy().evaluate(&md);
            let closed = decision.hold_reason() == Some(HoldReason::TimeWindowClosed);
            assert_eq!(closed, !inside, "timestamp {ts}");
        }
    }

    #[test]
    fn test_time_window_checked_before_vix() {
        let mut md = discount_snapshot();
        md.timestamp = Utc.with_ymd_and_hms(2026, 10, 16, 3, 50, 0).unwrap();
        md.vix.slope = Some(0.5);
        assert_eq!(hold_reason(&strategy().evaluate(&md)), HoldReason::TimeWindowClosed);
    }

    // ── Acceptance ────────────────────────────────────────────────────────────

    #[test]
    fn test_missing_value_area_never_buys() {
        let mut md = discount_snapshot();
        md.coarse.value_area = None;
        let decision = strategy().evaluate(&md);
        assert!(!decision.is_trade());
        assert_eq!(hold_reason(&decision), HoldReason::AcceptanceDetected);
        assert!(decision.reason().contains("acceptance"));
    }

    #[test]
    fn test_three_closes_above_band_is_acceptance() {
        let md = with_last_bars(discount_snapshot(), &[
            (24420.0, 24440.0, 24415.0, 24430.0),
            (24430.0, 24450.0, 24425.0, 24445.0),
            (24445.0, 24460.0, 24430.0, 24450.0),
        ]);
        let decision = strategy().evaluate(&md);
        assert_eq!(hold_reason(&decision), HoldReason::AcceptanceDetected);
        assert!(decision.reason().contains("above"));
    }

    #[test]
    fn test_three_closes_below_band_is_acceptance() {
        let md = with_last_bars(discount_snapshot(), &[
            (24285.0, 24290.0, 24260.0, 24270.0),
            (24270.0, 24278.0, 24250.0, 24260.0),
            (24260.0, 24275.0, 24240.0, 24250.0),
        ]);
        assert_eq!(hold_reason(&strategy().evaluate(&md)), HoldReason::AcceptanceDetected);
    }

    #[test]
    fn test_close_on_band_edge_is_not_acceptance() {
        let md = with_last_bars(discount_snapshot(), &[
            (24420.0, 24440.0, 24415.0, 24430.0),
            (24430.0, 24450.0, 24425.0, 24445.0),
            (24445.0, 24450.0, 24415.0, 24420.0),
        ]);
        // last close == AVRZ high: inside, no rejection → WAIT
        assert_eq!(strategy().evaluate(&md).action(), Action::Wait);
    }

    #[test]
    fn test_too_few_candles_fails_closed() {
        let mut md = discount_snapshot();
        let kept: Vec<_> = md.fine.candles.as_slice()[..2].to_vec();
        md.fine.candles = crate::models::CandleSeries::new(kept).unwrap();
        let decision = strategy().evaluate(&md);
        assert_eq!(hold_reason(&decision), HoldReason::AcceptanceDetected);
    }

    // ── Edge location ─────────────────────────────────────────────────────────

    #[test]
    fn test_inside_band_waits() {
        let md = with_last_bars(discount_snapshot(), &[(24310.0, 24330.0, 24300.0, 24320.0)]);
        let decision = strategy().evaluate(&md);
        let Decision::Wait(standby) = &decision else {
            panic!("expected WAIT, got {decision:?}");
        };
        assert_eq!(standby.reason, HoldReason::InsideValueArea);
        assert_eq!(standby.reevaluate.len(), 2);
    }

    #[test]
    fn test_premium_rejection_buys_put() {
        let mut md = with_last_bars(discount_snapshot(), &[(24400.0, 24430.0, 24395.0, 24410.0)]);
        md.option_chain.as_mut().unwrap().pe = Some(quote(Some(118.4), Some(117.0)));
        let Decision::Buy(trade) = strategy().evaluate(&md) else {
            panic!("expected BUY PE");
        };
        assert_eq!(trade.option.option_type, OptionType::Put);
        assert_eq!(trade.bias, Bias::Bearish);
        assert_eq!(trade.execution.entry, 118.4);
        assert_eq!(trade.execution.stop_loss, 88.8);
        assert_eq!(trade.invalidation, 24362.0);
    }

    #[test]
    fn test_outside_without_rejection_is_no_edge() {
        let md = with_last_bars(discount_snapshot(), &[(24290.0, 24295.0, 24250.0, 24260.0)]);
        let decision = strategy().evaluate(&md);
        assert_eq!(hold_reason(&decision), HoldReason::NoEdgeLocation);
        assert_eq!(decision.action(), Action::NoTrade);
    }

    // ── Premium floor ─────────────────────────────────────────────────────────

    #[test]
    fn test_premium_floor_boundary() {
        let mut low = discount_snapshot();
        low.option_chain.as_mut().unwrap().ce = Some(quote(Some(24.99), None));
        let decision = strategy().evaluate(&low);
        assert_eq!(hold_reason(&decision), HoldReason::PremiumTooLow);
        assert!(decision.reason().starts_with("Premium too low"));

        let mut ok = discount_snapshot();
        ok.option_chain.as_mut().unwrap().ce = Some(quote(Some(25.01), None));
        assert!(strategy().evaluate(&ok).is_trade());
    }

    // ── Properties ────────────────────────────────────────────────────────────

    #[test]
    fn test_evaluate_is_idempotent() {
        let strategy = strategy();
        for md in [
            discount_snapshot(),
            with_last_bars(discount_snapshot(), &[(24310.0, 24330.0, 24300.0, 24320.0)]),
        ] {
            let first = strategy.evaluate(&md);
            let second = strategy.evaluate(&md);
            assert_eq!(first, second);
            assert_eq!(render_decision(&first), render_decision(&second));
        }
    }

    #[test]
    fn test_risk_reward_invariant() {
        let strategy = strategy();
        for premium in [25.01, 31.37, 57.83, 99.99, 130.0, 212.45, 488.1] {
            let e = strategy.execution(premium);
            assert!(e.target > e.entry && e.entry > e.stop_loss, "premium {premium}");
            assert_eq!(e.risk_reward, round2((e.target - e.entry) / (e.entry - e.stop_loss)));
            assert!((e.risk_reward - 1.5).abs() <= 0.01, "premium {premium}");
        }
    }

    #[test]
    fn test_fmt_strike() {
        assert_eq!(fmt_strike(24300.0), "24300");
        assert_eq!(fmt_strike(52.5), "52.50");
    }
}
