//! # engine::render
//!
//! Plain-text rendering of a [`Decision`] for notification channels.
//!
//! Layout is fixed: one label per line, in this order, with `- ` bullets for
//! nested items.  Sections that do not apply to WAIT / NO_TRADE print `-`.
//!
//! ```text
//! Decision: BUY
//! Instrument: NIFTY
//! Bias: BULLISH
//! Option: CE 24300 | Expiry 2026-10-16
//! Execution:
//! - Entry: 130.00
//! - Stop-loss: 97.50
//! - Target: 178.75
//! - Risk/Reward: 1.50
//! Underlying Context:
//! - Spot (5m close): 24310.00
//! ...
//! Exit Rules:
//! - Stop-loss: exit if premium trades at or below 97.50
//! ...
//! Reason: Discount rejection: ...
//! ```

use std::fmt::Write;

use uuid::Uuid;

use crate::engine::strategy::fmt_strike;
use crate::models::{Decision, UnderlyingContext};

pub fn render_decision(decision: &Decision) -> String {
    let mut out = String::new();

    line(&mut out, format_args!("Decision: {}", decision.action()));
    line(&mut out, format_args!("Instrument: {}", decision.instrument()));
    line(&mut out, format_args!("Bias: {}", decision.bias()));

    match decision {
        Decision::Buy(trade) => {
            line(&mut out, format_args!(
                "Option: {} {} | Expiry {}",
                trade.option.option_type,
                fmt_strike(trade.option.strike),
                trade.option.expiry
            ));
            let e = &trade.execution;
            out.push_str("Execution:\n");
            line(&mut out, format_args!("- Entry: {:.2}", e.entry));
            line(&mut out, format_args!("- Stop-loss: {:.2}", e.stop_loss));
            line(&mut out, format_args!("- Target: {:.2}", e.target));
            line(&mut out, format_args!("- Risk/Reward: {:.2}", e.risk_reward));
        }
        Decision::Wait(_) | Decision::NoTrade(_) => {
            out.push_str("Option: -\n");
            out.push_str("Execution: -\n");
        }
    }

    out.push_str("Underlying Context:\n");
    render_context(&mut out, decision.context());
    if let Decision::Buy(trade) = decision {
        line(&mut out, format_args!("- Invalidation: {:.2}", trade.invalidation));
    }

    out.push_str("Exit Rules:\n");
    match decision {
        Decision::Buy(trade) => {
            for rule in &trade.exit_rules {
                line(&mut out, format_args!("- {rule}"));
            }
        }
        Decision::Wait(standby) | Decision::NoTrade(standby) => {
            out.push_str("- No position. Re-evaluate when:\n");
            for condition in &standby.reevaluate {
                line(&mut out, format_args!("- {condition}"));
            }
        }
    }

    line(&mut out, format_args!("Reason: {}", decision.reason()));
    out
}

/// Stable identifier for a rendered decision.  Identical decisions map to the
/// same key, which lets a notifier drop repeats across watch cycles.
pub fn decision_key(decision: &Decision) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, render_decision(decision).as_bytes())
}

fn render_context(out: &mut String, ctx: &UnderlyingContext) {
    line(out, format_args!("- Spot ({} close): {}", ctx.fine_timeframe, price(ctx.spot)));
    line(out, format_args!("- VWAP: {}", price(ctx.vwap)));
    match &ctx.value_area {
        Some(va) => line(out, format_args!(
            "- AVRZ ({}): {:.2} - {:.2} (mid {:.2}, {})",
            ctx.coarse_timeframe, va.low, va.high, va.mid, va.regime
        )),
        None => line(out, format_args!("- AVRZ ({}): unavailable", ctx.coarse_timeframe)),
    }
    line(out, format_args!(
        "- Structure: {} {} | {} {}",
        ctx.fine_timeframe, ctx.fine_structure, ctx.coarse_timeframe, ctx.coarse_structure
    ));
    line(out, format_args!(
        "- VIX: {} | slope {} | PDH {} | PWL {}",
        price(ctx.vix.price),
        ctx.vix.slope.map(|s| format!("{s:.4}")).unwrap_or_else(|| "n/a".into()),
        price(ctx.vix.pdh),
        price(ctx.vix.pwl),
    ));
}

fn price(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "n/a".into())
}

fn line(out: &mut String, args: std::fmt::Arguments<'_>) {
    // Writing into a String cannot fail.
    let _ = out.write_fmt(args);
    out.push('\n');
}

// ─── Tests ────────────────────────────────────────────────────────────────────
