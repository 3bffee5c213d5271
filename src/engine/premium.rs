//! # engine::premium
//!
//! **Premium Selector**: reads the ATM contract for the requested side and
//! extracts a workable premium reference.
//!
//! Preference order: top-of-book ask (what a buyer actually pays), then last
//! traded price.  A value counts only if it coerces to a positive float; a
//! contract with neither yields `premium: None`, which the strategy turns into
//! NO_TRADE("Option premium unavailable").

use tracing::debug;

use crate::models::{OptionChain, OptionType};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PremiumPick {
    pub strike:  f64,
    pub premium: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PremiumSelector;

impl PremiumSelector {
    pub fn pick(&self, chain: &OptionChain, option_type: OptionType) -> PremiumPick {
        let premium = chain.contract(option_type).and_then(|quote| {
            quote
                .top_ask_price
                .as_ref()
                .and_then(|ask| ask.as_positive())
                .or_else(|| quote.last_price.as_ref().and_then(|ltp| ltp.as_positive()))
        });

        debug!(
            strike = chain.atm_strike,
            option_type = %option_type,
            premium = ?premium,
            "ATM premium picked"
        );

        PremiumPick { strike: chain.atm_strike, premium }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
