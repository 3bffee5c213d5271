//! # models::option_chain
//!
//! ATM slice of an option chain as the chain provider returns it.
//! Quote fields stay raw ([`RawNumber`]); deciding what is usable is the
//! premium selector's job.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::numeric::RawNumber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionType {
    #[serde(rename = "CE")]
    Call,
    #[serde(rename = "PE")]
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OptionType::Call => "CE",
            OptionType::Put  => "PE",
        })
    }
}

/// One side (CE or PE) of a strike.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractQuote {
    #[serde(default)]
    pub security_id:   Option<String>,
    #[serde(default)]
    pub last_price:    Option<RawNumber>,
    #[serde(default)]
    pub top_ask_price: Option<RawNumber>,
    #[serde(default)]
    pub top_bid_price: Option<RawNumber>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    pub atm_strike: f64,
    #[serde(default)]
    pub ce:         Option<ContractQuote>,
    #[serde(default)]
    pub pe:         Option<ContractQuote>,
}

impl OptionChain {
    pub fn contract(&self, option_type: OptionType) -> Option<&ContractQuote> {
        match option_type {
            OptionType::Call => self.ce.as_ref(),
            OptionType::Put  => self.pe.as_ref(),
        }
    }
}
