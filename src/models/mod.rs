pub mod candle;
pub mod decision;
pub mod numeric;
pub mod option_chain;
pub mod snapshot;
pub mod structure;
pub mod value_area;
pub mod vix;

pub use candle::{Candle, CandleSeries, Timeframe};
pub use decision::{Action, Bias, Decision, Execution, HoldReason, OptionLeg, Standby, TradeDirective, UnderlyingContext};
pub use numeric::{round2, RawNumber};
pub use option_chain::{ContractQuote, OptionChain, OptionType};
pub use snapshot::{MarketSnapshot, TimeframeView};
pub use structure::{BosDirection, BreakOfStructure, MarketStructure, StructureResult, SwingKind, SwingPoint};
pub use value_area::{ValueArea, VolRegime};
pub use vix::VixSnapshot;
