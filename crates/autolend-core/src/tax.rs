//! Static sales-tax presets keyed by US state code. Seeds a config's tax
//! rate and rule when the borrower's state changes; never consulted by the
//! pipeline itself.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Rate, TaxRule};

/// Default tax treatment for a region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxPreset {
    /// Percent, e.g. 8.75.
    pub rate_pct: Rate,
    pub rule: TaxRule,
}

const PRESETS: &[(&str, Decimal, TaxRule)] = &[
    ("CA", dec!(8.75), TaxRule::PriceMinusTradeIn),
    ("TX", dec!(6.25), TaxRule::PriceFull),
    ("FL", dec!(6.00), TaxRule::PriceMinusTradeIn),
    ("NY", dec!(8.875), TaxRule::PriceMinusTradeIn),
    ("WA", dec!(6.50), TaxRule::PriceMinusTradeIn),
];

/// Look up the preset for a state code. Case-insensitive, ignores
/// surrounding whitespace; unknown or empty codes return `None`.
pub fn preset_for_state(state: &str) -> Option<TaxPreset> {
    let code = state.trim().to_uppercase();
    PRESETS
        .iter()
        .find(|(abbr, _, _)| *abbr == code)
        .map(|&(_, rate_pct, rule)| TaxPreset { rate_pct, rule })
}
