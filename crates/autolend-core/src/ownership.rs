//! Ownership economics beyond the loan itself: a monthly running-cost
//! estimate and a coarse residual-value curve. Advisory figures for the
//! caller's presentation layer; the decision pipeline never reads them.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::loan::round2;
use crate::types::Money;

/// Inputs for the monthly total-cost-of-ownership estimate. Optional
/// fields contribute zero when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TcoInputs {
    pub miles_per_year: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpg: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_per_month: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maint_per_month: Option<Money>,
}

/// Fuel (when mpg and price are both known) plus insurance and
/// maintenance, per month.
pub fn estimate_tco_per_month(inputs: &TcoInputs) -> Money {
    let fuel = match (inputs.mpg, inputs.fuel_price) {
        (Some(mpg), Some(fuel_price)) if mpg > Decimal::ZERO => {
            inputs.miles_per_year / dec!(12) / mpg * fuel_price
        }
        _ => Decimal::ZERO,
    };
    round2(
        inputs.insurance_per_month.unwrap_or(Decimal::ZERO)
            + inputs.maint_per_month.unwrap_or(Decimal::ZERO)
            + fuel,
    )
}

const FIRST_YEAR_RETENTION: Decimal = dec!(0.80);
const LATER_YEAR_RETENTION: Decimal = dec!(0.88);

/// Residual value after `years` of ownership: 20% depreciation in the
/// first year, 12% each year after, rounded to whole dollars.
pub fn estimate_residual(msrp: Money, years: u32) -> Money {
    let mut value = msrp;
    for year in 1..=years {
        value *= if year == 1 {
            FIRST_YEAR_RETENTION
        } else {
            LATER_YEAR_RETENTION
        };
    }
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .max(Decimal::ZERO)
}
