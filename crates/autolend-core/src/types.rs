use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AutoLendError;
use crate::AutoLendResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as percentages (6.5 = 6.5%) unless a field says otherwise.
pub type Rate = Decimal;

/// Which part of the vehicle price is taxable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxRule {
    /// Trade-in value reduces the taxable base (most US states).
    #[default]
    #[serde(rename = "price_minus_tradein")]
    PriceMinusTradeIn,
    /// Full vehicle price is taxed regardless of trade-in.
    #[serde(rename = "price_full")]
    PriceFull,
}

/// Upfront vs financed split for fees or extras.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Paid at signing, never financed.
    pub upfront: Money,
    /// Rolled into the financed principal.
    pub financed: Money,
}

/// One loan configuration. Immutable per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanConfig {
    pub price: Money,
    pub down: Money,
    pub trade_in: Money,
    /// Outstanding balance on the trade-in, added back to the principal.
    pub trade_in_payoff: Money,
    /// Annual percentage rate, as a percent (6.5 = 6.5%).
    pub apr: Rate,
    pub term_months: u32,
    /// Sales tax rate, as a percent.
    pub tax_rate: Rate,
    pub tax_rule: TaxRule,
    pub fees: FeeSchedule,
    pub extras: FeeSchedule,
}

/// Income and debt profile of the applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerProfile {
    /// Gross monthly income.
    pub monthly_income: Money,
    /// Rent or mortgage payment.
    pub housing_cost: Money,
    /// Credit cards, student loans, other recurring obligations.
    pub other_debt: Money,
    /// Two-letter state code, used only for tax preset lookup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

fn require_non_negative(field: &str, value: Decimal) -> AutoLendResult<()> {
    if value < Decimal::ZERO {
        return Err(AutoLendError::InvalidInput {
            field: field.into(),
            reason: "Must be non-negative.".into(),
        });
    }
    Ok(())
}

impl LoanConfig {
    /// Reject malformed configs before they enter the pipeline.
    pub fn validate(&self) -> AutoLendResult<()> {
        if self.term_months == 0 {
            return Err(AutoLendError::InvalidInput {
                field: "term_months".into(),
                reason: "Term must be at least one month.".into(),
            });
        }
        require_non_negative("price", self.price)?;
        require_non_negative("down", self.down)?;
        require_non_negative("trade_in", self.trade_in)?;
        require_non_negative("trade_in_payoff", self.trade_in_payoff)?;
        require_non_negative("apr", self.apr)?;
        require_non_negative("tax_rate", self.tax_rate)?;
        require_non_negative("fees.upfront", self.fees.upfront)?;
        require_non_negative("fees.financed", self.fees.financed)?;
        require_non_negative("extras.upfront", self.extras.upfront)?;
        require_non_negative("extras.financed", self.extras.financed)?;
        Ok(())
    }
}

impl BorrowerProfile {
    pub fn validate(&self) -> AutoLendResult<()> {
        require_non_negative("monthly_income", self.monthly_income)?;
        require_non_negative("housing_cost", self.housing_cost)?;
        require_non_negative("other_debt", self.other_debt)?;
        Ok(())
    }
}
