//! Underwriting feature extraction: loan-to-value and debt-to-income
//! derived from a loan config plus a borrower profile. Pure functions of
//! their inputs; recomputed whenever inputs change, never cached.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::loan::{compute_financed_amount, compute_payment, compute_sales_tax};
use crate::types::{BorrowerProfile, LoanConfig, Money, Rate};

/// Derived underwriting features for one (config, borrower) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Features {
    /// Financed amount / vehicle price (price floored at 1).
    pub ltv: Rate,
    /// (Other debt + housing + new payment) / income (income floored at 1).
    pub dti: Rate,
    /// Computed monthly payment for the config.
    pub payment: Money,
    /// Principal financed.
    pub financed_amount: Money,
}

/// Affordability threshold for the convenience flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityThresholds {
    pub max_dti: Rate,
}

impl Default for AffordabilityThresholds {
    fn default() -> Self {
        Self { max_dti: dec!(0.45) }
    }
}

/// Derive LTV, DTI, payment, and financed amount.
///
/// Divisors are floored at 1 so degenerate inputs (free car, zero income)
/// yield large-but-finite ratios instead of a division by zero.
pub fn compute_features(cfg: &LoanConfig, borrower: &BorrowerProfile) -> Features {
    let tax = compute_sales_tax(cfg);
    let financed_amount = compute_financed_amount(cfg, Some(tax));
    let payment = compute_payment(cfg, Some(financed_amount));

    let vehicle_price = cfg.price.max(Decimal::ONE);
    let ltv = financed_amount / vehicle_price;

    let monthly_debt_load = borrower.other_debt + borrower.housing_cost + payment;
    let income = borrower.monthly_income.max(Decimal::ONE);
    let dti = monthly_debt_load / income;

    Features {
        ltv,
        dti,
        payment,
        financed_amount,
    }
}

/// Coarse yes/no affordability flag based on DTI alone.
pub fn is_affordable(features: &Features, thresholds: AffordabilityThresholds) -> bool {
    features.dti <= thresholds.max_dti
}
