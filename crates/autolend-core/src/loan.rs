//! Loan math engine: sales tax, financed principal, annuity payment,
//! amortization schedule, and lifetime summary.
//!
//! All operations are pure and deterministic. Every monetary result is
//! rounded to cents (half away from zero) as soon as it is produced, so
//! rounding drift cannot accumulate across derived values. The schedule
//! absorbs whatever drift remains into the final period's principal.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{LoanConfig, Money, TaxRule};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Round to cents, half away from zero.
pub(crate) fn round2(x: Decimal) -> Decimal {
    x.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A single month in the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortRow {
    /// 1-based month index.
    pub period: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    /// Balance after this period's principal is applied.
    pub balance: Money,
}

/// Lifetime view of a loan configuration. Derived, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub payment: Money,
    pub total_interest: Money,
    /// Down + upfront fees/extras + all payments over the life of the loan.
    pub total_cost: Money,
    /// Principal actually financed.
    pub financed_amount: Money,
    pub sales_tax: Money,
}

// ---------------------------------------------------------------------------
// Core operations
// ---------------------------------------------------------------------------

/// Sales tax on the taxable base selected by the config's tax rule.
pub fn compute_sales_tax(cfg: &LoanConfig) -> Money {
    let taxable_base = match cfg.tax_rule {
        TaxRule::PriceMinusTradeIn => (cfg.price - cfg.trade_in).max(Decimal::ZERO),
        TaxRule::PriceFull => cfg.price,
    };
    round2(taxable_base * cfg.tax_rate / PERCENT)
}

/// Principal financed: price less cash and trade-in equity, plus tax,
/// financed fees/extras, and the trade-in payoff balance.
///
/// Floored at zero — negative equity cannot produce a negative principal.
/// Pass `sales_tax` to reuse an already-computed tax amount.
pub fn compute_financed_amount(cfg: &LoanConfig, sales_tax: Option<Money>) -> Money {
    let tax = sales_tax.unwrap_or_else(|| compute_sales_tax(cfg));
    let principal = cfg.price - cfg.down - cfg.trade_in
        + tax
        + cfg.fees.financed
        + cfg.extras.financed
        - cfg.trade_in_payoff;
    round2(principal).max(Decimal::ZERO)
}

/// Standard amortizing-loan monthly payment.
///
/// Zero-rate loans pay principal / term. A non-positive term yields a zero
/// payment; callers are expected to have validated the config already.
pub fn compute_payment(cfg: &LoanConfig, financed_amount: Option<Money>) -> Money {
    let pv = financed_amount.unwrap_or_else(|| compute_financed_amount(cfg, None));
    if cfg.term_months == 0 {
        return Decimal::ZERO;
    }
    let n = Decimal::from(cfg.term_months);
    let r = monthly_rate(cfg);
    if r.is_zero() {
        return round2(pv / n);
    }
    // pmt = r·PV / (1 − (1+r)^−n), computed as PV·r·g / (g − 1) with
    // g = (1+r)^n to stay in positive exponents.
    let growth = (Decimal::ONE + r).powi(cfg.term_months as i64);
    round2(pv * r * growth / (growth - Decimal::ONE))
}

/// Month-by-month breakdown of payments into interest and principal.
///
/// The final period's principal is forced to the remaining balance, so the
/// schedule terminates at exactly zero regardless of accumulated rounding.
/// That final row's payment may differ by a few cents from the nominal
/// annuity payment.
pub fn build_amortization(cfg: &LoanConfig) -> Vec<AmortRow> {
    let tax = compute_sales_tax(cfg);
    let pv = compute_financed_amount(cfg, Some(tax));
    let pmt = compute_payment(cfg, Some(pv));
    let r = monthly_rate(cfg);

    let mut rows = Vec::with_capacity(cfg.term_months as usize);
    let mut balance = pv;

    for period in 1..=cfg.term_months {
        let interest = round2(balance * r);
        let principal = if period == cfg.term_months {
            round2(balance)
        } else {
            round2(pmt - interest)
        };
        let payment = round2(principal + interest);
        balance = round2(balance - principal);
        rows.push(AmortRow {
            period,
            payment,
            interest,
            principal,
            balance,
        });
    }
    rows
}

/// Lifetime summary for a config.
///
/// Total cost uses the nominal annuity total (payment × term), not the sum
/// of schedule rows — the drift-corrected final row is a display concern of
/// the schedule only. The two figures may differ by a few cents.
pub fn compute_summary(cfg: &LoanConfig) -> LoanSummary {
    let tax = compute_sales_tax(cfg);
    let pv = compute_financed_amount(cfg, Some(tax));
    let pmt = compute_payment(cfg, Some(pv));
    let rows = build_amortization(cfg);

    let total_interest = round2(rows.iter().map(|row| row.interest).sum());
    let total_payments = round2(pmt * Decimal::from(cfg.term_months));
    let total_cost = round2(cfg.down + cfg.fees.upfront + cfg.extras.upfront + total_payments);

    LoanSummary {
        payment: pmt,
        total_interest,
        total_cost,
        financed_amount: pv,
        sales_tax: tax,
    }
}

fn monthly_rate(cfg: &LoanConfig) -> Decimal {
    cfg.apr / PERCENT / MONTHS_PER_YEAR
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
