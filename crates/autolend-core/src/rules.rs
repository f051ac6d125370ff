//! Rule-based underwriting gate. Four independent hard thresholds; every
//! gate is evaluated on every call so a decline reports all of its reasons
//! at once. Declines are data, not errors.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::features::Features;
use crate::risk::RiskScore;
use crate::types::{BorrowerProfile, Money, Rate};

/// Hard eligibility thresholds. Injectable; defaults match the desk policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub max_ltv: Rate,
    pub max_dti: Rate,
    pub min_income: Money,
    pub max_pd: Rate,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            max_ltv: dec!(1.25),
            max_dti: dec!(0.50),
            min_income: dec!(2000),
            max_pd: dec!(0.35),
        }
    }
}

/// Which gate was breached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCode {
    MaxLtv,
    MaxDti,
    MinIncome,
    MaxPd,
}

impl std::fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationCode::MaxLtv => write!(f, "MAX_LTV"),
            ViolationCode::MaxDti => write!(f, "MAX_DTI"),
            ViolationCode::MinIncome => write!(f, "MIN_INCOME"),
            ViolationCode::MaxPd => write!(f, "MAX_PD"),
        }
    }
}

/// One breached gate with a human-readable explanation carrying the
/// offending value and the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    pub code: ViolationCode,
    pub message: String,
}

/// Outcome of the underwriting gate. Violations are empty iff approved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub approved: bool,
    pub violations: Vec<RuleViolation>,
}

/// Evaluate all four gates, in order: LTV, DTI, income, PD.
pub fn apply_rules(
    features: &Features,
    borrower: &BorrowerProfile,
    risk: &RiskScore,
    rules: &RuleConfig,
) -> RuleResult {
    let mut violations = Vec::new();

    if features.ltv > rules.max_ltv {
        violations.push(RuleViolation {
            code: ViolationCode::MaxLtv,
            message: format!(
                "LTV {} exceeds {}",
                fmt_pct(features.ltv),
                fmt_pct(rules.max_ltv)
            ),
        });
    }
    if features.dti > rules.max_dti {
        violations.push(RuleViolation {
            code: ViolationCode::MaxDti,
            message: format!(
                "DTI {} exceeds {}",
                fmt_pct(features.dti),
                fmt_pct(rules.max_dti)
            ),
        });
    }
    if borrower.monthly_income < rules.min_income {
        violations.push(RuleViolation {
            code: ViolationCode::MinIncome,
            message: format!(
                "Income {} below {}",
                fmt_usd(borrower.monthly_income),
                fmt_usd(rules.min_income)
            ),
        });
    }
    if risk.pd > rules.max_pd {
        violations.push(RuleViolation {
            code: ViolationCode::MaxPd,
            message: format!("PD {} exceeds {}", fmt_pct(risk.pd), fmt_pct(rules.max_pd)),
        });
    }

    RuleResult {
        approved: violations.is_empty(),
        violations,
    }
}

/// Ratio → "104.5%" (one decimal).
fn fmt_pct(x: Decimal) -> String {
    format!("{:.1}%", x * dec!(100))
}

/// Amount → "$2000" (whole dollars).
fn fmt_usd(x: Decimal) -> String {
    format!("${:.0}", x)
}
