//! Reference scoring policy: a deterministic logistic stand-in for a real
//! probability-of-default model. The contract is the interesting part; the
//! policy itself is documented so it can be replaced wholesale.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use super::{RiskInputs, RiskScore, RiskScorer};
use crate::AutoLendResult;

/// Version tag reported by the reference policy.
pub const REFERENCE_MODEL_VERSION: &str = "reference-1";

const LTV_WEIGHT: Decimal = dec!(3.0);
const LTV_PIVOT: Decimal = dec!(0.9);
const LTV_WINDOW: Decimal = dec!(0.5);
const DTI_WEIGHT: Decimal = dec!(2.5);
const DTI_PIVOT: Decimal = dec!(0.35);
const DTI_WINDOW: Decimal = dec!(0.35);

const PD_FLOOR: Decimal = dec!(0.02);
const PD_CEILING: Decimal = dec!(0.60);
const CONFIDENCE_FLOOR: Decimal = dec!(0.20);
const CONFIDENCE_CEILING: Decimal = dec!(0.95);

/// `Decimal::exp` overflows for large arguments; the logistic output is
/// already saturated well inside ±20, so the score is unchanged.
const Z_LIMIT: Decimal = dec!(20);

/// Score one set of inputs with the reference policy.
///
/// z = 3.0·(ltv − 0.9) + 2.5·(dti − 0.35); pd = logistic(z) clamped to
/// [0.02, 0.60]. Confidence is the mean distance of LTV and DTI from
/// their pivots over fixed windows, clamped to [0.20, 0.95].
pub fn reference_score(inputs: &RiskInputs) -> RiskScore {
    let z = LTV_WEIGHT * (inputs.ltv - LTV_PIVOT) + DTI_WEIGHT * (inputs.dti - DTI_PIVOT);
    let pd = logistic(z.clamp(-Z_LIMIT, Z_LIMIT)).clamp(PD_FLOOR, PD_CEILING);

    let ltv_term = ((inputs.ltv - LTV_PIVOT).abs() / LTV_WINDOW).clamp(Decimal::ZERO, Decimal::ONE);
    let dti_term = ((inputs.dti - DTI_PIVOT).abs() / DTI_WINDOW).clamp(Decimal::ZERO, Decimal::ONE);
    let confidence =
        ((ltv_term + dti_term) / dec!(2)).clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING);

    RiskScore {
        pd,
        confidence,
        model_version: REFERENCE_MODEL_VERSION.into(),
    }
}

fn logistic(z: Decimal) -> Decimal {
    Decimal::ONE / (Decimal::ONE + (-z).exp())
}

/// Local deterministic scorer. Satisfies the async contract directly, with
/// no actual latency.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceScorer;

impl RiskScorer for ReferenceScorer {
    async fn score(&self, inputs: &RiskInputs) -> AutoLendResult<RiskScore> {
        Ok(reference_score(inputs))
    }
}
