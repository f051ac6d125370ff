//! Evaluation pipeline: features → risk → rules → offers, one atomic
//! result per (config, borrower) pair.
//!
//! Every stage is a pure function over the previous stage's output; only
//! the risk call may suspend. A declined application is a successful
//! evaluation with an empty offer list; a risk-stage failure aborts the
//! whole call and leaves any previous result with the caller untouched.

use serde::{Deserialize, Serialize};

use crate::features::{compute_features, Features};
use crate::offers::{lender_offers, Lender, Offer};
use crate::risk::{reference_score, RiskInputs, RiskScore, RiskScorer};
use crate::rules::{apply_rules, RuleConfig, RuleResult};
use crate::types::{BorrowerProfile, LoanConfig};
use crate::AutoLendResult;

/// The aggregate outcome of one pipeline run — the sole output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub features: Features,
    pub risk: RiskScore,
    pub rules: RuleResult,
    /// Empty when declined; otherwise exactly the offer engine's ranking.
    pub offers: Vec<Offer>,
}

/// Run the full pipeline with the supplied scorer.
///
/// Inputs are validated before any stage runs. Stages execute strictly in
/// order — features, risk, rules, offers — because each consumes the
/// previous stage's output. Declined applications still report features
/// and risk; only offers are withheld.
pub async fn evaluate_application<S: RiskScorer>(
    cfg: &LoanConfig,
    borrower: &BorrowerProfile,
    lenders: &[Lender],
    rules: &RuleConfig,
    scorer: &S,
) -> AutoLendResult<EvaluationResult> {
    cfg.validate()?;
    borrower.validate()?;

    let features = compute_features(cfg, borrower);
    let inputs = RiskInputs::new(&features, cfg, borrower);
    let risk = scorer.score(&inputs).await?;

    Ok(assemble(cfg, borrower, features, risk, lenders, rules))
}

/// Synchronous evaluation against the built-in reference scorer. Useful
/// where an async runtime is unavailable (bindings) or determinism is
/// wanted (tests).
pub fn evaluate_with_reference(
    cfg: &LoanConfig,
    borrower: &BorrowerProfile,
    lenders: &[Lender],
    rules: &RuleConfig,
) -> AutoLendResult<EvaluationResult> {
    cfg.validate()?;
    borrower.validate()?;

    let features = compute_features(cfg, borrower);
    let inputs = RiskInputs::new(&features, cfg, borrower);
    let risk = reference_score(&inputs);

    Ok(assemble(cfg, borrower, features, risk, lenders, rules))
}

/// Aggregator path: features → risk → priced offers, skipping the rule
/// gate. Mirrors a lender-marketplace quote call where underwriting
/// happens on the lender side.
pub async fn fetch_offers<S: RiskScorer>(
    cfg: &LoanConfig,
    borrower: &BorrowerProfile,
    lenders: &[Lender],
    scorer: &S,
) -> AutoLendResult<Vec<Offer>> {
    cfg.validate()?;
    borrower.validate()?;

    let features = compute_features(cfg, borrower);
    let inputs = RiskInputs::new(&features, cfg, borrower);
    let risk = scorer.score(&inputs).await?;

    Ok(lender_offers(cfg, &features, &risk, lenders))
}

fn assemble(
    cfg: &LoanConfig,
    borrower: &BorrowerProfile,
    features: Features,
    risk: RiskScore,
    lenders: &[Lender],
    rules: &RuleConfig,
) -> EvaluationResult {
    let rule_result = apply_rules(&features, borrower, &risk, rules);
    let offers = if rule_result.approved {
        lender_offers(cfg, &features, &risk, lenders)
    } else {
        Vec::new()
    };
    EvaluationResult {
        features,
        risk,
        rules: rule_result,
        offers,
    }
}
