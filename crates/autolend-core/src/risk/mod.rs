//! Risk scoring stage: maps underwriting features to a probability of
//! default and a confidence value.
//!
//! The scorer is a capability: one async operation behind the
//! [`RiskScorer`] trait, with a local deterministic implementation
//! ([`ReferenceScorer`]) and, behind the `remote-scoring` feature, an HTTP
//! implementation ([`remote::RemoteScorer`]). The pipeline treats both
//! identically. A failed score aborts the evaluation — it is never
//! replaced by a fabricated value.

use std::future::Future;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::features::Features;
use crate::types::{BorrowerProfile, LoanConfig, Money, Rate};
use crate::AutoLendResult;

pub mod local;
#[cfg(feature = "remote-scoring")]
pub mod remote;

pub use local::{reference_score, ReferenceScorer};
#[cfg(feature = "remote-scoring")]
pub use remote::RemoteScorer;

/// Output of one scoring call. Produced per evaluation, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    /// Probability of default, 0..1.
    pub pd: Decimal,
    /// Model confidence in the estimate, 0..1.
    pub confidence: Decimal,
    /// Identifies the scoring policy that produced this estimate.
    pub model_version: String,
}

/// What the scoring model sees. APR is carried in decimal form (0.065),
/// not percent, regardless of how the config expressed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskInputs {
    pub ltv: Rate,
    pub dti: Rate,
    pub apr: Rate,
    pub term_months: u32,
    pub income: Money,
}

impl RiskInputs {
    /// Assemble model inputs from the feature vector plus loan terms and
    /// borrower income. Config APRs above 1 are treated as percent and
    /// converted; values at or below 1 are assumed to already be decimal.
    pub fn new(features: &Features, cfg: &LoanConfig, borrower: &BorrowerProfile) -> Self {
        let apr = if cfg.apr > Decimal::ONE {
            cfg.apr / Decimal::from(100)
        } else {
            cfg.apr
        };
        Self {
            ltv: features.ltv,
            dti: features.dti,
            apr,
            term_months: cfg.term_months,
            income: borrower.monthly_income,
        }
    }
}

/// A probability-of-default model, local or remote.
pub trait RiskScorer {
    /// Score one set of inputs. Errors abort the evaluation for this
    /// request; callers decide retry policy beyond what the
    /// implementation documents.
    fn score(
        &self,
        inputs: &RiskInputs,
    ) -> impl Future<Output = AutoLendResult<RiskScore>> + Send;
}
