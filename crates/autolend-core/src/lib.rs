//! Auto-loan affordability and underwriting decision pipeline.
//!
//! Deterministic loan math feeds a feature extractor, a risk-scoring
//! stage, a rule-based underwriting gate, and a lender-offer pricing
//! engine, composed into one evaluation per (config, borrower) pair.

pub mod error;
pub mod features;
pub mod loan;
pub mod offers;
pub mod ownership;
pub mod pipeline;
pub mod risk;
pub mod rules;
pub mod tax;
pub mod types;

pub use error::AutoLendError;
pub use types::*;

/// Standard result type for all autolend operations
pub type AutoLendResult<T> = Result<T, AutoLendError>;
