use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoLendError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Risk service returned {status}: {message}")]
    RiskService { status: u16, message: String },

    #[error("Risk scoring timed out after {seconds}s")]
    RiskTimeout { seconds: u64 },

    #[error("Risk service unreachable: {0}")]
    RiskUnreachable(String),

    #[error("Malformed risk response: {0}")]
    MalformedRiskResponse(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl AutoLendError {
    /// True for every failure of the risk-scoring stage: the evaluation
    /// aborted without a score and the caller keeps its last-known-good
    /// result.
    pub fn is_risk_unavailable(&self) -> bool {
        matches!(
            self,
            AutoLendError::RiskService { .. }
                | AutoLendError::RiskTimeout { .. }
                | AutoLendError::RiskUnreachable(_)
                | AutoLendError::MalformedRiskResponse(_)
        )
    }
}

impl From<serde_json::Error> for AutoLendError {
    fn from(e: serde_json::Error) -> Self {
        AutoLendError::SerializationError(e.to_string())
    }
}
