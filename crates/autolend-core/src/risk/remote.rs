//! Remote scoring over HTTP. POSTs the model inputs as JSON and maps every
//! failure mode to a typed error — an unreachable or misbehaving service
//! aborts the evaluation rather than degrading into a guessed score.

use std::time::Duration;

use reqwest::Client;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{RiskInputs, RiskScore, RiskScorer};
use crate::error::AutoLendError;
use crate::AutoLendResult;

/// Bound on one scoring request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct ScoreRequest {
    ltv: f64,
    dti: f64,
    /// Decimal form (0.065), never percent.
    apr: f64,
    #[serde(rename = "termMonths")]
    term_months: u32,
    income: f64,
}

#[derive(Deserialize)]
struct ScoreResponse {
    pd: f64,
    confidence: f64,
    #[serde(rename = "modelVersion")]
    model_version: String,
}

/// HTTP-backed scorer. Retries exactly once on transport failures or
/// timeouts; HTTP-status and malformed-payload failures are deterministic
/// and surface immediately.
#[derive(Debug, Clone)]
pub struct RemoteScorer {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl RemoteScorer {
    pub fn new(endpoint: impl Into<String>) -> AutoLendResult<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> AutoLendResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AutoLendError::RiskUnreachable(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    async fn post_once(&self, request: &ScoreRequest) -> AutoLendResult<RiskScore> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(AutoLendError::RiskService {
                status: status.as_u16(),
                message: service_message(&body, status.as_u16()),
            });
        }
        parse_score_body(&body)
    }

    fn map_transport_error(&self, e: reqwest::Error) -> AutoLendError {
        if e.is_timeout() {
            AutoLendError::RiskTimeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            AutoLendError::RiskUnreachable(e.to_string())
        }
    }
}

impl RiskScorer for RemoteScorer {
    async fn score(&self, inputs: &RiskInputs) -> AutoLendResult<RiskScore> {
        let request = ScoreRequest {
            ltv: to_wire(inputs.ltv),
            dti: to_wire(inputs.dti),
            apr: to_wire(inputs.apr),
            term_months: inputs.term_months,
            income: to_wire(inputs.income),
        };

        match self.post_once(&request).await {
            Err(e) if matches!(e, AutoLendError::RiskTimeout { .. } | AutoLendError::RiskUnreachable(_)) => {
                self.post_once(&request).await
            }
            other => other,
        }
    }
}

fn to_wire(x: Decimal) -> f64 {
    x.to_f64().unwrap_or(0.0)
}

/// Prefer a server-provided `{"error": "..."}` message, fall back to the
/// raw body, then to the bare status.
fn service_message(body: &str, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("error").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        trimmed.to_string()
    }
}

/// Parse a 2xx body into a domain score. Partial or out-of-range payloads
/// are malformed, never a valid score.
fn parse_score_body(body: &str) -> AutoLendResult<RiskScore> {
    let parsed: ScoreResponse = serde_json::from_str(body)
        .map_err(|e| AutoLendError::MalformedRiskResponse(e.to_string()))?;

    let pd = probability("pd", parsed.pd)?;
    let confidence = probability("confidence", parsed.confidence)?;

    Ok(RiskScore {
        pd,
        confidence,
        model_version: parsed.model_version,
    })
}

fn probability(field: &str, value: f64) -> AutoLendResult<Decimal> {
    if !(0.0..=1.0).contains(&value) {
        return Err(AutoLendError::MalformedRiskResponse(format!(
            "{field} {value} outside [0, 1]"
        )));
    }
    Decimal::from_f64_retain(value)
        .ok_or_else(|| AutoLendError::MalformedRiskResponse(format!("{field} is not a number")))
}
