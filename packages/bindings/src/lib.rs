use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use autolend_core::offers::{default_catalog, Lender};
use autolend_core::rules::RuleConfig;
use autolend_core::types::{BorrowerProfile, LoanConfig};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Config + borrower request shared by the underwriting entry points.
#[derive(Deserialize)]
struct ApplicationRequest {
    config: LoanConfig,
    borrower: BorrowerProfile,
    #[serde(default)]
    lenders: Option<Vec<Lender>>,
    #[serde(default)]
    rules: Option<RuleConfig>,
}

// ---------------------------------------------------------------------------
// Loan math
// ---------------------------------------------------------------------------

#[napi]
pub fn loan_summary(input_json: String) -> NapiResult<String> {
    let cfg: LoanConfig = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    cfg.validate().map_err(to_napi_error)?;
    let output = autolend_core::loan::compute_summary(&cfg);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let cfg: LoanConfig = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    cfg.validate().map_err(to_napi_error)?;
    let output = autolend_core::loan::build_amortization(&cfg);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Underwriting
// ---------------------------------------------------------------------------

#[napi]
pub fn loan_features(input_json: String) -> NapiResult<String> {
    let request: ApplicationRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    request.config.validate().map_err(to_napi_error)?;
    request.borrower.validate().map_err(to_napi_error)?;
    let output = autolend_core::features::compute_features(&request.config, &request.borrower);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn score_reference(input_json: String) -> NapiResult<String> {
    let request: ApplicationRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    request.config.validate().map_err(to_napi_error)?;
    request.borrower.validate().map_err(to_napi_error)?;
    let features = autolend_core::features::compute_features(&request.config, &request.borrower);
    let inputs =
        autolend_core::risk::RiskInputs::new(&features, &request.config, &request.borrower);
    let output = autolend_core::risk::reference_score(&inputs);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn underwrite(input_json: String) -> NapiResult<String> {
    let request: ApplicationRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    request.config.validate().map_err(to_napi_error)?;
    request.borrower.validate().map_err(to_napi_error)?;
    let features = autolend_core::features::compute_features(&request.config, &request.borrower);
    let inputs =
        autolend_core::risk::RiskInputs::new(&features, &request.config, &request.borrower);
    let risk = autolend_core::risk::reference_score(&inputs);
    let rules = request.rules.unwrap_or_default();
    let output = autolend_core::rules::apply_rules(&features, &request.borrower, &risk, &rules);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn lender_offers(input_json: String) -> NapiResult<String> {
    let request: ApplicationRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    request.config.validate().map_err(to_napi_error)?;
    request.borrower.validate().map_err(to_napi_error)?;
    let features = autolend_core::features::compute_features(&request.config, &request.borrower);
    let inputs =
        autolend_core::risk::RiskInputs::new(&features, &request.config, &request.borrower);
    let risk = autolend_core::risk::reference_score(&inputs);
    let lenders = request.lenders.unwrap_or_else(default_catalog);
    let output = autolend_core::offers::lender_offers(&request.config, &features, &risk, &lenders);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn evaluate_application(input_json: String) -> NapiResult<String> {
    let request: ApplicationRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let lenders = request.lenders.unwrap_or_else(default_catalog);
    let rules = request.rules.unwrap_or_default();
    let output = autolend_core::pipeline::evaluate_with_reference(
        &request.config,
        &request.borrower,
        &lenders,
        &rules,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Presets and ownership economics
// ---------------------------------------------------------------------------

#[napi]
pub fn tax_preset(state: String) -> NapiResult<String> {
    let output = autolend_core::tax::preset_for_state(&state);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn tco_per_month(input_json: String) -> NapiResult<String> {
    let inputs: autolend_core::ownership::TcoInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = autolend_core::ownership::estimate_tco_per_month(&inputs);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn residual_value(msrp_json: String, years: u32) -> NapiResult<String> {
    let msrp: rust_decimal::Decimal = serde_json::from_str(&msrp_json).map_err(to_napi_error)?;
    let output = autolend_core::ownership::estimate_residual(msrp, years);
    serde_json::to_string(&output).map_err(to_napi_error)
}
