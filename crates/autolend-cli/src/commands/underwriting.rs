use clap::Args;
use serde_json::Value;

use autolend_core::features::compute_features;
use autolend_core::risk::{RiskInputs, RiskScorer};
use autolend_core::rules::apply_rules;

use super::common::{
    resolve_application, BorrowerArgs, LoanConfigArgs, RuleArgs, ScorerArgs,
};

/// Arguments for feature extraction
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FeaturesArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub config: LoanConfigArgs,

    #[command(flatten)]
    pub borrower: BorrowerArgs,
}

/// Arguments for risk scoring
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScoreArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub config: LoanConfigArgs,

    #[command(flatten)]
    pub borrower: BorrowerArgs,

    #[command(flatten)]
    pub scorer: ScorerArgs,
}

/// Arguments for the underwriting rule gate
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RulesArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub config: LoanConfigArgs,

    #[command(flatten)]
    pub borrower: BorrowerArgs,

    #[command(flatten)]
    pub rules: RuleArgs,

    #[command(flatten)]
    pub scorer: ScorerArgs,
}

pub fn run_features(args: FeaturesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let app = resolve_application(&args.input, &args.config, &args.borrower)?;
    let features = compute_features(&app.config, &app.borrower);
    Ok(serde_json::to_value(features)?)
}

pub async fn run_score(args: ScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let app = resolve_application(&args.input, &args.config, &args.borrower)?;
    let scorer = args.scorer.resolve()?;

    let features = compute_features(&app.config, &app.borrower);
    let inputs = RiskInputs::new(&features, &app.config, &app.borrower);
    let score = scorer.score(&inputs).await?;
    Ok(serde_json::to_value(score)?)
}

pub async fn run_rules(args: RulesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let app = resolve_application(&args.input, &args.config, &args.borrower)?;
    let scorer = args.scorer.resolve()?;
    let rules = args.rules.resolve(app.rules);

    let features = compute_features(&app.config, &app.borrower);
    let inputs = RiskInputs::new(&features, &app.config, &app.borrower);
    let risk = scorer.score(&inputs).await?;
    let result = apply_rules(&features, &app.borrower, &risk, &rules);
    Ok(serde_json::to_value(result)?)
}
