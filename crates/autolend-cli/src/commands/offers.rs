use clap::Args;
use serde_json::Value;

use autolend_core::pipeline::{evaluate_application, fetch_offers};

use super::common::{
    resolve_application, resolve_lenders, BorrowerArgs, LoanConfigArgs, RuleArgs, ScorerArgs,
};

/// Arguments for pricing and ranking lender offers
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct OffersArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON lender catalog (defaults to the demo catalog)
    #[arg(long)]
    pub lenders: Option<String>,

    #[command(flatten)]
    pub config: LoanConfigArgs,

    #[command(flatten)]
    pub borrower: BorrowerArgs,

    #[command(flatten)]
    pub scorer: ScorerArgs,
}

/// Arguments for the full evaluation pipeline
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EvaluateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON lender catalog (defaults to the demo catalog)
    #[arg(long)]
    pub lenders: Option<String>,

    #[command(flatten)]
    pub config: LoanConfigArgs,

    #[command(flatten)]
    pub borrower: BorrowerArgs,

    #[command(flatten)]
    pub rules: RuleArgs,

    #[command(flatten)]
    pub scorer: ScorerArgs,
}

pub async fn run_offers(args: OffersArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let app = resolve_application(&args.input, &args.config, &args.borrower)?;
    let lenders = resolve_lenders(&args.lenders, app.lenders)?;
    let scorer = args.scorer.resolve()?;

    let offers = fetch_offers(&app.config, &app.borrower, &lenders, &scorer).await?;
    Ok(serde_json::to_value(offers)?)
}

pub async fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let app = resolve_application(&args.input, &args.config, &args.borrower)?;
    let lenders = resolve_lenders(&args.lenders, app.lenders)?;
    let rules = args.rules.resolve(app.rules);
    let scorer = args.scorer.resolve()?;

    let result =
        evaluate_application(&app.config, &app.borrower, &lenders, &rules, &scorer).await?;
    Ok(serde_json::to_value(result)?)
}
