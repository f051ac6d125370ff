use clap::Args;
use serde_json::Value;

use autolend_core::loan::{build_amortization, compute_summary};

use super::common::{resolve_config, LoanConfigArgs};

/// Arguments for the lifetime loan summary
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SummaryArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub config: LoanConfigArgs,
}

/// Arguments for the amortization schedule
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AmortizeArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub config: LoanConfigArgs,
}

pub fn run_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cfg = resolve_config(&args.input, &args.config)?;
    let summary = compute_summary(&cfg);
    Ok(serde_json::to_value(summary)?)
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cfg = resolve_config(&args.input, &args.config)?;
    let rows = build_amortization(&cfg);
    Ok(serde_json::to_value(rows)?)
}
