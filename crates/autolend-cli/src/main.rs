mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{AmortizeArgs, SummaryArgs};
use commands::offers::{EvaluateArgs, OffersArgs};
use commands::underwriting::{FeaturesArgs, RulesArgs, ScoreArgs};
use commands::vehicle::{ResidualArgs, TaxPresetArgs, TcoArgs};

/// Auto-loan affordability and underwriting calculations
#[derive(Parser)]
#[command(
    name = "alc",
    version,
    about = "Auto-loan affordability and underwriting calculations",
    long_about = "A CLI for the auto-loan decision pipeline: sales tax, financed \
                  principal, amortization schedules, underwriting features, risk \
                  scoring, rule-based decisions, and ranked lender offers."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Lifetime loan summary: payment, interest, total cost, tax
    Summary(SummaryArgs),
    /// Month-by-month amortization schedule
    Amortize(AmortizeArgs),
    /// Underwriting features (LTV, DTI, payment) for a config + borrower
    Features(FeaturesArgs),
    /// Probability-of-default score for a config + borrower
    Score(ScoreArgs),
    /// Apply the underwriting rule gate
    Rules(RulesArgs),
    /// Price and rank lender offers
    Offers(OffersArgs),
    /// Run the full evaluation pipeline
    Evaluate(EvaluateArgs),
    /// Look up the sales-tax preset for a state
    TaxPreset(TaxPresetArgs),
    /// Estimate monthly total cost of ownership
    Tco(TcoArgs),
    /// Estimate residual value after N years
    Residual(ResidualArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Summary(args) => commands::loan::run_summary(args),
        Commands::Amortize(args) => commands::loan::run_amortize(args),
        Commands::Features(args) => commands::underwriting::run_features(args),
        Commands::Score(args) => commands::underwriting::run_score(args).await,
        Commands::Rules(args) => commands::underwriting::run_rules(args).await,
        Commands::Offers(args) => commands::offers::run_offers(args).await,
        Commands::Evaluate(args) => commands::offers::run_evaluate(args).await,
        Commands::TaxPreset(args) => commands::vehicle::run_tax_preset(args),
        Commands::Tco(args) => commands::vehicle::run_tco(args),
        Commands::Residual(args) => commands::vehicle::run_residual(args),
        Commands::Version => {
            println!("alc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
