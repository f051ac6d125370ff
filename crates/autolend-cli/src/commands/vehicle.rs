use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use autolend_core::ownership::{estimate_residual, estimate_tco_per_month, TcoInputs};
use autolend_core::tax::preset_for_state;

/// Arguments for the state tax-preset lookup
#[derive(Args)]
pub struct TaxPresetArgs {
    /// Two-letter state code
    pub state: String,
}

/// Arguments for the monthly total-cost-of-ownership estimate
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct TcoArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Annual mileage
    #[arg(long, default_value = "0")]
    pub miles_per_year: Decimal,

    /// Fuel economy, miles per gallon
    #[arg(long)]
    pub mpg: Option<Decimal>,

    /// Fuel price per gallon
    #[arg(long)]
    pub fuel_price: Option<Decimal>,

    /// Monthly insurance premium
    #[arg(long)]
    pub insurance: Option<Decimal>,

    /// Monthly maintenance budget
    #[arg(long)]
    pub maintenance: Option<Decimal>,
}

/// Arguments for the residual-value estimate
#[derive(Args)]
pub struct ResidualArgs {
    /// Vehicle MSRP
    #[arg(long)]
    pub msrp: Decimal,

    /// Years of ownership
    #[arg(long)]
    pub years: u32,
}

pub fn run_tax_preset(args: TaxPresetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    match preset_for_state(&args.state) {
        Some(preset) => Ok(serde_json::to_value(preset)?),
        None => Err(format!("No tax preset for state '{}'", args.state.trim()).into()),
    }
}

pub fn run_tco(args: TcoArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: TcoInputs = if let Some(ref path) = args.input {
        crate::input::read_json(path)?
    } else {
        TcoInputs {
            miles_per_year: args.miles_per_year,
            mpg: args.mpg,
            fuel_price: args.fuel_price,
            insurance_per_month: args.insurance,
            maint_per_month: args.maintenance,
        }
    };
    let monthly = estimate_tco_per_month(&inputs);
    Ok(serde_json::json!({ "monthly_cost": monthly }))
}

pub fn run_residual(args: ResidualArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let value = estimate_residual(args.msrp, args.years);
    Ok(serde_json::json!({ "residual_value": value }))
}
