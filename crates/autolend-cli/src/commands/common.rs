//! Shared argument groups and resolution helpers for the subcommands.
//!
//! Every command accepts either a `--input` JSON file (or piped stdin)
//! carrying the full request, or individual flags for ad-hoc use.

use std::time::Duration;

use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Deserialize;

use autolend_core::offers::{default_catalog, Lender};
use autolend_core::risk::{ReferenceScorer, RemoteScorer, RiskInputs, RiskScore, RiskScorer};
use autolend_core::rules::RuleConfig;
use autolend_core::types::{BorrowerProfile, FeeSchedule, LoanConfig, TaxRule};
use autolend_core::AutoLendResult;

use crate::input;

/// Full application request as carried by `--input` / stdin.
#[derive(Debug, Deserialize)]
pub struct ApplicationInput {
    pub config: LoanConfig,
    pub borrower: BorrowerProfile,
    #[serde(default)]
    pub lenders: Option<Vec<Lender>>,
    #[serde(default)]
    pub rules: Option<RuleConfig>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TaxRuleArg {
    PriceMinusTradein,
    PriceFull,
}

impl From<TaxRuleArg> for TaxRule {
    fn from(arg: TaxRuleArg) -> Self {
        match arg {
            TaxRuleArg::PriceMinusTradein => TaxRule::PriceMinusTradeIn,
            TaxRuleArg::PriceFull => TaxRule::PriceFull,
        }
    }
}

/// Loan configuration flags. Price, APR, and term are mandatory unless a
/// JSON input supplies the whole config.
#[derive(Args, Debug)]
pub struct LoanConfigArgs {
    /// Vehicle price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Cash down payment
    #[arg(long, default_value = "0")]
    pub down: Decimal,

    /// Trade-in value
    #[arg(long, default_value = "0")]
    pub trade_in: Decimal,

    /// Outstanding payoff balance on the trade-in
    #[arg(long, default_value = "0")]
    pub trade_in_payoff: Decimal,

    /// APR as a percent, e.g. 6.5
    #[arg(long)]
    pub apr: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Sales tax rate as a percent
    #[arg(long, default_value = "0")]
    pub tax_rate: Decimal,

    /// Which part of the price is taxable
    #[arg(long, value_enum, default_value = "price-minus-tradein")]
    pub tax_rule: TaxRuleArg,

    /// Fees paid at signing
    #[arg(long, default_value = "0")]
    pub fee_upfront: Decimal,

    /// Fees rolled into the financed amount
    #[arg(long, default_value = "0")]
    pub fee_financed: Decimal,

    /// Extras paid at signing
    #[arg(long, default_value = "0")]
    pub extra_upfront: Decimal,

    /// Extras rolled into the financed amount
    #[arg(long, default_value = "0")]
    pub extra_financed: Decimal,
}

impl LoanConfigArgs {
    pub fn resolve(&self) -> Result<LoanConfig, Box<dyn std::error::Error>> {
        Ok(LoanConfig {
            price: self.price.ok_or("--price is required (or provide --input)")?,
            down: self.down,
            trade_in: self.trade_in,
            trade_in_payoff: self.trade_in_payoff,
            apr: self.apr.ok_or("--apr is required (or provide --input)")?,
            term_months: self
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
            tax_rate: self.tax_rate,
            tax_rule: self.tax_rule.into(),
            fees: FeeSchedule {
                upfront: self.fee_upfront,
                financed: self.fee_financed,
            },
            extras: FeeSchedule {
                upfront: self.extra_upfront,
                financed: self.extra_financed,
            },
        })
    }
}

/// Borrower profile flags.
#[derive(Args, Debug)]
pub struct BorrowerArgs {
    /// Gross monthly income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Monthly rent or mortgage payment
    #[arg(long, default_value = "0")]
    pub housing: Decimal,

    /// Other recurring monthly debt
    #[arg(long, default_value = "0")]
    pub other_debt: Decimal,

    /// Two-letter state code
    #[arg(long)]
    pub state: Option<String>,
}

impl BorrowerArgs {
    pub fn resolve(&self) -> Result<BorrowerProfile, Box<dyn std::error::Error>> {
        Ok(BorrowerProfile {
            monthly_income: self
                .income
                .ok_or("--income is required (or provide --input)")?,
            housing_cost: self.housing,
            other_debt: self.other_debt,
            state: self.state.clone(),
        })
    }
}

/// Underwriting threshold overrides; unset flags keep the desk defaults.
#[derive(Args, Debug)]
pub struct RuleArgs {
    #[arg(long)]
    pub max_ltv: Option<Decimal>,
    #[arg(long)]
    pub max_dti: Option<Decimal>,
    #[arg(long)]
    pub min_income: Option<Decimal>,
    #[arg(long)]
    pub max_pd: Option<Decimal>,
}

impl RuleArgs {
    pub fn resolve(&self, base: Option<RuleConfig>) -> RuleConfig {
        let mut rules = base.unwrap_or_default();
        if let Some(v) = self.max_ltv {
            rules.max_ltv = v;
        }
        if let Some(v) = self.max_dti {
            rules.max_dti = v;
        }
        if let Some(v) = self.min_income {
            rules.min_income = v;
        }
        if let Some(v) = self.max_pd {
            rules.max_pd = v;
        }
        rules
    }
}

/// Risk scorer selection: local reference policy unless an endpoint is
/// given.
#[derive(Args, Debug)]
pub struct ScorerArgs {
    /// Remote risk service endpoint; omit to use the reference policy
    #[arg(long)]
    pub risk_url: Option<String>,

    /// Timeout for the remote risk call, seconds
    #[arg(long, default_value_t = 10)]
    pub risk_timeout_secs: u64,
}

impl ScorerArgs {
    pub fn resolve(&self) -> Result<ScorerChoice, Box<dyn std::error::Error>> {
        match &self.risk_url {
            Some(url) => Ok(ScorerChoice::Remote(RemoteScorer::with_timeout(
                url.clone(),
                Duration::from_secs(self.risk_timeout_secs),
            )?)),
            None => Ok(ScorerChoice::Reference(ReferenceScorer)),
        }
    }
}

/// Runtime-selected scorer behind the one trait the pipeline consumes.
pub enum ScorerChoice {
    Reference(ReferenceScorer),
    Remote(RemoteScorer),
}

impl RiskScorer for ScorerChoice {
    async fn score(&self, inputs: &RiskInputs) -> AutoLendResult<RiskScore> {
        match self {
            ScorerChoice::Reference(scorer) => scorer.score(inputs).await,
            ScorerChoice::Remote(scorer) => scorer.score(inputs).await,
        }
    }
}

/// Resolve a config from `--input`, piped stdin, or flags.
pub fn resolve_config(
    input_path: &Option<String>,
    flags: &LoanConfigArgs,
) -> Result<LoanConfig, Box<dyn std::error::Error>> {
    let cfg: LoanConfig = if let Some(path) = input_path {
        input::read_json(path)?
    } else if let Some(piped) = input::read_stdin()? {
        piped
    } else {
        flags.resolve()?
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve a full application (config + borrower + optional lenders and
/// rules) from `--input`, stdin, or flags.
pub fn resolve_application(
    input_path: &Option<String>,
    config_flags: &LoanConfigArgs,
    borrower_flags: &BorrowerArgs,
) -> Result<ApplicationInput, Box<dyn std::error::Error>> {
    let app: ApplicationInput = if let Some(path) = input_path {
        input::read_json(path)?
    } else if let Some(piped) = input::read_stdin()? {
        piped
    } else {
        ApplicationInput {
            config: config_flags.resolve()?,
            borrower: borrower_flags.resolve()?,
            lenders: None,
            rules: None,
        }
    };
    app.config.validate()?;
    app.borrower.validate()?;
    Ok(app)
}

/// Lender catalog: explicit file, else the shipped demo catalog.
pub fn resolve_lenders(
    path: &Option<String>,
    from_input: Option<Vec<Lender>>,
) -> Result<Vec<Lender>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return input::read_json(path);
    }
    Ok(from_input.unwrap_or_else(default_catalog))
}
