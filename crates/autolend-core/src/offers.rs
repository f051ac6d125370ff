//! Offer engine: prices a catalog of lender policies against one
//! application and ranks the survivors by risk-adjusted cost.
//!
//! Lenders failing an eligibility filter are excluded outright — the
//! engine returns priced offers only, never "declined offers". The catalog
//! is an injected value, not process state.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::features::Features;
use crate::loan::{compute_financed_amount, compute_payment, compute_sales_tax, compute_summary, round2};
use crate::risk::RiskScore;
use crate::types::{LoanConfig, Money, Rate};

/// Uplift coefficient applied when a lender does not specify one:
/// basis points of APR per 0.10 of PD.
const DEFAULT_RISK_APR_BPS_PER_PD: Decimal = dec!(120);

/// A lender's pricing policy and eligibility envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lender {
    pub id: String,
    pub name: String,
    /// Nominal base APR, percent.
    pub base_apr: Rate,
    /// Longest term this lender will write, months.
    pub max_term: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_income: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ltv: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_dti: Option<Rate>,
    /// Basis points of APR added per 0.10 of PD. Defaults to 120.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_apr_bps_per_pd: Option<Decimal>,
}

/// One priced offer. Freshly computed per evaluation; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub lender_id: String,
    pub lender_name: String,
    pub term_months: u32,
    /// Lender-priced APR, percent.
    pub apr: Rate,
    pub monthly_payment: Money,
    /// Down + upfronts + all payments at the lender's APR.
    pub total_cost: Money,
    /// APR × (1 + pd). Ranking metric only, not a regulatory APR.
    pub risk_adjusted_apr: Rate,
}

/// The demo catalog shipped with the original desk.
pub fn default_catalog() -> Vec<Lender> {
    vec![
        Lender {
            id: "L1".into(),
            name: "Acme Bank".into(),
            base_apr: dec!(6.9),
            max_term: 72,
            min_income: None,
            max_ltv: Some(dec!(1.3)),
            max_dti: Some(dec!(0.5)),
            risk_apr_bps_per_pd: Some(dec!(120)),
        },
        Lender {
            id: "L2".into(),
            name: "Metro Credit".into(),
            base_apr: dec!(5.9),
            max_term: 60,
            min_income: None,
            max_ltv: Some(dec!(1.2)),
            max_dti: Some(dec!(0.45)),
            risk_apr_bps_per_pd: Some(dec!(160)),
        },
        Lender {
            id: "L3".into(),
            name: "Sunrise Financial".into(),
            base_apr: dec!(7.5),
            max_term: 84,
            min_income: None,
            max_ltv: Some(dec!(1.35)),
            max_dti: Some(dec!(0.55)),
            risk_apr_bps_per_pd: Some(dec!(90)),
        },
    ]
}

/// Price and rank the catalog for one application.
///
/// Eligibility: requested term within the lender's max, and LTV/DTI within
/// the lender's caps where set. Survivors are priced with a PD-scaled APR
/// uplift and sorted ascending by risk-adjusted APR; ties keep catalog
/// order.
pub fn lender_offers(
    cfg: &LoanConfig,
    features: &Features,
    risk: &RiskScore,
    lenders: &[Lender],
) -> Vec<Offer> {
    let tax = compute_sales_tax(cfg);
    let financed_amount = compute_financed_amount(cfg, Some(tax));

    let mut offers = Vec::new();

    for lender in lenders {
        if cfg.term_months > lender.max_term {
            continue;
        }
        if let Some(max_ltv) = lender.max_ltv {
            if features.ltv > max_ltv {
                continue;
            }
        }
        if let Some(max_dti) = lender.max_dti {
            if features.dti > max_dti {
                continue;
            }
        }

        let bps_per_pd = lender
            .risk_apr_bps_per_pd
            .unwrap_or(DEFAULT_RISK_APR_BPS_PER_PD);
        let uplift_pct = bps_per_pd * (risk.pd * dec!(10)) / dec!(100);
        let apr = round2(lender.base_apr + uplift_pct);

        let priced = LoanConfig {
            apr,
            ..cfg.clone()
        };
        let monthly_payment = compute_payment(&priced, Some(financed_amount));
        let summary = compute_summary(&priced);
        let risk_adjusted_apr = round2(apr * (Decimal::ONE + risk.pd));

        offers.push(Offer {
            lender_id: lender.id.clone(),
            lender_name: lender.name.clone(),
            term_months: cfg.term_months,
            apr,
            monthly_payment,
            total_cost: summary.total_cost,
            risk_adjusted_apr,
        });
    }

    offers.sort_by(|a, b| a.risk_adjusted_apr.cmp(&b.risk_adjusted_apr));
    offers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BorrowerProfile, FeeSchedule, TaxRule};
    use rust_decimal_macros::dec;

    fn sample_config() -> LoanConfig {
        LoanConfig {
            price: dec!(32000),
            down: dec!(2000),
            trade_in: Decimal::ZERO,
            trade_in_payoff: Decimal::ZERO,
            apr: dec!(6.5),
            term_months: 60,
            tax_rate: dec!(8.75),
            tax_rule: TaxRule::PriceMinusTradeIn,
            fees: FeeSchedule {
                upfront: dec!(400),
                financed: dec!(300),
            },
            extras: FeeSchedule::default(),
        }
    }

    fn sample_features() -> Features {
        let borrower = BorrowerProfile {
            monthly_income: dec!(6000),
            housing_cost: dec!(1500),
            other_debt: dec!(400),
            state: None,
        };
        crate::features::compute_features(&sample_config(), &borrower)
    }

    fn low_risk() -> RiskScore {
        RiskScore {
            pd: dec!(0.10),
            confidence: dec!(0.8),
            model_version: "reference-1".into(),
        }
    }

    #[test]
    fn test_pricing_uplift_per_lender() {
        let offers = lender_offers(
            &sample_config(),
            &sample_features(),
            &low_risk(),
            &default_catalog(),
        );
        assert_eq!(offers.len(), 3);
        // pd 0.10 → one PD decile of uplift.
        // Metro: 5.9 + 160·1/100 = 7.50, Acme: 6.9 + 1.2 = 8.10,
        // Sunrise: 7.5 + 0.9 = 8.40.
        assert_eq!(offers[0].lender_id, "L2");
        assert_eq!(offers[0].apr, dec!(7.50));
        assert_eq!(offers[1].lender_id, "L1");
        assert_eq!(offers[1].apr, dec!(8.10));
        assert_eq!(offers[2].lender_id, "L3");
        assert_eq!(offers[2].apr, dec!(8.40));
    }

    #[test]
    fn test_sorted_ascending_by_risk_adjusted_apr() {
        let offers = lender_offers(
            &sample_config(),
            &sample_features(),
            &low_risk(),
            &default_catalog(),
        );
        assert!(offers
            .windows(2)
            .all(|w| w[0].risk_adjusted_apr <= w[1].risk_adjusted_apr));
        // 7.50 × 1.1 = 8.25
        assert_eq!(offers[0].risk_adjusted_apr, dec!(8.25));
    }

    #[test]
    fn test_term_filter_excludes_lender() {
        let mut cfg = sample_config();
        cfg.term_months = 72;
        let borrower = BorrowerProfile {
            monthly_income: dec!(6000),
            housing_cost: dec!(1500),
            other_debt: dec!(400),
            state: None,
        };
        let features = crate::features::compute_features(&cfg, &borrower);
        let offers = lender_offers(&cfg, &features, &low_risk(), &default_catalog());
        // Metro writes 60 months max.
        assert!(offers.iter().all(|o| o.lender_id != "L2"));
        assert_eq!(offers.len(), 2);
    }

    #[test]
    fn test_ltv_filter_excludes_lender() {
        let mut features = sample_features();
        features.ltv = dec!(1.25);
        let offers = lender_offers(&sample_config(), &features, &low_risk(), &default_catalog());
        assert!(offers.iter().all(|o| o.lender_id != "L2"));
    }

    #[test]
    fn test_dti_filter_excludes_lender() {
        let mut features = sample_features();
        features.dti = dec!(0.48);
        let offers = lender_offers(&sample_config(), &features, &low_risk(), &default_catalog());
        assert!(offers.iter().all(|o| o.lender_id != "L2"));
    }

    #[test]
    fn test_unset_caps_do_not_filter() {
        let open_lender = Lender {
            id: "L9".into(),
            name: "Open Door Lending".into(),
            base_apr: dec!(9.9),
            max_term: 96,
            min_income: None,
            max_ltv: None,
            max_dti: None,
            risk_apr_bps_per_pd: None,
        };
        let mut features = sample_features();
        features.ltv = dec!(1.9);
        features.dti = dec!(0.9);
        let offers = lender_offers(
            &sample_config(),
            &features,
            &low_risk(),
            &[open_lender],
        );
        assert_eq!(offers.len(), 1);
        // Default coefficient: 9.9 + 120·1/100 = 11.10.
        assert_eq!(offers[0].apr, dec!(11.10));
    }

    #[test]
    fn test_offer_payment_matches_repriced_config() {
        let offers = lender_offers(
            &sample_config(),
            &sample_features(),
            &low_risk(),
            &default_catalog(),
        );
        for offer in offers {
            let priced = LoanConfig {
                apr: offer.apr,
                ..sample_config()
            };
            assert_eq!(offer.monthly_payment, compute_payment(&priced, None));
            assert_eq!(offer.total_cost, compute_summary(&priced).total_cost);
        }
    }

    #[test]
    fn test_empty_catalog_yields_no_offers() {
        let offers = lender_offers(&sample_config(), &sample_features(), &low_risk(), &[]);
        assert!(offers.is_empty());
    }

    #[test]
    fn test_high_pd_widens_spread() {
        let risky = RiskScore {
            pd: dec!(0.35),
            confidence: dec!(0.6),
            model_version: "reference-1".into(),
        };
        let offers = lender_offers(
            &sample_config(),
            &sample_features(),
            &risky,
            &default_catalog(),
        );
        // Acme: 6.9 + 120·3.5/100 = 11.10
        let acme = offers.iter().find(|o| o.lender_id == "L1").unwrap();
        assert_eq!(acme.apr, dec!(11.10));
        // Ranking flips: Sunrise's low coefficient wins at high PD.
        assert_eq!(offers[0].lender_id, "L3");
    }
}
