use autolend_core::loan::{
    build_amortization, compute_financed_amount, compute_payment, compute_sales_tax,
    compute_summary,
};
use autolend_core::types::{FeeSchedule, LoanConfig, TaxRule};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Worked examples
// ===========================================================================

fn worked_example() -> LoanConfig {
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

#[test]
fn test_worked_example_end_to_end() {
    let cfg = worked_example();
    assert_eq!(compute_sales_tax(&cfg), dec!(2800.00));
    assert_eq!(compute_financed_amount(&cfg, None), dec!(33100.00));
    assert_eq!(compute_payment(&cfg, None), dec!(647.64));

    let rows = build_amortization(&cfg);
    assert_eq!(rows.len(), 60);
    assert_eq!(rows.last().unwrap().balance, Decimal::ZERO);
}

#[test]
fn test_zero_apr_example() {
    let cfg = LoanConfig {
        price: dec!(20000),
        down: Decimal::ZERO,
        trade_in: Decimal::ZERO,
        trade_in_payoff: Decimal::ZERO,
        apr: Decimal::ZERO,
        term_months: 48,
        tax_rate: Decimal::ZERO,
        tax_rule: TaxRule::PriceMinusTradeIn,
        fees: FeeSchedule::default(),
        extras: FeeSchedule::default(),
    };
    let summary = compute_summary(&cfg);
    assert_eq!(summary.financed_amount, dec!(20000));
    assert_eq!(summary.payment, dec!(416.67));
    assert_eq!(summary.total_interest, Decimal::ZERO);

    let rows = build_amortization(&cfg);
    assert!(rows.iter().all(|r| r.interest == Decimal::ZERO));
    assert_eq!(rows.last().unwrap().balance, Decimal::ZERO);
}

// ===========================================================================
// Property tests
// ===========================================================================

/// Build a config from integer cents / basis points so proptest explores
/// the realistic input space without degenerate decimals.
fn config_from_parts(
    price_c: i64,
    down_c: i64,
    trade_in_c: i64,
    payoff_c: i64,
    apr_bp: u32,
    term_months: u32,
    tax_bp: u32,
    financed_fees_c: i64,
    tax_rule: TaxRule,
) -> LoanConfig {
    LoanConfig {
        price: Decimal::new(price_c, 2),
        down: Decimal::new(down_c, 2),
        trade_in: Decimal::new(trade_in_c, 2),
        trade_in_payoff: Decimal::new(payoff_c, 2),
        apr: Decimal::new(apr_bp as i64, 2),
        term_months,
        tax_rate: Decimal::new(tax_bp as i64, 2),
        tax_rule,
        fees: FeeSchedule {
            upfront: Decimal::ZERO,
            financed: Decimal::new(financed_fees_c, 2),
        },
        extras: FeeSchedule::default(),
    }
}

fn arb_tax_rule() -> impl Strategy<Value = TaxRule> {
    prop_oneof![Just(TaxRule::PriceMinusTradeIn), Just(TaxRule::PriceFull)]
}

proptest! {
    /// The schedule always terminates at exactly zero, whatever the
    /// term, rate, or fee mix — including apr = 0.
    #[test]
    fn prop_final_balance_is_zero(
        price_c in 0i64..10_000_000,
        down_c in 0i64..5_000_000,
        trade_in_c in 0i64..4_000_000,
        payoff_c in 0i64..4_000_000,
        apr_bp in 0u32..2400,
        term_months in 1u32..=96,
        tax_bp in 0u32..1500,
        financed_fees_c in 0i64..300_000,
        tax_rule in arb_tax_rule(),
    ) {
        let cfg = config_from_parts(
            price_c, down_c, trade_in_c, payoff_c, apr_bp, term_months,
            tax_bp, financed_fees_c, tax_rule,
        );
        let rows = build_amortization(&cfg);
        prop_assert_eq!(rows.len(), term_months as usize);
        prop_assert_eq!(rows.last().unwrap().balance, Decimal::ZERO);
    }

    /// Every row's displayed payment is exactly interest + principal, and
    /// the balance never increases. Principals are kept above a few
    /// hundred dollars: sub-cent monthly payments round into a schedule
    /// whose drift exceeds the balance, which is outside the domain the
    /// monotonicity invariant covers.
    #[test]
    fn prop_rows_internally_consistent(
        price_c in 500_000i64..10_000_000,
        down_c in 0i64..400_000,
        apr_bp in 0u32..2400,
        term_months in 1u32..=96,
        tax_bp in 0u32..1500,
    ) {
        let cfg = config_from_parts(
            price_c, down_c, 0, 0, apr_bp, term_months, tax_bp, 0,
            TaxRule::PriceMinusTradeIn,
        );
        let mut balance = compute_financed_amount(&cfg, None);
        for row in build_amortization(&cfg) {
            prop_assert_eq!(row.payment, row.interest + row.principal);
            prop_assert!(row.balance <= balance);
            balance = row.balance;
        }
    }

    /// Negative equity can never drive the financed principal below zero.
    #[test]
    fn prop_financed_amount_never_negative(
        price_c in 0i64..10_000_000,
        down_c in 0i64..20_000_000,
        trade_in_c in 0i64..10_000_000,
        payoff_c in 0i64..20_000_000,
        tax_bp in 0u32..1500,
        tax_rule in arb_tax_rule(),
    ) {
        let cfg = config_from_parts(
            price_c, down_c, trade_in_c, payoff_c, 650, 60, tax_bp, 0, tax_rule,
        );
        prop_assert!(compute_financed_amount(&cfg, None) >= Decimal::ZERO);
    }

    /// Full-price taxation is monotone in the rate and blind to trade-in.
    #[test]
    fn prop_full_price_tax_monotone_and_tradein_blind(
        price_c in 0i64..10_000_000,
        trade_in_c in 0i64..10_000_000,
        tax_bp_lo in 0u32..1500,
        tax_bp_delta in 0u32..500,
    ) {
        let base = config_from_parts(
            price_c, 0, 0, 0, 650, 60, tax_bp_lo, 0, TaxRule::PriceFull,
        );
        let mut raised = base.clone();
        raised.tax_rate = Decimal::new((tax_bp_lo + tax_bp_delta) as i64, 2);
        prop_assert!(compute_sales_tax(&raised) >= compute_sales_tax(&base));

        let mut traded = base.clone();
        traded.trade_in = Decimal::new(trade_in_c, 2);
        prop_assert_eq!(compute_sales_tax(&traded), compute_sales_tax(&base));
    }

    /// Under price_minus_tradein, more trade-in never means more tax, and
    /// the taxable base floors at zero.
    #[test]
    fn prop_tradein_rule_tax_non_increasing(
        price_c in 0i64..10_000_000,
        trade_in_c in 0i64..10_000_000,
        extra_trade_c in 0i64..5_000_000,
        tax_bp in 0u32..1500,
    ) {
        let base = config_from_parts(
            price_c, 0, trade_in_c, 0, 650, 60, tax_bp, 0,
            TaxRule::PriceMinusTradeIn,
        );
        let mut more = base.clone();
        more.trade_in = Decimal::new(trade_in_c + extra_trade_c, 2);
        prop_assert!(compute_sales_tax(&more) <= compute_sales_tax(&base));
        prop_assert!(compute_sales_tax(&more) >= Decimal::ZERO);
    }

    /// The summary's nominal total never disagrees with the schedule by
    /// more than one payment's worth of rounding.
    #[test]
    fn prop_nominal_total_close_to_schedule(
        price_c in 100_000i64..10_000_000,
        apr_bp in 0u32..2400,
        term_months in 1u32..=96,
    ) {
        let cfg = config_from_parts(
            price_c, 0, 0, 0, apr_bp, term_months, 0, 0,
            TaxRule::PriceMinusTradeIn,
        );
        let summary = compute_summary(&cfg);
        let row_total: Decimal = build_amortization(&cfg).iter().map(|r| r.payment).sum();
        let nominal = summary.payment * Decimal::from(cfg.term_months);
        prop_assert!((nominal - row_total).abs() < summary.payment.max(Decimal::ONE));
    }
}
