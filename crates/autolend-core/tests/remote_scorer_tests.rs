//! Exercises the HTTP scorer against a real socket. Each test stands up a
//! throwaway axum stub on an ephemeral port.

#![cfg(feature = "remote-scoring")]

use std::time::Duration;

use autolend_core::error::AutoLendError;
use autolend_core::offers::default_catalog;
use autolend_core::pipeline::evaluate_application;
use autolend_core::risk::{RemoteScorer, RiskInputs, RiskScorer};
use autolend_core::rules::RuleConfig;
use autolend_core::types::{BorrowerProfile, FeeSchedule, LoanConfig, TaxRule};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/score")
}

fn sample_inputs() -> RiskInputs {
    RiskInputs {
        ltv: dec!(0.85),
        dti: dec!(0.30),
        apr: dec!(0.065),
        term_months: 60,
        income: dec!(7000),
    }
}

#[tokio::test]
async fn test_successful_score_round_trip() {
    let router = Router::new().route(
        "/api/score",
        post(|Json(body): Json<serde_json::Value>| async move {
            // Request must carry the documented wire shape.
            assert_eq!(body["termMonths"], 60);
            assert!(body["apr"].as_f64().unwrap() < 1.0);
            Json(serde_json::json!({
                "pd": 0.11,
                "confidence": 0.82,
                "modelVersion": "pd-v3"
            }))
        }),
    );
    let url = spawn_stub(router).await;

    let scorer = RemoteScorer::new(url).unwrap();
    let score = scorer.score(&sample_inputs()).await.unwrap();
    assert_eq!(score.pd, dec!(0.11));
    assert_eq!(score.confidence, dec!(0.82));
    assert_eq!(score.model_version, "pd-v3");
}

#[tokio::test]
async fn test_non_2xx_surfaces_status_and_message() {
    let router = Router::new().route(
        "/api/score",
        post(|| async {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "error": "model offline" })),
            )
        }),
    );
    let url = spawn_stub(router).await;

    let scorer = RemoteScorer::new(url).unwrap();
    let err = scorer.score(&sample_inputs()).await.unwrap_err();
    match err {
        AutoLendError::RiskService { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "model offline");
        }
        other => panic!("expected RiskService, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_payload_is_not_a_score() {
    let router = Router::new().route("/api/score", post(|| async { "pd: maybe" }));
    let url = spawn_stub(router).await;

    let scorer = RemoteScorer::new(url).unwrap();
    let err = scorer.score(&sample_inputs()).await.unwrap_err();
    assert!(matches!(err, AutoLendError::MalformedRiskResponse(_)));
}

#[tokio::test]
async fn test_out_of_range_pd_rejected() {
    let router = Router::new().route(
        "/api/score",
        post(|| async {
            Json(serde_json::json!({
                "pd": 3.2,
                "confidence": 0.5,
                "modelVersion": "pd-v3"
            }))
        }),
    );
    let url = spawn_stub(router).await;

    let scorer = RemoteScorer::new(url).unwrap();
    let err = scorer.score(&sample_inputs()).await.unwrap_err();
    assert!(matches!(err, AutoLendError::MalformedRiskResponse(_)));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let router = Router::new().route(
        "/api/score",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(serde_json::json!({
                "pd": 0.1,
                "confidence": 0.9,
                "modelVersion": "pd-v3"
            }))
        }),
    );
    let url = spawn_stub(router).await;

    let scorer = RemoteScorer::with_timeout(url, Duration::from_millis(250)).unwrap();
    let err = scorer.score(&sample_inputs()).await.unwrap_err();
    assert!(matches!(err, AutoLendError::RiskTimeout { .. }));
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    // Nothing listens here.
    let scorer = RemoteScorer::with_timeout(
        "http://127.0.0.1:9/api/score",
        Duration::from_millis(500),
    )
    .unwrap();
    let err = scorer.score(&sample_inputs()).await.unwrap_err();
    assert!(err.is_risk_unavailable());
}

#[tokio::test]
async fn test_pipeline_end_to_end_with_remote_scorer() {
    let router = Router::new().route(
        "/api/score",
        post(|| async {
            Json(serde_json::json!({
                "pd": 0.08,
                "confidence": 0.9,
                "modelVersion": "pd-v3"
            }))
        }),
    );
    let url = spawn_stub(router).await;
    let scorer = RemoteScorer::new(url).unwrap();

    let cfg = LoanConfig {
        price: dec!(32000),
        down: dec!(14000),
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
    };
    let borrower = BorrowerProfile {
        monthly_income: dec!(9000),
        housing_cost: dec!(1500),
        other_debt: dec!(300),
        state: None,
    };

    let result = evaluate_application(
        &cfg,
        &borrower,
        &default_catalog(),
        &RuleConfig::default(),
        &scorer,
    )
    .await
    .unwrap();

    assert_eq!(result.risk.pd, dec!(0.08));
    assert_eq!(result.risk.model_version, "pd-v3");
    assert!(result.rules.approved);
    assert!(!result.offers.is_empty());
}
