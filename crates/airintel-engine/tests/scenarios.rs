//! End-to-end scoring scenarios.
//!
//! Each test seeds an in-memory SQLite reference store (or uses the offline
//! stand-in), builds a `ConfidenceEngine` on top of it, and checks the
//! behavioural guarantees of the scoring rules.

use std::sync::Arc;
use std::time::Duration;

use airintel_engine::test_support::StaticReference;
use airintel_engine::{
    normalize_company_name, ConfidenceEngine, EvaluationRequest, OfflineReference, ReferenceSource,
};
use airintel_models::{
    CarrierRoute, CompanyProfile, EvidenceSource, TradeRecord, TransportMode,
    AIR_SHIPPER_THRESHOLD,
};
use airintel_store::{ReferenceReader, SqliteReader};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn route(origin: &str, dest: &str, carrier: &str, freight: Decimal) -> CarrierRoute {
    CarrierRoute {
        origin_airport: origin.to_string(),
        dest_airport: dest.to_string(),
        carrier_name: carrier.to_string(),
        freight_kg: freight,
        year: 2024,
        month: 9,
    }
}

fn ocean(company: &str, value: Decimal) -> TradeRecord {
    TradeRecord {
        company_name: company.to_string(),
        hs_code: "8471300100".to_string(),
        country: "China".to_string(),
        transport_mode: TransportMode::Ocean,
        value_usd: value,
        weight_kg: dec!(2400),
        year: 2024,
        month: 6,
    }
}

fn sqlite_engine(seed: impl FnOnce(&SqliteReader)) -> ConfidenceEngine {
    let sqlite = SqliteReader::open_in_memory().unwrap();
    seed(&sqlite);
    let reader: Arc<dyn ReferenceSource> =
        Arc::new(ReferenceReader::new(sqlite, 100, Duration::from_secs(60)));
    ConfidenceEngine::new(reader)
}

fn offline_engine() -> ConfidenceEngine {
    ConfidenceEngine::new(Arc::new(OfflineReference::new("reference store unreachable")))
}

#[tokio::test]
async fn evaluation_is_deterministic() {
    let engine = sqlite_engine(|sqlite| {
        sqlite
            .insert_route(&route("HKG", "LAX", "Cathay Pacific Cargo", dec!(3000)))
            .unwrap();
        sqlite
            .insert_route(&route("HKG", "ORD", "Cathay Pacific Cargo", dec!(3000)))
            .unwrap();
        sqlite
            .insert_trade_record(&ocean("Cathay Pacific", dec!(150000)))
            .unwrap();
    });
    let at = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
    let mut request = EvaluationRequest::new("Cathay Pacific");
    request.country = Some("Hong Kong".to_string());
    request.hs_code = Some("8471300100".to_string());

    let first = engine.evaluate_at(&request, at).await.unwrap();
    let second = engine.evaluate_at(&request, at).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.confidence_score, 70);
    assert_eq!(first.route_matches[0].dest_airport, "LAX");
}

#[tokio::test]
async fn score_bounds_and_threshold_hold_across_inputs() {
    let engine = sqlite_engine(|sqlite| {
        sqlite
            .insert_route(&route("ICN", "LAX", "LG Cargo Partners", dec!(10)))
            .unwrap();
        sqlite
            .insert_profile(&CompanyProfile {
                company_name: "LG".to_string(),
                likely_air_shipper: true,
                air_confidence_score: Some(99),
                updated_at: Utc::now(),
            })
            .unwrap();
        sqlite.insert_trade_record(&ocean("LG", dec!(900000))).unwrap();
    });

    let names = [
        "LG",
        "Unknown Corp",
        "Samsung Electronics",
        "Pacific Tech",
        "Acme Foods",
        "sony",
        "x",
    ];
    for name in names {
        let result = engine.evaluate(&EvaluationRequest::new(name)).await.unwrap();
        assert!(result.confidence_score <= 100, "{name}");
        assert_eq!(
            result.is_likely_air_shipper,
            result.confidence_score >= AIR_SHIPPER_THRESHOLD,
            "{name}"
        );
    }

    let lg = engine.evaluate(&EvaluationRequest::new("LG")).await.unwrap();
    assert_eq!(lg.confidence_score, 100);
}

#[tokio::test]
async fn profile_score_overrides_lower_computed_score() {
    let engine = sqlite_engine(|sqlite| {
        sqlite
            .insert_profile(&CompanyProfile {
                company_name: "Flex Ltd".to_string(),
                likely_air_shipper: false,
                air_confidence_score: Some(82),
                updated_at: Utc::now(),
            })
            .unwrap();
    });

    let result = engine.evaluate(&EvaluationRequest::new("Flex Ltd")).await.unwrap();
    assert_eq!(result.confidence_score, 82);
    assert!(result.is_likely_air_shipper);
}

#[tokio::test]
async fn profile_score_never_lowers_computed_score() {
    let engine = sqlite_engine(|sqlite| {
        sqlite
            .insert_route(&route("TPE", "LAX", "Foxconn Air Logistics", dec!(800)))
            .unwrap();
        sqlite
            .insert_profile(&CompanyProfile {
                company_name: "Foxconn".to_string(),
                likely_air_shipper: false,
                air_confidence_score: Some(15),
                updated_at: Utc::now(),
            })
            .unwrap();
    });

    let result = engine.evaluate(&EvaluationRequest::new("Foxconn")).await.unwrap();
    // carrier match (40) + brand keyword (30)
    assert_eq!(result.confidence_score, 70);
}

#[tokio::test]
async fn unknown_corp_is_weak_default() {
    let engine = sqlite_engine(|_| {});
    let result = engine.evaluate(&EvaluationRequest::new("Unknown Corp")).await.unwrap();
    assert_eq!(result.confidence_score, 35);
    assert!(!result.is_likely_air_shipper);
    assert!(result.route_matches.is_empty());
}

#[tokio::test]
async fn samsung_offline_uses_brand_fallback() {
    let result = offline_engine()
        .evaluate(&EvaluationRequest::new("Samsung Electronics"))
        .await
        .unwrap();
    assert_eq!(result.confidence_score, 85);
    assert!(result.is_likely_air_shipper);
    assert_eq!(result.source, EvidenceSource::Fallback);
    assert!(!result.route_matches.is_empty());
    assert!(result.route_matches.iter().any(|m| m.origin_airport == "ICN"));
}

#[tokio::test]
async fn keyword_company_offline_is_medium_tier() {
    let result = offline_engine()
        .evaluate(&EvaluationRequest::new("Midwest Medical Supply"))
        .await
        .unwrap();
    assert_eq!(result.confidence_score, 72);
    assert!(result.is_likely_air_shipper);
}

#[tokio::test]
async fn missing_optional_context_never_errors() {
    let engine = ConfidenceEngine::new(Arc::new(StaticReference::default()));
    let request = EvaluationRequest {
        company_name: "Acme".to_string(),
        country: None,
        hs_code: None,
        prior_ocean_shipments: None,
    };
    assert!(engine.evaluate(&request).await.is_ok());
}

#[tokio::test]
async fn concurrent_evaluations_share_one_engine() {
    let engine = Arc::new(sqlite_engine(|sqlite| {
        sqlite
            .insert_route(&route("NRT", "LAX", "Sony Logistics Air", dec!(100)))
            .unwrap();
    }));

    let mut handles = Vec::new();
    for name in ["Sony", "Unknown Corp", "Samsung Electronics", "Sony"] {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            engine
                .evaluate(&EvaluationRequest::new(name))
                .await
                .map(|r| r.confidence_score)
        }));
    }

    let mut scores = Vec::new();
    for handle in handles {
        scores.push(handle.await.unwrap().unwrap());
    }
    assert_eq!(scores, vec![70, 35, 30, 70]);
}

#[test]
fn normalize_company_name_is_idempotent() {
    for (hs, country) in [
        ("8542310000", "Taiwan"),
        ("8542310001", "Taiwan"),
        ("3004900000", "India"),
        ("0000", "Nowhere"),
    ] {
        assert_eq!(
            normalize_company_name(hs, country),
            normalize_company_name(hs, country)
        );
    }
    assert_eq!(normalize_company_name("0000", "Nowhere"), "Nowhere Trading Company");
}
