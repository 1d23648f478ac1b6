use std::sync::Arc;

use airintel_models::{ConfidenceResult, EvidenceSource, Signal, TradeRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::fallback::FallbackIntel;
use crate::naming::display_name;
use crate::reference::ReferenceSource;
use crate::scoring::{score_company, Evidence};

/// A company to evaluate plus whatever context the caller has.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EvaluationRequest {
    pub company_name: String,
    pub country: Option<String>,
    pub hs_code: Option<String>,
    /// Prior ocean shipments supplied by the caller. When `None`, the engine
    /// asks the reference source for the company's recorded history.
    pub prior_ocean_shipments: Option<Vec<TradeRecord>>,
}

impl EvaluationRequest {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            ..Default::default()
        }
    }
}

/// Scores companies as likely air shippers.
///
/// Stateless apart from read-only reference data, so one engine can be shared
/// behind an `Arc` across concurrent requests.
pub struct ConfidenceEngine {
    reference: Arc<dyn ReferenceSource>,
    intel: FallbackIntel,
}

impl ConfidenceEngine {
    pub fn new(reference: Arc<dyn ReferenceSource>) -> Self {
        Self::with_fallback(reference, FallbackIntel::builtin())
    }

    pub fn with_fallback(reference: Arc<dyn ReferenceSource>, intel: FallbackIntel) -> Self {
        Self { reference, intel }
    }

    pub fn fallback(&self) -> &FallbackIntel {
        &self.intel
    }

    pub async fn evaluate(&self, request: &EvaluationRequest) -> Result<ConfidenceResult, EngineError> {
        self.evaluate_at(request, Utc::now()).await
    }

    /// Evaluate with an explicit timestamp. Identical requests against an
    /// unchanged reference snapshot produce identical results.
    pub async fn evaluate_at(
        &self,
        request: &EvaluationRequest,
        evaluated_at: DateTime<Utc>,
    ) -> Result<ConfidenceResult, EngineError> {
        let company = display_name(&request.company_name);
        if company.is_empty() {
            return Err(EngineError::MissingInput("company_name"));
        }

        let routes = match self.reference.carrier_routes(&company).await {
            Ok(routes) => routes,
            Err(e) => {
                warn!(company = %company, error = %e, "Carrier routes unavailable, using fallback intelligence");
                return Ok(self.fallback_result(company, evaluated_at));
            }
        };

        let profile = match self.reference.company_profile(&company).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(company = %company, error = %e, "Company profile lookup failed, scoring without it");
                None
            }
        };

        let history;
        let prior_ocean_shipments: &[TradeRecord] = match &request.prior_ocean_shipments {
            Some(shipments) => shipments,
            None => {
                history = match self.reference.ocean_shipments(&company).await {
                    Ok(shipments) => shipments,
                    Err(e) => {
                        warn!(company = %company, error = %e, "Shipment history unavailable, scoring without it");
                        Vec::new()
                    }
                };
                &history
            }
        };

        let evidence = Evidence {
            carrier_routes: &routes,
            prior_ocean_shipments,
            profile: profile.as_ref(),
        };
        let breakdown = score_company(&company, &evidence, &self.intel);

        debug!(
            company = %company,
            country = request.country.as_deref().unwrap_or("-"),
            hs_code = request.hs_code.as_deref().unwrap_or("-"),
            routes = routes.len(),
            prior_shipments = prior_ocean_shipments.len(),
            has_profile = profile.is_some(),
            "Evidence collected"
        );

        let result = ConfidenceResult::from_score(
            breakdown.score,
            breakdown.route_matches,
            evaluated_at,
            company,
            EvidenceSource::Reference,
            breakdown.signals,
        );

        info!(
            company = %result.display_name,
            score = result.confidence_score,
            likely_air_shipper = result.is_likely_air_shipper,
            "Evaluation complete"
        );

        Ok(result)
    }

    fn fallback_result(&self, company: String, evaluated_at: DateTime<Utc>) -> ConfidenceResult {
        let verdict = self.intel.verdict(&company.to_lowercase());
        let signal = if verdict.matched_key.is_some() {
            Signal::FallbackTier
        } else {
            Signal::WeakDefault
        };
        ConfidenceResult::from_score(
            u32::from(verdict.score),
            verdict.route_matches,
            evaluated_at,
            company,
            EvidenceSource::Fallback,
            vec![signal],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::OfflineReference;
    use crate::test_support::StaticReference;
    use airintel_models::{CarrierRoute, CompanyProfile, TransportMode};
    use rust_decimal_macros::dec;

    fn offline_engine() -> ConfidenceEngine {
        ConfidenceEngine::new(Arc::new(OfflineReference::new("test")))
    }

    #[tokio::test]
    async fn empty_company_is_rejected() {
        let engine = ConfidenceEngine::new(Arc::new(StaticReference::default()));
        let err = engine.evaluate(&EvaluationRequest::new("   ")).await.unwrap_err();
        assert!(matches!(err, EngineError::MissingInput("company_name")));
    }

    #[tokio::test]
    async fn unknown_company_gets_weak_default() {
        let engine = ConfidenceEngine::new(Arc::new(StaticReference::default()));
        let result = engine.evaluate(&EvaluationRequest::new("Unknown Corp")).await.unwrap();
        assert_eq!(result.confidence_score, 35);
        assert!(!result.is_likely_air_shipper);
        assert_eq!(result.source, EvidenceSource::Reference);
    }

    #[tokio::test]
    async fn samsung_without_reference_uses_fallback_table() {
        let result = offline_engine()
            .evaluate(&EvaluationRequest::new("Samsung Electronics"))
            .await
            .unwrap();
        assert_eq!(result.confidence_score, 85);
        assert!(result.is_likely_air_shipper);
        assert_eq!(result.source, EvidenceSource::Fallback);
        assert!(result.route_matches.iter().any(|m| m.origin_airport == "ICN"));
    }

    #[tokio::test]
    async fn unknown_company_offline_is_low_tier() {
        let result = offline_engine()
            .evaluate(&EvaluationRequest::new("Unknown Corp"))
            .await
            .unwrap();
        assert_eq!(result.confidence_score, 35);
        assert_eq!(result.signals, vec![Signal::WeakDefault]);
    }

    #[tokio::test]
    async fn history_is_loaded_when_caller_omits_it() {
        let reference = StaticReference {
            shipments: vec![TradeRecord {
                company_name: "Acme Imports".to_string(),
                hs_code: "9403600000".to_string(),
                country: "Vietnam".to_string(),
                transport_mode: TransportMode::Ocean,
                value_usd: dec!(180000),
                weight_kg: dec!(7000),
                year: 2024,
                month: 2,
            }],
            ..Default::default()
        };
        let engine = ConfidenceEngine::new(Arc::new(reference));

        let loaded = engine.evaluate(&EvaluationRequest::new("Acme Imports")).await.unwrap();
        assert_eq!(loaded.confidence_score, 30);

        let mut explicit = EvaluationRequest::new("Acme Imports");
        explicit.prior_ocean_shipments = Some(vec![]);
        let result = engine.evaluate(&explicit).await.unwrap();
        assert_eq!(result.confidence_score, 35);
    }

    #[tokio::test]
    async fn carrier_and_profile_evidence_combine() {
        let reference = StaticReference {
            routes: vec![CarrierRoute {
                origin_airport: "ICN".to_string(),
                dest_airport: "ORD".to_string(),
                carrier_name: "Korean Air Cargo".to_string(),
                freight_kg: dec!(5000),
                year: 2024,
                month: 3,
            }],
            profiles: vec![CompanyProfile {
                company_name: "Korean Air".to_string(),
                likely_air_shipper: true,
                air_confidence_score: None,
                updated_at: Utc::now(),
            }],
            ..Default::default()
        };
        let engine = ConfidenceEngine::new(Arc::new(reference));
        let result = engine.evaluate(&EvaluationRequest::new("korean air")).await.unwrap();
        assert_eq!(result.confidence_score, 60);
        assert!(!result.is_likely_air_shipper);
        assert_eq!(result.route_matches.len(), 1);
    }

    #[tokio::test]
    async fn display_name_is_normalized() {
        let engine = ConfidenceEngine::new(Arc::new(StaticReference::default()));
        let result = engine
            .evaluate(&EvaluationRequest::new("  Acme   Freight  "))
            .await
            .unwrap();
        assert_eq!(result.display_name, "Acme Freight");
    }
}
