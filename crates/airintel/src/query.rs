//! Request handling for company intelligence queries.
//!
//! Route handlers pass the raw query parameters in and get back an HTTP status
//! plus a JSON body. No transport lives here.

use std::fmt;
use std::str::FromStr;

use airintel_engine::{ConfidenceEngine, EngineError, EvaluationRequest};
use airintel_models::{ErrorResponse, IntelligenceResponse, TradeRecord};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};

/// Which freight modality the caller is browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    Air,
    Ocean,
    #[default]
    All,
}

impl FromStr for QueryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "air" => Ok(QueryMode::Air),
            "ocean" => Ok(QueryMode::Ocean),
            "all" | "" => Ok(QueryMode::All),
            other => Err(format!("Unsupported mode: {other}")),
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QueryMode::Air => "air",
            QueryMode::Ocean => "ocean",
            QueryMode::All => "all",
        };
        f.write_str(s)
    }
}

/// Raw query parameters as they arrive from a route handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IntelligenceQuery {
    pub company: Option<String>,
    pub mode: Option<String>,
    #[serde(default)]
    pub air_shipper_only: bool,
    pub country: Option<String>,
    pub hs_code: Option<String>,
    pub prior_ocean_shipments: Option<Vec<TradeRecord>>,
}

impl IntelligenceQuery {
    pub fn for_company(company: impl Into<String>) -> Self {
        Self {
            company: Some(company.into()),
            ..Default::default()
        }
    }
}

/// HTTP status and JSON body for a handled query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub status: u16,
    pub body: Value,
}

impl QueryOutcome {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    fn bad_request(error: impl Into<String>, details: Option<String>) -> Self {
        Self::json(400, &ErrorResponse::new(error, details))
    }

    fn internal(details: String) -> Self {
        Self::json(500, &ErrorResponse::new("Failed to evaluate company", Some(details)))
    }

    fn json<T: Serialize>(status: u16, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status, body },
            Err(e) => Self {
                status: 500,
                body: json!({
                    "success": false,
                    "error": "Failed to serialize response",
                    "details": e.to_string(),
                }),
            },
        }
    }
}

/// Validate the query, evaluate the company, and shape the response.
pub async fn handle(engine: &ConfidenceEngine, query: IntelligenceQuery) -> QueryOutcome {
    let company = match query.company.as_deref().map(str::trim) {
        Some(company) if !company.is_empty() => company.to_string(),
        _ => return QueryOutcome::bad_request("Company parameter is required", None),
    };

    let mode = match query.mode.as_deref().map(QueryMode::from_str).transpose() {
        Ok(mode) => mode.unwrap_or_default(),
        Err(reason) => return QueryOutcome::bad_request("Invalid mode parameter", Some(reason)),
    };

    debug!(company = %company, mode = %mode, air_shipper_only = query.air_shipper_only, "Handling intelligence query");

    let request = EvaluationRequest {
        company_name: company.clone(),
        country: query.country,
        hs_code: query.hs_code,
        prior_ocean_shipments: query.prior_ocean_shipments,
    };

    match engine.evaluate(&request).await {
        Ok(result) => {
            let intelligence = if query.air_shipper_only && !result.is_likely_air_shipper {
                None
            } else {
                Some(result)
            };
            QueryOutcome::json(
                200,
                &IntelligenceResponse {
                    success: true,
                    company,
                    intelligence,
                },
            )
        }
        Err(EngineError::MissingInput(field)) => {
            QueryOutcome::bad_request("Company parameter is required", Some(format!("missing {field}")))
        }
        Err(e) => {
            error!(company = %company, error = %e, "Intelligence query failed");
            QueryOutcome::internal(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use airintel_engine::test_support::StaticReference;
    use airintel_engine::OfflineReference;

    fn engine() -> ConfidenceEngine {
        ConfidenceEngine::new(Arc::new(StaticReference::default()))
    }

    #[test]
    fn parse_modes() {
        assert_eq!("air".parse::<QueryMode>().unwrap(), QueryMode::Air);
        assert_eq!("OCEAN".parse::<QueryMode>().unwrap(), QueryMode::Ocean);
        assert_eq!("all".parse::<QueryMode>().unwrap(), QueryMode::All);
        assert!("rail".parse::<QueryMode>().is_err());
    }

    #[tokio::test]
    async fn missing_company_is_bad_request() {
        let outcome = handle(&engine(), IntelligenceQuery::default()).await;
        assert_eq!(outcome.status, 400);
        assert_eq!(outcome.body["success"], json!(false));
        assert_eq!(outcome.body["error"], json!("Company parameter is required"));
    }

    #[tokio::test]
    async fn blank_company_is_bad_request() {
        let outcome = handle(&engine(), IntelligenceQuery::for_company("   ")).await;
        assert_eq!(outcome.status, 400);
    }

    #[tokio::test]
    async fn unknown_mode_is_bad_request() {
        let mut query = IntelligenceQuery::for_company("Acme");
        query.mode = Some("rail".to_string());
        let outcome = handle(&engine(), query).await;
        assert_eq!(outcome.status, 400);
        assert_eq!(outcome.body["details"], json!("Unsupported mode: rail"));
    }

    #[tokio::test]
    async fn success_body_carries_intelligence() {
        let mut query = IntelligenceQuery::for_company("Unknown Corp");
        query.mode = Some("air".to_string());
        let outcome = handle(&engine(), query).await;
        assert!(outcome.is_success());
        assert_eq!(outcome.body["success"], json!(true));
        assert_eq!(outcome.body["company"], json!("Unknown Corp"));
        assert_eq!(outcome.body["intelligence"]["confidence_score"], json!(35));
        assert_eq!(outcome.body["intelligence"]["is_likely_air_shipper"], json!(false));
    }

    #[tokio::test]
    async fn air_shipper_only_filters_weak_results() {
        let mut query = IntelligenceQuery::for_company("Unknown Corp");
        query.air_shipper_only = true;
        let outcome = handle(&engine(), query).await;
        assert_eq!(outcome.status, 200);
        assert!(outcome.body["intelligence"].is_null());
    }

    #[tokio::test]
    async fn air_shipper_only_keeps_strong_results() {
        let engine = ConfidenceEngine::new(Arc::new(OfflineReference::new("down")));
        let mut query = IntelligenceQuery::for_company("Samsung Electronics");
        query.air_shipper_only = true;
        let outcome = handle(&engine, query).await;
        assert_eq!(outcome.status, 200);
        assert_eq!(outcome.body["intelligence"]["confidence_score"], json!(85));
    }
}
