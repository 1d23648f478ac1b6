use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::carrier::RouteMatch;

/// Score at or above which a company is reported as a likely air shipper.
pub const AIR_SHIPPER_THRESHOLD: u8 = 70;

/// Upper bound for any confidence score.
pub const MAX_SCORE: u8 = 100;

/// Where the evidence behind a result came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
    /// Scored against the live carrier-route reference data.
    Reference,
    /// Reference data was unreachable; answered from the static fallback table.
    Fallback,
}

/// A single piece of evidence that contributed to the score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    CarrierRouteMatch,
    IndustryKeyword,
    BrandLaneFallback,
    PriorOceanShipments,
    HighValueOceanShipments,
    ProfileLikelyAirShipper,
    ProfileScoreOverride,
    WeakDefault,
    FallbackTier,
}

/// Engine output attached to a trade record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceResult {
    pub is_likely_air_shipper: bool,
    pub confidence_score: u8,
    /// Heaviest lane first.
    pub route_matches: Vec<RouteMatch>,
    pub evaluated_at: DateTime<Utc>,
    pub display_name: String,
    pub source: EvidenceSource,
    pub signals: Vec<Signal>,
}

impl ConfidenceResult {
    /// Build a result from a raw score, clamping it and deriving the air-shipper flag.
    pub fn from_score(
        score: u32,
        route_matches: Vec<RouteMatch>,
        evaluated_at: DateTime<Utc>,
        display_name: String,
        source: EvidenceSource,
        signals: Vec<Signal>,
    ) -> Self {
        let confidence_score = score.min(MAX_SCORE as u32) as u8;
        Self {
            is_likely_air_shipper: confidence_score >= AIR_SHIPPER_THRESHOLD,
            confidence_score,
            route_matches,
            evaluated_at,
            display_name,
            source,
            signals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: u32) -> ConfidenceResult {
        ConfidenceResult::from_score(
            score,
            vec![],
            Utc::now(),
            "Acme".to_string(),
            EvidenceSource::Reference,
            vec![],
        )
    }

    #[test]
    fn threshold_drives_air_shipper_flag() {
        assert!(!result(69).is_likely_air_shipper);
        assert!(result(70).is_likely_air_shipper);
    }

    #[test]
    fn score_is_clamped() {
        let r = result(160);
        assert_eq!(r.confidence_score, 100);
        assert!(r.is_likely_air_shipper);
    }

    #[test]
    fn signal_serialization() {
        assert_eq!(
            serde_json::to_string(&Signal::CarrierRouteMatch).unwrap(),
            "\"carrier_route_match\""
        );
        assert_eq!(
            serde_json::to_string(&EvidenceSource::Fallback).unwrap(),
            "\"fallback\""
        );
    }
}
