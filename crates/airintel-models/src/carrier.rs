use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An airline observed flying an origin-destination pair, with aggregate
/// freight tonnage for one reporting month (BTS T-100 segment data).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarrierRoute {
    pub origin_airport: String,
    pub dest_airport: String,
    pub carrier_name: String,
    pub freight_kg: Decimal,
    pub year: i32,
    pub month: u32,
}

impl CarrierRoute {
    pub fn to_match(&self) -> RouteMatch {
        RouteMatch {
            origin_airport: self.origin_airport.clone(),
            dest_airport: self.dest_airport.clone(),
            carrier_name: self.carrier_name.clone(),
            freight_kg: self.freight_kg,
        }
    }
}

/// A lane attached to a confidence result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteMatch {
    pub origin_airport: String,
    pub dest_airport: String,
    pub carrier_name: String,
    pub freight_kg: Decimal,
}

/// Pre-existing company profile, maintained outside the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyProfile {
    pub company_name: String,
    pub likely_air_shipper: bool,
    /// Explicit score set by an analyst or a previous enrichment run.
    pub air_confidence_score: Option<u8>,
    pub updated_at: DateTime<Utc>,
}

/// Sort matches heaviest lane first. Ties fall back to carrier and airport
/// names so the order is stable across reference snapshots.
pub fn sort_route_matches(matches: &mut [RouteMatch]) {
    matches.sort_by(|a, b| {
        b.freight_kg
            .cmp(&a.freight_kg)
            .then_with(|| a.carrier_name.cmp(&b.carrier_name))
            .then_with(|| a.origin_airport.cmp(&b.origin_airport))
            .then_with(|| a.dest_airport.cmp(&b.dest_airport))
    });
}
