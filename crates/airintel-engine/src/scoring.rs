use airintel_models::{
    sort_route_matches, CarrierRoute, CompanyProfile, RouteMatch, Signal, TradeRecord,
    TransportMode,
};
use rust_decimal::Decimal;
use tracing::warn;

use crate::fallback::{FallbackIntel, LOW_CONFIDENCE};

pub const CARRIER_MATCH_POINTS: u32 = 40;
pub const INDUSTRY_KEYWORD_POINTS: u32 = 30;
pub const PRIOR_OCEAN_POINTS: u32 = 20;
pub const HIGH_VALUE_OCEAN_POINTS: u32 = 10;
pub const PROFILE_LIKELY_POINTS: u32 = 20;

/// Mean ocean shipment value above which the high-value bonus applies.
pub const HIGH_VALUE_OCEAN_USD: i64 = 100_000;

/// Score when no evidence fired at all.
pub const WEAK_DEFAULT_SCORE: u32 = LOW_CONFIDENCE as u32;

/// Everything known about a company at evaluation time.
#[derive(Debug, Clone, Default)]
pub struct Evidence<'a> {
    pub carrier_routes: &'a [CarrierRoute],
    pub prior_ocean_shipments: &'a [TradeRecord],
    pub profile: Option<&'a CompanyProfile>,
}

/// Outcome of the additive rules, before it is wrapped in a result.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Final score in 0..=100.
    pub score: u32,
    pub route_matches: Vec<RouteMatch>,
    pub signals: Vec<Signal>,
}

/// Apply the additive scoring rules to a company name and its evidence.
///
/// Each rule fires at most once; profile data can only raise the score.
pub fn score_company(company: &str, evidence: &Evidence<'_>, intel: &FallbackIntel) -> ScoreBreakdown {
    let lower = company.trim().to_lowercase();
    let mut score = 0u32;
    let mut signals = Vec::new();
    let mut route_matches: Vec<RouteMatch> = Vec::new();

    // 1. Direct carrier/route match
    if !evidence.carrier_routes.is_empty() {
        score += CARRIER_MATCH_POINTS;
        signals.push(Signal::CarrierRouteMatch);
        route_matches = evidence.carrier_routes.iter().map(CarrierRoute::to_match).collect();
        sort_route_matches(&mut route_matches);
    }

    // 2. Industry keyword heuristic
    if intel.has_industry_keyword(&lower) {
        score += INDUSTRY_KEYWORD_POINTS;
        signals.push(Signal::IndustryKeyword);
        if route_matches.is_empty() {
            if let Some(brand) = intel.matched_brand(&lower) {
                route_matches = intel.lanes_for(brand);
                if !route_matches.is_empty() {
                    signals.push(Signal::BrandLaneFallback);
                }
            }
        }
    }

    // 3. Multi-modal corroboration
    let usable = usable_ocean_values(company, evidence.prior_ocean_shipments);
    if !usable.is_empty() {
        score += PRIOR_OCEAN_POINTS;
        signals.push(Signal::PriorOceanShipments);

        if mean_exceeds(&usable, Decimal::from(HIGH_VALUE_OCEAN_USD)) {
            score += HIGH_VALUE_OCEAN_POINTS;
            signals.push(Signal::HighValueOceanShipments);
        }
    }

    // 4. Reference-profile override
    if let Some(profile) = evidence.profile {
        if profile.likely_air_shipper {
            score += PROFILE_LIKELY_POINTS;
            signals.push(Signal::ProfileLikelyAirShipper);
        }
    }

    if score == 0 {
        score = WEAK_DEFAULT_SCORE;
        signals.push(Signal::WeakDefault);
    }

    // 5. Clamp, then let an explicit profile score raise the result
    score = score.min(100);
    if let Some(profile_score) = evidence.profile.and_then(|p| p.air_confidence_score) {
        let profile_score = u32::from(profile_score).min(100);
        if profile_score > score {
            score = profile_score;
            signals.push(Signal::ProfileScoreOverride);
        }
    }

    ScoreBreakdown {
        score,
        route_matches,
        signals,
    }
}

/// Whether the mean of `values` is above `threshold`. Values are non-negative,
/// so a sum that overflows the decimal range is far above any threshold.
fn mean_exceeds(values: &[Decimal], threshold: Decimal) -> bool {
    let total = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value));
    match total {
        Some(total) => total / Decimal::from(values.len()) > threshold,
        None => true,
    }
}

/// Values of prior shipments that are well-formed ocean records. Anything else
/// is malformed context: logged and skipped so scoring stays best-effort.
fn usable_ocean_values(company: &str, shipments: &[TradeRecord]) -> Vec<Decimal> {
    shipments
        .iter()
        .filter(|record| {
            if record.transport_mode != TransportMode::Ocean {
                warn!(company, mode = record.transport_mode.as_str(), "Ignoring non-ocean prior shipment");
                return false;
            }
            if let Err(e) = record.validate() {
                warn!(company, error = %e, "Ignoring invalid prior shipment");
                return false;
            }
            true
        })
        .map(|record| record.value_usd)
        .collect()
}
