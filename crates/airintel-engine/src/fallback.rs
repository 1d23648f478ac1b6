//! Static reference tables used when live reference data cannot answer.
//!
//! Two tables live here:
//! - brand lanes: representative airport pairs for recognizable electronics
//!   brands, used to populate `route_matches` when a brand keyword fires but
//!   no carrier route matched;
//! - fallback tiers: fixed confidence scores keyed by brand/keyword
//!   substrings, used when the carrier-route store is unreachable.
//!
//! Both are plain data on [`FallbackIntel`] so tests can substitute their own.

use airintel_models::{sort_route_matches, RouteMatch};
use rust_decimal::Decimal;

/// Industry keywords associated with historically air-shipped goods.
pub const INDUSTRY_KEYWORDS: &[&str] = &["electronics", "tech"];

/// Electronics brand name fragments. Substring matched against the lowercased name.
pub const BRAND_FRAGMENTS: &[&str] = &[
    "samsung",
    "lg",
    "sony",
    "panasonic",
    "toshiba",
    "foxconn",
    "huawei",
];

pub const HIGH_CONFIDENCE: u8 = 85;
pub const MEDIUM_CONFIDENCE: u8 = 72;
pub const LOW_CONFIDENCE: u8 = 35;

/// One representative lane for a brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandLane {
    pub brand: String,
    pub origin_airport: String,
    pub dest_airport: String,
    pub carrier_name: String,
    pub freight_kg: u64,
}

/// A confidence tier: every key is a lowercase substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackTier {
    pub score: u8,
    pub keys: Vec<String>,
}

/// Verdict from the fallback tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackVerdict {
    pub score: u8,
    pub matched_key: Option<String>,
    pub route_matches: Vec<RouteMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackIntel {
    pub industry_keywords: Vec<String>,
    pub brand_fragments: Vec<String>,
    pub brand_lanes: Vec<BrandLane>,
    /// Checked in order; the first tier with a matching key wins.
    pub tiers: Vec<FallbackTier>,
    /// Score when no tier matches.
    pub default_score: u8,
}

const BUILTIN_LANES: &[(&str, &str, &str, &str, u64)] = &[
    ("samsung", "ICN", "LAX", "Korean Air Cargo", 185_000),
    ("samsung", "ICN", "ORD", "Asiana Airlines Cargo", 142_000),
    ("samsung", "ICN", "JFK", "Korean Air Cargo", 98_000),
    ("lg", "ICN", "ATL", "Korean Air Cargo", 76_000),
    ("lg", "ICN", "LAX", "Asiana Airlines Cargo", 64_000),
    ("sony", "NRT", "LAX", "Nippon Cargo Airlines", 88_000),
    ("sony", "NRT", "ORD", "ANA Cargo", 51_000),
    ("panasonic", "KIX", "ORD", "Nippon Cargo Airlines", 47_000),
    ("toshiba", "NRT", "JFK", "Nippon Cargo Airlines", 39_000),
    ("foxconn", "TPE", "LAX", "China Airlines Cargo", 133_000),
    ("foxconn", "TPE", "ANC", "EVA Air Cargo", 91_000),
    ("huawei", "PVG", "ANC", "China Cargo Airlines", 72_000),
];

const HIGH_TIER_KEYS: &[&str] = &[
    "samsung",
    "sony",
    "lg electronics",
    "panasonic",
    "toshiba",
    "foxconn",
    "huawei",
];

const MEDIUM_TIER_KEYS: &[&str] = &["electronics", "tech", "semiconductor", "pharma", "medical"];

impl Default for FallbackIntel {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FallbackIntel {
    /// The built-in tables.
    pub fn builtin() -> Self {
        let to_strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            industry_keywords: to_strings(INDUSTRY_KEYWORDS),
            brand_fragments: to_strings(BRAND_FRAGMENTS),
            brand_lanes: BUILTIN_LANES
                .iter()
                .map(|(brand, origin, dest, carrier, freight)| BrandLane {
                    brand: brand.to_string(),
                    origin_airport: origin.to_string(),
                    dest_airport: dest.to_string(),
                    carrier_name: carrier.to_string(),
                    freight_kg: *freight,
                })
                .collect(),
            tiers: vec![
                FallbackTier {
                    score: HIGH_CONFIDENCE,
                    keys: to_strings(HIGH_TIER_KEYS),
                },
                FallbackTier {
                    score: MEDIUM_CONFIDENCE,
                    keys: to_strings(MEDIUM_TIER_KEYS),
                },
            ],
            default_score: LOW_CONFIDENCE,
        }
    }

    /// First brand fragment contained in the lowercased name.
    pub fn matched_brand(&self, lower_name: &str) -> Option<&str> {
        self.brand_fragments
            .iter()
            .find(|brand| lower_name.contains(brand.as_str()))
            .map(String::as_str)
    }

    /// Whether the name carries an industry keyword or a brand fragment.
    pub fn has_industry_keyword(&self, lower_name: &str) -> bool {
        self.industry_keywords
            .iter()
            .any(|keyword| lower_name.contains(keyword.as_str()))
            || self.matched_brand(lower_name).is_some()
    }

    /// Representative lanes for a brand, heaviest first.
    pub fn lanes_for(&self, brand: &str) -> Vec<RouteMatch> {
        let mut lanes: Vec<RouteMatch> = self
            .brand_lanes
            .iter()
            .filter(|lane| lane.brand == brand)
            .map(|lane| RouteMatch {
                origin_airport: lane.origin_airport.clone(),
                dest_airport: lane.dest_airport.clone(),
                carrier_name: lane.carrier_name.clone(),
                freight_kg: Decimal::from(lane.freight_kg),
            })
            .collect();
        sort_route_matches(&mut lanes);
        lanes
    }

    /// Answer from the tier table alone. Brand lanes are attached only when a
    /// tier above the default matched.
    pub fn verdict(&self, lower_name: &str) -> FallbackVerdict {
        for tier in &self.tiers {
            if let Some(key) = tier.keys.iter().find(|key| lower_name.contains(key.as_str())) {
                let route_matches = self
                    .matched_brand(lower_name)
                    .map(|brand| self.lanes_for(brand))
                    .unwrap_or_default();
                return FallbackVerdict {
                    score: tier.score,
                    matched_key: Some(key.clone()),
                    route_matches,
                };
            }
        }
        FallbackVerdict {
            score: self.default_score,
            matched_key: None,
            route_matches: Vec::new(),
        }
    }
}
