use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long an enrichment result is considered fresh.
pub const ENRICHMENT_STALE_AFTER_DAYS: i64 = 7;

/// A person returned by the contact-enrichment provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Contact {
    pub name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
}

/// Organization details returned alongside contacts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Organization {
    pub name: String,
    pub domain: Option<String>,
    pub industry: Option<String>,
    pub employee_count: Option<u32>,
}

/// Location fields that, together with the company name, key the cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Location {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Memoized contact lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichmentCacheEntry {
    pub key: String,
    pub contacts: Vec<Contact>,
    pub organization: Option<Organization>,
    pub enriched_at: DateTime<Utc>,
}

impl EnrichmentCacheEntry {
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now - self.enriched_at > Duration::days(ENRICHMENT_STALE_AFTER_DAYS)
    }
}

/// Cache key: lowercase company name followed by the lowercase location fields.
/// Distinct companies may collide; a false hit only serves slightly stale contacts.
pub fn enrichment_key(company_name: &str, location: &Location) -> String {
    let mut key = company_name.trim().to_lowercase();
    for part in [&location.city, &location.state, &location.country] {
        key.push(':');
        if let Some(value) = part {
            key.push_str(&value.trim().to_lowercase());
        }
    }
    key
}
