use std::sync::Arc;
use std::time::Duration;

use airintel_models::{enrichment_key, Contact, EnrichmentCacheEntry, Location, Organization};
use airintel_store::EnrichmentCache;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::EngineError;
use crate::naming::display_name;

/// What a contact-enrichment provider returns for one company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EnrichmentPayload {
    pub contacts: Vec<Contact>,
    pub organization: Option<Organization>,
}

/// Third-party contact-enrichment API. Mockable for testing.
#[async_trait]
pub trait ContactEnricher: Send + Sync {
    fn name(&self) -> &str;

    async fn enrich(&self, company: &str, location: &Location) -> Result<EnrichmentPayload, EngineError>;
}

/// How the returned contacts were obtained.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// Served from cache within the staleness horizon.
    Cached,
    /// Fetched from the provider just now.
    Refreshed,
    /// Provider failed; serving an entry past the staleness horizon.
    Stale,
    /// Provider failed and nothing was cached.
    Unavailable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichmentLookup {
    pub key: String,
    pub freshness: Freshness,
    /// `None` only when `freshness` is `Unavailable`.
    pub entry: Option<EnrichmentCacheEntry>,
}

impl EnrichmentLookup {
    pub fn contacts(&self) -> &[Contact] {
        self.entry
            .as_ref()
            .map(|entry| entry.contacts.as_slice())
            .unwrap_or_default()
    }
}

/// Cache-first contact lookup. Provider failures and timeouts degrade to stale
/// data or to "no contacts"; they never fail the caller.
pub struct EnrichmentService {
    cache: Arc<EnrichmentCache>,
    enricher: Arc<dyn ContactEnricher>,
    timeout: Duration,
}

impl EnrichmentService {
    pub fn new(cache: Arc<EnrichmentCache>, enricher: Arc<dyn ContactEnricher>, timeout: Duration) -> Self {
        Self {
            cache,
            enricher,
            timeout,
        }
    }

    pub async fn lookup(&self, company: &str, location: &Location) -> Result<EnrichmentLookup, EngineError> {
        self.lookup_at(company, location, Utc::now()).await
    }

    pub async fn lookup_at(
        &self,
        company: &str,
        location: &Location,
        now: DateTime<Utc>,
    ) -> Result<EnrichmentLookup, EngineError> {
        let company = display_name(company);
        if company.is_empty() {
            return Err(EngineError::MissingInput("company_name"));
        }
        let key = enrichment_key(&company, location);

        let cached = match self.cache.get_any(&key) {
            Ok(cached) => cached,
            Err(e) => {
                warn!(company = %company, error = %e, "Enrichment cache read failed, treating as miss");
                None
            }
        };
        if let Some(entry) = &cached {
            if !entry.is_stale(now) {
                return Ok(EnrichmentLookup {
                    key,
                    freshness: Freshness::Cached,
                    entry: cached,
                });
            }
        }

        let fetched = match tokio::time::timeout(self.timeout, self.enricher.enrich(&company, location)).await {
            Ok(result) => result,
            Err(_) => Err(EngineError::Timeout(self.timeout)),
        };

        match fetched {
            Ok(payload) => {
                let entry = match self.cache.put_at(&key, &payload.contacts, payload.organization.as_ref(), now) {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!(company = %company, error = %e, "Enrichment cache write failed, serving uncached result");
                        EnrichmentCacheEntry {
                            key: key.clone(),
                            contacts: payload.contacts,
                            organization: payload.organization,
                            enriched_at: now,
                        }
                    }
                };
                info!(
                    company = %company,
                    provider = self.enricher.name(),
                    contacts = entry.contacts.len(),
                    "Enrichment refreshed"
                );
                Ok(EnrichmentLookup {
                    key,
                    freshness: Freshness::Refreshed,
                    entry: Some(entry),
                })
            }
            Err(e) => {
                warn!(
                    company = %company,
                    provider = self.enricher.name(),
                    error = %e,
                    has_stale = cached.is_some(),
                    "Enrichment failed"
                );
                let freshness = if cached.is_some() {
                    Freshness::Stale
                } else {
                    Freshness::Unavailable
                };
                Ok(EnrichmentLookup {
                    key,
                    freshness,
                    entry: cached,
                })
            }
        }
    }
}
