//! Test support: in-memory reference data and a scriptable enrichment provider.
//!
//! `StaticReference` applies the same matching rules as the SQLite reference
//! store (case-insensitive carrier substring, normalized profile key) so
//! scenarios can run without a database.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use airintel_models::schema::key_patterns;
use airintel_models::{CarrierRoute, CompanyProfile, Contact, Location, TradeRecord, TransportMode};
use async_trait::async_trait;

use crate::enrichment::{ContactEnricher, EnrichmentPayload};
use crate::error::EngineError;
use crate::reference::ReferenceSource;

/// Reference snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticReference {
    pub routes: Vec<CarrierRoute>,
    pub profiles: Vec<CompanyProfile>,
    pub shipments: Vec<TradeRecord>,
}

#[async_trait]
impl ReferenceSource for StaticReference {
    async fn carrier_routes(&self, company: &str) -> Result<Vec<CarrierRoute>, EngineError> {
        let needle = key_patterns::company_key(company);
        Ok(self
            .routes
            .iter()
            .filter(|route| route.carrier_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn company_profile(&self, company: &str) -> Result<Option<CompanyProfile>, EngineError> {
        let key = key_patterns::company_key(company);
        Ok(self
            .profiles
            .iter()
            .find(|profile| key_patterns::company_key(&profile.company_name) == key)
            .cloned())
    }

    async fn ocean_shipments(&self, company: &str) -> Result<Vec<TradeRecord>, EngineError> {
        let key = key_patterns::company_key(company);
        Ok(self
            .shipments
            .iter()
            .filter(|record| {
                record.transport_mode == TransportMode::Ocean
                    && key_patterns::company_key(&record.company_name) == key
            })
            .cloned()
            .collect())
    }
}

enum Behavior {
    Respond(EnrichmentPayload),
    Fail,
    Delay(Duration),
}

/// Enrichment provider that answers from a script and counts its calls.
pub struct MockEnricher {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl MockEnricher {
    pub fn responding(payload: EnrichmentPayload) -> Self {
        Self {
            behavior: Behavior::Respond(payload),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_contact(name: &str) -> Self {
        Self::responding(EnrichmentPayload {
            contacts: vec![Contact {
                name: name.to_string(),
                title: Some("Head of Logistics".to_string()),
                ..Default::default()
            }],
            organization: None,
        })
    }

    pub fn failing() -> Self {
        Self {
            behavior: Behavior::Fail,
            calls: AtomicUsize::new(0),
        }
    }

    /// Sleeps for `delay` and then answers with no contacts.
    pub fn slow(delay: Duration) -> Self {
        Self {
            behavior: Behavior::Delay(delay),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContactEnricher for MockEnricher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn enrich(&self, _company: &str, _location: &Location) -> Result<EnrichmentPayload, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Respond(payload) => Ok(payload.clone()),
            Behavior::Fail => Err(EngineError::Enrichment("mock provider failure".to_string())),
            Behavior::Delay(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(EnrichmentPayload::default())
            }
        }
    }
}
