//! Air-shipper intelligence for trade-shipment records.
//!
//! Scores how likely a company is to ship by air, using carrier-route data,
//! company profiles and prior ocean-shipment history loaded into a shared
//! SQLite reference store by `airintel-loader`.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use airintel::engine::{ConfidenceEngine, EvaluationRequest};
//! use airintel::models::config::AirIntelConfig;
//! use airintel::query::{handle, IntelligenceQuery};
//! ```

pub use airintel_engine as engine;
pub use airintel_models as models;
pub use airintel_store as store;

pub mod query;

use std::sync::Arc;
use std::time::Duration;

use airintel_engine::{ConfidenceEngine, ContactEnricher, EnrichmentService, OfflineReference, ReferenceSource};
use airintel_models::config::AirIntelConfig;
use airintel_store::{EnrichmentCache, ReferenceReader, SqliteCrmStore, SqliteReader, StoreError};
use tracing::{info, warn};

/// Build a confidence engine from configuration.
///
/// An unreadable reference database is not fatal: the engine falls back to
/// its built-in intelligence tables for every lookup.
pub fn build_engine(config: &AirIntelConfig) -> ConfidenceEngine {
    let reference: Arc<dyn ReferenceSource> = match SqliteReader::open(&config.store.sqlite_path) {
        Ok(sqlite) => {
            info!(path = %config.store.sqlite_path, "Reference store opened");
            Arc::new(ReferenceReader::new(
                sqlite,
                config.store.memory_max_capacity,
                Duration::from_secs(config.store.memory_ttl_seconds),
            ))
        }
        Err(e) => {
            warn!(
                path = %config.store.sqlite_path,
                error = %e,
                "Reference store unavailable, serving fallback intelligence"
            );
            Arc::new(OfflineReference::new(e.to_string()))
        }
    };
    ConfidenceEngine::new(reference)
}

/// Build the contact-enrichment service around a provider client.
pub fn build_enrichment(
    config: &AirIntelConfig,
    enricher: Arc<dyn ContactEnricher>,
) -> Result<EnrichmentService, StoreError> {
    let cache = EnrichmentCache::open(&config.store.app_sqlite_path)?;
    Ok(EnrichmentService::new(
        Arc::new(cache),
        enricher,
        Duration::from_secs(config.enrichment.timeout_seconds),
    ))
}

/// Open the campaign and outreach repositories.
pub fn open_crm(config: &AirIntelConfig) -> Result<SqliteCrmStore, StoreError> {
    SqliteCrmStore::open(&config.store.app_sqlite_path)
}
