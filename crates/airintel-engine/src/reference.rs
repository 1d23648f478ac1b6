use airintel_models::{CarrierRoute, CompanyProfile, TradeRecord};
use airintel_store::{ReferenceReader, StoreError};
use async_trait::async_trait;

use crate::error::EngineError;

/// Read-only reference data the engine scores against. Mockable for testing.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Carrier routes whose carrier name contains `company`, case-insensitively.
    async fn carrier_routes(&self, company: &str) -> Result<Vec<CarrierRoute>, EngineError>;

    async fn company_profile(&self, company: &str) -> Result<Option<CompanyProfile>, EngineError>;

    /// Ocean shipments previously recorded for `company`.
    async fn ocean_shipments(&self, company: &str) -> Result<Vec<TradeRecord>, EngineError>;
}

fn unavailable(e: StoreError) -> EngineError {
    EngineError::ReferenceDataUnavailable(e.to_string())
}

#[async_trait]
impl ReferenceSource for ReferenceReader {
    async fn carrier_routes(&self, company: &str) -> Result<Vec<CarrierRoute>, EngineError> {
        self.routes_for_carrier(company).await.map_err(unavailable)
    }

    async fn company_profile(&self, company: &str) -> Result<Option<CompanyProfile>, EngineError> {
        ReferenceReader::company_profile(self, company)
            .await
            .map_err(unavailable)
    }

    async fn ocean_shipments(&self, company: &str) -> Result<Vec<TradeRecord>, EngineError> {
        self.ocean_shipments_for(company).await.map_err(unavailable)
    }
}

/// Stand-in used when the reference database cannot be opened. Every lookup
/// reports the store as unreachable, which routes evaluation to the fallback table.
pub struct OfflineReference {
    reason: String,
}

impl OfflineReference {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ReferenceSource for OfflineReference {
    async fn carrier_routes(&self, _company: &str) -> Result<Vec<CarrierRoute>, EngineError> {
        Err(EngineError::ReferenceDataUnavailable(self.reason.clone()))
    }

    async fn company_profile(&self, _company: &str) -> Result<Option<CompanyProfile>, EngineError> {
        Err(EngineError::ReferenceDataUnavailable(self.reason.clone()))
    }

    async fn ocean_shipments(&self, _company: &str) -> Result<Vec<TradeRecord>, EngineError> {
        Err(EngineError::ReferenceDataUnavailable(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airintel_store::SqliteReader;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    #[tokio::test]
    async fn reference_reader_implements_source() {
        let sqlite = SqliteReader::open_in_memory().unwrap();
        sqlite
            .insert_route(&CarrierRoute {
                origin_airport: "ANC".to_string(),
                dest_airport: "CVG".to_string(),
                carrier_name: "Atlas Air".to_string(),
                freight_kg: dec!(64000),
                year: 2024,
                month: 1,
            })
            .unwrap();
        let reader = ReferenceReader::new(sqlite, 10, Duration::from_secs(60));
        let source: &dyn ReferenceSource = &reader;

        assert_eq!(source.carrier_routes("atlas").await.unwrap().len(), 1);
        assert!(source.company_profile("Atlas Air").await.unwrap().is_none());
        assert!(source.ocean_shipments("Atlas Air").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn offline_reference_is_unavailable() {
        let source = OfflineReference::new("database file missing");
        let err = source.carrier_routes("Acme").await.unwrap_err();
        assert!(matches!(err, EngineError::ReferenceDataUnavailable(_)));
        assert!(err.to_string().contains("database file missing"));
    }
}
