use std::sync::Mutex;
use std::time::Duration;

use airintel_models::schema::key_patterns;
use airintel_models::{CarrierRoute, CompanyProfile, TradeRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::memory::MemoryCache;
use crate::sqlite::SqliteReader;

/// Read-through reference reader: moka (hot) → SQLite.
///
/// Every SQLite answer, including empty ones, is promoted to moka so repeated
/// lookups for the same company within the TTL do not touch the database.
///
/// SQLite access is synchronized via `Mutex` since `rusqlite::Connection` is not `Sync`.
pub struct ReferenceReader {
    memory: MemoryCache,
    sqlite: Mutex<SqliteReader>,
}

impl ReferenceReader {
    pub fn new(sqlite: SqliteReader, max_capacity: u64, memory_ttl: Duration) -> Self {
        Self {
            memory: MemoryCache::new(max_capacity, memory_ttl),
            sqlite: Mutex::new(sqlite),
        }
    }

    pub async fn routes_for_carrier(&self, fragment: &str) -> Result<Vec<CarrierRoute>, StoreError> {
        self.read_through(&key_patterns::routes(fragment), |sqlite| {
            sqlite.routes_for_carrier(fragment)
        })
        .await
    }

    pub async fn company_profile(&self, company: &str) -> Result<Option<CompanyProfile>, StoreError> {
        self.read_through(&key_patterns::profile(company), |sqlite| {
            sqlite.company_profile(company)
        })
        .await
    }

    pub async fn ocean_shipments_for(&self, company: &str) -> Result<Vec<TradeRecord>, StoreError> {
        self.read_through(&key_patterns::ocean_shipments(company), |sqlite| {
            sqlite.ocean_shipments_for(company)
        })
        .await
    }

    async fn read_through<T, F>(&self, key: &str, load: F) -> Result<T, StoreError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&SqliteReader) -> Result<T, StoreError>,
    {
        if let Some(value) = self.memory.get(key).await {
            return Ok(value);
        }

        let value = {
            let sqlite = self
                .sqlite
                .lock()
                .map_err(|e| StoreError::Unavailable(format!("SQLite mutex poisoned: {e}")))?;
            load(&sqlite)?
        };

        self.memory.insert(key, &value).await?;
        Ok(value)
    }
}
