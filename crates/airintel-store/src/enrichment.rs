use std::sync::Mutex;

use airintel_models::schema::SCHEMA_DDL;
use airintel_models::{Contact, EnrichmentCacheEntry, Organization};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::error::StoreError;

/// Persistent cache of contact-enrichment results.
///
/// Concurrent `put`s for the same key are last-write-wins. Entries are never
/// deleted here; retention belongs to the database owner.
pub struct EnrichmentCache {
    conn: Mutex<Connection>,
}

impl EnrichmentCache {
    /// Open a read-write connection, creating the schema if needed. Enables WAL.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA_DDL)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_DDL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Fresh entry for `key`, or `None` if absent or older than the staleness horizon.
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> Result<Option<EnrichmentCacheEntry>, StoreError> {
        Ok(self.get_any(key)?.filter(|entry| !entry.is_stale(now)))
    }

    /// Entry for `key` regardless of age. Callers decide whether stale data is usable.
    pub fn get_any(&self, key: &str) -> Result<Option<EnrichmentCacheEntry>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT contacts_json, organization_json, enriched_at \
             FROM enrichment_cache WHERE cache_key = ?1",
        )?;

        let result = stmt.query_row(rusqlite::params![key], |row| {
            let contacts_json: String = row.get(0)?;
            let organization_json: Option<String> = row.get(1)?;
            let enriched_at: DateTime<Utc> = row.get(2)?;
            Ok((contacts_json, organization_json, enriched_at))
        });

        let (contacts_json, organization_json, enriched_at) = match result {
            Ok(columns) => columns,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(StoreError::Sqlite(e)),
        };

        let contacts: Vec<Contact> = serde_json::from_str(&contacts_json)?;
        let organization: Option<Organization> = match organization_json {
            Some(json) => serde_json::from_str(&json)?,
            None => None,
        };

        Ok(Some(EnrichmentCacheEntry {
            key: key.to_string(),
            contacts,
            organization,
            enriched_at,
        }))
    }

    /// Upsert an entry stamped with the current time.
    pub fn put(
        &self,
        key: &str,
        contacts: &[Contact],
        organization: Option<&Organization>,
    ) -> Result<EnrichmentCacheEntry, StoreError> {
        self.put_at(key, contacts, organization, Utc::now())
    }

    /// Upsert an entry with an explicit `enriched_at`.
    pub fn put_at(
        &self,
        key: &str,
        contacts: &[Contact],
        organization: Option<&Organization>,
        enriched_at: DateTime<Utc>,
    ) -> Result<EnrichmentCacheEntry, StoreError> {
        let contacts_json = serde_json::to_string(contacts)?;
        let organization_json = organization.map(serde_json::to_string).transpose()?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO enrichment_cache \
             (cache_key, contacts_json, organization_json, enriched_at) \
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![key, contacts_json, organization_json, enriched_at],
        )?;

        Ok(EnrichmentCacheEntry {
            key: key.to_string(),
            contacts: contacts.to_vec(),
            organization: organization.cloned(),
            enriched_at,
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("enrichment cache mutex poisoned: {e}")))
    }
}
