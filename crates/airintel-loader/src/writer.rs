use airintel_models::schema::{key_patterns, SCHEMA_DDL};
use airintel_models::{CarrierRoute, CompanyProfile, TradeRecord};
use rusqlite::Connection;

use crate::error::LoaderError;

/// Writable connection to the reference database.
///
/// Opens in read-write mode with WAL journal so the engine can keep reading
/// while a load is in progress.
pub struct SqliteWriter {
    conn: Connection,
}

impl SqliteWriter {
    /// Open a read-write connection. Creates the schema if it doesn't exist.
    pub fn open(path: &str) -> Result<Self, LoaderError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA_DDL)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database for testing.
    pub fn open_in_memory() -> Result<Self, LoaderError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_DDL)?;
        Ok(Self { conn })
    }

    /// Upsert carrier routes in one transaction. Returns the number written.
    pub fn upsert_routes(&mut self, routes: &[CarrierRoute]) -> Result<usize, LoaderError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO carrier_routes \
                 (origin_airport, dest_airport, carrier_name, freight_kg, year, month) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for route in routes {
                stmt.execute(rusqlite::params![
                    route.origin_airport,
                    route.dest_airport,
                    route.carrier_name,
                    route.freight_kg.to_string(),
                    route.year,
                    route.month,
                ])?;
            }
        }
        tx.commit()?;
        Ok(routes.len())
    }

    /// Upsert company profiles in one transaction, keyed by normalized name.
    pub fn upsert_profiles(&mut self, profiles: &[CompanyProfile]) -> Result<usize, LoaderError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO company_profiles \
                 (company_key, company_name, likely_air_shipper, air_confidence_score, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for profile in profiles {
                stmt.execute(rusqlite::params![
                    key_patterns::company_key(&profile.company_name),
                    profile.company_name,
                    profile.likely_air_shipper,
                    profile.air_confidence_score,
                    profile.updated_at,
                ])?;
            }
        }
        tx.commit()?;
        Ok(profiles.len())
    }

    /// Append trade records in one transaction.
    pub fn insert_trade_records(&mut self, records: &[TradeRecord]) -> Result<usize, LoaderError> {
        let tx = self.conn.transaction()?;
        Self::insert_trade_rows(&tx, records)?;
        tx.commit()?;
        Ok(records.len())
    }

    /// Swap every trade record for `records` in one transaction. Readers see
    /// either the old set or the new one, never an empty table in between.
    /// Returns the number of rows deleted.
    pub fn replace_trade_records(&mut self, records: &[TradeRecord]) -> Result<usize, LoaderError> {
        let tx = self.conn.transaction()?;
        let cleared = tx.execute("DELETE FROM trade_records", [])?;
        Self::insert_trade_rows(&tx, records)?;
        tx.commit()?;
        Ok(cleared)
    }

    fn insert_trade_rows(tx: &rusqlite::Transaction<'_>, records: &[TradeRecord]) -> Result<(), LoaderError> {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO trade_records \
             (company_key, company_name, hs_code, country, transport_mode, value_usd, weight_kg, year, month) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;
        for record in records {
            stmt.execute(rusqlite::params![
                key_patterns::company_key(&record.company_name),
                record.company_name,
                record.hs_code,
                record.country,
                record.transport_mode.as_str(),
                record.value_usd.to_string(),
                record.weight_kg.to_string(),
                record.year,
                record.month,
            ])?;
        }
        Ok(())
    }

    pub fn route_count(&self) -> Result<usize, LoaderError> {
        self.count("carrier_routes")
    }

    pub fn profile_count(&self) -> Result<usize, LoaderError> {
        self.count("company_profiles")
    }

    pub fn trade_record_count(&self) -> Result<usize, LoaderError> {
        self.count("trade_records")
    }

    fn count(&self, table: &'static str) -> Result<usize, LoaderError> {
        let count: usize = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count)
    }
}
