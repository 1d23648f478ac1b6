use airintel_models::schema::{key_patterns, SCHEMA_DDL};
use airintel_models::{CarrierRoute, CompanyProfile, TradeRecord, TransportMode};
use rusqlite::{Connection, Row};
use rust_decimal::Decimal;

use crate::error::StoreError;

/// Read-only accessor for the reference database.
///
/// The database is populated by `airintel-loader`; the engine only reads it.
pub struct SqliteReader {
    conn: Connection,
}

impl SqliteReader {
    /// Open a read-only connection to the reference database.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database with the schema applied. Writable so tests can seed data.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_DDL)?;
        Ok(Self { conn })
    }

    /// Routes whose carrier name contains `fragment`, case-insensitively.
    pub fn routes_for_carrier(&self, fragment: &str) -> Result<Vec<CarrierRoute>, StoreError> {
        let needle = fragment.trim().to_lowercase();
        let mut stmt = self.conn.prepare_cached(
            "SELECT origin_airport, dest_airport, carrier_name, freight_kg, year, month \
             FROM carrier_routes WHERE instr(lower(carrier_name), ?1) > 0",
        )?;

        let rows = stmt
            .query_map(rusqlite::params![needle], |row| {
                Ok(CarrierRoute {
                    origin_airport: row.get(0)?,
                    dest_airport: row.get(1)?,
                    carrier_name: row.get(2)?,
                    freight_kg: decimal_column(row, 3)?,
                    year: row.get(4)?,
                    month: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Profile for a company, matched on the normalized company key.
    pub fn company_profile(&self, company: &str) -> Result<Option<CompanyProfile>, StoreError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT company_name, likely_air_shipper, air_confidence_score, updated_at \
             FROM company_profiles WHERE company_key = ?1",
        )?;

        let result = stmt.query_row(
            rusqlite::params![key_patterns::company_key(company)],
            |row| {
                Ok(CompanyProfile {
                    company_name: row.get(0)?,
                    likely_air_shipper: row.get(1)?,
                    air_confidence_score: row.get(2)?,
                    updated_at: row.get(3)?,
                })
            },
        );

        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::Sqlite(e)),
        }
    }

    /// Ocean shipments previously recorded for a company.
    pub fn ocean_shipments_for(&self, company: &str) -> Result<Vec<TradeRecord>, StoreError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT company_name, hs_code, country, transport_mode, value_usd, weight_kg, year, month \
             FROM trade_records WHERE company_key = ?1 AND transport_mode = ?2 \
             ORDER BY year, month, id",
        )?;

        let rows = stmt
            .query_map(
                rusqlite::params![
                    key_patterns::company_key(company),
                    TransportMode::Ocean.as_str()
                ],
                trade_record_from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Insert a carrier route. The loader writes in bulk; this is for tests and small fixtures.
    pub fn insert_route(&self, route: &CarrierRoute) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO carrier_routes \
             (origin_airport, dest_airport, carrier_name, freight_kg, year, month) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                route.origin_airport,
                route.dest_airport,
                route.carrier_name,
                route.freight_kg.to_string(),
                route.year,
                route.month,
            ],
        )?;
        Ok(())
    }

    pub fn insert_profile(&self, profile: &CompanyProfile) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO company_profiles \
             (company_key, company_name, likely_air_shipper, air_confidence_score, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                key_patterns::company_key(&profile.company_name),
                profile.company_name,
                profile.likely_air_shipper,
                profile.air_confidence_score,
                profile.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn insert_trade_record(&self, record: &TradeRecord) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO trade_records \
             (company_key, company_name, hs_code, country, transport_mode, value_usd, weight_kg, year, month) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                key_patterns::company_key(&record.company_name),
                record.company_name,
                record.hs_code,
                record.country,
                record.transport_mode.as_str(),
                record.value_usd.to_string(),
                record.weight_kg.to_string(),
                record.year,
                record.month,
            ],
        )?;
        Ok(())
    }
}

/// Map a `trade_records` row (columns in schema order, without id/key) to a record.
pub fn trade_record_from_row(row: &Row<'_>) -> rusqlite::Result<TradeRecord> {
    let mode: String = row.get(3)?;
    let transport_mode = mode.parse::<TransportMode>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(TradeRecord {
        company_name: row.get(0)?,
        hs_code: row.get(1)?,
        country: row.get(2)?,
        transport_mode,
        value_usd: decimal_column(row, 4)?,
        weight_kg: decimal_column(row, 5)?,
        year: row.get(6)?,
        month: row.get(7)?,
    })
}

/// Read a TEXT column holding an exact decimal.
pub fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    text.parse::<Decimal>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn route(origin: &str, dest: &str, carrier: &str, freight: Decimal) -> CarrierRoute {
        CarrierRoute {
            origin_airport: origin.to_string(),
            dest_airport: dest.to_string(),
            carrier_name: carrier.to_string(),
            freight_kg: freight,
            year: 2024,
            month: 5,
        }
    }

    fn record(company: &str, mode: TransportMode, value: Decimal) -> TradeRecord {
        TradeRecord {
            company_name: company.to_string(),
            hs_code: "8517620000".to_string(),
            country: "China".to_string(),
            transport_mode: mode,
            value_usd: value,
            weight_kg: dec!(900),
            year: 2024,
            month: 2,
        }
    }

    #[test]
    fn routes_match_carrier_substring_case_insensitively() {
        let reader = SqliteReader::open_in_memory().unwrap();
        reader
            .insert_route(&route("ICN", "LAX", "Korean Air Lines Co. Ltd.", dec!(52000.5)))
            .unwrap();
        reader
            .insert_route(&route("ANC", "ORD", "Atlas Air Inc.", dec!(81000)))
            .unwrap();

        let routes = reader.routes_for_carrier("KOREAN AIR").unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].freight_kg, dec!(52000.5));

        let air = reader.routes_for_carrier("air").unwrap();
        assert_eq!(air.len(), 2);
    }

    #[test]
    fn routes_missing_carrier() {
        let reader = SqliteReader::open_in_memory().unwrap();
        assert!(reader.routes_for_carrier("Unknown Corp").unwrap().is_empty());
    }

    #[test]
    fn profile_lookup_is_case_insensitive() {
        let reader = SqliteReader::open_in_memory().unwrap();
        reader
            .insert_profile(&CompanyProfile {
                company_name: "Flex Ltd".to_string(),
                likely_air_shipper: true,
                air_confidence_score: Some(88),
                updated_at: Utc::now(),
            })
            .unwrap();

        let profile = reader.company_profile("  flex LTD").unwrap().unwrap();
        assert!(profile.likely_air_shipper);
        assert_eq!(profile.air_confidence_score, Some(88));
        assert!(reader.company_profile("Flextronics").unwrap().is_none());
    }

    #[test]
    fn ocean_shipments_filter_by_mode() {
        let reader = SqliteReader::open_in_memory().unwrap();
        reader
            .insert_trade_record(&record("Acme", TransportMode::Ocean, dec!(120000)))
            .unwrap();
        reader
            .insert_trade_record(&record("Acme", TransportMode::Air, dec!(5000)))
            .unwrap();
        reader
            .insert_trade_record(&record("Other", TransportMode::Ocean, dec!(1)))
            .unwrap();

        let shipments = reader.ocean_shipments_for("ACME").unwrap();
        assert_eq!(shipments.len(), 1);
        assert_eq!(shipments[0].value_usd, dec!(120000));
        assert_eq!(shipments[0].transport_mode, TransportMode::Ocean);
    }

    #[test]
    fn open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        assert!(SqliteReader::open(path.to_str().unwrap()).is_err());
    }
}
