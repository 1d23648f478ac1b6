/// SQLite schema shared by the loader (writer) and the engine's reference
/// store (reader).
///
/// ```sql
/// carrier_routes   (origin_airport, dest_airport, carrier_name, freight_kg, year, month)
/// company_profiles (company_key PK, company_name, likely_air_shipper, air_confidence_score, updated_at)
/// trade_records    (id PK, company_name, hs_code, country, transport_mode, value_usd, weight_kg, year, month)
/// enrichment_cache (cache_key PK, contacts_json, organization_json, enriched_at)
/// campaigns        (id PK, name, status, min_confidence, created_at, updated_at)
/// outreach_logs    (id PK, campaign_id, company_name, contact_email, channel, note, sent_at)
/// ```
///
/// Decimal columns are stored as TEXT to keep exact values.
pub const SCHEMA_DDL: &str = "\
CREATE TABLE IF NOT EXISTS carrier_routes (
    origin_airport  TEXT NOT NULL,
    dest_airport    TEXT NOT NULL,
    carrier_name    TEXT NOT NULL,
    freight_kg      TEXT NOT NULL,
    year            INTEGER NOT NULL,
    month           INTEGER NOT NULL,
    PRIMARY KEY (origin_airport, dest_airport, carrier_name, year, month)
);
CREATE INDEX IF NOT EXISTS idx_routes_carrier ON carrier_routes(carrier_name);

CREATE TABLE IF NOT EXISTS company_profiles (
    company_key          TEXT PRIMARY KEY,
    company_name         TEXT NOT NULL,
    likely_air_shipper   INTEGER NOT NULL,
    air_confidence_score INTEGER,
    updated_at           TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS trade_records (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    company_key     TEXT NOT NULL,
    company_name    TEXT NOT NULL,
    hs_code         TEXT NOT NULL,
    country         TEXT NOT NULL,
    transport_mode  TEXT NOT NULL,
    value_usd       TEXT NOT NULL,
    weight_kg       TEXT NOT NULL,
    year            INTEGER NOT NULL,
    month           INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_trade_company ON trade_records(company_key, transport_mode);

CREATE TABLE IF NOT EXISTS enrichment_cache (
    cache_key          TEXT PRIMARY KEY,
    contacts_json      TEXT NOT NULL,
    organization_json  TEXT,
    enriched_at        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS campaigns (
    id              TEXT PRIMARY KEY,
    name            TEXT NOT NULL,
    status          TEXT NOT NULL,
    min_confidence  INTEGER NOT NULL,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS outreach_logs (
    id              TEXT PRIMARY KEY,
    campaign_id     TEXT NOT NULL REFERENCES campaigns(id),
    company_name    TEXT NOT NULL,
    contact_email   TEXT,
    channel         TEXT NOT NULL,
    note            TEXT,
    sent_at         TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_outreach_campaign ON outreach_logs(campaign_id);
";

/// Key conventions for the in-memory hot cache and the profile table.
///
/// - Carrier route lookups: `routes:{fragment}` (e.g., `routes:korean air`)
/// - Company profiles: `profile:{company}` (e.g., `profile:samsung electronics`)
/// - Prior ocean shipments: `ocean:{company}`
pub mod key_patterns {
    /// Normalized company key: lowercased, with runs of whitespace collapsed
    /// to one space. Writers and readers must both key through here.
    pub fn company_key(company: &str) -> String {
        company
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    pub fn routes(fragment: &str) -> String {
        format!("routes:{}", company_key(fragment))
    }

    pub fn profile(company: &str) -> String {
        format!("profile:{}", company_key(company))
    }

    pub fn ocean_shipments(company: &str) -> String {
        format!("ocean:{}", company_key(company))
    }
}
