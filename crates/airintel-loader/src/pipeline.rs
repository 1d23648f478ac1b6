use std::fs;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::LoaderConfig;
use crate::error::LoaderError;
use crate::sources::{census, comtrade, profiles, t100, Parsed};
use crate::writer::SqliteWriter;

/// Outcome of loading one source feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub source: &'static str,
    pub written: usize,
    pub rejected: usize,
}

/// Load every configured source into the reference database.
///
/// All feeds are read and parsed before anything is written, so a missing or
/// malformed file leaves the database untouched. Census and Comtrade records
/// are written together in one transaction; with `replace_trade_records` that
/// transaction also removes the previous load.
pub fn run(config: &LoaderConfig, writer: &mut SqliteWriter) -> Result<Vec<IngestReport>, LoaderError> {
    let sources = &config.sources;
    if sources.is_empty() {
        return Err(LoaderError::Config("no sources configured".to_string()));
    }

    let route_rows = parse_source(&sources.t100_path, t100::parse)?;
    let census_rows = parse_source(&sources.census_path, census::parse)?;
    let comtrade_rows = parse_source(&sources.comtrade_path, comtrade::parse)?;
    let profile_rows = parse_source(&sources.profiles_path, |json| profiles::parse(json, Utc::now()))?;

    let mut reports = Vec::new();

    if let Some(parsed) = route_rows {
        let written = writer.upsert_routes(&parsed.records)?;
        reports.push(report("t100", written, parsed.rejected));
    }

    if census_rows.is_some() || comtrade_rows.is_some() {
        let mut records = Vec::new();
        for parsed in [&census_rows, &comtrade_rows].into_iter().flatten() {
            records.extend_from_slice(&parsed.records);
        }
        if config.store.replace_trade_records {
            let cleared = writer.replace_trade_records(&records)?;
            info!(cleared, loaded = records.len(), "Replaced previously loaded trade records");
        } else {
            writer.insert_trade_records(&records)?;
        }
    }
    if let Some(parsed) = &census_rows {
        reports.push(report("census", parsed.records.len(), parsed.rejected));
    }
    if let Some(parsed) = &comtrade_rows {
        reports.push(report("comtrade", parsed.records.len(), parsed.rejected));
    }

    if let Some(parsed) = profile_rows {
        let written = writer.upsert_profiles(&parsed.records)?;
        reports.push(report("profiles", written, parsed.rejected));
    }

    Ok(reports)
}

fn parse_source<T>(
    path: &Option<String>,
    parse: impl FnOnce(&str) -> Result<Parsed<T>, LoaderError>,
) -> Result<Option<Parsed<T>>, LoaderError> {
    path.as_deref().map(|path| parse(&read(path)?)).transpose()
}

fn read(path: &str) -> Result<String, LoaderError> {
    fs::read_to_string(path).map_err(|e| {
        LoaderError::Io(std::io::Error::new(e.kind(), format!("{path}: {e}")))
    })
}

fn report(source: &'static str, written: usize, rejected: usize) -> IngestReport {
    if rejected > 0 {
        warn!(source, written, rejected, "Source loaded with rejected rows");
    } else {
        info!(source, written, "Source loaded");
    }
    IngestReport {
        source,
        written,
        rejected,
    }
}
