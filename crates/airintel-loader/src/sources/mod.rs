//! Source feeds. Each parser takes the raw JSON array for one feed and maps
//! rows to domain records; rows that cannot be mapped are skipped and counted.

pub mod census;
pub mod comtrade;
pub mod profiles;
pub mod t100;

use airintel_models::ModelError;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

use crate::error::LoaderError;

/// Records mapped from one feed plus the number of rows rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub rejected: usize,
}

/// Parse a JSON array of rows and map each one with `convert`.
///
/// A document that is not an array fails the whole feed. Individual rows that
/// do not deserialize or do not convert are logged and counted.
pub(crate) fn map_rows<R, T, F>(feed: &'static str, json: &str, convert: F) -> Result<Parsed<T>, LoaderError>
where
    R: DeserializeOwned,
    F: Fn(R) -> Result<T, ModelError>,
{
    let rows: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let mut records = Vec::with_capacity(rows.len());
    let mut rejected = 0;

    for (index, value) in rows.into_iter().enumerate() {
        let mapped = serde_json::from_value::<R>(value)
            .map_err(|e| e.to_string())
            .and_then(|row| convert(row).map_err(|e| e.to_string()));
        match mapped {
            Ok(record) => records.push(record),
            Err(reason) => {
                warn!(feed, row = index, reason = %reason, "Rejected source row");
                rejected += 1;
            }
        }
    }

    Ok(Parsed { records, rejected })
}

/// Numeric field that public APIs deliver either as a JSON number or a string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Flexible {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Flexible {
    pub fn as_i64(&self, field: &'static str) -> Result<i64, ModelError> {
        match self {
            Flexible::Int(v) => Ok(*v),
            Flexible::Float(v) if v.fract() == 0.0 => Ok(*v as i64),
            Flexible::Text(s) => s.trim().parse().map_err(|_| invalid(field, s)),
            Flexible::Float(v) => Err(invalid(field, v)),
        }
    }

    pub fn as_decimal(&self, field: &'static str) -> Result<Decimal, ModelError> {
        match self {
            Flexible::Int(v) => Ok(Decimal::from(*v)),
            Flexible::Float(v) => decimal_from_f64(field, *v),
            Flexible::Text(s) => s.trim().parse().map_err(|_| invalid(field, s)),
        }
    }

    /// The raw text form, used for code fields such as transport modes.
    pub fn as_code(&self) -> String {
        match self {
            Flexible::Int(v) => v.to_string(),
            Flexible::Float(v) => v.to_string(),
            Flexible::Text(s) => s.trim().to_string(),
        }
    }
}

pub(crate) fn decimal_from_f64(field: &'static str, value: f64) -> Result<Decimal, ModelError> {
    Decimal::from_f64(value).ok_or_else(|| invalid(field, value))
}

pub(crate) fn month_from(field: &'static str, value: i64) -> Result<u32, ModelError> {
    match u32::try_from(value) {
        Ok(month) if (1..=12).contains(&month) => Ok(month),
        _ => Err(invalid(field, value)),
    }
}

pub(crate) fn invalid(field: &'static str, value: impl std::fmt::Display) -> ModelError {
    ModelError::InvalidField {
        field,
        reason: format!("unusable value {value}"),
    }
}
