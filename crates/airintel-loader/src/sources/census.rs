//! US Census international trade rows (imports by HS commodity and country).
//!
//! The Census API delivers every field as a string; numbers are accepted in
//! either form. Rows carry no importer, so the company name is inferred from
//! the commodity and country unless the feed was pre-joined with one.

use airintel_engine::normalize_company_name;
use airintel_models::{ModelError, TradeRecord, TransportMode};
use serde::Deserialize;

use super::{invalid, map_rows, month_from, Flexible, Parsed};
use crate::error::LoaderError;

#[derive(Debug, Clone, Deserialize)]
pub struct CensusRow {
    #[serde(rename = "I_COMMODITY")]
    pub commodity: String,
    #[serde(rename = "CTY_NAME")]
    pub country: String,
    /// "40" air, "20" vessel.
    #[serde(rename = "MODE")]
    pub mode: Flexible,
    #[serde(rename = "VAL_MO")]
    pub value_usd: Flexible,
    #[serde(rename = "WGT_MO")]
    pub weight_kg: Flexible,
    #[serde(rename = "YEAR")]
    pub year: Flexible,
    #[serde(rename = "MONTH")]
    pub month: Flexible,
    #[serde(rename = "COMPANY_NAME", default)]
    pub company_name: Option<String>,
}

impl TryFrom<CensusRow> for TradeRecord {
    type Error = ModelError;

    fn try_from(row: CensusRow) -> Result<Self, Self::Error> {
        let transport_mode = TransportMode::from_census_code(&row.mode.as_code())?;
        let hs_code = row.commodity.trim().to_string();
        if hs_code.is_empty() {
            return Err(invalid("I_COMMODITY", "empty"));
        }
        let country = row.country.trim().to_string();
        let company_name = match row.company_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => normalize_company_name(&hs_code, &country),
        };
        let year = row.year.as_i64("YEAR")?;

        let record = TradeRecord {
            company_name,
            hs_code,
            country,
            transport_mode,
            value_usd: row.value_usd.as_decimal("VAL_MO")?,
            weight_kg: row.weight_kg.as_decimal("WGT_MO")?,
            year: i32::try_from(year).map_err(|_| invalid("YEAR", year))?,
            month: month_from("MONTH", row.month.as_i64("MONTH")?)?,
        };
        record.validate()?;
        Ok(record)
    }
}

pub fn parse(json: &str) -> Result<Parsed<TradeRecord>, LoaderError> {
    map_rows("census", json, <TradeRecord as TryFrom<CensusRow>>::try_from)
}
