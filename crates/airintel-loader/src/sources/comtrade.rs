//! UN Comtrade rows. `period` is YYYYMM; missing net weight counts as zero.

use airintel_engine::normalize_company_name;
use airintel_models::{ModelError, TradeRecord, TransportMode};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{decimal_from_f64, invalid, map_rows, month_from, Flexible, Parsed};
use crate::error::LoaderError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComtradeRow {
    pub cmd_code: String,
    pub partner_desc: String,
    /// 5 air, 1 sea.
    pub mot_code: i64,
    pub primary_value: f64,
    #[serde(default)]
    pub net_wgt: Option<f64>,
    pub period: Flexible,
}

impl TryFrom<ComtradeRow> for TradeRecord {
    type Error = ModelError;

    fn try_from(row: ComtradeRow) -> Result<Self, Self::Error> {
        let transport_mode = TransportMode::from_comtrade_mot(row.mot_code)?;
        let hs_code = row.cmd_code.trim().to_string();
        if hs_code.is_empty() {
            return Err(invalid("cmdCode", "empty"));
        }
        let country = row.partner_desc.trim().to_string();

        let period = row.period.as_i64("period")?;
        if !(100_001..=999_912).contains(&period) {
            return Err(invalid("period", period));
        }
        let year = i32::try_from(period / 100).map_err(|_| invalid("period", period))?;

        let record = TradeRecord {
            company_name: normalize_company_name(&hs_code, &country),
            hs_code,
            country,
            transport_mode,
            value_usd: decimal_from_f64("primaryValue", row.primary_value)?,
            weight_kg: match row.net_wgt {
                Some(weight) => decimal_from_f64("netWgt", weight)?,
                None => Decimal::ZERO,
            },
            year,
            month: month_from("period", period % 100)?,
        };
        record.validate()?;
        Ok(record)
    }
}

pub fn parse(json: &str) -> Result<Parsed<TradeRecord>, LoaderError> {
    map_rows("comtrade", json, <TradeRecord as TryFrom<ComtradeRow>>::try_from)
}
