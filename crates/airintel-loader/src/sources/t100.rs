//! BTS T-100 segment data: monthly freight by carrier and airport pair.

use airintel_models::{CarrierRoute, ModelError};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{decimal_from_f64, invalid, map_rows, month_from, Parsed};
use crate::error::LoaderError;

/// Kilograms per pound, exact to six places.
pub const KG_PER_LB: Decimal = Decimal::from_parts(453_592, 0, 0, false, 6);

#[derive(Debug, Clone, Deserialize)]
pub struct T100Row {
    #[serde(rename = "ORIGIN")]
    pub origin: String,
    #[serde(rename = "DEST")]
    pub dest: String,
    #[serde(rename = "CARRIER_NAME")]
    pub carrier_name: String,
    /// Freight in pounds.
    #[serde(rename = "FREIGHT")]
    pub freight: f64,
    #[serde(rename = "YEAR")]
    pub year: i32,
    #[serde(rename = "MONTH")]
    pub month: i64,
}

impl TryFrom<T100Row> for CarrierRoute {
    type Error = ModelError;

    fn try_from(row: T100Row) -> Result<Self, Self::Error> {
        let origin_airport = row.origin.trim().to_uppercase();
        let dest_airport = row.dest.trim().to_uppercase();
        if origin_airport.is_empty() || dest_airport.is_empty() {
            return Err(invalid("ORIGIN/DEST", "empty airport code"));
        }
        let carrier_name = row.carrier_name.trim().to_string();
        if carrier_name.is_empty() {
            return Err(invalid("CARRIER_NAME", "empty"));
        }
        let pounds = decimal_from_f64("FREIGHT", row.freight)?;
        if pounds < Decimal::ZERO {
            return Err(invalid("FREIGHT", pounds));
        }

        Ok(CarrierRoute {
            origin_airport,
            dest_airport,
            carrier_name,
            freight_kg: (pounds * KG_PER_LB).round_dp(3),
            year: row.year,
            month: month_from("MONTH", row.month)?,
        })
    }
}

pub fn parse(json: &str) -> Result<Parsed<CarrierRoute>, LoaderError> {
    map_rows("t100", json, <CarrierRoute as TryFrom<T100Row>>::try_from)
}
