use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Freight modality of a shipment. Source feeds use their own codes; those are
/// resolved here before a record reaches the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportMode {
    Air,
    Ocean,
}

impl TransportMode {
    /// Census foreign-trade mode codes: "40" = air, "20" = vessel.
    pub fn from_census_code(code: &str) -> Result<Self, ModelError> {
        match code.trim() {
            "40" => Ok(Self::Air),
            "20" => Ok(Self::Ocean),
            other => Err(ModelError::UnmappedTransportCode {
                source_feed: "census",
                code: other.to_string(),
            }),
        }
    }

    /// UN Comtrade `motCode`: 5 = air, 1 = sea.
    pub fn from_comtrade_mot(code: i64) -> Result<Self, ModelError> {
        match code {
            5 => Ok(Self::Air),
            1 => Ok(Self::Ocean),
            other => Err(ModelError::UnmappedTransportCode {
                source_feed: "comtrade",
                code: other.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Air => "AIR",
            Self::Ocean => "OCEAN",
        }
    }
}

impl std::str::FromStr for TransportMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AIR" => Ok(Self::Air),
            "OCEAN" => Ok(Self::Ocean),
            other => Err(ModelError::UnmappedTransportCode {
                source_feed: "text",
                code: other.to_string(),
            }),
        }
    }
}

/// One shipment observation as produced by an ingestion job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeRecord {
    /// Raw counterparty name as reported by the source feed.
    pub company_name: String,
    /// Harmonized System commodity code, e.g. "8471600000".
    pub hs_code: String,
    /// Trading partner country.
    pub country: String,
    pub transport_mode: TransportMode,
    pub value_usd: Decimal,
    pub weight_kg: Decimal,
    pub year: i32,
    pub month: u32,
}

impl TradeRecord {
    /// Check the record invariants: non-negative value and weight, month in 1..=12.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.value_usd < Decimal::ZERO {
            return Err(ModelError::InvalidField {
                field: "value_usd",
                reason: format!("must be non-negative, got {}", self.value_usd),
            });
        }
        if self.weight_kg < Decimal::ZERO {
            return Err(ModelError::InvalidField {
                field: "weight_kg",
                reason: format!("must be non-negative, got {}", self.weight_kg),
            });
        }
        if !(1..=12).contains(&self.month) {
            return Err(ModelError::InvalidField {
                field: "month",
                reason: format!("must be within 1..=12, got {}", self.month),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_record() -> TradeRecord {
        TradeRecord {
            company_name: "Samsung Electronics".to_string(),
            hs_code: "8471600000".to_string(),
            country: "Korea, South".to_string(),
            transport_mode: TransportMode::Ocean,
            value_usd: dec!(250000.00),
            weight_kg: dec!(1200.5),
            year: 2024,
            month: 3,
        }
    }

    #[test]
    fn census_codes_map_to_modes() {
        assert_eq!(TransportMode::from_census_code("40").unwrap(), TransportMode::Air);
        assert_eq!(TransportMode::from_census_code(" 20 ").unwrap(), TransportMode::Ocean);
        assert!(TransportMode::from_census_code("30").is_err());
    }

    #[test]
    fn comtrade_codes_map_to_modes() {
        assert_eq!(TransportMode::from_comtrade_mot(5).unwrap(), TransportMode::Air);
        assert_eq!(TransportMode::from_comtrade_mot(1).unwrap(), TransportMode::Ocean);
        let err = TransportMode::from_comtrade_mot(3).unwrap_err();
        assert!(err.to_string().contains("comtrade"));
    }

    #[test]
    fn transport_mode_serialization() {
        assert_eq!(serde_json::to_string(&TransportMode::Air).unwrap(), "\"AIR\"");
        assert_eq!(serde_json::to_string(&TransportMode::Ocean).unwrap(), "\"OCEAN\"");
        assert_eq!("ocean".parse::<TransportMode>().unwrap(), TransportMode::Ocean);
    }

    #[test]
    fn valid_record_passes() {
        assert!(sample_record().validate().is_ok());
    }

    #[test]
    fn negative_value_rejected() {
        let mut record = sample_record();
        record.value_usd = dec!(-1);
        let err = record.validate().unwrap_err();
        assert!(err.to_string().contains("value_usd"));
    }

    #[test]
    fn month_out_of_range_rejected() {
        let mut record = sample_record();
        record.month = 13;
        assert!(record.validate().is_err());
    }

    #[test]
    fn record_deserializes_from_feed_json() {
        let json = r#"{
            "company_name": "Sony Corp",
            "hs_code": "8528720000",
            "country": "Japan",
            "transport_mode": "AIR",
            "value_usd": "98000.50",
            "weight_kg": "310",
            "year": 2023,
            "month": 11
        }"#;
        let record: TradeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.transport_mode, TransportMode::Air);
        assert_eq!(record.value_usd, dec!(98000.50));
    }
}
