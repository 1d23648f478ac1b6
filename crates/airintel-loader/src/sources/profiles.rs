//! Curated company profiles, maintained by hand or exported from the CRM.

use airintel_models::{CompanyProfile, ModelError};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{invalid, map_rows, Parsed};
use crate::error::LoaderError;

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRow {
    pub company_name: String,
    #[serde(default)]
    pub likely_air_shipper: bool,
    #[serde(default)]
    pub air_confidence_score: Option<u8>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProfileRow {
    fn into_profile(self, loaded_at: DateTime<Utc>) -> Result<CompanyProfile, ModelError> {
        let company_name = self.company_name.trim().to_string();
        if company_name.is_empty() {
            return Err(invalid("company_name", "empty"));
        }
        if let Some(score) = self.air_confidence_score {
            if score > 100 {
                return Err(invalid("air_confidence_score", score));
            }
        }
        Ok(CompanyProfile {
            company_name,
            likely_air_shipper: self.likely_air_shipper,
            air_confidence_score: self.air_confidence_score,
            updated_at: self.updated_at.unwrap_or(loaded_at),
        })
    }
}

/// Parse profiles; rows without a timestamp are stamped with `loaded_at`.
pub fn parse(json: &str, loaded_at: DateTime<Utc>) -> Result<Parsed<CompanyProfile>, LoaderError> {
    map_rows("profiles", json, |row: ProfileRow| row.into_profile(loaded_at))
}
