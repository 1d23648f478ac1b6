use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ModelError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }
}

impl std::str::FromStr for CampaignStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            other => Err(ModelError::InvalidField {
                field: "status",
                reason: format!("unknown campaign status {other:?}"),
            }),
        }
    }
}

/// An outreach campaign targeting shippers surfaced by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub status: CampaignStatus,
    /// Only target companies at or above this confidence score.
    pub min_confidence: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutreachChannel {
    Email,
    Phone,
    Linkedin,
}

impl OutreachChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Linkedin => "linkedin",
        }
    }
}

impl std::str::FromStr for OutreachChannel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "linkedin" => Ok(Self::Linkedin),
            other => Err(ModelError::InvalidField {
                field: "channel",
                reason: format!("unknown outreach channel {other:?}"),
            }),
        }
    }
}

/// One contact attempt made as part of a campaign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutreachLog {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub company_name: String,
    pub contact_email: Option<String>,
    pub channel: OutreachChannel,
    pub note: Option<String>,
    pub sent_at: DateTime<Utc>,
}
