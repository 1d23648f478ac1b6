use std::sync::Mutex;

use airintel_models::schema::SCHEMA_DDL;
use airintel_models::{Campaign, CampaignStatus, OutreachChannel, OutreachLog};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row};
use uuid::Uuid;

use crate::error::StoreError;

/// Repository for outreach campaigns.
pub trait CampaignStore: Send + Sync {
    fn create_campaign(&self, name: &str, min_confidence: u8) -> Result<Campaign, StoreError>;

    fn get_campaign(&self, id: Uuid) -> Result<Option<Campaign>, StoreError>;

    /// All campaigns, newest first, optionally filtered by status.
    fn list_campaigns(&self, status: Option<CampaignStatus>) -> Result<Vec<Campaign>, StoreError>;

    fn set_campaign_status(&self, id: Uuid, status: CampaignStatus) -> Result<Campaign, StoreError>;
}

/// Repository for outreach attempts. Logs are append-only.
pub trait OutreachLogStore: Send + Sync {
    fn record_outreach(
        &self,
        campaign_id: Uuid,
        company_name: &str,
        contact_email: Option<&str>,
        channel: OutreachChannel,
        note: Option<&str>,
    ) -> Result<OutreachLog, StoreError>;

    /// Logs for a campaign in the order they were sent.
    fn outreach_for_campaign(&self, campaign_id: Uuid) -> Result<Vec<OutreachLog>, StoreError>;
}

/// SQLite implementation of both CRM repositories.
pub struct SqliteCrmStore {
    conn: Mutex<Connection>,
}

impl SqliteCrmStore {
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA_DDL)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_DDL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("CRM store mutex poisoned: {e}")))
    }
}

impl CampaignStore for SqliteCrmStore {
    fn create_campaign(&self, name: &str, min_confidence: u8) -> Result<Campaign, StoreError> {
        let now = Utc::now();
        let campaign = Campaign {
            id: Uuid::new_v4(),
            name: name.to_string(),
            status: CampaignStatus::Draft,
            min_confidence: min_confidence.min(100),
            created_at: now,
            updated_at: now,
        };

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO campaigns (id, name, status, min_confidence, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                campaign.id.to_string(),
                campaign.name,
                campaign.status.as_str(),
                campaign.min_confidence,
                campaign.created_at,
                campaign.updated_at,
            ],
        )?;
        tracing::info!(campaign_id = %campaign.id, name, "Campaign created");
        Ok(campaign)
    }

    fn get_campaign(&self, id: Uuid) -> Result<Option<Campaign>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, name, status, min_confidence, created_at, updated_at \
             FROM campaigns WHERE id = ?1",
        )?;
        match stmt.query_row(rusqlite::params![id.to_string()], campaign_from_row) {
            Ok(campaign) => Ok(Some(campaign)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::Sqlite(e)),
        }
    }

    fn list_campaigns(&self, status: Option<CampaignStatus>) -> Result<Vec<Campaign>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, name, status, min_confidence, created_at, updated_at \
             FROM campaigns WHERE ?1 IS NULL OR status = ?1 \
             ORDER BY created_at DESC, name",
        )?;
        let rows = stmt
            .query_map(
                rusqlite::params![status.map(|s| s.as_str())],
                campaign_from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn set_campaign_status(&self, id: Uuid, status: CampaignStatus) -> Result<Campaign, StoreError> {
        {
            let conn = self.lock()?;
            let updated = conn.execute(
                "UPDATE campaigns SET status = ?1, updated_at = ?2 WHERE id = ?3",
                rusqlite::params![status.as_str(), Utc::now(), id.to_string()],
            )?;
            if updated == 0 {
                return Err(StoreError::NotFound(format!("campaign {id}")));
            }
        }
        tracing::info!(campaign_id = %id, status = status.as_str(), "Campaign status changed");
        self.get_campaign(id)?
            .ok_or_else(|| StoreError::NotFound(format!("campaign {id}")))
    }
}

impl OutreachLogStore for SqliteCrmStore {
    fn record_outreach(
        &self,
        campaign_id: Uuid,
        company_name: &str,
        contact_email: Option<&str>,
        channel: OutreachChannel,
        note: Option<&str>,
    ) -> Result<OutreachLog, StoreError> {
        if self.get_campaign(campaign_id)?.is_none() {
            return Err(StoreError::NotFound(format!("campaign {campaign_id}")));
        }

        let log = OutreachLog {
            id: Uuid::new_v4(),
            campaign_id,
            company_name: company_name.to_string(),
            contact_email: contact_email.map(str::to_string),
            channel,
            note: note.map(str::to_string),
            sent_at: Utc::now(),
        };

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO outreach_logs \
             (id, campaign_id, company_name, contact_email, channel, note, sent_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                log.id.to_string(),
                log.campaign_id.to_string(),
                log.company_name,
                log.contact_email,
                log.channel.as_str(),
                log.note,
                log.sent_at,
            ],
        )?;
        Ok(log)
    }

    fn outreach_for_campaign(&self, campaign_id: Uuid) -> Result<Vec<OutreachLog>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, campaign_id, company_name, contact_email, channel, note, sent_at \
             FROM outreach_logs WHERE campaign_id = ?1 ORDER BY sent_at, rowid",
        )?;
        let rows = stmt
            .query_map(rusqlite::params![campaign_id.to_string()], |row| {
                let channel: String = row.get(4)?;
                let sent_at: DateTime<Utc> = row.get(6)?;
                Ok(OutreachLog {
                    id: uuid_column(row, 0)?,
                    campaign_id: uuid_column(row, 1)?,
                    company_name: row.get(2)?,
                    contact_email: row.get(3)?,
                    channel: channel.parse().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            4,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?,
                    note: row.get(5)?,
                    sent_at,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn campaign_from_row(row: &Row<'_>) -> rusqlite::Result<Campaign> {
    let status: String = row.get(2)?;
    Ok(Campaign {
        id: uuid_column(row, 0)?,
        name: row.get(1)?,
        status: status.parse().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?,
        min_confidence: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn uuid_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
