pub mod crm;
pub mod enrichment;
pub mod error;
pub mod memory;
pub mod reader;
pub mod sqlite;

pub use crm::{CampaignStore, OutreachLogStore, SqliteCrmStore};
pub use enrichment::EnrichmentCache;
pub use error::StoreError;
pub use reader::ReferenceReader;
pub use sqlite::SqliteReader;
