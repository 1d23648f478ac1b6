pub mod carrier;
pub mod confidence;
pub mod config;
pub mod crm;
pub mod enrichment;
pub mod error;
pub mod response;
pub mod schema;
pub mod trade_record;

pub use carrier::{sort_route_matches, CarrierRoute, CompanyProfile, RouteMatch};
pub use confidence::{ConfidenceResult, EvidenceSource, Signal, AIR_SHIPPER_THRESHOLD};
pub use config::{AirIntelConfig, EnrichmentConfig, StoreConfig};
pub use crm::{Campaign, CampaignStatus, OutreachChannel, OutreachLog};
pub use enrichment::{enrichment_key, Contact, EnrichmentCacheEntry, Location, Organization};
pub use error::ModelError;
pub use response::{ErrorResponse, IntelligenceResponse};
pub use trade_record::{TradeRecord, TransportMode};
