pub mod engine;
pub mod enrichment;
pub mod error;
pub mod fallback;
pub mod naming;
pub mod reference;
pub mod scoring;

pub mod test_support;

pub use engine::{ConfidenceEngine, EvaluationRequest};
pub use enrichment::{ContactEnricher, EnrichmentLookup, EnrichmentPayload, EnrichmentService, Freshness};
pub use error::EngineError;
pub use fallback::FallbackIntel;
pub use naming::{display_name, normalize_company_name};
pub use reference::{OfflineReference, ReferenceSource};
