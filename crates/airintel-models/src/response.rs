use serde::{Deserialize, Serialize};

use crate::confidence::ConfidenceResult;

/// Success body returned for a company intelligence query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntelligenceResponse {
    pub success: bool,
    pub company: String,
    /// `None` when the caller asked for air shippers only and this company is not one.
    pub intelligence: Option<ConfidenceResult>,
}

/// Failure body. `details` carries the underlying cause when there is one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_omits_empty_details() {
        let body = ErrorResponse::new("Company parameter is required", None);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], serde_json::json!(false));
        assert!(json.get("details").is_none());
    }

    #[test]
    fn filtered_response_serializes_null_intelligence() {
        let body = IntelligenceResponse {
            success: true,
            company: "Acme".to_string(),
            intelligence: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["intelligence"].is_null());
    }
}
