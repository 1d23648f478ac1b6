use serde::{Deserialize, Serialize};

/// Top-level configuration for the intelligence service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AirIntelConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// Configuration for the reference store and its hot cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Path to the SQLite reference database (written by the loader).
    pub sqlite_path: String,
    /// Maximum number of entries in the in-memory moka cache.
    #[serde(default = "default_memory_capacity")]
    pub memory_max_capacity: u64,
    /// How long a reference lookup stays in memory, in seconds.
    #[serde(default = "default_memory_ttl")]
    pub memory_ttl_seconds: u64,
    /// Writable database holding the enrichment cache and CRM tables.
    #[serde(default = "default_app_sqlite_path")]
    pub app_sqlite_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            sqlite_path: "data/airintel.db".to_string(),
            memory_max_capacity: default_memory_capacity(),
            memory_ttl_seconds: default_memory_ttl(),
            app_sqlite_path: default_app_sqlite_path(),
        }
    }
}

/// Configuration for contact enrichment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichmentConfig {
    /// Timeout for a single call to the enrichment provider.
    #[serde(default = "default_enrichment_timeout")]
    pub timeout_seconds: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_enrichment_timeout(),
        }
    }
}

fn default_memory_capacity() -> u64 {
    10_000
}
fn default_memory_ttl() -> u64 {
    300
}
fn default_app_sqlite_path() -> String {
    "data/airintel-app.db".to_string()
}
fn default_enrichment_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_config() {
        let config = AirIntelConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: AirIntelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn config_from_toml() {
        let toml_str = r#"
[store]
sqlite_path = "/tmp/airintel_test.db"
memory_max_capacity = 500

[enrichment]
timeout_seconds = 3
"#;
        let config: AirIntelConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.store.sqlite_path, "/tmp/airintel_test.db");
        assert_eq!(config.store.memory_max_capacity, 500);
        assert_eq!(config.store.memory_ttl_seconds, 300);
        assert_eq!(config.store.app_sqlite_path, "data/airintel-app.db");
        assert_eq!(config.enrichment.timeout_seconds, 3);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config: AirIntelConfig = toml::from_str("").unwrap();
        assert_eq!(config, AirIntelConfig::default());
    }
}
