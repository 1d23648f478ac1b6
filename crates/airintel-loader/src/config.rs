use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub store: LoaderStoreConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderStoreConfig {
    /// Path to the shared SQLite reference database.
    pub sqlite_path: String,
    /// Drop previously loaded trade records before ingesting new ones.
    #[serde(default = "default_true")]
    pub replace_trade_records: bool,
}

/// Input files, each a JSON array of source rows. Omitted sources are skipped.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SourcesConfig {
    /// BTS T-100 segment rows.
    pub t100_path: Option<String>,
    /// Census international trade rows.
    pub census_path: Option<String>,
    /// UN Comtrade rows.
    pub comtrade_path: Option<String>,
    /// Curated company profiles.
    pub profiles_path: Option<String>,
}

impl SourcesConfig {
    pub fn is_empty(&self) -> bool {
        self.t100_path.is_none()
            && self.census_path.is_none()
            && self.comtrade_path.is_none()
            && self.profiles_path.is_none()
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_example_config() {
        let toml_str = r#"
[store]
sqlite_path = "data/airintel.db"
replace_trade_records = false

[sources]
t100_path = "data/raw/t100.json"
census_path = "data/raw/census.json"
comtrade_path = "data/raw/comtrade.json"
profiles_path = "data/raw/profiles.json"
"#;
        let config: LoaderConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.store.sqlite_path, "data/airintel.db");
        assert!(!config.store.replace_trade_records);
        assert_eq!(config.sources.t100_path.as_deref(), Some("data/raw/t100.json"));
        assert!(!config.sources.is_empty());
    }

    #[test]
    fn deserialize_minimal_config() {
        let toml_str = r#"
[store]
sqlite_path = "data/airintel.db"
"#;
        let config: LoaderConfig = toml::from_str(toml_str).unwrap();
        assert!(config.store.replace_trade_records);
        assert!(config.sources.is_empty());
    }
}
