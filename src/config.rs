// ⚙️ Configuration - Where the broker list and regulator lists live
//
// {
//   "brokersPath": "brokers.json",
//   "sources": [
//     { "label": "FCA Warning List", "path": "fca_warnings.json" },
//     { "label": "ASIC Investor Alert List", "path": "asic_alerts.csv" }
//   ]
// }
//
// Relative paths resolve against the config file's directory.
// Source order in the file is check order.

use crate::enrichment::BrokerService;
use crate::entities::{BrokerRegistry, FindingSource, FindingStore};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable consulted when no config path is given
pub const CONFIG_ENV_VAR: &str = "BROKER_RISK_CONFIG";

/// Fallback config file name in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "broker-risk.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    /// Label carried by every signal from this list
    pub label: String,

    /// .json or .csv finding list
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub brokers_path: PathBuf,

    #[serde(default)]
    pub sources: Vec<SourceConfig>,

    /// Directory relative paths resolve against (set on load)
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Config {
    /// Explicit path, else $BROKER_RISK_CONFIG, else ./broker-risk.json
    pub fn resolve_path(explicit: Option<&str>) -> PathBuf {
        match explicit {
            Some(path) => PathBuf::from(path),
            None => env::var(CONFIG_ENV_VAR)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let mut config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON: {:?}", path))?;

        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        info!(path = %path.display(), sources = config.sources.len(), "loaded config");
        Ok(config)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn load_registry(&self) -> Result<BrokerRegistry> {
        BrokerRegistry::from_file(self.resolve(&self.brokers_path))
    }

    pub fn load_store(&self) -> Result<FindingStore> {
        let mut store = FindingStore::new();
        for source in &self.sources {
            let loaded = FindingSource::from_file(&source.label, self.resolve(&source.path))
                .with_context(|| format!("Failed to load finding source {:?}", source.label))?;
            store.add_source(loaded);
        }
        Ok(store)
    }

    pub fn build_service(&self) -> Result<BrokerService> {
        Ok(BrokerService::new(self.load_registry()?, self.load_store()?))
    }
}

// ============================================================================
// TESTS
// ============================================================================
