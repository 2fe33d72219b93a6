// 🏦 Broker Entity - Record owned by the listing site
//
// The risk engine only reads `id`, `name`, `website_url` and an existing
// `risk_profile`. Every other field of the site's record rides along in
// `metadata` so enrichment returns the record unchanged apart from its profile.

use crate::scoring::RiskProfile;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

// ============================================================================
// BROKER ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Broker {
    /// Stable identity (slug or UUID from the listing site)
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Public website
    #[serde(default)]
    pub website_url: String,

    /// Profile computed here, or embedded by another subsystem before enrichment
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_profile: Option<RiskProfile>,

    /// Remaining record fields, untouched (sorted, so exports are stable)
    #[serde(flatten)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Broker {
    pub fn new(id: &str, name: &str, website_url: &str) -> Self {
        Broker {
            id: id.to_string(),
            name: name.to_string(),
            website_url: website_url.to_string(),
            risk_profile: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_risk_profile(mut self, profile: RiskProfile) -> Self {
        self.risk_profile = Some(profile);
        self
    }

    /// Signals already embedded on the record (empty when there is no profile)
    pub fn existing_signals(&self) -> &[crate::signals::Signal] {
        self.risk_profile
            .as_ref()
            .map(|p| p.signals.as_slice())
            .unwrap_or(&[])
    }
}

// ============================================================================
// BROKER REGISTRY
// ============================================================================

/// Broker list as handed over by the listing site
#[derive(Debug, Clone, Default)]
pub struct BrokerRegistry {
    brokers: Vec<Broker>,
}

impl BrokerRegistry {
    pub fn from_brokers(brokers: Vec<Broker>) -> Self {
        BrokerRegistry { brokers }
    }

    /// Load a JSON array of broker records
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read broker list: {:?}", path.as_ref()))?;

        let brokers: Vec<Broker> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse broker list JSON: {:?}", path.as_ref()))?;

        info!(count = brokers.len(), "loaded broker list");
        Ok(BrokerRegistry::from_brokers(brokers))
    }

    pub fn all(&self) -> &[Broker] {
        &self.brokers
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Broker> {
        self.brokers.iter().find(|b| b.id == id)
    }

    pub fn count(&self) -> usize {
        self.brokers.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================
