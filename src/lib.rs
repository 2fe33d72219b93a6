// Broker Risk - Core Library
// Cross-references brokers against regulator lists and derives a risk profile

pub mod entities;
pub mod signals;
pub mod matcher;
pub mod deduplication;
pub mod scoring;
pub mod enrichment;
pub mod config;

// Re-export commonly used types
pub use entities::{
    Broker, BrokerRegistry,
    RegulatoryFinding, FindingSource, FindingStore,
    FCA_WARNING_LIST, ASIC_ALERT_LIST, NFA_BASIC_ALERTS,
};
pub use signals::{Signal, SignalType, Timestamp, REGULATOR_WARNING_WEIGHT};
pub use matcher::SignalMatcher;
pub use deduplication::SignalDeduplicator;
pub use scoring::{RiskLevel, RiskProfile, RiskScorer, MAX_RISK_SCORE};
pub use enrichment::{BrokerService, EnrichedBrokerCache, EnrichmentPipeline};
pub use config::{Config, SourceConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
