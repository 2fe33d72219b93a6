// Entity Models
//
// - Broker: record owned by the listing site, enriched with a risk profile
// - RegulatoryFinding: one enforcement / warning record from one regulator
// - FindingStore: ordered regulator lists the pipeline checks against

pub mod broker;
pub mod finding;

pub use broker::{Broker, BrokerRegistry};
pub use finding::{
    FindingSource, FindingStore, RegulatoryFinding,
    ASIC_ALERT_LIST, FCA_WARNING_LIST, NFA_BASIC_ALERTS,
};
