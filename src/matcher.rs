// 🔎 Signal Matcher - Broker vs. regulator list
//
// Loose substring matching, recall over precision:
// - broker name contains finding name (case-insensitive), OR
// - finding has a domain and the broker website contains it
// First hit in list order wins; at most one signal per list.

use crate::entities::{Broker, FindingSource, RegulatoryFinding};
use crate::signals::Signal;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct SignalMatcher;

impl SignalMatcher {
    pub fn new() -> Self {
        SignalMatcher
    }

    /// Signal for the first finding in `findings` that matches `broker`
    pub fn match_broker(
        &self,
        broker: &Broker,
        findings: &[RegulatoryFinding],
        source_label: &str,
    ) -> Option<Signal> {
        let name = broker.name.to_lowercase();
        let website = broker.website_url.to_lowercase();

        let finding = findings
            .iter()
            .find(|finding| finding_matches(&name, &website, finding))?;

        debug!(
            broker = %broker.id,
            source = source_label,
            finding = %finding.name,
            "regulator list match"
        );

        Some(Signal::regulator_warning(
            source_label,
            &finding.reason,
            &finding.source_url,
            finding.date.clone(),
        ))
    }

    /// Same as [`match_broker`](Self::match_broker) for a labelled source
    pub fn match_source(&self, broker: &Broker, source: &FindingSource) -> Option<Signal> {
        self.match_broker(broker, &source.findings, &source.label)
    }
}

/// `name` and `website` are already lower-cased. Comparison is verbatim (no trimming).
/// Empty strings never match: an empty finding name would otherwise hit every broker.
fn finding_matches(name: &str, website: &str, finding: &RegulatoryFinding) -> bool {
    let finding_name = finding.name.to_lowercase();
    if !name.is_empty() && !finding_name.is_empty() && name.contains(&finding_name) {
        return true;
    }

    match finding.domain() {
        Some(domain) => !website.is_empty() && website.contains(&domain.to_lowercase()),
        None => false,
    }
}

// ============================================================================
// TESTS
// ============================================================================
