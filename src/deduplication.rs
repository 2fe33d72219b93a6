// 🔍 Signal Deduplication - Drop repeated evidence
//
// Two signals are duplicates when (description, source) match.
// First occurrence wins; later duplicates are dropped, NOT merged
// (their score_weight / evidence_url are discarded even when they differ).

use crate::signals::Signal;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct SignalDeduplicator;

impl SignalDeduplicator {
    pub fn new() -> Self {
        SignalDeduplicator
    }

    /// Keep the first signal of each `(description, source)` pair, in input order
    pub fn dedupe(&self, signals: Vec<Signal>) -> Vec<Signal> {
        let total = signals.len();
        let mut seen: HashSet<(String, String)> = HashSet::with_capacity(total);

        let unique: Vec<Signal> = signals
            .into_iter()
            .filter(|signal| seen.insert((signal.description.clone(), signal.source.clone())))
            .collect();

        if unique.len() < total {
            debug!(dropped = total - unique.len(), kept = unique.len(), "dropped duplicate signals");
        }

        unique
    }

    /// Existing signals first, then fresh ones, deduplicated
    pub fn merge(&self, existing: &[Signal], fresh: Vec<Signal>) -> Vec<Signal> {
        let mut combined = Vec::with_capacity(existing.len() + fresh.len());
        combined.extend_from_slice(existing);
        combined.extend(fresh);
        self.dedupe(combined)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::SignalType;
    use proptest::prelude::*;

    fn create_test_signal(description: &str, source: &str, weight: u32) -> Signal {
        Signal {
            signal_type: SignalType::RegulatorWarning,
            source: source.to_string(),
            description: description.to_string(),
            score_weight: weight,
            evidence_url: Some(format!("https://evidence.example/{}", weight)),
            timestamp: "2025-09-12T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(SignalDeduplicator::new().dedupe(Vec::new()).is_empty());
    }

    #[test]
    fn test_first_occurrence_kept() {
        let signals = vec![
            create_test_signal("X", "Y", 40),
            create_test_signal("X", "Y", 90),
        ];

        let unique = SignalDeduplicator::new().dedupe(signals);

        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].score_weight, 40);
        assert_eq!(unique[0].evidence_url.as_deref(), Some("https://evidence.example/40"));
    }

    #[test]
    fn test_same_description_different_source_kept() {
        let signals = vec![
            create_test_signal("not authorised", "FCA Warning List", 40),
            create_test_signal("not authorised", "ASIC Investor Alert List", 40),
        ];

        assert_eq!(SignalDeduplicator::new().dedupe(signals).len(), 2);
    }

    #[test]
    fn test_type_is_not_part_of_identity() {
        let mut other = create_test_signal("X", "Y", 10);
        other.signal_type = SignalType::Blacklist;
        let signals = vec![create_test_signal("X", "Y", 40), other];

        let unique = SignalDeduplicator::new().dedupe(signals);

        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].signal_type, SignalType::RegulatorWarning);
    }

    #[test]
    fn test_order_preserved() {
        let signals = vec![
            create_test_signal("c", "s", 1),
            create_test_signal("a", "s", 2),
            create_test_signal("c", "s", 3),
            create_test_signal("b", "s", 4),
        ];

        let unique = SignalDeduplicator::new().dedupe(signals);
        let descriptions: Vec<&str> = unique.iter().map(|s| s.description.as_str()).collect();

        assert_eq!(descriptions, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_merge_puts_existing_first() {
        let existing = vec![create_test_signal("X", "Y", 25)];
        let fresh = vec![create_test_signal("X", "Y", 40), create_test_signal("Z", "Y", 40)];

        let merged = SignalDeduplicator::new().merge(&existing, fresh);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].score_weight, 25);
        assert_eq!(merged[1].description, "Z");
    }

    proptest! {
        #[test]
        fn prop_dedupe_is_idempotent(pairs in proptest::collection::vec((0u8..4, 0u8..3, 0u32..100), 0..20)) {
            let signals: Vec<Signal> = pairs
                .iter()
                .map(|(d, s, w)| create_test_signal(&format!("d{}", d), &format!("s{}", s), *w))
                .collect();
            let dedup = SignalDeduplicator::new();

            let once = dedup.dedupe(signals);
            let twice = dedup.dedupe(once.clone());

            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_dedupe_leaves_no_duplicate_keys(pairs in proptest::collection::vec((0u8..4, 0u8..3), 0..20)) {
            let signals: Vec<Signal> = pairs
                .iter()
                .map(|(d, s)| create_test_signal(&format!("d{}", d), &format!("s{}", s), 40))
                .collect();

            let unique = SignalDeduplicator::new().dedupe(signals);
            let keys: HashSet<(&str, &str)> = unique.iter().map(Signal::identity).collect();

            prop_assert_eq!(keys.len(), unique.len());
        }
    }
}
