// 🧬 Broker Enrichment - matcher → deduplicator → scorer, per broker
//
// Enrichment is a pure function of (broker, finding lists). Brokers are never
// mutated; each one comes back as a new value with `risk_profile` replaced.
//
// The enriched list is computed once and cached. Finding lists are assumed
// static; callers that reload them must call `invalidate()`.

use crate::deduplication::SignalDeduplicator;
use crate::entities::{Broker, BrokerRegistry, FindingStore};
use crate::matcher::SignalMatcher;
use crate::scoring::RiskScorer;
use crate::signals::Signal;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

// ============================================================================
// ENRICHMENT PIPELINE
// ============================================================================

pub struct EnrichmentPipeline {
    store: FindingStore,
    matcher: SignalMatcher,
    deduplicator: SignalDeduplicator,
    scorer: RiskScorer,
}

impl EnrichmentPipeline {
    pub fn new(store: FindingStore) -> Self {
        EnrichmentPipeline {
            store,
            matcher: SignalMatcher::new(),
            deduplicator: SignalDeduplicator::new(),
            scorer: RiskScorer::new(),
        }
    }

    /// Fresh signals for one broker: at most one per source, in source order
    pub fn collect_signals(&self, broker: &Broker) -> Vec<Signal> {
        self.store
            .sources()
            .iter()
            .filter_map(|source| self.matcher.match_source(broker, source))
            .collect()
    }

    pub fn enrich(&self, broker: &Broker) -> Broker {
        let fresh = self.collect_signals(broker);
        let signals = self.deduplicator.merge(broker.existing_signals(), fresh);

        let mut enriched = broker.clone();
        enriched.risk_profile = self.scorer.score(signals);

        if let Some(profile) = &enriched.risk_profile {
            debug!(broker = %broker.id, score = profile.score, level = %profile.level, "broker flagged");
        }

        enriched
    }

    pub fn enrich_all(&self, brokers: &[Broker]) -> Vec<Broker> {
        let enriched: Vec<Broker> = brokers.iter().map(|b| self.enrich(b)).collect();

        let flagged = enriched.iter().filter(|b| b.risk_profile.is_some()).count();
        info!(
            brokers = enriched.len(),
            flagged,
            sources = self.store.sources().len(),
            "enriched broker list"
        );

        enriched
    }
}

// ============================================================================
// ENRICHED BROKER CACHE
// ============================================================================

/// Compute-once holder for the enriched list.
///
/// Filling happens under the write lock with a re-check, so concurrent first
/// callers compute the list exactly once.
#[derive(Default)]
pub struct EnrichedBrokerCache {
    slot: RwLock<Option<Arc<Vec<Broker>>>>,
}

impl EnrichedBrokerCache {
    pub fn new() -> Self {
        EnrichedBrokerCache {
            slot: RwLock::new(None),
        }
    }

    pub fn get_or_compute<F>(&self, compute: F) -> Arc<Vec<Broker>>
    where
        F: FnOnce() -> Vec<Broker>,
    {
        {
            // Cached data is immutable, so a poisoned lock still holds a valid value
            let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = slot.as_ref() {
                return Arc::clone(cached);
            }
        }

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = slot.as_ref() {
            return Arc::clone(cached);
        }

        let computed = Arc::new(compute());
        debug!(brokers = computed.len(), "enriched broker cache filled");
        *slot = Some(Arc::clone(&computed));
        computed
    }

    pub fn is_populated(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn invalidate(&self) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if slot.take().is_some() {
            info!("enriched broker cache invalidated");
        }
    }
}

// ============================================================================
// BROKER SERVICE
// ============================================================================

/// What the API / UI layers call: enriched, memoized broker access
pub struct BrokerService {
    registry: BrokerRegistry,
    pipeline: EnrichmentPipeline,
    cache: EnrichedBrokerCache,
}

impl BrokerService {
    pub fn new(registry: BrokerRegistry, store: FindingStore) -> Self {
        BrokerService {
            registry,
            pipeline: EnrichmentPipeline::new(store),
            cache: EnrichedBrokerCache::new(),
        }
    }

    /// Full enriched list; repeated calls return the same cached `Arc`
    pub fn get_brokers(&self) -> Arc<Vec<Broker>> {
        self.cache
            .get_or_compute(|| self.pipeline.enrich_all(self.registry.all()))
    }

    pub fn get_broker_by_id(&self, id: &str) -> Option<Broker> {
        self.get_brokers().iter().find(|b| b.id == id).cloned()
    }

    /// Brokers with a profile, highest score first (ties keep list order)
    pub fn flagged_brokers(&self) -> Vec<Broker> {
        let mut flagged: Vec<Broker> = self
            .get_brokers()
            .iter()
            .filter(|b| b.risk_profile.is_some())
            .cloned()
            .collect();

        flagged.sort_by_key(|b| {
            std::cmp::Reverse(b.risk_profile.as_ref().map(|p| (p.level, p.score)))
        });
        flagged
    }

    /// Drop the cached list; the next read recomputes
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }
}

// ============================================================================
// TESTS
// ============================================================================
