use crate::aggregate::TradeAggregator;
use crate::config::AppConfig;
use crate::fixtures::Journal;
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// ── Request Counters (lock-free) ──

pub struct PerfCounters {
    pub requests_served: AtomicU64,
    pub months_aggregated: AtomicU64,
    pub records_skipped: AtomicU64,
    pub bad_requests: AtomicU64,
}

impl PerfCounters {
    pub fn new() -> Self {
        Self {
            requests_served: AtomicU64::new(0),
            months_aggregated: AtomicU64::new(0),
            records_skipped: AtomicU64::new(0),
            bad_requests: AtomicU64::new(0),
        }
    }
}

impl Default for PerfCounters {
    fn default() -> Self {
        Self::new()
    }
}

// ── Application shared state (read-only after startup) ──

pub struct AppState {
    pub config: AppConfig,
    pub journal: Journal,
    pub aggregator: TradeAggregator,
    pub counters: PerfCounters,
}

impl AppState {
    pub fn new(config: AppConfig, journal: Journal) -> Arc<Self> {
        let aggregator = TradeAggregator::new(config.timezone);
        Arc::new(Self {
            config,
            journal,
            aggregator,
            counters: PerfCounters::new(),
        })
    }

    #[inline]
    pub fn record_aggregation(&self, skipped: usize) {
        self.counters.months_aggregated.fetch_add(1, Ordering::Relaxed);
        self.counters.records_skipped.fetch_add(skipped as u64, Ordering::Relaxed);
    }
}
