//! Scoring metrics
//!
//! Named counters and bucketed histograms kept in process memory. The
//! serving engine records one observation per scored record.

use parking_lot::RwLock;
use recovery_core::RiskCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const PREDICTIONS_TOTAL: &str = "predictions_total";
pub const PREDICTION_LATENCY: &str = "prediction_latency_seconds";
pub const RECOVERY_PROBABILITY: &str = "recovery_probability";

/// Monotonic counter
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    pub fn inc(&self) {
        self.add(1);
    }

    pub fn add(&self, value: u64) {
        self.value.fetch_add(value, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.value.store(0, Ordering::Relaxed);
    }
}

/// Upper bounds, in seconds, of the default latency buckets
pub const LATENCY_BUCKETS: [f64; 15] = [
    0.0001, 0.00025, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5,
    10.0,
];

/// Upper bounds of the recovery probability buckets, 0.05 wide
pub const PROBABILITY_BUCKETS: [f64; 20] = [
    0.05, 0.1, 0.15, 0.2, 0.25, 0.3, 0.35, 0.4, 0.45, 0.5, 0.55, 0.6, 0.65, 0.7, 0.75, 0.8, 0.85,
    0.9, 0.95, 1.0,
];

/// Distribution of observed values, kept as fixed buckets.
///
/// Memory use is set by the bucket bounds chosen at construction and does
/// not grow with the number of observations. Percentiles are therefore
/// approximate: they report the upper bound of the bucket holding the
/// requested rank, or the largest value seen for the overflow bucket.
#[derive(Debug)]
pub struct Histogram {
    bounds: Vec<f64>,
    /// One slot per bound plus a final overflow slot
    buckets: Vec<AtomicU64>,
    count: AtomicU64,
    sum_bits: AtomicU64,
    max_bits: AtomicU64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::with_buckets(&LATENCY_BUCKETS)
    }
}

impl Histogram {
    /// Histogram over the given upper bounds; non-finite bounds are dropped
    pub fn with_buckets(bounds: &[f64]) -> Self {
        let mut bounds: Vec<f64> = bounds.iter().copied().filter(|b| b.is_finite()).collect();
        bounds.sort_by(|a, b| a.total_cmp(b));
        bounds.dedup();
        let buckets = (0..=bounds.len()).map(|_| AtomicU64::new(0)).collect();
        Self {
            bounds,
            buckets,
            count: AtomicU64::new(0),
            sum_bits: AtomicU64::new(0.0f64.to_bits()),
            max_bits: AtomicU64::new(f64::NEG_INFINITY.to_bits()),
        }
    }

    /// Record one value. NaN and infinities are ignored.
    pub fn observe(&self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let slot = self.bounds.partition_point(|bound| *bound < value);
        self.buckets[slot].fetch_add(1, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
        update_f64(&self.sum_bits, |sum| sum + value);
        update_f64(&self.max_bits, |max| max.max(value));
    }

    pub fn observe_duration(&self, duration: Duration) {
        self.observe(duration.as_secs_f64());
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn sum(&self) -> f64 {
        f64::from_bits(self.sum_bits.load(Ordering::Relaxed))
    }

    pub fn avg(&self) -> f64 {
        match self.count() {
            0 => 0.0,
            n => self.sum() / n as f64,
        }
    }

    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// Observations per bucket, the last entry counting values above every bound
    pub fn bucket_counts(&self) -> Vec<u64> {
        self.buckets
            .iter()
            .map(|bucket| bucket.load(Ordering::Relaxed))
            .collect()
    }

    /// Nearest-rank percentile, `p` in 0..=100, at bucket resolution
    pub fn percentile(&self, p: f64) -> f64 {
        let counts = self.bucket_counts();
        let total: u64 = counts.iter().sum();
        if total == 0 {
            return 0.0;
        }
        let rank = ((p.clamp(0.0, 100.0) / 100.0) * total as f64).ceil().max(1.0) as u64;

        let mut seen = 0;
        for (slot, count) in counts.iter().enumerate() {
            seen += count;
            if seen >= rank {
                if let Some(bound) = self.bounds.get(slot) {
                    return *bound;
                }
                break;
            }
        }
        f64::from_bits(self.max_bits.load(Ordering::Relaxed))
    }

    pub fn reset(&self) {
        for bucket in &self.buckets {
            bucket.store(0, Ordering::Relaxed);
        }
        self.count.store(0, Ordering::Relaxed);
        self.sum_bits.store(0.0f64.to_bits(), Ordering::Relaxed);
        self.max_bits.store(f64::NEG_INFINITY.to_bits(), Ordering::Relaxed);
    }
}

fn update_f64(cell: &AtomicU64, f: impl Fn(f64) -> f64) {
    let mut current = cell.load(Ordering::Relaxed);
    loop {
        let next = f(f64::from_bits(current)).to_bits();
        match cell.compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return,
            Err(actual) => current = actual,
        }
    }
}

/// Summary of one histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSummary {
    pub count: u64,
    pub avg: f64,
    pub p50: f64,
    pub p95: f64,
}

/// Point-in-time copy of every metric
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub counters: BTreeMap<String, u64>,
    pub histograms: BTreeMap<String, HistogramSummary>,
}

/// Registry of named metrics
#[derive(Debug, Default)]
pub struct MetricsCollector {
    counters: RwLock<BTreeMap<String, Arc<Counter>>>,
    histograms: RwLock<BTreeMap<String, Arc<Histogram>>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter by name, created on first use
    pub fn counter(&self, name: &str) -> Arc<Counter> {
        if let Some(counter) = self.counters.read().get(name) {
            return counter.clone();
        }
        self.counters
            .write()
            .entry(name.to_string())
            .or_default()
            .clone()
    }

    /// Histogram by name over the latency buckets, created on first use
    pub fn histogram(&self, name: &str) -> Arc<Histogram> {
        self.histogram_with_buckets(name, &LATENCY_BUCKETS)
    }

    /// Histogram by name, created over `bounds` on first use.
    /// An existing histogram keeps the bounds it was created with.
    pub fn histogram_with_buckets(&self, name: &str, bounds: &[f64]) -> Arc<Histogram> {
        if let Some(histogram) = self.histograms.read().get(name) {
            return histogram.clone();
        }
        self.histograms
            .write()
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Histogram::with_buckets(bounds)))
            .clone()
    }

    /// Count a scored record under its tier and record its latency
    pub fn record_prediction(&self, category: RiskCategory, probability: f64, latency: Duration) {
        self.counter(PREDICTIONS_TOTAL).inc();
        self.counter(&format!("predictions_{}", category.as_str().to_lowercase()))
            .inc();
        self.histogram_with_buckets(RECOVERY_PROBABILITY, &PROBABILITY_BUCKETS)
            .observe(probability);
        self.histogram(PREDICTION_LATENCY).observe_duration(latency);
    }

    pub fn record_error(&self, kind: &str) {
        self.counter(&format!("errors_{}", kind)).inc();
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let counters = self
            .counters
            .read()
            .iter()
            .map(|(name, c)| (name.clone(), c.get()))
            .collect();
        let histograms = self
            .histograms
            .read()
            .iter()
            .map(|(name, h)| {
                (
                    name.clone(),
                    HistogramSummary {
                        count: h.count(),
                        avg: h.avg(),
                        p50: h.percentile(50.0),
                        p95: h.percentile(95.0),
                    },
                )
            })
            .collect();
        MetricsSnapshot {
            counters,
            histograms,
        }
    }

    pub fn reset_all(&self) {
        for counter in self.counters.read().values() {
            counter.reset();
        }
        for histogram in self.histograms.read().values() {
            histogram.reset();
        }
    }
}
