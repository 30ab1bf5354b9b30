use std::time::Duration;

/// Incrementally collected latency samples for one (codec, block size,
/// decode strategy) combination.
///
/// Holds the raw nanosecond samples alongside running count/sum/min/max;
/// every derived statistic (median, mean, percentiles) is computed from the
/// raw samples at summary time, so nothing can drift out of sync.
#[derive(Debug, Default, Clone)]
pub struct LatencySamples {
    samples_ns: Vec<u64>,
    sum_ns: u64,
    min_ns: u64,
    max_ns: u64,
}

impl LatencySamples {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            samples_ns: Vec::with_capacity(n),
            ..Self::default()
        }
    }

    pub fn record(&mut self, elapsed: Duration) {
        let ns = elapsed.as_nanos() as u64;
        if self.samples_ns.is_empty() {
            self.min_ns = ns;
            self.max_ns = ns;
        } else {
            self.min_ns = self.min_ns.min(ns);
            self.max_ns = self.max_ns.max(ns);
        }
        self.sum_ns += ns;
        self.samples_ns.push(ns);
    }

    pub fn count(&self) -> usize {
        self.samples_ns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples_ns.is_empty()
    }

    /// Summarize the distribution. Returns `None` when no samples were
    /// recorded.
    pub fn summarize(&self) -> Option<LatencySummary> {
        if self.samples_ns.is_empty() {
            return None;
        }
        let mut sorted = self.samples_ns.clone();
        sorted.sort_unstable();
        let pick = |q: f64| sorted[((sorted.len() - 1) as f64 * q) as usize];
        Some(LatencySummary {
            count: sorted.len(),
            min_ns: sorted[0],
            median_ns: sorted[sorted.len() / 2],
            p95_ns: pick(0.95),
            p99_ns: pick(0.99),
            max_ns: *sorted.last().unwrap(),
            mean_ns: self.sum_ns as f64 / sorted.len() as f64,
        })
    }
}

/// Point-in-time summary of a [`LatencySamples`] distribution, in
/// nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencySummary {
    pub count: usize,
    pub min_ns: u64,
    pub median_ns: u64,
    pub p95_ns: u64,
    pub p99_ns: u64,
    pub max_ns: u64,
    pub mean_ns: f64,
}
