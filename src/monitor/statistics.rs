use crate::monitor::history::History;
use tracing::debug;

/// Summary statistics over the successful samples of a history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    mean: f64,
    min: f64,
    max: f64,
    count: usize,
}

impl Statistics {
    /// Compute statistics over latencies in milliseconds.
    ///
    /// Returns `None` when there is nothing to summarise.
    pub fn from_latencies<I>(latencies: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for latency in latencies {
            count += 1;
            sum += latency;
            min = min.min(latency);
            max = max.max(latency);
        }

        if count == 0 {
            return None;
        }

        let stats = Self {
            mean: sum / count as f64,
            min,
            max,
            count,
        };
        debug!(
            count = count,
            mean_ms = stats.mean,
            min_ms = stats.min,
            max_ms = stats.max,
            "Statistics calculated"
        );
        Some(stats)
    }

    /// Statistics over the non-failed samples of `history`
    pub fn from_history(history: &History) -> Option<Self> {
        Self::from_latencies(history.latencies())
    }

    /// Get the mean latency
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Get the minimum latency
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Get the maximum latency
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Get the number of successful samples
    pub fn count(&self) -> usize {
        self.count
    }
}
