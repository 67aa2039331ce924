//! Bounded rolling history of probe samples.

use crate::probe::Sample;
use std::collections::VecDeque;

/// Two lock-step rolling sequences of the most recent samples.
///
/// `real` keeps each [`Sample`] as recorded and feeds statistics and failure
/// markers; `plot` keeps the numeric value drawn on the chart, with failures
/// mapped to zero. Both always have the same length, never above `capacity`.
#[derive(Debug, Clone)]
pub struct History {
    real: VecDeque<Sample>,
    plot: VecDeque<f64>,
    capacity: usize,
}

impl History {
    /// Create an empty history holding at most `capacity` samples
    pub fn new(capacity: usize) -> Self {
        Self {
            real: VecDeque::with_capacity(capacity),
            plot: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest one once full
    pub fn push(&mut self, sample: Sample) {
        if self.capacity == 0 {
            return;
        }
        if self.real.len() >= self.capacity {
            self.real.pop_front();
            self.plot.pop_front();
        }
        self.real.push_back(sample);
        self.plot.push_back(sample.plot_value());
    }

    pub fn len(&self) -> usize {
        self.real.len()
    }

    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent sample
    pub fn last(&self) -> Option<Sample> {
        self.real.back().copied()
    }

    /// Samples as recorded, oldest first
    pub fn real_values(&self) -> impl Iterator<Item = Sample> + '_ {
        self.real.iter().copied()
    }

    /// Chart values, oldest first
    pub fn plot_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.plot.iter().copied()
    }

    /// Latencies of the successful samples only
    pub fn latencies(&self) -> impl Iterator<Item = f64> + '_ {
        self.real.iter().filter_map(Sample::latency_ms)
    }

    /// Indices of failed samples
    pub fn failure_indices(&self) -> Vec<usize> {
        self.real
            .iter()
            .enumerate()
            .filter(|(_, sample)| sample.is_failed())
            .map(|(i, _)| i)
            .collect()
    }

    /// Largest strictly positive chart value, if any
    pub fn max_plot_value(&self) -> Option<f64> {
        self.plot
            .iter()
            .copied()
            .filter(|v| *v > 0.0)
            .fold(None, |max, v| Some(max.map_or(v, |m: f64| m.max(v))))
    }
}
