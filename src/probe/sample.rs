/// Outcome of a single probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// Round-trip time in milliseconds
    Reply(f64),
    /// No valid latency was obtained
    Failed,
}

impl Sample {
    /// Returns the latency in milliseconds, or `None` for a failed probe
    pub fn latency_ms(&self) -> Option<f64> {
        match *self {
            Sample::Reply(ms) => Some(ms),
            Sample::Failed => None,
        }
    }

    /// Value used on the chart; failures are drawn at zero
    pub fn plot_value(&self) -> f64 {
        self.latency_ms().unwrap_or(0.0)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Sample::Failed)
    }
}

impl From<Option<f64>> for Sample {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Sample::Failed, Sample::Reply)
    }
}
