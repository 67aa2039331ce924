//! Connection status narrative derived from consecutive failure runs

use crate::monitor::constants::CONSECUTIVE_FAILURES_ALERT_THRESHOLD;
use crate::probe::Sample;
use tracing::{info, warn};

/// Current status line shown above the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    /// Nothing to report
    Steady,
    /// Failure run below the alert threshold
    Warning { failures: u32 },
    /// Failure run reached the threshold; latched until the next success
    Alert { failures: u32 },
    /// First success after an alert
    Restored { failures: u32 },
    /// First success after a run shorter than the threshold
    Normalized { failures: u32 },
}

impl StatusMessage {
    /// Render the message for `host`; `None` when steady
    pub fn text(&self, host: &str) -> Option<String> {
        match *self {
            StatusMessage::Steady => None,
            StatusMessage::Warning { failures } => {
                Some(format!("Warning: Ping to {} failed ({}x)", host, failures))
            }
            StatusMessage::Alert { failures } => Some(format!(
                "!!! ALERT: Connection to {} LOST ({} failures) !!!",
                host, failures
            )),
            StatusMessage::Restored { failures } => Some(format!(
                "INFO: Connection to {} RESTORED after {} failure(s)!",
                host, failures
            )),
            StatusMessage::Normalized { failures } => Some(format!(
                "INFO: Ping to {} normalized after {} failure(s).",
                host, failures
            )),
        }
    }

    /// Alerts and info messages are underlined with a rule
    pub fn has_rule(&self) -> bool {
        self.is_alert() || self.is_info()
    }

    pub fn is_alert(&self) -> bool {
        matches!(self, StatusMessage::Alert { .. })
    }

    pub fn is_info(&self) -> bool {
        matches!(
            self,
            StatusMessage::Restored { .. } | StatusMessage::Normalized { .. }
        )
    }
}

/// Failure counter plus the message it drives
#[derive(Debug, Clone)]
pub struct StatusTracker {
    consecutive_failures: u32,
    message: StatusMessage,
    threshold: u32,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::with_threshold(CONSECUTIVE_FAILURES_ALERT_THRESHOLD)
    }

    pub fn with_threshold(threshold: u32) -> Self {
        Self {
            consecutive_failures: 0,
            message: StatusMessage::Steady,
            threshold,
        }
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn message(&self) -> StatusMessage {
        self.message
    }

    /// Fold one sample into the failure run and recompute the message
    pub fn record(&mut self, sample: Sample, host: &str) {
        if sample.is_failed() {
            self.consecutive_failures = self.consecutive_failures.saturating_add(1);
            let failures = self.consecutive_failures;

            if !self.message.is_alert() {
                if failures >= self.threshold {
                    warn!(host = host, failures = failures, "Connection lost");
                    self.message = StatusMessage::Alert { failures };
                } else {
                    self.message = StatusMessage::Warning { failures };
                }
            }
            return;
        }

        let failures = self.consecutive_failures;
        if failures >= self.threshold {
            info!(host = host, failures = failures, "Connection restored");
            self.message = StatusMessage::Restored { failures };
        } else if failures > 0 {
            self.message = StatusMessage::Normalized { failures };
        } else if self.message.is_info() {
            self.message = StatusMessage::Steady;
        }
        self.consecutive_failures = 0;
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}
