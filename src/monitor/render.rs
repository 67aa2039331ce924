//! Frame composition.
//!
//! A frame is a pure function of the monitor state, the configuration and the
//! terminal size. Writing it to the terminal is left to [`crate::monitor::terminal`].

use crate::monitor::chart::{render_chart, PlotArea};
use crate::monitor::config::MonitorConfig;
use crate::monitor::constants::STATUS_MESSAGE_RESERVED_LINES;
use crate::monitor::runner::MonitorState;
use crate::monitor::statistics::Statistics;
use crate::monitor::status::StatusMessage;
use crate::probe::Sample;
use colored::Colorize;
use std::io;
use std::time::Duration;
use tracing::warn;

const WAITING_LINE: &str = "Waiting for first ping data...";
const STATS_HEADER: &str = "--- Statistics ---";
const STATS_FOOTER: &str = "--------------------";

/// Compose the full frame as newline separated lines
pub fn compose_frame(
    state: &MonitorState,
    config: &MonitorConfig,
    terminal_size: io::Result<(u16, u16)>,
) -> String {
    let mut lines = status_lines(state.status.message(), &config.host);

    if state.history.is_empty() {
        lines.push(WAITING_LINE.to_string());
    } else {
        lines.extend(chart_lines(state, config, terminal_size));
    }

    lines.extend(statistics_lines(state, config));
    lines.join("\n")
}

/// Status message plus optional rule, padded to the reserved height, then a blank line
fn status_lines(message: StatusMessage, host: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(STATUS_MESSAGE_RESERVED_LINES + 1);

    if let Some(text) = message.text(host) {
        let rule = "-".repeat(text.chars().count());
        let painted = match message {
            StatusMessage::Alert { .. } => text.red().bold().to_string(),
            StatusMessage::Warning { .. } => text.yellow().to_string(),
            _ => text.green().to_string(),
        };
        lines.push(painted);
        if message.has_rule() {
            lines.push(rule);
        }
    }

    lines.truncate(STATUS_MESSAGE_RESERVED_LINES);
    lines.resize(STATUS_MESSAGE_RESERVED_LINES, String::new());
    lines.push(String::new());
    lines
}

fn chart_lines(
    state: &MonitorState,
    config: &MonitorConfig,
    terminal_size: io::Result<(u16, u16)>,
) -> Vec<String> {
    let (columns, rows) = match terminal_size {
        Ok(size) => size,
        Err(e) => {
            warn!(error = %e, "Failed to read terminal size");
            return vec![format!("Error getting terminal size: {}", e)];
        }
    };

    let mut lines = Vec::new();
    let area = PlotArea::from_terminal(columns, rows);
    if area.undersized {
        lines.push(
            "WARNING: Calculated plot area is too small. Graph might not display well."
                .yellow()
                .to_string(),
        );
    }

    match render_chart(&state.history, config.ymax, config.yticks as usize, area) {
        Ok(chart) => lines.extend(chart),
        Err(e) => {
            warn!(error = %e, "Chart rendering failed");
            lines.push(format!("ERROR during chart rendering: {}", e).red().to_string());
        }
    }
    lines
}

fn statistics_lines(state: &MonitorState, config: &MonitorConfig) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        STATS_HEADER.bold().to_string(),
        format!("Monitoring Host: {}", config.host),
        format!("Ping Interval: {:.1}s", config.interval),
        format!("Graph Y-Max Ref: {:.0}ms", config.ymax),
    ];

    if let Some(last) = state.history.last() {
        match last {
            Sample::Reply(ms) => lines.push(format!("Current Latency: {:.2} ms", ms)),
            Sample::Failed => lines.push(format!("Current Latency: {}", "PING FAILED".red().bold())),
        }

        match Statistics::from_history(&state.history) {
            Some(stats) => {
                lines.push(format!("Average (valid pings): {:.2} ms", stats.mean()));
                lines.push(format!("Minimum (valid pings): {:.2} ms", stats.min()));
                lines.push(format!("Maximum (valid pings): {:.2} ms", stats.max()));
            }
            None => {
                lines.push("Average (valid pings): N/A".to_string());
                lines.push("Minimum (valid pings): N/A".to_string());
                lines.push("Maximum (valid pings): N/A".to_string());
            }
        }
    }

    lines.push(format!("Monitoring Time: {}", format_elapsed(state.elapsed)));
    lines.push(format!(
        "Consecutive Failures: {}",
        state.status.consecutive_failures()
    ));
    lines.push(STATS_FOOTER.to_string());
    lines
}

/// Format a duration as `1h 2m 5s`, omitting leading zero units
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::status::StatusTracker;

    fn config() -> MonitorConfig {
        MonitorConfig::for_host("1.1.1.1")
    }

    fn state_with(samples: &[Sample]) -> MonitorState {
        let mut state = MonitorState::new();
        for sample in samples {
            state.record(*sample, Duration::from_secs(1), "1.1.1.1");
        }
        state
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(3725)), "1h 2m 5s");
        assert_eq!(format_elapsed(Duration::from_secs(45)), "45s");
        assert_eq!(format_elapsed(Duration::from_secs(60)), "1m 0s");
        assert_eq!(format_elapsed(Duration::from_secs(3605)), "1h 0m 5s");
        assert_eq!(format_elapsed(Duration::ZERO), "0s");
        assert_eq!(format_elapsed(Duration::from_millis(1500)), "1s");
    }

    #[test]
    fn test_status_lines_reserve_fixed_height() {
        let steady = status_lines(StatusMessage::Steady, "h");
        let warning = status_lines(StatusMessage::Warning { failures: 1 }, "h");
        let alert = status_lines(StatusMessage::Alert { failures: 3 }, "h");

        assert_eq!(steady.len(), STATUS_MESSAGE_RESERVED_LINES + 1);
        assert_eq!(warning.len(), STATUS_MESSAGE_RESERVED_LINES + 1);
        assert_eq!(alert.len(), STATUS_MESSAGE_RESERVED_LINES + 1);
        assert!(steady.iter().all(String::is_empty));
    }

    #[test]
    fn test_status_rule_matches_message_length() {
        let lines = status_lines(StatusMessage::Restored { failures: 3 }, "h");
        let text = "INFO: Connection to h RESTORED after 3 failure(s)!";
        assert!(lines[0].contains(text));
        assert_eq!(lines[1], "-".repeat(text.len()));
    }

    #[test]
    fn test_warning_has_no_rule() {
        let lines = status_lines(StatusMessage::Warning { failures: 2 }, "h");
        assert!(lines[0].contains("Warning: Ping to h failed (2x)"));
        assert!(lines[1].is_empty());
    }

    #[test]
    fn test_empty_history_shows_waiting_line() {
        let state = MonitorState::new();
        let frame = compose_frame(&state, &config(), Ok((80, 40)));
        assert!(frame.contains(WAITING_LINE));
        assert!(frame.contains("Monitoring Time: 0s"));
        assert!(!frame.contains("Current Latency"));
    }

    #[test]
    fn test_statistics_block() {
        let state = state_with(&[Sample::Reply(10.0), Sample::Failed, Sample::Reply(20.0)]);
        let frame = compose_frame(&state, &config(), Ok((80, 40)));

        assert!(frame.contains("Monitoring Host: 1.1.1.1"));
        assert!(frame.contains("Ping Interval: 1.0s"));
        assert!(frame.contains("Graph Y-Max Ref: 200ms"));
        assert!(frame.contains("Current Latency: 20.00 ms"));
        assert!(frame.contains("Average (valid pings): 15.00 ms"));
        assert!(frame.contains("Minimum (valid pings): 10.00 ms"));
        assert!(frame.contains("Maximum (valid pings): 20.00 ms"));
        assert!(frame.contains("Monitoring Time: 3s"));
        assert!(frame.contains("Consecutive Failures: 0"));
    }

    #[test]
    fn test_all_failed_reports_not_available() {
        let state = state_with(&[Sample::Failed, Sample::Failed]);
        let frame = compose_frame(&state, &config(), Ok((80, 40)));

        assert!(frame.contains("PING FAILED"));
        assert!(frame.contains("Average (valid pings): N/A"));
        assert!(frame.contains("Minimum (valid pings): N/A"));
        assert!(frame.contains("Maximum (valid pings): N/A"));
        assert!(frame.contains("Consecutive Failures: 2"));
    }

    #[test]
    fn test_terminal_size_error_keeps_statistics() {
        let state = state_with(&[Sample::Reply(10.0)]);
        let err = io::Error::new(io::ErrorKind::Unsupported, "not a terminal");
        let frame = compose_frame(&state, &config(), Err(err));

        assert!(frame.contains("Error getting terminal size: not a terminal"));
        assert!(frame.contains("Current Latency: 10.00 ms"));
    }

    #[test]
    fn test_small_terminal_warns() {
        let state = state_with(&[Sample::Reply(10.0)]);
        let frame = compose_frame(&state, &config(), Ok((10, 10)));
        assert!(frame.contains("WARNING: Calculated plot area is too small"));
        assert!(frame.contains("--- Statistics ---"));
    }

    #[test]
    fn test_large_terminal_renders_chart() {
        let state = state_with(&[Sample::Reply(10.0), Sample::Failed]);
        let frame = compose_frame(&state, &config(), Ok((300, 250)));
        assert!(frame.contains("Real-time Internet Latency"));
        assert!(!frame.contains("ERROR during chart rendering"));
        assert!(frame.contains("Consecutive Failures: 1"));
    }

    #[test]
    fn test_chart_error_keeps_statistics() {
        let state = state_with(&[Sample::Reply(f64::INFINITY)]);
        let frame = compose_frame(&state, &config(), Ok((80, 40)));
        assert!(frame.contains("ERROR during chart rendering"));
        assert!(frame.contains("Consecutive Failures: 0"));
    }

    #[test]
    fn test_status_message_in_frame() {
        let mut state = MonitorState::new();
        state.status = StatusTracker::new();
        for _ in 0..3 {
            state.record(Sample::Failed, Duration::from_secs(1), "1.1.1.1");
        }
        let frame = compose_frame(&state, &config(), Ok((80, 40)));
        assert!(frame.contains("!!! ALERT: Connection to 1.1.1.1 LOST (3 failures) !!!"));
    }
}
