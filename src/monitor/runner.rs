//! The monitor loop: probe, update state, render, sleep.

use crate::monitor::config::MonitorConfig;
use crate::monitor::constants::MAX_DATA_POINTS;
use crate::monitor::error::Result;
use crate::monitor::history::History;
use crate::monitor::render::compose_frame;
use crate::monitor::status::StatusTracker;
use crate::monitor::terminal::draw_frame;
use crate::probe::{Prober, Sample};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Source of the current terminal size in columns and rows
pub type TerminalSize = fn() -> io::Result<(u16, u16)>;

/// Install a Ctrl+C handler that sets the returned flag.
///
/// Only one handler may exist per process; a second install is an error.
pub fn install_interrupt_flag() -> Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })?;
    Ok(stop)
}

/// Everything the loop mutates, owned in one place
#[derive(Debug, Clone)]
pub struct MonitorState {
    pub history: History,
    pub status: StatusTracker,
    /// Sum of configured intervals, not wall-clock time
    pub elapsed: Duration,
}

impl MonitorState {
    pub fn new() -> Self {
        Self {
            history: History::new(MAX_DATA_POINTS),
            status: StatusTracker::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Apply one probe outcome: elapsed time, failure run and history
    pub fn record(&mut self, sample: Sample, interval: Duration, host: &str) {
        self.elapsed += interval;
        self.status.record(sample, host);
        self.history.push(sample);
    }
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives a [`Prober`] once per interval and renders the result
pub struct Monitor<P: Prober> {
    config: MonitorConfig,
    prober: P,
    state: MonitorState,
    terminal_size: TerminalSize,
}

impl<P: Prober> Monitor<P> {
    /// Create a monitor for an already validated configuration
    pub fn new(config: MonitorConfig, prober: P) -> Self {
        Self {
            config,
            prober,
            state: MonitorState::new(),
            terminal_size: crossterm::terminal::size,
        }
    }

    /// Replace the terminal size source
    pub fn with_terminal_size(mut self, terminal_size: TerminalSize) -> Self {
        self.terminal_size = terminal_size;
        self
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Probe once and fold the outcome into the state.
    ///
    /// Only an unrecoverable probe error is returned; failed probes become
    /// [`Sample::Failed`].
    pub fn tick(&mut self) -> Result<Sample> {
        let interval = self.config.interval();
        let sample = self.prober.probe(&self.config.host, interval)?;
        self.state.record(sample, interval, &self.config.host);

        debug!(
            sample = ?sample,
            consecutive_failures = self.state.status.consecutive_failures(),
            history_len = self.state.history.len(),
            "Tick completed"
        );
        Ok(sample)
    }

    /// Compose the frame for the current state
    pub fn frame(&self) -> String {
        compose_frame(&self.state, &self.config, (self.terminal_size)())
    }

    /// Run until `stop` is set, checking it before every tick.
    ///
    /// Returns `Ok(())` once stopped; any error ends the loop immediately.
    pub fn run<W: Write>(&mut self, out: &mut W, stop: &AtomicBool) -> Result<()> {
        let interval = self.config.interval();
        info!(
            host = %self.config.host,
            interval_ms = interval.as_millis() as u64,
            "Monitoring started"
        );

        loop {
            if stop.load(Ordering::SeqCst) {
                info!(
                    ticks_recorded = self.state.history.len(),
                    "Monitoring stopped by user"
                );
                return Ok(());
            }

            self.tick()?;
            draw_frame(out, &self.frame())?;
            thread::sleep(interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::error::MonitorError;
    use crate::monitor::status::StatusMessage;
    use crate::probe::system::MockProber;
    use crate::probe::ProbeError;
    use mockall::Sequence;

    fn fixed_size() -> io::Result<(u16, u16)> {
        Ok((80, 40))
    }

    fn fast_config() -> MonitorConfig {
        let mut config = MonitorConfig::for_host("10.0.0.1");
        config.interval = 0.001;
        config
    }

    fn scripted_prober(samples: Vec<Sample>) -> MockProber {
        let mut prober = MockProber::new();
        let mut seq = Sequence::new();
        for sample in samples {
            prober
                .expect_probe()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_, _| Ok(sample));
        }
        prober
    }

    #[test]
    fn test_status_narrative_scenario() -> Result<()> {
        let samples = vec![
            Sample::Reply(10.0),
            Sample::Reply(12.0),
            Sample::Failed,
            Sample::Failed,
            Sample::Failed,
            Sample::Reply(8.0),
        ];
        let mut config = MonitorConfig::for_host("1.1.1.1");
        config.interval = 1.0;
        let mut monitor = Monitor::new(config, scripted_prober(samples)).with_terminal_size(fixed_size);

        let mut messages = Vec::new();
        let mut counters = Vec::new();
        for _ in 0..6 {
            monitor.tick()?;
            messages.push(monitor.state().status.message());
            counters.push(monitor.state().status.consecutive_failures());
        }

        assert_eq!(
            messages,
            vec![
                StatusMessage::Steady,
                StatusMessage::Steady,
                StatusMessage::Warning { failures: 1 },
                StatusMessage::Warning { failures: 2 },
                StatusMessage::Alert { failures: 3 },
                StatusMessage::Restored { failures: 3 },
            ]
        );
        assert_eq!(counters, vec![0, 0, 1, 2, 3, 0]);
        assert_eq!(monitor.state().elapsed, Duration::from_secs(6));
        assert_eq!(monitor.state().history.len(), 6);
        Ok(())
    }

    #[test]
    fn test_probe_receives_host_and_interval() -> Result<()> {
        let mut prober = MockProber::new();
        prober
            .expect_probe()
            .withf(|host, interval| host == "10.0.0.1" && *interval == Duration::from_millis(1))
            .times(1)
            .returning(|_, _| Ok(Sample::Reply(1.0)));

        let mut monitor = Monitor::new(fast_config(), prober);
        assert_eq!(monitor.config().host, "10.0.0.1");
        assert_eq!(monitor.tick()?, Sample::Reply(1.0));
        Ok(())
    }

    #[test]
    fn test_run_stops_before_first_tick_when_interrupted() -> Result<()> {
        let mut prober = MockProber::new();
        prober.expect_probe().times(0);

        let stop = AtomicBool::new(true);
        let mut out = Vec::new();
        let mut monitor = Monitor::new(fast_config(), prober).with_terminal_size(fixed_size);
        monitor.run(&mut out, &stop)?;

        assert!(monitor.state().history.is_empty());
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn test_run_renders_each_tick_until_stopped() -> Result<()> {
        let stop = Arc::new(AtomicBool::new(false));
        let mut prober = MockProber::new();
        let mut calls = 0usize;
        let flag = Arc::clone(&stop);
        prober.expect_probe().times(3).returning(move |_, _| {
            calls += 1;
            if calls == 3 {
                flag.store(true, Ordering::SeqCst);
            }
            Ok(Sample::Reply(calls as f64 * 10.0))
        });

        let mut out = Vec::new();
        let mut monitor = Monitor::new(fast_config(), prober).with_terminal_size(fixed_size);
        monitor.run(&mut out, &stop)?;

        let latencies: Vec<f64> = monitor.state().history.latencies().collect();
        assert_eq!(latencies, vec![10.0, 20.0, 30.0]);
        assert!(String::from_utf8_lossy(&out).contains("Current Latency: 30.00 ms"));
        Ok(())
    }

    #[test]
    fn test_run_stops_on_missing_utility() {
        let mut prober = MockProber::new();
        prober.expect_probe().times(1).returning(|_, _| {
            Err(ProbeError::UtilityMissing {
                program: "ping".to_string(),
            })
        });

        let stop = AtomicBool::new(false);
        let mut out = Vec::new();
        let mut monitor = Monitor::new(fast_config(), prober).with_terminal_size(fixed_size);
        let result = monitor.run(&mut out, &stop);

        assert!(matches!(
            result,
            Err(MonitorError::Probe(ProbeError::UtilityMissing { .. }))
        ));
        assert!(monitor.state().history.is_empty());
    }

    #[test]
    fn test_interrupt_flag_installs_once() -> Result<()> {
        let stop = install_interrupt_flag()?;
        assert!(!stop.load(Ordering::SeqCst));

        assert!(matches!(
            install_interrupt_flag(),
            Err(MonitorError::Interrupt(_))
        ));
        Ok(())
    }

    #[test]
    fn test_frame_before_first_tick() {
        let monitor = Monitor::new(fast_config(), MockProber::new()).with_terminal_size(fixed_size);
        assert!(monitor.frame().contains("Waiting for first ping data..."));
    }
}
