use crate::probe::command::{outer_timeout, PingCommand, Platform, PING_PROGRAM};
use crate::probe::error::{ProbeError, Result};
use crate::probe::parse::parse_round_trip_ms;
use crate::probe::sample::Sample;
use std::io;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// How often a running ping process is polled for completion
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Trait for measuring the round-trip latency to a host
pub trait Prober {
    /// Perform exactly one probe of `host`.
    ///
    /// Every transient failure is reported as `Ok(Sample::Failed)`; an `Err` means
    /// probing cannot continue at all.
    fn probe(&mut self, host: &str, interval: Duration) -> Result<Sample>;
}

/// Prober that shells out to the platform ping utility
#[derive(Debug, Clone)]
pub struct SystemPing {
    platform: Platform,
    program: String,
}

impl SystemPing {
    /// Create a prober for the current platform using `ping` from `PATH`
    pub fn new() -> Self {
        Self::with_program(Platform::current(), PING_PROGRAM)
    }

    /// Create a prober with an explicit platform flavour and program
    pub fn with_program(platform: Platform, program: &str) -> Self {
        Self {
            platform,
            program: program.to_string(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }
}

impl Default for SystemPing {
    fn default() -> Self {
        Self::new()
    }
}

impl Prober for SystemPing {
    fn probe(&mut self, host: &str, interval: Duration) -> Result<Sample> {
        let ping = PingCommand::new(self.platform, &self.program, host, interval);
        let timeout = outer_timeout(interval);
        debug!(
            program = %ping.program,
            args = ?ping.args,
            timeout_ms = timeout.as_millis() as u64,
            "Running ping"
        );

        match run_with_timeout(ping.to_command(), timeout) {
            Ok(Some(output)) if output.status.success() => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                match parse_round_trip_ms(&stdout) {
                    Some(latency_ms) => {
                        debug!(host = host, latency_ms = latency_ms, "Ping reply received");
                        Ok(Sample::Reply(latency_ms))
                    }
                    None => {
                        warn!(
                            host = host,
                            "Ping successful, but no round-trip time found in output"
                        );
                        Ok(Sample::Failed)
                    }
                }
            }
            Ok(Some(output)) => {
                debug!(
                    host = host,
                    exit_code = ?output.status.code(),
                    stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                    "Ping failed"
                );
                Ok(Sample::Failed)
            }
            Ok(None) => {
                warn!(
                    host = host,
                    timeout_ms = timeout.as_millis() as u64,
                    "Ping timed out (process)"
                );
                Ok(Sample::Failed)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                error!(program = %self.program, "Ping command not found");
                Err(ProbeError::UtilityMissing {
                    program: self.program.clone(),
                })
            }
            Err(e) => {
                warn!(host = host, error = %e, "Error executing ping");
                Ok(Sample::Failed)
            }
        }
    }
}

/// Run `command` to completion, killing it once `timeout` elapses.
///
/// Returns `Ok(None)` when the process had to be killed.
pub(crate) fn run_with_timeout(mut command: Command, timeout: Duration) -> io::Result<Option<Output>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    let deadline = Instant::now() + timeout;

    loop {
        if child.try_wait()?.is_some() {
            return child.wait_with_output().map(Some);
        }

        if Instant::now() >= deadline {
            if let Err(e) = child.kill() {
                debug!(error = %e, "Failed to kill timed out process");
            }
            // Reap the child so it does not linger as a zombie
            child.wait()?;
            return Ok(None);
        }

        thread::sleep(WAIT_POLL_INTERVAL);
    }
}


#[cfg(test)]
pub use tests::MockProber;
