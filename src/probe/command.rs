//! Per-platform ping command construction

use std::process::Command;
use std::time::Duration;

/// Minimum per-packet timeout handed to ping, in seconds
pub const PING_MIN_TIMEOUT_SECS: u64 = 1;

/// Lower bound for the process execution timeout, in seconds
pub const PROCESS_MIN_TIMEOUT_SECS: f64 = 2.0;

/// Margin added on top of the interval for the process execution timeout, in seconds
pub const PROCESS_TIMEOUT_MARGIN_SECS: f64 = 1.0;

/// Program name of the platform echo utility
pub const PING_PROGRAM: &str = "ping";

/// Target platform, selects the flag syntax of the ping utility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    /// Platform this binary was compiled for. Unknown Unix flavours use Linux syntax.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }
}

/// Per-packet timeout: the interval truncated to whole seconds, at least one second
pub fn inner_timeout(interval: Duration) -> Duration {
    Duration::from_secs(interval.as_secs().max(PING_MIN_TIMEOUT_SECS))
}

/// Ceiling for the whole ping process, always above [`inner_timeout`]
pub fn outer_timeout(interval: Duration) -> Duration {
    let secs = (interval.as_secs_f64() + PROCESS_TIMEOUT_MARGIN_SECS).max(PROCESS_MIN_TIMEOUT_SECS);
    Duration::from_secs_f64(secs)
}

/// A fully built single-echo invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl PingCommand {
    /// Build the single-echo command for `host` on `platform`
    pub fn new(platform: Platform, program: &str, host: &str, interval: Duration) -> Self {
        let timeout_secs = inner_timeout(interval).as_secs();
        let (count_flag, timeout_flag, timeout_value) = match platform {
            Platform::Linux => ("-c", "-W", timeout_secs.to_string()),
            Platform::MacOs => ("-c", "-t", timeout_secs.to_string()),
            // Windows takes the per-reply timeout in milliseconds
            Platform::Windows => ("-n", "-w", (timeout_secs * 1000).to_string()),
        };

        Self {
            program: program.to_string(),
            args: vec![
                count_flag.to_string(),
                "1".to_string(),
                timeout_flag.to_string(),
                timeout_value,
                host.to_string(),
            ],
        }
    }

    /// Convert into a `std::process::Command` ready to spawn
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}
