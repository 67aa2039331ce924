//! Monitor configuration module
//!
//! Provides CLI argument parsing and validation for the netmon binary.

use crate::monitor::constants::*;
use crate::monitor::error::{MonitorError, Result};
use crate::monitor::logging::LogSettings;
use crate::probe::command::PROCESS_TIMEOUT_MARGIN_SECS;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

#[derive(Parser, Debug, Clone)]
#[command(name = "netmon")]
#[command(about = "Monitors latency to a host and displays a real-time graph in the terminal")]
pub struct MonitorConfig {
    /// The host or IP address to ping
    #[arg(default_value = DEFAULT_HOST)]
    pub host: String,

    /// Interval between pings in seconds (e.g. 0.5, 1, 10)
    #[arg(short, long, default_value_t = DEFAULT_PING_INTERVAL_SECONDS, allow_negative_numbers = true)]
    pub interval: f64,

    /// Reference maximum Y-axis value for the graph (ms)
    #[arg(long, default_value_t = DEFAULT_GRAPH_Y_MAX, allow_negative_numbers = true)]
    pub ymax: f64,

    /// Number of Y-axis ticks
    #[arg(long, default_value_t = DEFAULT_Y_TICKS)]
    pub yticks: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Log format (text or json)
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub log_format: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl MonitorConfig {
    /// Build a configuration for `host` with every other option at its default
    pub fn for_host(host: &str) -> Self {
        Self {
            host: host.to_string(),
            interval: DEFAULT_PING_INTERVAL_SECONDS,
            ymax: DEFAULT_GRAPH_Y_MAX,
            yticks: DEFAULT_Y_TICKS,
            log_level: "warn".to_string(),
            log_format: "text".to_string(),
            log_file: None,
        }
    }

    /// Returns the ping interval as a Duration
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.interval)
    }

    /// Validates the configuration values
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        if !(self.interval > 0.0 && self.interval.is_finite()) {
            return Err(MonitorError::Config(format!(
                "Ping interval ({}s) must be greater than zero.",
                self.interval
            )));
        }
        // The process deadline adds a margin on top of the interval
        if Duration::try_from_secs_f64(self.interval + PROCESS_TIMEOUT_MARGIN_SECS).is_err() {
            return Err(MonitorError::Config(format!(
                "Ping interval ({}s) is too large.",
                self.interval
            )));
        }
        if !(self.ymax > 0.0 && self.ymax.is_finite()) {
            return Err(MonitorError::Config(format!(
                "Graph Y-max ({}ms) must be greater than zero.",
                self.ymax
            )));
        }
        if self.yticks < 2 {
            return Err(MonitorError::Config(format!(
                "Number of Y-axis ticks ({}) must be at least 2.",
                self.yticks
            )));
        }
        if self.host.trim().is_empty() {
            return Err(MonitorError::Config("host must not be empty.".into()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(MonitorError::Config(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        debug!("Configuration validated successfully");
        Ok(())
    }

    /// Returns true if JSON format logging is enabled
    pub fn is_json_format(&self) -> bool {
        self.log_format.to_lowercase() == "json"
    }

    /// Logging options carried by this configuration
    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            level: self.log_level.clone(),
            json: self.is_json_format(),
            file: self.log_file.clone(),
        }
    }
}
