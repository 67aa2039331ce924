use anyhow::{Context, Result};
use clap::Parser;
use netmon::monitor::{
    init_logging, install_interrupt_flag, Monitor, MonitorConfig, TerminalGuard, EXIT_CODE_ERROR,
    EXIT_CODE_SUCCESS, EXIT_CODE_USAGE,
};
use netmon::probe::SystemPing;
use std::io;
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    // Parse CLI arguments
    let config = MonitorConfig::parse();

    // Initialize structured logging with config options
    if let Err(e) = init_logging(&config.log_settings()) {
        eprintln!("Error: failed to initialize logging: {}", e);
        return ExitCode::from(EXIT_CODE_ERROR);
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_CODE_USAGE);
    }

    match run(config) {
        Ok(()) => {
            println!("\nMonitoring stopped by user.");
            ExitCode::from(EXIT_CODE_SUCCESS)
        }
        Err(e) => {
            error!(error = %format!("{:#}", e), "Monitor failed");
            eprintln!("\nAn unexpected or critical error occurred: {:#}", e);
            ExitCode::from(EXIT_CODE_ERROR)
        }
    }
}

fn run(config: MonitorConfig) -> Result<()> {
    let host = config.host.clone();

    // Interrupts are only observed between ticks
    let stop = install_interrupt_flag().context("Failed to set Ctrl-C handler")?;

    let prober = SystemPing::new();
    info!(host = %host, platform = ?prober.platform(), "Starting monitor");

    let mut guard = TerminalGuard::acquire().context("Failed to prepare terminal")?;
    let mut monitor = Monitor::new(config, prober);

    let result = {
        let mut stdout = io::stdout().lock();
        monitor.run(&mut stdout, &stop)
    };

    // Restore before reporting anything so messages land on a sane terminal
    let restored = guard.restore();
    result.with_context(|| format!("Monitoring {} failed", host))?;
    restored.context("Failed to restore terminal")?;
    Ok(())
}
