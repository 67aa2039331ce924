use crate::probe::ProbeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Interrupt handler error: {0}")]
    Interrupt(#[from] ctrlc::Error),
}

pub type Result<T> = std::result::Result<T, MonitorError>;
