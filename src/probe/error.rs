use thiserror::Error;

/// Probe errors that cannot be folded into a failed sample
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("'{program}' command not found. Please ensure it is installed and in your PATH.")]
    UtilityMissing { program: String },
}

pub type Result<T> = std::result::Result<T, ProbeError>;
