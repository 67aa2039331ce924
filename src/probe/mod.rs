//! Latency prober built on the platform ping utility

pub mod command;
pub mod error;
pub mod parse;
pub mod sample;
pub mod system;

pub use command::{inner_timeout, outer_timeout, PingCommand, Platform};
pub use error::{ProbeError, Result};
pub use parse::parse_round_trip_ms;
pub use sample::Sample;
pub use system::{Prober, SystemPing};
