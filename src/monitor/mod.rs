//! Monitor loop, state and frame rendering

pub mod chart;
pub mod config;
pub mod constants;
pub mod error;
pub mod history;
pub mod logging;
pub mod render;
pub mod runner;
pub mod statistics;
pub mod status;
pub mod terminal;

pub use chart::{render_chart, y_axis_upper_bound, y_tick_positions, PlotArea};
pub use config::MonitorConfig;
pub use constants::*;
pub use error::{MonitorError, Result};
pub use history::History;
pub use logging::{init_logging, LogSettings};
pub use render::{compose_frame, format_elapsed};
pub use runner::{install_interrupt_flag, Monitor, MonitorState, TerminalSize};
pub use statistics::Statistics;
pub use status::{StatusMessage, StatusTracker};
pub use terminal::{draw_frame, TerminalGuard};
