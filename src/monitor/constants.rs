//! Constants used throughout the monitor

/// Number of samples kept in the rolling history
pub const MAX_DATA_POINTS: usize = 200;

/// Consecutive failures at which a warning escalates to an alert
pub const CONSECUTIVE_FAILURES_ALERT_THRESHOLD: u32 = 3;

/// Lines reserved at the top of the frame for the status message
pub const STATUS_MESSAGE_RESERVED_LINES: usize = 3;

/// Rows taken by everything in the frame except the chart
pub const PLOT_ESTIMATED_OVERHEAD_LINES: u16 = 15;

/// Columns left free beside the chart
pub const PLOT_HORIZONTAL_MARGIN: u16 = 2;

/// Largest chart area in cells; ratatui sizes its braille canvas with a `u16`
pub const PLOT_MAX_CELLS: u32 = u16::MAX as u32;

/// Smallest chart height in rows
pub const PLOT_MIN_HEIGHT_LINES: u16 = 5;

/// Smallest chart width in columns
pub const PLOT_MIN_WIDTH_CHARS: u16 = 20;

/// Floor for the Y-axis upper bound in milliseconds
pub const PLOT_MIN_Y_LIM_UPPER: f64 = 10.0;

/// Headroom applied to the largest sample when scaling the Y-axis
pub const PLOT_Y_HEADROOM_FACTOR: f64 = 1.1;

/// Y position of failure markers
pub const PLOT_FAILURE_MARKER_Y_BASE: f64 = 0.0;

/// Default host to monitor
pub const DEFAULT_HOST: &str = "1.1.1.1";

/// Default interval between pings in seconds
pub const DEFAULT_PING_INTERVAL_SECONDS: f64 = 1.0;

/// Default reference maximum for the Y-axis in milliseconds
pub const DEFAULT_GRAPH_Y_MAX: f64 = 200.0;

/// Default number of Y-axis ticks
pub const DEFAULT_Y_TICKS: u32 = 6;

/// Exit code after a user interrupt
pub const EXIT_CODE_SUCCESS: u8 = 0;

/// Exit code for runtime errors
pub const EXIT_CODE_ERROR: u8 = 1;

/// Exit code for invalid arguments
pub const EXIT_CODE_USAGE: u8 = 2;
