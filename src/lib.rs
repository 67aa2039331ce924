//! Netmon - terminal network latency monitor
//!
//! This library provides the pieces of a single-host latency monitor: a prober that
//! wraps the platform `ping` utility, and a monitor loop that keeps a bounded rolling
//! history, derives a connection status narrative and renders it as a terminal frame.

pub mod monitor;
pub mod probe;
