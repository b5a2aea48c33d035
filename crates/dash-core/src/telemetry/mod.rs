//! Rolling telemetry history and derived statistics
//!
//! The [`RollingWindow`] is the single authoritative history of samples.
//! The [`StatsTracker`] and the render pipeline only ever read it.

mod stats;
mod window;

pub use stats::{StatsSnapshot, StatsTracker, TIMESTAMP_LEN, Timestamp};
pub use window::RollingWindow;

/// One scalar reading in `0..=VALUE_CAP`.
pub type Sample = u8;

/// Largest value a [`Sample`] may take.
pub const VALUE_CAP: Sample = 100;

/// Number of samples kept in the rolling window.
pub const WINDOW_LEN: usize = 24;

/// The dashboard's rolling window.
pub type TelemetryWindow = RollingWindow<WINDOW_LEN>;
