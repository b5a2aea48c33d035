//! Running min/max/average over the rolling window

use heapless::String;
use log::info;

use super::{RollingWindow, Sample, VALUE_CAP};
use crate::clock::ClockState;

/// Length of an `HH:MM:SS` timestamp.
pub const TIMESTAMP_LEN: usize = 8;

/// Wall-clock time an extreme was observed, `HH:MM:SS`.
pub type Timestamp = String<TIMESTAMP_LEN>;

/// Derived values shown in the statistics panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub min_value: Sample,
    pub min_timestamp: Timestamp,
    pub max_value: Sample,
    pub max_timestamp: Timestamp,
    /// Integer-truncated mean of the whole window
    pub average_value: Sample,
}

impl Default for StatsSnapshot {
    fn default() -> Self {
        Self {
            min_value: VALUE_CAP / 2,
            min_timestamp: Timestamp::new(),
            max_value: VALUE_CAP / 2,
            max_timestamp: Timestamp::new(),
            average_value: 0,
        }
    }
}

/// Owner of the [`StatsSnapshot`].
///
/// Min and max track extremes *since the last reset*: each cycle only the
/// newest sample is compared against the running extremes, so a value that
/// ages out of the window stays displayed until a new extreme or a reset.
#[derive(Debug, Clone, Default)]
pub struct StatsTracker {
    snapshot: StatsSnapshot,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the newest sample into the extremes and recompute the average.
    pub fn update<const N: usize>(&mut self, window: &RollingWindow<N>, now: &ClockState) {
        let newest = window.newest();
        let stats = &mut self.snapshot;

        if newest > stats.max_value {
            stats.max_value = newest;
            stats.max_timestamp = now.timestamp();
        }
        if newest < stats.min_value {
            stats.min_value = newest;
            stats.min_timestamp = now.timestamp();
        }

        stats.average_value = average(window);
    }

    /// Discard prior extremes, seeding both from the newest sample.
    pub fn reset<const N: usize>(&mut self, window: &RollingWindow<N>, now: &ClockState) {
        let newest = window.newest();
        let stamp = now.timestamp();
        info!("Statistics reset to {} at {}", newest, stamp.as_str());

        let stats = &mut self.snapshot;
        stats.min_value = newest;
        stats.max_value = newest;
        stats.min_timestamp = stamp.clone();
        stats.max_timestamp = stamp;
    }

    pub fn snapshot(&self) -> &StatsSnapshot {
        &self.snapshot
    }
}

/// Full recompute over the window, truncated toward zero.
fn average<const N: usize>(window: &RollingWindow<N>) -> Sample {
    if N == 0 {
        return 0;
    }
    (window.sum() / N as u32) as Sample
}
