//! Non-blocking interval gates and frame-rate measurement
//!
//! The refresh cycle never sleeps to wait for a period to pass. Instead every
//! periodic task (clock resync, seconds tick, battery read) owns an
//! [`IntervalGate`] that is polled once per cycle against the monotonic clock.

use embassy_time::{Duration, Instant};

/// Fires at most once per `period`, measured against a monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct IntervalGate {
    period: Duration,
    last: Option<Instant>,
}

impl IntervalGate {
    /// Create a gate armed at `start`; `None` makes the first poll fire.
    pub const fn new(period: Duration, start: Option<Instant>) -> Self {
        Self {
            period,
            last: start,
        }
    }

    /// Returns true when the period has elapsed, re-arming the gate at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.last {
            Some(last) => now.saturating_duration_since(last) >= self.period,
            None => true,
        };
        if due {
            self.last = Some(now);
        }
        due
    }

    /// Time since the gate last fired, if it ever has.
    pub fn since_last(&self, now: Instant) -> Option<Duration> {
        self.last.map(|last| now.saturating_duration_since(last))
    }

    pub const fn period(&self) -> Duration {
        self.period
    }
}

/// Diagnostic frames-per-second counter.
///
/// Advisory only: the value is displayed but never used for pacing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameRateMeter {
    last_frame: Option<Instant>,
    fps: u32,
}

impl FrameRateMeter {
    pub const fn new() -> Self {
        Self {
            last_frame: None,
            fps: 0,
        }
    }

    /// Record a frame at `now` and return `1000 / elapsed_ms`.
    ///
    /// Sub-millisecond frames count as 1 ms; the very first frame reports 0.
    pub fn frame(&mut self, now: Instant) -> u32 {
        if let Some(last) = self.last_frame {
            let elapsed_ms = now.saturating_duration_since(last).as_millis().max(1);
            self.fps = (1000 / elapsed_ms) as u32;
        }
        self.last_frame = Some(now);
        self.fps
    }

    pub const fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_fires_only_after_period() {
        let start = Instant::from_millis(1_000);
        let mut gate = IntervalGate::new(Duration::from_millis(500), Some(start));

        assert!(!gate.poll(Instant::from_millis(1_499)));
        assert!(gate.poll(Instant::from_millis(1_500)));
        // Re-armed at 1500
        assert!(!gate.poll(Instant::from_millis(1_900)));
        assert!(gate.poll(Instant::from_millis(2_000)));
    }

    #[test]
    fn test_unarmed_gate_fires_immediately() {
        let mut gate = IntervalGate::new(Duration::from_secs(5), None);
        assert!(gate.since_last(Instant::from_millis(0)).is_none());
        assert!(gate.poll(Instant::from_millis(10)));
        assert!(!gate.poll(Instant::from_millis(20)));
        assert_eq!(
            gate.since_last(Instant::from_millis(30)),
            Some(Duration::from_millis(20))
        );
    }

    #[test]
    fn test_frame_rate() {
        let mut meter = FrameRateMeter::new();
        assert_eq!(meter.frame(Instant::from_millis(100)), 0);
        assert_eq!(meter.frame(Instant::from_millis(120)), 50);
        assert_eq!(meter.frame(Instant::from_millis(153)), 30);
        // Same-millisecond frame is clamped rather than dividing by zero
        assert_eq!(meter.frame(Instant::from_millis(153)), 1000);
        assert_eq!(meter.fps(), 1000);
    }
}
