//! Resynchronization scheduler for the displayed clock

use alloc::string::String;
use core::fmt::Write;

use embassy_time::{Duration, Instant};
use log::{debug, info, warn};

use super::{ClockError, ClockState, TimeSource};
use crate::config::ClockConfig;
use crate::timing::IntervalGate;

/// Keeps [`ClockState`] correct using three independent triggers:
///
/// - the long resync gate asks the network source to resynchronize and, if it
///   answers, overwrites every field;
/// - the one-second gate reads the authoritative time, falling back to a
///   local increment of the last known time when the read fails;
/// - every `full_refresh_cycles` calls, all fields (date included) are
///   re-read to undo drift from local incrementing.
///
/// Failures are logged and absorbed; a failed resync is retried on the next
/// interval, never immediately.
#[derive(Debug, Clone)]
pub struct ClockService {
    server: String,
    utc_offset_secs: i32,
    full_refresh_cycles: u32,
    state: ClockState,
    resync: IntervalGate,
    tick: IntervalGate,
    cycles_since_refresh: u32,
}

impl ClockService {
    /// Both gates are armed at `now`, so nothing fires on the first cycle.
    pub fn new(config: &ClockConfig, now: Instant) -> Self {
        Self {
            server: config.ntp_server.clone(),
            utc_offset_secs: config.utc_offset_secs(),
            full_refresh_cycles: config.full_refresh_cycles.max(1),
            state: ClockState::default(),
            resync: IntervalGate::new(config.resync_interval(), Some(now)),
            tick: IntervalGate::new(config.tick_interval(), Some(now)),
            cycles_since_refresh: 0,
        }
    }

    /// Startup synchronization.
    ///
    /// Unlike the steady-state resync this reports failure, leaving it to the
    /// caller to decide whether running on an unset clock is acceptable.
    pub fn bootstrap<T: TimeSource>(
        &mut self,
        now: Instant,
        source: &mut T,
    ) -> Result<(), ClockError> {
        info!(
            "Syncing time with {} (UTC{:+}s)",
            self.server, self.utc_offset_secs
        );
        if let Err(e) = source.synchronize(&self.server, self.utc_offset_secs) {
            let mut reason = heapless::String::<64>::new();
            let _ = write!(reason, "{:?}", e);
            return Err(ClockError::SyncFailed(reason));
        }
        let calendar = source.local_time().ok_or(ClockError::TimeUnavailable)?;
        self.state.apply(&calendar);

        self.resync = IntervalGate::new(self.resync.period(), Some(now));
        self.tick = IntervalGate::new(self.tick.period(), Some(now));
        info!("Time synchronized: {}", self.state.timestamp().as_str());
        Ok(())
    }

    /// Run one refresh cycle's worth of clock maintenance.
    pub fn tick<T: TimeSource>(&mut self, now: Instant, source: &mut T) -> &ClockState {
        if self.resync.poll(now) {
            self.resync_from(source);
        }

        if self.tick.poll(now) {
            match source.local_time() {
                Some(calendar) => self.state.time = calendar.wall_time(),
                None => {
                    self.state.time.increment();
                    debug!(
                        "Time source unavailable, advanced locally to {}",
                        self.state.timestamp().as_str()
                    );
                }
            }
        }

        self.cycles_since_refresh += 1;
        if self.cycles_since_refresh >= self.full_refresh_cycles {
            self.cycles_since_refresh = 0;
            if let Some(calendar) = source.local_time() {
                self.state.apply(&calendar);
            }
        }

        &self.state
    }

    fn resync_from<T: TimeSource>(&mut self, source: &mut T) {
        match source.synchronize(&self.server, self.utc_offset_secs) {
            Ok(()) => match source.local_time() {
                Some(calendar) => {
                    self.state.apply(&calendar);
                    info!("Clock resynchronized from {}", self.server);
                }
                None => warn!("Resync succeeded but no time available yet"),
            },
            Err(e) => warn!("Clock resync with {} failed: {:?}", self.server, e),
        }
    }

    pub fn state(&self) -> &ClockState {
        &self.state
    }

    /// Time since the last resync attempt.
    pub fn since_resync(&self, now: Instant) -> Duration {
        self.resync.since_last(now).unwrap_or(Duration::from_ticks(0))
    }

    /// Time since the last seconds tick.
    pub fn since_tick(&self, now: Instant) -> Duration {
        self.tick.since_last(now).unwrap_or(Duration::from_ticks(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{CalendarDate, CalendarTime, WallTime};

    /// Scripted time source: `online` controls both sync and reads.
    struct FakeSource {
        online: bool,
        now: CalendarTime,
        syncs: usize,
        last_offset: Option<i32>,
    }

    impl FakeSource {
        fn new(online: bool) -> Self {
            Self {
                online,
                now: CalendarTime {
                    year: 2026,
                    month: 10,
                    day: 18,
                    hour: 14,
                    minute: 30,
                    second: 5,
                },
                syncs: 0,
                last_offset: None,
            }
        }
    }

    impl TimeSource for FakeSource {
        type Error = &'static str;

        fn synchronize(&mut self, _server: &str, utc_offset_secs: i32) -> Result<(), Self::Error> {
            self.syncs += 1;
            self.last_offset = Some(utc_offset_secs);
            if self.online { Ok(()) } else { Err("timeout") }
        }

        fn local_time(&mut self) -> Option<CalendarTime> {
            self.online.then_some(self.now)
        }
    }

    fn config() -> ClockConfig {
        ClockConfig {
            resync_interval_secs: 60,
            full_refresh_cycles: 1000,
            ..ClockConfig::default()
        }
    }

    fn ms(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    #[test]
    fn test_bootstrap_fills_all_fields() {
        let mut source = FakeSource::new(true);
        let mut clock = ClockService::new(&config(), ms(0));

        assert_eq!(clock.bootstrap(ms(0), &mut source), Ok(()));
        assert_eq!(source.last_offset, Some(7200));
        assert_eq!(clock.state().timestamp().as_str(), "14:30:05");
        assert_eq!(clock.state().date_text().as_str(), "18 Oct '26");
    }

    #[test]
    fn test_bootstrap_reports_failure() {
        let mut source = FakeSource::new(false);
        let mut clock = ClockService::new(&config(), ms(0));

        let err = clock.bootstrap(ms(0), &mut source).unwrap_err();
        assert!(matches!(err, ClockError::SyncFailed(ref s) if s.as_str() == "\"timeout\""));
        assert_eq!(clock.state(), &ClockState::default());
    }

    #[test]
    fn test_seconds_advance_locally_while_offline() {
        let mut source = FakeSource::new(true);
        let mut clock = ClockService::new(&config(), ms(0));
        clock.bootstrap(ms(0), &mut source).unwrap();

        source.online = false;
        for i in 1..=3u64 {
            clock.tick(ms(i * 1000), &mut source);
        }
        assert_eq!(clock.state().timestamp().as_str(), "14:30:08");
        // Date fields are kept from the last authoritative read
        assert_eq!(clock.state().date_text().as_str(), "18 Oct '26");
    }

    #[test]
    fn test_tick_is_gated_to_interval() {
        let mut source = FakeSource::new(false);
        let mut clock = ClockService::new(&config(), ms(0));

        for t in [100, 400, 999] {
            clock.tick(ms(t), &mut source);
        }
        assert_eq!(clock.state().time, WallTime::default());

        clock.tick(ms(1000), &mut source);
        assert_eq!(clock.state().time.second, 1);
        assert_eq!(clock.since_tick(ms(1250)), Duration::from_millis(250));
    }

    #[test]
    fn test_tick_reads_authoritative_time_when_available() {
        let mut source = FakeSource::new(true);
        let mut clock = ClockService::new(&config(), ms(0));

        source.now.second = 42;
        clock.tick(ms(1000), &mut source);
        assert_eq!(clock.state().time.second, 42);
        // The seconds tick never touches the date
        assert_eq!(clock.state().date, None);
    }

    #[test]
    fn test_failed_resync_leaves_fields_and_waits_for_next_interval() {
        let mut source = FakeSource::new(true);
        let mut clock = ClockService::new(&config(), ms(0));
        clock.bootstrap(ms(0), &mut source).unwrap();
        let syncs_after_boot = source.syncs;

        source.online = false;
        source.now.hour = 3;
        clock.tick(ms(60_000), &mut source);
        assert_eq!(source.syncs, syncs_after_boot + 1);
        assert_eq!(clock.state().time.hour, 14);

        // No immediate retry
        clock.tick(ms(60_500), &mut source);
        clock.tick(ms(61_000), &mut source);
        assert_eq!(source.syncs, syncs_after_boot + 1);

        source.online = true;
        clock.tick(ms(120_000), &mut source);
        assert_eq!(source.syncs, syncs_after_boot + 2);
        assert_eq!(clock.state().time.hour, 3);
        assert_eq!(clock.since_resync(ms(121_000)), Duration::from_secs(1));
    }

    #[test]
    fn test_periodic_full_refresh_restores_date() {
        let cfg = ClockConfig {
            full_refresh_cycles: 50,
            ..config()
        };
        let mut source = FakeSource::new(true);
        let mut clock = ClockService::new(&cfg, ms(0));

        // Cycles inside the tick interval only count towards the refresh
        for i in 0..49u64 {
            clock.tick(ms(i * 10), &mut source);
        }
        assert_eq!(clock.state().date, None);

        clock.tick(ms(490), &mut source);
        assert_eq!(
            clock.state().date,
            Some(CalendarDate {
                year: 2026,
                month: 10,
                day: 18
            })
        );
        assert_eq!(clock.state().timestamp().as_str(), "14:30:05");
    }
}
