//! Application state and the per-cycle update of the dashboard

use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_hal::digital::InputPin;
use log::{debug, info};

use crate::battery::{BatteryMonitor, BatteryProbe, BatteryReading};
use crate::clock::{ClockError, ClockService, ClockState, TimeSource};
use crate::config::DashConfig;
use crate::input::{InputController, InputEvents};
use crate::sampling::{AnalogSensor, DisplayMode, SampleSource};
use crate::telemetry::{Sample, StatsSnapshot, StatsTracker, TelemetryWindow};
use crate::timing::FrameRateMeter;
use crate::ui::{FrameView, render_frame};

/// External collaborators the dashboard is driven by.
///
/// - `time`: network-synchronized wall clock
/// - `sensor`: analog input used in Sensor mode
/// - `battery`: battery voltage probe
/// - `key`: active-low line toggling the display mode
/// - `boot`: active-low line resetting the statistics
pub struct Hardware<T, S, B, K, R> {
    pub time: T,
    pub sensor: S,
    pub battery: B,
    pub key: K,
    pub boot: R,
}

/// What one [`Dashboard::run_cycle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub sample: Sample,
    pub events: InputEvents,
    /// A new battery reading was taken this cycle
    pub battery_read: bool,
    pub fps: u32,
}

/// All mutable dashboard state, owned by the single refresh loop.
pub struct Dashboard {
    window: TelemetryWindow,
    stats: StatsTracker,
    clock: ClockService,
    mode: DisplayMode,
    input: InputController,
    battery: BatteryMonitor,
    frame_rate: FrameRateMeter,
    sampler: SampleSource,
}

impl Dashboard {
    pub fn new(config: &DashConfig, now: Instant) -> Self {
        Self {
            window: TelemetryWindow::default(),
            stats: StatsTracker::new(),
            clock: ClockService::new(&config.clock, now),
            mode: DisplayMode::default(),
            input: InputController::new(),
            battery: BatteryMonitor::new(&config.battery),
            frame_rate: FrameRateMeter::new(),
            sampler: SampleSource::new(config.simulation.seed, config.sensor),
        }
    }

    /// Startup clock synchronization, see [`ClockService::bootstrap`].
    pub fn bootstrap<T: TimeSource>(&mut self, now: Instant, time: &mut T) -> Result<(), ClockError> {
        self.clock.bootstrap(now, time)
    }

    /// One refresh cycle: battery poll, input edges, frame rate, clock,
    /// sample acquisition, window push and statistics update.
    ///
    /// Never blocks; every periodic action is gated on `now`.
    pub fn run_cycle<T, S, B, K, R>(
        &mut self,
        now: Instant,
        hw: &mut Hardware<T, S, B, K, R>,
    ) -> CycleReport
    where
        T: TimeSource,
        S: AnalogSensor,
        B: BatteryProbe,
        K: InputPin,
        R: InputPin,
    {
        let battery_read = self.battery.poll(now, &mut hw.battery);

        let events = self.input.poll(&mut hw.key, &mut hw.boot);
        if events.toggle_mode {
            self.mode = self.mode.toggle();
            info!("Display mode switched to {}", self.mode.label());
        }
        if events.reset_stats {
            self.stats.reset(&self.window, self.clock.state());
        }

        let fps = self.frame_rate.frame(now);
        self.clock.tick(now, &mut hw.time);

        let sample = self
            .sampler
            .next_sample(self.mode, self.window.newest(), &mut hw.sensor);
        self.window.push(sample);
        self.stats.update(&self.window, self.clock.state());
        debug!("Cycle sample {} ({})", sample, self.mode.label());

        CycleReport {
            sample,
            events,
            battery_read,
            fps,
        }
    }

    /// Compose the current state into `target`.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, target: &mut D) -> Result<(), D::Error> {
        let view = FrameView {
            window: &self.window,
            stats: self.stats.snapshot(),
            clock: self.clock.state(),
            mode: self.mode,
            battery: self.battery.reading(),
            fps: self.frame_rate.fps(),
        };
        render_frame(&view, target)
    }

    pub fn window(&self) -> &TelemetryWindow {
        &self.window
    }

    pub fn stats(&self) -> &StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn clock(&self) -> &ClockState {
        self.clock.state()
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn battery(&self) -> BatteryReading {
        self.battery.reading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    use crate::clock::CalendarTime;
    use crate::framebuffer::FrameBuffer;
    use crate::telemetry::{VALUE_CAP, WINDOW_LEN};

    struct FakeTime {
        online: bool,
    }

    impl TimeSource for FakeTime {
        type Error = &'static str;

        fn synchronize(&mut self, _server: &str, _utc_offset_secs: i32) -> Result<(), Self::Error> {
            if self.online { Ok(()) } else { Err("unreachable") }
        }

        fn local_time(&mut self) -> Option<CalendarTime> {
            self.online.then_some(CalendarTime {
                year: 2026,
                month: 10,
                day: 18,
                hour: 9,
                minute: 15,
                second: 0,
            })
        }
    }

    struct FakeSensor(i32);

    impl AnalogSensor for FakeSensor {
        fn read_raw(&mut self) -> i32 {
            self.0
        }
    }

    struct FakeBattery(u32);

    impl BatteryProbe for FakeBattery {
        fn read_pin_millivolts(&mut self) -> u32 {
            self.0
        }
    }

    /// Active-low line; `pressed` drives it low.
    struct Button {
        pressed: bool,
    }

    impl ErrorType for Button {
        type Error = Infallible;
    }

    impl InputPin for Button {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.pressed)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.pressed)
        }
    }

    type TestHardware = Hardware<FakeTime, FakeSensor, FakeBattery, Button, Button>;

    fn hardware() -> TestHardware {
        Hardware {
            time: FakeTime { online: true },
            sensor: FakeSensor(768),
            battery: FakeBattery(2000),
            key: Button { pressed: false },
            boot: Button { pressed: false },
        }
    }

    fn ms(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    #[test]
    fn test_initial_state() {
        let dash = Dashboard::new(&DashConfig::default(), ms(0));
        assert_eq!(dash.mode(), DisplayMode::Simulated);
        assert_eq!(dash.window().newest(), VALUE_CAP / 2);
        assert_eq!(dash.window().oldest(), 0);
        assert_eq!(dash.stats().min_value, VALUE_CAP / 2);
        assert_eq!(dash.stats().max_value, VALUE_CAP / 2);
    }

    #[test]
    fn test_cycle_pushes_exactly_one_sample() {
        let mut hw = hardware();
        let mut dash = Dashboard::new(&DashConfig::default(), ms(0));
        let before = dash.window().clone();

        let report = dash.run_cycle(ms(20), &mut hw);
        assert_eq!(dash.window().len(), WINDOW_LEN);
        assert_eq!(dash.window().newest(), report.sample);
        assert_eq!(&dash.window().as_slice()[..WINDOW_LEN - 1], &before.as_slice()[1..]);
        assert!(report.sample <= VALUE_CAP);
    }

    #[test]
    fn test_key_edge_switches_to_sensor_mode() {
        let mut hw = hardware();
        let mut dash = Dashboard::new(&DashConfig::default(), ms(0));

        hw.key.pressed = true;
        let report = dash.run_cycle(ms(20), &mut hw);
        assert!(report.events.toggle_mode);
        assert_eq!(dash.mode(), DisplayMode::Sensor);
        // 768 of 0..1024 rescales to 75
        assert_eq!(report.sample, 75);

        // Holding the key does not toggle back
        dash.run_cycle(ms(40), &mut hw);
        assert_eq!(dash.mode(), DisplayMode::Sensor);

        hw.key.pressed = false;
        dash.run_cycle(ms(60), &mut hw);
        hw.key.pressed = true;
        dash.run_cycle(ms(80), &mut hw);
        assert_eq!(dash.mode(), DisplayMode::Simulated);
    }

    #[test]
    fn test_boot_edge_resets_statistics() {
        let mut hw = hardware();
        let mut dash = Dashboard::new(&DashConfig::default(), ms(0));
        dash.bootstrap(ms(0), &mut hw.time).unwrap();

        hw.key.pressed = true;
        dash.run_cycle(ms(20), &mut hw);
        hw.key.pressed = false;
        assert_eq!(dash.stats().max_value, 75);

        hw.sensor.0 = 256;
        hw.boot.pressed = true;
        let report = dash.run_cycle(ms(40), &mut hw);
        assert!(report.events.reset_stats);
        // Reset seeded from the previous newest (75), then the new 25 came in
        assert_eq!(dash.stats().max_value, 75);
        assert_eq!(dash.stats().min_value, 25);
        assert_eq!(dash.stats().min_timestamp.as_str(), "09:15:00");
    }

    #[test]
    fn test_battery_is_read_on_first_cycle_then_gated() {
        let mut hw = hardware();
        let mut dash = Dashboard::new(&DashConfig::default(), ms(0));

        assert!(dash.run_cycle(ms(10), &mut hw).battery_read);
        assert_eq!(dash.battery().millivolts, 4000);
        assert!(dash.battery().connected);

        hw.battery.0 = 0;
        assert!(!dash.run_cycle(ms(1000), &mut hw).battery_read);
        assert!(dash.run_cycle(ms(5010), &mut hw).battery_read);
        assert!(!dash.battery().connected);
    }

    #[test]
    fn test_offline_clock_keeps_running() {
        let mut hw = hardware();
        hw.time.online = false;
        let mut dash = Dashboard::new(&DashConfig::default(), ms(0));

        assert!(dash.bootstrap(ms(0), &mut hw.time).is_err());
        for i in 1..=5u64 {
            dash.run_cycle(ms(i * 1000), &mut hw);
        }
        assert_eq!(dash.clock().timestamp().as_str(), "00:00:05");
        assert_eq!(dash.clock().date, None);
    }

    #[test]
    fn test_draw_renders_into_frame_buffer() {
        let mut hw = hardware();
        let mut dash = Dashboard::new(&DashConfig::default(), ms(0));
        dash.run_cycle(ms(20), &mut hw);

        let mut frame = FrameBuffer::new();
        dash.draw(&mut frame).unwrap();
        assert!(frame.dirty_area().is_some());
        assert_eq!(frame.pixel(0, 0), Some(crate::ui::colors::BACKGROUND));
    }
}
