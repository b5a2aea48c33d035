//! Host stand-ins for the dashboard's hardware seams

use std::convert::Infallible;
use std::f64::consts::TAU;
use std::time::Instant;

use chrono::{Datelike, FixedOffset, Timelike, Utc};
use embedded_hal::digital::{ErrorType, InputPin};
use log::debug;
use thiserror::Error;

use dash_core::battery::BatteryProbe;
use dash_core::clock::{CalendarTime, TimeSource};
use dash_core::sampling::AnalogSensor;

/// Period of the simulated analog signal
const WAVE_PERIOD_SECS: f64 = 20.0;

/// Full scale of the simulated 10-bit converter
const WAVE_FULL_SCALE: f64 = 1023.0;

/// Pin voltage of a healthy battery behind the 1:2 divider
const BATTERY_PIN_MV: f64 = 2050.0;

#[derive(Debug, Error)]
pub enum SyncError {
    /// The simulated network is down
    #[error("time server {0} unreachable")]
    Unreachable(String),
    #[error("invalid UTC offset {0}s")]
    InvalidOffset(i32),
}

/// Wall clock backed by the host's UTC time.
///
/// `outage` simulates a lost network: synchronization fails and no time can
/// be read, so the dashboard has to advance the clock on its own.
pub struct HostClock {
    offset: Option<FixedOffset>,
    pub outage: bool,
}

impl HostClock {
    pub fn new() -> Self {
        Self {
            offset: None,
            outage: false,
        }
    }
}

impl TimeSource for HostClock {
    type Error = SyncError;

    fn synchronize(&mut self, server: &str, utc_offset_secs: i32) -> Result<(), Self::Error> {
        if self.outage {
            return Err(SyncError::Unreachable(server.to_owned()));
        }
        let offset =
            FixedOffset::east_opt(utc_offset_secs).ok_or(SyncError::InvalidOffset(utc_offset_secs))?;
        debug!("Host clock synced against {} with offset {}", server, offset);
        self.offset = Some(offset);
        Ok(())
    }

    fn local_time(&mut self) -> Option<CalendarTime> {
        if self.outage {
            return None;
        }
        let now = Utc::now().with_timezone(&self.offset?);
        Some(CalendarTime {
            year: now.year().clamp(0, u16::MAX as i32) as u16,
            month: now.month() as u8,
            day: now.day() as u8,
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
        })
    }
}

/// Slow sine wave across the converter's full range
pub struct WaveSensor {
    started: Instant,
}

impl WaveSensor {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl AnalogSensor for WaveSensor {
    fn read_raw(&mut self) -> i32 {
        let phase = self.started.elapsed().as_secs_f64() / WAVE_PERIOD_SECS * TAU;
        ((phase.sin() + 1.0) * 0.5 * WAVE_FULL_SCALE).round() as i32
    }
}

/// Battery that can be pulled out of its holder
pub struct HostBattery {
    started: Instant,
    pub unplugged: bool,
}

impl HostBattery {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            unplugged: false,
        }
    }
}

impl BatteryProbe for HostBattery {
    fn read_pin_millivolts(&mut self) -> u32 {
        if self.unplugged {
            return 0;
        }
        // Slow discharge, about 1 mV per minute
        let drained = self.started.elapsed().as_secs_f64() / 60.0;
        (BATTERY_PIN_MV - drained).max(0.0) as u32
    }
}

/// Active-low input line driven by a held keyboard key
#[derive(Debug, Default)]
pub struct KeyLine {
    pub held: bool,
}

impl ErrorType for KeyLine {
    type Error = Infallible;
}

impl InputPin for KeyLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.held)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.held)
    }
}
