//! Runtime configuration for the dashboard
//!
//! Every field has a default matching the stock board setup, so a partial
//! configuration file (or none at all) yields a working dashboard.

use alloc::string::String;

use embassy_time::Duration;
use serde::Deserialize;
use thiserror_no_std::Error;

/// Seconds in one hour, used for timezone offsets.
const SECS_PER_HOUR: i32 = 3600;

/// Supported timezone range in whole hours.
const TIMEZONE_RANGE_HOURS: core::ops::RangeInclusive<i8> = -12..=14;

/// Top-level dashboard configuration
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DashConfig {
    pub clock: ClockConfig,
    pub sensor: SensorConfig,
    pub battery: BatteryConfig,
    pub simulation: SimulationConfig,
}

/// Wall-clock synchronization settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ClockConfig {
    /// Offset from UTC in whole hours
    pub timezone_hours: i8,
    /// Whether to add `dst_offset_secs` on top of the timezone
    pub dst_enabled: bool,
    /// Daylight-saving offset in seconds
    pub dst_offset_secs: i32,
    /// Network time server identifier
    pub ntp_server: String,
    /// Period between network resynchronizations
    pub resync_interval_secs: u32,
    /// Period of the displayed-seconds tick
    pub tick_interval_ms: u32,
    /// Number of refresh cycles between forced full refreshes (date included)
    pub full_refresh_cycles: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            timezone_hours: 2,
            dst_enabled: false,
            dst_offset_secs: 3600,
            ntp_server: String::from("pool.ntp.org"),
            resync_interval_secs: 30 * 60,
            tick_interval_ms: 1000,
            full_refresh_cycles: 50,
        }
    }
}

impl ClockConfig {
    /// Effective offset handed to the time source, DST included when enabled.
    pub fn utc_offset_secs(&self) -> i32 {
        let mut offset = self.timezone_hours as i32 * SECS_PER_HOUR;
        if self.dst_enabled {
            offset += self.dst_offset_secs;
        }
        offset
    }

    pub fn resync_interval(&self) -> Duration {
        Duration::from_secs(self.resync_interval_secs as u64)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms as u64)
    }
}

/// Native range of the physical analog reading (Sensor mode)
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct SensorConfig {
    pub native_min: i32,
    pub native_max: i32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        // 10-bit ADC resolution
        Self {
            native_min: 0,
            native_max: 1024,
        }
    }
}

/// Battery voltage monitoring settings
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct BatteryConfig {
    pub read_interval_ms: u32,
    /// Ratio of the resistor divider in front of the ADC pin
    pub divider_ratio: u32,
    /// Readings at or below this many millivolts mean "no battery"
    pub connected_threshold_mv: u32,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            read_interval_ms: 5000,
            divider_ratio: 2,
            connected_threshold_mv: 1000,
        }
    }
}

impl BatteryConfig {
    pub fn read_interval(&self) -> Duration {
        Duration::from_millis(self.read_interval_ms as u64)
    }
}

/// Settings for the synthetic sample generator
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_DA5B,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Timezone offset {0}h is outside -12..=14")]
    TimezoneOutOfRange(i8),
    #[error("Interval `{0}` must be non-zero")]
    ZeroInterval(&'static str),
    #[error("NTP server name is empty")]
    EmptyServer,
    #[error("Sensor native range {min}..{max} is empty")]
    InvalidSensorRange { min: i32, max: i32 },
    #[error("Battery divider ratio must be non-zero")]
    ZeroDividerRatio,
}

impl DashConfig {
    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let clock = &self.clock;
        if !TIMEZONE_RANGE_HOURS.contains(&clock.timezone_hours) {
            return Err(ConfigError::TimezoneOutOfRange(clock.timezone_hours));
        }
        if clock.ntp_server.trim().is_empty() {
            return Err(ConfigError::EmptyServer);
        }
        if clock.resync_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval("clock.resync_interval_secs"));
        }
        if clock.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("clock.tick_interval_ms"));
        }
        if clock.full_refresh_cycles == 0 {
            return Err(ConfigError::ZeroInterval("clock.full_refresh_cycles"));
        }
        if self.sensor.native_min >= self.sensor.native_max {
            return Err(ConfigError::InvalidSensorRange {
                min: self.sensor.native_min,
                max: self.sensor.native_max,
            });
        }
        if self.battery.read_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("battery.read_interval_ms"));
        }
        if self.battery.divider_ratio == 0 {
            return Err(ConfigError::ZeroDividerRatio);
        }
        Ok(())
    }
}
