//! Sample source adapter: one new reading per refresh cycle
//!
//! Two interchangeable providers sit behind [`DisplayMode`]: a synthetic
//! random walk and a physical analog input. Both are plain functions of their
//! inputs; the adapter only returns a value and never touches the window.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::SensorConfig;
use crate::telemetry::{Sample, VALUE_CAP};

/// Half-width of the random-walk neighbourhood.
const WALK_STEP: i32 = 12;

/// Width of the band just below the cap that overshooting values land in.
const CEILING_BAND: i32 = 10;

/// Which provider feeds the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Simulated,
    Sensor,
}

impl DisplayMode {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Simulated => Self::Sensor,
            Self::Sensor => Self::Simulated,
        }
    }

    /// Short label for the mode indicator
    pub const fn label(self) -> &'static str {
        match self {
            Self::Simulated => "SIM",
            Self::Sensor => "ADC",
        }
    }
}

/// Physical analog input read in Sensor mode.
///
/// Readings are expected in the native range configured in [`SensorConfig`];
/// anything outside it is clamped by the adapter.
pub trait AnalogSensor {
    fn read_raw(&mut self) -> i32;
}

/// Produces the next [`Sample`] for the active mode.
pub struct SampleSource {
    rng: SmallRng,
    sensor_range: SensorConfig,
}

impl SampleSource {
    pub fn new(seed: u64, sensor_range: SensorConfig) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            sensor_range,
        }
    }

    pub fn next_sample<S: AnalogSensor>(
        &mut self,
        mode: DisplayMode,
        last: Sample,
        sensor: &mut S,
    ) -> Sample {
        match mode {
            DisplayMode::Simulated => simulated_step(&mut self.rng, last),
            DisplayMode::Sensor => rescale_reading(sensor.read_raw(), &self.sensor_range),
        }
    }
}

/// Random walk around `last`.
///
/// Near zero the neighbourhood is widened and shifted to positive values so
/// the walk cannot drift negative. Overshooting the cap re-rolls into the
/// top band instead of clipping, which keeps the trace jittering near the
/// ceiling.
pub fn simulated_step<R: Rng>(rng: &mut R, last: Sample) -> Sample {
    let last = last as i32;
    let cap = VALUE_CAP as i32;

    let mut value = if last > WALK_STEP {
        rng.random_range(last - WALK_STEP..last + WALK_STEP)
    } else {
        rng.random_range(1..last + WALK_STEP + 2)
    };

    if value > cap {
        value = rng.random_range(cap - CEILING_BAND..cap);
    }

    value.clamp(0, cap) as Sample
}

/// Map a raw reading from its native range onto `0..=VALUE_CAP`.
pub fn rescale_reading(raw: i32, range: &SensorConfig) -> Sample {
    let raw = raw.clamp(range.native_min, range.native_max);
    crate::ui::chart::linear_scale(
        raw,
        range.native_min,
        range.native_max,
        0,
        VALUE_CAP as i32,
    )
    .clamp(0, VALUE_CAP as i32) as Sample
}
