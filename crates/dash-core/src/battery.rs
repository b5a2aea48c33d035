//! Periodic battery voltage monitoring
//!
//! The read runs on its own interval, independent of the refresh cadence.
//! Each read completes before the result is stored, so the renderer only ever
//! sees a whole [`BatteryReading`].

use embassy_time::Instant;
use log::debug;

use crate::config::BatteryConfig;
use crate::timing::IntervalGate;

/// Raw battery measurement at the ADC pin, before the resistor divider.
pub trait BatteryProbe {
    fn read_pin_millivolts(&mut self) -> u32;
}

/// Last completed battery measurement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatteryReading {
    pub millivolts: u32,
    /// False when the reading is at or below the connection threshold
    pub connected: bool,
}

pub struct BatteryMonitor {
    gate: IntervalGate,
    divider_ratio: u32,
    connected_threshold_mv: u32,
    reading: BatteryReading,
}

impl BatteryMonitor {
    /// The first [`poll`](Self::poll) always reads.
    pub fn new(config: &BatteryConfig) -> Self {
        Self {
            gate: IntervalGate::new(config.read_interval(), None),
            divider_ratio: config.divider_ratio,
            connected_threshold_mv: config.connected_threshold_mv,
            reading: BatteryReading::default(),
        }
    }

    /// Read the probe if the interval has elapsed; returns true on a new reading.
    pub fn poll<P: BatteryProbe>(&mut self, now: Instant, probe: &mut P) -> bool {
        if !self.gate.poll(now) {
            return false;
        }

        let millivolts = probe.read_pin_millivolts().saturating_mul(self.divider_ratio);
        self.reading = BatteryReading {
            millivolts,
            connected: millivolts > self.connected_threshold_mv,
        };
        debug!("Battery: {} mV (connected: {})", millivolts, self.reading.connected);
        true
    }

    pub fn reading(&self) -> BatteryReading {
        self.reading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe(u32);

    impl BatteryProbe for FixedProbe {
        fn read_pin_millivolts(&mut self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_first_poll_reads_then_waits_for_interval() {
        let mut monitor = BatteryMonitor::new(&BatteryConfig::default());
        let mut probe = FixedProbe(2050);

        assert!(monitor.poll(Instant::from_millis(0), &mut probe));
        assert_eq!(
            monitor.reading(),
            BatteryReading {
                millivolts: 4100,
                connected: true
            }
        );

        probe.0 = 0;
        assert!(!monitor.poll(Instant::from_millis(4_999), &mut probe));
        assert_eq!(monitor.reading().millivolts, 4100);

        assert!(monitor.poll(Instant::from_millis(5_000), &mut probe));
        assert!(!monitor.reading().connected);
    }

    #[test]
    fn test_connection_threshold_is_exclusive() {
        let mut monitor = BatteryMonitor::new(&BatteryConfig::default());
        monitor.poll(Instant::from_millis(0), &mut FixedProbe(500));
        assert_eq!(monitor.reading().millivolts, 1000);
        assert!(!monitor.reading().connected);

        monitor.poll(Instant::from_millis(5_000), &mut FixedProbe(501));
        assert!(monitor.reading().connected);
    }
}
