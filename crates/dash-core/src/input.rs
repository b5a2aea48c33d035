//! Mode/input controller: edge detection over two active-low input lines
//!
//! Line A (the key button) toggles the [`DisplayMode`](crate::sampling::DisplayMode),
//! line B (the boot button) requests a statistics reset. There is no debounce
//! beyond comparing against the previous sample. That is only sound while the
//! lines are sampled once per full refresh cycle, which is much slower than
//! contact bounce; a faster cycle needs a time-based debounce here.

use embedded_hal::digital::InputPin;
use log::warn;

/// Falling-edge detector for one active-low line.
#[derive(Debug, Clone, Copy)]
pub struct EdgeDetector {
    was_pressed: bool,
}

impl EdgeDetector {
    /// Starts in the released state.
    pub const fn new() -> Self {
        Self { was_pressed: false }
    }

    /// Level seen by the last [`just_pressed`](Self::just_pressed).
    pub const fn is_pressed(&self) -> bool {
        self.was_pressed
    }

    /// True only on the released -> pressed transition.
    pub fn just_pressed(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        edge
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Actions requested by the input lines during one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEvents {
    pub toggle_mode: bool,
    pub reset_stats: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputController {
    key: EdgeDetector,
    boot: EdgeDetector,
}

impl InputController {
    pub const fn new() -> Self {
        Self {
            key: EdgeDetector::new(),
            boot: EdgeDetector::new(),
        }
    }

    /// Feed the sampled line levels (`true` = pressed).
    pub fn update(&mut self, key_pressed: bool, boot_pressed: bool) -> InputEvents {
        InputEvents {
            toggle_mode: self.key.just_pressed(key_pressed),
            reset_stats: self.boot.just_pressed(boot_pressed),
        }
    }

    /// Sample both pins and feed them through the edge detectors.
    ///
    /// A failed read keeps the line at its previous level, so it can neither
    /// fire nor re-arm an edge.
    pub fn poll<K: InputPin, B: InputPin>(&mut self, key: &mut K, boot: &mut B) -> InputEvents {
        let key_pressed = read_level(key, "key").unwrap_or(self.key.is_pressed());
        let boot_pressed = read_level(boot, "boot").unwrap_or(self.boot.is_pressed());
        self.update(key_pressed, boot_pressed)
    }
}

/// Active-low read, `None` when the pin cannot be read.
fn read_level<P: InputPin>(pin: &mut P, name: &str) -> Option<bool> {
    match pin.is_low() {
        Ok(low) => Some(low),
        Err(e) => {
            warn!("Failed to read {} line: {:?}", name, e);
            None
        }
    }
}
