//! Hardware-independent core library for the telemetry dashboard
//!
//! This crate contains all platform-agnostic logic of the dashboard: the
//! rolling sample window and its statistics, the sample source adapter, the
//! wall-clock synchronization scheduler, input edge detection, and the
//! render pipeline that composes each frame into an off-screen buffer.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).
//! Hardware is reached only through the traits at each seam:
//! [`clock::TimeSource`], [`sampling::AnalogSensor`],
//! [`battery::BatteryProbe`] and `embedded_hal::digital::InputPin`.

#![no_std]

extern crate alloc;

pub mod app_state;
pub mod battery;
pub mod clock;
pub mod config;
pub mod framebuffer;
pub mod input;
pub mod sampling;
pub mod telemetry;
pub mod timing;
pub mod ui;
