//! Desktop simulator for the rolling telemetry dashboard.
//!
//! Runs the dash-core refresh loop in an SDL2 window via
//! `embedded-graphics-simulator`, with host stand-ins for the clock, the
//! analog input, the battery and the two buttons.
//!
//! # Key bindings
//!
//! | Key   | Action                                    |
//! |-------|-------------------------------------------|
//! | K     | Hold the key line (toggles SIM/ADC mode)  |
//! | B     | Hold the boot line (resets statistics)    |
//! | N     | Toggle a simulated network outage         |
//! | P     | Unplug / replug the battery               |
//! | Q/Esc | Quit                                      |
//!
//! Set `RUST_LOG=debug` for per-cycle logging and `DASH_CONFIG` to point at
//! a TOML config file (default `dash.toml`).

mod config;
mod host;

use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info, warn};

use dash_core::app_state::{Dashboard, Hardware};
use dash_core::framebuffer::FrameBuffer;
use dash_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

use host::{HostBattery, HostClock, KeyLine, WaveSensor};

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target cycle duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

type HostHardware = Hardware<HostClock, WaveSensor, HostBattery, KeyLine, KeyLine>;

/// Apply a key press or release to the simulated hardware.
///
/// Returns false when the simulator should exit.
fn handle_key(hw: &mut HostHardware, keycode: Keycode, down: bool) -> bool {
    match keycode {
        Keycode::Q | Keycode::Escape => return false,
        Keycode::K => hw.key.held = down,
        Keycode::B => hw.boot.held = down,
        Keycode::N if down => {
            hw.time.outage = !hw.time.outage;
            info!(
                "Network {}",
                if hw.time.outage { "down" } else { "restored" }
            );
        }
        Keycode::P if down => {
            hw.battery.unplugged = !hw.battery.unplugged;
            info!(
                "Battery {}",
                if hw.battery.unplugged { "unplugged" } else { "plugged in" }
            );
        }
        _ => {}
    }
    true
}

fn main() {
    env_logger::init();
    info!("Starting telemetry dashboard simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: K=mode  B=reset stats  N=network outage  P=battery  Q=Quit");

    let config = config::load();

    let mut hw: HostHardware = Hardware {
        time: HostClock::new(),
        sensor: WaveSensor::new(),
        battery: HostBattery::new(),
        key: KeyLine::default(),
        boot: KeyLine::default(),
    };

    let mut dashboard = Dashboard::new(&config, embassy_time::Instant::now());
    if let Err(e) = dashboard.bootstrap(embassy_time::Instant::now(), &mut hw.time) {
        warn!("{}; running on local time until the next resync", e);
    }

    // SDL2 display and window
    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Telemetry Dashboard", &output_settings);

    let mut frame = FrameBuffer::new();

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    if let Err(e) = dashboard.draw(&mut frame) {
        error!("Draw error: {:?}", e);
    }
    if let Err(e) = frame.present(&mut display, Point::zero()) {
        error!("Present error: {:?}", e);
    }
    window.update(&display);

    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            let keep_running = match event {
                SimulatorEvent::Quit => false,
                SimulatorEvent::KeyDown { keycode, .. } => handle_key(&mut hw, keycode, true),
                SimulatorEvent::KeyUp { keycode, .. } => handle_key(&mut hw, keycode, false),
                _ => true,
            };
            if !keep_running {
                break 'running;
            }
        }

        dashboard.run_cycle(embassy_time::Instant::now(), &mut hw);

        if let Err(e) = dashboard.draw(&mut frame) {
            error!("Draw error: {:?}", e);
        }
        if let Err(e) = frame.present(&mut display, Point::zero()) {
            error!("Present error: {:?}", e);
        }
        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
