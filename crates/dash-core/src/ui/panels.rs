//! Clock, frame-rate, statistics and auxiliary-info panels

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_7X13, FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{CornerRadii, PrimitiveStyle, RoundedRectangle};
use embedded_graphics::text::Alignment;
use heapless::String;

use super::colors::{BACKGROUND, PANEL_BLUE, PANEL_GREEN, PANEL_PURPLE, SILVER, WHITE};
use super::draw_label;
use super::layout::*;
use crate::battery::BatteryReading;
use crate::clock::ClockState;
use crate::sampling::DisplayMode;
use crate::telemetry::{Sample, StatsSnapshot};

/// Longest panel line, e.g. `BAT:12345678mV`
const MAX_LINE_LENGTH: usize = 16;

pub type Line = String<MAX_LINE_LENGTH>;

fn fill_panel<D: DrawTarget<Color = Rgb565>>(
    panel: &PanelBox,
    color: Rgb565,
    target: &mut D,
) -> Result<(), D::Error> {
    let radius = Size::new_equal(panel.corner_radius);
    RoundedRectangle::new(panel.bounds, CornerRadii::new(radius))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(target)
}

/// Rounded backgrounds behind the left-column text
pub fn draw_backgrounds<D: DrawTarget<Color = Rgb565>>(target: &mut D) -> Result<(), D::Error> {
    for panel in [&HOUR_BOX, &MINUTE_BOX, &SECONDS_BOX, &DATE_BOX] {
        fill_panel(panel, PANEL_BLUE, target)?;
    }
    fill_panel(&FPS_BOX, PANEL_GREEN, target)?;
    fill_panel(&STATS_BOX, PANEL_PURPLE, target)
}

/// Hours, minutes, seconds and the date line
pub fn draw_clock<D: DrawTarget<Color = Rgb565>>(
    clock: &ClockState,
    target: &mut D,
) -> Result<(), D::Error> {
    let bg = Some(PANEL_BLUE);
    draw_label(target, &clock.hour_text(), HOUR_TEXT, &FONT_10X20, WHITE, bg, Alignment::Left)?;
    draw_label(target, &clock.minute_text(), MINUTE_TEXT, &FONT_10X20, WHITE, bg, Alignment::Left)?;
    draw_label(target, &clock.second_text(), SECONDS_TEXT, &FONT_7X13, WHITE, bg, Alignment::Left)?;
    draw_label(target, &clock.date_text(), DATE_TEXT, &FONT_6X10, WHITE, bg, Alignment::Left)
}

pub fn draw_frame_rate<D: DrawTarget<Color = Rgb565>>(
    fps: u32,
    target: &mut D,
) -> Result<(), D::Error> {
    draw_label(target, &fps_text(fps), FPS_TEXT, &FONT_6X10, WHITE, Some(PANEL_GREEN), Alignment::Left)
}

/// Average, then each extreme with the time it was observed underneath.
pub fn draw_statistics<D: DrawTarget<Color = Rgb565>>(
    stats: &StatsSnapshot,
    target: &mut D,
) -> Result<(), D::Error> {
    let bg = Some(PANEL_PURPLE);
    let rows = [
        ("VAL:", stats.average_value, AVERAGE_TEXT),
        ("MIN:", stats.min_value, MIN_TEXT),
        ("MAX:", stats.max_value, MAX_TEXT),
    ];
    for (label, value, position) in rows {
        draw_label(target, &stat_row(label, value), position, &FONT_7X13, WHITE, bg, Alignment::Left)?;
    }

    draw_label(
        target,
        &stats.min_timestamp,
        MIN_STAMP_TEXT,
        &FONT_6X10,
        SILVER,
        bg,
        Alignment::Left,
    )?;
    draw_label(
        target,
        &stats.max_timestamp,
        MAX_STAMP_TEXT,
        &FONT_6X10,
        SILVER,
        bg,
        Alignment::Left,
    )
}

pub fn fps_text(fps: u32) -> Line {
    let mut text = Line::new();
    let _ = write!(text, "FPS: {}", fps);
    text
}

/// Statistics row: label followed by the value right-aligned in 3 columns
pub fn stat_row(label: &str, value: Sample) -> Line {
    let mut text = Line::new();
    let _ = write!(text, "{} {:>3}", label, value);
    text
}

/// Battery text, `N/C` when no battery is detected
pub fn battery_text(reading: BatteryReading) -> Line {
    let mut text = Line::new();
    if reading.connected {
        let _ = write!(text, "BAT:{}mV", reading.millivolts);
    } else {
        let _ = text.push_str("BAT: N/C");
    }
    text
}

pub fn mode_text(mode: DisplayMode) -> Line {
    let mut text = Line::new();
    let _ = write!(text, "MODE:{}", mode.label());
    text
}

/// Power-source indicator and active mode, top right
pub fn draw_auxiliary_info<D: DrawTarget<Color = Rgb565>>(
    battery: BatteryReading,
    mode: DisplayMode,
    target: &mut D,
) -> Result<(), D::Error> {
    let bg = Some(BACKGROUND);
    draw_label(
        target,
        &battery_text(battery),
        BATTERY_TEXT,
        &FONT_6X10,
        WHITE,
        bg,
        Alignment::Left,
    )?;
    draw_label(
        target,
        &mode_text(mode),
        MODE_TEXT,
        &FONT_6X10,
        WHITE,
        bg,
        Alignment::Left,
    )
}
