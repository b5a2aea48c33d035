//! Full-frame composition

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::chart::{self, ChartGeometry};
use super::colors::BACKGROUND;
use super::layout::{CHART_SUBTITLE, CHART_TITLE};
use super::panels;
use crate::battery::BatteryReading;
use crate::clock::ClockState;
use crate::sampling::DisplayMode;
use crate::telemetry::{StatsSnapshot, TelemetryWindow};

/// Read-only view of everything one frame shows
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub window: &'a TelemetryWindow,
    pub stats: &'a StatsSnapshot,
    pub clock: &'a ClockState,
    pub mode: DisplayMode,
    pub battery: BatteryReading,
    pub fps: u32,
}

/// Clear `target` and draw the whole dashboard in fixed z-order.
///
/// Nothing here talks to the panel; with a
/// [`FrameBuffer`](crate::framebuffer::FrameBuffer) as target the result
/// becomes visible only when the buffer is presented.
pub fn render_frame<D: DrawTarget<Color = Rgb565>>(
    view: &FrameView<'_>,
    target: &mut D,
) -> Result<(), D::Error> {
    let geometry = ChartGeometry::DASHBOARD;

    target.clear(BACKGROUND)?;

    panels::draw_backgrounds(target)?;
    panels::draw_clock(view.clock, target)?;
    panels::draw_frame_rate(view.fps, target)?;
    panels::draw_statistics(view.stats, target)?;

    chart::draw_titles(CHART_TITLE, CHART_SUBTITLE, target)?;
    chart::draw_grid(&geometry, target)?;
    chart::draw_axes(&geometry, target)?;
    chart::draw_series(&geometry, view.window, target)?;

    panels::draw_auxiliary_info(view.battery, view.mode, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::ui::colors::{PANEL_BLUE, SERIES_RED, WHITE};
    use crate::ui::layout::{CHART_X_PX, DATE_BOX};

    fn render(window: &TelemetryWindow) -> FrameBuffer {
        let stats = StatsSnapshot::default();
        let clock = ClockState::default();
        let view = FrameView {
            window,
            stats: &stats,
            clock: &clock,
            mode: DisplayMode::Simulated,
            battery: BatteryReading::default(),
            fps: 0,
        };
        let mut frame = FrameBuffer::new();
        render_frame(&view, &mut frame).unwrap();
        frame
    }

    #[test]
    fn test_series_is_drawn_over_grid_and_axes() {
        // A flat trace on the baseline covers the white X axis
        let window = TelemetryWindow::filled(0);
        let frame = render(&window);
        let g = ChartGeometry::DASHBOARD;
        assert_eq!(frame.pixel(CHART_X_PX + 20, g.y_for_value(0)), Some(SERIES_RED));
        // The lifted stroke sits just above it
        assert_eq!(frame.pixel(CHART_X_PX + 20, g.y_for_value(0) - 1), Some(SERIES_RED));
    }

    #[test]
    fn test_frame_is_fully_repainted() {
        let window = TelemetryWindow::default();
        let mut frame = render(&window);

        // Stray pixel from an older frame is cleared by the next render
        frame.draw_iter([Pixel(Point::new(300, 160), WHITE)]).unwrap();
        let stats = StatsSnapshot::default();
        let clock = ClockState::default();
        let view = FrameView {
            window: &window,
            stats: &stats,
            clock: &clock,
            mode: DisplayMode::Sensor,
            battery: BatteryReading::default(),
            fps: 42,
        };
        render_frame(&view, &mut frame).unwrap();
        assert_eq!(frame.pixel(300, 160), Some(BACKGROUND));
        let date_margin = DATE_BOX.bounds.top_left + Point::new(3, 6);
        assert_eq!(frame.pixel(date_margin.x, date_margin.y), Some(PANEL_BLUE));
    }
}
