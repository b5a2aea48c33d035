//! Chart of the rolling window
//!
//! Window index `i` maps to `x = X0 + i * step`, so the whole window always
//! spans the same width. A value `v` maps to
//! `y = Y0 - linear_scale(v, 0, VALUE_CAP, 0, height)`: 0 sits on the
//! baseline and `VALUE_CAP` on the top edge.

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_7X13};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Alignment;
use heapless::String;

use super::colors::{BACKGROUND, GRID_GRAY, SERIES_RED, TITLE_YELLOW, WHITE};
use super::draw_label;
use super::layout::{
    CHART_HEIGHT_PX, CHART_STEP_PX, CHART_SUBTITLE_TEXT, CHART_TITLE_TEXT, CHART_WIDTH_PX,
    CHART_X_PX, CHART_Y_PX,
    HORIZONTAL_GRID_DIVISIONS, HORIZONTAL_GRID_LABEL_STEP, HORIZONTAL_LABEL_GAP_PX,
    VERTICAL_GRID_COUNT, VERTICAL_GRID_FIRST_LABEL, VERTICAL_GRID_LABEL_STEP,
    VERTICAL_GRID_SPACING_PX, VERTICAL_LABEL_OFFSET_PX,
};
use crate::telemetry::{RollingWindow, Sample, VALUE_CAP};

/// Maximum length of a formatted grid label
const MAX_GRID_LABEL_LENGTH: usize = 4;

/// Integer linear interpolation of `value` from `in_min..=in_max` onto
/// `out_min..=out_max`, truncating toward zero.
///
/// An empty input range maps everything to `out_min`.
pub const fn linear_scale(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    let scaled = (value as i64 - in_min as i64) * (out_max as i64 - out_min as i64)
        / (in_max as i64 - in_min as i64);
    (scaled + out_min as i64) as i32
}

/// Placement of the chart on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartGeometry {
    /// Pixel of window index 0 at value 0
    pub origin: Point,
    pub step_px: i32,
    pub height_px: i32,
}

impl ChartGeometry {
    /// The dashboard's chart
    pub const DASHBOARD: Self = Self {
        origin: Point::new(CHART_X_PX, CHART_Y_PX),
        step_px: CHART_STEP_PX,
        height_px: CHART_HEIGHT_PX,
    };

    pub const fn x_for_index(&self, index: usize) -> i32 {
        self.origin.x + index as i32 * self.step_px
    }

    pub fn y_for_value(&self, value: Sample) -> i32 {
        debug_assert!(value <= VALUE_CAP, "sample {value} above cap reached the renderer");
        self.origin.y - linear_scale(value as i32, 0, VALUE_CAP as i32, 0, self.height_px)
    }

    pub fn point(&self, index: usize, value: Sample) -> Point {
        Point::new(self.x_for_index(index), self.y_for_value(value))
    }

    /// Y coordinate of the top edge
    pub const fn top(&self) -> i32 {
        self.origin.y - self.height_px
    }
}

pub type GridLabel = String<MAX_GRID_LABEL_LENGTH>;

/// Label under vertical grid line `i`, counting down from the Y axis.
pub fn vertical_tick_label(i: i32) -> GridLabel {
    let mut label = GridLabel::new();
    let _ = write!(
        label,
        "{:02}",
        VERTICAL_GRID_FIRST_LABEL - i * VERTICAL_GRID_LABEL_STEP
    );
    label
}

/// Value label of horizontal grid line `i`, 0 being the baseline.
pub fn horizontal_tick_label(i: i32) -> GridLabel {
    let mut label = GridLabel::new();
    let _ = write!(label, "{}", i * HORIZONTAL_GRID_LABEL_STEP);
    label
}

/// Title and source subtitle above the chart
pub fn draw_titles<D: DrawTarget<Color = Rgb565>>(
    title: &str,
    subtitle: &str,
    target: &mut D,
) -> Result<(), D::Error> {
    draw_label(
        target,
        title,
        CHART_TITLE_TEXT,
        &FONT_7X13,
        TITLE_YELLOW,
        Some(BACKGROUND),
        Alignment::Left,
    )?;
    draw_label(
        target,
        subtitle,
        CHART_SUBTITLE_TEXT,
        &FONT_6X10,
        TITLE_YELLOW,
        Some(BACKGROUND),
        Alignment::Left,
    )
}

/// Grid lines with their tick labels.
///
/// Vertical lines are labelled with descending ticks below the baseline;
/// horizontal lines with ascending values left of the Y axis. The baseline
/// itself is left to [`draw_axes`].
pub fn draw_grid<D: DrawTarget<Color = Rgb565>>(
    geometry: &ChartGeometry,
    target: &mut D,
) -> Result<(), D::Error> {
    let grid_style = PrimitiveStyle::with_stroke(GRID_GRAY, 1);
    let base = geometry.origin;

    for i in 0..VERTICAL_GRID_COUNT {
        let x = base.x + i * VERTICAL_GRID_SPACING_PX;
        Line::new(Point::new(x, base.y), Point::new(x, geometry.top()))
            .into_styled(grid_style)
            .draw(target)?;

        draw_label(
            target,
            &vertical_tick_label(i),
            Point::new(x, base.y + VERTICAL_LABEL_OFFSET_PX),
            &FONT_6X10,
            WHITE,
            None,
            Alignment::Center,
        )?;
    }

    let row_spacing = geometry.height_px / HORIZONTAL_GRID_DIVISIONS;
    for i in 0..=HORIZONTAL_GRID_DIVISIONS {
        let y = base.y - i * row_spacing;
        draw_label(
            target,
            &horizontal_tick_label(i),
            Point::new(base.x - HORIZONTAL_LABEL_GAP_PX, y),
            &FONT_6X10,
            WHITE,
            None,
            Alignment::Right,
        )?;

        if i > 0 {
            Line::new(Point::new(base.x, y), Point::new(base.x + CHART_WIDTH_PX, y))
                .into_styled(grid_style)
                .draw(target)?;
        }
    }

    Ok(())
}

/// X axis along the baseline and Y axis up the left edge
pub fn draw_axes<D: DrawTarget<Color = Rgb565>>(
    geometry: &ChartGeometry,
    target: &mut D,
) -> Result<(), D::Error> {
    let axis_style = PrimitiveStyle::with_stroke(WHITE, 1);
    let base = geometry.origin;

    Line::new(base, Point::new(base.x + CHART_WIDTH_PX, base.y))
        .into_styled(axis_style)
        .draw(target)?;
    Line::new(base, Point::new(base.x, geometry.top()))
        .into_styled(axis_style)
        .draw(target)?;
    Ok(())
}

/// Polyline through the window, oldest on the left.
///
/// Each segment is drawn twice, the second one pixel higher, for a thicker
/// stroke without wide-line rasterization.
pub fn draw_series<const N: usize, D: DrawTarget<Color = Rgb565>>(
    geometry: &ChartGeometry,
    window: &RollingWindow<N>,
    target: &mut D,
) -> Result<(), D::Error> {
    let line_style = PrimitiveStyle::with_stroke(SERIES_RED, 1);
    let lift = Point::new(0, -1);

    let mut prev: Option<Point> = None;
    for (i, value) in window.iter().enumerate() {
        let point = geometry.point(i, value);
        if let Some(prev) = prev {
            Line::new(prev, point).into_styled(line_style).draw(target)?;
            Line::new(prev + lift, point + lift)
                .into_styled(line_style)
                .draw(target)?;
        }
        prev = Some(point);
    }

    Ok(())
}
