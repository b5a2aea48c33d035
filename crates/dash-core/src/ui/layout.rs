//! Pixel layout of the 320x170 dashboard
//!
//! Left column: time, date, frame-rate and statistics panels.
//! Right side: titled chart of the rolling window plus auxiliary info.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::telemetry::{VALUE_CAP, WINDOW_LEN};

/// A filled rounded panel
#[derive(Debug, Clone, Copy)]
pub struct PanelBox {
    pub bounds: Rectangle,
    pub corner_radius: u32,
}

impl PanelBox {
    const fn new(x: i32, y: i32, width: u32, height: u32, corner_radius: u32) -> Self {
        Self {
            bounds: Rectangle::new(Point::new(x, y), Size::new(width, height)),
            corner_radius,
        }
    }
}

// ============================================================================
// Left column panels
// ============================================================================

pub const HOUR_BOX: PanelBox = PanelBox::new(6, 5, 38, 32, 4);
pub const MINUTE_BOX: PanelBox = PanelBox::new(48, 5, 38, 32, 4);
pub const SECONDS_BOX: PanelBox = PanelBox::new(90, 7, 20, 18, 2);
pub const DATE_BOX: PanelBox = PanelBox::new(6, 42, 80, 13, 2);
pub const FPS_BOX: PanelBox = PanelBox::new(6, 60, 80, 18, 2);
pub const STATS_BOX: PanelBox = PanelBox::new(6, 82, 80, 78, 4);

/// Text anchors (left edge, vertical centre)
pub const HOUR_TEXT: Point = Point::new(10, 21);
pub const MINUTE_TEXT: Point = Point::new(52, 21);
pub const SECONDS_TEXT: Point = Point::new(93, 16);
pub const DATE_TEXT: Point = Point::new(15, 48);
pub const FPS_TEXT: Point = Point::new(25, 69);
pub const AVERAGE_TEXT: Point = Point::new(12, 92);
pub const MIN_TEXT: Point = Point::new(12, 108);
pub const MIN_STAMP_TEXT: Point = Point::new(12, 122);
pub const MAX_TEXT: Point = Point::new(12, 138);
pub const MAX_STAMP_TEXT: Point = Point::new(12, 152);

// ============================================================================
// Chart
// ============================================================================

/// Left edge of the chart (x of window index 0)
pub const CHART_X_PX: i32 = 110;

/// Baseline of the chart (y of value 0)
pub const CHART_Y_PX: i32 = 144;

/// Height spanned by `0..=VALUE_CAP`
pub const CHART_HEIGHT_PX: i32 = 104;

/// Horizontal distance between consecutive samples
pub const CHART_STEP_PX: i32 = 9;

/// Width spanned by the full window
pub const CHART_WIDTH_PX: i32 = CHART_STEP_PX * (WINDOW_LEN as i32 - 1);

/// Spacing of the vertical grid lines
pub const VERTICAL_GRID_SPACING_PX: i32 = 40;

/// Number of vertical grid lines, including the one on the Y axis
pub const VERTICAL_GRID_COUNT: i32 = 6;

/// Label of the leftmost vertical grid line; each line to the right is lower
pub const VERTICAL_GRID_FIRST_LABEL: i32 = 20;

/// Label decrement between vertical grid lines
pub const VERTICAL_GRID_LABEL_STEP: i32 = 4;

/// Number of horizontal divisions between baseline and top
pub const HORIZONTAL_GRID_DIVISIONS: i32 = 5;

/// Value increment between horizontal grid lines
pub const HORIZONTAL_GRID_LABEL_STEP: i32 = VALUE_CAP as i32 / HORIZONTAL_GRID_DIVISIONS;

/// Vertical offset of the vertical-grid labels below the baseline
pub const VERTICAL_LABEL_OFFSET_PX: i32 = 8;

/// Gap between the Y axis and the right edge of its labels
pub const HORIZONTAL_LABEL_GAP_PX: i32 = 4;

pub const CHART_TITLE_TEXT: Point = Point::new(CHART_X_PX + 10, 16);
pub const CHART_SUBTITLE_TEXT: Point = Point::new(CHART_X_PX + 10, 30);
pub const CHART_TITLE: &str = "ANALOG READINGS";
pub const CHART_SUBTITLE: &str = "ADC1_CH0 (GPIO01)";

// ============================================================================
// Auxiliary info
// ============================================================================

pub const BATTERY_TEXT: Point = Point::new(CHART_X_PX + 148, 16);
pub const MODE_TEXT: Point = Point::new(CHART_X_PX + 148, 27);
