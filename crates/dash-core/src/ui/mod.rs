//! Render pipeline for the dashboard frame
//!
//! All drawing goes through `DrawTarget<Color = Rgb565>`, normally the
//! off-screen [`FrameBuffer`](crate::framebuffer::FrameBuffer):
//! - [`colors`]: the fixed panel palette
//! - [`layout`]: pixel positions of every panel, label and the chart
//! - [`chart`]: value/index to pixel mapping, grid, axes and the polyline
//! - [`panels`]: clock, frame-rate, statistics and auxiliary info
//! - [`renderer`]: composes a full frame in fixed z-order

pub mod chart;
pub mod colors;
pub mod layout;
pub mod panels;
pub mod renderer;

pub use chart::{ChartGeometry, linear_scale};
pub use renderer::{FrameView, render_frame};

use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

/// Panel width in landscape orientation
pub const DISPLAY_WIDTH_PX: u16 = 320;
/// Panel height in landscape orientation
pub const DISPLAY_HEIGHT_PX: u16 = 170;

/// Draw single-line text vertically centred on `position.y`.
///
/// `background` paints the glyph cells, matching the panel behind the text.
pub(crate) fn draw_label<D: DrawTarget<Color = Rgb565>>(
    target: &mut D,
    text: &str,
    position: Point,
    font: &MonoFont<'_>,
    color: Rgb565,
    background: Option<Rgb565>,
    alignment: Alignment,
) -> Result<(), D::Error> {
    let mut character_style = MonoTextStyleBuilder::new().font(font).text_color(color);
    if let Some(background) = background {
        character_style = character_style.background_color(background);
    }
    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Middle)
        .build();

    Text::with_text_style(text, position, character_style.build(), text_style).draw(target)?;
    Ok(())
}
