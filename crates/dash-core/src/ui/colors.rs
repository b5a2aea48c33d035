//! Dashboard palette
//!
//! RGB565 format: R(5 bits), G(6 bits), B(5 bits).
//! The panel colors are given as their raw 16-bit values in the comments.

use embedded_graphics::pixelcolor::Rgb565;

/// Grid lines (0x6B6D)
pub const GRID_GRAY: Rgb565 = Rgb565::new(13, 27, 13);

/// Time and date panels (0x0967)
pub const PANEL_BLUE: Rgb565 = Rgb565::new(1, 11, 7);

/// Statistics panel (0x604D)
pub const PANEL_PURPLE: Rgb565 = Rgb565::new(12, 2, 13);

/// Frame-rate panel (0x1AE9)
pub const PANEL_GREEN: Rgb565 = Rgb565::new(3, 23, 9);

/// Secondary text such as min/max timestamps (0xC618)
pub const SILVER: Rgb565 = Rgb565::new(24, 48, 24);

pub const BACKGROUND: Rgb565 = Rgb565::new(0, 0, 0);
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);
pub const TITLE_YELLOW: Rgb565 = Rgb565::new(31, 63, 0);
pub const SERIES_RED: Rgb565 = Rgb565::new(31, 0, 0);

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::raw::{RawData, RawU16};

    fn raw(color: Rgb565) -> u16 {
        RawU16::from(color).into_inner()
    }

    #[test]
    fn test_palette_matches_raw_values() {
        assert_eq!(raw(GRID_GRAY), 0x6B6D);
        assert_eq!(raw(PANEL_BLUE), 0x0967);
        assert_eq!(raw(PANEL_PURPLE), 0x604D);
        assert_eq!(raw(PANEL_GREEN), 0x1AE9);
        assert_eq!(raw(SILVER), 0xC618);
        assert_eq!(raw(TITLE_YELLOW), 0xFFE0);
    }
}
