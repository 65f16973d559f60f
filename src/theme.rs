//! Colors and sizes for the font picker
//!
//! A light palette that matches the look of a native dropdown: white button,
//! grey list, slightly darker grey for hover and the active row.

use gpui::{rgb, Rgba};

pub struct PickerTheme;

impl PickerTheme {
    // === BUTTON ===

    /// Dropdown button background
    pub fn background() -> Rgba {
        rgb(0xffffff)
    }

    /// Button background while hovered or expanded
    pub fn button_active() -> Rgba {
        rgb(0xbebebe)
    }

    pub fn border() -> Rgba {
        rgb(0xbdc1cb)
    }

    // === LIST ===

    pub fn list_background() -> Rgba {
        rgb(0xeaeaea)
    }

    pub fn row_hover() -> Rgba {
        rgb(0xdddddd)
    }

    /// Row of the currently active font
    pub fn row_active() -> Rgba {
        rgb(0xd1d1d1)
    }

    // === TEXT ===

    pub fn text() -> Rgba {
        rgb(0x000000)
    }

    /// Loading spinner and other secondary glyphs
    pub fn text_muted() -> Rgba {
        rgb(0xb2b2b2)
    }

    pub fn error() -> Rgba {
        rgb(0xc62828)
    }
}

/// Fixed dimensions of the picker, in pixels
pub struct PickerSize;

impl PickerSize {
    /// Height of the dropdown button
    pub const BUTTON_HEIGHT: f32 = 20.0;

    /// Width of the open font list
    pub const MENU_WIDTH: f32 = 210.0;

    /// Horizontal padding inside a font row
    pub const ROW_PADDING: f32 = 10.0;

    pub const BORDER_RADIUS: f32 = 2.0;
}
