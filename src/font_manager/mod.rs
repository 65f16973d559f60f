//! Font managers
//!
//! The picker never talks to a font source directly. It holds a
//! `Box<dyn FontManager>` and swaps it for [`FallbackFontManager`] when the
//! real one fails to initialise.

mod fallback;
mod google;

pub use fallback::{FallbackFontManager, FALLBACK_FAMILIES};
pub use google::{select_fonts, GoogleFontsManager, WebFont, WebFontList};

use crate::error::FontPickerResult;
use crate::font::Font;
use gpui::App;

/// Something that can list fonts, track the active one and fetch previews
pub trait FontManager: Send + 'static {
    /// Load the font list. Blocking; the picker runs it on the background executor.
    fn init(&mut self) -> FontPickerResult<()>;

    /// The font list in display order
    fn fonts(&self) -> &[Font];

    /// The currently active font, if one has been selected
    fn active_font(&self) -> Option<&Font>;

    /// Make `family` the active font and return its list index
    ///
    /// Unknown families leave the active font untouched.
    fn set_active_font(&mut self, family: &str) -> FontPickerResult<usize>;

    /// Make sure the first `count` fonts of the list can render in their own typeface
    fn download_previews(&mut self, count: usize, cx: &mut App);
}

/// Linear search by exact family name
pub(crate) fn position_of(fonts: &[Font], family: &str) -> Option<usize> {
    fonts.iter().position(|font| font.family == family)
}
