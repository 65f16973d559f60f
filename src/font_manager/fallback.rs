//! Fallback font manager
//!
//! Used when the font service can't be reached. Lists fonts that ship with
//! practically every desktop OS, so nothing needs to be downloaded.

use super::{position_of, FontManager};
use crate::error::{FontPickerError, FontPickerResult};
use crate::font::Font;
use gpui::App;

/// Families available without any download, in list order
pub const FALLBACK_FAMILIES: [&str; 11] = [
    "Arial",
    "Comic Sans MS",
    "Courier New",
    "Geneva",
    "Georgia",
    "Helvetica",
    "Impact",
    "Lucida Console",
    "Tahoma",
    "Times New Roman",
    "Verdana",
];

pub struct FallbackFontManager {
    fonts: Vec<Font>,
    active: Option<usize>,
}

impl FallbackFontManager {
    pub fn new() -> Self {
        Self {
            fonts: FALLBACK_FAMILIES.iter().copied().map(Font::new).collect(),
            active: None,
        }
    }
}

impl Default for FallbackFontManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FontManager for FallbackFontManager {
    fn init(&mut self) -> FontPickerResult<()> {
        Ok(())
    }

    fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    fn active_font(&self) -> Option<&Font> {
        self.active.and_then(|idx| self.fonts.get(idx))
    }

    fn set_active_font(&mut self, family: &str) -> FontPickerResult<usize> {
        match position_of(&self.fonts, family) {
            Some(idx) => {
                self.active = Some(idx);
                Ok(idx)
            }
            None => {
                let err = FontPickerError::font_not_in_list(family);
                log::error!("{}", err);
                Err(err)
            }
        }
    }

    fn download_previews(&mut self, _count: usize, _cx: &mut App) {
        // System fonts, nothing to fetch.
    }
}
