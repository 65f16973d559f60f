//! Window-independent core of the font picker
//!
//! [`PickerModel`] owns the state snapshot and the active font manager. Its
//! operations return the event (if any) the view has to emit, which keeps the
//! GPUI entity in `font_picker` a thin shell.

use crate::error::FontPickerResult;
use crate::font::Font;
use crate::font_manager::{FallbackFontManager, FontManager};
use crate::state::{
    self, active_font_changed, loading_finished, FilterKey, FilterOutcome, LoadingStatus,
    PickerState, StatePatch,
};

/// Rows requested beyond the last visible one
pub const PREVIEW_LOOKAHEAD: usize = 5;

/// Height of one row in the font list, in pixels
pub const ROW_HEIGHT: f32 = 35.0;

/// Height of the open font list, in pixels
pub const MENU_MAX_HEIGHT: f32 = 200.0;

/// Events emitted by the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontPickerEvent {
    /// The user picked a font (or the fallback list chose its default)
    Change(Font),
}

/// What a key press did to the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    /// Not a filter key; the event should keep propagating
    Ignored,
    /// The filter or expanded flag changed
    Handled,
    /// Enter picked a font
    Selected(FontPickerEvent),
}

impl KeyResult {
    pub fn is_consumed(&self) -> bool {
        !matches!(self, KeyResult::Ignored)
    }
}

/// Scroll position of the font list, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Height of the whole scrollable content
    pub scroll_height: f32,
    /// Height of the visible viewport
    pub client_height: f32,
    /// Distance scrolled from the top
    pub scroll_top: f32,
}

/// Number of list rows whose previews should be available
///
/// Every row that is at least partially visible, plus [`PREVIEW_LOOKAHEAD`].
pub fn preview_count(metrics: ScrollMetrics, font_count: usize) -> usize {
    if font_count == 0 || metrics.scroll_height <= 0.0 {
        return PREVIEW_LOOKAHEAD;
    }
    let row_height = metrics.scroll_height / font_count as f32;
    let visible = ((metrics.scroll_top + metrics.client_height) / row_height).ceil();
    visible.max(0.0) as usize + PREVIEW_LOOKAHEAD
}

pub struct PickerModel {
    state: PickerState,
    manager: Option<Box<dyn FontManager>>,
}

impl PickerModel {
    pub fn new(active_font: impl Into<String>) -> Self {
        Self {
            state: PickerState::new(active_font),
            manager: None,
        }
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    /// `None` while the real manager is still initialising
    pub fn manager_mut(&mut self) -> Option<&mut (dyn FontManager + 'static)> {
        self.manager.as_deref_mut()
    }

    /// The full font list of the active manager (empty while loading)
    pub fn fonts(&self) -> &[Font] {
        self.manager.as_ref().map(|m| m.fonts()).unwrap_or(&[])
    }

    /// The list as currently displayed
    pub fn filtered_fonts(&self) -> Vec<Font> {
        self.state
            .filtered(self.fonts())
            .into_iter()
            .cloned()
            .collect()
    }

    fn set_state(&mut self, patch: StatePatch) {
        self.state = self.state.apply(patch);
    }

    pub fn toggle_expanded(&mut self) {
        let patch = state::toggle_expanded(&self.state);
        self.set_state(patch);
    }

    /// Close the list if it is open; used for clicks outside the picker
    pub fn close(&mut self) -> bool {
        if !self.state.expanded {
            return false;
        }
        self.toggle_expanded();
        true
    }

    pub fn update_filter(&mut self, key: FilterKey) -> KeyResult {
        match state::update_filter(&self.state, key, self.fonts()) {
            FilterOutcome::Update(patch) => {
                self.set_state(patch);
                KeyResult::Handled
            }
            FilterOutcome::Select(font) => KeyResult::Selected(self.item_click(font)),
            FilterOutcome::Ignore => KeyResult::Ignored,
        }
    }

    /// Collapse and report the chosen font
    ///
    /// The active font itself only changes once the embedding application
    /// feeds the choice back through [`PickerModel::set_active_font`].
    pub fn item_click(&mut self, font: Font) -> FontPickerEvent {
        self.set_state(state::collapse());
        FontPickerEvent::Change(font)
    }

    /// Apply an `active_font` value pushed in by the embedding application
    ///
    /// Returns false when the value equals what the picker already shows.
    pub fn set_active_font(&mut self, family: &str) -> bool {
        if self.state.active_font == family {
            return false;
        }

        let Some(manager) = self.manager.as_mut() else {
            // Still loading; the manager catches up once the list arrives.
            self.set_state(StatePatch {
                active_font: Some(family.to_string()),
                ..Default::default()
            });
            return true;
        };

        let result = manager.set_active_font(family);
        self.set_state(active_font_changed(family, &result));
        true
    }

    /// Install the result of manager initialisation
    ///
    /// On failure the fallback manager takes over and its first font is
    /// reported as the selection.
    pub fn settle_init(
        &mut self,
        mut manager: Box<dyn FontManager>,
        result: FontPickerResult<()>,
    ) -> Option<FontPickerEvent> {
        let event = match result {
            Ok(()) => {
                let wanted = self.state.active_font.clone();
                let already_active = manager
                    .active_font()
                    .is_some_and(|font| font.family == wanted);
                if !already_active && manager.fonts().iter().any(|f| f.family == wanted) {
                    manager.set_active_font(&wanted).ok();
                }
                None
            }
            Err(err) => {
                log::error!("{}; using fallback fonts", err);
                manager = Box::new(FallbackFontManager::new());
                manager.fonts().first().cloned().map(FontPickerEvent::Change)
            }
        };

        self.manager = Some(manager);
        self.set_state(loading_finished());
        event
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading_status == LoadingStatus::Loading
    }

    /// Preview count for the list's current scroll position
    pub fn preview_count(&self, metrics: ScrollMetrics) -> usize {
        preview_count(metrics, self.fonts().len())
    }

    /// Preview count for a freshly opened, unscrolled list
    pub fn initial_preview_count(&self) -> usize {
        let count = self.fonts().len();
        self.preview_count(ScrollMetrics {
            scroll_height: ROW_HEIGHT * count as f32,
            client_height: MENU_MAX_HEIGHT,
            scroll_top: 0.0,
        })
    }
}
