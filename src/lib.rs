//! Font picker dropdown for GPUI
//!
//! Lists font families from Google Fonts (or a built-in list of system fonts
//! when the service can't be reached), lets the user filter by typing and
//! reports the chosen font through [`FontPickerEvent::Change`].
//!
//! ```ignore
//! use gpui::{AppContext, Context};
//! use gpui_font_picker::{FontPicker, FontPickerEvent, PickerOptions};
//!
//! # struct Editor;
//! # fn build(cx: &mut Context<Editor>) {
//! let picker = cx.new(|cx| {
//!     FontPicker::new("API_KEY", "Open Sans", PickerOptions::default(), cx)
//! });
//! cx.subscribe(&picker, |_editor, picker, event: &FontPickerEvent, cx| {
//!     let FontPickerEvent::Change(font) = event;
//!     // Feed the choice back so the picker shows it as active
//!     picker.update(cx, |picker, cx| picker.set_active_font(&font.family, cx));
//! })
//! .detach();
//! # }
//! ```

pub mod config;
pub mod error;
pub mod font;
pub mod font_manager;
pub mod font_picker;
pub mod model;
pub mod options;
pub mod state;
pub mod theme;

pub use config::Config;
pub use error::{FontPickerError, FontPickerResult};
pub use font::Font;
pub use font_manager::{FallbackFontManager, FontManager, GoogleFontsManager};
pub use font_picker::FontPicker;
pub use model::{FontPickerEvent, PickerModel, ScrollMetrics};
pub use options::{PickerOptions, SortOrder};
pub use state::{LoadingStatus, PickerState};
