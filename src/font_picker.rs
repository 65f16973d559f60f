//! Font picker dropdown
//!
//! A dropdown listing font families, each drawn in its own typeface. Typing
//! while the button has focus filters the list, Enter picks the first match
//! and Escape closes it.

use crate::error::FontPickerResult;
use crate::font::{font_row_id, picker_root_id, Font};
use crate::font_manager::{FontManager, GoogleFontsManager};
use crate::model::{
    FontPickerEvent, KeyResult, PickerModel, ScrollMetrics, MENU_MAX_HEIGHT, ROW_HEIGHT,
};
use crate::options::PickerOptions;
use crate::state::{FilterKey, LoadingStatus, PickerState};
use crate::theme::{PickerSize, PickerTheme};
use gpui::{
    canvas, div, prelude::*, px, App, Bounds, Context, DispatchPhase, EventEmitter, FocusHandle,
    Focusable, IntoElement, KeyDownEvent, MouseButton, MouseDownEvent, Pixels, Point, Render,
    ScrollHandle, ScrollWheelEvent, SharedString, Window,
};

/// Screen areas that belong to the picker: its root and, while open, its list
///
/// The list hangs below the root, so the root's bounds alone don't cover it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HitRegions {
    pub root: Option<Bounds<Pixels>>,
    pub menu: Option<Bounds<Pixels>>,
}

impl HitRegions {
    pub fn contains(&self, position: Point<Pixels>) -> bool {
        [self.root, self.menu]
            .iter()
            .flatten()
            .any(|bounds| bounds.contains(&position))
    }
}

pub struct FontPicker {
    model: PickerModel,
    suffix: String,
    focus_handle: FocusHandle,
    scroll_handle: ScrollHandle,
    hit_regions: HitRegions,
}

impl FontPicker {
    /// Create a picker backed by Google Fonts
    pub fn new(
        api_key: impl Into<String>,
        active_font: impl Into<String>,
        options: PickerOptions,
        cx: &mut Context<Self>,
    ) -> Self {
        let active_font = active_font.into();
        let manager = GoogleFontsManager::new(api_key, active_font.clone(), options.clone());
        Self::with_manager(Box::new(manager), active_font, &options, cx)
    }

    /// Create a picker around any font manager; initialisation starts right away
    pub fn with_manager(
        manager: Box<dyn FontManager>,
        active_font: impl Into<String>,
        options: &PickerOptions,
        cx: &mut Context<Self>,
    ) -> Self {
        Self::init_manager(manager, cx);

        Self {
            model: PickerModel::new(active_font),
            suffix: options.suffix(),
            focus_handle: cx.focus_handle(),
            scroll_handle: ScrollHandle::new(),
            hit_regions: HitRegions::default(),
        }
    }

    /// Run `init` on a background thread and hand the manager back to the picker
    ///
    /// Only a weak handle is held, so a picker dropped in the meantime just
    /// ignores the result.
    fn init_manager(manager: Box<dyn FontManager>, cx: &mut Context<Self>) {
        cx.spawn(async move |this, cx| {
            let (manager, result) = cx
                .background_executor()
                .spawn(async move {
                    let mut manager = manager;
                    let result = manager.init();
                    (manager, result)
                })
                .await;

            this.update(cx, |this, cx| this.on_init_settled(manager, result, cx))
                .ok();
        })
        .detach();
    }

    fn on_init_settled(
        &mut self,
        manager: Box<dyn FontManager>,
        result: FontPickerResult<()>,
        cx: &mut Context<Self>,
    ) {
        if let Some(event) = self.model.settle_init(manager, result) {
            cx.emit(event);
        }

        let count = self.model.initial_preview_count();
        if let Some(manager) = self.model.manager_mut() {
            manager.download_previews(count, cx);
        }
        cx.notify();
    }

    pub fn state(&self) -> &PickerState {
        self.model.state()
    }

    /// Full font list of the active manager
    pub fn fonts(&self) -> &[Font] {
        self.model.fonts()
    }

    /// Id suffix shared by all elements of this picker
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Push a new active font in from the embedding application
    ///
    /// Does not emit [`FontPickerEvent::Change`].
    pub fn set_active_font(&mut self, family: &str, cx: &mut Context<Self>) {
        if !self.model.set_active_font(family) {
            return;
        }
        if let Some(manager) = self.model.manager_mut() {
            // Only the active font is pending when the batch is empty
            manager.download_previews(0, cx);
        }
        cx.notify();
    }

    pub fn toggle_expanded(&mut self, cx: &mut Context<Self>) {
        self.model.toggle_expanded();
        cx.notify();
    }

    fn item_click(&mut self, font: Font, cx: &mut Context<Self>) {
        let event = self.model.item_click(font);
        cx.emit(event);
        cx.notify();
    }

    fn on_key_down(&mut self, event: &KeyDownEvent, _: &mut Window, cx: &mut Context<Self>) {
        let modifiers = &event.keystroke.modifiers;
        if modifiers.control || modifiers.platform || modifiers.alt {
            return;
        }

        let key = FilterKey::from_key(&event.keystroke.key);
        let result = self.model.update_filter(key);
        if !result.is_consumed() {
            return;
        }
        if let KeyResult::Selected(event) = result {
            cx.emit(event);
        }
        cx.stop_propagation();
        cx.notify();
    }

    fn on_menu_scroll(&mut self, _: &ScrollWheelEvent, _: &mut Window, cx: &mut Context<Self>) {
        let rows = self.model.filtered_fonts().len();
        let viewport = self.scroll_handle.bounds();
        let metrics = ScrollMetrics {
            scroll_height: ROW_HEIGHT * rows as f32,
            client_height: viewport.size.height / px(1.),
            scroll_top: -(self.scroll_handle.offset().y / px(1.)),
        };

        let count = self.model.preview_count(metrics);
        if let Some(manager) = self.model.manager_mut() {
            manager.download_previews(count, cx);
        }
    }

    /// Window-wide mouse-down handler: close when the press lands outside
    fn on_pointer_down(&mut self, position: Point<Pixels>, cx: &mut Context<Self>) {
        if self.hit_regions.contains(position) {
            return;
        }
        if self.model.close() {
            cx.notify();
        }
    }

    fn render_menu(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let active_font = self.model.state().active_font.clone();
        let suffix = self.suffix.clone();
        let picker = cx.entity();

        let list = div()
            .id("font-list")
            .w_full()
            .max_h(px(MENU_MAX_HEIGHT))
            .overflow_y_scroll()
            .track_scroll(&self.scroll_handle)
            .on_scroll_wheel(cx.listener(Self::on_menu_scroll))
            .children(self.model.filtered_fonts().into_iter().map(|font| {
                let is_active = font.family == active_font;
                let row_id = SharedString::from(font_row_id(&font.family, &suffix));
                let family = font.family.clone();

                div()
                    .id(row_id)
                    .h(px(ROW_HEIGHT))
                    .w_full()
                    .flex()
                    .items_center()
                    .px(px(PickerSize::ROW_PADDING))
                    .whitespace_nowrap()
                    .cursor_pointer()
                    .text_color(PickerTheme::text())
                    .font_family(family.clone())
                    .when(is_active, |row| row.bg(PickerTheme::row_active()))
                    .when(!is_active, |row| {
                        row.hover(|style| style.bg(PickerTheme::row_hover()))
                    })
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(move |this, _: &MouseDownEvent, _, cx| {
                            this.item_click(font.clone(), cx);
                        }),
                    )
                    .child(family)
            }));

        // The wrapper doesn't scroll, so its bounds stay on the visible list
        div()
            .absolute()
            .top_full()
            .left(px(0.))
            .w(px(PickerSize::MENU_WIDTH))
            .bg(PickerTheme::list_background())
            .shadow_lg()
            .occlude()
            .child(
                canvas(
                    move |bounds, _, cx| picker.update(cx, |p, _| p.hit_regions.menu = Some(bounds)),
                    |_, _, _, _| {},
                )
                .absolute()
                .size_full(),
            )
            .child(list)
    }
}

impl EventEmitter<FontPickerEvent> for FontPicker {}

impl Focusable for FontPicker {
    fn focus_handle(&self, _: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for FontPicker {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let state = self.model.state().clone();
        let show_menu = state.list_visible();
        if !show_menu {
            self.hit_regions.menu = None;
        }

        let icon = match state.loading_status {
            LoadingStatus::Loading => "◌",
            LoadingStatus::Finished if state.expanded => "▲",
            LoadingStatus::Finished => "▼",
            LoadingStatus::Error => "⚠",
        };
        let picker = cx.entity();

        div()
            .id(SharedString::from(picker_root_id(&self.suffix)))
            .relative()
            .w_full()
            .key_context("FontPicker")
            .track_focus(&self.focus_handle)
            .on_key_down(cx.listener(Self::on_key_down))
            .child(
                // Root bounds, plus the outside-click listener for this frame
                canvas(
                    {
                        let picker = picker.clone();
                        move |bounds, _, cx| {
                            picker.update(cx, |p, _| p.hit_regions.root = Some(bounds))
                        }
                    },
                    move |_, _, window, _| {
                        window.on_mouse_event(
                            move |event: &MouseDownEvent, phase, _window, cx| {
                                if phase != DispatchPhase::Capture {
                                    return;
                                }
                                picker.update(cx, |p, cx| p.on_pointer_down(event.position, cx));
                            },
                        );
                    },
                )
                .absolute()
                .size_full(),
            )
            .child(
                div()
                    .id("dropdown-button")
                    .flex()
                    .items_center()
                    .justify_between()
                    .h(px(PickerSize::BUTTON_HEIGHT))
                    .px_1()
                    .bg(if state.expanded {
                        PickerTheme::button_active()
                    } else {
                        PickerTheme::background()
                    })
                    .border_1()
                    .border_color(PickerTheme::border())
                    .rounded(px(PickerSize::BORDER_RADIUS))
                    .cursor_pointer()
                    .hover(|style| style.bg(PickerTheme::button_active()))
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(|this, _: &MouseDownEvent, window, cx| {
                            window.focus(&this.focus_handle);
                            this.toggle_expanded(cx);
                        }),
                    )
                    .child(
                        div()
                            .text_xs()
                            .overflow_hidden()
                            .whitespace_nowrap()
                            .text_color(PickerTheme::text())
                            .font_family(state.active_font.clone())
                            .child(state.active_font.clone()),
                    )
                    .child(
                        div()
                            .text_xs()
                            .text_color(match state.loading_status {
                                LoadingStatus::Loading => PickerTheme::text_muted(),
                                LoadingStatus::Finished => PickerTheme::text(),
                                LoadingStatus::Error => PickerTheme::error(),
                            })
                            .child(icon),
                    ),
            )
            .when(state.has_error(), |el| {
                el.child(
                    div()
                        .text_xs()
                        .text_color(PickerTheme::error())
                        .child(state.error_text.clone()),
                )
            })
            .when(show_menu, |el| el.child(self.render_menu(cx)))
    }
}
