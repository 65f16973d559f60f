//! Picker interaction state
//!
//! [`PickerState`] is an immutable snapshot. Every interaction produces a
//! [`StatePatch`] and the owner swaps in `state.apply(patch)`, so each
//! transition can be tested without a window.

use crate::error::FontPickerResult;
use crate::font::Font;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingStatus {
    #[default]
    Loading,
    Finished,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerState {
    /// Family shown in the dropdown button
    pub active_font: String,
    /// Empty when there is no error
    pub error_text: String,
    pub expanded: bool,
    /// Always lowercase
    pub filter: String,
    pub loading_status: LoadingStatus,
}

/// Partial update; `None` fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePatch {
    pub active_font: Option<String>,
    pub error_text: Option<String>,
    pub expanded: Option<bool>,
    pub filter: Option<String>,
    pub loading_status: Option<LoadingStatus>,
}

impl PickerState {
    pub fn new(active_font: impl Into<String>) -> Self {
        Self {
            active_font: active_font.into(),
            error_text: String::new(),
            expanded: false,
            filter: String::new(),
            loading_status: LoadingStatus::Loading,
        }
    }

    /// Build the next snapshot
    pub fn apply(&self, patch: StatePatch) -> Self {
        Self {
            active_font: patch.active_font.unwrap_or_else(|| self.active_font.clone()),
            error_text: patch.error_text.unwrap_or_else(|| self.error_text.clone()),
            expanded: patch.expanded.unwrap_or(self.expanded),
            filter: patch.filter.unwrap_or_else(|| self.filter.clone()),
            loading_status: patch.loading_status.unwrap_or(self.loading_status),
        }
    }

    /// Fonts whose lowercased family starts with the filter text, in list order
    pub fn filtered<'a>(&self, fonts: &'a [Font]) -> Vec<&'a Font> {
        fonts
            .iter()
            .filter(|font| font.matches_filter(&self.filter))
            .collect()
    }

    pub fn has_error(&self) -> bool {
        self.loading_status == LoadingStatus::Error
    }

    /// The list is drawn only while expanded with a settled, error-free status
    pub fn list_visible(&self) -> bool {
        self.expanded && self.loading_status == LoadingStatus::Finished
    }
}

/// Close the list; closing always resets the filter
pub fn collapse() -> StatePatch {
    StatePatch {
        expanded: Some(false),
        filter: Some(String::new()),
        ..Default::default()
    }
}

/// Flip the expanded flag, resetting the filter only when collapsing
pub fn toggle_expanded(state: &PickerState) -> StatePatch {
    if state.expanded {
        collapse()
    } else {
        StatePatch {
            expanded: Some(true),
            ..Default::default()
        }
    }
}

/// A key press as far as the filter is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Escape,
    Backspace,
    Enter,
    Char(char),
    Other,
}

impl FilterKey {
    /// Map a GPUI key name (`"escape"`, `"a"`, ...) to a filter key
    pub fn from_key(key: &str) -> Self {
        match key {
            "escape" => FilterKey::Escape,
            "backspace" => FilterKey::Backspace,
            "enter" => FilterKey::Enter,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => FilterKey::Char(c),
                    _ => FilterKey::Other,
                }
            }
        }
    }
}

/// What a key press asks the picker to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    Update(StatePatch),
    /// Select this font exactly as a click on its row would
    Select(Font),
    Ignore,
}

/// Handle one key press against the current state and font list
///
/// Escape closes, Backspace drops a character, Enter picks the first filtered
/// font and ASCII letters extend the filter. Everything else is ignored.
pub fn update_filter(state: &PickerState, key: FilterKey, fonts: &[Font]) -> FilterOutcome {
    match key {
        FilterKey::Escape => FilterOutcome::Update(collapse()),
        FilterKey::Backspace => {
            let mut filter = state.filter.clone();
            filter.pop();
            FilterOutcome::Update(StatePatch {
                filter: Some(filter),
                ..Default::default()
            })
        }
        FilterKey::Enter => match state.filtered(fonts).first() {
            Some(font) => FilterOutcome::Select((*font).clone()),
            None => FilterOutcome::Ignore,
        },
        FilterKey::Char(c) if c.is_ascii_alphabetic() => {
            let mut filter = state.filter.clone();
            filter.push(c.to_ascii_lowercase());
            FilterOutcome::Update(StatePatch {
                filter: Some(filter),
                ..Default::default()
            })
        }
        FilterKey::Char(_) | FilterKey::Other => FilterOutcome::Ignore,
    }
}

/// State after asking the manager to activate `family`
///
/// The requested name is stored even when the manager rejected it.
pub fn active_font_changed(family: &str, result: &FontPickerResult<usize>) -> StatePatch {
    let (error_text, loading_status) = match result {
        Ok(_) => (String::new(), LoadingStatus::Finished),
        Err(err) => (err.to_string(), LoadingStatus::Error),
    };
    StatePatch {
        active_font: Some(family.to_string()),
        error_text: Some(error_text),
        loading_status: Some(loading_status),
        ..Default::default()
    }
}

/// State once the font list is ready (from either manager)
pub fn loading_finished() -> StatePatch {
    StatePatch {
        error_text: Some(String::new()),
        loading_status: Some(LoadingStatus::Finished),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FontPickerError;

    fn fonts(names: &[&str]) -> Vec<Font> {
        names.iter().copied().map(Font::new).collect()
    }

    fn with(state: &PickerState, patch: StatePatch) -> PickerState {
        state.apply(patch)
    }

    #[test]
    fn test_new_state_is_loading() {
        let state = PickerState::new("Open Sans");
        assert_eq!(state.loading_status, LoadingStatus::Loading);
        assert!(!state.expanded);
        assert!(state.filter.is_empty());
        assert!(state.error_text.is_empty());
    }

    #[test]
    fn test_apply_keeps_untouched_fields() {
        let state = PickerState::new("Arial");
        let next = state.apply(StatePatch {
            filter: Some("ar".to_string()),
            ..Default::default()
        });
        assert_eq!(next.filter, "ar");
        assert_eq!(next.active_font, "Arial");
        assert_eq!(state.filter, "", "snapshots are never mutated");
    }

    #[test]
    fn test_filter_is_case_insensitive_prefix() {
        let list = fonts(&["Arial", "Tahoma", "Times New Roman"]);
        let state = PickerState {
            filter: "ta".to_string(),
            ..PickerState::new("Arial")
        };
        let visible: Vec<&str> = state
            .filtered(&list)
            .iter()
            .map(|f| f.family.as_str())
            .collect();
        assert_eq!(visible, vec!["Tahoma"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_toggle_resets_filter_only_on_collapse() {
        let expanded = PickerState {
            expanded: true,
            filter: "ge".to_string(),
            ..PickerState::new("Arial")
        };
        let collapsed = with(&expanded, toggle_expanded(&expanded));
        assert!(!collapsed.expanded);
        assert_eq!(collapsed.filter, "");

        let reopened = with(&collapsed, toggle_expanded(&collapsed));
        assert!(reopened.expanded);
        assert_eq!(reopened.filter, "");

        let typed = PickerState {
            filter: "x".to_string(),
            ..PickerState::new("Arial")
        };
        let opened = with(&typed, toggle_expanded(&typed));
        assert!(opened.expanded);
        assert_eq!(opened.filter, "x", "expanding leaves the filter alone");
    }

    #[test]
    fn test_escape_closes_and_resets() {
        let state = PickerState {
            expanded: true,
            filter: "ar".to_string(),
            ..PickerState::new("Arial")
        };
        let FilterOutcome::Update(patch) = update_filter(&state, FilterKey::Escape, &[]) else {
            panic!("escape must update state");
        };
        let next = state.apply(patch);
        assert!(!next.expanded);
        assert_eq!(next.filter, "");
    }

    #[test]
    fn test_backspace_removes_one_char() {
        let state = PickerState {
            filter: "tim".to_string(),
            ..PickerState::new("Arial")
        };
        let FilterOutcome::Update(patch) = update_filter(&state, FilterKey::Backspace, &[]) else {
            panic!("backspace must update state");
        };
        assert_eq!(state.apply(patch).filter, "ti");

        let empty = PickerState::new("Arial");
        let FilterOutcome::Update(patch) = update_filter(&empty, FilterKey::Backspace, &[]) else {
            panic!("backspace must update state");
        };
        assert_eq!(empty.apply(patch), empty);
    }

    #[test]
    fn test_letters_are_lowercased_and_appended() {
        let state = PickerState {
            filter: "t".to_string(),
            ..PickerState::new("Arial")
        };
        let FilterOutcome::Update(patch) = update_filter(&state, FilterKey::Char('I'), &[]) else {
            panic!("letters must update state");
        };
        assert_eq!(state.apply(patch).filter, "ti");
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let state = PickerState::new("Arial");
        assert_eq!(update_filter(&state, FilterKey::Char('7'), &[]), FilterOutcome::Ignore);
        assert_eq!(update_filter(&state, FilterKey::Char(' '), &[]), FilterOutcome::Ignore);
        assert_eq!(update_filter(&state, FilterKey::Char('é'), &[]), FilterOutcome::Ignore);
        assert_eq!(update_filter(&state, FilterKey::Other, &[]), FilterOutcome::Ignore);
    }

    #[test]
    fn test_enter_selects_first_filtered_font() {
        let list = fonts(&["Arial", "Tahoma", "Times New Roman"]);
        let state = PickerState {
            filter: "t".to_string(),
            expanded: true,
            ..PickerState::new("Arial")
        };
        assert_eq!(
            update_filter(&state, FilterKey::Enter, &list),
            FilterOutcome::Select(Font::new("Tahoma"))
        );

        let nothing = PickerState {
            filter: "zz".to_string(),
            ..state
        };
        assert_eq!(update_filter(&nothing, FilterKey::Enter, &list), FilterOutcome::Ignore);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(FilterKey::from_key("escape"), FilterKey::Escape);
        assert_eq!(FilterKey::from_key("backspace"), FilterKey::Backspace);
        assert_eq!(FilterKey::from_key("enter"), FilterKey::Enter);
        assert_eq!(FilterKey::from_key("q"), FilterKey::Char('q'));
        assert_eq!(FilterKey::from_key("space"), FilterKey::Other);
        assert_eq!(FilterKey::from_key("f5"), FilterKey::Other);
    }

    #[test]
    fn test_failed_selection_keeps_requested_name() {
        let state = PickerState {
            loading_status: LoadingStatus::Finished,
            ..PickerState::new("Arial")
        };
        let result = Err(FontPickerError::font_not_in_list("DoesNotExist"));
        let next = state.apply(active_font_changed("DoesNotExist", &result));
        assert_eq!(next.loading_status, LoadingStatus::Error);
        assert_eq!(next.active_font, "DoesNotExist");
        assert!(next.error_text.contains("DoesNotExist"));

        let recovered = next.apply(active_font_changed("Georgia", &Ok(4)));
        assert_eq!(recovered.loading_status, LoadingStatus::Finished);
        assert_eq!(recovered.active_font, "Georgia");
        assert!(recovered.error_text.is_empty());
    }

    #[test]
    fn test_list_hidden_unless_finished() {
        let open = PickerState {
            expanded: true,
            ..PickerState::new("Arial")
        };
        assert!(!open.list_visible());

        let finished = open.apply(loading_finished());
        assert!(finished.list_visible());

        let failed = finished.apply(active_font_changed(
            "Nope",
            &Err(FontPickerError::font_not_in_list("Nope")),
        ));
        assert!(failed.expanded);
        assert!(!failed.list_visible());

        let collapsed = finished.apply(collapse());
        assert!(!collapsed.list_visible());
    }
}
