//! Font entries and the element naming scheme
//!
//! A [`Font`] is nothing more than a family name. Everything else (metrics,
//! files, variants) belongs to whichever font manager produced the list.

use serde::{Deserialize, Serialize};

/// A single entry in the picker's font list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
}

impl Font {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
        }
    }

    /// Whether this font survives the given (already lowercase) filter text
    pub fn matches_filter(&self, filter: &str) -> bool {
        self.family.to_lowercase().starts_with(filter)
    }
}

/// Font categories as reported by the Google Fonts API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    SansSerif,
    Serif,
    Display,
    Handwriting,
    Monospace,
}

impl Category {
    /// Name used by the Google Fonts API
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::SansSerif => "sans-serif",
            Category::Serif => "serif",
            Category::Display => "display",
            Category::Handwriting => "handwriting",
            Category::Monospace => "monospace",
        }
    }
}

/// Lowercase a family name and collapse every whitespace run into one hyphen
///
/// `"Times New Roman"` becomes `"times-new-roman"`.
pub fn slugify(family: &str) -> String {
    family
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Suffix appended to every element id of a named picker (`-<name>` or empty)
pub fn picker_suffix(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => format!("-{}", name),
        _ => String::new(),
    }
}

/// Id of the picker's root element: `font-picker[-<name>]`
pub fn picker_root_id(suffix: &str) -> String {
    format!("font-picker{}", suffix)
}

/// Id of a font row: `font-<slug>[-<name>]`
pub fn font_row_id(family: &str, suffix: &str) -> String {
    format!("font-{}{}", slugify(family), suffix)
}
