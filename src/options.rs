//! Picker options
//!
//! Mirrors the options bag an embedding application hands to the picker. All
//! fields are optional in JSON; missing ones take the defaults below.

use crate::font::{picker_suffix, Category};
use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Font that is selected before anything else has been chosen
pub const DEFAULT_ACTIVE_FONT: &str = "Open Sans";

/// Default cap on the number of fonts in the list
pub const DEFAULT_LIMIT: usize = 100;

/// Order of the font list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Alphabetical,
    Popularity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerOptions {
    /// Uniqueness suffix when several pickers share a window (letters and digits only)
    pub name: Option<String>,
    /// Restrict the list to these families
    pub families: Vec<String>,
    /// Restrict the list to these categories
    pub categories: Vec<Category>,
    /// Variants every listed font must offer; the first one is downloaded for previews
    pub variants: Vec<String>,
    /// Maximum number of fonts in the list (least popular are dropped)
    pub limit: usize,
    pub sort: SortOrder,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            name: None,
            families: Vec::new(),
            categories: Vec::new(),
            variants: vec!["regular".to_string()],
            limit: DEFAULT_LIMIT,
            sort: SortOrder::default(),
        }
    }
}

impl PickerOptions {
    /// Check the constraints serde can't express
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(name) = &self.name {
            if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
                bail!(
                    "Picker name '{}' may only consist of letters and digits",
                    name
                );
            }
        }
        if self.limit == 0 {
            bail!("Font limit must be at least 1");
        }
        Ok(())
    }

    /// Element id suffix derived from `name`
    pub fn suffix(&self) -> String {
        picker_suffix(self.name.as_deref())
    }

    /// Variant used for previews and the active font
    pub fn default_variant(&self) -> &str {
        self.variants
            .first()
            .map(String::as_str)
            .unwrap_or("regular")
    }
}
