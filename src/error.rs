//! Error types for the font picker
//!
//! Only two things can go wrong while the picker runs: the font service can't
//! be initialised, or somebody asks for a font that isn't in the list.

use thiserror::Error;

/// Errors produced by font managers and surfaced by the picker
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FontPickerError {
    /// The font metadata service could not be reached or returned nothing usable
    #[error("Font list could not be loaded: {0}")]
    Initialization(String),

    /// A requested family is not part of the active manager's font list
    #[error("Cannot update activeFont: The font \"{family}\" is not in the font list")]
    FontNotInList {
        /// The family that was requested
        family: String,
    },
}

impl FontPickerError {
    pub fn initialization(err: impl std::fmt::Display) -> Self {
        Self::Initialization(err.to_string())
    }

    pub fn font_not_in_list(family: impl Into<String>) -> Self {
        Self::FontNotInList {
            family: family.into(),
        }
    }
}

/// Result alias used by font managers
pub type FontPickerResult<T> = Result<T, FontPickerError>;

/// Collapse a selection result into the numeric contract: list index, or -1
pub fn index_or_sentinel(result: &FontPickerResult<usize>) -> i64 {
    match result {
        Ok(index) => *index as i64,
        Err(_) => -1,
    }
}
