//! Display formatting for narrow screens
//!
//! The engine keeps full-precision numerals; a screen only shows so many
//! digits. Numerals longer than the width are shown in exponent form.

use serde::{Deserialize, Serialize};

use crate::core::{numeral, ERROR_MARKER};

/// Width of the numeric display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayWidth {
    /// Phone-sized display
    #[default]
    Compact,
    /// Tablet or desktop display
    Wide,
}

impl DisplayWidth {
    /// Maximum digits shown before switching to exponent form
    #[must_use]
    pub const fn max_digits(self) -> usize {
        match self {
            Self::Compact => 9,
            Self::Wide => 12,
        }
    }

    /// Picks the width for a screen of `points` logical width
    #[must_use]
    pub const fn for_screen(points: u32) -> Self {
        if points > 500 {
            Self::Wide
        } else {
            Self::Compact
        }
    }
}

/// Shortens display text to fit the given width
///
/// The error marker passes through. Numerals with more than
/// [`DisplayWidth::max_digits`] characters (not counting decimal points)
/// are rendered with `max_digits - 5` fraction digits in exponent form.
///
/// ```
/// use pocketcalc::display::{format_display, DisplayWidth};
///
/// assert_eq!(format_display("1234567890", DisplayWidth::Compact), "1.2346e+9");
/// assert_eq!(format_display("1234567890", DisplayWidth::Wide), "1234567890");
/// assert_eq!(format_display("Error", DisplayWidth::Compact), "Error");
/// ```
#[must_use]
pub fn format_display(text: &str, width: DisplayWidth) -> String {
    if text == ERROR_MARKER {
        return text.to_string();
    }
    let max_digits = width.max_digits();
    let length = text.chars().filter(|&c| c != '.').count();
    if length <= max_digits {
        return text.to_string();
    }
    match numeral::parse(text) {
        Some(value) => numeral::to_exponential(value, max_digits - 5),
        None => text.to_string(),
    }
}
