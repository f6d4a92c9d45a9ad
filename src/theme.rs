//! UI settings: theme and language.
//!
//! Owned by the app state and passed down explicitly; the settings bar is
//! the single writer, everything else reads.

use crate::lang::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Injected settings holder (single writer, many readers)
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    pub theme: Theme,
    pub language: Language,
}
