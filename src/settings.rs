//! Persisted user preferences.

use serde::{Deserialize, Serialize};

use crate::calculator::AngleUnit;

/// Per-user calculator preferences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scientific_mode: bool,
    pub angle_unit: AngleUnit,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_dark_mode(false)
    }
}

impl Settings {
    /// Defaults for a first-time user with the given dark-mode preference.
    pub fn with_dark_mode(dark_mode: bool) -> Self {
        Self {
            scientific_mode: false,
            angle_unit: AngleUnit::Degrees,
            dark_mode,
        }
    }

    /// Defaults following the terminal's colour scheme.
    pub fn from_system() -> Self {
        Self::with_dark_mode(prefers_dark_mode())
    }
}

/// Best guess at the system dark-mode preference.
///
/// Terminals export `COLORFGBG` as `fg;bg`; a dark background colour index
/// means dark mode. Without the variable the answer is light.
pub fn prefers_dark_mode() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .is_some_and(|value| background_is_dark(&value))
}

fn background_is_dark(colorfgbg: &str) -> bool {
    colorfgbg
        .rsplit(';')
        .next()
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg <= 6 || bg == 8)
}
