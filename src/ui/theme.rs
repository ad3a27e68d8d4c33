//! Terminal colours for light and dark mode.

/// ANSI styling used by the renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub title: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub error: &'static str,
    pub reset: &'static str,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            title: "\x1b[1;97m",
            muted: "\x1b[90m",
            accent: "\x1b[94m",
            error: "\x1b[91m",
            reset: "\x1b[0m",
        }
    }

    pub fn light() -> Self {
        Self {
            title: "\x1b[1;30m",
            muted: "\x1b[37m",
            accent: "\x1b[34m",
            error: "\x1b[31m",
            reset: "\x1b[0m",
        }
    }

    /// No escape codes, for pipes and tests.
    pub fn plain() -> Self {
        Self {
            title: "",
            muted: "",
            accent: "",
            error: "",
            reset: "",
        }
    }

    pub fn for_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::dark() } else { Self::light() }
    }
}
