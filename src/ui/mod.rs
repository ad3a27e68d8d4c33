pub mod command;
pub mod display;
pub mod history;
pub mod theme;

pub use command::{Command, parse_command};
pub use display::{render_display, render_notice};
pub use history::render_history;
pub use theme::Theme;

/// Commands understood by the prompt besides keypad keys.
pub const HELP: &str = "\
Keys:     digits . + - x / % ^ =   c (all clear)  ce (clear entry)
Science:  sqrt sq cube 1/x exp ln sin cos tan log log2 pi e
          sci (mode)  deg (angle unit)  shift (inverse trig)
Memory:   m+ m- mr mc ms
Commands: history  recall <n>  clear-history  dark  logout  help  quit";
