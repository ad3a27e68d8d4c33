//! Calculator display rendering.
//!
//! Renders the flags line, the pending operation and the current value.

use crate::calculator::{AngleUnit, CalculatorState, Mode, format_for_display, format_number};
use crate::notice::Notice;

use super::theme::Theme;

/// Render the calculator display.
///
/// ```text
/// SCI DEG INV M          7 +
/// = 3
/// ```
pub fn render_display(state: &CalculatorState, theme: &Theme) -> String {
    let mut flags = vec![match state.mode() {
        Mode::Basic => "BASIC",
        Mode::Scientific => "SCI",
    }];
    flags.push(match state.angle_unit() {
        AngleUnit::Degrees => "DEG",
        AngleUnit::Radians => "RAD",
    });
    if state.is_inverse() {
        flags.push("INV");
    }
    if state.memory() != 0.0 {
        flags.push("M");
    }

    let pending = match (state.pending_operand(), state.pending_operator()) {
        (Some(operand), Some(op)) => format!("{} {op}", format_number(operand)),
        _ => String::new(),
    };

    let value_color = if state.is_error() {
        theme.error
    } else {
        theme.title
    };

    format!(
        "{muted}{flags:<16}{pending:>16}{reset}\n{value_color}= {value}{reset}",
        muted = theme.muted,
        flags = flags.join(" "),
        reset = theme.reset,
        value = format_for_display(state.display()),
    )
}

/// Render a notice on one line.
pub fn render_notice(notice: &Notice, theme: &Theme) -> String {
    let color = if notice.is_error() {
        theme.error
    } else {
        theme.accent
    };
    format!("{color}{notice}{}", theme.reset)
}
