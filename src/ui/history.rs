//! History panel rendering.

use chrono::Local;

use crate::history::HistoryLog;

use super::theme::Theme;

/// Render history newest first, numbered from 1 for `recall <n>`.
pub fn render_history(history: &HistoryLog, theme: &Theme) -> String {
    if history.is_empty() {
        return format!("{}No calculations yet{}", theme.muted, theme.reset);
    }

    history
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let time = entry.timestamp().with_timezone(&Local).format("%H:%M:%S");
            format!(
                "{muted}{n:>2}. {time}{reset}  {title}{calc}{reset}",
                muted = theme.muted,
                n = i + 1,
                reset = theme.reset,
                title = theme.title,
                calc = entry.calculation(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        let log = HistoryLog::local();
        assert_eq!(render_history(&log, &Theme::plain()), "No calculations yet");
    }

    #[test]
    fn test_numbered_newest_first() {
        let mut log = HistoryLog::local();
        log.record("1 + 1 = 2", 2.0);
        log.record("√(16) = 4", 4.0);
        let text = render_history(&log, &Theme::plain());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1. "));
        assert!(lines[0].ends_with("√(16) = 4"));
        assert!(lines[1].ends_with("1 + 1 = 2"));
    }
}
