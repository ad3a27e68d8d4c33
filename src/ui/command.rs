//! Prompt command parsing.

use crate::calculator::{Action, UnknownKey, parse_keys};

/// One line typed at the prompt.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Keys(Vec<Action>),
    History,
    /// 1-based, as shown in the history panel.
    Recall(usize),
    ClearHistory,
    ToggleDarkMode,
    Logout,
    Help,
    Quit,
}

/// Parse a prompt line; anything that is not a command is read as keys.
pub fn parse_command(line: &str) -> Result<Command, UnknownKey> {
    let mut words = line.split_whitespace();
    let command = match words.next() {
        Some("history" | "h") => Command::History,
        Some("clear-history") => Command::ClearHistory,
        Some("dark" | "theme") => Command::ToggleDarkMode,
        Some("logout") => Command::Logout,
        Some("help" | "?") => Command::Help,
        Some("quit" | "exit" | "q") => Command::Quit,
        Some("recall") => {
            let arg = words.next().unwrap_or("1");
            match arg.parse::<usize>() {
                Ok(n) if n > 0 => Command::Recall(n),
                _ => return Err(UnknownKey(format!("recall {arg}"))),
            }
        }
        _ => Command::Keys(parse_keys(line)?),
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::BinaryOp;

    #[test]
    fn test_commands() {
        assert_eq!(parse_command("history").unwrap(), Command::History);
        assert_eq!(parse_command("  quit ").unwrap(), Command::Quit);
        assert_eq!(parse_command("dark").unwrap(), Command::ToggleDarkMode);
        assert_eq!(parse_command("clear-history").unwrap(), Command::ClearHistory);
    }

    #[test]
    fn test_recall() {
        assert_eq!(parse_command("recall 3").unwrap(), Command::Recall(3));
        assert_eq!(parse_command("recall").unwrap(), Command::Recall(1));
        assert!(parse_command("recall 0").is_err());
        assert!(parse_command("recall x").is_err());
    }

    #[test]
    fn test_keys_fallback() {
        assert_eq!(
            parse_command("2 ^ 8").unwrap(),
            Command::Keys(vec![
                Action::Digit(2),
                Action::Operator(BinaryOp::Power),
                Action::Digit(8)
            ])
        );
        assert!(parse_command("hello").is_err());
    }
}
