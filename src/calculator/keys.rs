//! Keystroke parsing for the terminal front-end.
//!
//! A line such as `12.5 x 4 =` or `90 sin` is split into keypad presses.
//! Numbers expand into their individual digit and decimal-point keys so
//! that entry goes through exactly the same transitions as button presses.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::evaluation::{BinaryOp, Constant, UnaryFn};
use super::state::{Action, MemoryOp};

lazy_static! {
    /// One keypad token. Order matters: `1/x` before numbers, memory keys before words,
    /// and a catch-all last so unknown characters surface as errors.
    static ref TOKEN: Regex = Regex::new(
        r"1/x|[mM][+\-rRcCsS]\b|[mM][+\-]|[A-Za-z]+[0-9]*|\d+\.?\d*|\.\d+|[+\-*/×÷%^=π√²³]|\S"
    ).unwrap();
}

/// A token that is not a known key.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown key: {0}")]
pub struct UnknownKey(pub String);

/// Parse a line of keys into actions.
pub fn parse_keys(line: &str) -> Result<Vec<Action>, UnknownKey> {
    let mut actions = Vec::new();

    for token in TOKEN.find_iter(line).map(|m| m.as_str()) {
        if token.starts_with(|c: char| c.is_ascii_digit() || c == '.') && token != "1/x" {
            push_number(token, &mut actions);
            continue;
        }

        let action =
            parse_word(&token.to_lowercase()).ok_or_else(|| UnknownKey(token.to_string()))?;
        actions.push(action);
    }

    Ok(actions)
}

fn push_number(token: &str, actions: &mut Vec<Action>) {
    for c in token.chars() {
        match c.to_digit(10) {
            Some(d) => actions.push(Action::Digit(d as u8)),
            None => actions.push(Action::Decimal),
        }
    }
}

fn parse_word(word: &str) -> Option<Action> {
    let action = match word {
        "+" => Action::Operator(BinaryOp::Add),
        "-" => Action::Operator(BinaryOp::Subtract),
        "*" | "x" | "×" => Action::Operator(BinaryOp::Multiply),
        "/" | "÷" => Action::Operator(BinaryOp::Divide),
        "%" => Action::Operator(BinaryOp::Percent),
        "^" | "pow" => Action::Operator(BinaryOp::Power),
        "=" => Action::Equals,

        "c" | "ac" | "clear" => Action::ClearAll,
        "ce" => Action::ClearEntry,

        "sqrt" | "√" => Action::Function(UnaryFn::Sqrt),
        "sq" | "²" => Action::Function(UnaryFn::Square),
        "cube" | "³" => Action::Function(UnaryFn::Cube),
        "1/x" | "recip" => Action::Function(UnaryFn::Reciprocal),
        "exp" => Action::Function(UnaryFn::Exp),
        "ln" => Action::Function(UnaryFn::Ln),
        "sin" => Action::Function(UnaryFn::Sin),
        "cos" => Action::Function(UnaryFn::Cos),
        "tan" => Action::Function(UnaryFn::Tan),
        "log" | "log10" => Action::Function(UnaryFn::Log10),
        "log2" => Action::Function(UnaryFn::Log2),

        "pi" | "π" => Action::Constant(Constant::Pi),
        "e" => Action::Constant(Constant::E),

        "m+" => Action::Memory(MemoryOp::Add),
        "m-" => Action::Memory(MemoryOp::Subtract),
        "mr" => Action::Memory(MemoryOp::Recall),
        "mc" => Action::Memory(MemoryOp::Clear),
        "ms" => Action::Memory(MemoryOp::Store),

        "sci" | "mode" => Action::ToggleMode,
        "deg" | "rad" => Action::ToggleAngleUnit,
        "shift" | "inv" => Action::ToggleInverse,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_expand_to_digits() {
        assert_eq!(
            parse_keys("12.5").unwrap(),
            vec![
                Action::Digit(1),
                Action::Digit(2),
                Action::Decimal,
                Action::Digit(5)
            ]
        );
        assert_eq!(
            parse_keys(".5").unwrap(),
            vec![Action::Decimal, Action::Digit(5)]
        );
    }

    #[test]
    fn test_expression_line() {
        assert_eq!(
            parse_keys("7 + 3 =").unwrap(),
            vec![
                Action::Digit(7),
                Action::Operator(BinaryOp::Add),
                Action::Digit(3),
                Action::Equals
            ]
        );
        // Whitespace is optional
        assert_eq!(parse_keys("7+3=").unwrap(), parse_keys("7 + 3 =").unwrap());
    }

    #[test]
    fn test_operator_aliases() {
        assert_eq!(
            parse_keys("x * ×").unwrap(),
            vec![Action::Operator(BinaryOp::Multiply); 3]
        );
        assert_eq!(
            parse_keys("/ ÷").unwrap(),
            vec![Action::Operator(BinaryOp::Divide); 2]
        );
    }

    #[test]
    fn test_functions_and_constants() {
        assert_eq!(
            parse_keys("16 sqrt").unwrap(),
            vec![
                Action::Digit(1),
                Action::Digit(6),
                Action::Function(UnaryFn::Sqrt)
            ]
        );
        assert_eq!(
            parse_keys("log2 log10 1/x").unwrap(),
            vec![
                Action::Function(UnaryFn::Log2),
                Action::Function(UnaryFn::Log10),
                Action::Function(UnaryFn::Reciprocal)
            ]
        );
        assert_eq!(
            parse_keys("PI e").unwrap(),
            vec![Action::Constant(Constant::Pi), Action::Constant(Constant::E)]
        );
    }

    #[test]
    fn test_memory_keys() {
        assert_eq!(
            parse_keys("5 m+ mc MR").unwrap(),
            vec![
                Action::Digit(5),
                Action::Memory(MemoryOp::Add),
                Action::Memory(MemoryOp::Clear),
                Action::Memory(MemoryOp::Recall)
            ]
        );
        assert_eq!(
            parse_keys("m- ms").unwrap(),
            vec![
                Action::Memory(MemoryOp::Subtract),
                Action::Memory(MemoryOp::Store)
            ]
        );
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert_eq!(parse_keys("7 ? 3"), Err(UnknownKey("?".to_string())));
        assert_eq!(
            parse_keys("firefox"),
            Err(UnknownKey("firefox".to_string()))
        );
    }

    #[test]
    fn test_empty_line() {
        assert!(parse_keys("").unwrap().is_empty());
        assert!(parse_keys("   ").unwrap().is_empty());
    }
}
