//! Calculator core.
//!
//! This module provides functionality to:
//! - Evaluate binary operators and scientific functions
//! - Drive the keypad state machine (entry, chaining, memory, modes)
//! - Format numbers for the display and history
//! - Parse typed keystrokes into keypad actions

mod evaluation;
mod format;
mod keys;
mod state;

pub use evaluation::{AngleUnit, BinaryOp, Constant, UnaryFn, evaluate, evaluate_unary};
pub use format::{format_for_display, format_number};
pub use keys::{UnknownKey, parse_keys};
pub use state::{
    Action, Calculation, CalculatorState, ERROR_DISPLAY, MemoryOp, Mode, Outcome, Phase,
};
