//! Calculator state machine.
//!
//! All input flows through [`CalculatorState::update`], a reducer that
//! mutates the state and reports what happened in an [`Outcome`]: a
//! calculation to append to history, a new memory value to persist, a
//! settings change, or a notice for the user. The state itself never
//! touches history or storage.

use tracing::debug;

use super::evaluation::{
    AngleUnit, BinaryOp, Constant, UnaryFn, evaluate, evaluate_unary, finite,
};
use super::format::format_number;
use crate::error::MathDomainError;
use crate::notice::Notice;
use crate::settings::Settings;

/// Display text shown after a failed calculation.
pub const ERROR_DISPLAY: &str = "Error";

/// Keypad layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Basic,
    Scientific,
}

/// Coarse state of the machine, derived from the fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first operand.
    Idle,
    EnteringOperand,
    /// A left operand and operator are stored.
    OperatorPending,
    /// The display shows the error sentinel.
    Error,
}

/// Memory register keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryOp {
    /// `M+`
    Add,
    /// `M-`
    Subtract,
    /// `MR`
    Recall,
    /// `MC`
    Clear,
    /// `MS`
    Store,
}

impl MemoryOp {
    /// Key label as printed on the keypad.
    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "M+",
            Self::Subtract => "M-",
            Self::Recall => "MR",
            Self::Clear => "MC",
            Self::Store => "MS",
        }
    }
}

/// A single input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    Digit(u8),
    Decimal,
    Operator(BinaryOp),
    Equals,
    ClearAll,
    ClearEntry,
    Function(UnaryFn),
    Constant(Constant),
    Memory(MemoryOp),
    ToggleMode,
    ToggleAngleUnit,
    ToggleInverse,
    /// Load a value taken from a history entry.
    Recall(f64),
}

/// A finished calculation, ready to be recorded in history.
#[derive(Clone, Debug, PartialEq)]
pub struct Calculation {
    pub text: String,
    pub value: f64,
}

/// Side effects requested by a transition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outcome {
    pub calculation: Option<Calculation>,
    /// New memory value, set only when the register changed.
    pub memory: Option<f64>,
    /// Scientific mode or angle unit changed.
    pub settings_changed: bool,
    pub notice: Option<Notice>,
}

impl Outcome {
    fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            ..Self::default()
        }
    }

    fn calculation(text: String, value: f64) -> Self {
        Self {
            calculation: Some(Calculation { text, value }),
            ..Self::default()
        }
    }
}

/// The calculator's in-session state.
///
/// Invariant: `pending_operator` is only set while `pending_operand` is.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculatorState {
    display: String,
    pending_operand: Option<f64>,
    pending_operator: Option<BinaryOp>,
    awaiting_new_operand: bool,
    memory: f64,
    angle_unit: AngleUnit,
    inverse: bool,
    mode: Mode,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    /// Fresh state: display `0`, empty memory, basic mode in degrees.
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            pending_operand: None,
            pending_operator: None,
            awaiting_new_operand: false,
            memory: 0.0,
            angle_unit: AngleUnit::Degrees,
            inverse: false,
            mode: Mode::Basic,
        }
    }

    /// Take mode and angle unit from persisted settings.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.mode = if settings.scientific_mode {
            Mode::Scientific
        } else {
            Mode::Basic
        };
        self.angle_unit = settings.angle_unit;
    }

    /// Replace the memory register with a loaded value; non-finite values are ignored.
    pub fn set_memory(&mut self, value: f64) {
        if value.is_finite() {
            self.memory = value;
        }
    }

    /// Get the display text.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The display as a finite number, `None` in the error state.
    pub fn display_value(&self) -> Option<f64> {
        if self.is_error() {
            return None;
        }
        self.display.parse::<f64>().ok().filter(|value| value.is_finite())
    }

    /// Get the stored left operand.
    pub fn pending_operand(&self) -> Option<f64> {
        self.pending_operand
    }

    /// Get the stored operator.
    pub fn pending_operator(&self) -> Option<BinaryOp> {
        self.pending_operator
    }

    /// Whether the next digit replaces the display.
    pub fn is_awaiting_new_operand(&self) -> bool {
        self.awaiting_new_operand
    }

    /// Get the memory register.
    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// Get the angle unit used by trig functions.
    pub fn angle_unit(&self) -> AngleUnit {
        self.angle_unit
    }

    /// Whether inverse trig is active.
    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    /// Get the keypad layout.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the display shows the error sentinel.
    pub fn is_error(&self) -> bool {
        self.display == ERROR_DISPLAY
    }

    /// Derive the coarse phase from the fields.
    pub fn phase(&self) -> Phase {
        if self.is_error() {
            Phase::Error
        } else if self.pending_operator.is_some() {
            Phase::OperatorPending
        } else if !self.awaiting_new_operand && self.display != "0" {
            Phase::EnteringOperand
        } else {
            Phase::Idle
        }
    }

    /// Apply one input event.
    pub fn update(&mut self, action: Action) -> Outcome {
        let outcome = match action {
            Action::Digit(digit) => self.input_digit(digit),
            Action::Decimal => {
                self.input_decimal();
                Outcome::default()
            }
            Action::Operator(op) => self.set_operator(op),
            Action::Equals => self.equals(),
            Action::ClearAll => {
                self.clear_all();
                Outcome::notice(Notice::info("Calculator cleared"))
            }
            Action::ClearEntry => {
                self.display = "0".to_string();
                self.awaiting_new_operand = false;
                Outcome::default()
            }
            Action::Function(func) => self.apply_function(func),
            Action::Constant(constant) => {
                self.load_literal(constant.value());
                Outcome::notice(Notice::info(format!(
                    "Inserted constant: {}",
                    constant.symbol()
                )))
            }
            Action::Memory(op) => self.memory_op(op),
            Action::ToggleMode => {
                self.mode = match self.mode {
                    Mode::Basic => Mode::Scientific,
                    Mode::Scientific => Mode::Basic,
                };
                let name = match self.mode {
                    Mode::Basic => "basic",
                    Mode::Scientific => "scientific",
                };
                Outcome {
                    settings_changed: true,
                    ..Outcome::notice(Notice::info(format!("Switched to {name} calculator")))
                }
            }
            Action::ToggleAngleUnit => {
                self.angle_unit = self.angle_unit.toggled();
                Outcome {
                    settings_changed: true,
                    ..Outcome::notice(Notice::info(format!("Switched to {}", self.angle_unit)))
                }
            }
            Action::ToggleInverse => {
                self.inverse = !self.inverse;
                let name = if self.inverse { "Inverse" } else { "Regular" };
                Outcome::notice(Notice::info(format!("{name} functions activated")))
            }
            Action::Recall(value) => {
                self.pending_operand = None;
                self.pending_operator = None;
                self.load_literal(value);
                Outcome::notice(Notice::info("Value recalled from history"))
            }
        };

        debug!(?action, display = %self.display, phase = ?self.phase(), "calculator transition");
        outcome
    }

    fn input_digit(&mut self, digit: u8) -> Outcome {
        let digit = char::from(b'0' + digit.min(9));

        if self.is_error() || self.awaiting_new_operand {
            self.display = digit.to_string();
            self.awaiting_new_operand = false;
        } else if self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push(digit);
        }

        // A long enough operand overflows f64
        match self.display.parse::<f64>().map(finite) {
            Ok(Err(err)) => self.fail(err),
            _ => Outcome::default(),
        }
    }

    fn input_decimal(&mut self) {
        if self.is_error() || self.awaiting_new_operand {
            self.display = "0.".to_string();
            self.awaiting_new_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    fn set_operator(&mut self, op: BinaryOp) -> Outcome {
        let Some(input) = self.display_value() else {
            return Outcome::default();
        };

        let mut outcome = Outcome::default();
        match (self.pending_operand, self.pending_operator) {
            (Some(left), Some(pending)) => match evaluate(pending, left, input) {
                Ok(result) => {
                    self.pending_operand = Some(result);
                    self.display = format_number(result);
                    outcome = Outcome::calculation(
                        binary_text(left, pending, input, result),
                        result,
                    );
                }
                Err(err) => return self.fail(err),
            },
            _ => self.pending_operand = Some(input),
        }

        self.pending_operator = Some(op);
        self.awaiting_new_operand = true;
        outcome
    }

    fn equals(&mut self) -> Outcome {
        let (Some(left), Some(op)) = (self.pending_operand, self.pending_operator) else {
            return Outcome::default();
        };
        let Some(right) = self.display_value() else {
            return Outcome::default();
        };

        match evaluate(op, left, right) {
            Ok(result) => {
                self.display = format_number(result);
                self.pending_operand = None;
                self.pending_operator = None;
                self.awaiting_new_operand = true;
                Outcome::calculation(binary_text(left, op, right, result), result)
            }
            Err(err) => self.fail(err),
        }
    }

    fn apply_function(&mut self, func: UnaryFn) -> Outcome {
        let Some(input) = self.display_value() else {
            return Outcome::default();
        };

        match evaluate_unary(func, input, self.angle_unit, self.inverse) {
            Ok(result) => {
                self.display = format_number(result);
                self.awaiting_new_operand = true;
                let text = func.describe(
                    &format_number(input),
                    &self.display,
                    self.angle_unit,
                    self.inverse,
                );
                Outcome::calculation(text, result)
            }
            Err(err) => self.fail(err),
        }
    }

    fn memory_op(&mut self, op: MemoryOp) -> Outcome {
        let input = self.display_value();
        let (memory, message) = match (op, input) {
            (MemoryOp::Recall, _) => {
                self.load_literal(self.memory);
                let message = format!("Recalled memory value: {}", format_number(self.memory));
                return Outcome::notice(Notice::info(message));
            }
            (MemoryOp::Clear, _) => (0.0, "Memory cleared".to_string()),
            (MemoryOp::Add, Some(x)) => (
                self.memory + x,
                format!("Added {} to memory", format_number(x)),
            ),
            (MemoryOp::Subtract, Some(x)) => (
                self.memory - x,
                format!("Subtracted {} from memory", format_number(x)),
            ),
            (MemoryOp::Store, Some(x)) => (x, format!("Stored {} in memory", format_number(x))),
            (MemoryOp::Add | MemoryOp::Subtract | MemoryOp::Store, None) => {
                return Outcome::default();
            }
        };

        let memory = match finite(memory) {
            Ok(memory) => memory,
            Err(err) => return self.fail(err),
        };
        self.memory = memory;
        Outcome {
            memory: Some(memory),
            ..Outcome::notice(Notice::info(message))
        }
    }

    fn clear_all(&mut self) {
        self.display = "0".to_string();
        self.pending_operand = None;
        self.pending_operator = None;
        self.awaiting_new_operand = false;
    }

    fn load_literal(&mut self, value: f64) {
        self.display = format_number(value);
        self.awaiting_new_operand = true;
    }

    fn fail(&mut self, err: MathDomainError) -> Outcome {
        debug!(%err, "calculation failed");
        self.display = ERROR_DISPLAY.to_string();
        self.pending_operand = None;
        self.pending_operator = None;
        self.awaiting_new_operand = true;
        Outcome::notice(Notice::error(format!("Error: {err}")))
    }
}

fn binary_text(left: f64, op: BinaryOp, right: f64, result: f64) -> String {
    format!(
        "{} {op} {} = {}",
        format_number(left),
        format_number(right),
        format_number(result)
    )
}
