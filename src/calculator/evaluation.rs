//! Arithmetic and scientific-function dispatch.
//!
//! Everything here is pure: an operator or function tag plus operands in,
//! a finite number or a [`MathDomainError`] out. Turning an error into the
//! `"Error"` display is the state machine's job.

use serde::{Deserialize, Serialize};
use std::f64::consts::{E, PI};
use std::fmt;

use crate::error::MathDomainError;

/// Angle unit used by the forward trigonometric functions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// The other unit.
    pub fn toggled(self) -> Self {
        match self {
            Self::Degrees => Self::Radians,
            Self::Radians => Self::Degrees,
        }
    }

    /// Suffix used when showing a trig input in history text.
    fn input_suffix(self) -> &'static str {
        match self {
            Self::Degrees => "°",
            Self::Radians => " rad",
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degrees => write!(f, "degrees"),
            Self::Radians => write!(f, "radians"),
        }
    }
}

/// Binary operators available on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// "Percentage of": `a * b / 100`, not modulo.
    Percent,
    Power,
}

impl BinaryOp {
    /// Keypad symbol, also used in history text.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Percent => "%",
            Self::Power => "^",
        }
    }

    /// Apply the operator with plain IEEE-754 semantics.
    ///
    /// Division by zero yields an infinity (or NaN for `0 ÷ 0`).
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
            Self::Percent => (a * b) / 100.0,
            Self::Power => a.powf(b),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Single-operand scientific functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryFn {
    Sqrt,
    Square,
    Cube,
    Reciprocal,
    Exp,
    Ln,
    Sin,
    Cos,
    Tan,
    Log10,
    Log2,
}

impl UnaryFn {
    /// Whether the inverse-shift flag changes this function.
    pub fn is_trig(self) -> bool {
        matches!(self, Self::Sin | Self::Cos | Self::Tan)
    }

    /// Keypad label, taking the inverse-shift flag into account.
    pub fn label(self, inverse: bool) -> &'static str {
        match (self, inverse) {
            (Self::Sin, true) => "asin",
            (Self::Cos, true) => "acos",
            (Self::Tan, true) => "atan",
            (Self::Sin, false) => "sin",
            (Self::Cos, false) => "cos",
            (Self::Tan, false) => "tan",
            (Self::Sqrt, _) => "√x",
            (Self::Square, _) => "x²",
            (Self::Cube, _) => "x³",
            (Self::Reciprocal, _) => "1/x",
            (Self::Exp, _) => "eˣ",
            (Self::Ln, _) => "ln",
            (Self::Log10, _) => "log₁₀",
            (Self::Log2, _) => "log₂",
        }
    }

    /// Apply the function with plain IEEE-754 semantics.
    ///
    /// Forward trig converts a degree input to radians first. The inverse
    /// forms return radians regardless of `unit`; this asymmetry is what the
    /// calculator has always done and is pinned by tests.
    pub fn apply(self, x: f64, unit: AngleUnit, inverse: bool) -> f64 {
        let radians = match unit {
            AngleUnit::Degrees => x * (PI / 180.0),
            AngleUnit::Radians => x,
        };

        match self {
            Self::Sqrt => x.sqrt(),
            Self::Square => x.powi(2),
            Self::Cube => x.powi(3),
            Self::Reciprocal => 1.0 / x,
            Self::Exp => x.exp(),
            Self::Ln => x.ln(),
            Self::Sin if inverse => x.asin(),
            Self::Cos if inverse => x.acos(),
            Self::Tan if inverse => x.atan(),
            Self::Sin => radians.sin(),
            Self::Cos => radians.cos(),
            Self::Tan => radians.tan(),
            Self::Log10 => x.log10(),
            Self::Log2 => x.log2(),
        }
    }

    /// Human-readable calculation text for history, e.g. `√(16) = 4`.
    pub fn describe(self, input: &str, result: &str, unit: AngleUnit, inverse: bool) -> String {
        match self {
            Self::Sqrt => format!("√({input}) = {result}"),
            Self::Square => format!("{input}² = {result}"),
            Self::Cube => format!("{input}³ = {result}"),
            Self::Reciprocal => format!("1/{input} = {result}"),
            Self::Exp => format!("e^{input} = {result}"),
            Self::Ln => format!("ln({input}) = {result}"),
            Self::Sin | Self::Cos | Self::Tan if inverse => {
                format!("{}({input}) = {result}", self.label(true))
            }
            Self::Sin | Self::Cos | Self::Tan => format!(
                "{}({input}{}) = {result}",
                self.label(false),
                unit.input_suffix()
            ),
            Self::Log10 => format!("log₁₀({input}) = {result}"),
            Self::Log2 => format!("log₂({input}) = {result}"),
        }
    }
}

/// Constants that can be loaded straight into the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    /// Get the numeric value.
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => PI,
            Self::E => E,
        }
    }

    /// Get the symbol shown in notices.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Pi => "π",
            Self::E => "e",
        }
    }
}

/// Evaluate a binary operation, rejecting non-finite results.
pub fn evaluate(op: BinaryOp, a: f64, b: f64) -> Result<f64, MathDomainError> {
    finite(op.apply(a, b))
}

/// Evaluate a scientific function, rejecting non-finite results.
pub fn evaluate_unary(
    func: UnaryFn,
    x: f64,
    unit: AngleUnit,
    inverse: bool,
) -> Result<f64, MathDomainError> {
    finite(func.apply(x, unit, inverse))
}

/// Reject `inf` and `NaN`.
pub(super) fn finite(value: f64) -> Result<f64, MathDomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MathDomainError::NonFinite { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_basic_operators() {
        assert_eq!(evaluate(BinaryOp::Add, 7.0, 3.0).unwrap(), 10.0);
        assert_eq!(evaluate(BinaryOp::Subtract, 7.0, 3.0).unwrap(), 4.0);
        assert_eq!(evaluate(BinaryOp::Multiply, 7.0, 3.0).unwrap(), 21.0);
        assert_eq!(evaluate(BinaryOp::Divide, 9.0, 3.0).unwrap(), 3.0);
        assert_eq!(evaluate(BinaryOp::Power, 2.0, 10.0).unwrap(), 1024.0);
    }

    #[test]
    fn test_percent_is_percentage_of() {
        assert_eq!(evaluate(BinaryOp::Percent, 200.0, 15.0).unwrap(), 30.0);
        // Not modulo: 10 % 3 would be 1
        assert_eq!(evaluate(BinaryOp::Percent, 10.0, 3.0).unwrap(), 0.3);
    }

    #[test]
    fn test_division_by_zero() {
        for x in [-5.0, 0.0, 1.0, 1e300] {
            assert!(!BinaryOp::Divide.apply(x, 0.0).is_finite());
            assert!(matches!(
                evaluate(BinaryOp::Divide, x, 0.0),
                Err(MathDomainError::NonFinite { .. })
            ));
        }
    }

    #[test]
    fn test_overflow_is_domain_error() {
        assert!(evaluate(BinaryOp::Power, 10.0, 400.0).is_err());
        assert!(evaluate(BinaryOp::Multiply, 1e308, 10.0).is_err());
    }

    #[test]
    fn test_unary_functions() {
        let eval = |f| evaluate_unary(f, 16.0, AngleUnit::Degrees, false).unwrap();
        assert_eq!(eval(UnaryFn::Sqrt), 4.0);
        assert_eq!(eval(UnaryFn::Square), 256.0);
        assert_eq!(eval(UnaryFn::Cube), 4096.0);
        assert_eq!(eval(UnaryFn::Reciprocal), 0.0625);
        assert_eq!(eval(UnaryFn::Log2), 4.0);
        assert!((eval(UnaryFn::Ln) - 16f64.ln()).abs() < TOLERANCE);
    }

    #[test]
    fn test_invalid_domains() {
        assert!(evaluate_unary(UnaryFn::Sqrt, -1.0, AngleUnit::Degrees, false).is_err());
        assert!(evaluate_unary(UnaryFn::Ln, 0.0, AngleUnit::Degrees, false).is_err());
        assert!(evaluate_unary(UnaryFn::Log10, -3.0, AngleUnit::Degrees, false).is_err());
        assert!(evaluate_unary(UnaryFn::Reciprocal, 0.0, AngleUnit::Degrees, false).is_err());
        assert!(evaluate_unary(UnaryFn::Sin, 2.0, AngleUnit::Radians, true).is_err());
    }

    #[test]
    fn test_trig_degrees_and_radians() {
        let sin90 = evaluate_unary(UnaryFn::Sin, 90.0, AngleUnit::Degrees, false).unwrap();
        assert!((sin90 - 1.0).abs() < TOLERANCE);

        let sin_half_pi = evaluate_unary(
            UnaryFn::Sin,
            1.570_796_326_794_896_6,
            AngleUnit::Radians,
            false,
        )
        .unwrap();
        assert!((sin_half_pi - 1.0).abs() < TOLERANCE);

        let cos60 = evaluate_unary(UnaryFn::Cos, 60.0, AngleUnit::Degrees, false).unwrap();
        assert!((cos60 - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_inverse_trig_returns_radians_even_in_degree_mode() {
        // Pinned behaviour: asin(1) in degree mode is π/2, not 90.
        let asin = evaluate_unary(UnaryFn::Sin, 1.0, AngleUnit::Degrees, true).unwrap();
        assert!((asin - PI / 2.0).abs() < TOLERANCE);

        let atan = evaluate_unary(UnaryFn::Tan, 1.0, AngleUnit::Degrees, true).unwrap();
        assert!((atan - PI / 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_inverse_flag_ignored_by_non_trig() {
        let plain = evaluate_unary(UnaryFn::Log10, 1000.0, AngleUnit::Degrees, false).unwrap();
        let shifted = evaluate_unary(UnaryFn::Log10, 1000.0, AngleUnit::Degrees, true).unwrap();
        assert_eq!(plain, shifted);
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            UnaryFn::Sqrt.describe("16", "4", AngleUnit::Degrees, false),
            "√(16) = 4"
        );
        assert_eq!(
            UnaryFn::Sin.describe("90", "1", AngleUnit::Degrees, false),
            "sin(90°) = 1"
        );
        assert_eq!(
            UnaryFn::Cos.describe("0", "1", AngleUnit::Radians, false),
            "cos(0 rad) = 1"
        );
        assert_eq!(
            UnaryFn::Tan.describe("1", "0.7853981633974483", AngleUnit::Degrees, true),
            "atan(1) = 0.7853981633974483"
        );
    }
}
