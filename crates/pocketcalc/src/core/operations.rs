//! Binary operators and scientific functions
//!
//! Both are closed enums, so every key the keypad can produce maps to
//! exactly one arithmetic rule.

use std::f64::consts::{E, PI};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::numeral;
use super::{check_finite, CalcResult, DomainError};

/// Binary operator awaiting a second operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Addition (+)
    #[serde(rename = "+")]
    Add,
    /// Subtraction (-)
    #[serde(rename = "-")]
    Subtract,
    /// Multiplication (×)
    #[serde(rename = "×")]
    Multiply,
    /// Division (÷)
    #[serde(rename = "÷")]
    Divide,
}

impl BinaryOp {
    /// All operators in keypad order (top to bottom)
    pub const ALL: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Applies the operator to `a` and `b`
    ///
    /// Division by zero (either sign) is a domain error, as is any result
    /// that overflows to infinity.
    pub fn evaluate(self, a: f64, b: f64) -> CalcResult<f64> {
        let raw = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    return Err(DomainError::DivisionByZero);
                }
                a / b
            }
        };
        check_finite(raw)
    }

    /// History expression for `a op b`, e.g. `5 × 3`
    #[must_use]
    pub fn expression(self, a: f64, b: f64) -> String {
        format!(
            "{} {} {}",
            numeral::to_text(a),
            self.symbol(),
            numeral::to_text(b)
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Scientific functions applied to the current display value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScientificFn {
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
    /// Natural logarithm
    Ln,
    /// Base-10 logarithm
    Log,
    /// Square (x²)
    Square,
    /// Square root (√)
    Sqrt,
    /// The constant π
    Pi,
    /// Euler's number e
    E,
}

impl ScientificFn {
    /// All functions in scientific keypad order
    pub const ALL: [Self; 9] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Ln,
        Self::Log,
        Self::Pi,
        Self::E,
        Self::Square,
        Self::Sqrt,
    ];

    /// Keypad label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Square => "x²",
            Self::Sqrt => "√",
            Self::Pi => "π",
            Self::E => "e",
        }
    }

    /// Constants ignore the display and are not recorded in history
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        matches!(self, Self::Pi | Self::E)
    }

    /// Trigonometric functions honour the degree/radian mode
    #[must_use]
    pub const fn is_trigonometric(&self) -> bool {
        matches!(self, Self::Sin | Self::Cos | Self::Tan)
    }

    /// Computes the function for `input`
    ///
    /// Trigonometric inputs are taken as degrees when `degrees` is set.
    pub fn evaluate(self, input: f64, degrees: bool) -> CalcResult<f64> {
        let angle = if degrees { input * PI / 180.0 } else { input };
        let raw = match self {
            Self::Sin => angle.sin(),
            Self::Cos => angle.cos(),
            Self::Tan => angle.tan(),
            Self::Ln | Self::Log if input <= 0.0 => return Err(DomainError::LogOfNonPositive),
            Self::Ln => input.ln(),
            Self::Log => input.log10(),
            Self::Square => input * input,
            Self::Sqrt if input < 0.0 => return Err(DomainError::SqrtOfNegative),
            Self::Sqrt => input.sqrt(),
            Self::Pi => PI,
            Self::E => E,
        };
        check_finite(raw)
    }

    /// History expression in function-call style, e.g. `sin(45°)`, `(3)²`
    ///
    /// Constants have no expression.
    #[must_use]
    pub fn expression(self, input: f64, degrees: bool) -> Option<String> {
        let value = numeral::to_text(input);
        let expression = match self {
            Self::Sin | Self::Cos | Self::Tan => {
                let marker = if degrees { "°" } else { "" };
                format!("{}({value}{marker})", self.label())
            }
            Self::Ln | Self::Log => format!("{}({value})", self.label()),
            Self::Square => format!("({value})²"),
            Self::Sqrt => format!("√({value})"),
            Self::Pi | Self::E => return None,
        };
        Some(expression)
    }
}

impl fmt::Display for ScientificFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    // --- BinaryOp ---

    #[test]
    fn test_binary_symbols() {
        assert_eq!(BinaryOp::Add.symbol(), "+");
        assert_eq!(BinaryOp::Subtract.symbol(), "-");
        assert_eq!(BinaryOp::Multiply.symbol(), "×");
        assert_eq!(BinaryOp::Divide.symbol(), "÷");
        assert_eq!(BinaryOp::Divide.to_string(), "÷");
    }

    #[test]
    fn test_add() {
        assert_eq!(BinaryOp::Add.evaluate(2.0, 3.0), Ok(5.0));
        assert_eq!(BinaryOp::Add.evaluate(-2.0, 5.0), Ok(3.0));
        assert!(approx(BinaryOp::Add.evaluate(0.1, 0.2).unwrap(), 0.3));
    }

    #[test]
    fn test_subtract() {
        assert_eq!(BinaryOp::Subtract.evaluate(5.0, 3.0), Ok(2.0));
        assert_eq!(BinaryOp::Subtract.evaluate(3.0, 5.0), Ok(-2.0));
    }

    #[test]
    fn test_multiply() {
        assert_eq!(BinaryOp::Multiply.evaluate(-2.0, 3.0), Ok(-6.0));
        assert_eq!(BinaryOp::Multiply.evaluate(5.0, 0.0), Ok(0.0));
    }

    #[test]
    fn test_divide() {
        assert_eq!(BinaryOp::Divide.evaluate(6.0, 2.0), Ok(3.0));
        assert_eq!(BinaryOp::Divide.evaluate(0.0, 5.0), Ok(0.0));
        assert_eq!(BinaryOp::Divide.evaluate(1.0, 4.0), Ok(0.25));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            BinaryOp::Divide.evaluate(10.0, 0.0),
            Err(DomainError::DivisionByZero)
        );
        assert_eq!(
            BinaryOp::Divide.evaluate(10.0, -0.0),
            Err(DomainError::DivisionByZero)
        );
        assert_eq!(
            BinaryOp::Divide.evaluate(0.0, 0.0),
            Err(DomainError::DivisionByZero)
        );
    }

    #[test]
    fn test_overflow_is_domain_error() {
        assert_eq!(
            BinaryOp::Multiply.evaluate(1e300, 1e300),
            Err(DomainError::NonFinite)
        );
    }

    #[test]
    fn test_binary_expression() {
        assert_eq!(BinaryOp::Multiply.expression(5.0, 3.0), "5 × 3");
        assert_eq!(BinaryOp::Subtract.expression(-1.5, 0.25), "-1.5 - 0.25");
    }

    #[test]
    fn test_binary_serde_uses_symbols() {
        assert_eq!(serde_json::to_string(&BinaryOp::Multiply).unwrap(), "\"×\"");
        let op: BinaryOp = serde_json::from_str("\"÷\"").unwrap();
        assert_eq!(op, BinaryOp::Divide);
    }

    // --- ScientificFn ---

    #[test]
    fn test_labels() {
        let labels: Vec<&str> = ScientificFn::ALL.iter().map(ScientificFn::label).collect();
        assert_eq!(
            labels,
            vec!["sin", "cos", "tan", "ln", "log", "π", "e", "x²", "√"]
        );
    }

    #[test]
    fn test_constants() {
        assert!(ScientificFn::Pi.is_constant());
        assert!(ScientificFn::E.is_constant());
        assert!(!ScientificFn::Sqrt.is_constant());
        assert_eq!(ScientificFn::Pi.evaluate(123.0, true), Ok(PI));
        assert_eq!(ScientificFn::E.evaluate(-1.0, false), Ok(E));
    }

    #[test]
    fn test_sin_degrees() {
        let result = ScientificFn::Sin.evaluate(90.0, true).unwrap();
        assert!(approx(result, 1.0));
    }

    #[test]
    fn test_sin_radians() {
        let result = ScientificFn::Sin.evaluate(90.0, false).unwrap();
        assert!((result - 0.894).abs() < 1e-3);
    }

    #[test]
    fn test_cos_and_tan_degrees() {
        assert!(approx(ScientificFn::Cos.evaluate(60.0, true).unwrap(), 0.5));
        assert!(approx(ScientificFn::Tan.evaluate(45.0, true).unwrap(), 1.0));
    }

    #[test]
    fn test_logarithms() {
        assert_eq!(ScientificFn::Log.evaluate(100.0, true), Ok(2.0));
        assert!(approx(ScientificFn::Ln.evaluate(E, true).unwrap(), 1.0));
    }

    #[test]
    fn test_logarithm_domain() {
        assert_eq!(
            ScientificFn::Ln.evaluate(0.0, true),
            Err(DomainError::LogOfNonPositive)
        );
        assert_eq!(
            ScientificFn::Log.evaluate(-3.0, true),
            Err(DomainError::LogOfNonPositive)
        );
    }

    #[test]
    fn test_sqrt_and_square() {
        assert_eq!(ScientificFn::Sqrt.evaluate(9.0, true), Ok(3.0));
        assert_eq!(ScientificFn::Sqrt.evaluate(0.0, true), Ok(0.0));
        assert_eq!(
            ScientificFn::Sqrt.evaluate(-4.0, true),
            Err(DomainError::SqrtOfNegative)
        );
        assert_eq!(ScientificFn::Square.evaluate(-3.0, true), Ok(9.0));
        assert_eq!(
            ScientificFn::Square.evaluate(1e200, true),
            Err(DomainError::NonFinite)
        );
    }

    #[test]
    fn test_expressions() {
        assert_eq!(
            ScientificFn::Sin.expression(45.0, true).as_deref(),
            Some("sin(45°)")
        );
        assert_eq!(
            ScientificFn::Cos.expression(1.5, false).as_deref(),
            Some("cos(1.5)")
        );
        assert_eq!(
            ScientificFn::Ln.expression(2.5, true).as_deref(),
            Some("ln(2.5)")
        );
        assert_eq!(
            ScientificFn::Log.expression(100.0, false).as_deref(),
            Some("log(100)")
        );
        assert_eq!(
            ScientificFn::Square.expression(3.0, true).as_deref(),
            Some("(3)²")
        );
        assert_eq!(
            ScientificFn::Sqrt.expression(9.0, true).as_deref(),
            Some("√(9)")
        );
        assert_eq!(ScientificFn::Pi.expression(9.0, true), None);
        assert_eq!(ScientificFn::E.expression(9.0, true), None);
    }

    proptest! {
        #[test]
        fn prop_add_commutative(a in -1e10f64..1e10f64, b in -1e10f64..1e10f64) {
            prop_assert_eq!(BinaryOp::Add.evaluate(a, b), BinaryOp::Add.evaluate(b, a));
        }

        #[test]
        fn prop_multiply_commutative(a in -1e5f64..1e5f64, b in -1e5f64..1e5f64) {
            prop_assert_eq!(
                BinaryOp::Multiply.evaluate(a, b),
                BinaryOp::Multiply.evaluate(b, a)
            );
        }

        #[test]
        fn prop_divide_by_self(a in -1e10f64..1e10f64) {
            prop_assume!(a != 0.0);
            let result = BinaryOp::Divide.evaluate(a, a).unwrap();
            prop_assert!((result - 1.0).abs() < 1e-10);
        }

        #[test]
        fn prop_sqrt_of_square(a in 1e-50f64..1e100f64) {
            let squared = ScientificFn::Square.evaluate(a, true).unwrap();
            let root = ScientificFn::Sqrt.evaluate(squared, true).unwrap();
            prop_assert!((root - a).abs() <= a * 1e-12);
        }

        #[test]
        fn prop_trig_results_bounded(a in -1e6f64..1e6f64, degrees in any::<bool>()) {
            for f in [ScientificFn::Sin, ScientificFn::Cos] {
                let value = f.evaluate(a, degrees).unwrap();
                prop_assert!((-1.0..=1.0).contains(&value));
            }
        }
    }
}
