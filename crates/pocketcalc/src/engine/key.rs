//! Key identifiers accepted by the engine
//!
//! Error prevention: the key set is closed, so a front end can only forward
//! presses the engine knows how to handle.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::core::{BinaryOp, ScientificFn};

/// One logical key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Digit 0-9
    Digit(u8),
    /// Decimal point
    Decimal,
    /// Clear (C)
    Clear,
    /// Sign toggle (±)
    ToggleSign,
    /// Percent (%)
    Percent,
    /// Binary operator
    Operator(BinaryOp),
    /// Equals (=)
    Equals,
    /// Scientific function or constant
    Function(ScientificFn),
    /// Degree/radian toggle (DEG)
    ToggleAngleUnit,
    /// Open parenthesis, accepted but inert
    OpenParen,
    /// Close parenthesis, accepted but inert
    CloseParen,
}

/// Error returned when text does not name a key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key: {label:?}")]
pub struct KeyParseError {
    /// The rejected text
    pub label: String,
}

impl Key {
    /// Creates a digit key, `None` above 9
    #[must_use]
    pub const fn digit(d: u8) -> Option<Self> {
        if d <= 9 {
            Some(Self::Digit(d))
        } else {
            None
        }
    }

    /// Returns the keypad label
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Clear => "C".to_string(),
            Self::ToggleSign => "±".to_string(),
            Self::Percent => "%".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Function(f) => f.label().to_string(),
            Self::ToggleAngleUnit => "DEG".to_string(),
            Self::OpenParen => "(".to_string(),
            Self::CloseParen => ")".to_string(),
        }
    }

    /// Returns the text appended to the display for entry keys
    #[must_use]
    pub fn entry_char(&self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(*d), 10),
            Self::Decimal => Some('.'),
            _ => None,
        }
    }

    /// True for keys that only exist on the scientific keypad
    #[must_use]
    pub const fn is_scientific(&self) -> bool {
        matches!(
            self,
            Self::Function(_) | Self::ToggleAngleUnit | Self::OpenParen | Self::CloseParen
        )
    }

    /// Parses a whitespace-separated sequence of key labels
    pub fn parse_sequence(input: &str) -> Result<Vec<Self>, KeyParseError> {
        input.split_whitespace().map(str::parse).collect()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<BinaryOp> for Key {
    fn from(op: BinaryOp) -> Self {
        Self::Operator(op)
    }
}

impl From<ScientificFn> for Key {
    fn from(f: ScientificFn) -> Self {
        Self::Function(f)
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    /// Accepts keypad labels and their ASCII spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let key = match text {
            "." | "," => Self::Decimal,
            "C" | "c" | "AC" | "clear" => Self::Clear,
            "±" | "+/-" | "neg" => Self::ToggleSign,
            "%" => Self::Percent,
            "+" => Self::Operator(BinaryOp::Add),
            "-" | "−" => Self::Operator(BinaryOp::Subtract),
            "×" | "*" | "x" => Self::Operator(BinaryOp::Multiply),
            "÷" | "/" => Self::Operator(BinaryOp::Divide),
            "=" => Self::Equals,
            "sin" => Self::Function(ScientificFn::Sin),
            "cos" => Self::Function(ScientificFn::Cos),
            "tan" => Self::Function(ScientificFn::Tan),
            "ln" => Self::Function(ScientificFn::Ln),
            "log" => Self::Function(ScientificFn::Log),
            "π" | "pi" => Self::Function(ScientificFn::Pi),
            "e" => Self::Function(ScientificFn::E),
            "x²" | "x^2" | "sq" => Self::Function(ScientificFn::Square),
            "√" | "sqrt" => Self::Function(ScientificFn::Sqrt),
            "DEG" | "deg" | "RAD" | "rad" => Self::ToggleAngleUnit,
            "(" => Self::OpenParen,
            ")" => Self::CloseParen,
            _ => {
                let mut chars = text.chars();
                match (chars.next().and_then(|c| c.to_digit(10)), chars.next()) {
                    (Some(d), None) => Self::Digit(d as u8),
                    _ => {
                        return Err(KeyParseError {
                            label: text.to_string(),
                        })
                    }
                }
            }
        };
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_constructor() {
        assert_eq!(Key::digit(0), Some(Key::Digit(0)));
        assert_eq!(Key::digit(9), Some(Key::Digit(9)));
        assert_eq!(Key::digit(10), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Key::Digit(7).label(), "7");
        assert_eq!(Key::ToggleSign.label(), "±");
        assert_eq!(Key::Operator(BinaryOp::Multiply).label(), "×");
        assert_eq!(Key::Function(ScientificFn::Square).label(), "x²");
        assert_eq!(Key::ToggleAngleUnit.label(), "DEG");
        assert_eq!(Key::Equals.to_string(), "=");
    }

    #[test]
    fn test_entry_char() {
        assert_eq!(Key::Digit(3).entry_char(), Some('3'));
        assert_eq!(Key::Decimal.entry_char(), Some('.'));
        assert_eq!(Key::Digit(42).entry_char(), None);
        assert_eq!(Key::Equals.entry_char(), None);
    }

    #[test]
    fn test_is_scientific() {
        assert!(Key::Function(ScientificFn::Sin).is_scientific());
        assert!(Key::ToggleAngleUnit.is_scientific());
        assert!(Key::OpenParen.is_scientific());
        assert!(!Key::Digit(1).is_scientific());
        assert!(!Key::Percent.is_scientific());
        assert!(!Key::Operator(BinaryOp::Add).is_scientific());
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("5".parse::<Key>(), Ok(Key::Digit(5)));
        assert_eq!("×".parse::<Key>(), Ok(Key::Operator(BinaryOp::Multiply)));
        assert_eq!("÷".parse::<Key>(), Ok(Key::Operator(BinaryOp::Divide)));
        assert_eq!("√".parse::<Key>(), Ok(Key::Function(ScientificFn::Sqrt)));
        assert_eq!("π".parse::<Key>(), Ok(Key::Function(ScientificFn::Pi)));
        assert_eq!("DEG".parse::<Key>(), Ok(Key::ToggleAngleUnit));
    }

    #[test]
    fn test_parse_ascii_aliases() {
        assert_eq!("*".parse::<Key>(), Ok(Key::Operator(BinaryOp::Multiply)));
        assert_eq!("/".parse::<Key>(), Ok(Key::Operator(BinaryOp::Divide)));
        assert_eq!("sqrt".parse::<Key>(), Ok(Key::Function(ScientificFn::Sqrt)));
        assert_eq!("x^2".parse::<Key>(), Ok(Key::Function(ScientificFn::Square)));
        assert_eq!("pi".parse::<Key>(), Ok(Key::Function(ScientificFn::Pi)));
        assert_eq!("+/-".parse::<Key>(), Ok(Key::ToggleSign));
        assert_eq!("rad".parse::<Key>(), Ok(Key::ToggleAngleUnit));
    }

    #[test]
    fn test_every_label_round_trips() {
        let mut keys: Vec<Key> = (0..=9).map(Key::Digit).collect();
        keys.extend([
            Key::Decimal,
            Key::Clear,
            Key::ToggleSign,
            Key::Percent,
            Key::Equals,
            Key::ToggleAngleUnit,
            Key::OpenParen,
            Key::CloseParen,
        ]);
        keys.extend(BinaryOp::ALL.map(Key::Operator));
        keys.extend(ScientificFn::ALL.map(Key::Function));
        for key in keys {
            assert_eq!(key.label().parse::<Key>(), Ok(key), "label {}", key.label());
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "12".parse::<Key>().unwrap_err();
        assert_eq!(err.label, "12");
        assert!(err.to_string().contains("unknown key"));
        assert!("asin".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
    }

    #[test]
    fn test_parse_sequence() {
        let keys = Key::parse_sequence("2 + 3 × 4 =").unwrap();
        assert_eq!(keys.len(), 6);
        assert_eq!(keys[1], Key::Operator(BinaryOp::Add));
        assert_eq!(keys[5], Key::Equals);
        assert!(Key::parse_sequence("2 ? 3").is_err());
    }
}
