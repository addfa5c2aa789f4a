//! Engine state snapshot
//!
//! Error prevention: fields are private and only the transition functions
//! in [`crate::engine`] build new snapshots, so the invariants below cannot
//! be broken from outside the crate:
//!
//! - the readout is a finite numeral or a domain error;
//! - a pending operator always has a captured first operand;
//! - history holds at most [`History::DEFAULT_CAPACITY`] entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::history::{History, HistoryEntry};
use crate::core::{numeral, BinaryOp, CalcResult, DomainError, ERROR_MARKER};

/// What the display currently shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Readout {
    /// Numeral text, exactly as typed or computed
    Number(String),
    /// A domain error, shown as the error marker
    Error(DomainError),
}

impl Readout {
    /// Builds a readout from a computation result
    #[must_use]
    pub fn from_result(result: CalcResult<f64>) -> Self {
        match result {
            Ok(value) if value.is_finite() => Self::Number(numeral::to_text(value)),
            Ok(_) => Self::Error(DomainError::NonFinite),
            Err(err) => Self::Error(err),
        }
    }

    /// Display text: the numeral, or `"Error"`
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Number(text) => text,
            Self::Error(_) => ERROR_MARKER,
        }
    }

    /// Numeric value, `None` while an error is shown
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(text) => numeral::parse(text),
            Self::Error(_) => None,
        }
    }

    /// The domain error being shown, if any
    #[must_use]
    pub const fn error(&self) -> Option<DomainError> {
        match self {
            Self::Number(_) => None,
            Self::Error(err) => Some(*err),
        }
    }

    /// True while an error is shown
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl Default for Readout {
    fn default() -> Self {
        Self::Number("0".to_string())
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// The calculator state, replaced wholesale on every key press
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    pub(crate) readout: Readout,
    pub(crate) first_operand: Option<f64>,
    pub(crate) operator: Option<BinaryOp>,
    pub(crate) waiting_for_second_operand: bool,
    pub(crate) pending_clear: bool,
    pub(crate) history: History,
    pub(crate) is_scientific: bool,
    pub(crate) is_degrees: bool,
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineState {
    /// Initial state: display `0`, basic keypad, degrees
    #[must_use]
    pub fn new() -> Self {
        Self {
            readout: Readout::default(),
            first_operand: None,
            operator: None,
            waiting_for_second_operand: false,
            pending_clear: false,
            history: History::new(),
            is_scientific: false,
            is_degrees: true,
        }
    }

    /// Sets the starting display value
    #[must_use]
    pub fn with_display(mut self, value: f64) -> Self {
        self.readout = Readout::from_result(Ok(value));
        self
    }

    /// Sets scientific mode
    #[must_use]
    pub const fn with_scientific(mut self, scientific: bool) -> Self {
        self.is_scientific = scientific;
        self
    }

    /// Sets the angle unit for trigonometric functions
    #[must_use]
    pub const fn with_degrees(mut self, degrees: bool) -> Self {
        self.is_degrees = degrees;
        self
    }

    /// Display readout
    #[must_use]
    pub fn readout(&self) -> &Readout {
        &self.readout
    }

    /// Display text, a numeral or `"Error"`
    #[must_use]
    pub fn display(&self) -> &str {
        self.readout.text()
    }

    /// Captured first operand
    #[must_use]
    pub const fn first_operand(&self) -> Option<f64> {
        self.first_operand
    }

    /// Pending binary operator, highlighted on the keypad
    #[must_use]
    pub const fn operator(&self) -> Option<BinaryOp> {
        self.operator
    }

    /// Next digit starts a fresh number
    #[must_use]
    pub const fn waiting_for_second_operand(&self) -> bool {
        self.waiting_for_second_operand
    }

    /// `=` was just pressed
    #[must_use]
    pub const fn pending_clear(&self) -> bool {
        self.pending_clear
    }

    /// Past computations, newest first
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Scientific keypad shown
    #[must_use]
    pub const fn is_scientific(&self) -> bool {
        self.is_scientific
    }

    /// Trigonometric input is in degrees
    #[must_use]
    pub const fn is_degrees(&self) -> bool {
        self.is_degrees
    }

    /// Serializable view for front ends and JSON output
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            display: self.display().to_string(),
            error: self.readout.error(),
            first_operand: self.first_operand,
            operator: self.operator,
            waiting_for_second_operand: self.waiting_for_second_operand,
            pending_clear: self.pending_clear,
            is_scientific: self.is_scientific,
            is_degrees: self.is_degrees,
            history: self.history.iter().cloned().collect(),
        }
    }

    /// Numeric fields reset, history and modes kept
    pub(crate) fn cleared(self) -> Self {
        Self {
            readout: Readout::default(),
            first_operand: None,
            operator: None,
            waiting_for_second_operand: false,
            pending_clear: false,
            ..self
        }
    }
}

/// Plain-data copy of an [`EngineState`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Display text
    pub display: String,
    /// Cause of the error marker, if shown
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<DomainError>,
    /// Captured first operand
    pub first_operand: Option<f64>,
    /// Pending operator
    pub operator: Option<BinaryOp>,
    /// Next digit starts a fresh number
    pub waiting_for_second_operand: bool,
    /// `=` was just pressed
    pub pending_clear: bool,
    /// Scientific keypad shown
    pub is_scientific: bool,
    /// Trigonometric input in degrees
    pub is_degrees: bool,
    /// History, newest first
    pub history: Vec<HistoryEntry>,
}
