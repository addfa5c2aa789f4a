//! Calculator engine: a pure single-step state machine
//!
//! [`apply`] takes the current [`EngineState`] and one [`Key`] and returns
//! the next state. Keys are processed strictly left to right with no
//! operator precedence, the way a pocket calculator works: `2 + 3 × 4 =`
//! is `(2 + 3) × 4`.
//!
//! The engine never fails. Domain errors (division by zero, logarithm of a
//! non-positive number, square root of a negative number, non-finite
//! results) replace the display with the error marker and end the current
//! computation chain without touching history.
//!
//! # Example
//!
//! ```
//! use pocketcalc::engine::{apply, EngineState, Key};
//!
//! let state = Key::parse_sequence("2 + 3 × 4 =")
//!     .unwrap()
//!     .into_iter()
//!     .fold(EngineState::new(), apply);
//! assert_eq!(state.display(), "20");
//! assert_eq!(state.history().len(), 2);
//! ```

pub mod key;
mod state;

pub use key::{Key, KeyParseError};
pub use state::{EngineState, Readout, StateSnapshot};

use crate::core::history::current_timestamp;
use crate::core::{BinaryOp, ScientificFn};

/// Applies one key press, stamping any history entry with the wall clock
#[must_use]
pub fn apply(state: EngineState, key: Key) -> EngineState {
    apply_at(state, key, current_timestamp())
}

/// Applies one key press with an explicit history timestamp (epoch millis)
#[must_use]
pub fn apply_at(state: EngineState, key: Key, timestamp: u64) -> EngineState {
    match key {
        Key::Digit(_) | Key::Decimal => enter(state, key),
        Key::Clear => state.cleared(),
        Key::ToggleSign => map_display(state, |value| -1.0 * value),
        Key::Percent => map_display(state, |value| value / 100.0),
        Key::Operator(op) => press_operator(state, op, timestamp),
        Key::Equals => press_equals(state, timestamp),
        Key::Function(function) => apply_function(state, function, timestamp),
        Key::ToggleAngleUnit => EngineState {
            is_degrees: !state.is_degrees,
            ..state
        },
        Key::OpenParen | Key::CloseParen => state,
    }
}

/// Recalls a history entry's result onto the display
///
/// `index` 0 is the most recent entry. An index past the end leaves the
/// state unchanged.
#[must_use]
pub fn select_history(state: EngineState, index: usize) -> EngineState {
    let Some(result) = state.history.get(index).map(|entry| entry.result.clone()) else {
        return state;
    };
    EngineState {
        readout: Readout::Number(result),
        waiting_for_second_operand: true,
        ..state
    }
}

/// Switches between the basic and scientific keypads
#[must_use]
pub fn toggle_scientific(state: EngineState) -> EngineState {
    EngineState {
        is_scientific: !state.is_scientific,
        ..state
    }
}

fn enter(mut state: EngineState, key: Key) -> EngineState {
    let Some(ch) = key.entry_char() else {
        return state;
    };
    let fresh =
        state.waiting_for_second_operand || state.pending_clear || state.readout.is_error();
    if fresh {
        let text = if ch == '.' {
            "0.".to_string()
        } else {
            ch.to_string()
        };
        state.readout = Readout::Number(text);
        state.waiting_for_second_operand = false;
        state.pending_clear = false;
        return state;
    }

    let current = state.display().to_string();
    let next = if current == "0" && ch != '.' {
        ch.to_string()
    } else if ch == '.' && current.contains('.') {
        return state;
    } else {
        format!("{current}{ch}")
    };
    // Appending to an exponent form can leave text that is no longer a
    // finite numeral ("1e-7." or "1e+308" + digits)
    if crate::core::numeral::parse(&next).is_none() {
        return state;
    }
    state.readout = Readout::Number(next);
    state
}

fn map_display(mut state: EngineState, f: impl FnOnce(f64) -> f64) -> EngineState {
    if let Some(value) = state.readout.value() {
        state.readout = Readout::from_result(Ok(f(value)));
    }
    state
}

fn press_operator(mut state: EngineState, next: BinaryOp, timestamp: u64) -> EngineState {
    let Some(input) = state.readout.value() else {
        return state;
    };
    match (state.first_operand, state.operator) {
        (None, _) => {
            state.first_operand = Some(input);
            state.operator = Some(next);
            state.waiting_for_second_operand = true;
        }
        (Some(first), Some(pending)) => {
            state = evaluate_pending(state, first, pending, input, timestamp);
            if !state.readout.is_error() {
                state.operator = Some(next);
            }
            state.waiting_for_second_operand = true;
        }
        // Operand kept from `=` with no operator: nothing to chain onto
        (Some(_), None) => {}
    }
    state
}

fn press_equals(mut state: EngineState, timestamp: u64) -> EngineState {
    let (Some(first), Some(pending)) = (state.first_operand, state.operator) else {
        return state;
    };
    let Some(input) = state.readout.value() else {
        return state;
    };
    state = evaluate_pending(state, first, pending, input, timestamp);
    state.operator = None;
    state.waiting_for_second_operand = true;
    state.pending_clear = true;
    state
}

/// Evaluates `first <pending> input`, recording history on success
///
/// On a domain error the operand and operator are dropped so the chain
/// restarts from the next number typed.
fn evaluate_pending(
    mut state: EngineState,
    first: f64,
    pending: BinaryOp,
    input: f64,
    timestamp: u64,
) -> EngineState {
    match pending.evaluate(first, input) {
        Ok(result) => {
            state.readout = Readout::from_result(Ok(result));
            state.first_operand = Some(result);
            state.history.record(
                pending.expression(first, input),
                state.readout.text(),
                timestamp,
            );
        }
        Err(err) => {
            state.readout = Readout::Error(err);
            state.first_operand = None;
            state.operator = None;
        }
    }
    state
}

fn apply_function(mut state: EngineState, function: ScientificFn, timestamp: u64) -> EngineState {
    let input = if function.is_constant() {
        0.0
    } else {
        match state.readout.value() {
            Some(value) => value,
            None => return state,
        }
    };

    match function.evaluate(input, state.is_degrees) {
        Ok(result) => {
            state.readout = Readout::from_result(Ok(result));
            state.waiting_for_second_operand = true;
            if let Some(expression) = function.expression(input, state.is_degrees) {
                state
                    .history
                    .record(expression, state.readout.text(), timestamp);
            }
        }
        Err(err) => state.readout = Readout::Error(err),
    }
    state
}
