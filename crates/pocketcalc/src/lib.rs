//! pocketcalc - a pocket calculator engine
//!
//! A keypad feeds single-operation arithmetic (`+ - × ÷`) and a set of
//! scientific functions (`sin cos tan ln log x² √ π e`) through a
//! sequential evaluator. There is no expression parser: keys are applied
//! one at a time, left to right, exactly like a physical calculator.
//!
//! # Layers
//!
//! - [`core`]: operators, scientific functions, numeral text, history
//! - [`engine`]: the pure `apply(state, key) -> state` transition function
//! - [`keypad`] and [`display`]: layout and formatting for front ends
//! - [`session`]: engine state plus presentation flags and the feature menu
//! - [`driver`]: front-end trait and reusable behavioural checks
//!
//! # Example
//!
//! ```rust
//! use pocketcalc::prelude::*;
//!
//! let mut session = Session::new();
//! for label in ["2", "+", "3", "×", "4", "="] {
//!     session.press_label(label).unwrap();
//! }
//! assert_eq!(session.display(), "20");
//! assert_eq!(session.history_text(), "5 × 4 = 20\n2 + 3 = 5");
//!
//! // Scientific keys need the scientific keypad
//! assert!(session.press_label("sin").is_err());
//! session.select_feature(Feature::Scientific);
//! session.press_label("sin").unwrap();
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod display;
pub mod driver;
pub mod engine;
pub mod keypad;
pub mod session;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::{BinaryOp, CalcResult, DomainError, ScientificFn, ERROR_MARKER};
    pub use crate::display::{format_display, DisplayWidth};
    pub use crate::driver::{CalculatorDriver, HistoryItem, SessionDriver};
    pub use crate::engine::{
        apply, apply_at, select_history, toggle_scientific, EngineState, Key, KeyParseError,
        Readout, StateSnapshot,
    };
    pub use crate::keypad::{ButtonKind, Keypad, KeypadButton};
    pub use crate::session::{Feature, FeatureItem, Session, SessionError, SessionResult};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_reexports() {
        let state = apply(EngineState::new(), Key::Digit(3));
        assert_eq!(state.display(), "3");
        assert_eq!(format_display(state.display(), DisplayWidth::Compact), "3");
        assert_eq!(ERROR_MARKER, "Error");
    }

    #[test]
    fn test_session_and_engine_agree() {
        let keys = Key::parse_sequence("7 × 6 - 2 =").unwrap();
        let mut session = Session::new();
        session.press_all(keys.iter().copied());
        let state = keys
            .into_iter()
            .fold(EngineState::new(), |s, k| apply_at(s, k, 0));
        assert_eq!(session.display(), state.display());
        assert_eq!(session.display(), "40");
    }
}
