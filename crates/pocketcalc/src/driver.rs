//! Unified calculator driver
//!
//! Write the behavioural checks once and run them against any front end:
//! a front end implements [`CalculatorDriver`] and hands itself to the
//! `verify_*` routines, which assert the calculator's observable contract.
//!
//! # Example
//!
//! ```
//! use pocketcalc::driver::{run_all_checks, SessionDriver};
//!
//! let mut driver = SessionDriver::new();
//! run_all_checks(&mut driver);
//! ```

use crate::core::{numeral, BinaryOp, ERROR_MARKER};
use crate::engine::Key;
use crate::session::Session;

/// Front-end interface used by the verification routines
pub trait CalculatorDriver {
    /// Presses keys in order
    fn press_keys(&mut self, keys: &[Key]);

    /// Text currently on the display
    fn display(&self) -> String;

    /// Operator shown as active, if any
    fn operator(&self) -> Option<BinaryOp>;

    /// Trigonometric input in degrees
    fn is_degrees(&self) -> bool;

    /// History entries, newest first
    fn history(&self) -> Vec<HistoryItem>;

    /// Presses `C`
    fn clear(&mut self);
}

/// A history entry as seen by a driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// The evaluated expression
    pub expression: String,
    /// The result numeral
    pub result: String,
}

/// Driver backed by an in-process [`Session`]
#[derive(Debug, Clone, Default)]
pub struct SessionDriver {
    session: Session,
}

impl SessionDriver {
    /// Creates a driver around a fresh session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver around an existing session
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self { session }
    }

    /// Returns the underlying session
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the underlying session mutably
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }
}

impl CalculatorDriver for SessionDriver {
    fn press_keys(&mut self, keys: &[Key]) {
        self.session.press_all(keys.iter().copied());
    }

    fn display(&self) -> String {
        self.session.display().to_string()
    }

    fn operator(&self) -> Option<BinaryOp> {
        self.session.keypad().active_operator()
    }

    fn is_degrees(&self) -> bool {
        self.session.state().is_degrees()
    }

    fn history(&self) -> Vec<HistoryItem> {
        self.session
            .state()
            .history()
            .iter()
            .map(|entry| HistoryItem {
                expression: entry.expression.clone(),
                result: entry.result.clone(),
            })
            .collect()
    }

    fn clear(&mut self) {
        self.session.press(Key::Clear);
    }
}

// ===== Unified verification routines =====
// These work with ANY CalculatorDriver implementation

/// Key sequence from fixed keypad labels
fn keys(sequence: &str) -> Vec<Key> {
    Key::parse_sequence(sequence).unwrap_or_default()
}

fn enter<D: CalculatorDriver>(driver: &mut D, sequence: &str) -> String {
    driver.press_keys(&keys(sequence));
    driver.display()
}

fn display_value<D: CalculatorDriver>(driver: &D) -> f64 {
    numeral::parse(&driver.display()).unwrap_or(f64::NAN)
}

/// Left-to-right evaluation without precedence, operator highlighting
pub fn verify_sequential_evaluation<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert_eq!(enter(driver, "2 + 3 × 4 ="), "20");
    driver.clear();

    assert_eq!(enter(driver, "1 0 - 4 ÷ 2 ="), "3");
    driver.clear();

    enter(driver, "5 ×");
    assert_eq!(driver.operator(), Some(BinaryOp::Multiply));
    assert_eq!(enter(driver, "3 ="), "15");
    assert_eq!(driver.operator(), None);

    let latest = driver.history().into_iter().next();
    assert_eq!(
        latest,
        Some(HistoryItem {
            expression: "5 × 3".into(),
            result: "15".into(),
        })
    );
    driver.clear();
}

/// Division by zero, logarithm and square root domains
pub fn verify_domain_errors<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    let before = driver.history();

    assert_eq!(enter(driver, "5 ÷ 0 ="), ERROR_MARKER);
    driver.clear();
    assert_eq!(enter(driver, "4 ± √"), ERROR_MARKER);
    driver.clear();
    assert_eq!(enter(driver, "0 ln"), ERROR_MARKER);
    driver.clear();
    assert_eq!(enter(driver, "0 log"), ERROR_MARKER);
    assert_eq!(driver.history(), before, "domain errors must not touch history");
    driver.clear();

    assert_eq!(enter(driver, "1 0 0 log"), "2");
    driver.clear();

    // Error recovers with fresh digit entry
    enter(driver, "1 ÷ 0 =");
    assert_eq!(enter(driver, "7"), "7");
    driver.clear();
}

/// History keeps the ten most recent entries, newest first
pub fn verify_history_cap<D: CalculatorDriver>(driver: &mut D) {
    for i in 1..=12 {
        driver.clear();
        let digits: Vec<String> = i.to_string().chars().map(String::from).collect();
        enter(driver, &format!("{} + 1 =", digits.join(" ")));
    }
    driver.clear();

    let history = driver.history();
    assert_eq!(history.len(), 10);
    assert_eq!(history[0].expression, "12 + 1");
    assert_eq!(history[0].result, "13");
    assert_eq!(history[9].expression, "3 + 1");
    assert!(history.iter().all(|item| item.expression != "1 + 1"));
    assert!(history.iter().all(|item| item.expression != "2 + 1"));
}

/// A second decimal point is ignored
pub fn verify_decimal_guard<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert_eq!(enter(driver, "1 . 2 ."), "1.2");
    driver.clear();
    assert_eq!(enter(driver, ". 5"), "0.5");
    driver.clear();
}

/// Trigonometry honours the degree/radian toggle
pub fn verify_angle_units<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    if !driver.is_degrees() {
        driver.press_keys(&[Key::ToggleAngleUnit]);
    }

    enter(driver, "9 0 sin");
    assert!((display_value(driver) - 1.0).abs() < 1e-12);
    driver.clear();

    driver.press_keys(&[Key::ToggleAngleUnit]);
    assert!(!driver.is_degrees());
    enter(driver, "9 0 sin");
    assert!((display_value(driver) - 0.893_996_663_600_557_9).abs() < 1e-9);

    let display = driver.display();
    driver.press_keys(&[Key::ToggleAngleUnit, Key::ToggleAngleUnit]);
    assert_eq!(driver.display(), display);
    assert!(!driver.is_degrees());

    driver.press_keys(&[Key::ToggleAngleUnit]);
    assert!(driver.is_degrees());
    driver.clear();
}

/// Complete verification suite
pub fn run_all_checks<D: CalculatorDriver>(driver: &mut D) {
    verify_sequential_evaluation(driver);
    verify_domain_errors(driver);
    verify_history_cap(driver);
    verify_decimal_guard(driver);
    verify_angle_units(driver);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Feature;

    #[test]
    fn test_session_driver_new() {
        let driver = SessionDriver::new();
        assert_eq!(driver.display(), "0");
        assert!(driver.history().is_empty());
        assert!(driver.is_degrees());
    }

    #[test]
    fn test_session_driver_press_keys() {
        let mut driver = SessionDriver::new();
        driver.press_keys(&[Key::Digit(4), Key::Operator(BinaryOp::Add)]);
        assert_eq!(driver.operator(), Some(BinaryOp::Add));
        driver.press_keys(&[Key::Digit(4), Key::Equals]);
        assert_eq!(driver.display(), "8");
        assert_eq!(driver.history().len(), 1);
    }

    #[test]
    fn test_session_driver_clear_keeps_history() {
        let mut driver = SessionDriver::new();
        enter(&mut driver, "2 × 2 =");
        driver.clear();
        assert_eq!(driver.display(), "0");
        assert_eq!(driver.history().len(), 1);
    }

    #[test]
    fn test_session_driver_with_session() {
        let mut session = Session::new();
        session.select_feature(Feature::AngleUnit);
        let mut driver = SessionDriver::with_session(session);
        assert!(!driver.is_degrees());
        driver.session_mut().select_feature(Feature::AngleUnit);
        assert!(driver.session().state().is_degrees());
    }

    #[test]
    fn test_fixed_sequences_parse() {
        assert_eq!(keys("1 0 - 4 ÷ 2 =").len(), 7);
        assert_eq!(keys("4 ± √").len(), 3);
        assert!(keys("").is_empty());
    }

    // ===== Shared behaviour checks =====

    #[test]
    fn test_unified_sequential_evaluation() {
        verify_sequential_evaluation(&mut SessionDriver::new());
    }

    #[test]
    fn test_unified_domain_errors() {
        verify_domain_errors(&mut SessionDriver::new());
    }

    #[test]
    fn test_unified_history_cap() {
        verify_history_cap(&mut SessionDriver::new());
    }

    #[test]
    fn test_unified_decimal_guard() {
        verify_decimal_guard(&mut SessionDriver::new());
    }

    #[test]
    fn test_unified_angle_units() {
        verify_angle_units(&mut SessionDriver::new());
    }

    #[test]
    fn test_unified_angle_units_from_radians() {
        let mut driver = SessionDriver::new();
        driver.press_keys(&[Key::ToggleAngleUnit]);
        verify_angle_units(&mut driver);
    }

    #[test]
    fn test_all_checks() {
        let mut driver = SessionDriver::new();
        run_all_checks(&mut driver);
        // Twice on the same driver: state left behind must not matter
        run_all_checks(&mut driver);
    }

    #[test]
    fn test_history_item_clone() {
        let item = HistoryItem {
            expression: "1 + 1".into(),
            result: "2".into(),
        };
        assert_eq!(item.clone(), item);
    }
}
