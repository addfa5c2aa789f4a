//! Presentation-facing calculator session
//!
//! A [`Session`] owns the engine state plus the flags only a front end
//! cares about (history panel visibility), exposes the feature menu and
//! logs every transition.

use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

use crate::engine::{self, EngineState, Key, KeyParseError};
use crate::keypad::Keypad;

/// Errors raised by session commands
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Text that names no key
    #[error(transparent)]
    InvalidKey(#[from] KeyParseError),
    /// A scientific key pressed while the basic keypad is shown
    #[error("key {key} is only available in scientific mode")]
    KeyUnavailable {
        /// The rejected key
        key: Key,
    },
    /// History index past the last entry
    #[error("no history entry at index {index} ({len} entries)")]
    NoSuchEntry {
        /// Requested index, 0 = most recent
        index: usize,
        /// Entries currently kept
        len: usize,
    },
}

/// Result type for session commands
pub type SessionResult<T> = Result<T, SessionError>;

/// Entries of the feature menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Show or hide the scientific keypad
    Scientific,
    /// Show or hide the history panel
    History,
    /// Switch between degrees and radians
    AngleUnit,
}

impl Feature {
    /// Menu order
    pub const ALL: [Self; 3] = [Self::Scientific, Self::History, Self::AngleUnit];

    /// Stable identifier
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Scientific => "scientific",
            Self::History => "history",
            Self::AngleUnit => "degrees",
        }
    }
}

/// A feature menu entry as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureItem {
    /// Which feature the entry toggles
    pub feature: Feature,
    /// Menu text
    pub label: &'static str,
}

impl fmt::Display for FeatureItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Engine state plus presentation flags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    state: EngineState,
    history_visible: bool,
}

impl Session {
    /// Creates a session with the initial engine state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session around an existing state
    #[must_use]
    pub fn with_state(state: EngineState) -> Self {
        Self {
            state,
            history_visible: false,
        }
    }

    /// Current engine state
    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.state.display()
    }

    /// Keypad for the current mode, with active operator and angle unit
    #[must_use]
    pub fn keypad(&self) -> Keypad {
        Keypad::for_state(&self.state)
    }

    /// Applies one key
    pub fn press(&mut self, key: Key) -> &EngineState {
        let state = std::mem::take(&mut self.state);
        let was_error = state.readout().is_error();
        self.state = engine::apply(state, key);

        debug!(
            key = %key,
            display = %self.state.display(),
            operator = ?self.state.operator(),
            "key applied"
        );
        if let Some(err) = self.state.readout().error() {
            if !was_error {
                warn!(key = %key, error = %err, "domain error");
            }
        }
        &self.state
    }

    /// Applies a sequence of keys in order
    pub fn press_all<I>(&mut self, keys: I) -> &EngineState
    where
        I: IntoIterator<Item = Key>,
    {
        for key in keys {
            self.press(key);
        }
        &self.state
    }

    /// Parses a key label and applies it
    ///
    /// Scientific keys are rejected while the basic keypad is shown.
    pub fn press_label(&mut self, label: &str) -> SessionResult<&EngineState> {
        let key: Key = label.parse()?;
        if key.is_scientific() && !self.state.is_scientific() {
            debug!(key = %key, "scientific key rejected in basic mode");
            return Err(SessionError::KeyUnavailable { key });
        }
        Ok(self.press(key))
    }

    /// Feature menu with labels matching the current mode
    #[must_use]
    pub fn features(&self) -> Vec<FeatureItem> {
        Feature::ALL
            .into_iter()
            .map(|feature| FeatureItem {
                feature,
                label: self.feature_label(feature),
            })
            .collect()
    }

    fn feature_label(&self, feature: Feature) -> &'static str {
        match feature {
            Feature::Scientific => "Scientific Calculator",
            Feature::History => "Calculation History",
            Feature::AngleUnit if self.state.is_degrees() => "Switch to Radians",
            Feature::AngleUnit => "Switch to Degrees",
        }
    }

    /// Toggles the flag behind a feature menu entry
    pub fn select_feature(&mut self, feature: Feature) {
        match feature {
            Feature::Scientific => {
                let state = std::mem::take(&mut self.state);
                self.state = engine::toggle_scientific(state);
            }
            Feature::History => self.toggle_history(),
            Feature::AngleUnit => {
                self.press(Key::ToggleAngleUnit);
            }
        }
        debug!(feature = feature.id(), "feature selected");
    }

    /// True while the history panel is open
    #[must_use]
    pub const fn history_visible(&self) -> bool {
        self.history_visible
    }

    /// Opens or closes the history panel
    pub fn toggle_history(&mut self) {
        self.history_visible = !self.history_visible;
    }

    /// Closes the history panel
    pub fn close_history(&mut self) {
        self.history_visible = false;
    }

    /// Recalls history entry `index` (0 = most recent) and closes the panel
    pub fn select_history(&mut self, index: usize) -> SessionResult<&EngineState> {
        let len = self.state.history().len();
        if index >= len {
            return Err(SessionError::NoSuchEntry { index, len });
        }
        let state = std::mem::take(&mut self.state);
        self.state = engine::select_history(state, index);
        self.history_visible = false;
        debug!(index, display = %self.state.display(), "history entry selected");
        Ok(&self.state)
    }

    /// History as `expression = result` lines, newest first
    #[must_use]
    pub fn history_text(&self) -> String {
        self.state.history().export_formatted()
    }

    /// History as a JSON array, newest first
    pub fn history_json(&self) -> Result<String, serde_json::Error> {
        self.state.history().to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BinaryOp;

    fn session_with(labels: &str) -> Session {
        let mut session = Session::new();
        for label in labels.split_whitespace() {
            session.press_label(label).unwrap();
        }
        session
    }

    #[test]
    fn test_new_session() {
        let session = Session::new();
        assert_eq!(session.display(), "0");
        assert!(!session.history_visible());
        assert!(!session.state().is_scientific());
    }

    #[test]
    fn test_press_label() {
        let session = session_with("1 2 × 3 =");
        assert_eq!(session.display(), "36");
        assert_eq!(session.history_text(), "12 × 3 = 36");
    }

    #[test]
    fn test_press_label_invalid() {
        let mut session = Session::new();
        let err = session.press_label("foo").unwrap_err();
        assert!(matches!(err, SessionError::InvalidKey(_)));
        assert_eq!(err.to_string(), "unknown key: \"foo\"");
    }

    #[test]
    fn test_scientific_key_rejected_in_basic_mode() {
        let mut session = Session::new();
        let err = session.press_label("sin").unwrap_err();
        assert!(matches!(err, SessionError::KeyUnavailable { .. }));
        assert!(err.to_string().contains("scientific mode"));
        assert_eq!(session.display(), "0");

        session.select_feature(Feature::Scientific);
        assert!(session.press_label("π").is_ok());
        assert_eq!(session.display(), "3.141592653589793");
    }

    #[test]
    fn test_press_all() {
        let mut session = Session::new();
        let state = session.press_all([Key::Digit(6), BinaryOp::Divide.into(), Key::Digit(4)]);
        assert_eq!(state.display(), "4");
        assert_eq!(state.operator(), Some(BinaryOp::Divide));
    }

    #[test]
    fn test_domain_error_surfaces_as_marker() {
        let session = session_with("5 ÷ 0 =");
        assert_eq!(session.display(), "Error");
        assert!(session.state().history().is_empty());
    }

    #[test]
    fn test_features_labels() {
        let mut session = Session::new();
        let labels: Vec<&str> = session.features().iter().map(|f| f.label).collect();
        assert_eq!(
            labels,
            vec!["Scientific Calculator", "Calculation History", "Switch to Radians"]
        );
        session.select_feature(Feature::AngleUnit);
        assert!(!session.state().is_degrees());
        assert_eq!(session.features()[2].label, "Switch to Degrees");
        assert_eq!(session.features()[2].to_string(), "Switch to Degrees");
    }

    #[test]
    fn test_select_feature_toggles() {
        let mut session = Session::new();
        session.select_feature(Feature::Scientific);
        assert!(session.state().is_scientific());
        assert!(session.keypad().is_scientific());
        session.select_feature(Feature::History);
        assert!(session.history_visible());
        session.select_feature(Feature::History);
        assert!(!session.history_visible());
        session.select_feature(Feature::Scientific);
        assert!(!session.state().is_scientific());
    }

    #[test]
    fn test_feature_ids() {
        let ids: Vec<&str> = Feature::ALL.iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec!["scientific", "history", "degrees"]);
    }

    #[test]
    fn test_history_panel() {
        let mut session = Session::new();
        session.toggle_history();
        assert!(session.history_visible());
        session.close_history();
        assert!(!session.history_visible());
        session.close_history();
        assert!(!session.history_visible());
    }

    #[test]
    fn test_select_history_closes_panel() {
        let mut session = session_with("2 + 3 = C 7 × 6 = C");
        session.toggle_history();
        let state = session.select_history(1).unwrap();
        assert_eq!(state.display(), "5");
        assert!(state.waiting_for_second_operand());
        assert!(!session.history_visible());
    }

    #[test]
    fn test_select_history_out_of_range() {
        let mut session = session_with("2 + 3 =");
        session.toggle_history();
        let err = session.select_history(3).unwrap_err();
        assert_eq!(err, SessionError::NoSuchEntry { index: 3, len: 1 });
        assert!(session.history_visible());
        assert_eq!(session.display(), "5");
    }

    #[test]
    fn test_history_json() {
        let session = session_with("9 - 4 =");
        let json = session.history_json().unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"expression\":\"9 - 4\""));
        assert!(json.contains("\"result\":\"5\""));
    }

    #[test]
    fn test_keypad_tracks_operator() {
        let session = session_with("8 -");
        assert_eq!(session.keypad().active_operator(), Some(BinaryOp::Subtract));
    }

    #[test]
    fn test_with_state() {
        let session = Session::with_state(EngineState::new().with_display(42.0));
        assert_eq!(session.display(), "42");
    }
}
