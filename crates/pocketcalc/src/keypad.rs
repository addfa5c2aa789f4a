//! Keypad layout
//!
//! Visual feedback: the pending operator and the angle unit are shown as
//! active buttons, so the calculator state is obvious at a glance.
//!
//! Layout (scientific block only in scientific mode):
//! ```text
//! [sin] [cos] [tan] [DEG]
//! [ln ] [log] [ π ] [ e ]
//! [x² ] [ √ ] [ ( ] [ ) ]
//! [ C ] [ ± ] [ % ] [ ÷ ]
//! [ 7 ] [ 8 ] [ 9 ] [ × ]
//! [ 4 ] [ 5 ] [ 6 ] [ - ]
//! [ 1 ] [ 2 ] [ 3 ] [ + ]
//! [    0    ] [ . ] [ = ]
//! ```

use crate::core::{BinaryOp, ScientificFn};
use crate::engine::{EngineState, Key};

/// Visual category of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// Digits and the decimal point
    Number,
    /// Binary operators and `=`
    Operator,
    /// `C`, `±`, `%`
    Function,
    /// Keys of the scientific block
    Scientific,
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Key sent when the button is pressed
    pub key: Key,
    /// Visual category
    pub kind: ButtonKind,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column of the left edge (0-indexed)
    pub col: usize,
    /// Number of columns covered
    pub span: usize,
    /// Highlighted (pending operator, degree mode)
    pub active: bool,
}

impl KeypadButton {
    fn new(key: Key, kind: ButtonKind, row: usize, col: usize) -> Self {
        Self {
            key,
            kind,
            row,
            col,
            span: 1,
            active: false,
        }
    }

    fn wide(mut self, span: usize) -> Self {
        self.span = span;
        self
    }

    /// Label printed on the button
    #[must_use]
    pub fn label(&self) -> String {
        self.key.label()
    }

    /// Stable element ID, e.g. `btn-7` or `btn-divide`
    #[must_use]
    pub fn id(&self) -> String {
        match self.key {
            Key::Digit(d) => format!("btn-{d}"),
            Key::Decimal => "btn-decimal".to_string(),
            Key::Clear => "btn-clear".to_string(),
            Key::ToggleSign => "btn-sign".to_string(),
            Key::Percent => "btn-percent".to_string(),
            Key::Operator(op) => format!("btn-{}", op_name(op)),
            Key::Equals => "btn-equals".to_string(),
            Key::Function(f) => format!("btn-{}", function_name(f)),
            Key::ToggleAngleUnit => "btn-deg".to_string(),
            Key::OpenParen => "btn-open-paren".to_string(),
            Key::CloseParen => "btn-close-paren".to_string(),
        }
    }

    /// True if the button covers column `col` of its row
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && (self.col..self.col + self.span).contains(&col)
    }
}

fn op_name(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "plus",
        BinaryOp::Subtract => "minus",
        BinaryOp::Multiply => "times",
        BinaryOp::Divide => "divide",
    }
}

fn function_name(f: ScientificFn) -> &'static str {
    match f {
        ScientificFn::Sin => "sin",
        ScientificFn::Cos => "cos",
        ScientificFn::Tan => "tan",
        ScientificFn::Ln => "ln",
        ScientificFn::Log => "log",
        ScientificFn::Square => "square",
        ScientificFn::Sqrt => "sqrt",
        ScientificFn::Pi => "pi",
        ScientificFn::E => "e",
    }
}

/// The visible keypad: optional 3x4 scientific block above the 5x4 basic grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    rows: usize,
    scientific: bool,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Keypad {
    /// Columns in every row
    pub const COLS: usize = 4;

    /// Builds the layout, with the scientific block when `scientific` is set
    #[must_use]
    pub fn new(scientific: bool) -> Self {
        let mut buttons = Vec::with_capacity(31);
        let mut row = 0;

        if scientific {
            let block: [[Key; 4]; 3] = [
                [
                    ScientificFn::Sin.into(),
                    ScientificFn::Cos.into(),
                    ScientificFn::Tan.into(),
                    Key::ToggleAngleUnit,
                ],
                [
                    ScientificFn::Ln.into(),
                    ScientificFn::Log.into(),
                    ScientificFn::Pi.into(),
                    ScientificFn::E.into(),
                ],
                [
                    ScientificFn::Square.into(),
                    ScientificFn::Sqrt.into(),
                    Key::OpenParen,
                    Key::CloseParen,
                ],
            ];
            for keys in block {
                for (col, key) in keys.into_iter().enumerate() {
                    buttons.push(KeypadButton::new(key, ButtonKind::Scientific, row, col));
                }
                row += 1;
            }
        }

        let function = [Key::Clear, Key::ToggleSign, Key::Percent];
        for (col, key) in function.into_iter().enumerate() {
            buttons.push(KeypadButton::new(key, ButtonKind::Function, row, col));
        }
        buttons.push(KeypadButton::new(
            BinaryOp::Divide.into(),
            ButtonKind::Operator,
            row,
            3,
        ));
        row += 1;

        let digit_rows: [([u8; 3], BinaryOp); 3] = [
            ([7, 8, 9], BinaryOp::Multiply),
            ([4, 5, 6], BinaryOp::Subtract),
            ([1, 2, 3], BinaryOp::Add),
        ];
        for (digits, op) in digit_rows {
            for (col, d) in digits.into_iter().enumerate() {
                buttons.push(KeypadButton::new(Key::Digit(d), ButtonKind::Number, row, col));
            }
            buttons.push(KeypadButton::new(op.into(), ButtonKind::Operator, row, 3));
            row += 1;
        }

        buttons.push(KeypadButton::new(Key::Digit(0), ButtonKind::Number, row, 0).wide(2));
        buttons.push(KeypadButton::new(Key::Decimal, ButtonKind::Number, row, 2));
        buttons.push(KeypadButton::new(Key::Equals, ButtonKind::Operator, row, 3));
        row += 1;

        let mut keypad = Self {
            buttons,
            rows: row,
            scientific,
        };
        keypad.set_degrees(true);
        keypad
    }

    /// Builds the keypad matching an engine state: mode, pending operator,
    /// angle unit
    #[must_use]
    pub fn for_state(state: &EngineState) -> Self {
        let mut keypad = Self::new(state.is_scientific());
        keypad.highlight_operator(state.operator());
        keypad.set_degrees(state.is_degrees());
        keypad
    }

    /// True when the scientific block is shown
    #[must_use]
    pub const fn is_scientific(&self) -> bool {
        self.scientific
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, Self::COLS)
    }

    /// All buttons in row-major order
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Button covering the given cell; the wide `0` answers for both columns
    #[must_use]
    pub fn button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Finds a button by its printed label
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.label() == label)
    }

    /// True if the key has a button on this keypad
    #[must_use]
    pub fn contains(&self, key: Key) -> bool {
        self.buttons.iter().any(|b| b.key == key)
    }

    /// Marks the pending operator's button active, releasing the others
    pub fn highlight_operator(&mut self, op: Option<BinaryOp>) {
        for button in &mut self.buttons {
            if let Key::Operator(candidate) = button.key {
                button.active = Some(candidate) == op;
            }
        }
    }

    /// Operator currently shown as active
    #[must_use]
    pub fn active_operator(&self) -> Option<BinaryOp> {
        self.buttons.iter().find_map(|b| match b.key {
            Key::Operator(op) if b.active => Some(op),
            _ => None,
        })
    }

    /// Mirrors the angle unit on the `DEG` button
    pub fn set_degrees(&mut self, degrees: bool) {
        for button in &mut self.buttons {
            if button.key == Key::ToggleAngleUnit {
                button.active = degrees;
            }
        }
    }

    /// Renders the grid as text, active buttons in angle brackets
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows);
        for row in 0..self.rows {
            let cells: Vec<String> = self
                .buttons
                .iter()
                .filter(|b| b.row == row)
                .map(|b| {
                    let width = b.span * 6 - 3;
                    let (open, close) = if b.active { ('<', '>') } else { ('[', ']') };
                    format!("{open}{:^width$}{close}", b.label())
                })
                .collect();
            lines.push(cells.join(" "));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_dimensions() {
        let keypad = Keypad::new(false);
        assert_eq!(keypad.dimensions(), (5, 4));
        assert_eq!(keypad.button_count(), 19);
        assert!(!keypad.is_scientific());
    }

    #[test]
    fn test_scientific_dimensions() {
        let keypad = Keypad::new(true);
        assert_eq!(keypad.dimensions(), (8, 4));
        assert_eq!(keypad.button_count(), 31);
        assert_eq!(keypad.button_at(0, 0).unwrap().label(), "sin");
        assert_eq!(keypad.button_at(2, 1).unwrap().label(), "√");
        assert_eq!(keypad.button_at(3, 0).unwrap().label(), "C");
    }

    #[test]
    fn test_basic_layout_order() {
        let keypad = Keypad::new(false);
        let labels: Vec<String> = keypad.buttons().iter().map(KeypadButton::label).collect();
        assert_eq!(
            labels,
            vec![
                "C", "±", "%", "÷", "7", "8", "9", "×", "4", "5", "6", "-", "1", "2", "3", "+",
                "0", ".", "="
            ]
        );
    }

    #[test]
    fn test_zero_spans_two_columns() {
        let keypad = Keypad::new(false);
        assert_eq!(keypad.button_at(4, 0).unwrap().key, Key::Digit(0));
        assert_eq!(keypad.button_at(4, 1).unwrap().key, Key::Digit(0));
        assert_eq!(keypad.button_at(4, 2).unwrap().key, Key::Decimal);
        assert_eq!(keypad.button_at(4, 3).unwrap().key, Key::Equals);
        assert!(keypad.button_at(5, 0).is_none());
        assert!(keypad.button_at(0, 4).is_none());
    }

    #[test]
    fn test_button_kinds() {
        let keypad = Keypad::new(true);
        assert_eq!(keypad.find_by_label("7").unwrap().kind, ButtonKind::Number);
        assert_eq!(keypad.find_by_label("×").unwrap().kind, ButtonKind::Operator);
        assert_eq!(keypad.find_by_label("=").unwrap().kind, ButtonKind::Operator);
        assert_eq!(keypad.find_by_label("%").unwrap().kind, ButtonKind::Function);
        assert_eq!(keypad.find_by_label("ln").unwrap().kind, ButtonKind::Scientific);
    }

    #[test]
    fn test_contains() {
        let basic = Keypad::new(false);
        assert!(basic.contains(Key::Digit(5)));
        assert!(!basic.contains(ScientificFn::Sin.into()));
        assert!(!basic.contains(Key::ToggleAngleUnit));
        let sci = Keypad::new(true);
        assert!(sci.contains(ScientificFn::Sin.into()));
        assert!(sci.contains(Key::CloseParen));
    }

    #[test]
    fn test_every_scientific_key_only_on_scientific_keypad() {
        let basic = Keypad::new(false);
        let sci = Keypad::new(true);
        for button in sci.buttons() {
            assert_eq!(basic.contains(button.key), !button.key.is_scientific());
        }
    }

    #[test]
    fn test_highlight_operator() {
        let mut keypad = Keypad::new(false);
        keypad.highlight_operator(Some(BinaryOp::Multiply));
        assert_eq!(keypad.active_operator(), Some(BinaryOp::Multiply));
        keypad.highlight_operator(Some(BinaryOp::Add));
        assert_eq!(keypad.active_operator(), Some(BinaryOp::Add));
        assert!(!keypad.find_by_label("×").unwrap().active);
        keypad.highlight_operator(None);
        assert_eq!(keypad.active_operator(), None);
    }

    #[test]
    fn test_degree_button_mirrors_mode() {
        let mut keypad = Keypad::new(true);
        assert!(keypad.find_by_label("DEG").unwrap().active);
        keypad.set_degrees(false);
        assert!(!keypad.find_by_label("DEG").unwrap().active);
    }

    #[test]
    fn test_for_state() {
        let state = EngineState::new().with_scientific(true).with_degrees(false);
        let state = crate::engine::apply(state, Key::Digit(4));
        let state = crate::engine::apply(state, BinaryOp::Divide.into());
        let keypad = Keypad::for_state(&state);
        assert!(keypad.is_scientific());
        assert_eq!(keypad.active_operator(), Some(BinaryOp::Divide));
        assert!(!keypad.find_by_label("DEG").unwrap().active);
    }

    #[test]
    fn test_ids() {
        let keypad = Keypad::new(true);
        assert_eq!(keypad.find_by_label("7").unwrap().id(), "btn-7");
        assert_eq!(keypad.find_by_label("÷").unwrap().id(), "btn-divide");
        assert_eq!(keypad.find_by_label("√").unwrap().id(), "btn-sqrt");
        assert_eq!(keypad.find_by_label("DEG").unwrap().id(), "btn-deg");
        let mut ids: Vec<String> = keypad.buttons().iter().map(KeypadButton::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), keypad.button_count());
    }

    #[test]
    fn test_render_text() {
        let mut keypad = Keypad::new(false);
        keypad.highlight_operator(Some(BinaryOp::Add));
        let text = keypad.render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "[ C ] [ ± ] [ % ] [ ÷ ]");
        assert_eq!(lines[3], "[ 1 ] [ 2 ] [ 3 ] < + >");
        assert_eq!(lines[4], "[    0    ] [ . ] [ = ]");
    }
}
