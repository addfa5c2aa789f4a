//! Live keypad: one keystroke, one key press
//!
//! Puts the terminal in raw mode on the alternate screen and redraws the
//! display, keypad and history panel after every keystroke.

use std::io::{self, Write};

use console::measure_text_width;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use pocketcalc::core::{BinaryOp, ScientificFn};
use pocketcalc::engine::Key;
use pocketcalc::session::{Feature, Session};
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::output::Renderer;

/// Width of a rendered keypad row
const PANEL_WIDTH: usize = 23;

/// Actions that can be triggered by a keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveAction {
    /// Press a calculator key
    Press(Key),
    /// Show or hide the scientific keypad
    ToggleScientific,
    /// Show or hide the history panel
    ToggleHistory,
    /// Leave live mode
    Quit,
    /// Ignored keystroke
    None,
}

/// Maps terminal key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> LiveAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'd') => LiveAction::Quit,
                _ => LiveAction::None,
            };
        }

        let key: Key = match code {
            KeyCode::Char(c @ '0'..='9') => Key::Digit(c as u8 - b'0'),
            KeyCode::Char('.' | ',') => Key::Decimal,
            KeyCode::Char('+') => BinaryOp::Add.into(),
            KeyCode::Char('-') => BinaryOp::Subtract.into(),
            KeyCode::Char('*' | 'x') => BinaryOp::Multiply.into(),
            KeyCode::Char('/') => BinaryOp::Divide.into(),
            KeyCode::Char('=') | KeyCode::Enter => Key::Equals,
            KeyCode::Char('%') => Key::Percent,
            KeyCode::Char('n') => Key::ToggleSign,
            KeyCode::Char('c') | KeyCode::Backspace | KeyCode::Esc => Key::Clear,
            KeyCode::Char('S') => ScientificFn::Sin.into(),
            KeyCode::Char('C') => ScientificFn::Cos.into(),
            KeyCode::Char('T') => ScientificFn::Tan.into(),
            KeyCode::Char('l') => ScientificFn::Ln.into(),
            KeyCode::Char('g') => ScientificFn::Log.into(),
            KeyCode::Char('p') => ScientificFn::Pi.into(),
            KeyCode::Char('e') => ScientificFn::E.into(),
            KeyCode::Char('^') => ScientificFn::Square.into(),
            KeyCode::Char('r') => ScientificFn::Sqrt.into(),
            KeyCode::Char('d') => Key::ToggleAngleUnit,
            KeyCode::Char('(') => Key::OpenParen,
            KeyCode::Char(')') => Key::CloseParen,
            KeyCode::Char('s') => return LiveAction::ToggleScientific,
            KeyCode::Char('h') => return LiveAction::ToggleHistory,
            KeyCode::Char('q') => return LiveAction::Quit,
            _ => return LiveAction::None,
        };
        LiveAction::Press(key)
    }
}

/// Session plus the last status message, rendered as one frame
#[derive(Debug)]
pub struct LiveView {
    session: Session,
    renderer: Renderer,
    message: Option<String>,
}

impl LiveView {
    /// Creates a view around a session
    #[must_use]
    pub fn new(session: Session, renderer: Renderer) -> Self {
        Self {
            session,
            renderer,
            message: None,
        }
    }

    /// The session being driven
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Applies an action; returns true when the view should close
    pub fn apply(&mut self, action: LiveAction) -> bool {
        self.message = None;
        match action {
            LiveAction::Press(key) => {
                if let Err(err) = self.session.press_label(&key.label()) {
                    self.message = Some(err.to_string());
                }
            }
            LiveAction::ToggleScientific => self.session.select_feature(Feature::Scientific),
            LiveAction::ToggleHistory => self.session.select_feature(Feature::History),
            LiveAction::Quit => return true,
            LiveAction::None => {}
        }
        false
    }

    /// The frame as lines
    #[must_use]
    pub fn frame(&self) -> Vec<String> {
        let state = self.session.state();
        let mut lines = Vec::new();

        let status = self.renderer.status(state);
        lines.push(format!("pocketcalc  {status}").trim_end().to_string());
        let border = format!("+{}+", "-".repeat(PANEL_WIDTH));
        lines.push(border.clone());
        let display = self.renderer.display(state);
        let pad = PANEL_WIDTH.saturating_sub(measure_text_width(&display));
        lines.push(format!("|{}{display}|", " ".repeat(pad)));
        lines.push(border);
        lines.extend(self.session.keypad().render_text().lines().map(str::to_string));

        if self.session.history_visible() {
            lines.push(String::new());
            if let Some(header) = self.renderer.header("History") {
                lines.push(header);
            }
            lines.extend(self.renderer.history(&self.session).lines().map(str::to_string));
        }

        lines.push(String::new());
        if let Some(message) = &self.message {
            lines.push(self.renderer.error(message));
        }
        lines.push("s scientific  h history  q quit".to_string());
        lines
    }
}

/// Runs the live keypad until the user quits
pub fn run(session: Session, renderer: Renderer) -> CliResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let mut view = LiveView::new(session, renderer);
    let result = event_loop(&mut stdout, &mut view);

    let raw = disable_raw_mode().map_err(CliError::from);
    let screen = leave_screen(&mut stdout);
    result.and(raw).and(screen)
}

/// Restores the cursor and the main screen
fn leave_screen<W: Write>(out: &mut W) -> CliResult<()> {
    execute!(out, Show, LeaveAlternateScreen)?;
    Ok(())
}

fn event_loop<W: Write>(out: &mut W, view: &mut LiveView) -> CliResult<()> {
    let input = InputHandler::new();
    loop {
        draw(out, view)?;
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let action = input.handle_key(key);
            debug!(?action, "live keystroke");
            if view.apply(action) {
                return Ok(());
            }
        }
    }
}

fn draw<W: Write>(out: &mut W, view: &LiveView) -> CliResult<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    // Raw mode does not translate \n into a carriage return
    for line in view.frame() {
        write!(out, "{line}\r\n")?;
    }
    out.flush()?;
    Ok(())
}
