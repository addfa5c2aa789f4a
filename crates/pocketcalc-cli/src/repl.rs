//! Line-oriented calculator session
//!
//! Each input line holds whitespace-separated key labels, pressed in order,
//! or a single `:command`. The display is printed after every key line.

use std::io::{BufRead, Write};

use pocketcalc::session::{Feature, Session};
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::output::Renderer;

const HELP: &str = "\
Enter keys separated by spaces, e.g. `2 + 3 × 4 =`.
ASCII spellings work too: * x / - sqrt pi x^2 +/- deg.

Commands:
  :history      list past calculations (1 = newest)
  :pick N       recall history entry N
  :sci          show or hide the scientific keypad
  :hist         show or hide the history panel
  :deg          switch between degrees and radians
  :features     list the feature menu
  :keys         draw the keypad
  :json         print the full state as JSON
  :help         this text
  :quit         leave";

/// What the loop does after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line
    Continue,
    /// Stop reading
    Quit,
}

/// Read-eval-print loop over a calculator session
#[derive(Debug)]
pub struct Repl {
    session: Session,
    renderer: Renderer,
    prompt: Option<String>,
}

impl Repl {
    /// Create a loop around a session
    #[must_use]
    pub fn new(session: Session, renderer: Renderer) -> Self {
        Self {
            session,
            renderer,
            prompt: None,
        }
    }

    /// Print `prompt` before reading each line
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// The session being driven
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs until end of input or `:quit`
    ///
    /// Rejected keys and commands are reported and the loop carries on.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> CliResult<()> {
        let mut lines = input.lines();
        loop {
            if let Some(prompt) = &self.prompt {
                write!(out, "{prompt}")?;
                out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            match self.execute(&line?, out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(
                    err @ (CliError::InvalidKey(_)
                    | CliError::Session(_)
                    | CliError::Config { .. }),
                ) => {
                    writeln!(out, "{}", self.renderer.error(&err.to_string()))?;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Handles one input line
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> CliResult<Flow> {
        let line = line.trim();
        debug!(line, "repl input");
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        if let Some(command) = line.strip_prefix(':') {
            return self.command(command, out);
        }
        for label in line.split_whitespace() {
            self.session.press_label(label)?;
        }
        writeln!(out, "{}", self.renderer.display(self.session.state()))?;
        Ok(Flow::Continue)
    }

    fn command<W: Write>(&mut self, command: &str, out: &mut W) -> CliResult<Flow> {
        let mut words = command.split_whitespace();
        let name = words.next().unwrap_or_default();
        match name {
            "q" | "quit" | "exit" => return Ok(Flow::Quit),
            "help" => writeln!(out, "{HELP}")?,
            "history" => writeln!(out, "{}", self.renderer.history(&self.session))?,
            "pick" => {
                let number: usize = words
                    .next()
                    .and_then(|n| n.parse().ok())
                    .filter(|n| *n > 0)
                    .ok_or_else(|| CliError::config("usage: :pick N (1 = newest)"))?;
                self.session.select_history(number - 1)?;
                writeln!(out, "{}", self.renderer.display(self.session.state()))?;
            }
            "sci" => {
                self.session.select_feature(Feature::Scientific);
                let mode = if self.session.state().is_scientific() {
                    "scientific"
                } else {
                    "basic"
                };
                writeln!(out, "{mode} keypad")?;
            }
            "hist" => {
                self.session.select_feature(Feature::History);
                if self.session.history_visible() {
                    writeln!(out, "{}", self.renderer.history(&self.session))?;
                }
            }
            "deg" => {
                self.session.select_feature(Feature::AngleUnit);
                let unit = if self.session.state().is_degrees() {
                    "degrees"
                } else {
                    "radians"
                };
                writeln!(out, "{unit}")?;
            }
            "features" => {
                for (i, item) in self.session.features().iter().enumerate() {
                    writeln!(out, "{}. {item}", i + 1)?;
                }
            }
            "keys" => writeln!(out, "{}", self.session.keypad().render_text())?,
            "json" => {
                let json = self.renderer.json(&self.session.state().snapshot())?;
                writeln!(out, "{json}")?;
            }
            other => {
                writeln!(
                    out,
                    "{}",
                    self.renderer
                        .error(&format!("unknown command :{other} (try :help)"))
                )?;
            }
        }
        Ok(Flow::Continue)
    }
}
