//! Output formatting for calculator results

use console::style;
use pocketcalc::display::{format_display, DisplayWidth};
use pocketcalc::engine::EngineState;
use pocketcalc::session::Session;
use serde::{Deserialize, Serialize};

use crate::config::CliConfig;
use crate::error::CliResult;

/// Output format for evaluation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON state snapshot
    Json,
}

/// Renders calculator state as terminal text
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
    /// Digits shown before exponent form
    pub width: DisplayWidth,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(false, false, DisplayWidth::Compact)
    }
}

impl Renderer {
    /// Create a new renderer
    #[must_use]
    pub const fn new(use_color: bool, quiet: bool, width: DisplayWidth) -> Self {
        Self {
            use_color,
            quiet,
            width,
        }
    }

    /// Renderer for a resolved configuration
    #[must_use]
    pub fn from_config(config: &CliConfig) -> Self {
        Self::new(
            config.color.should_color(),
            config.verbosity.is_quiet(),
            config.display_width,
        )
    }

    /// The display, shortened to the configured width
    #[must_use]
    pub fn display(&self, state: &EngineState) -> String {
        let text = format_display(state.display(), self.width);
        if !self.use_color {
            return text;
        }
        if state.readout().is_error() {
            style(text).red().bold().to_string()
        } else {
            style(text).bold().to_string()
        }
    }

    /// Mode indicators: `SCI`, the angle unit and a pending operator
    #[must_use]
    pub fn status(&self, state: &EngineState) -> String {
        let mut parts = Vec::new();
        if state.is_scientific() {
            parts.push("SCI".to_string());
            parts.push(if state.is_degrees() { "DEG" } else { "RAD" }.to_string());
        }
        if let Some(op) = state.operator() {
            parts.push(op.symbol().to_string());
        }
        let line = parts.join("  ");
        if self.use_color && !line.is_empty() {
            style(line).dim().to_string()
        } else {
            line
        }
    }

    /// Numbered history lines, newest first
    #[must_use]
    pub fn history(&self, session: &Session) -> String {
        let history = session.state().history();
        if history.is_empty() {
            return "No calculations yet".to_string();
        }
        history
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let number = format!("{:>2}.", i + 1);
                let number = if self.use_color {
                    style(number).cyan().to_string()
                } else {
                    number
                };
                format!("{number} {}", entry.display())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// A section header, or nothing in quiet mode
    #[must_use]
    pub fn header(&self, title: &str) -> Option<String> {
        if self.quiet {
            return None;
        }
        Some(if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        })
    }

    /// An error message; shown even in quiet mode
    #[must_use]
    pub fn error(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {message}", style("error:").red().bold())
        } else {
            format!("error: {message}")
        }
    }

    /// Pretty JSON for any serializable value
    pub fn json<T: Serialize>(&self, value: &T) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}
