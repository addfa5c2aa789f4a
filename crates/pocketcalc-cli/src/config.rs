//! CLI configuration
//!
//! Settings come from an optional YAML file and are then overridden by
//! command-line flags:
//!
//! ```yaml
//! verbosity: normal
//! color: auto
//! display_width: wide
//! scientific: true
//! degrees: false
//! ```

use std::path::Path;

use pocketcalc::display::DisplayWidth;
use pocketcalc::engine::EngineState;
use pocketcalc::session::Session;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - key transitions logged
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Log filter directive for this level
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
            Self::Debug => "trace",
        }
    }

    /// Level for a `-v` count, with `-q` taking precedence
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => console::colors_enabled(),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Digits shown before switching to exponent form
    pub display_width: DisplayWidth,
    /// Start with the scientific keypad
    pub scientific: bool,
    /// Start with trigonometry in degrees
    pub degrees: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
            display_width: DisplayWidth::Compact,
            scientific: false,
            degrees: true,
        }
    }
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            CliError::config(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_yaml(&text)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(text: &str) -> CliResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Render configuration as YAML
    pub fn to_yaml(&self) -> CliResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set display width
    #[must_use]
    pub const fn with_display_width(mut self, width: DisplayWidth) -> Self {
        self.display_width = width;
        self
    }

    /// Set scientific mode at start
    #[must_use]
    pub const fn with_scientific(mut self, scientific: bool) -> Self {
        self.scientific = scientific;
        self
    }

    /// Set angle unit at start
    #[must_use]
    pub const fn with_degrees(mut self, degrees: bool) -> Self {
        self.degrees = degrees;
        self
    }

    /// Sets one field from `key=value` text, values in YAML syntax
    pub fn set(&mut self, assignment: &str) -> CliResult<()> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| CliError::config(format!("expected KEY=VALUE, got {assignment:?}")))?;
        let value = value.trim();
        match key.trim() {
            "verbosity" => self.verbosity = serde_yaml_ng::from_str(value)?,
            "color" => self.color = serde_yaml_ng::from_str(value)?,
            "display_width" => self.display_width = serde_yaml_ng::from_str(value)?,
            "scientific" => self.scientific = serde_yaml_ng::from_str(value)?,
            "degrees" => self.degrees = serde_yaml_ng::from_str(value)?,
            other => return Err(CliError::config(format!("unknown setting {other:?}"))),
        }
        Ok(())
    }

    /// A fresh session in the configured modes
    #[must_use]
    pub fn session(&self) -> Session {
        Session::with_state(
            EngineState::new()
                .with_scientific(self.scientific)
                .with_degrees(self.degrees),
        )
    }
}
