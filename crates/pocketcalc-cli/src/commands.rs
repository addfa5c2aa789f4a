//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use pocketcalc::display::DisplayWidth;
use std::path::PathBuf;

use crate::config::{CliConfig, ColorChoice, Verbosity};

/// pocketcalc: a pocket calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "pocketcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorArg>,

    /// YAML configuration file
    #[arg(long, global = true, env = "POCKETCALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Applies the global flags on top of a loaded configuration
    #[must_use]
    pub fn apply_globals(&self, mut config: CliConfig) -> CliConfig {
        if self.quiet || self.verbose > 0 {
            config = config.with_verbosity(Verbosity::from_flags(self.quiet, self.verbose));
        }
        if let Some(color) = self.color {
            config = config.with_color(color.into());
        }
        config
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press keys in order and print the display
    ///
    /// Keys are keypad labels or ASCII spellings, e.g.
    /// `pocketcalc eval 2 + 3 x 4 =` or `pocketcalc eval -s "9 0 sin"`.
    Eval(EvalArgs),

    /// Read keys line by line from stdin
    Repl(ReplArgs),

    /// Interactive keypad driven by single keystrokes
    Live(LiveArgs),

    /// Print the keypad layout
    Keys(KeysArgs),

    /// Show configuration
    Config(ConfigArgs),

    /// Print the usage guide
    Guide,
}

/// Calculator mode flags shared by the interactive commands
#[derive(Args, Debug, Clone, Default)]
pub struct ModeArgs {
    /// Start with the scientific keypad
    #[arg(short, long)]
    pub scientific: bool,

    /// Start with trigonometry in radians
    #[arg(long)]
    pub radians: bool,

    /// Use the wide (12 digit) display
    #[arg(long)]
    pub wide: bool,
}

impl ModeArgs {
    /// Overrides configuration values for flags that were given
    #[must_use]
    pub fn apply(&self, mut config: CliConfig) -> CliConfig {
        if self.scientific {
            config = config.with_scientific(true);
        }
        if self.radians {
            config = config.with_degrees(false);
        }
        if self.wide {
            config = config.with_display_width(DisplayWidth::Wide);
        }
        config
    }
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Keys to press, e.g. `2 + 3 × 4 =`
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub keys: Vec<String>,

    /// Print the full state as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the history after the display
    #[arg(long)]
    pub history: bool,

    /// Calculator modes
    #[command(flatten)]
    pub mode: ModeArgs,
}

impl EvalArgs {
    /// Individual key labels; arguments may hold several labels each
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.keys
            .iter()
            .flat_map(|arg| arg.split_whitespace())
            .collect()
    }
}

/// Arguments for the repl command
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Calculator modes
    #[command(flatten)]
    pub mode: ModeArgs,
}

/// Arguments for the live command
#[derive(Parser, Debug)]
pub struct LiveArgs {
    /// Calculator modes
    #[command(flatten)]
    pub mode: ModeArgs,
}

/// Arguments for the keys command
#[derive(Parser, Debug)]
pub struct KeysArgs {
    /// Include the scientific block
    #[arg(short, long)]
    pub scientific: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show current configuration
    #[arg(long)]
    pub show: bool,

    /// Override a configuration value (key=value)
    #[arg(long, value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Reset to default configuration
    #[arg(long)]
    pub reset: bool,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
