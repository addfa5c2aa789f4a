//! pocketcalc CLI library
//!
//! Terminal front end for the pocketcalc engine: one-shot evaluation of a
//! key sequence, a line REPL and a live keypad driven by raw keystrokes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod live;
mod output;
pub mod repl;

pub use commands::{
    Cli, ColorArg, Commands, ConfigArgs, EvalArgs, KeysArgs, LiveArgs, ModeArgs, ReplArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use live::{InputHandler, LiveAction, LiveView};
pub use output::{OutputFormat, Renderer};
pub use repl::{Flow, Repl};
