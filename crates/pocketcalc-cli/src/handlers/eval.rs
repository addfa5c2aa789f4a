//! Eval command handler

use std::io::Write;

use tracing::info;

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{OutputFormat, Renderer};
use crate::EvalArgs;

/// Execute the eval command
///
/// Keys are pressed in order on a fresh session. The first rejected key
/// aborts the run; a domain error on the display is a normal result.
pub fn execute_eval<W: Write>(config: &CliConfig, args: &EvalArgs, out: &mut W) -> CliResult<()> {
    let config = args.mode.apply(config.clone());
    let renderer = Renderer::from_config(&config);
    let mut session = config.session();

    let labels = args.labels();
    for label in &labels {
        session.press_label(label)?;
    }
    info!(keys = labels.len(), display = %session.display(), "evaluated");

    match output_format(args) {
        OutputFormat::Json => {
            writeln!(out, "{}", renderer.json(&session.state().snapshot())?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{}", renderer.display(session.state()))?;
            if args.history {
                writeln!(out)?;
                if let Some(header) = renderer.header("History") {
                    writeln!(out, "{header}")?;
                }
                writeln!(out, "{}", renderer.history(&session))?;
            }
        }
    }
    Ok(())
}

/// Output format selected by the arguments
#[must_use]
pub fn output_format(args: &EvalArgs) -> OutputFormat {
    if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    }
}
