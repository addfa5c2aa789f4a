//! Config command handler

use std::io::Write;

use tracing::debug;

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::ConfigArgs;

/// Execute the config command
///
/// Prints the effective configuration as YAML, after `--reset` and any
/// `--set` overrides. Nothing is written back to disk.
pub fn execute_config<W: Write>(
    config: &CliConfig,
    args: &ConfigArgs,
    out: &mut W,
) -> CliResult<()> {
    let effective = resolve_config(config, args)?;
    if args.show || args.reset || !args.set.is_empty() {
        write!(out, "{}", effective.to_yaml()?)?;
    } else {
        writeln!(out, "Use --show to print the configuration")?;
    }
    Ok(())
}

/// Applies `--reset` and `--set` to the loaded configuration
pub fn resolve_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<CliConfig> {
    let mut effective = if args.reset {
        CliConfig::default()
    } else {
        config.clone()
    };
    for setting in &args.set {
        debug!(setting, "config override");
        effective.set(setting)?;
    }
    Ok(effective)
}
