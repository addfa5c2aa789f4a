//! pocketcalc: a pocket calculator for the terminal
//!
//! ## Usage
//!
//! ```bash
//! pocketcalc eval 2 + 3 x 4 =         # prints 20
//! pocketcalc eval -s "9 0 sin"        # scientific keys, degrees
//! pocketcalc repl                     # one line of keys at a time
//! pocketcalc live                     # single keystrokes
//! pocketcalc keys --scientific        # keypad layout
//! ```

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use pocketcalc_cli::{
    handlers::{execute_config, execute_eval, execute_guide, execute_keys},
    live, Cli, CliConfig, CliResult, Commands, Renderer, Repl,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from the file, then CLI args
    let config = build_config(&cli)?;
    init_tracing(&config);

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Eval(args) => execute_eval(&config, &args, &mut stdout),
        Commands::Repl(args) => {
            let config = args.mode.apply(config);
            let mut repl = Repl::new(config.session(), Renderer::from_config(&config));
            if io::stdin().is_terminal() {
                repl = repl.with_prompt("> ");
            }
            repl.run(io::stdin().lock(), &mut stdout)
        }
        Commands::Live(args) => {
            let config = args.mode.apply(config);
            drop(stdout);
            live::run(config.session(), Renderer::from_config(&config))
        }
        Commands::Keys(args) => execute_keys(&config, &args, &mut stdout),
        Commands::Config(args) => execute_config(&config, &args, &mut stdout),
        Commands::Guide => execute_guide(&Renderer::from_config(&config), &mut stdout),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let file = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::new(),
    };
    Ok(cli.apply_globals(file))
}

fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
