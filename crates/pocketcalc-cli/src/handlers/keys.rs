//! Keys command handler

use std::io::Write;

use pocketcalc::keypad::Keypad;

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Renderer;
use crate::KeysArgs;

/// ASCII spellings accepted in place of keypad labels
pub const ALIASES: [(&str, &str); 8] = [
    ("×", "* x"),
    ("÷", "/"),
    ("±", "+/- neg"),
    ("C", "c AC clear"),
    ("√", "sqrt"),
    ("x²", "x^2 sq"),
    ("π", "pi"),
    ("DEG", "deg rad RAD"),
];

/// Execute the keys command
pub fn execute_keys<W: Write>(config: &CliConfig, args: &KeysArgs, out: &mut W) -> CliResult<()> {
    let renderer = Renderer::from_config(config);
    let keypad = Keypad::new(args.scientific || config.scientific);
    writeln!(out, "{}", keypad.render_text())?;

    if let Some(header) = renderer.header("Aliases") {
        writeln!(out)?;
        writeln!(out, "{header}")?;
        for (label, aliases) in ALIASES {
            if keypad.find_by_label(label).is_some() {
                writeln!(out, "  {label:<4} {aliases}")?;
            }
        }
    }
    Ok(())
}
