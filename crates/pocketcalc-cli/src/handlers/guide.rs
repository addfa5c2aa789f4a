//! Guide command handler

use std::io::Write;

use crate::error::CliResult;
use crate::output::Renderer;

/// Guide sections: title and bullet points
pub const SECTIONS: [(&str, &[&str]); 4] = [
    (
        "Basic Operations",
        &[
            "Type digits and operators; each operator applies to the running result",
            "C clears the current calculation",
            "± toggles between positive and negative",
            "% divides the number by 100",
            "= shows the final result",
        ],
    ),
    (
        "Scientific Mode",
        &[
            "Pass -s or use :sci to show the scientific keys",
            "sin, cos, tan for trigonometric calculations",
            "ln for natural logarithm, log for base-10 logarithm",
            "π and e for mathematical constants",
            "x² for square and √ for square root",
            "DEG switches between degrees and radians",
        ],
    ),
    (
        "History",
        &[
            "The last 10 calculations are kept, newest first",
            "Each entry shows the expression and result",
            "Pick an entry to put its result back on the display",
        ],
    ),
    (
        "Tips",
        &[
            "Long numbers switch to exponent form; --wide shows more digits",
            "Results are preserved when switching modes",
            "Division by zero, log of zero and similar show Error; press C",
        ],
    ),
];

/// Execute the guide command
pub fn execute_guide<W: Write>(renderer: &Renderer, out: &mut W) -> CliResult<()> {
    for (i, (title, points)) in SECTIONS.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        match renderer.header(title) {
            Some(header) => writeln!(out, "{header}")?,
            None => writeln!(out, "{title}")?,
        }
        for point in *points {
            writeln!(out, "  • {point}")?;
        }
    }
    Ok(())
}
