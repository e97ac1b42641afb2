//! Show command implementation.

use anyhow::Result;
use console::style;

use super::common::{display_name, load_matrix};

/// Execute the show command.
pub fn execute(input: &str) -> Result<()> {
    let doc = load_matrix(input)?;
    let matrix = &doc.lines;

    println!(
        "{} {}: {} lines, {} columns, {} gates{}",
        style("→").cyan().bold(),
        style(display_name(&doc)).green(),
        matrix.nr_lines(),
        matrix.max_column(),
        matrix.count_gates(),
        if matrix.has_injections() {
            ", with injections"
        } else {
            ""
        }
    );
    println!();
    matrix.print_circ();

    Ok(())
}
