//! Check command implementation.

use anyhow::{Context, Result};
use console::style;

use super::common::{display_name, load_matrix};

/// Execute the check command.
pub fn execute(input: &str) -> Result<()> {
    let doc = load_matrix(input)?;
    let matrix = &doc.lines;

    matrix
        .validate()
        .with_context(|| format!("{} is not a well-formed matrix", display_name(&doc)))?;

    let empty_rows = matrix
        .lines()
        .filter(|line| !line.iter().any(|cell| cell.is_significant()))
        .count();
    let mut compacted = matrix.clone();
    let empty_columns = compacted.remove_empty_columns();

    println!(
        "{} {} is well formed",
        style("✓").green().bold(),
        style(display_name(&doc)).green()
    );
    println!("  Lines:         {}", matrix.nr_lines());
    println!("  Columns:       {}", matrix.max_column());
    println!("  Gates:         {}", matrix.count_gates());
    println!("  Injections:    {}", if matrix.has_injections() { "yes" } else { "no" });
    println!("  Empty rows:    {empty_rows}");
    println!("  Empty columns: {empty_columns}");

    Ok(())
}
