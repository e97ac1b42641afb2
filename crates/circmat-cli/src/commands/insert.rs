//! Insert-columns command implementation.

use anyhow::{Context, Result};
use console::style;

use super::common::{display_name, load_matrix, write_matrix};

/// Execute the insert-columns command.
pub fn execute(input: &str, output: Option<&str>, before: usize, count: usize) -> Result<()> {
    let mut doc = load_matrix(input)?;

    doc.lines
        .insert_columns(before, count)
        .with_context(|| format!("Cannot insert columns into {}", display_name(&doc)))?;

    eprintln!(
        "{} Inserted {} columns before column {} ({} columns now)",
        style("✓").green().bold(),
        count,
        before,
        doc.lines.max_column()
    );

    write_matrix(&doc, output)
}
