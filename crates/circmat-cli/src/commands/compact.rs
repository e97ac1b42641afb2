//! Compact command implementation.

use anyhow::Result;
use console::style;
use tracing::info;

use super::common::{display_name, load_matrix, write_matrix};

/// Execute the compact command: drop unused lines and idle columns.
pub fn execute(input: &str, output: Option<&str>, keep_rows: bool) -> Result<()> {
    let mut doc = load_matrix(input)?;
    let (lines, columns) = (doc.lines.nr_lines(), doc.lines.max_column());

    let removed_rows = if keep_rows {
        0
    } else {
        doc.lines.remove_empty_rows()
    };
    let removed_columns = doc.lines.remove_empty_columns();

    info!(
        removed_rows,
        removed_columns, "Compacted {}", display_name(&doc)
    );

    eprintln!(
        "{} {}: {}x{} -> {}x{} ({} rows, {} columns removed)",
        style("✓").green().bold(),
        style(display_name(&doc)).green(),
        lines,
        columns,
        doc.lines.nr_lines(),
        doc.lines.max_column(),
        removed_rows,
        removed_columns
    );

    write_matrix(&doc, output)
}
