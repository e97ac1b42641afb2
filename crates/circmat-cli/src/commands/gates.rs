//! Gates command implementation.

use anyhow::Result;
use console::style;
use serde::Serialize;

use circmat_ir::{CircuitMatrix, GateId, GateRole};

use super::common::load_matrix;

/// One CNOT instance as listed by the gates command.
#[derive(Debug, Serialize)]
pub struct GateEntry {
    pub column: usize,
    pub gate: GateId,
    pub controls: Vec<usize>,
    pub targets: Vec<usize>,
}

/// Collect every gate instance, column by column.
pub fn collect_gates(matrix: &CircuitMatrix) -> Result<Vec<GateEntry>> {
    let mut entries = Vec::new();
    for column in matrix.gate_columns() {
        for i in 0..matrix.nr_lines() {
            let Some((gate, GateRole::Control)) = matrix.cell(i, column)?.gate() else {
                continue;
            };
            let targets = matrix.find_target(i, column)?;
            let Some(&first_target) = targets.first() else {
                continue;
            };
            // list each instance once, from its first control
            let controls = matrix.find_control(first_target, column)?;
            if controls.first() != Some(&i) {
                continue;
            }
            entries.push(GateEntry {
                column,
                gate,
                controls,
                targets,
            });
        }
    }
    Ok(entries)
}

/// Execute the gates command.
pub fn execute(input: &str, format: &str) -> Result<()> {
    let doc = load_matrix(input)?;
    let entries = collect_gates(&doc.lines)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&entries)?),
        "table" => {
            println!(
                "{:>6}  {:>6}  {:<16}  {:<16}",
                style("Column").bold(),
                style("Gate").bold(),
                style("Controls").bold(),
                style("Targets").bold()
            );
            for entry in &entries {
                println!(
                    "{:>6}  {:>6}  {:<16}  {:<16}",
                    entry.column,
                    entry.gate.to_string(),
                    format!("{:?}", entry.controls),
                    format!("{:?}", entry.targets)
                );
            }
        }
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }

    Ok(())
}
