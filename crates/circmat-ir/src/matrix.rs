//! The circuit matrix: qubit lines by time steps.

use std::fmt;
use std::str::FromStr;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::cell::{Cell, GateId, GateRole, QubitLine};
use crate::error::{Axis, MatrixError, MatrixResult};

/// A quantum circuit stored as a matrix of cells.
///
/// Rows are qubit lines, columns are time steps. Lines may have different
/// physical lengths; any column past a line's end reads as [`Cell::Empty`]
/// as long as it is below [`CircuitMatrix::max_column`].
///
/// The row order is the physical qubit order. Gate instances are tied
/// together by the [`GateId`] stored in their cells, so row and column
/// edits never need to rewrite gate cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CircuitMatrix {
    lines: Vec<QubitLine>,
}

impl CircuitMatrix {
    /// Create a matrix that takes ownership of the given lines.
    pub fn new(lines: Vec<QubitLine>) -> Self {
        Self { lines }
    }

    /// Create a matrix from a deep copy of the given lines.
    pub fn from_lines(lines: &[QubitLine]) -> Self {
        Self::new(lines.to_vec())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The maximum physical length across all lines.
    pub fn max_column(&self) -> usize {
        self.lines.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Number of qubit lines.
    pub fn nr_lines(&self) -> usize {
        self.lines.len()
    }

    /// Equivalent to [`CircuitMatrix::nr_lines`].
    pub fn size(&self) -> usize {
        self.lines.len()
    }

    /// Get a line, checking the index.
    pub fn line(&self, i: usize) -> MatrixResult<&QubitLine> {
        self.lines
            .get(i)
            .ok_or_else(|| MatrixError::out_of_range(Axis::Line, i, self.lines.len()))
    }

    /// Get a mutable line, checking the index.
    pub fn at(&mut self, i: usize) -> MatrixResult<&mut QubitLine> {
        let bound = self.lines.len();
        self.lines
            .get_mut(i)
            .ok_or_else(|| MatrixError::out_of_range(Axis::Line, i, bound))
    }

    /// Get a mutable line without a recoverable bounds check.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not a valid line index.
    pub fn line_mut(&mut self, i: usize) -> &mut QubitLine {
        &mut self.lines[i]
    }

    /// Iterate over the lines in qubit order.
    pub fn lines(&self) -> impl Iterator<Item = &QubitLine> {
        self.lines.iter()
    }

    /// Consume the matrix and return its lines.
    pub fn into_lines(self) -> Vec<QubitLine> {
        self.lines
    }

    /// Read the cell at a coordinate.
    ///
    /// Columns past the line's physical end but below [`Self::max_column`]
    /// read as [`Cell::Empty`].
    pub fn cell(&self, i: usize, j: usize) -> MatrixResult<Cell> {
        let line = self.line(i)?;
        if let Some(&cell) = line.get(j) {
            return Ok(cell);
        }
        // past the physical end: padding or out of the matrix
        let max = self.max_column();
        if j >= max {
            return Err(MatrixError::out_of_range(Axis::Column, j, max));
        }
        Ok(Cell::Empty)
    }

    // =========================================================================
    // Classification
    // =========================================================================

    /// Check if the cell is an input, injected inputs included.
    pub fn is_input(&self, i: usize, j: usize) -> MatrixResult<bool> {
        self.cell(i, j).map(Cell::is_input)
    }

    /// Check if the cell is an output.
    pub fn is_output(&self, i: usize, j: usize) -> MatrixResult<bool> {
        self.cell(i, j).map(Cell::is_output)
    }

    /// Check if the cell is an input injected from a distillation process.
    pub fn is_distillation_ancilla_input(&self, i: usize, j: usize) -> MatrixResult<bool> {
        self.cell(i, j).map(Cell::is_distillation_ancilla_input)
    }

    /// Check if the cell is a stored wire with no gate.
    pub fn is_wire(&self, i: usize, j: usize) -> MatrixResult<bool> {
        self.cell(i, j).map(Cell::is_wire)
    }

    /// Check if no qubit exists at the coordinate.
    pub fn is_empty(&self, i: usize, j: usize) -> MatrixResult<bool> {
        self.cell(i, j).map(Cell::is_empty)
    }

    /// Check if the cell initialises the qubit, in any basis.
    pub fn is_initialisation(&self, i: usize, j: usize) -> MatrixResult<bool> {
        self.cell(i, j).map(Cell::is_initialisation)
    }

    /// Check if the cell measures the qubit, in any basis.
    pub fn is_measurement(&self, i: usize, j: usize) -> MatrixResult<bool> {
        self.cell(i, j).map(Cell::is_measurement)
    }

    pub fn is_control(&self, i: usize, j: usize) -> MatrixResult<bool> {
        self.cell(i, j).map(Cell::is_control)
    }

    pub fn is_target(&self, i: usize, j: usize) -> MatrixResult<bool> {
        self.cell(i, j).map(Cell::is_target)
    }

    /// Check if `index` is a physical offset into line `i`.
    ///
    /// Returns false for an unknown line.
    pub fn index_less_than_size(&self, i: usize, index: usize) -> bool {
        self.lines.get(i).is_some_and(|line| index < line.len())
    }

    /// Check if any qubit of the circuit is an injected distillation input.
    pub fn has_injections(&self) -> bool {
        self.lines
            .iter()
            .flatten()
            .any(|cell| cell.is_distillation_ancilla_input())
    }

    // =========================================================================
    // Gate partner search
    // =========================================================================

    /// Find the target lines of the CNOT whose control sits at `(i, j)`.
    ///
    /// Returns line indices in ascending order, or an empty vector if the
    /// cell is not a control.
    pub fn find_target(&self, i: usize, j: usize) -> MatrixResult<Vec<usize>> {
        let found = match self.cell(i, j)? {
            Cell::Control(id) => self.lines_holding(j, Cell::Target(id)),
            _ => vec![],
        };
        trace!(line = i, column = j, ?found, "find_target");
        Ok(found)
    }

    /// Find the control lines of the CNOT whose target sits at `(i, j)`.
    ///
    /// Returns line indices in ascending order, or an empty vector if the
    /// cell is not a target.
    pub fn find_control(&self, i: usize, j: usize) -> MatrixResult<Vec<usize>> {
        let found = match self.cell(i, j)? {
            Cell::Target(id) => self.lines_holding(j, Cell::Control(id)),
            _ => vec![],
        };
        trace!(line = i, column = j, ?found, "find_control");
        Ok(found)
    }

    /// Check if any line holds a CNOT control or target on `column`.
    pub fn check_for_cnot_on_column(&self, column: usize) -> bool {
        self.gate_on_column(column).is_some()
    }

    /// The first gate id found on `column`, scanning lines in order.
    pub fn gate_on_column(&self, column: usize) -> Option<GateId> {
        self.lines
            .iter()
            .find_map(|line| line.get(column).and_then(|cell| cell.gate()))
            .map(|(id, _)| id)
    }

    fn lines_holding(&self, column: usize, wanted: Cell) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.get(column) == Some(&wanted))
            .map(|(k, _)| k)
            .collect()
    }

    // =========================================================================
    // Structural edits
    // =========================================================================

    /// Delete every column consisting only of wires and empty cells.
    ///
    /// Returns the number of removed columns.
    #[instrument(skip(self))]
    pub fn remove_empty_columns(&mut self) -> usize {
        let max = self.max_column();
        let keep: Vec<bool> = (0..max)
            .map(|j| {
                self.lines
                    .iter()
                    .any(|line| line.get(j).is_some_and(|cell| cell.is_significant()))
            })
            .collect();

        let removed = keep.iter().filter(|&&k| !k).count();
        if removed == 0 {
            return 0;
        }

        for line in &mut self.lines {
            let mut column = 0;
            line.retain(|_| {
                let k = keep[column];
                column += 1;
                k
            });
        }

        debug!(removed, remaining = max - removed, "Removed empty columns");
        removed
    }

    /// Delete every line that is never initialised, measured or used by a gate.
    ///
    /// Returns the number of removed lines.
    #[instrument(skip(self))]
    pub fn remove_empty_rows(&mut self) -> usize {
        let before = self.lines.len();
        self.lines
            .retain(|line| line.iter().any(|cell| cell.is_significant()));
        let removed = before - self.lines.len();

        if removed > 0 {
            debug!(removed, remaining = self.lines.len(), "Removed empty rows");
        }
        removed
    }

    /// Insert lines before line `before_position`.
    ///
    /// `0` prepends and [`Self::nr_lines`] appends. The matrix is left
    /// untouched on error.
    pub fn insert_rows(
        &mut self,
        before_position: usize,
        rows: impl IntoIterator<Item = QubitLine>,
    ) -> MatrixResult<()> {
        let bound = self.lines.len();
        if before_position > bound {
            return Err(MatrixError::out_of_range(
                Axis::Position,
                before_position,
                bound + 1,
            ));
        }

        let old = self.lines.len();
        self.lines.splice(before_position..before_position, rows);
        debug!(
            "Inserted {} rows before line {}",
            self.lines.len() - old,
            before_position
        );
        Ok(())
    }

    /// Insert `nr_columns` columns before column `before_position`.
    ///
    /// Every line that physically reaches `before_position` gets the new
    /// cells spliced in, so all later cells shift right together. A new cell
    /// is a wire when the qubit is alive on both sides of the gap and empty
    /// otherwise. Lines shorter than `before_position` are padding there and
    /// stay as they are.
    pub fn insert_columns(&mut self, before_position: usize, nr_columns: usize) -> MatrixResult<()> {
        let max = self.max_column();
        if before_position > max {
            return Err(MatrixError::out_of_range(
                Axis::Position,
                before_position,
                max + 1,
            ));
        }
        if nr_columns == 0 {
            return Ok(());
        }

        for line in &mut self.lines {
            if line.len() < before_position {
                continue;
            }
            let alive = before_position > 0
                && line[before_position - 1].keeps_qubit_alive()
                && line
                    .get(before_position)
                    .is_some_and(|cell| !cell.is_empty());
            let fill = if alive { Cell::Wire } else { Cell::Empty };
            line.splice(
                before_position..before_position,
                std::iter::repeat_n(fill, nr_columns),
            );
        }

        debug!(
            "Inserted {} columns before column {}",
            nr_columns, before_position
        );
        Ok(())
    }

    // =========================================================================
    // Gate placement and validation
    // =========================================================================

    /// A gate id not used anywhere in the matrix.
    pub fn next_gate_id(&self) -> GateId {
        self.lines
            .iter()
            .flatten()
            .filter_map(|cell| cell.gate())
            .map(|(id, _)| id)
            .max()
            .map_or(GateId(1), |id| GateId(id.0.saturating_add(1)))
    }

    /// Place a CNOT with the given control and target lines on `column`.
    ///
    /// The column must be free of gates and every chosen cell must currently
    /// be a wire. Returns the id of the new gate.
    pub fn place_cnot(
        &mut self,
        column: usize,
        controls: &[usize],
        targets: &[usize],
    ) -> MatrixResult<GateId> {
        if controls.is_empty() || targets.is_empty() {
            return Err(MatrixError::invalid_gate(
                column,
                "a CNOT needs at least one control and one target",
            ));
        }

        let mut seen = FxHashSet::default();
        for &k in controls.iter().chain(targets) {
            if !seen.insert(k) {
                return Err(MatrixError::invalid_gate(
                    column,
                    format!("line {k} used twice"),
                ));
            }
            let cell = self.cell(k, column)?;
            if !cell.is_wire() {
                return Err(MatrixError::invalid_gate(
                    column,
                    format!("line {k} holds '{cell}', expected a wire"),
                ));
            }
        }

        if let Some(existing) = self.gate_on_column(column) {
            return Err(MatrixError::GateCollision { column, existing });
        }

        let id = self.next_gate_id();
        for &k in controls {
            self.lines[k][column] = Cell::Control(id);
        }
        for &k in targets {
            self.lines[k][column] = Cell::Target(id);
        }

        debug!(
            gate = %id,
            column,
            controls = controls.len(),
            targets = targets.len(),
            "Placed CNOT"
        );
        Ok(id)
    }

    /// Turn every cell of gate `gate` on `column` back into a wire.
    ///
    /// Returns the number of cleared cells.
    pub fn remove_gate(&mut self, column: usize, gate: GateId) -> MatrixResult<usize> {
        let max = self.max_column();
        if column >= max {
            return Err(MatrixError::out_of_range(Axis::Column, column, max));
        }

        let mut cleared = 0;
        for line in &mut self.lines {
            if let Some(cell) = line.get_mut(column) {
                if cell.gate().is_some_and(|(id, _)| id == gate) {
                    *cell = Cell::Wire;
                    cleared += 1;
                }
            }
        }

        debug!(gate = %gate, column, cleared, "Removed gate");
        Ok(cleared)
    }

    /// Check that every column holds at most one gate instance and that
    /// each instance has both a control and a target.
    pub fn validate(&self) -> MatrixResult<()> {
        for column in 0..self.max_column() {
            let mut roles: FxHashMap<GateId, (usize, usize)> = FxHashMap::default();
            for line in &self.lines {
                if let Some((id, role)) = line.get(column).and_then(|cell| cell.gate()) {
                    let entry = roles.entry(id).or_default();
                    match role {
                        GateRole::Control => entry.0 += 1,
                        GateRole::Target => entry.1 += 1,
                    }
                }
            }

            if roles.len() > 1 {
                let mut ids: Vec<_> = roles.keys().map(ToString::to_string).collect();
                ids.sort();
                return Err(MatrixError::invalid_gate(
                    column,
                    format!("column holds several gates: {}", ids.join(", ")),
                ));
            }

            if let Some((id, &(controls, targets))) = roles.iter().next() {
                if controls == 0 {
                    return Err(MatrixError::invalid_gate(
                        column,
                        format!("gate {id} has no control"),
                    ));
                }
                if targets == 0 {
                    return Err(MatrixError::invalid_gate(
                        column,
                        format!("gate {id} has no target"),
                    ));
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Columns holding at least one gate cell, in ascending order.
    pub fn gate_columns(&self) -> Vec<usize> {
        (0..self.max_column())
            .filter(|&column| self.check_for_cnot_on_column(column))
            .collect()
    }

    /// Number of distinct gate instances, counted per column.
    pub fn count_gates(&self) -> usize {
        self.gate_columns()
            .into_iter()
            .map(|column| {
                self.lines
                    .iter()
                    .filter_map(|line| line.get(column).and_then(|cell| cell.gate()))
                    .map(|(id, _)| id)
                    .collect::<FxHashSet<_>>()
                    .len()
            })
            .sum()
    }

    /// Print the matrix to stdout, for debugging.
    pub fn print_circ(&self) {
        println!("{self}");
    }
}

impl From<Vec<QubitLine>> for CircuitMatrix {
    fn from(lines: Vec<QubitLine>) -> Self {
        Self::new(lines)
    }
}

impl FromIterator<QubitLine> for CircuitMatrix {
    fn from_iter<T: IntoIterator<Item = QubitLine>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for CircuitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max = self.max_column();
        let width = self
            .lines
            .iter()
            .flatten()
            .map(|cell| cell.to_string().len())
            .max()
            .unwrap_or(1);
        let label = format!("q{}", self.lines.len().saturating_sub(1)).len();

        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let row: Vec<String> = (0..max)
                .map(|j| {
                    let cell = line.get(j).copied().unwrap_or(Cell::Empty);
                    format!("{:<width$}", cell.to_string())
                })
                .collect();
            let row = format!("{:>label$}: {}", format!("q{i}"), row.join(" "));
            f.write_str(row.trim_end())?;
        }
        Ok(())
    }
}

/// Parses one line per text row, whitespace-separated cell tokens.
///
/// An optional `label:` prefix is ignored, so rendered matrices parse back.
/// Blank rows are skipped.
impl FromStr for CircuitMatrix {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.lines()
            .filter(|row| !row.trim().is_empty())
            .map(|row| {
                let cells = row.split_once(':').map_or(row, |(_, rest)| rest);
                cells.split_whitespace().map(str::parse).collect()
            })
            .collect::<MatrixResult<Vec<QubitLine>>>()
            .map(Self::new)
    }
}
