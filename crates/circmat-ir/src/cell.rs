//! Cell codes stored at each (line, column) coordinate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

/// Identifier shared by every cell of one multi-qubit gate instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GateId(pub u32);

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

impl From<u32> for GateId {
    fn from(id: u32) -> Self {
        GateId(id)
    }
}

/// Basis used by initialisations and measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Basis {
    /// Computational basis, |0⟩ on initialisation.
    Z,
    /// Hadamard basis, |+⟩ on initialisation.
    X,
    /// Y basis, |Y⟩ on initialisation.
    Y,
    /// Magic-state basis, |A⟩ on initialisation.
    A,
}

impl Basis {
    /// All bases in token order.
    pub const ALL: [Basis; 4] = [Basis::Z, Basis::X, Basis::Y, Basis::A];

    /// The single-letter token of this basis.
    #[inline]
    pub fn letter(self) -> char {
        match self {
            Basis::Z => 'z',
            Basis::X => 'x',
            Basis::Y => 'y',
            Basis::A => 'a',
        }
    }

    /// Parse a basis letter (case-insensitive).
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'z' => Some(Basis::Z),
            'x' => Some(Basis::X),
            'y' => Some(Basis::Y),
            'a' => Some(Basis::A),
            _ => None,
        }
    }
}

/// Role of a cell within a multi-qubit gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateRole {
    /// CNOT control.
    Control,
    /// CNOT target.
    Target,
}

/// Contents of one matrix cell.
///
/// Serialized as a compact string token:
///
/// | Token | Cell |
/// |-------|------|
/// | `.` | [`Cell::Empty`] |
/// | `-` | [`Cell::Wire`] |
/// | `in` / `out` | [`Cell::Input`] / [`Cell::Output`] |
/// | `din` | [`Cell::DistillationInput`] |
/// | `iz`, `ix`, `iy`, `ia` | [`Cell::Initialisation`] |
/// | `mz`, `mx`, `my`, `ma` | [`Cell::Measurement`] |
/// | `c3` / `t3` | [`Cell::Control`] / [`Cell::Target`] of gate 3 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Cell {
    /// No qubit exists here.
    #[default]
    Empty,
    /// Qubit passes through unmodified.
    Wire,
    /// Start of a qubit timeline.
    Input,
    /// Input injected from a distillation process.
    DistillationInput,
    /// End of a qubit timeline.
    Output,
    /// Initialisation in a basis.
    Initialisation(Basis),
    /// Measurement in a basis.
    Measurement(Basis),
    /// Control of a CNOT gate instance.
    Control(GateId),
    /// Target of a CNOT gate instance.
    Target(GateId),
}

impl Cell {
    /// Check if this cell is an input (ordinary or injected).
    #[inline]
    pub fn is_input(self) -> bool {
        matches!(self, Cell::Input | Cell::DistillationInput)
    }

    /// Check if this cell is an output.
    #[inline]
    pub fn is_output(self) -> bool {
        matches!(self, Cell::Output)
    }

    /// Check if this cell is an injected distillation input.
    #[inline]
    pub fn is_distillation_ancilla_input(self) -> bool {
        matches!(self, Cell::DistillationInput)
    }

    #[inline]
    pub fn is_wire(self) -> bool {
        matches!(self, Cell::Wire)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub fn is_initialisation(self) -> bool {
        matches!(self, Cell::Initialisation(_))
    }

    #[inline]
    pub fn is_measurement(self) -> bool {
        matches!(self, Cell::Measurement(_))
    }

    #[inline]
    pub fn is_control(self) -> bool {
        matches!(self, Cell::Control(_))
    }

    #[inline]
    pub fn is_target(self) -> bool {
        matches!(self, Cell::Target(_))
    }

    /// Check if this cell belongs to a multi-qubit gate.
    #[inline]
    pub fn is_gate(self) -> bool {
        matches!(self, Cell::Control(_) | Cell::Target(_))
    }

    /// Gate id and role, if this cell belongs to a gate.
    #[inline]
    pub fn gate(self) -> Option<(GateId, GateRole)> {
        match self {
            Cell::Control(id) => Some((id, GateRole::Control)),
            Cell::Target(id) => Some((id, GateRole::Target)),
            _ => None,
        }
    }

    /// Check if this cell carries meaning beyond a plain wire or padding.
    ///
    /// Columns and lines made only of non-significant cells are pruned by
    /// the empty-column and empty-row removals.
    #[inline]
    pub fn is_significant(self) -> bool {
        !matches!(self, Cell::Empty | Cell::Wire)
    }

    /// Check if the qubit is still alive after this cell.
    #[inline]
    pub(crate) fn keeps_qubit_alive(self) -> bool {
        !matches!(self, Cell::Empty | Cell::Output | Cell::Measurement(_))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => f.write_str("."),
            Cell::Wire => f.write_str("-"),
            Cell::Input => f.write_str("in"),
            Cell::DistillationInput => f.write_str("din"),
            Cell::Output => f.write_str("out"),
            Cell::Initialisation(b) => write!(f, "i{}", b.letter()),
            Cell::Measurement(b) => write!(f, "m{}", b.letter()),
            Cell::Control(id) => write!(f, "c{}", id.0),
            Cell::Target(id) => write!(f, "t{}", id.0),
        }
    }
}

impl FromStr for Cell {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = || MatrixError::InvalidCell(s.to_string());

        match token.to_ascii_lowercase().as_str() {
            "." | "" => return Ok(Cell::Empty),
            "-" => return Ok(Cell::Wire),
            "in" => return Ok(Cell::Input),
            "din" => return Ok(Cell::DistillationInput),
            "out" => return Ok(Cell::Output),
            _ => {}
        }

        let mut chars = token.chars();
        let head = chars.next().ok_or_else(invalid)?;
        let rest = chars.as_str();

        match head.to_ascii_lowercase() {
            'i' | 'm' => {
                let mut letters = rest.chars();
                let basis = letters
                    .next()
                    .and_then(Basis::from_letter)
                    .ok_or_else(invalid)?;
                if letters.next().is_some() {
                    return Err(invalid());
                }
                if head.eq_ignore_ascii_case(&'i') {
                    Ok(Cell::Initialisation(basis))
                } else {
                    Ok(Cell::Measurement(basis))
                }
            }
            'c' | 't' => {
                // canonical decimal only, so tokens render back unchanged
                let canonical = !rest.is_empty()
                    && rest.bytes().all(|b| b.is_ascii_digit())
                    && (rest == "0" || !rest.starts_with('0'));
                if !canonical {
                    return Err(invalid());
                }
                let id: u32 = rest.parse().map_err(|_| invalid())?;
                if head.eq_ignore_ascii_case(&'c') {
                    Ok(Cell::Control(GateId(id)))
                } else {
                    Ok(Cell::Target(GateId(id)))
                }
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Cell {
    type Error = MatrixError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Cell> for String {
    fn from(cell: Cell) -> Self {
        cell.to_string()
    }
}

/// One qubit timeline: a cell per column.
pub type QubitLine = Vec<Cell>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        let cells = [
            Cell::Empty,
            Cell::Wire,
            Cell::Input,
            Cell::DistillationInput,
            Cell::Output,
            Cell::Initialisation(Basis::A),
            Cell::Measurement(Basis::X),
            Cell::Control(GateId(12)),
            Cell::Target(GateId(0)),
        ];
        for cell in cells {
            assert_eq!(cell.to_string().parse::<Cell>().unwrap(), cell);
        }
        assert_eq!("MZ".parse::<Cell>().unwrap(), Cell::Measurement(Basis::Z));
        assert_eq!("t0".parse::<Cell>().unwrap(), Cell::Target(GateId(0)));
    }

    #[test]
    fn test_invalid_tokens() {
        for token in ["q", "iq", "izz", "c", "tx", "c-1", "c+1", "t+01", "c01"] {
            assert_eq!(
                token.parse::<Cell>(),
                Err(MatrixError::InvalidCell(token.to_string()))
            );
        }
    }

    #[test]
    fn test_distillation_input_is_input() {
        assert!(Cell::DistillationInput.is_input());
        assert!(Cell::Input.is_input());
        assert!(!Cell::Input.is_distillation_ancilla_input());
    }

    #[test]
    fn test_gate_role() {
        assert_eq!(
            Cell::Control(GateId(1)).gate(),
            Some((GateId(1), GateRole::Control))
        );
        assert_eq!(Cell::Wire.gate(), None);
        assert!(!Cell::Wire.is_significant());
        assert!(Cell::Target(GateId(1)).is_significant());
    }

    #[test]
    fn test_serde_token() {
        let json = serde_json::to_string(&vec![Cell::Input, Cell::Control(GateId(3))]).unwrap();
        assert_eq!(json, r#"["in","c3"]"#);
        let back: Vec<Cell> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Cell::Input, Cell::Control(GateId(3))]);
    }
}
