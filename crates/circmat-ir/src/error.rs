//! Error types for the matrix crate.

use std::fmt;

use thiserror::Error;

use crate::cell::GateId;

/// The axis an out-of-range index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// A qubit line (row) index.
    Line,
    /// A column (time step) index.
    Column,
    /// An insertion position.
    Position,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Line => f.write_str("line"),
            Axis::Column => f.write_str("column"),
            Axis::Position => f.write_str("position"),
        }
    }
}

/// Errors that can occur in matrix operations.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MatrixError {
    /// Index outside the valid bounds of the matrix.
    #[error("{axis} index {index} out of range (bound {bound})")]
    OutOfRange {
        /// Which kind of index was rejected.
        axis: Axis,
        /// The offending index.
        index: usize,
        /// The exclusive bound the index was checked against.
        bound: usize,
    },

    /// A column already holds a multi-qubit gate instance.
    #[error("Column {column} already holds gate {existing}")]
    GateCollision {
        /// The column that was targeted.
        column: usize,
        /// The gate already occupying it.
        existing: GateId,
    },

    /// A gate instance violates the control/target structure.
    #[error("Invalid gate on column {column}: {reason}")]
    InvalidGate {
        /// Column of the offending gate.
        column: usize,
        /// Human-readable explanation.
        reason: String,
    },

    /// A cell token could not be parsed.
    #[error("Invalid cell token '{0}'")]
    InvalidCell(String),
}

impl MatrixError {
    pub(crate) fn out_of_range(axis: Axis, index: usize, bound: usize) -> Self {
        MatrixError::OutOfRange { axis, index, bound }
    }

    pub(crate) fn invalid_gate(column: usize, reason: impl Into<String>) -> Self {
        MatrixError::InvalidGate {
            column,
            reason: reason.into(),
        }
    }
}

/// Result type for matrix operations.
pub type MatrixResult<T> = Result<T, MatrixError>;
