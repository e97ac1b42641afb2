//! Circmat Circuit Matrix
//!
//! This crate provides a matrix representation of quantum circuits for
//! structural rewriting. It is the substrate that scheduling, CNOT synthesis
//! and distillation insertion passes edit in place.
//!
//! # Overview
//!
//! A [`CircuitMatrix`] is an ordered list of qubit lines. Each line holds one
//! [`Cell`] per time step. Multi-qubit CNOTs occupy a single column and tie
//! their cells together with a shared [`GateId`], which supports fan-out
//! (one control, many targets) and fan-in (many controls, one target).
//!
//! # Core Components
//!
//! - **Cells**: [`Cell`], [`Basis`], [`GateId`] for the contents of a coordinate
//! - **Matrix**: [`CircuitMatrix`] with classification, partner search and
//!   structural edits
//! - **Errors**: [`MatrixError`] and the [`MatrixResult`] alias
//!
//! # Example: Moving a CNOT
//!
//! ```rust
//! use circmat_ir::CircuitMatrix;
//!
//! let mut matrix: CircuitMatrix = "iz c1 mz\niz t1 mz".parse().unwrap();
//! assert!(matrix.check_for_cnot_on_column(1));
//! assert_eq!(matrix.find_target(0, 1).unwrap(), vec![1]);
//!
//! // Make room for two more time steps before the CNOT
//! matrix.insert_columns(1, 2).unwrap();
//! assert_eq!(matrix.find_target(0, 3).unwrap(), vec![1]);
//!
//! // And squeeze them out again
//! assert_eq!(matrix.remove_empty_columns(), 2);
//! assert_eq!(matrix.max_column(), 3);
//! ```
//!
//! # Example: Placing a Gate
//!
//! ```rust
//! use circmat_ir::{CircuitMatrix, GateId, MatrixError};
//!
//! let mut matrix: CircuitMatrix = "in - out\nin - out\nin - out".parse().unwrap();
//! let gate = matrix.place_cnot(1, &[0], &[1, 2]).unwrap();
//! assert_eq!(gate, GateId(1));
//!
//! // Only one gate instance fits in a column
//! assert!(matches!(
//!     matrix.place_cnot(1, &[0], &[2]),
//!     Err(MatrixError::InvalidGate { .. })
//! ));
//! ```
//!
//! # Cell Tokens
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `.` | No qubit |
//! | `-` | Wire |
//! | `in`, `out` | Input, output |
//! | `din` | Input injected from distillation |
//! | `iz`, `ix`, `iy`, `ia` | Initialisation in Z, X, Y, A |
//! | `mz`, `mx`, `my`, `ma` | Measurement in Z, X, Y, A |
//! | `c<n>`, `t<n>` | Control, target of gate `n` |

pub mod cell;
pub mod error;
pub mod matrix;

pub use cell::{Basis, Cell, GateId, GateRole, QubitLine};
pub use error::{Axis, MatrixError, MatrixResult};
pub use matrix::CircuitMatrix;
