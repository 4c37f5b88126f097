//! Error taxonomy for the encoder and the batch driver.
//!
//! Split in two, mirroring the two failure domains: [`EncodeError`] covers
//! per-line/per-puzzle encoding failures that a caller may want to recover
//! from (skip a malformed puzzle, keep going), while [`DriverError`] covers
//! the batch I/O loop around it.

use thiserror::Error;

/// Failures that can occur while building an automaton or a CNF/DNF
/// encoding for a single line or puzzle.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("description does not fit line of length {line_len}: runs sum to {run_sum} with {run_count} gaps required")]
    InfeasibleDescription {
        line_len: u32,
        run_sum: u32,
        run_count: usize,
    },

    #[error("run length must be at least 1, got {0}")]
    ZeroLengthRun(u32),

    #[error("automaton construction requires a non-empty description")]
    EmptyNfaDescription,

    #[error("variable id overflowed u32 while encoding ({context})")]
    VariableOverflow { context: &'static str },

    #[error("clause count overflowed while sizing the automaton encoding for a line of length {line_len}")]
    ClauseCountOverflow { line_len: u32 },

    #[error("puzzle dimensions must be positive, got {rows} rows and {columns} columns")]
    EmptyPuzzle { rows: u32, columns: u32 },
}

/// Failures surfaced by the batch driver: CLI, file I/O, and malformed
/// puzzle input that the encoder itself never sees.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse puzzle JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("puzzle {index} is malformed: {reason}")]
    MalformedPuzzle { index: usize, reason: String },

    #[error("no puzzle found at index {index}")]
    MissingPuzzle { index: usize },

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
