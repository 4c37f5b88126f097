//! JSON puzzle loading, per the schema of §6: `rowCount`, `columnCount`,
//! `rows`, `columns`, each inner array an ordered run-length description
//! (an empty inner array is an empty line).

use crate::description::Description;
use crate::error::{DriverError, EncodeError};
use crate::puzzle::Puzzle;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct PuzzleDocument {
    #[serde(rename = "rowCount")]
    row_count: usize,
    #[serde(rename = "columnCount")]
    column_count: usize,
    rows: Vec<Vec<u32>>,
    columns: Vec<Vec<u32>>,
}

/// Loads and validates a single puzzle from a JSON file. Returns
/// `Err(DriverError::MalformedPuzzle)` if the schema or its internal
/// consistency (array lengths matching the declared counts, a valid
/// description in every entry) does not hold.
pub fn load_file(path: &Path, index: usize) -> Result<Puzzle, DriverError> {
    let text = std::fs::read_to_string(path)?;
    load_str(&text, index)
}

fn load_str(text: &str, index: usize) -> Result<Puzzle, DriverError> {
    let doc: PuzzleDocument = serde_json::from_str(text)?;
    to_puzzle(doc, index)
}

fn to_puzzle(doc: PuzzleDocument, index: usize) -> Result<Puzzle, DriverError> {
    let malformed = |reason: String| DriverError::MalformedPuzzle { index, reason };

    if doc.rows.len() != doc.row_count {
        return Err(malformed(format!(
            "declared rowCount {} but found {} row descriptions",
            doc.row_count,
            doc.rows.len()
        )));
    }
    if doc.columns.len() != doc.column_count {
        return Err(malformed(format!(
            "declared columnCount {} but found {} column descriptions",
            doc.column_count,
            doc.columns.len()
        )));
    }

    let row_descriptions = parse_descriptions(&doc.rows).map_err(|e| malformed(e.to_string()))?;
    let column_descriptions =
        parse_descriptions(&doc.columns).map_err(|e| malformed(e.to_string()))?;

    Puzzle::new(doc.row_count, doc.column_count, row_descriptions, column_descriptions)
        .map_err(DriverError::from)
}

fn parse_descriptions(raw: &[Vec<u32>]) -> Result<Vec<Description>, EncodeError> {
    raw.iter().map(|runs| Description::new(runs.clone())).collect()
}
