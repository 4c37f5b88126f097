//! The puzzle data model and the per-puzzle CNF assembler: scales
//! per-line encodings into one global variable space, unions rows and
//! columns, and (for the DNF path) runs unit-literal cleanup and a final
//! subsumption pass.
//!
//! Grounded in `original_source/encoding/regExEncoding.c`'s `main` driving
//! loop (global `v(r,c) = r*C + c + 1` numbering, row-then-column clause
//! order) and `dnfToCNF.c`'s `main` (the DE path's extra unit-literal
//! cleanup before the final subsumption pass).

use crate::ae;
use crate::board::Board;
use crate::clause::{Clause, Cnf};
use crate::description::Description;
use crate::error::EncodeError;
use crate::memo::Encoder;
use crate::subsumption;
use crate::types::{VarAllocator, VarId};
use std::collections::HashMap;

/// Which encoder to run per line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Automaton encoding: linear in line length, no memoization needed.
    Ae,
    /// DNF-enumeration encoding: memoized across a whole batch.
    De,
}

/// A Nonogram puzzle: its shape and every row/column description.
#[derive(Clone, Debug)]
pub struct Puzzle {
    rows: usize,
    cols: usize,
    row_descriptions: Vec<Description>,
    column_descriptions: Vec<Description>,
}

impl Puzzle {
    pub fn new(
        rows: usize,
        cols: usize,
        row_descriptions: Vec<Description>,
        column_descriptions: Vec<Description>,
    ) -> Result<Self, EncodeError> {
        if rows == 0 || cols == 0 {
            return Err(EncodeError::EmptyPuzzle {
                rows: rows as u32,
                columns: cols as u32,
            });
        }
        Ok(Puzzle {
            rows,
            cols,
            row_descriptions,
            column_descriptions,
        })
    }

    pub fn from_board(board: &Board) -> Self {
        Puzzle {
            rows: board.rows(),
            cols: board.cols(),
            row_descriptions: board.row_descriptions(),
            column_descriptions: board.column_descriptions(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row_descriptions(&self) -> &[Description] {
        &self.row_descriptions
    }

    pub fn column_descriptions(&self) -> &[Description] {
        &self.column_descriptions
    }

    /// The global 1-based variable numbering `v(r,c) = r*C + c + 1`.
    pub fn cell_var(&self, row: usize, col: usize) -> VarId {
        (row * self.cols + col + 1) as VarId
    }

    fn row_cell_vars(&self, row: usize) -> Vec<VarId> {
        (0..self.cols).map(|c| self.cell_var(row, c)).collect()
    }

    fn column_cell_vars(&self, col: usize) -> Vec<VarId> {
        (0..self.rows).map(|r| self.cell_var(r, col)).collect()
    }
}

/// The assembled CNF for a whole puzzle, ready to hand to the DIMACS
/// writer.
pub struct EncodedCnf {
    pub num_vars: VarId,
    pub clauses: Vec<Clause>,
}

/// One line's inputs and (for the AE path) variable layout, reported
/// alongside the assembled puzzle CNF so a caller that already knows each
/// line's filling -- e.g. a test checking that a board satisfies its own
/// encoding -- can reconstruct a full satisfying assignment without
/// re-deriving `encode_puzzle`'s internal variable allocation.
pub struct LineEncoding {
    pub description: Description,
    pub cell_vars: Vec<VarId>,
    pub layout: Option<ae::LineLayout>,
}

/// Assembles the full CNF for `puzzle` using `strategy`, sharing
/// `encoder`'s memo tables across whichever lines take the DE path.
pub fn encode_puzzle(
    puzzle: &Puzzle,
    encoder: &mut Encoder,
    strategy: Strategy,
) -> Result<EncodedCnf, EncodeError> {
    encode_puzzle_with_layout(puzzle, encoder, strategy).map(|(cnf, _)| cnf)
}

/// Same as [`encode_puzzle`], additionally returning each row's then each
/// column's [`LineEncoding`] in encoding order.
pub fn encode_puzzle_with_layout(
    puzzle: &Puzzle,
    encoder: &mut Encoder,
    strategy: Strategy,
) -> Result<(EncodedCnf, Vec<LineEncoding>), EncodeError> {
    check_variable_budget(puzzle)?;

    let cell_count = (puzzle.rows * puzzle.cols) as VarId;
    let mut alloc = VarAllocator::starting_at(cell_count + 1);
    let mut clauses: Vec<Clause> = Vec::new();
    let mut lines: Vec<LineEncoding> = Vec::with_capacity(puzzle.rows + puzzle.cols);

    for row in 0..puzzle.rows {
        let cell_vars = puzzle.row_cell_vars(row);
        let description = puzzle.row_descriptions[row].clone();
        let (cnf, layout) = encode_line(&description, &cell_vars, encoder, &mut alloc, strategy)?;
        clauses.extend(cnf.into_clauses());
        lines.push(LineEncoding { description, cell_vars, layout });
    }
    for col in 0..puzzle.cols {
        let cell_vars = puzzle.column_cell_vars(col);
        let description = puzzle.column_descriptions[col].clone();
        let (cnf, layout) = encode_line(&description, &cell_vars, encoder, &mut alloc, strategy)?;
        clauses.extend(cnf.into_clauses());
        lines.push(LineEncoding { description, cell_vars, layout });
    }

    // Row and column encodings of the same puzzle routinely restate the
    // same forced cell (e.g. every cell of an all-blank puzzle is pinned
    // off by both its row and its column); fold those duplicates away
    // regardless of strategy. The DE path additionally propagates each
    // forced literal into every other clause before a second pass.
    clauses = subsumption::subsume(clauses);
    if strategy == Strategy::De {
        clauses = propagate_fixed_literals(clauses);
        clauses = subsumption::subsume(clauses);
    }

    let num_vars = (alloc.peek() - 1).max(cell_count);
    Ok((EncodedCnf { num_vars, clauses }, lines))
}

fn encode_line(
    desc: &Description,
    cell_vars: &[VarId],
    encoder: &mut Encoder,
    alloc: &mut VarAllocator,
    strategy: Strategy,
) -> Result<(Cnf, Option<ae::LineLayout>), EncodeError> {
    match strategy {
        Strategy::Ae => ae::encode_line_with_layout(desc, cell_vars, alloc),
        Strategy::De => encoder.encode_line_de(desc, cell_vars).map(|cnf| (cnf, None)),
    }
}

/// Finds every unit clause, then removes the opposite-signed literal of
/// each forced variable from every other clause.
fn propagate_fixed_literals(clauses: Vec<Clause>) -> Vec<Clause> {
    let mut fixed: HashMap<VarId, bool> = HashMap::new();
    for clause in &clauses {
        if clause.len() == 1 {
            let lit = clause.literals()[0];
            fixed.insert(lit.unsigned_abs(), lit > 0);
        }
    }
    if fixed.is_empty() {
        return clauses;
    }
    clauses
        .into_iter()
        .map(|clause| {
            if clause.len() == 1 {
                return clause;
            }
            let kept: Vec<_> = clause
                .literals()
                .iter()
                .copied()
                .filter(|&lit| match fixed.get(&lit.unsigned_abs()) {
                    Some(&value) => (lit > 0) == value,
                    None => true,
                })
                .collect();
            Clause::new(kept)
        })
        .collect()
}

fn check_variable_budget(puzzle: &Puzzle) -> Result<(), EncodeError> {
    let cell_count = (puzzle.rows * puzzle.cols) as u64;
    let mut total = cell_count;
    for desc in puzzle
        .row_descriptions
        .iter()
        .chain(puzzle.column_descriptions.iter())
    {
        if !desc.is_empty() {
            total = total.saturating_add(ae::unique_var_count(desc, puzzle.cols.max(puzzle.rows) as u32));
        }
    }
    if total > i32::MAX as u64 {
        return Err(EncodeError::VariableOverflow {
            context: "puzzle assembly",
        });
    }
    Ok(())
}
