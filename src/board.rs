//! A filled grid of cells, and the row/column descriptions it implies.
//!
//! Grounded in `original_source/encoding/regExEncoding.c`'s `randomFilled`,
//! `descriptionsFromBoard` and `transpose`: a dense boolean grid, seeded
//! random generation at a given fill density, and run-length extraction
//! per row/column. The reference uses a Mersenne Twister
//! (`mtwister.h`) for determinism; this crate uses `rand`'s seeded
//! `StdRng` for the same purpose, which is the ecosystem's standard
//! substitute.

use crate::description::Description;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A dense, row-major grid of filled/empty cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Board {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    /// Builds a board of the given shape with each cell independently
    /// filled with probability `density`, using a deterministic seed.
    pub fn random(rows: usize, cols: usize, density: f64, seed: u64) -> Board {
        let mut rng = StdRng::seed_from_u64(seed);
        let cells = (0..rows * cols)
            .map(|_| rng.gen_bool(density.clamp(0.0, 1.0)))
            .collect();
        Board { rows, cols, cells }
    }

    /// Builds a board directly from a row-major cell vector.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<bool>) -> Board {
        assert_eq!(cells.len(), rows * cols, "cell count must match rows*cols");
        Board { rows, cols, cells }
    }

    pub fn row_description(&self, row: usize) -> Description {
        runs_from(self.row(row))
    }

    pub fn column_description(&self, col: usize) -> Description {
        runs_from(self.column(col))
    }

    pub fn row(&self, row: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.cols).map(move |c| self.get(row, c))
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.rows).map(move |r| self.get(r, col))
    }

    /// The board with rows and columns swapped.
    pub fn transpose(&self) -> Board {
        let mut cells = vec![false; self.rows * self.cols];
        for r in 0..self.rows {
            for c in 0..self.cols {
                cells[c * self.rows + r] = self.get(r, c);
            }
        }
        Board {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    pub fn row_descriptions(&self) -> Vec<Description> {
        (0..self.rows).map(|r| self.row_description(r)).collect()
    }

    pub fn column_descriptions(&self) -> Vec<Description> {
        (0..self.cols).map(|c| self.column_description(c)).collect()
    }
}

fn runs_from(mut bits: impl Iterator<Item = bool>) -> Description {
    let mut runs = Vec::new();
    let mut current = 0u32;
    while let Some(filled) = bits.next() {
        if filled {
            current += 1;
        } else if current > 0 {
            runs.push(current);
            current = 0;
        }
    }
    if current > 0 {
        runs.push(current);
    }
    Description::new(runs).expect("run lengths extracted from a board are always positive")
}
