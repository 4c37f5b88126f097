//! Crate `nonogram_cnf` encodes Nonogram puzzles as DIMACS CNF formulas.
//!
//! Two encoders share a single line description model: the automaton
//! encoder (`ae`) builds one small NFA per line and translates it
//! directly into clauses; the DNF encoder (`dnf`, `dnf_cnf`) enumerates
//! every legal filling and converts the resulting disjunction into CNF
//! via memoized distributive expansion. A [`puzzle::Puzzle`] ties a
//! grid's row and column descriptions together and
//! [`puzzle::encode_puzzle`] assembles either encoder's per-line output
//! into one global CNF.
//!
//! ```no_run
//! use nonogram_cnf::description::Description;
//! use nonogram_cnf::memo::Encoder;
//! use nonogram_cnf::puzzle::{encode_puzzle, Puzzle, Strategy};
//!
//! let row = Description::new(vec![1]).unwrap();
//! let puzzle = Puzzle::new(2, 2, vec![row.clone(), row.clone()], vec![row.clone(), row]).unwrap();
//! let mut encoder = Encoder::new();
//! let encoded = encode_puzzle(&puzzle, &mut encoder, Strategy::Ae).unwrap();
//! assert!(encoded.num_vars >= 4);
//! ```

pub mod ae;
pub mod board;
pub mod clause;
pub mod config;
pub mod description;
pub mod dimacs;
pub mod dnf;
pub mod dnf_cnf;
pub mod error;
pub mod io;
pub mod memo;
pub mod nfa;
pub mod puzzle;
pub mod subsumption;
pub mod types;
