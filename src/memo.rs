//! Owns the two memo tables the DNF-based encoder needs across a whole
//! batch run: one for DNF terms, one for their converted CNF. Both are
//! keyed by `(description, line length)` and grow monotonically -- once
//! a description/length pair has been solved, every later line with the
//! same shape reuses the cached formula rather than rebuilding it.
//!
//! Grounded in `original_source/encoding/dnfToCNF.c`'s `DNFtreeNode`/
//! `CNFtreeNode` pair (`T_D`, `T_C` in the line encoding's own
//! terminology): a process-wide, append-only cache that a whole batch of
//! puzzles shares.

use crate::clause::{Clause, Cnf};
use crate::description::Description;
use crate::dnf::DnfMemo;
use crate::dnf_cnf::dnf_to_cnf;
use crate::error::EncodeError;
use crate::types::VarId;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::trace;

/// Holds every memo table the encoders need. One `Encoder` is shared
/// across an entire batch of puzzles so repeated line shapes (a blank
/// row, a common small run) are only ever solved once.
#[derive(Default)]
pub struct Encoder {
    dnf: DnfMemo,
    /// CNF for a description/length pair in *local* variable numbering
    /// (1..=line_len); callers remap into a line's actual cell variables.
    cnf: HashMap<(Description, u32), Rc<Cnf>>,
}

impl Encoder {
    pub fn new() -> Self {
        Encoder::default()
    }

    /// Encodes one line via the DNF-enumeration pipeline (DE), remapped
    /// onto `cell_vars`. Unlike the automaton encoder, an infeasible
    /// description is not an error here: `Fill` simply has no terms, and
    /// `dnf_to_cnf` turns that into a trivially unsatisfiable formula
    /// rather than rejecting the line outright.
    pub fn encode_line_de(
        &mut self,
        desc: &Description,
        cell_vars: &[VarId],
    ) -> Result<Cnf, EncodeError> {
        let line_len = cell_vars.len() as u32;
        let local = self.local_cnf(desc, line_len);
        Ok(remap(&local, cell_vars))
    }

    fn local_cnf(&mut self, desc: &Description, line_len: u32) -> Rc<Cnf> {
        let key = (desc.clone(), line_len);
        if let Some(hit) = self.cnf.get(&key) {
            trace!(%desc, line_len, "cnf memo hit");
            return Rc::clone(hit);
        }
        trace!(%desc, line_len, "cnf memo miss");
        let terms = self.dnf.fill(desc, line_len);
        let scaled: Vec<Vec<i32>> = terms.iter().map(|t| t.to_scaled()).collect();
        let cnf = dnf_to_cnf(&scaled, line_len as usize);
        let rc = Rc::new(cnf);
        self.cnf.insert(key, Rc::clone(&rc));
        rc
    }
}

/// Rewrites a CNF built over local indices `1..=cell_vars.len()` into one
/// over the actual (globally-numbered) cell variables of a line.
fn remap(local: &Cnf, cell_vars: &[VarId]) -> Cnf {
    local
        .clauses()
        .iter()
        .map(|clause| {
            let lits = clause
                .literals()
                .iter()
                .map(|&l| {
                    let idx = (l.unsigned_abs() - 1) as usize;
                    let var = cell_vars[idx] as i32;
                    if l > 0 {
                        var
                    } else {
                        -var
                    }
                })
                .collect();
            Clause::new(lits)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remapped_cnf_uses_cell_variables() {
        let mut encoder = Encoder::new();
        let desc = Description::new(vec![2]).unwrap();
        let cell_vars = vec![10, 11];
        let cnf = encoder.encode_line_de(&desc, &cell_vars).unwrap();
        for clause in cnf.clauses() {
            for &lit in clause.literals() {
                assert!(cell_vars.contains(&(lit.unsigned_abs())));
            }
        }
    }

    #[test]
    fn repeated_description_reuses_cache() {
        let mut encoder = Encoder::new();
        let desc = Description::new(vec![1, 1]).unwrap();
        let a = encoder.encode_line_de(&desc, &[1, 2, 3, 4]).unwrap();
        let b = encoder.encode_line_de(&desc, &[5, 6, 7, 8]).unwrap();
        assert_eq!(a.len(), b.len());
    }
}
