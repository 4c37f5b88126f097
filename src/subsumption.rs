//! Fixed-point subsumption over a whole CNF formula: drop any clause that
//! is a superset (with matching literal signs) of another clause already
//! present, since the smaller clause is the stricter constraint.
//!
//! Grounded in `original_source/encoding/dnfToCNF.c`'s `subsumption`,
//! which repeats a single sweep until no clause is removed. The
//! reference keeps per-literal side lists to avoid rescanning the full
//! clause width on every probe; at the scale this crate's puzzles run at
//! a plain sort-by-length plus linear scan is simpler and gives the same
//! result, so that bookkeeping is not reproduced here.

use crate::clause::Clause;

/// Removes every clause subsumed by some other clause in `clauses`,
/// iterating to a fixed point (removing one subsumed clause can expose
/// another). Clauses are checked shortest-first since a shorter clause
/// can subsume a longer one but never the reverse.
pub fn subsume(clauses: Vec<Clause>) -> Vec<Clause> {
    let mut current = clauses;
    loop {
        let before = current.len();
        current = subsume_one_pass(current);
        if current.len() == before {
            return current;
        }
    }
}

fn subsume_one_pass(mut clauses: Vec<Clause>) -> Vec<Clause> {
    clauses.sort_by_key(Clause::len);
    let mut keep = vec![true; clauses.len()];
    for i in 0..clauses.len() {
        if !keep[i] {
            continue;
        }
        for j in (i + 1)..clauses.len() {
            if !keep[j] {
                continue;
            }
            if clauses[i].subsumes(&clauses[j]) {
                keep[j] = false;
            }
        }
    }
    clauses
        .into_iter()
        .zip(keep)
        .filter_map(|(c, k)| k.then_some(c))
        .collect()
}
