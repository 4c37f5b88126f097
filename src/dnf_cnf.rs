//! Converts a line's DNF (one term per satisfying assignment) into an
//! equivalent CNF, by distributing the disjunction of conjunctions into a
//! conjunction of disjunctions and pruning away the combinatorial blowup
//! that a naive distribution produces.
//!
//! Grounded in `original_source/encoding/dnfToCNF.c`'s `DNFtoCNF`,
//! `getFrequencies`, `f`/`explode` and the subsumption ledger
//! (`addToLedger`/`ledgerSubsumes`). That C function picks the
//! highest-frequency literal as a "pivot": any DNF term already containing
//! the pivot literal is automatically satisfied by a clause that contains
//! it too, so only the *other* terms ("free" terms) need a representative
//! literal of their own in that clause. Terms that agree on every cell's
//! value no matter which pivot is chosen collapse into unit clauses.
//!
//! The reference implementation stops after the single highest-frequency
//! non-unit literal (an unconditional `break` right after the first
//! pivot's enumeration) -- an incompleteness this crate does not
//! reproduce; see the resolution recorded in `DESIGN.md`. Every literal
//! with positive frequency is used as a pivot here, in descending
//! frequency order, accumulating into one shared ledger.

use crate::clause::{Clause, Cnf};

/// Builds the CNF equivalent of a DNF given as scaled terms (dense signed
/// vectors of length `line_len`, one entry per cell, as produced by
/// `Term::to_scaled`).
pub fn dnf_to_cnf(terms: &[Vec<i32>], line_len: usize) -> Cnf {
    if terms.is_empty() {
        // An empty DNF means the description does not fit this line
        // length: encode UNSAT directly as a pair of unit clauses on
        // variable 1 that cannot both hold, rather than rejecting the
        // line. This is the DE path's answer to an infeasible
        // description (contrast the automaton encoder, which rejects
        // such a line before ever building an NFA).
        let mut cnf = Cnf::with_capacity(2);
        cnf.push(Clause::unit(1));
        cnf.push(Clause::unit(-1));
        return cnf;
    }

    let freqs = literal_frequencies(terms, line_len);
    let m = terms.len();
    let mut ledger = Ledger::new();

    for (literal, freq) in freqs {
        if freq == 0 {
            break; // sorted descending: nothing past this point matters.
        }
        if freq == m {
            ledger.add(Clause::unit(literal));
            continue;
        }
        let idx = (literal.unsigned_abs() - 1) as usize;
        let free_terms: Vec<&Vec<i32>> = terms.iter().filter(|t| t[idx] != literal).collect();
        let mut acc = vec![0i32; line_len];
        acc[idx] = literal;
        distribute(&free_terms, &mut acc, &mut ledger);
    }

    ledger.into_cnf()
}

/// Counts how many terms carry each possible literal, sorted by
/// descending frequency so the pivot loop tries the most constraining
/// literals (and any forced units) first.
fn literal_frequencies(terms: &[Vec<i32>], line_len: usize) -> Vec<(i32, usize)> {
    let mut counts = vec![0usize; 2 * line_len];
    for term in terms {
        for (idx, &v) in term.iter().enumerate() {
            if v > 0 {
                counts[idx] += 1;
            } else {
                counts[line_len + idx] += 1;
            }
        }
    }
    let mut freqs: Vec<(i32, usize)> = (0..line_len)
        .map(|idx| ((idx + 1) as i32, counts[idx]))
        .chain((0..line_len).map(|idx| (-((idx + 1) as i32), counts[line_len + idx])))
        .collect();
    freqs.sort_unstable_by(|a, b| b.1.cmp(&a.1));
    freqs
}

/// Recursively picks one representative literal from each free term,
/// skipping any choice that would make the accumulated clause a
/// tautology, and records every surviving full assignment as a candidate
/// clause.
fn distribute(free_terms: &[&Vec<i32>], acc: &mut [i32], ledger: &mut Ledger) {
    match free_terms.split_first() {
        None => ledger.add(Clause::new(nonzero(acc))),
        Some((term, rest)) => {
            for (j, &lit) in term.iter().enumerate() {
                if acc[j] == -lit {
                    continue; // would make the clause a tautology
                }
                if rest.is_empty() {
                    let mut candidate = acc.to_vec();
                    candidate[j] = lit;
                    ledger.add(Clause::new(nonzero(&candidate)));
                } else {
                    let prior = acc[j];
                    acc[j] = lit;
                    distribute(rest, acc, ledger);
                    acc[j] = prior;
                }
            }
        }
    }
}

fn nonzero(acc: &[i32]) -> Vec<i32> {
    acc.iter().copied().filter(|&l| l != 0).collect()
}

/// Accumulates candidate clauses, discarding any that are already
/// subsumed by a clause already in the ledger. Forward subsumption of
/// older, now-redundant entries happens later in a dedicated pass (see
/// [`crate::subsumption`]) rather than during insertion.
#[derive(Default)]
struct Ledger {
    clauses: Vec<Clause>,
}

impl Ledger {
    fn new() -> Self {
        Ledger::default()
    }

    fn add(&mut self, clause: Clause) {
        if clause.is_tautology() {
            return;
        }
        if self.clauses.iter().any(|kept| kept.subsumes(&clause)) {
            return;
        }
        self.clauses.push(clause);
    }

    fn into_cnf(self) -> Cnf {
        self.clauses.into_iter().collect()
    }
}
