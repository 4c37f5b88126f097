//! DNF (Disjunctive Normal Form) construction for a single line: every
//! cell-by-cell assignment that satisfies a description, represented as
//! one term per assignment.
//!
//! Grounded in `original_source/encoding/dnfToCNF.c`'s DNF dynamic
//! program (`inDNFtree`, `build`, `scaleFullLength`). That C code
//! precomputes a base case for every single-run description at every
//! line length before running the general recursion, because the general
//! recursive rule alone mishandles a run that exactly fills the remaining
//! line with nothing left over for a trailing separator. Rather than
//! precomputing a separate base-case table, this encodes that case
//! directly as the recursion's stopping condition -- see `fill` below.

use crate::description::Description;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::trace;

/// One satisfying assignment of a line, one entry per cell: `true` filled,
/// `false` empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term(pub Vec<bool>);

impl Term {
    fn filled(len: u32) -> Term {
        Term(vec![true; len as usize])
    }

    fn empty(len: u32) -> Term {
        Term(vec![false; len as usize])
    }

    fn with_run_then_gap(run: u32, tail: &Term) -> Term {
        let mut v = Vec::with_capacity(run as usize + 1 + tail.0.len());
        v.extend(std::iter::repeat(true).take(run as usize));
        v.push(false);
        v.extend(tail.0.iter().copied());
        Term(v)
    }

    fn with_gap(tail: &Term) -> Term {
        let mut v = Vec::with_capacity(1 + tail.0.len());
        v.push(false);
        v.extend(tail.0.iter().copied());
        Term(v)
    }

    /// Rewrites this indicator term into the signed variable indices
    /// (1-based, local to the line) used once it is glued into a CNF
    /// clause. Mirrors `scaleFullLength` in the reference encoder.
    pub fn to_scaled(&self) -> Vec<i32> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, &filled)| {
                let v = (i + 1) as i32;
                if filled {
                    v
                } else {
                    -v
                }
            })
            .collect()
    }
}

/// Per-process memo of `Fill(description-suffix, length) -> terms`,
/// keyed by the pair directly rather than by a hand-rolled tree of child
/// pointers -- a `HashMap` gives the same "grow, never shrink, shared
/// across a whole batch run" behaviour the reference tree has, without a
/// bespoke node type.
#[derive(Default)]
pub struct DnfMemo {
    table: HashMap<(Description, u32), Rc<Vec<Term>>>,
}

impl DnfMemo {
    pub fn new() -> Self {
        DnfMemo::default()
    }

    /// All satisfying fillings of `desc` in a line of `line_len` cells.
    /// An empty result means the description cannot fit.
    pub fn fill(&mut self, desc: &Description, line_len: u32) -> Rc<Vec<Term>> {
        if let Some(hit) = self.table.get(&(desc.clone(), line_len)) {
            trace!(%desc, line_len, "dnf memo hit");
            return Rc::clone(hit);
        }
        trace!(%desc, line_len, "dnf memo miss");
        let result = self.compute(desc, line_len);
        let rc = Rc::new(result);
        self.table.insert((desc.clone(), line_len), Rc::clone(&rc));
        rc
    }

    fn compute(&mut self, desc: &Description, line_len: u32) -> Vec<Term> {
        if !desc.fits(line_len) {
            return Vec::new();
        }
        if desc.is_empty() {
            return vec![Term::empty(line_len)];
        }
        let first = desc.first().expect("non-empty description");
        let rest = desc.tail();

        // A run that exactly exhausts the remaining line needs no
        // trailing separator; this is the case the reference encoder's
        // precomputed single-run base cases paper over.
        if rest.is_empty() && first == line_len {
            return vec![Term::filled(line_len)];
        }

        let mut terms = Vec::new();

        // Pin the first run at the leftmost free cell, followed by a
        // mandatory separator, then recurse on the remaining runs.
        if let Some(sub_len) = line_len.checked_sub(first + 1) {
            let sub = self.fill(&rest, sub_len);
            terms.extend(sub.iter().map(|t| Term::with_run_then_gap(first, t)));
        }

        // Or leave the current cell blank and shift everything right.
        if let Some(sub_len) = line_len.checked_sub(1) {
            let sub = self.fill(desc, sub_len);
            terms.extend(sub.iter().map(Term::with_gap));
        }

        terms
    }
}
