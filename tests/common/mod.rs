use nonogram_cnf::clause::Clause;
use nonogram_cnf::nfa::Nfa;
use nonogram_cnf::puzzle::LineEncoding;
use std::collections::HashMap;

/// Evaluates a CNF formula against a full variable assignment, returning
/// whether every clause is satisfied.
pub fn evaluate(clauses: &[Clause], assignment: &HashMap<u32, bool>) -> bool {
    clauses.iter().all(|clause| {
        clause.literals().iter().any(|&lit| {
            let var = lit.unsigned_abs();
            let value = assignment.get(&var).copied().unwrap_or(false);
            (lit > 0) == value
        })
    })
}

/// Builds a cell assignment from a row-major bit string of `'0'`/`'1'`
/// characters, one entry per board cell in `v(r,c) = r*C+c+1` order.
pub fn assignment_from_bits(bits: &str) -> HashMap<u32, bool> {
    bits.chars()
        .enumerate()
        .map(|(i, c)| ((i as u32) + 1, c == '1'))
        .collect()
}

/// Extends `assignment` with the auxiliary state/transition variables that
/// witness `bits` as an accepting walk of `line`'s automaton. A `None`
/// layout means `line` took the DE path (or was an empty description),
/// which introduces no auxiliary variables, so there is nothing to add.
///
/// `evaluate`'s unassigned-variables-are-false default is only sound for
/// the AE encoding's auxiliary variables once the *true* ones have been
/// filled in here; without this, clause family (4) of `ae::encode_line`
/// can never be satisfied since it requires some transition variable true.
pub fn witness_line(assignment: &mut HashMap<u32, bool>, line: &LineEncoding, bits: &[bool]) {
    let Some(layout) = &line.layout else { return };
    let nfa = Nfa::build(&line.description).expect("a line with a layout has a non-empty description");
    let path = nfa
        .accepting_walk(bits)
        .expect("a line's own bits must be accepted by its own description");
    assignment.extend(layout.witness(&path, bits));
}
