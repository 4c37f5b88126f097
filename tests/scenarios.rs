mod common;

use common::{evaluate, witness_line};
use nonogram_cnf::ae;
use nonogram_cnf::description::Description;
use nonogram_cnf::memo::Encoder;
use nonogram_cnf::nfa::Nfa;
use nonogram_cnf::puzzle::{encode_puzzle, encode_puzzle_with_layout, LineEncoding, Puzzle, Strategy};
use nonogram_cnf::types::VarAllocator;
use std::collections::HashMap;

fn bits_to_assignment(bits: &str) -> HashMap<u32, bool> {
    bits.chars()
        .enumerate()
        .map(|(i, c)| ((i as u32) + 1, c == '1'))
        .collect()
}

fn all_assignments(len: usize) -> Vec<String> {
    (0..1u32 << len)
        .map(|mask| {
            (0..len)
                .map(|i| if mask & (1 << i) != 0 { '1' } else { '0' })
                .collect()
        })
        .collect()
}

fn accepted_by_ae(desc: &Description, len: usize, bits: &str) -> bool {
    let cell_vars: Vec<u32> = (1..=len as u32).collect();
    let mut alloc = VarAllocator::starting_at(len as u32 + 1);
    let (cnf, layout) = match ae::encode_line_with_layout(desc, &cell_vars, &mut alloc) {
        Ok(result) => result,
        Err(_) => return false,
    };

    let mut assignment = bits_to_assignment(bits);
    if let Some(layout) = layout {
        let nfa = Nfa::build(desc).expect("a layout implies a non-empty description");
        let bit_vec: Vec<bool> = bits.chars().map(|c| c == '1').collect();
        if let Some(path) = nfa.accepting_walk(&bit_vec) {
            assignment.extend(layout.witness(&path, &bit_vec));
        }
    }
    evaluate(cnf.clauses(), &assignment)
}

/// Builds the full assignment for one 2x2 `bits` string -- cell variables
/// plus each row's and column's AE witness, so positive assertions (`bits`
/// is a legal filling) actually have a chance to satisfy clause family (4).
fn witness_assignment_for_puzzle(puzzle: &Puzzle, lines: &[LineEncoding], bits: &str) -> HashMap<u32, bool> {
    let mut assignment = bits_to_assignment(bits);
    let cell_bytes = bits.as_bytes();
    let bit_at = |r: usize, c: usize| cell_bytes[r * puzzle.cols() + c] == b'1';

    let mut lines = lines.iter();
    for r in 0..puzzle.rows() {
        let row_bits: Vec<bool> = (0..puzzle.cols()).map(|c| bit_at(r, c)).collect();
        witness_line(&mut assignment, lines.next().unwrap(), &row_bits);
    }
    for c in 0..puzzle.cols() {
        let col_bits: Vec<bool> = (0..puzzle.rows()).map(|r| bit_at(r, c)).collect();
        witness_line(&mut assignment, lines.next().unwrap(), &col_bits);
    }
    assignment
}

fn accepted_by_de(encoder: &mut Encoder, desc: &Description, len: usize, bits: &str) -> bool {
    let cell_vars: Vec<u32> = (1..=len as u32).collect();
    let cnf = encoder.encode_line_de(desc, &cell_vars).unwrap();
    evaluate(cnf.clauses(), &bits_to_assignment(bits))
}

#[test]
fn scenario_a_2x2_diagonals() {
    let row = Description::new(vec![1]).unwrap();
    let puzzle = Puzzle::new(2, 2, vec![row.clone(), row.clone()], vec![row.clone(), row]).unwrap();

    for strategy in [Strategy::Ae, Strategy::De] {
        let mut encoder = Encoder::new();
        let (encoded, lines) = encode_puzzle_with_layout(&puzzle, &mut encoder, strategy).unwrap();

        for diag in ["1001", "0110"] {
            let assignment = witness_assignment_for_puzzle(&puzzle, &lines, diag);
            assert!(
                evaluate(&encoded.clauses, &assignment),
                "{diag} should satisfy scenario A's CNF under {strategy:?}"
            );
        }

        for bits in ["0000", "1111", "1100", "0011", "1010", "0101"] {
            assert!(
                !evaluate(&encoded.clauses, &bits_to_assignment(bits)),
                "{bits} should not satisfy scenario A's CNF under {strategy:?}"
            );
        }
    }
}

#[test]
fn scenario_b_empty_3x3_header() {
    let empty = Description::empty();
    let puzzle = Puzzle::new(3, 3, vec![empty.clone(); 3], vec![empty; 3]).unwrap();
    let mut encoder = Encoder::new();
    let encoded = encode_puzzle(&puzzle, &mut encoder, Strategy::Ae).unwrap();
    assert_eq!(encoded.num_vars, 9);
    assert_eq!(encoded.clauses.len(), 9);
    let text = nonogram_cnf::dimacs::format(&encoded.clauses, encoded.num_vars);
    assert!(text.starts_with("p cnf 9 9"));
}

#[test]
fn scenario_c_3x3_filled_de_forces_all_on() {
    let full = Description::new(vec![3]).unwrap();
    let puzzle = Puzzle::new(3, 3, vec![full.clone(); 3], vec![full; 3]).unwrap();
    let mut encoder = Encoder::new();
    let encoded = encode_puzzle(&puzzle, &mut encoder, Strategy::De).unwrap();
    let all_on = bits_to_assignment("111111111");
    assert!(evaluate(&encoded.clauses, &all_on));
    let one_off = bits_to_assignment("111111110");
    assert!(!evaluate(&encoded.clauses, &one_off));
}

#[test]
fn scenario_d_two_one_over_five() {
    let desc = Description::new(vec![2, 1]).unwrap();
    let legal = ["11010", "11001", "10110", "10101", "01101"];
    let mut encoder = Encoder::new();
    for bits in all_assignments(5) {
        let ae_ok = accepted_by_ae(&desc, 5, &bits);
        let de_ok = accepted_by_de(&mut encoder, &desc, 5, &bits);
        assert_eq!(ae_ok, de_ok, "AE/DE disagree on {bits}");
        assert_eq!(ae_ok, legal.contains(&bits.as_str()), "mismatch on {bits}");
    }
}

#[test]
fn scenario_e_two_singleton_runs_over_four() {
    let desc = Description::new(vec![1, 1]).unwrap();
    let legal = ["1010", "1001", "0101"];
    let mut encoder = Encoder::new();
    for bits in all_assignments(4) {
        let ae_ok = accepted_by_ae(&desc, 4, &bits);
        let de_ok = accepted_by_de(&mut encoder, &desc, 4, &bits);
        assert_eq!(ae_ok, de_ok, "AE/DE disagree on {bits}");
        assert_eq!(ae_ok, legal.contains(&bits.as_str()), "mismatch on {bits}");
    }
}

#[test]
fn scenario_f_infeasible_three_over_two() {
    let desc = Description::new(vec![3]).unwrap();
    let cell_vars = vec![1u32, 2];
    let mut alloc = VarAllocator::starting_at(3);
    assert!(ae::encode_line(&desc, &cell_vars, &mut alloc).is_err());

    // DE never rejects the line outright; it emits an unsatisfiable
    // formula instead. No assignment of the two cells should satisfy it.
    let mut encoder = Encoder::new();
    let cnf = encoder.encode_line_de(&desc, &cell_vars).unwrap();
    for bits in all_assignments(2) {
        assert!(!evaluate(cnf.clauses(), &bits_to_assignment(&bits)));
    }
}
