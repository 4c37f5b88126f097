mod common;

use common::{evaluate, witness_line};
use nonogram_cnf::board::Board;
use nonogram_cnf::memo::Encoder;
use nonogram_cnf::puzzle::{encode_puzzle, encode_puzzle_with_layout, LineEncoding, Puzzle, Strategy};
use std::collections::HashMap;

fn assignment_from_board(board: &Board) -> HashMap<u32, bool> {
    let mut assignment = HashMap::new();
    for r in 0..board.rows() {
        for c in 0..board.cols() {
            let var = (r * board.cols() + c + 1) as u32;
            assignment.insert(var, board.get(r, c));
        }
    }
    assignment
}

/// Full assignment for `board`'s own AE encoding: cell variables from the
/// board, plus each line's auxiliary NFA-walk witness.
fn ae_witness_assignment(board: &Board, lines: &[LineEncoding]) -> HashMap<u32, bool> {
    let mut assignment = assignment_from_board(board);
    let mut lines = lines.iter();
    for r in 0..board.rows() {
        let bits: Vec<bool> = (0..board.cols()).map(|c| board.get(r, c)).collect();
        witness_line(&mut assignment, lines.next().unwrap(), &bits);
    }
    for c in 0..board.cols() {
        let bits: Vec<bool> = (0..board.rows()).map(|r| board.get(r, c)).collect();
        witness_line(&mut assignment, lines.next().unwrap(), &bits);
    }
    assignment
}

#[test]
fn random_boards_satisfy_their_own_ae_encoding() {
    for seed in 0..8u64 {
        let board = Board::random(5, 6, 0.45, seed);
        let puzzle = Puzzle::from_board(&board);
        let mut encoder = Encoder::new();
        let (encoded, lines) = encode_puzzle_with_layout(&puzzle, &mut encoder, Strategy::Ae).unwrap();
        let assignment = ae_witness_assignment(&board, &lines);
        assert!(
            evaluate(&encoded.clauses, &assignment),
            "board extracted from seed {seed} failed to satisfy its own AE CNF"
        );
    }
}

#[test]
fn random_boards_satisfy_their_own_de_encoding() {
    let mut encoder = Encoder::new();
    for seed in 0..8u64 {
        let board = Board::random(4, 5, 0.5, seed);
        let puzzle = Puzzle::from_board(&board);
        let encoded = encode_puzzle(&puzzle, &mut encoder, Strategy::De).unwrap();
        let assignment = assignment_from_board(&board);
        assert!(
            evaluate(&encoded.clauses, &assignment),
            "board extracted from seed {seed} failed to satisfy its own DE CNF"
        );
    }
}

#[test]
fn empty_and_fully_filled_boards_round_trip() {
    let empty = Board::from_cells(3, 3, vec![false; 9]);
    let filled = Board::from_cells(3, 3, vec![true; 9]);
    for board in [empty, filled] {
        let puzzle = Puzzle::from_board(&board);
        let mut encoder = Encoder::new();
        let (encoded, lines) = encode_puzzle_with_layout(&puzzle, &mut encoder, Strategy::Ae).unwrap();
        let assignment = ae_witness_assignment(&board, &lines);
        assert!(evaluate(&encoded.clauses, &assignment));
    }
}
