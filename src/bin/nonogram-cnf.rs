//! CLI driver: probes a directory of JSON puzzles (or generates random
//! ones) and encodes each into a DIMACS CNF file via a shared [`Encoder`].

use clap::Parser;
use nonogram_cnf::board::Board;
use nonogram_cnf::config::{BoardSize, Command, Config};
use nonogram_cnf::error::{DriverError, EncodeError};
use nonogram_cnf::io::sink::{FilesystemSink, PuzzleSink};
use nonogram_cnf::io::loader;
use nonogram_cnf::puzzle::Puzzle;
use std::process::ExitCode;
use tracing::{error, info, info_span, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = Config::parse();
    init_logging(config.verbose);

    let result = match config.command {
        Command::Encode {
            input,
            output,
            strategy,
        } => run_encode(&input, &output, strategy.into()),
        Command::Random {
            density,
            count,
            size,
            seed,
            output,
            strategy,
        } => run_random(density, count, size, seed, &output, strategy.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "fatal error");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Probes `input` for `0.json, 1.json, …`, stopping after
/// `MAX_CONSECUTIVE_MISSES` holes in a row, per §6's "monotone integer
/// index with holes" convention.
const MAX_CONSECUTIVE_MISSES: usize = 3;

fn run_encode(
    input: &std::path::Path,
    output: &std::path::Path,
    strategy: nonogram_cnf::puzzle::Strategy,
) -> Result<(), nonogram_cnf::error::DriverError> {
    std::fs::create_dir_all(output)?;
    let mut sink = FilesystemSink::new(output.to_path_buf(), strategy);

    let mut misses = 0usize;
    let mut index = 0usize;
    while misses < MAX_CONSECUTIVE_MISSES {
        let path = input.join(format!("{index}.json"));
        if !path.exists() {
            warn!(index, "no puzzle file at this index, skipping");
            misses += 1;
            index += 1;
            continue;
        }
        misses = 0;
        let span = info_span!("puzzle", puzzle_index = index);
        let _enter = span.enter();

        match loader::load_file(&path, index) {
            Ok(puzzle) => {
                log_shape(&puzzle);
                if let Err(err) = sink.accept(index, &puzzle) {
                    if is_fatal(&err) {
                        error!(%err, "aborting batch after unrecoverable allocation failure");
                        return Err(err);
                    }
                    warn!(%err, "skipping puzzle after encode/write failure");
                }
            }
            Err(err) => warn!(%err, "skipping malformed puzzle"),
        }
        index += 1;
    }
    Ok(())
}

/// Variable-numbering overflow is an invariant violation, not a recoverable
/// per-puzzle condition: abort the whole batch rather than skip the puzzle.
fn is_fatal(err: &DriverError) -> bool {
    matches!(
        err,
        DriverError::Encode(EncodeError::VariableOverflow { .. })
            | DriverError::Encode(EncodeError::ClauseCountOverflow { .. })
    )
}

fn run_random(
    density: f64,
    count: usize,
    size: BoardSize,
    seed: u64,
    output: &std::path::Path,
    strategy: nonogram_cnf::puzzle::Strategy,
) -> Result<(), nonogram_cnf::error::DriverError> {
    std::fs::create_dir_all(output)?;
    let mut sink = FilesystemSink::new(output.to_path_buf(), strategy);

    for index in 0..count {
        let board = Board::random(size.rows, size.cols, density, seed.wrapping_add(index as u64));
        let puzzle = Puzzle::from_board(&board);

        let span = info_span!("puzzle", puzzle_index = index);
        let _enter = span.enter();
        log_shape(&puzzle);

        if let Err(err) = sink.accept(index, &puzzle) {
            if is_fatal(&err) {
                error!(%err, "aborting batch after unrecoverable allocation failure");
                return Err(err);
            }
            warn!(%err, "skipping puzzle after encode/write failure");
        }
    }
    info!(count, "finished random batch");
    Ok(())
}

fn log_shape(puzzle: &Puzzle) {
    info!(rows = puzzle.rows(), columns = puzzle.cols(), "loaded puzzle");
}
