//! Driver-level configuration, built from CLI arguments via `clap`'s
//! derive API -- the maintained successor to the `structopt` derive
//! macros this shape was originally built from; `structopt` itself has
//! been in maintenance mode since `clap` absorbed its derive support,
//! so this crate depends on `clap` directly instead (see `DESIGN.md`).

use crate::puzzle::Strategy;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nonogram-cnf", about = "Encodes Nonogram puzzles as DIMACS CNF")]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,

    /// Repeat for more detail: -v for debug, -vv for trace. Also honors
    /// RUST_LOG if set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode every puzzle found in a directory of JSON files.
    Encode {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = StrategyArg::Ae)]
        strategy: StrategyArg,
    },
    /// Generate random puzzles and encode them.
    Random {
        #[arg(long)]
        density: f64,
        #[arg(long)]
        count: usize,
        /// Board shape as `ROWSxCOLS`, e.g. `10x10`.
        #[arg(long)]
        size: BoardSize,
        #[arg(long)]
        seed: u64,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = StrategyArg::Ae)]
        strategy: StrategyArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StrategyArg {
    Ae,
    De,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Ae => Strategy::Ae,
            StrategyArg::De => Strategy::De,
        }
    }
}

/// A `ROWSxCOLS` board shape, parsed directly from a CLI argument.
#[derive(Clone, Copy, Debug)]
pub struct BoardSize {
    pub rows: usize,
    pub cols: usize,
}

impl std::str::FromStr for BoardSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rows, cols) = s
            .split_once('x')
            .ok_or_else(|| format!("expected ROWSxCOLS, got '{s}'"))?;
        let rows = rows
            .parse()
            .map_err(|_| format!("invalid row count in '{s}'"))?;
        let cols = cols
            .parse()
            .map_err(|_| format!("invalid column count in '{s}'"))?;
        Ok(BoardSize { rows, cols })
    }
}
