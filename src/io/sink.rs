//! Decouples the core encoder from how/where output lands. A `PuzzleSink`
//! accepts one puzzle at a time; the filesystem sink writes one `.cnf`
//! file per accepted puzzle, named by its index.

use crate::dimacs;
use crate::error::DriverError;
use crate::memo::Encoder;
use crate::puzzle::{encode_puzzle, Puzzle, Strategy};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Receives puzzles one at a time as a batch run discovers or generates
/// them.
pub trait PuzzleSink {
    fn accept(&mut self, index: usize, puzzle: &Puzzle) -> Result<(), DriverError>;
}

/// Writes each accepted puzzle's CNF to `<output_dir>/<index>.cnf`,
/// sharing one [`Encoder`] across every puzzle it encodes.
pub struct FilesystemSink {
    output_dir: PathBuf,
    encoder: Encoder,
    strategy: Strategy,
}

impl FilesystemSink {
    pub fn new(output_dir: PathBuf, strategy: Strategy) -> Self {
        FilesystemSink {
            output_dir,
            encoder: Encoder::new(),
            strategy,
        }
    }
}

impl PuzzleSink for FilesystemSink {
    fn accept(&mut self, index: usize, puzzle: &Puzzle) -> Result<(), DriverError> {
        let encoded = encode_puzzle(puzzle, &mut self.encoder, self.strategy)?;
        debug!(
            index,
            num_vars = encoded.num_vars,
            num_clauses = encoded.clauses.len(),
            "encoded puzzle"
        );

        let path = self.output_dir.join(format!("{index}.cnf"));
        let result = write_cnf(&path, &encoded);
        if let Err(err) = &result {
            warn!(index, %err, "failed to write CNF, removing partial output");
            let _ = std::fs::remove_file(&path);
        }
        result
    }
}

fn write_cnf(path: &std::path::Path, encoded: &crate::puzzle::EncodedCnf) -> Result<(), DriverError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    dimacs::write(&mut writer, &encoded.clauses, encoded.num_vars)?;
    Ok(())
}
