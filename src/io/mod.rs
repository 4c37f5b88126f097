//! External collaborators: JSON puzzle loading and output sinks.

pub mod loader;
pub mod sink;

pub use loader::load_file;
pub use sink::{FilesystemSink, PuzzleSink};
