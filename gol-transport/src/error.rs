use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error types that can occur while reading or writing universes.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The input file does not exist.
    #[error("There's no such file: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The input exists but could not be opened or read.
    #[error("Failed to read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing a dump failed. The simulation state is unaffected.
    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
