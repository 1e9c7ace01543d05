use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::TransportError;

const STDOUT_NAME: &str = "<stdout>";

/// Delivers serialized universes to a destination.
pub trait Sender {
    fn send(&mut self, data: &str) -> Result<(), TransportError>;

    /// Human-readable destination, for status messages.
    fn destination(&self) -> String;
}

/// Replaces the file's contents on every send; the last successful write wins.
#[derive(Debug, Clone)]
pub struct FileSender {
    path: PathBuf,
}

impl FileSender {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sender for FileSender {
    fn send(&mut self, data: &str) -> Result<(), TransportError> {
        fs::write(&self.path, data).map_err(|source| TransportError::WriteFailed {
            path: self.path.clone(),
            source,
        })?;
        debug!("Wrote {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

/// Sends data to standard output.
pub struct StdioSender {
    stdout: io::Stdout,
}

impl StdioSender {
    pub fn new() -> Self {
        StdioSender { stdout: io::stdout() }
    }
}

impl Default for StdioSender {
    fn default() -> Self {
        Self::new()
    }
}

impl Sender for StdioSender {
    fn send(&mut self, data: &str) -> Result<(), TransportError> {
        let mut out = self.stdout.lock();
        out.write_all(data.as_bytes())
            .and_then(|_| out.flush()) // Ensure it's written immediately
            .map_err(|source| TransportError::WriteFailed {
                path: PathBuf::from(STDOUT_NAME),
                source,
            })
    }

    fn destination(&self) -> String {
        STDOUT_NAME.to_string()
    }
}

/// A [`FileSender`] for `path`, or a [`StdioSender`] when there is none.
pub fn create_sender(path: Option<&Path>) -> Box<dyn Sender> {
    match path {
        Some(path) => Box::new(FileSender::new(path)),
        None => Box::new(StdioSender::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn last_write_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dump.life");
        let mut sender = FileSender::new(&path);
        sender.send("first\n").unwrap();
        sender.send("second\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
        assert_eq!(sender.destination(), path.display().to_string());
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/dump.life");
        let mut sender = create_sender(Some(&path));
        let err = sender.send("#S 1 1\n").unwrap_err();
        assert!(matches!(err, TransportError::WriteFailed { path: p, .. } if p == path));
    }

    #[test]
    fn stdout_destination_name() {
        assert_eq!(create_sender(None).destination(), STDOUT_NAME);
    }
}
