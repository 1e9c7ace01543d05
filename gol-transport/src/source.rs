use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::TransportError;

/// A universe file chosen from the defaults directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultUniverse {
    pub path: PathBuf,
    pub text: String,
}

fn read_error(path: &Path, source: io::Error) -> TransportError {
    match source.kind() {
        io::ErrorKind::NotFound => TransportError::FileNotFound(path.to_path_buf()),
        _ => TransportError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    }
}

/// Reads a universe file into memory.
pub fn read_universe_file(path: &Path) -> Result<String, TransportError> {
    let text = fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Picks one regular file from `dir` uniformly at random and reads it.
///
/// Entries are sorted by path before choosing, so a seeded `rng` always picks
/// the same file. Hidden files are skipped. Returns `Ok(None)` when there is
/// nothing to pick.
pub fn pick_default_universe<R: Rng + ?Sized>(
    dir: &Path,
    rng: &mut R,
) -> Result<Option<DefaultUniverse>, TransportError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| read_error(dir, e))? {
        let path = entry.map_err(|e| read_error(dir, e))?.path();
        let hidden = path
            .file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |name| name.starts_with('.'));
        if path.is_file() && !hidden {
            files.push(path);
        }
    }
    files.sort();
    debug!("{} candidate universes in {}", files.len(), dir.display());

    match files.choose(rng) {
        Some(path) => Ok(Some(DefaultUniverse {
            text: read_universe_file(path)?,
            path: path.clone(),
        })),
        None => Ok(None),
    }
}
