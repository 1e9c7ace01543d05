use thiserror::Error;

/// Errors produced while reading a universe or building a grid from it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UniverseError {
    /// Rule text is not of the form `B<digits>/S<digits>` with digits 0-8.
    /// The codec recovers from this by substituting the standard rule.
    #[error("Malformed rule {0:?}, expected B<digits>/S<digits>")]
    MalformedRule(String),

    /// The size record is missing or does not hold two positive integers.
    #[error("Malformed size: {0}")]
    MalformedSize(String),

    #[error("Cell ({x}, {y}) lies outside the {width}x{height} grid")]
    CoordinateOutOfRange {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },
}

pub type Result<T> = std::result::Result<T, UniverseError>;
