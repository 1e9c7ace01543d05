use serde::{Deserialize, Serialize};

/// A coordinate pair with a liveness flag.
///
/// Only used transiently when loading or dumping live-cell lists; grids
/// store liveness densely.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
    #[serde(default = "default_alive", skip_serializing)]
    pub alive: bool,
}

fn default_alive() -> bool {
    true
}

impl Cell {
    pub fn alive(x: i64, y: i64) -> Self {
        Self { x, y, alive: true }
    }

    pub fn dead(x: i64, y: i64) -> Self {
        Self { x, y, alive: false }
    }
}

impl From<(i64, i64)> for Cell {
    fn from((x, y): (i64, i64)) -> Self {
        Cell::alive(x, y)
    }
}
