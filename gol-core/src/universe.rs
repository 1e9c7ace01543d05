use crate::cell::Cell;
use crate::rule::RuleSet;

/// Side length of the fallback universes.
pub const DEFAULT_EXTENT: usize = 30;

/// One loadable/saveable universe: name, dimensions, rules and live cells.
///
/// Duplicate entries in `live_cells` are tolerated; marking a cell alive
/// twice has no further effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniverseDescription {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub rules: RuleSet,
    pub live_cells: Vec<Cell>,
}

impl UniverseDescription {
    pub fn new(
        name: impl Into<String>,
        width: usize,
        height: usize,
        rules: RuleSet,
        live_cells: Vec<Cell>,
    ) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            rules,
            live_cells,
        }
    }

    /// Re-derives this description with a fresh live-cell list, e.g. a grid
    /// snapshot taken for dumping.
    #[must_use = "This method returns a new value instead of mutating its input"]
    pub fn with_live_cells(&self, live_cells: Vec<Cell>) -> Self {
        Self {
            live_cells,
            ..self.clone()
        }
    }

    /// Iterates the cells flagged alive, in stored order.
    pub fn alive_cells(&self) -> impl Iterator<Item = &Cell> {
        self.live_cells.iter().filter(|cell| cell.alive)
    }
}

impl Default for UniverseDescription {
    /// An empty 30x30 universe under the standard rule. Never fails.
    fn default() -> Self {
        Self::new(
            "",
            DEFAULT_EXTENT,
            DEFAULT_EXTENT,
            RuleSet::STANDARD,
            Vec::new(),
        )
    }
}
