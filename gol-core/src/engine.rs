use std::fmt;

use log::{debug, warn};

use crate::cell::Cell;
use crate::codec::{self, Recovery};
use crate::error::{Result, UniverseError};
use crate::grid::ToroidalGrid;
use crate::presets::{self, DefaultSelector};
use crate::rule::RuleSet;
use crate::universe::UniverseDescription;

/// A loaded universe and the grid simulating it.
///
/// The grid is only reachable through `&`, so callers can render or dump the
/// state but advancing is the only way to change it.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    description: UniverseDescription,
    grid: ToroidalGrid,
    generation: u64,
}

/// Why [`SimulationEngine::load_or_default`] used a built-in universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    NoInput,
    Rejected(UniverseError),
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::NoInput => write!(f, "no input universe"),
            Fallback::Rejected(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub engine: SimulationEngine,
    /// Set when the built-in universe was used instead of the input.
    pub fallback: Option<Fallback>,
    pub recoveries: Vec<Recovery>,
}

impl SimulationEngine {
    pub fn new(description: UniverseDescription) -> Result<Self> {
        let grid = ToroidalGrid::from_description(&description)?;
        Ok(Self {
            description,
            grid,
            generation: 0,
        })
    }

    /// Builds the built-in universe picked by `selector`.
    pub fn from_preset(selector: &DefaultSelector) -> Self {
        let description = presets::select(selector);
        let grid = ToroidalGrid::from_description(&description).unwrap_or_else(|e| {
            warn!("Built-in universe {:?} is invalid, starting empty: {}", description.name, e);
            ToroidalGrid::empty(description.width, description.height, description.rules)
        });
        Self {
            description,
            grid,
            generation: 0,
        }
    }

    /// Parses `text` and builds its grid, returning what the parser recovered
    /// from along the way.
    pub fn from_text(text: &str) -> Result<(Self, Vec<Recovery>)> {
        let parsed = codec::parse_with_report(text)?;
        let engine = Self::new(parsed.description)?;
        Ok((engine, parsed.recoveries))
    }

    /// Parses `text` into an engine, or falls back to a built-in universe when
    /// there is no text or it cannot be used. Never fails.
    pub fn load_or_default(text: Option<&str>, selector: &DefaultSelector) -> LoadOutcome {
        let attempt = match text {
            None => Err(Fallback::NoInput),
            Some(text) => Self::from_text(text).map_err(Fallback::Rejected),
        };

        match attempt {
            Ok((engine, recoveries)) => LoadOutcome {
                engine,
                fallback: None,
                recoveries,
            },
            Err(reason) => {
                debug!("Falling back to built-in universe {:?}: {}", selector, reason);
                LoadOutcome {
                    engine: Self::from_preset(selector),
                    fallback: Some(reason),
                    recoveries: Vec::new(),
                }
            }
        }
    }

    /// Applies exactly `n` generations. `advance(0)` is a no-op.
    pub fn advance(&mut self, n: u64) {
        for _ in 0..n {
            self.grid.advance_one_generation();
            self.generation += 1;
        }
    }

    /// Generations advanced since loading.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grid(&self) -> &ToroidalGrid {
        &self.grid
    }

    pub fn name(&self) -> &str {
        &self.description.name
    }

    pub fn rules(&self) -> RuleSet {
        self.grid.rules()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn live_cells(&self) -> Vec<Cell> {
        self.grid.live_cells()
    }

    /// The loaded description re-derived with the current live cells.
    pub fn snapshot(&self) -> UniverseDescription {
        self.description.with_live_cells(self.live_cells())
    }

    pub fn to_universe_text(&self) -> String {
        let snapshot = self.snapshot();
        codec::serialize(&snapshot, &snapshot.live_cells)
    }
}
