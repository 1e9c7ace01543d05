//! Toroidal Game of Life engine: rules, the universe text format, the dense
//! wrap-around grid and the engine that owns them.

pub mod cell;
pub mod codec;
pub mod engine;
pub mod error;
pub mod grid;
pub mod presets;
pub mod rule;
pub mod universe;

pub use cell::Cell;
pub use codec::{parse, parse_with_report, serialize, ParsedUniverse, Recovery};
pub use engine::{Fallback, LoadOutcome, SimulationEngine};
pub use error::{Result, UniverseError};
pub use grid::{checked_area, wrap, ToroidalGrid, MAX_CELLS};
pub use presets::DefaultSelector;
pub use rule::RuleSet;
pub use universe::UniverseDescription;
