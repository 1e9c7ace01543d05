//! Built-in universes used when no input universe can be loaded.

use crate::cell::Cell;
use crate::rule::RuleSet;
use crate::universe::{UniverseDescription, DEFAULT_EXTENT};

/// Chooses one of the built-in universes.
///
/// Callers that want a random pick derive the index from an explicitly seeded
/// rng, which keeps this path deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultSelector {
    /// Catalog entry `i % catalog().len()`.
    Index(usize),
    /// Case-insensitive name match; unknown names select the first entry.
    Named(String),
}

impl Default for DefaultSelector {
    fn default() -> Self {
        DefaultSelector::Index(0)
    }
}

struct Preset {
    name: &'static str,
    cells: &'static [(i64, i64)],
    origin: (i64, i64),
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "Glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
        origin: (1, 1),
    },
    Preset {
        name: "Blinker",
        cells: &[(1, 0), (1, 1), (1, 2)],
        origin: (13, 13),
    },
    Preset {
        name: "R-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
        origin: (14, 14),
    },
    Preset {
        name: "LWSS",
        cells: &[
            (1, 0),
            (4, 0),
            (0, 1),
            (0, 2),
            (4, 2),
            (0, 3),
            (1, 3),
            (2, 3),
            (3, 3),
        ],
        origin: (2, 13),
    },
];

impl Preset {
    fn build(&self) -> UniverseDescription {
        let (ox, oy) = self.origin;
        let live_cells = self
            .cells
            .iter()
            .map(|&(x, y)| Cell::alive(ox + x, oy + y))
            .collect();
        UniverseDescription::new(
            self.name,
            DEFAULT_EXTENT,
            DEFAULT_EXTENT,
            RuleSet::STANDARD,
            live_cells,
        )
    }
}

/// Names of the built-in universes, in catalog order.
pub fn names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|preset| preset.name)
}

pub fn count() -> usize {
    PRESETS.len()
}

/// Builds the built-in universe picked by `selector`. Never fails.
pub fn select(selector: &DefaultSelector) -> UniverseDescription {
    let preset = match selector {
        DefaultSelector::Index(i) => &PRESETS[i % PRESETS.len()],
        DefaultSelector::Named(name) => PRESETS
            .iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name.trim()))
            .unwrap_or(&PRESETS[0]),
    };
    preset.build()
}
