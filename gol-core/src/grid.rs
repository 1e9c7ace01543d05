//! Dense toroidal cell storage and the generation step.

use crate::cell::Cell;
use crate::error::{Result, UniverseError};
use crate::rule::RuleSet;
use crate::universe::UniverseDescription;

/// Largest number of cells a grid may hold.
pub const MAX_CELLS: usize = 1 << 24;

/// Cell count of a `width x height` grid, or `MalformedSize` when it is empty
/// or larger than [`MAX_CELLS`].
pub fn checked_area(width: usize, height: usize) -> Result<usize> {
    match width.checked_mul(height) {
        Some(0) => Err(UniverseError::MalformedSize(format!(
            "{}x{} grid has no cells",
            width, height
        ))),
        Some(area) if area <= MAX_CELLS => Ok(area),
        _ => Err(UniverseError::MalformedSize(format!(
            "{}x{} grid exceeds {} cells",
            width, height, MAX_CELLS
        ))),
    }
}

/// Maps a coordinate that is at most one step outside `0..extent` back onto
/// the torus.
///
/// Coordinates at or past `extent` reduce modulo `extent`. Any negative
/// coordinate becomes `extent - 1`. That single-step rule is exact for the
/// neighbour offsets of an in-range cell, so `-2` maps to `extent - 1` as well.
pub fn wrap(coordinate: i64, extent: usize) -> usize {
    debug_assert!(extent > 0, "grid extents are positive");
    if coordinate < 0 {
        extent - 1
    } else if coordinate as u64 >= extent as u64 {
        (coordinate as u64 % extent as u64) as usize
    } else {
        coordinate as usize
    }
}

/// A `width x height` boolean matrix whose edges wrap around, stored as a
/// flat row-major vector indexed `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToroidalGrid {
    width: usize,
    height: usize,
    rules: RuleSet,
    cells: Vec<bool>,
}

impl ToroidalGrid {
    /// An all-dead grid. Extents are clamped so it holds between one and
    /// [`MAX_CELLS`] cells.
    pub fn empty(width: usize, height: usize, rules: RuleSet) -> Self {
        let width = width.clamp(1, MAX_CELLS);
        let height = height.clamp(1, MAX_CELLS / width);
        Self {
            width,
            height,
            rules,
            cells: vec![false; width * height],
        }
    }

    /// Allocates the grid and marks every alive cell of `description`.
    ///
    /// Fails with [`UniverseError::CoordinateOutOfRange`] rather than wrapping
    /// coordinates outside `[0, width) x [0, height)`.
    pub fn from_description(description: &UniverseDescription) -> Result<Self> {
        let (width, height) = (description.width, description.height);
        checked_area(width, height)?;

        let mut grid = Self::empty(width, height, description.rules);
        for cell in description.alive_cells() {
            let in_range =
                (0..width as i64).contains(&cell.x) && (0..height as i64).contains(&cell.y);
            if !in_range {
                return Err(UniverseError::CoordinateOutOfRange {
                    x: cell.x,
                    y: cell.y,
                    width,
                    height,
                });
            }
            let idx = grid.index(cell.x as usize, cell.y as usize);
            grid.cells[idx] = true;
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Returns whether the cell at `(x, y)` is alive, wrapping both
    /// coordinates first.
    pub fn is_alive(&self, x: i64, y: i64) -> bool {
        self.cells[self.index(wrap(x, self.width), wrap(y, self.height))]
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Iterates rows top to bottom, each a slice of `width` cells.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }

    /// Counts the live cells among the eight toroidal neighbours of `(x, y)`.
    fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let (x, y) = (x as i64, y as i64);
        let xs = [wrap(x - 1, self.width), wrap(x, self.width), wrap(x + 1, self.width)];
        let ys = [wrap(y - 1, self.height), wrap(y, self.height), wrap(y + 1, self.height)];

        let mut count = 0;
        for (j, &ny) in ys.iter().enumerate() {
            for (i, &nx) in xs.iter().enumerate() {
                if (i, j) != (1, 1) && self.cells[self.index(nx, ny)] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Advances every cell by one generation.
    ///
    /// Next states are computed from the current buffer only, then the new
    /// buffer replaces it in one step.
    pub fn advance_one_generation(&mut self) {
        let mut next = Vec::with_capacity(self.cells.len());
        for y in 0..self.height {
            for x in 0..self.width {
                let alive = self.cells[self.index(x, y)];
                let neighbors = self.live_neighbors(x, y);
                next.push(if alive {
                    self.rules.is_survival(neighbors)
                } else {
                    self.rules.is_birth(neighbors)
                });
            }
        }
        self.cells = next;
    }

    /// Live cells in row-major order.
    pub fn live_cells(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(idx, _)| Cell::alive((idx % self.width) as i64, (idx / self.width) as i64))
            .collect()
    }
}

impl TryFrom<&UniverseDescription> for ToroidalGrid {
    type Error = UniverseError;

    fn try_from(description: &UniverseDescription) -> Result<Self> {
        Self::from_description(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid(width: usize, height: usize, cells: &[(i64, i64)]) -> ToroidalGrid {
        let description = UniverseDescription::new(
            "test",
            width,
            height,
            RuleSet::STANDARD,
            cells.iter().copied().map(Cell::from).collect(),
        );
        ToroidalGrid::from_description(&description).unwrap()
    }

    fn coords(grid: &ToroidalGrid) -> Vec<(i64, i64)> {
        grid.live_cells().iter().map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn wrap_edges() {
        assert_eq!(wrap(-1, 5), 4);
        assert_eq!(wrap(-2, 5), 4);
        assert_eq!(wrap(5, 5), 0);
        assert_eq!(wrap(7, 5), 2);
        assert_eq!(wrap(0, 1), 0);
        assert_eq!(wrap(-1, 1), 0);
    }

    proptest! {
        #[test]
        fn wrap_properties(extent in 1usize..1000, c in 0i64..1000) {
            prop_assert_eq!(wrap(-1, extent), extent - 1);
            prop_assert_eq!(wrap(extent as i64, extent), 0);
            if (c as usize) < extent {
                prop_assert_eq!(wrap(c, extent), c as usize);
            } else {
                prop_assert!(wrap(c, extent) < extent);
            }
        }
    }

    #[test]
    fn out_of_range_coordinate_rejected() {
        let description = UniverseDescription::new(
            "bad",
            4,
            3,
            RuleSet::STANDARD,
            vec![Cell::alive(4, 0)],
        );
        assert_eq!(
            ToroidalGrid::try_from(&description),
            Err(UniverseError::CoordinateOutOfRange {
                x: 4,
                y: 0,
                width: 4,
                height: 3
            })
        );
        let negative = description.with_live_cells(vec![Cell::alive(0, -1)]);
        assert!(ToroidalGrid::from_description(&negative).is_err());
    }

    #[test]
    fn oversized_or_empty_grids_rejected() {
        for (width, height) in [(1 << 32, 1 << 32), (100_000, 100_000), (0, 5)] {
            let description =
                UniverseDescription::new("huge", width, height, RuleSet::STANDARD, Vec::new());
            assert!(matches!(
                ToroidalGrid::from_description(&description),
                Err(UniverseError::MalformedSize(_))
            ));
        }
        assert_eq!(checked_area(4096, 4096), Ok(MAX_CELLS));

        let clamped = ToroidalGrid::empty(usize::MAX, usize::MAX, RuleSet::STANDARD);
        assert!(clamped.width() * clamped.height() <= MAX_CELLS);
        let raised = ToroidalGrid::empty(0, 0, RuleSet::STANDARD);
        assert_eq!((raised.width(), raised.height()), (1, 1));
    }

    #[test]
    fn single_cell_torus_is_its_own_neighbourhood() {
        // Every one of the eight offsets wraps onto the cell itself.
        let mut g = grid(1, 1, &[(0, 0)]);
        assert_eq!(g.live_neighbors(0, 0), 8);
        g.advance_one_generation();
        assert_eq!(g.population(), 0);

        let seeds = UniverseDescription::new(
            "one",
            1,
            1,
            RuleSet::new(&[], &[8]).unwrap(),
            vec![Cell::alive(0, 0)],
        );
        let mut g = ToroidalGrid::from_description(&seeds).unwrap();
        g.advance_one_generation();
        assert_eq!(coords(&g), vec![(0, 0)]);
    }

    #[test]
    fn two_by_two_counts_each_offset() {
        // On a 2x2 torus the other three cells each appear at several offsets:
        // the horizontal and vertical neighbours twice, the diagonal four times.
        let mut g = grid(2, 2, &[(0, 0)]);
        assert_eq!(g.live_neighbors(1, 0), 2);
        assert_eq!(g.live_neighbors(0, 1), 2);
        assert_eq!(g.live_neighbors(1, 1), 4);
        assert_eq!(g.live_neighbors(0, 0), 0);

        let full = grid(2, 2, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(full.live_neighbors(0, 0), 8);

        // A lone cell dies and nothing reaches exactly three.
        g.advance_one_generation();
        assert_eq!(g.population(), 0);

        // A horizontal pair: each live cell sees its partner twice and
        // survives, each dead cell sees the pair at six offsets and stays dead.
        let mut pair = grid(2, 2, &[(0, 0), (1, 0)]);
        assert_eq!(pair.live_neighbors(0, 0), 2);
        assert_eq!(pair.live_neighbors(0, 1), 6);
        assert_eq!(pair.live_neighbors(1, 1), 6);
        pair.advance_one_generation();
        assert_eq!(coords(&pair), vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn dead_and_duplicate_entries_are_harmless() {
        let description = UniverseDescription::new(
            "dups",
            3,
            3,
            RuleSet::STANDARD,
            vec![Cell::alive(1, 1), Cell::alive(1, 1), Cell::dead(9, 9)],
        );
        let grid = ToroidalGrid::from_description(&description).unwrap();
        assert_eq!(grid.population(), 1);
        assert_eq!(coords(&grid), vec![(1, 1)]);
    }

    #[test]
    fn synchronous_update_on_small_torus() {
        // On a 3x3 torus every other cell is a neighbour. Each live cell of the
        // middle row sees 2 live neighbours and survives; each dead cell sees
        // 3 and is born.
        let mut g = grid(3, 3, &[(0, 1), (1, 1), (2, 1)]);
        for y in 0..3 {
            for x in 0..3 {
                let expected = if y == 1 { 2 } else { 3 };
                assert_eq!(g.live_neighbors(x, y), expected, "cell ({}, {})", x, y);
            }
        }

        g.advance_one_generation();
        assert_eq!(g.population(), 9);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(g.live_neighbors(x, y), 8);
            }
        }

        g.advance_one_generation();
        assert_eq!(g.population(), 0);
    }

    #[test]
    fn blinker_oscillates() {
        let vertical = [(2, 1), (2, 2), (2, 3)];
        let mut g = grid(5, 5, &vertical);
        g.advance_one_generation();
        assert_eq!(coords(&g), vec![(1, 2), (2, 2), (3, 2)]);
        g.advance_one_generation();
        assert_eq!(coords(&g), vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn glider_crosses_the_torus() {
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut g = grid(8, 8, &glider);
        let start = g.clone();
        for _ in 0..4 {
            g.advance_one_generation();
        }
        // One period moves the glider one cell down and to the right.
        let shifted = grid(8, 8, &[(2, 1), (3, 2), (1, 3), (2, 3), (3, 3)]);
        assert_eq!(coords(&g), coords(&shifted));
        for _ in 4..32 {
            g.advance_one_generation();
        }
        assert_eq!(g, start);
    }

    #[test]
    fn pattern_wraps_across_edges() {
        // A blinker straddling the left/right seam.
        let mut g = grid(5, 5, &[(4, 2), (0, 2), (1, 2)]);
        g.advance_one_generation();
        assert_eq!(coords(&g), vec![(0, 1), (0, 2), (0, 3)]);
        assert!(g.is_alive(5, 2));
        assert!(!g.is_alive(-1, 2));
    }

    #[test]
    fn custom_rules_apply() {
        // B1/S: every dead cell with exactly one neighbour is born, nothing survives.
        let description = UniverseDescription::new(
            "seeds",
            5,
            5,
            RuleSet::new(&[1], &[]).unwrap(),
            vec![Cell::alive(2, 2)],
        );
        let mut g = ToroidalGrid::from_description(&description).unwrap();
        g.advance_one_generation();
        assert_eq!(g.population(), 8);
        assert!(!g.is_alive(2, 2));
    }

    #[test]
    fn live_cells_is_row_major_and_repeatable() {
        let g = grid(4, 4, &[(3, 0), (0, 3), (1, 0)]);
        assert_eq!(coords(&g), vec![(1, 0), (3, 0), (0, 3)]);
        assert_eq!(g.live_cells(), g.live_cells());
        let rows: Vec<&[bool]> = g.rows().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], &[false, true, false, true]);
    }
}
