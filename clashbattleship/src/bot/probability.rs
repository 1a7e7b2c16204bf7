//! Placement density of the ships still afloat.
use crate::{
    board::{Coordinate, Grid, RectDimensions},
    ships::{Placements, Projection, ShipType},
};

/// Relative likelihood that each cell holds part of a ship that is still afloat.
///
/// Every ship type in the roster is spread over all of its placements that fit entirely
/// in unknown cells. Each ship type contributes a total mass of exactly 1, shared evenly
/// by its placements and their cells, so neither big ships nor ships with many possible
/// placements dominate the map.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityMap {
    dim: RectDimensions,
    density: Box<[f64]>,
}

impl ProbabilityMap {
    /// A map with zero density everywhere.
    pub fn empty(dim: RectDimensions) -> Self {
        Self {
            dim,
            density: vec![0.0; dim.total_size()].into_boxed_slice(),
        }
    }

    /// Compute the density of every ship in the roster over the grid.
    pub fn compute(grid: &Grid, roster: &[ShipType]) -> Self {
        let mut map = Self::empty(*grid.dimensions());
        for ship in roster {
            map.accumulate(grid, *ship);
        }
        map
    }

    /// Compute the density of a single ship type.
    pub fn for_ship(grid: &Grid, ship: ShipType) -> Self {
        let mut map = Self::empty(*grid.dimensions());
        map.accumulate(grid, ship);
        map
    }

    /// Add one ship type's placements to the map.
    ///
    /// Each cell of a placement gets `1 / (placements * cells)`, not the `1 / cells` per
    /// placement a plain placement count would give, so the ship's total stays 1.
    fn accumulate(&mut self, grid: &Grid, ship: ShipType) {
        let placements: Vec<Projection> = legal_placements(grid, ship).collect();
        if placements.is_empty() {
            return;
        }
        let weight = 1.0 / (placements.len() * ship.cell_count()) as f64;
        for placement in &placements {
            for cell in &placement.cells {
                if let Some(idx) = self.dim.try_linearize(cell) {
                    self.density[idx] += weight;
                }
            }
        }
    }

    /// The density at a cell. Zero for out of bounds cells.
    pub fn get(&self, coord: Coordinate) -> f64 {
        self.dim
            .try_linearize(&coord)
            .map_or(0.0, |idx| self.density[idx])
    }

    /// Sum of the density over the whole board.
    pub fn total(&self) -> f64 {
        self.density.iter().sum()
    }

    /// Iterate every cell with its density in row-major order.
    pub fn iter(&self) -> impl '_ + Iterator<Item = (Coordinate, f64)> {
        let dim = self.dim;
        self.density
            .iter()
            .enumerate()
            .map(move |(idx, density)| (dim.un_linearize(idx), *density))
    }

    /// Build a map directly from a density function.
    #[cfg(test)]
    pub(crate) fn from_fn(dim: RectDimensions, density: impl Fn(Coordinate) -> f64) -> Self {
        Self {
            dim,
            density: dim.coordinates().map(density).collect(),
        }
    }
}

/// Placements of the ship that lie entirely on unknown cells. Any resolved cell, hit
/// included, rules a placement out.
pub fn legal_placements(grid: &Grid, ship: ShipType) -> impl '_ + Iterator<Item = Projection> {
    Placements::new(ship, grid.dimensions())
        .filter(move |proj| proj.cells.iter().all(|cell| grid.is_unknown(*cell)))
}
