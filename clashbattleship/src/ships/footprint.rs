// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use crate::{
    board::{Coordinate, RectDimensions},
    ships::{Orientation, ShipType},
};

/// Projection of a ship onto the board: the cells it covers, row-major.
pub type ShapeProjection = Vec<Coordinate>;

/// Project `ship` onto the board with its top-left cell at `anchor`. Returns `None` if
/// any covered cell would fall off the board.
pub fn footprint(
    ship: ShipType,
    anchor: Coordinate,
    orientation: Orientation,
    dim: &RectDimensions,
) -> Option<ShapeProjection> {
    let (rows, cols) = orientation.extent(ship);
    let mut proj = Vec::with_capacity(rows * cols);
    for dr in 0..rows {
        for dc in 0..cols {
            proj.push(dim.check_bounds(Coordinate::new(anchor.row + dr, anchor.col + dc))?);
        }
    }
    Some(proj)
}

/// One in-bounds placement of a ship.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Projection {
    pub anchor: Coordinate,
    pub orientation: Orientation,
    pub cells: ShapeProjection,
}

/// Iterator over every in-bounds placement of a ship: all horizontal anchors in
/// row-major order, then all vertical ones. Does not in any way account for whether
/// cells are already occupied or shot.
#[derive(Debug, Clone)]
pub struct Placements<'a> {
    ship: ShipType,
    dim: &'a RectDimensions,
    next: usize,
}

impl<'a> Placements<'a> {
    pub fn new(ship: ShipType, dim: &'a RectDimensions) -> Self {
        Self { ship, dim, next: 0 }
    }

    /// Square ships look the same in both orientations, so only project them once.
    fn orientations(&self) -> usize {
        if self.ship.thickness() == self.ship.length() {
            1
        } else {
            Orientation::ALL.len()
        }
    }
}

impl Iterator for Placements<'_> {
    type Item = Projection;

    fn next(&mut self) -> Option<Projection> {
        let total = self.dim.total_size();
        while self.next < total * self.orientations() {
            let orientation = Orientation::ALL[self.next / total];
            let anchor = self.dim.un_linearize(self.next % total);
            self.next += 1;
            if let Some(cells) = footprint(self.ship, anchor, orientation, self.dim) {
                return Some(Projection {
                    anchor,
                    orientation,
                    cells,
                });
            }
        }
        None
    }
}
