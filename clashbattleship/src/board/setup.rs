//! Implements the setup phase of the board.
use std::collections::{BTreeSet, HashSet};

#[cfg(feature = "rng_gen")]
use rand::{distributions::Uniform, Rng};

use crate::{
    board::{CannotPlaceReason, Coordinate, PlaceError, RectDimensions},
    ships::{footprint, Orientation, Placements, ShapeProjection, ShipType},
};

/// A ship placement that was asked for: which ship, where, and which way.
pub type PlacementRequest = (ShipType, Coordinate, Orientation);

/// Setup phase for the player's own board. Tracks which ships have been placed and
/// which cells they occupy.
#[derive(Debug, Clone)]
pub struct FleetSetup {
    /// Dimensions of the board ships are placed into.
    dim: RectDimensions,

    /// Cells covered by ships that are already placed.
    occupied: HashSet<Coordinate>,

    /// Ships that are already placed.
    placed: BTreeSet<ShipType>,
}

impl FleetSetup {
    /// Begin setup with an empty board of the given [`RectDimensions`].
    pub fn new(dim: RectDimensions) -> Self {
        Self {
            dim,
            occupied: HashSet::new(),
            placed: BTreeSet::new(),
        }
    }

    /// Record a ship that the game already placed. `ship` may be `None` for an entry
    /// whose name was not recognised; its cells still count as occupied.
    pub fn record<I>(&mut self, ship: Option<ShipType>, cells: I)
    where
        I: IntoIterator<Item = Coordinate>,
    {
        if let Some(ship) = ship {
            self.placed.insert(ship);
        }
        self.occupied.extend(cells);
    }

    /// Returns true if the given ship has been placed.
    pub fn is_placed(&self, ship: ShipType) -> bool {
        self.placed.contains(&ship)
    }

    /// Get an iterator over the ships which still need to be placed, in placement order.
    pub fn pending_ships(&self) -> impl '_ + Iterator<Item = ShipType> {
        ShipType::ALL
            .iter()
            .copied()
            .filter(move |ship| !self.is_placed(*ship))
    }

    /// The next ship to place, if any.
    pub fn next_ship(&self) -> Option<ShipType> {
        self.pending_ships().next()
    }

    /// Check if the given placement would be valid, returning the cells it would cover.
    /// Does not place the ship.
    pub fn check_placement(
        &self,
        ship: ShipType,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Result<ShapeProjection, PlaceError<PlacementRequest>> {
        let request = (ship, anchor, orientation);
        if self.is_placed(ship) {
            return Err(PlaceError::new(CannotPlaceReason::AlreadyPlaced, request));
        }
        let cells = match footprint(ship, anchor, orientation, &self.dim) {
            Some(cells) => cells,
            None => return Err(PlaceError::new(CannotPlaceReason::OutOfBounds, request)),
        };
        if cells.iter().any(|cell| self.occupied.contains(cell)) {
            return Err(PlaceError::new(CannotPlaceReason::AlreadyOccupied, request));
        }
        Ok(cells)
    }

    /// The first valid placement for the ship, scanning horizontal anchors row-major and
    /// then vertical ones.
    pub fn first_fit(&self, ship: ShipType) -> Option<(Coordinate, Orientation)> {
        if self.is_placed(ship) {
            return None;
        }
        Placements::new(ship, &self.dim)
            .find(|proj| proj.cells.iter().all(|cell| !self.occupied.contains(cell)))
            .map(|proj| (proj.anchor, proj.orientation))
    }

    /// Try up to `attempts` random anchors and orientations for the ship, returning the
    /// first one that is valid.
    #[cfg(feature = "rng_gen")]
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        ship: ShipType,
        attempts: usize,
    ) -> Option<(Coordinate, Orientation)> {
        let rows = Uniform::new(0, self.dim.height());
        let cols = Uniform::new(0, self.dim.width());
        (0..attempts).find_map(|_| {
            let anchor = Coordinate::new(rng.sample(&rows), rng.sample(&cols));
            let orientation = rng.gen();
            self.check_placement(ship, anchor, orientation)
                .ok()
                .map(|_| (anchor, orientation))
        })
    }
}
