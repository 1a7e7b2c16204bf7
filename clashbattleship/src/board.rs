//! Types that make up the game board.

pub use self::{
    coordinate::Coordinate,
    errors::{CannotPlaceReason, PlaceError},
    grid::{CellStatus, Grid},
    rectangular::{RectDimensions, RectNeighbors, BOARD_SIZE},
    setup::FleetSetup,
};

mod coordinate;
mod errors;
mod grid;
pub mod rectangular;
pub mod setup;
