//! Errors raised while setting up the fleet.

use std::fmt::{self, Debug};

use thiserror::Error;

/// Reason why a ship could not be placed with a given anchor and orientation.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// The given ship was already placed.
    #[error("ship was already placed")]
    AlreadyPlaced,
    /// Part of the ship would hang off the board.
    #[error("the ship does not fit on the board at that position")]
    OutOfBounds,
    /// One or more of the cells in the projection was already occupied.
    #[error("the requested position was already occupied")]
    AlreadyOccupied,
}

/// Error caused when attempting to place a ship in an invalid position.
#[derive(Error)]
#[error("could not place ship: {reason}")]
pub struct PlaceError<P> {
    #[source]
    reason: CannotPlaceReason,
    placement: P,
}

impl<P> Debug for PlaceError<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<P> PlaceError<P> {
    /// Construct a placement error from a reason and placement.
    pub(crate) fn new(reason: CannotPlaceReason, placement: P) -> Self {
        Self { reason, placement }
    }

    /// Get the reason placement was aborted.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }

    /// Extract the placement from this error.
    pub fn into_placement(self) -> P {
        self.placement
    }
}
