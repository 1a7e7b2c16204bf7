//! Types used for defining ships and their shapes.
use std::fmt;

#[cfg(feature = "rng_gen")]
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};
use serde::{Deserialize, Serialize};

pub use self::footprint::{footprint, Placements, Projection, ShapeProjection};

mod footprint;

/// Ship types of the fleet. Every player has exactly one of each.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum ShipType {
    /// 1x4 ship: size 4.
    #[serde(rename = "ship_1x4")]
    Ship1x4,
    /// 1x3 ship: size 3.
    #[serde(rename = "ship_1x3")]
    Ship1x3,
    /// 2x3 ship: two rows of three, size 3.
    #[serde(rename = "ship_2x3")]
    Ship2x3,
    /// 1x2 ship: size 2.
    #[serde(rename = "ship_1x2")]
    Ship1x2,
}

impl ShipType {
    /// All ship types, in the order they are placed and the roster is scanned.
    pub const ALL: &'static [ShipType] = &[
        ShipType::Ship1x4,
        ShipType::Ship1x3,
        ShipType::Ship2x3,
        ShipType::Ship1x2,
    ];

    /// Number of cells across the ship.
    pub fn thickness(self) -> usize {
        match self {
            ShipType::Ship2x3 => 2,
            _ => 1,
        }
    }

    /// Number of cells along the ship.
    pub fn length(self) -> usize {
        match self {
            ShipType::Ship1x4 => 4,
            ShipType::Ship1x3 | ShipType::Ship2x3 => 3,
            ShipType::Ship1x2 => 2,
        }
    }

    /// The size of the ship, `max(thickness, length)`. This is the number of hits that
    /// are counted against a ship of this type when estimating how close it is to sinking.
    pub fn size(self) -> usize {
        self.thickness().max(self.length())
    }

    /// Number of cells the ship covers.
    pub fn cell_count(self) -> usize {
        self.thickness() * self.length()
    }

    /// The wire identifier of the ship, e.g. `ship_2x3`.
    pub fn name(self) -> &'static str {
        match self {
            ShipType::Ship1x4 => "ship_1x4",
            ShipType::Ship1x3 => "ship_1x3",
            ShipType::Ship2x3 => "ship_2x3",
            ShipType::Ship1x2 => "ship_1x2",
        }
    }

    /// Look up a ship type by its wire identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|ship| ship.name() == name)
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Placement orientation of a ship. A horizontal ship runs its length along a row.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "H")]
    Horizontal,
    #[serde(rename = "V")]
    Vertical,
}

impl Orientation {
    /// Both orientations, horizontal first.
    pub const ALL: &'static [Orientation] = &[Orientation::Horizontal, Orientation::Vertical];

    /// Number of rows and columns a ship covers in this orientation.
    pub fn extent(self, ship: ShipType) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (ship.thickness(), ship.length()),
            Orientation::Vertical => (ship.length(), ship.thickness()),
        }
    }
}

#[cfg(feature = "rng_gen")]
impl Distribution<Orientation> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
        if rng.gen() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        let sizes: Vec<_> = ShipType::ALL.iter().map(|s| s.size()).collect();
        assert_eq!(sizes, vec![4, 3, 3, 2]);
        assert_eq!(ShipType::Ship2x3.cell_count(), 6);
    }

    #[test]
    fn names_round_trip() {
        for &ship in ShipType::ALL {
            assert_eq!(ShipType::from_name(ship.name()), Some(ship));
            let json = serde_json::to_string(&ship).unwrap();
            assert_eq!(json, format!("\"{}\"", ship.name()));
        }
        assert_eq!(ShipType::from_name("ship_5x5"), None);
    }

    #[test]
    fn vertical_swaps_extent() {
        assert_eq!(Orientation::Horizontal.extent(ShipType::Ship2x3), (2, 3));
        assert_eq!(Orientation::Vertical.extent(ShipType::Ship2x3), (3, 2));
    }
}
