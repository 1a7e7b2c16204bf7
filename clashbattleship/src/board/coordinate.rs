use std::fmt;

use serde::{Deserialize, Serialize};

/// The coordinates of a cell in the board.
///
/// Ordering is row-major: rows compare first, then columns. On the wire a coordinate is
/// the pair `[row, col]`.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Coordinate {
    /// Vertical position of the cell, 0 is the top row.
    pub row: usize,
    /// Horizontal position of the cell, 0 is the leftmost column.
    pub col: usize,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `row` and `col`.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether `row + col` is even, i.e. the cell is on the "white" squares of a
    /// checkerboard that has a white square at the origin.
    pub fn even_parity(&self) -> bool {
        (self.row + self.col) % 2 == 0
    }

    /// Manhattan distance between two coordinates.
    pub fn manhattan(&self, other: &Coordinate) -> usize {
        abs_diff(self.row, other.row) + abs_diff(self.col, other.col)
    }
}

fn abs_diff(a: usize, b: usize) -> usize {
    if a > b {
        a - b
    } else {
        b - a
    }
}

impl From<(usize, usize)> for Coordinate {
    /// Construct a [`Coordinate`] from the given `(row, col)` pair.
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<Coordinate> for (usize, usize) {
    /// Convert the [`Coordinate`] into a `(row, col)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.row, coord.col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_row_major() {
        let mut coords = vec![
            Coordinate::new(1, 0),
            Coordinate::new(0, 7),
            Coordinate::new(1, 3),
            Coordinate::new(0, 0),
        ];
        coords.sort();
        assert_eq!(
            coords,
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(0, 7),
                Coordinate::new(1, 0),
                Coordinate::new(1, 3),
            ]
        );
    }

    #[test]
    fn serializes_as_pair() {
        let coord = Coordinate::new(6, 2);
        assert_eq!(serde_json::to_string(&coord).unwrap(), "[6,2]");
        let back: Coordinate = serde_json::from_str("[5, 0]").unwrap();
        assert_eq!(back, Coordinate::new(5, 0));
    }

    #[test]
    fn manhattan_is_symmetric() {
        let a = Coordinate::new(3, 3);
        let b = Coordinate::new(4, 4);
        assert_eq!(a.manhattan(&b), 2);
        assert_eq!(b.manhattan(&a), 2);
        assert_eq!(a.manhattan(&a), 0);
    }
}
