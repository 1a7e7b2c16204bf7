//! The fog-of-war grid: what is known about every cell of the opponent's board.

use std::{fmt, ops::Index};

use log::warn;

use crate::board::{Coordinate, RectDimensions};

/// What the shooter knows about a single cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CellStatus {
    /// Never shot, or the result is not visible.
    Unknown,
    /// Shot and hit a ship that is not sunk yet.
    Hit,
    /// Shot and hit nothing.
    Miss,
    /// Part of a ship that has been sunk.
    Sunk,
    /// Temporarily protected, shots at it have no effect until the block expires.
    Blocked,
}

impl CellStatus {
    /// Parse the wire symbol of a cell.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "N" => Some(CellStatus::Unknown),
            "H" => Some(CellStatus::Hit),
            "M" => Some(CellStatus::Miss),
            "S" => Some(CellStatus::Sunk),
            "B" => Some(CellStatus::Blocked),
            _ => None,
        }
    }

    /// The wire symbol of this status.
    pub fn symbol(self) -> &'static str {
        match self {
            CellStatus::Unknown => "N",
            CellStatus::Hit => "H",
            CellStatus::Miss => "M",
            CellStatus::Sunk => "S",
            CellStatus::Blocked => "B",
        }
    }
}

impl Default for CellStatus {
    fn default() -> Self {
        CellStatus::Unknown
    }
}

/// Status of every cell on a board, stored row-major.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    /// Dimensions of this board.
    dim: RectDimensions,
    /// Cells that make up this board.
    cells: Box<[CellStatus]>,
}

impl Grid {
    /// Construct a grid where every cell is [`CellStatus::Unknown`].
    pub fn new(dim: RectDimensions) -> Self {
        let cells = (0..dim.total_size()).map(|_| Default::default()).collect();
        Self { dim, cells }
    }

    /// Construct a grid from row-major cell statuses. Returns `None` if the number of
    /// cells does not match the dimensions.
    pub fn from_cells(dim: RectDimensions, cells: Vec<CellStatus>) -> Option<Self> {
        if cells.len() == dim.total_size() {
            Some(Self {
                dim,
                cells: cells.into_boxed_slice(),
            })
        } else {
            None
        }
    }

    /// Build a grid from rows of wire symbols, tolerating damaged input. Missing rows and
    /// cells stay [`CellStatus::Unknown`], extra ones are ignored, and unreadable symbols
    /// become [`CellStatus::Miss`] so they are never targeted.
    pub fn from_rows<R, C, S>(dim: RectDimensions, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut grid = Self::new(dim);
        let mut rows_seen = 0;
        for (row, cells) in rows.into_iter().enumerate() {
            rows_seen += 1;
            if row >= dim.height() {
                continue;
            }
            for (col, symbol) in cells.into_iter().enumerate().take(dim.width()) {
                let symbol = symbol.as_ref();
                let status = CellStatus::from_symbol(symbol).unwrap_or_else(|| {
                    warn!("unreadable cell {:?} at [{}, {}], treating as miss", symbol, row, col);
                    CellStatus::Miss
                });
                grid.set(Coordinate::new(row, col), status);
            }
        }
        if rows_seen != dim.height() {
            warn!("grid has {} rows, expected {}", rows_seen, dim.height());
        }
        grid
    }

    /// Get the [`RectDimensions`] of this grid.
    pub fn dimensions(&self) -> &RectDimensions {
        &self.dim
    }

    /// Get the status at the given [`Coordinate`], or `None` if it is out of bounds.
    pub fn get(&self, coord: Coordinate) -> Option<CellStatus> {
        self.dim
            .try_linearize(&coord)
            .and_then(|i| self.cells.get(i))
            .copied()
    }

    /// Set the status of a cell. Returns the previous status, or `None` if the coordinate
    /// is out of bounds.
    pub fn set(&mut self, coord: Coordinate, status: CellStatus) -> Option<CellStatus> {
        let idx = self.dim.try_linearize(&coord)?;
        Some(std::mem::replace(&mut self.cells[idx], status))
    }

    /// Returns true if the coordinate is in bounds and has never been resolved.
    pub fn is_unknown(&self, coord: Coordinate) -> bool {
        self.get(coord) == Some(CellStatus::Unknown)
    }

    /// Iterate every cell with its coordinate in row-major order.
    pub fn iter(&self) -> impl '_ + Iterator<Item = (Coordinate, CellStatus)> {
        let dim = self.dim;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, status)| (dim.un_linearize(idx), *status))
    }

    /// Iterate the coordinates of every cell with the given status in row-major order.
    pub fn cells_with(&self, status: CellStatus) -> impl '_ + Iterator<Item = Coordinate> {
        self.iter()
            .filter(move |(_, s)| *s == status)
            .map(|(coord, _)| coord)
    }

    /// The first unknown cell in row-major order.
    pub fn first_unknown(&self) -> Option<Coordinate> {
        self.cells_with(CellStatus::Unknown).next()
    }

    /// Count the unknown orthogonal neighbors of a cell.
    pub fn unknown_neighbors(&self, coord: Coordinate) -> usize {
        self.dim
            .neighbors(coord)
            .filter(|n| self.is_unknown(*n))
            .count()
    }
}

impl Index<Coordinate> for Grid {
    type Output = CellStatus;

    fn index(&self, coord: Coordinate) -> &Self::Output {
        let idx = self
            .dim
            .try_linearize(&coord)
            .expect("coordinate out of bounds");
        &self.cells[idx]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.dim.iter_coordinates() {
            for coord in row {
                f.write_str(self[coord].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
