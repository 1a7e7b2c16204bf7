//! Implements the rectangular board the game is played on.
use crate::board::Coordinate;

/// Side length of the standard square board.
pub const BOARD_SIZE: usize = 8;

/// Simple rectangular dimensions. Coordinates never wrap around the edges.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RectDimensions {
    /// Width of the board. This cooresponds to the `col` of a [`Coordinate`].
    width: usize,
    /// Height of the board. This cooresponds to the `row` of a [`Coordinate`].
    height: usize,
}

impl RectDimensions {
    /// Create new [`RectDimensions`] with the specified width and height.
    /// Panics if `width * height` exceeds `usize::max_value()` or if `width` or `height` is 0.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Some(dim) => dim,
            None if width == 0 || height == 0 => {
                panic!("RectDimensions must be nonzero, got {}x{}", width, height)
            }
            None => panic!(
                "RectDimensions too large: {} * {} > {}",
                width,
                height,
                usize::max_value()
            ),
        }
    }

    /// Create new [`RectDimensions`] with the specified width and height.
    /// Returns `None` if `width * height` exceeds `usize::max_value()` or if `width` or `height`
    /// is 0.
    pub fn try_new(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            width.checked_mul(height).map(|_| Self { width, height })
        }
    }

    /// Get the width of these [`RectDimensions`].
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of these [`RectDimensions`].
    pub fn height(&self) -> usize {
        self.height
    }

    /// Compute the total number of cells.
    pub fn total_size(&self) -> usize {
        self.width * self.height
    }

    /// The cell closest to the middle of the board, rounding towards the bottom right.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.height / 2, self.width / 2)
    }

    /// Get an iterator over rows of this grid. Each row is an iterator over the coordinates of
    /// that row.
    pub fn iter_coordinates(&self) -> impl Iterator<Item = impl Iterator<Item = Coordinate>> {
        let width = self.width;
        (0..self.height).map(move |row| (0..width).map(move |col| Coordinate { row, col }))
    }

    /// Get an iterator over every coordinate in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        let dim = *self;
        (0..self.total_size()).map(move |idx| dim.un_linearize(idx))
    }

    /// Check if the given [`Coordinate`] is in bounds for these [`RectDimensions`]. If so, return
    /// it, otherwise return `None`.
    #[inline]
    pub fn check_bounds(&self, coord: Coordinate) -> Option<Coordinate> {
        if coord.row < self.height && coord.col < self.width {
            Some(coord)
        } else {
            None
        }
    }

    /// Convert a coordinate to a linear index within this dimension.
    /// Returns `None` if the coordinate is out of range for the dimension.
    pub fn try_linearize(&self, coord: &Coordinate) -> Option<usize> {
        self.check_bounds(*coord)
            .map(|coord| coord.row * self.width + coord.col)
    }

    /// Convert a linear index back into a [`Coordinate`].
    pub fn un_linearize(&self, idx: usize) -> Coordinate {
        Coordinate {
            row: idx / self.width,
            col: idx % self.width,
        }
    }

    /// Move `coord` by the given number of rows and columns, returning `None` if the
    /// result leaves the board.
    pub fn offset(&self, coord: Coordinate, rows: isize, cols: isize) -> Option<Coordinate> {
        let row = shift(coord.row, rows)?;
        let col = shift(coord.col, cols)?;
        self.check_bounds(Coordinate::new(row, col))
    }

    /// Iterate the in-bounds neighbors of the given coordinate in the order up, down,
    /// left, right.
    pub fn neighbors(&self, coord: Coordinate) -> RectNeighbors {
        RectNeighbors {
            dim: *self,
            coord,
            // If the coordinate is out of bounds, skip directly to the End state so we
            // don't have to run check_bounds every iteration.
            step: self
                .check_bounds(coord)
                .map_or(RectNeighborsStep::End, |_| RectNeighborsStep::Up),
        }
    }
}

fn shift(value: usize, by: isize) -> Option<usize> {
    if by < 0 {
        value.checked_sub(by.unsigned_abs())
    } else {
        value.checked_add(by as usize)
    }
}

impl Default for RectDimensions {
    /// Construct the default rectangular dimensions, an 8x8 board.
    fn default() -> Self {
        Self {
            width: BOARD_SIZE,
            height: BOARD_SIZE,
        }
    }
}

/// Iterator over the orthogonal neighbors of a cell.
#[derive(Debug, Clone)]
pub struct RectNeighbors {
    dim: RectDimensions,
    coord: Coordinate,
    step: RectNeighborsStep,
}

#[derive(Debug, Copy, Clone)]
enum RectNeighborsStep {
    Up,
    Down,
    Left,
    Right,
    End,
}

impl Iterator for RectNeighbors {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        loop {
            let (rows, cols, next) = match self.step {
                RectNeighborsStep::Up => (-1, 0, RectNeighborsStep::Down),
                RectNeighborsStep::Down => (1, 0, RectNeighborsStep::Left),
                RectNeighborsStep::Left => (0, -1, RectNeighborsStep::Right),
                RectNeighborsStep::Right => (0, 1, RectNeighborsStep::End),
                RectNeighborsStep::End => return None,
            };
            self.step = next;
            if let Some(neighbor) = self.dim.offset(self.coord, rows, cols) {
                return Some(neighbor);
            }
        }
    }
}
