//! Grid coordinates and unit footprints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based cell coordinate on an N×N block grid.
///
/// Row 0 is the top edge and column 0 the left edge, matching the pixel
/// space used by the geometry primitives (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    /// Grid row (0-based, top to bottom)
    pub row: u8,
    /// Grid column (0-based, left to right)
    pub col: u8,
}

impl GridPosition {
    /// Creates a new position with the given row and column.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// The cell above, if any.
    #[must_use]
    pub fn up(self) -> Option<Self> {
        self.row.checked_sub(1).map(|row| Self::new(row, self.col))
    }

    /// The cell below, if the row index does not overflow.
    #[must_use]
    pub fn down(self) -> Option<Self> {
        self.row.checked_add(1).map(|row| Self::new(row, self.col))
    }

    /// The cell to the left, if any.
    #[must_use]
    pub fn left(self) -> Option<Self> {
        self.col.checked_sub(1).map(|col| Self::new(self.row, col))
    }

    /// The cell to the right, if the column index does not overflow.
    #[must_use]
    pub fn right(self) -> Option<Self> {
        self.col.checked_add(1).map(|col| Self::new(self.row, col))
    }

    /// Edge-adjacent neighbors in up, down, left, right order.
    ///
    /// Neighbors that would fall off the low edge of the grid are omitted;
    /// the high edge is the caller's concern since it depends on grid size.
    #[must_use]
    pub fn edge_neighbors(self) -> Vec<Self> {
        [self.up(), self.down(), self.left(), self.right()]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Whether `other` shares an edge with this cell.
    #[must_use]
    pub const fn is_edge_adjacent(self, other: Self) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
    }

    /// Whether this cell lies on an `grid_size`×`grid_size` board.
    #[must_use]
    pub const fn in_grid(self, grid_size: u8) -> bool {
        self.row < grid_size && self.col < grid_size
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Footprint of a unit in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Number of rows covered
    pub rows: u8,
    /// Number of columns covered
    pub cols: u8,
}

impl Span {
    /// The 1×1 footprint shared by most units.
    pub const SINGLE: Self = Self::new(1, 1);

    /// Creates a new span.
    #[must_use]
    pub const fn new(rows: u8, cols: u8) -> Self {
        Self { rows, cols }
    }

    /// Number of cells covered.
    #[must_use]
    pub const fn area(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Decomposes a footprint anchored at `origin` into its 1×1 cells, row-major.
    #[must_use]
    pub fn cells(self, origin: GridPosition) -> Vec<GridPosition> {
        let mut cells = Vec::with_capacity(self.area());
        for dr in 0..self.rows {
            for dc in 0..self.cols {
                // Out-of-range coordinates cannot be represented; bounds
                // checks reject those footprints before they get here.
                if let (Some(row), Some(col)) =
                    (origin.row.checked_add(dr), origin.col.checked_add(dc))
                {
                    cells.push(GridPosition::new(row, col));
                }
            }
        }
        cells
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::SINGLE
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.rows, self.cols)
    }
}
