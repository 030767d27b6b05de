//! Square number to grid cell mapping.
//!
//! Squares run 1..=goal along a serpentine path starting in the bottom-left
//! corner. Row 0 is the top of the board. Rows counted from the bottom
//! alternate direction: even rows run left to right, odd rows right to left.

use serde::{Deserialize, Serialize};

/// A grid cell. `row` 0 is the top row, `col` 0 the left column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

/// Layout of a square serpentine board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardGeometry {
    size: u32,
}

impl BoardGeometry {
    /// Geometry for a `size` x `size` board.
    #[must_use]
    pub const fn new(size: u32) -> Self {
        Self { size }
    }

    /// Edge length.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Highest square number.
    #[must_use]
    pub const fn goal(&self) -> u32 {
        self.size * self.size
    }

    /// Cell holding `square`, or `None` off the board (including 0).
    #[must_use]
    pub fn cell(&self, square: u32) -> Option<Cell> {
        if square == 0 || square > self.goal() {
            return None;
        }
        let zero_indexed = square - 1;
        let row_from_bottom = zero_indexed / self.size;
        let along = zero_indexed % self.size;
        let col = if row_from_bottom % 2 == 0 {
            along
        } else {
            self.size - 1 - along
        };
        Some(Cell {
            row: self.size - 1 - row_from_bottom,
            col,
        })
    }

    /// Square at `cell`, or `None` outside the grid.
    #[must_use]
    pub fn square(&self, cell: Cell) -> Option<u32> {
        if cell.row >= self.size || cell.col >= self.size {
            return None;
        }
        let row_from_bottom = self.size - 1 - cell.row;
        let along = if row_from_bottom % 2 == 0 {
            cell.col
        } else {
            self.size - 1 - cell.col
        };
        Some(row_from_bottom * self.size + along + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> BoardGeometry {
        BoardGeometry::new(10)
    }

    #[test]
    fn test_first_row() {
        assert_eq!(board().cell(1), Some(Cell { row: 9, col: 0 }));
        assert_eq!(board().cell(10), Some(Cell { row: 9, col: 9 }));
    }

    #[test]
    fn test_serpentine_turn() {
        assert_eq!(board().cell(11), Some(Cell { row: 8, col: 9 }));
        assert_eq!(board().cell(20), Some(Cell { row: 8, col: 0 }));
    }

    #[test]
    fn test_goal_square() {
        assert_eq!(board().cell(100), Some(Cell { row: 0, col: 0 }));
    }

    #[test]
    fn test_off_board() {
        assert_eq!(board().cell(0), None);
        assert_eq!(board().cell(101), None);
        assert_eq!(board().square(Cell { row: 10, col: 0 }), None);
    }

    #[test]
    fn test_square_inverts_cell() {
        let geometry = board();
        for square in 1..=geometry.goal() {
            let cell = geometry.cell(square).unwrap();
            assert_eq!(geometry.square(cell), Some(square));
        }
    }
}
