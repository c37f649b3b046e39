use std::ops::Index;

use crate::Position;

/// Represents errors that can occur while building or reading a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Axis-aligned offsets as (row, column), in the order edges are linked:
/// up, down, left, right.
pub const CARDINAL_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A rectangular 2D grid.
///
/// Stores elements of type `T` in a flat vector using row-major order, so
/// the slot of `(row, column)` is `row * width + column`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Builds a grid from a sequence of rows.
    ///
    /// No rows, or a first row with no columns, produce an empty grid as long
    /// as every other row is empty too. Any row whose length differs from the
    /// first row's is rejected.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * rows.len());
        let mut height = 0;

        for (row, cells_in_row) in rows.into_iter().enumerate() {
            if cells_in_row.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: cells_in_row.len(),
                });
            }
            cells.extend(cells_in_row);
            height += 1;
        }

        if width == 0 {
            height = 0;
        }

        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    /// Returns the width (row length) of the grid.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height (row count) of the grid.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` if the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Checks if the given position is within the grid boundaries.
    #[inline]
    pub fn is_valid(&self, position: Position) -> bool {
        position.row < self.height && position.column < self.width
    }

    /// Converts a position to its flat slot index.
    ///
    /// Returns `None` if the position is out of bounds.
    #[inline]
    pub fn slot_index(&self, position: Position) -> Option<usize> {
        self.is_valid(position)
            .then(|| position.row * self.width + position.column)
    }

    /// Converts a flat slot index back to a position.
    #[inline]
    pub fn position_of(&self, index: usize) -> Option<Position> {
        (index < self.cells.len()).then(|| Position {
            row: index / self.width,
            column: index % self.width,
        })
    }

    /// Gets a reference to the cell at the given position.
    pub fn get(&self, position: Position) -> Option<&T> {
        self.cells.get(self.slot_index(position)?)
    }

    /// Moves `position` by `(d_row, d_column)`, returning `None` when the
    /// result leaves the grid.
    pub fn offset(&self, position: Position, (d_row, d_column): (isize, isize)) -> Option<Position> {
        let moved = Position {
            row: position.row.checked_add_signed(d_row)?,
            column: position.column.checked_add_signed(d_column)?,
        };
        self.is_valid(moved).then_some(moved)
    }

    /// Returns an iterator over the cells of the grid in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    /// Returns an iterator that yields `(Position, &T)` for each cell in
    /// row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = (Position, &T)> {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(index, cell)| {
            (
                Position {
                    row: index / width,
                    column: index % width,
                },
                cell,
            )
        })
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, position: Position) -> &Self::Output {
        match self.slot_index(position) {
            Some(idx) => &self.cells[idx],
            None => panic!(
                "Grid index {} out of bounds for grid size ({}, {})",
                position, self.height, self.width
            ),
        }
    }
}
