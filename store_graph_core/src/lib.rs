use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub mod graph;
pub mod map;
pub mod resolver;
pub mod store;

/// Unique identifier for items placed in a store.
pub type ItemId = u32;

/// Represents a grid coordinate as (row, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Position { row, column }
    }

    /// Returns manhattan distance between two positions
    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Error returned when a `"row,column"` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid position '{0}', expected 'row,column'")]
pub struct ParsePositionError(String);

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, column) = s
            .split_once(',')
            .ok_or_else(|| ParsePositionError(s.to_string()))?;
        let row = row
            .trim()
            .parse()
            .map_err(|_| ParsePositionError(s.to_string()))?;
        let column = column
            .trim()
            .parse()
            .map_err(|_| ParsePositionError(s.to_string()))?;
        Ok(Position { row, column })
    }
}

/// Classification of what occupies a cell of the store floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    /// Impassable. Never becomes a vertex.
    Wall,
    Aisle,
    Shelf,
    Entrance,
    Checkout,
}

impl ItemType {
    #[inline]
    pub fn is_wall(self) -> bool {
        self == ItemType::Wall
    }
}

/// A record occupying a specific grid position.
///
/// Items supplied with a store always carry an `id`. Items synthesized for
/// cells without a matching record have no `id` and only describe the cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub row: usize,
    pub column: usize,
}

impl Item {
    pub fn new(id: ItemId, item_type: ItemType, position: Position) -> Self {
        Item {
            id: Some(id),
            item_type,
            row: position.row,
            column: position.column,
        }
    }

    /// Creates an item without identity for a cell that has no record.
    pub fn placeholder(item_type: ItemType, position: Position) -> Self {
        Item {
            id: None,
            item_type,
            row: position.row,
            column: position.column,
        }
    }

    /// Returns the position this item records for itself.
    #[inline]
    pub fn position(&self) -> Position {
        Position {
            row: self.row,
            column: self.column,
        }
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.id.is_none()
    }
}
