use std::{collections::HashSet, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    Item, ItemId, ItemType, Position,
    map::{Grid, GridError},
};

/// Represents errors that can occur while assembling a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store path is not rectangular: {0}")]
    Grid(#[from] GridError),
    #[error("Unknown cell code '{token}' at position ({row}, {column})")]
    UnknownCell {
        token: String,
        row: usize,
        column: usize,
    },
    #[error("Item at index {index} has no id")]
    MissingItemId { index: usize },
    #[error("Item id {0} is used more than once")]
    DuplicateItemId(ItemId),
    #[error("Item {id} at {position} comes after {previous} in the item list")]
    UnsortedItems {
        id: ItemId,
        position: Position,
        previous: Position,
    },
    #[error("Malformed store document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Classifies a raw cell marker of a store floor plan.
pub trait CellMarker {
    fn item_type(&self) -> ItemType;
}

impl CellMarker for ItemType {
    fn item_type(&self) -> ItemType {
        *self
    }
}

/// Raw floor plan marker, written as a two-letter code in layout files and
/// store documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[serde(rename = "WL")]
    Wall,
    #[default]
    #[serde(rename = "AS")]
    Aisle,
    #[serde(rename = "SH")]
    Shelf,
    #[serde(rename = "EN")]
    Entrance,
    #[serde(rename = "CK")]
    Checkout,
}

impl CellMarker for Cell {
    fn item_type(&self) -> ItemType {
        match self {
            Cell::Wall => ItemType::Wall,
            Cell::Aisle => ItemType::Aisle,
            Cell::Shelf => ItemType::Shelf,
            Cell::Entrance => ItemType::Entrance,
            Cell::Checkout => ItemType::Checkout,
        }
    }
}

impl FromStr for Cell {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WL" => Ok(Cell::Wall),
            "AS" => Ok(Cell::Aisle),
            "SH" => Ok(Cell::Shelf),
            "EN" => Ok(Cell::Entrance),
            "CK" => Ok(Cell::Checkout),
            _ => Err(()),
        }
    }
}

/// A store floor plan together with the items placed on it.
///
/// The path is always rectangular and the items are always sorted in
/// row-major order with unique ids; [`Store::new`] enforces both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store<C = Cell> {
    path: Grid<C>,
    items: Vec<Item>,
}

impl<C: CellMarker> Store<C> {
    /// Creates a store from its rows of cell markers and its item list.
    pub fn new(rows: Vec<Vec<C>>, items: Vec<Item>) -> Result<Self, StoreError> {
        let path = Grid::from_rows(rows)?;
        validate_items(&items)?;

        for item in &items {
            let position = item.position();
            match path.get(position).map(CellMarker::item_type) {
                None => warn!(id = ?item.id, %position, "Item lies outside the store path"),
                Some(ItemType::Wall) => warn!(id = ?item.id, %position, "Item lies on a wall"),
                Some(_) => {}
            }
        }

        Ok(Store { path, items })
    }

    /// Returns the floor plan.
    pub fn path(&self) -> &Grid<C> {
        &self.path
    }

    /// Returns the items in row-major order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the classification of the cell at `position`, if any.
    pub fn item_type_at(&self, position: Position) -> Option<ItemType> {
        self.path.get(position).map(CellMarker::item_type)
    }
}

fn validate_items(items: &[Item]) -> Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut previous: Option<Position> = None;

    for (index, item) in items.iter().enumerate() {
        let id = item.id.ok_or(StoreError::MissingItemId { index })?;
        if !seen.insert(id) {
            return Err(StoreError::DuplicateItemId(id));
        }
        let position = item.position();
        if let Some(previous) = previous.filter(|previous| *previous > position) {
            return Err(StoreError::UnsortedItems {
                id,
                position,
                previous,
            });
        }
        previous = Some(position);
    }
    Ok(())
}

#[derive(Deserialize)]
struct StoreDocument {
    path: Vec<Vec<Cell>>,
    #[serde(default)]
    items: Vec<Item>,
}

impl Store<Cell> {
    /// Loads a store from a JSON document of the form
    /// `{"path": [["AS", "WL", ...], ...], "items": [{"id", "type", "row", "column"}, ...]}`.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let document: StoreDocument = serde_json::from_str(json)?;
        Store::new(document.path, document.items)
    }
}

/// Loads a store from a text layout of whitespace-separated cell codes, one
/// row per line, and an item list.
pub fn load_store_from_string(layout: &str, items: Vec<Item>) -> Result<Store<Cell>, StoreError> {
    let mut rows = Vec::new();

    for (row, line) in layout.lines().filter(|line| !line.trim().is_empty()).enumerate() {
        let cells = line
            .split_whitespace()
            .enumerate()
            .map(|(column, token)| {
                token.parse::<Cell>().map_err(|()| StoreError::UnknownCell {
                    token: token.to_string(),
                    row,
                    column,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(cells);
    }

    Store::new(rows, items)
}
