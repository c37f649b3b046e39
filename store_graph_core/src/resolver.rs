//! Lazy lookup of the item occupying each grid position.
//!
//! [`ItemResolver`] walks the store's item list with a cursor that only ever
//! moves forward, remembering every item it passes by position. A full graph
//! build therefore scans the item list once.
//!
//! # Calling discipline
//!
//! Positions must be requested in non-decreasing row-major order, the same
//! order the item list is sorted in. A request for a position the cursor has
//! already moved past is answered from the memo, which holds every item the
//! cursor has passed, so an item is still found if it exists. What breaks is
//! the scan itself: it only looks ahead, and requesting a far position first
//! forces the cursor over everything in between. Debug builds assert the
//! ordering.

use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use crate::{Item, ItemId, ItemType, Position};

/// Resolves grid positions to items for a single graph build.
#[derive(Debug)]
pub struct ItemResolver<'s> {
    items: &'s [Item],
    cursor: usize,
    memo: HashMap<Position, &'s Item>,
    resolved: BTreeMap<ItemId, Item>,
    last_request: Option<Position>,
}

impl<'s> ItemResolver<'s> {
    /// Creates a resolver over an item list sorted in row-major order.
    pub fn new(items: &'s [Item]) -> Self {
        Self {
            items,
            cursor: 0,
            memo: HashMap::with_capacity(items.len()),
            resolved: BTreeMap::new(),
            last_request: None,
        }
    }

    /// Returns the item at `position`.
    ///
    /// When no item in the list occupies `position`, a placeholder carrying
    /// `item_type` and `position` is returned instead. Placeholders are never
    /// recorded in the id map.
    pub fn resolve(&mut self, position: Position, item_type: ItemType) -> Item {
        debug_assert!(
            self.last_request.is_none_or(|last| last <= position),
            "positions must be resolved in row-major order: {} requested after {}",
            position,
            self.last_request.unwrap_or(position),
        );
        self.last_request = Some(position);

        let memoized = self.memo.get(&position).copied();
        let found = match memoized {
            Some(item) => Some(item),
            None => self.advance_to(position),
        };

        match found {
            Some(item) => {
                if let Some(id) = item.id {
                    self.resolved.entry(id).or_insert_with(|| item.clone());
                }
                item.clone()
            }
            None => {
                trace!(%position, ?item_type, "No item recorded, using placeholder");
                Item::placeholder(item_type, position)
            }
        }
    }

    /// Moves the cursor forward until an item at `position` is found or the
    /// list runs out. Every item passed is memoized under its own position.
    fn advance_to(&mut self, position: Position) -> Option<&'s Item> {
        while let Some(item) = self.items.get(self.cursor) {
            self.cursor += 1;
            self.memo.entry(item.position()).or_insert(item);
            if item.position() == position {
                return Some(item);
            }
        }
        None
    }

    /// Number of items the cursor has moved past.
    pub fn scanned(&self) -> usize {
        self.cursor
    }

    /// Consumes the resolver, returning every item that was matched to a
    /// requested position, keyed by id.
    pub fn into_items(self) -> BTreeMap<ItemId, Item> {
        self.resolved
    }
}
