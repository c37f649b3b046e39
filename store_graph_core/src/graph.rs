//! Conversion of a store floor plan into a weighted navigation graph.
//!
//! Every non-wall cell becomes a [`Vertex`] stored at its slot
//! `row * width + column` in [`StoreGraph::adj_list`]. Wall slots stay empty.
//! Edges point at slots rather than embedding the neighbor, so the graph is
//! an arena addressed by slot index.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::{
    Item, ItemId, Position,
    map::{CARDINAL_OFFSETS, Grid},
    resolver::ItemResolver,
    store::{Cell, CellMarker, Store},
};

/// Represents errors that can occur when addressing vertices of a graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("No vertex at position {0}: outside the store or a wall")]
    NoVertex(Position),
}

/// Weighted link to a neighboring vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VertexDistance {
    /// Slot index of the destination vertex.
    pub vertex: usize,
    /// Manhattan distance between the two vertices' items.
    pub distance: usize,
}

/// A graph node: the item at a grid position and its outgoing edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vertex {
    pub item: Item,
    pub neighbors: Vec<VertexDistance>,
}

/// Navigation graph built from a [`Store`].
///
/// Start and end markers are never set by the build; callers pick them with
/// [`StoreGraph::set_start`] and [`StoreGraph::set_end`].
#[derive(Debug, Serialize)]
#[serde(bound = "")]
pub struct StoreGraph<'s, C = Cell> {
    #[serde(skip)]
    graphed_store: Option<&'s Store<C>>,
    items: BTreeMap<ItemId, Item>,
    #[serde(rename = "adjList")]
    adj_list: Vec<Option<Vertex>>,
    start: Option<usize>,
    end: Option<usize>,
}

impl<C> Default for StoreGraph<'_, C> {
    fn default() -> Self {
        StoreGraph {
            graphed_store: None,
            items: BTreeMap::new(),
            adj_list: Vec::new(),
            start: None,
            end: None,
        }
    }
}

/// Collects vertices into their slots as the walk produces them.
struct Assembler {
    slots: Vec<Option<Vertex>>,
}

impl Assembler {
    fn new(len: usize) -> Self {
        Assembler {
            slots: vec![None; len],
        }
    }

    fn store(&mut self, index: usize, vertex: Vertex) {
        self.slots[index] = Some(vertex);
    }

    /// Position recorded by the item already stored at `index`, if the walk
    /// has reached that slot.
    fn item_position(&self, index: usize) -> Option<Position> {
        self.slots.get(index)?.as_ref().map(|v| v.item.position())
    }

    fn finish(self) -> Vec<Option<Vertex>> {
        self.slots
    }
}

/// Decides whether an edge exists between a vertex and one of its
/// neighboring cells.
struct NeighborLinker<'g, C> {
    path: &'g Grid<C>,
}

impl<C: CellMarker> NeighborLinker<'_, C> {
    /// Returns the edge from `from` (standing at `at`) to the cell at
    /// `offset` from it, or `None` if that cell is outside the grid or a
    /// wall.
    ///
    /// A neighbor the walk has not reached yet has no stored item; the
    /// resolver always yields an item recorded at the requested cell, so its
    /// position is taken as the cell itself.
    fn link(
        &self,
        assembler: &Assembler,
        from: &Item,
        at: Position,
        offset: (isize, isize),
    ) -> Option<VertexDistance> {
        let candidate = self.path.offset(at, offset)?;
        if self.path[candidate].item_type().is_wall() {
            return None;
        }
        let vertex = self.path.slot_index(candidate)?;
        let destination = assembler.item_position(vertex).unwrap_or(candidate);
        Some(VertexDistance {
            vertex,
            distance: from.position().manhattan_distance(&destination),
        })
    }
}

impl<C: CellMarker> Store<C> {
    /// Builds the navigation graph of this store in a single row-major pass.
    ///
    /// An empty floor plan yields an empty graph with no store attached.
    pub fn graph(&self) -> StoreGraph<'_, C> {
        let path = self.path();
        if path.is_empty() {
            return StoreGraph::default();
        }

        let mut assembler = Assembler::new(path.width() * path.height());
        let mut resolver = ItemResolver::new(self.items());
        let linker = NeighborLinker { path };

        for row in 0..path.height() {
            for column in 0..path.width() {
                let position = Position { row, column };
                let item_type = path[position].item_type();
                if item_type.is_wall() {
                    continue;
                }

                let item = resolver.resolve(position, item_type);
                let neighbors = CARDINAL_OFFSETS
                    .iter()
                    .filter_map(|&offset| linker.link(&assembler, &item, position, offset))
                    .collect();

                if let Some(index) = path.slot_index(position) {
                    assembler.store(index, Vertex { item, neighbors });
                }
            }
        }

        let scanned = resolver.scanned();
        let items = resolver.into_items();
        let adj_list = assembler.finish();
        debug!(
            height = path.height(),
            width = path.width(),
            vertices = adj_list.iter().flatten().count(),
            items = items.len(),
            scanned,
            "Built store graph"
        );

        StoreGraph {
            graphed_store: Some(self),
            items,
            adj_list,
            start: None,
            end: None,
        }
    }
}

impl<'s, C> StoreGraph<'s, C> {
    /// Returns the store this graph was built from, `None` for an empty graph.
    pub fn graphed_store(&self) -> Option<&'s Store<C>> {
        self.graphed_store
    }

    /// Returns the items matched to vertices, keyed by id.
    pub fn items(&self) -> &BTreeMap<ItemId, Item> {
        &self.items
    }

    /// Returns every slot of the graph; wall slots are `None`.
    pub fn adj_list(&self) -> &[Option<Vertex>] {
        &self.adj_list
    }

    pub fn is_empty(&self) -> bool {
        self.adj_list.is_empty()
    }

    /// Number of vertices, i.e. non-wall cells.
    pub fn vertex_count(&self) -> usize {
        self.adj_list.iter().flatten().count()
    }

    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.adj_list.get(index)?.as_ref()
    }

    /// Returns the destination vertices of the edges leaving `index`, with
    /// their distances.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = (&Vertex, usize)> {
        self.vertex(index)
            .into_iter()
            .flat_map(|vertex| vertex.neighbors.iter())
            .filter_map(|edge| Some((self.vertex(edge.vertex)?, edge.distance)))
    }

    pub fn start(&self) -> Option<usize> {
        self.start
    }

    pub fn end(&self) -> Option<usize> {
        self.end
    }

    pub fn start_vertex(&self) -> Option<&Vertex> {
        self.vertex(self.start?)
    }

    pub fn end_vertex(&self) -> Option<&Vertex> {
        self.vertex(self.end?)
    }
}

impl<C: CellMarker> StoreGraph<'_, C> {
    /// Converts a position to its slot index in [`StoreGraph::adj_list`].
    pub fn slot_index(&self, position: Position) -> Option<usize> {
        self.graphed_store?.path().slot_index(position)
    }

    pub fn vertex_at(&self, position: Position) -> Option<&Vertex> {
        self.vertex(self.slot_index(position)?)
    }

    /// Marks the vertex at `position` as the start of navigation.
    pub fn set_start(&mut self, position: Position) -> Result<(), GraphError> {
        self.start = Some(self.vertex_index(position)?);
        Ok(())
    }

    /// Marks the vertex at `position` as the end of navigation.
    pub fn set_end(&mut self, position: Position) -> Result<(), GraphError> {
        self.end = Some(self.vertex_index(position)?);
        Ok(())
    }

    fn vertex_index(&self, position: Position) -> Result<usize, GraphError> {
        self.slot_index(position)
            .filter(|&index| self.vertex(index).is_some())
            .ok_or(GraphError::NoVertex(position))
    }
}
