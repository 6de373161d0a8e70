//! Uniform-grid spatial index for neighbour queries.
//!
//! The map is divided into square cells whose side equals the vision radius.
//! Everything within vision radius of a point therefore lies in the point's
//! own cell or one of its eight neighbours, so [`SpatialIndex::candidates`]
//! never misses a true neighbour. It may return items slightly farther away;
//! callers filter by exact distance.
//!
//! Buckets are ordered maps so that candidate order, and with it every random
//! choice downstream, is reproducible for a fixed seed.

use std::collections::{BTreeMap, BTreeSet};

use foragers_types::Position;

use crate::error::WorldError;

/// Grid coordinates of a cell.
type Cell = (i64, i64);

/// A grid of buckets keyed by cell, holding items of type `T`.
#[derive(Debug, Clone)]
pub struct SpatialIndex<T> {
    cell_size: f64,
    buckets: BTreeMap<Cell, BTreeSet<T>>,
    item_cells: BTreeMap<T, Cell>,
}

impl<T: Ord + Copy> SpatialIndex<T> {
    /// Create an empty index with the given cell side length.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidCellSize`] unless `cell_size` is finite
    /// and strictly positive.
    pub fn new(cell_size: f64) -> Result<Self, WorldError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(WorldError::InvalidCellSize(cell_size));
        }
        Ok(Self {
            cell_size,
            buckets: BTreeMap::new(),
            item_cells: BTreeMap::new(),
        })
    }

    /// Cell side length.
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.item_cells.len()
    }

    /// Whether the index holds no items.
    pub fn is_empty(&self) -> bool {
        self.item_cells.is_empty()
    }

    /// Drop every item. Called before rebuilding the agent index each step.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.item_cells.clear();
    }

    /// Place `item` at `pos`, moving it out of its previous cell if it was
    /// already indexed.
    pub fn insert(&mut self, item: T, pos: Position) {
        let cell = self.cell_of(pos);
        if let Some(old) = self.item_cells.insert(item, cell) {
            if old == cell {
                return;
            }
            self.remove_from_bucket(item, old);
        }
        self.buckets.entry(cell).or_default().insert(item);
    }

    /// Remove `item` from the index. Unknown items are ignored.
    pub fn remove(&mut self, item: T) {
        if let Some(cell) = self.item_cells.remove(&item) {
            self.remove_from_bucket(item, cell);
        }
    }

    /// Every item in the 3x3 block of cells around `pos`.
    ///
    /// Items come out grouped by cell in row-major order and in ascending
    /// order within a cell.
    pub fn candidates(&self, pos: Position) -> Vec<T> {
        let (cx, cy) = self.cell_of(pos);
        let mut found = Vec::new();
        for dx in -1_i64..=1 {
            for dy in -1_i64..=1 {
                let cell = (cx.saturating_add(dx), cy.saturating_add(dy));
                if let Some(bucket) = self.buckets.get(&cell) {
                    found.extend(bucket.iter().copied());
                }
            }
        }
        found
    }

    fn cell_of(&self, pos: Position) -> Cell {
        #[allow(clippy::cast_possible_truncation)]
        let cell = (
            (pos.x() / self.cell_size).floor() as i64,
            (pos.y() / self.cell_size).floor() as i64,
        );
        cell
    }

    fn remove_from_bucket(&mut self, item: T, cell: Cell) {
        if let Some(bucket) = self.buckets.get_mut(&cell) {
            bucket.remove(&item);
            if bucket.is_empty() {
                self.buckets.remove(&cell);
            }
        }
    }
}
