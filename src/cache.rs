//! Memoization tables for the three region queries the solver hammers on:
//! connected components, full partitions, and plain state-filtered views.
//!
//! Keys are tagged by `CellPredicate`, a plain enum, rather than by hashing
//! a closure's address — every predicate the solver needs is expressible as
//! a variant with `matches` doing the real work.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::board::Board;
use crate::cell::CellState;
use crate::grid::CellId;
use crate::region::CellGroup;

/// A state-based test over a single cell, used both to seed flood fills and
/// to key the memoization tables below.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellPredicate {
    Empty,
    Wall,
    GardenLike,
    WeakGardenLike,
    /// All cells that are not garden-like, optionally excluding one extra
    /// "probe" cell — used by isolated-wall-section detection to ask "what
    /// if this empty cell became a wall?" without committing the change.
    NonGardenExcluding(Option<CellId>),
}

impl CellPredicate {
    pub fn matches(&self, board: &Board, id: CellId) -> bool {
        let state = board.cell(id).state;
        match self {
            CellPredicate::Empty => state == CellState::Empty,
            CellPredicate::Wall => state == CellState::Wall,
            CellPredicate::GardenLike => state.is_garden_like(),
            CellPredicate::WeakGardenLike => state.is_weak_garden_like(),
            CellPredicate::NonGardenExcluding(probe) => {
                !state.is_garden_like() && Some(id) != *probe
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Caches {
    region_groups: RefCell<HashMap<CellPredicate, Vec<CellGroup>>>,
    connected_cells: RefCell<HashMap<(CellPredicate, CellId), CellGroup>>,
    filtered_cells: RefCell<HashMap<CellPredicate, CellGroup>>,
}

impl Caches {
    pub fn clear(&self) {
        self.region_groups.borrow_mut().clear();
        self.connected_cells.borrow_mut().clear();
        self.filtered_cells.borrow_mut().clear();
    }

    pub fn get_region_groups(&self, predicate: &CellPredicate) -> Option<Vec<CellGroup>> {
        self.region_groups.borrow().get(predicate).cloned()
    }

    pub fn put_region_groups(&self, predicate: CellPredicate, groups: Vec<CellGroup>) {
        self.region_groups.borrow_mut().insert(predicate, groups);
    }

    pub fn get_connected(&self, predicate: &CellPredicate, seed: CellId) -> Option<CellGroup> {
        self.connected_cells.borrow().get(&(predicate.clone(), seed)).cloned()
    }

    /// Caches `group` under every one of its own members so a later lookup
    /// from any cell in the component is a hit, not just the original seed.
    pub fn put_connected(&self, predicate: &CellPredicate, group: &CellGroup) {
        let mut cache = self.connected_cells.borrow_mut();
        for &id in group.cells() {
            cache.insert((predicate.clone(), id), group.clone());
        }
    }

    pub fn get_filtered(&self, predicate: &CellPredicate) -> Option<CellGroup> {
        self.filtered_cells.borrow().get(predicate).cloned()
    }

    pub fn put_filtered(&self, predicate: CellPredicate, group: CellGroup) {
        self.filtered_cells.borrow_mut().insert(predicate, group);
    }
}
