//! Region abstractions over sets of cells: the generic `CellGroup` and the
//! three specialized views the solver rules actually reason about.
//!
//! A group's identity is its underlying cell set, not the order cells were
//! discovered in, so equality and hashing go through a `BTreeSet<CellId>`.

use std::collections::BTreeSet;

use crate::board::Board;
use crate::cell::CellState;
use crate::grid::{CellId, Coord};

/// An unordered set of cells plus the handful of derived queries every solver
/// rule needs: adjacency, clue bookkeeping, distance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellGroup {
    cells: BTreeSet<CellId>,
}

impl CellGroup {
    pub fn new(cells: impl IntoIterator<Item = CellId>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    pub fn single(cell: CellId) -> Self {
        Self::new([cell])
    }

    pub fn cells(&self) -> &BTreeSet<CellId> {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.cells.contains(&cell)
    }

    pub fn intersects(&self, other: &CellGroup) -> bool {
        self.cells.intersection(&other.cells).next().is_some()
    }

    pub fn coords(&self, board: &Board) -> Vec<Coord> {
        self.cells.iter().map(|&id| board.coord_of(id)).collect()
    }

    /// The distinct clue values found among this group's cells.
    pub fn clue_values(&self, board: &Board) -> Vec<u32> {
        self.cells.iter().filter_map(|&id| board.cell(id).clue).collect()
    }

    pub fn clue_count(&self, board: &Board) -> usize {
        self.clue_values(board).len()
    }

    /// `Some(value)` iff this group contains exactly one clue cell.
    pub fn single_clue_value(&self, board: &Board) -> Option<u32> {
        let values = self.clue_values(board);
        if values.len() == 1 {
            Some(values[0])
        } else {
            None
        }
    }

    /// Cells orthogonally adjacent to this group, excluding the group's own
    /// members.
    pub fn adjacent_cells(&self, board: &Board) -> BTreeSet<CellId> {
        let mut result = BTreeSet::new();
        for &id in &self.cells {
            for n in board.orthogonal_neighbors(id) {
                if !self.cells.contains(&n) {
                    result.insert(n);
                }
            }
        }
        result
    }

    pub fn empty_adjacent_cells(&self, board: &Board) -> BTreeSet<CellId> {
        self.adjacent_cells(board)
            .into_iter()
            .filter(|&id| board.cell(id).state == CellState::Empty)
            .collect()
    }

    /// Shortest Manhattan distance from any member of this group to `target`.
    pub fn manhattan_distance_to_cell(&self, board: &Board, target: CellId) -> usize {
        let target_coord = board.coord_of(target);
        self.cells
            .iter()
            .map(|&id| board.coord_of(id).manhattan_distance(&target_coord))
            .min()
            .unwrap_or(usize::MAX)
    }

    /// Shortest Manhattan distance between any pair of members across the
    /// two groups.
    pub fn manhattan_distance_to_group(&self, board: &Board, other: &CellGroup) -> usize {
        other
            .cells
            .iter()
            .map(|&id| self.manhattan_distance_to_cell(board, id))
            .min()
            .unwrap_or(usize::MAX)
    }
}

/// A `CellGroup` whose cells are all Empty, Garden or Clue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeakGarden(CellGroup);

impl WeakGarden {
    /// Wraps `group` as a weak garden. Callers are expected to have built
    /// `group` from a weak-garden-predicate flood fill; this does not
    /// re-check cell states.
    pub fn new(group: CellGroup) -> Self {
        Self(group)
    }

    pub fn group(&self) -> &CellGroup {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn exactly_one_clue(&self, board: &Board) -> bool {
        self.0.clue_count(board) == 1
    }

    pub fn expected_size(&self, board: &Board) -> Option<usize> {
        self.0.single_clue_value(board).map(|v| v as usize)
    }

    pub fn has_correct_size(&self, board: &Board) -> bool {
        self.expected_size(board) == Some(self.len())
    }

    pub fn is_too_small(&self, board: &Board) -> bool {
        self.expected_size(board).map(|e| self.len() < e).unwrap_or(false)
    }

    pub fn is_too_large(&self, board: &Board) -> bool {
        self.expected_size(board).map(|e| self.len() > e).unwrap_or(false)
    }
}

/// A `CellGroup` whose cells are strictly Garden/Clue (no Empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Garden(CellGroup);

impl Garden {
    pub fn new(group: CellGroup) -> Self {
        Self(group)
    }

    pub fn group(&self) -> &CellGroup {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn exactly_one_clue(&self, board: &Board) -> bool {
        self.0.clue_count(board) == 1
    }

    pub fn clue_value(&self, board: &Board) -> Option<u32> {
        self.0.single_clue_value(board)
    }

    /// `expected - current`, or `None` if this garden doesn't have exactly
    /// one clue (the board-state checker should have already ruled that
    /// out before a rule gets this far).
    pub fn remaining_to_grow(&self, board: &Board) -> Option<isize> {
        let expected = self.clue_value(board)? as isize;
        Some(expected - self.len() as isize)
    }

    pub fn is_complete(&self, board: &Board) -> bool {
        self.remaining_to_grow(board) == Some(0)
    }

    pub fn is_incomplete(&self, board: &Board) -> bool {
        match self.clue_value(board) {
            None => true, // clueless gardens are always still growing
            Some(_) => self.remaining_to_grow(board).map(|r| r > 0).unwrap_or(false),
        }
    }

    /// True iff every orthogonal neighbor of this garden is a Wall cell.
    pub fn is_fully_enclosed(&self, board: &Board) -> bool {
        self.0
            .adjacent_cells(board)
            .iter()
            .all(|&id| board.cell(id).state == CellState::Wall)
    }
}

/// A `CellGroup` whose cells are all Wall.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WallSection(CellGroup);

impl WallSection {
    pub fn new(group: CellGroup) -> Self {
        Self(group)
    }

    pub fn group(&self) -> &CellGroup {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    fn board_from(rows: &[&str]) -> Board {
        let level = Level::from_str(&rows.join("\n")).unwrap();
        Board::from_level(&level).unwrap()
    }

    #[test]
    fn weak_garden_size_predicates() {
        let board = board_from(&["1,_,_", "_,_,_", "_,_,_"]);
        let clue_id = board.cell_id(Coord::new(0, 0));
        let group = CellGroup::new([clue_id, board.cell_id(Coord::new(0, 1))]);
        let wg = WeakGarden::new(group);
        assert!(wg.exactly_one_clue(&board));
        assert_eq!(wg.expected_size(&board), Some(1));
        assert!(wg.is_too_large(&board));
    }

    #[test]
    fn garden_remaining_to_grow() {
        let board = board_from(&["3,_,_", "_,_,_", "_,_,_"]);
        let clue_id = board.cell_id(Coord::new(0, 0));
        let garden = Garden::new(CellGroup::single(clue_id));
        assert_eq!(garden.remaining_to_grow(&board), Some(2));
        assert!(garden.is_incomplete(&board));
    }
}
