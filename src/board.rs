//! The board: a flat arena of cells, their precomputed orthogonal
//! neighborhoods, and the region-extraction queries everything else in the
//! crate is built on.

use std::cell::Cell as StdCell;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use thiserror::Error;

use crate::cache::{CellPredicate, Caches};
use crate::cell::{Cell, CellState};
use crate::change::{CellChange, CellChanges};
use crate::grid::{step, CellId, Coord, Direction};
use crate::region::{CellGroup, Garden, WallSection, WeakGarden};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("clue at {a} is orthogonally adjacent to clue at {b}")]
    AdjacentClues { a: Coord, b: Coord },
}

#[derive(Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    orthogonal_neighbors: Vec<Vec<CellId>>,
    two_by_two_positions: Vec<CellId>,
    clue_cells: BTreeSet<CellId>,
    state_generation: StdCell<u64>,
    caches: Caches,
}

impl Board {
    /// Builds a board of `rows x cols` empty cells with clues placed at the
    /// given coordinates. Fails if any two clues are orthogonally adjacent.
    pub fn new(rows: usize, cols: usize, clues: &[(Coord, u32)]) -> Result<Board, BoardError> {
        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                cells.push(Cell::empty(Coord::new(r, c)));
            }
        }

        let mut clue_cells = BTreeSet::new();
        for &(coord, value) in clues {
            let id = CellId(coord.row * cols + coord.col);
            cells[id.0] = Cell::clue(coord, value);
            clue_cells.insert(id);
        }

        let mut orthogonal_neighbors = Vec::with_capacity(rows * cols);
        for idx in 0..rows * cols {
            let coord = Coord::new(idx / cols, idx % cols);
            let neighbors = Direction::ORTHOGONAL
                .iter()
                .filter_map(|&dir| step(coord, dir, rows, cols))
                .map(|n| CellId(n.row * cols + n.col))
                .collect();
            orthogonal_neighbors.push(neighbors);
        }

        let mut two_by_two_positions = Vec::new();
        if rows > 0 && cols > 0 {
            for r in 0..rows.saturating_sub(1) {
                for c in 0..cols.saturating_sub(1) {
                    two_by_two_positions.push(CellId(r * cols + c));
                }
            }
        }

        let board = Board {
            rows,
            cols,
            cells,
            orthogonal_neighbors,
            two_by_two_positions,
            clue_cells,
            state_generation: StdCell::new(0),
            caches: Caches::default(),
        };
        board.ensure_no_adjacent_clues()?;
        Ok(board)
    }

    fn ensure_no_adjacent_clues(&self) -> Result<(), BoardError> {
        for &id in &self.clue_cells {
            for &n in &self.orthogonal_neighbors[id.0] {
                if self.clue_cells.contains(&n) {
                    return Err(BoardError::AdjacentClues {
                        a: self.coord_of(id),
                        b: self.coord_of(n),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    pub fn cell_id(&self, coord: Coord) -> CellId {
        CellId(coord.row * self.cols + coord.col)
    }

    pub fn coord_of(&self, id: CellId) -> Coord {
        self.cells[id.0].coord
    }

    pub fn clue_cells(&self) -> &BTreeSet<CellId> {
        &self.clue_cells
    }

    pub fn orthogonal_neighbors(&self, id: CellId) -> &[CellId] {
        &self.orthogonal_neighbors[id.0]
    }

    /// All eight compass neighbors present on the board, computed on demand
    /// (diagonals are only needed for the 2x2-block check and neighbor-count
    /// invariants, not on the solver's hot path).
    pub fn all_neighbors(&self, id: CellId) -> Vec<CellId> {
        let coord = self.coord_of(id);
        Direction::ALL
            .iter()
            .filter_map(|&dir| step(coord, dir, self.rows, self.cols))
            .map(|n| self.cell_id(n))
            .collect()
    }

    /// A cheap summary of the current per-cell states: two boards with the
    /// same states hash equal regardless of how they got there, and a board
    /// restored via `apply_changes(&changes.reversed())` hashes back to its
    /// original value.
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for cell in &self.cells {
            cell.state.hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Applies a single committed state transition, recording and returning
    /// the resulting change. Returns `None` for a no-op (clue cell, or
    /// `new_state` equal to the current state) — no-op changes are never
    /// journaled.
    pub fn set_cell_state(
        &mut self,
        id: CellId,
        new_state: CellState,
        reason: impl Into<String>,
    ) -> Option<CellChange> {
        let cell = &mut self.cells[id.0];
        if cell.is_clue() || cell.state == new_state {
            return None;
        }
        let change = CellChange::new(cell.coord, cell.state, new_state, reason);
        cell.state = new_state;
        self.state_generation.set(self.state_generation.get() + 1);
        self.caches.clear();
        Some(change)
    }

    /// Applies a change's `after` state directly, without re-deriving a
    /// reason or rejecting no-ops — used to replay a `CellChanges` journal
    /// (including a reversed one, for undo).
    pub fn apply_change(&mut self, change: &CellChange) {
        let id = self.cell_id(change.coord);
        self.cells[id.0].state = change.after;
        self.state_generation.set(self.state_generation.get() + 1);
        self.caches.clear();
    }

    pub fn apply_changes(&mut self, changes: &CellChanges) {
        for change in changes.iter() {
            self.apply_change(change);
        }
    }

    /// Orthogonally-connected component containing `start`, restricted to
    /// cells matching `predicate`. Empty if `start` itself doesn't match.
    /// Uses an explicit work-stack rather than recursion.
    pub fn connected_component(&self, predicate: CellPredicate, start: CellId) -> CellGroup {
        if let Some(hit) = self.caches.get_connected(&predicate, start) {
            return hit;
        }

        let mut visited = BTreeSet::new();
        if predicate.matches(self, start) {
            let mut stack = vec![start];
            visited.insert(start);
            while let Some(current) = stack.pop() {
                for &n in self.orthogonal_neighbors(current) {
                    if !visited.contains(&n) && predicate.matches(self, n) {
                        visited.insert(n);
                        stack.push(n);
                    }
                }
            }
        }

        let group = CellGroup::new(visited);
        self.caches.put_connected(&predicate, &group);
        group
    }

    /// Partitions every cell matching `predicate` into its connected
    /// components, in stable row-major seed order.
    pub fn all_cell_groups(&self, predicate: CellPredicate) -> Vec<CellGroup> {
        if let Some(hit) = self.caches.get_region_groups(&predicate) {
            return hit;
        }

        let mut covered: BTreeSet<CellId> = BTreeSet::new();
        let mut groups = Vec::new();
        for idx in 0..self.cells.len() {
            let id = CellId(idx);
            if covered.contains(&id) || !predicate.matches(self, id) {
                continue;
            }
            let group = self.connected_component(predicate.clone(), id);
            covered.extend(group.cells().iter().copied());
            groups.push(group);
        }

        self.caches.put_region_groups(predicate, groups.clone());
        groups
    }

    pub fn filtered_cells(&self, predicate: CellPredicate) -> CellGroup {
        if let Some(hit) = self.caches.get_filtered(&predicate) {
            return hit;
        }
        let group = CellGroup::new(
            (0..self.cells.len())
                .map(CellId)
                .filter(|&id| predicate.matches(self, id)),
        );
        self.caches.put_filtered(predicate, group.clone());
        group
    }

    pub fn empty_cells(&self) -> CellGroup {
        self.filtered_cells(CellPredicate::Empty)
    }

    pub fn wall_cells(&self) -> CellGroup {
        self.filtered_cells(CellPredicate::Wall)
    }

    pub fn garden_cells(&self) -> CellGroup {
        self.filtered_cells(CellPredicate::GardenLike)
    }

    pub fn weak_garden_cells(&self) -> CellGroup {
        self.filtered_cells(CellPredicate::WeakGardenLike)
    }

    pub fn get_garden(&self, start: CellId) -> Garden {
        Garden::new(self.connected_component(CellPredicate::GardenLike, start))
    }

    pub fn get_weak_garden(&self, start: CellId) -> WeakGarden {
        WeakGarden::new(self.connected_component(CellPredicate::WeakGardenLike, start))
    }

    pub fn get_wall_section(&self, start: CellId) -> WallSection {
        WallSection::new(self.connected_component(CellPredicate::Wall, start))
    }

    pub fn all_gardens(&self) -> Vec<Garden> {
        self.all_cell_groups(CellPredicate::GardenLike)
            .into_iter()
            .map(Garden::new)
            .collect()
    }

    pub fn all_weak_gardens(&self) -> Vec<WeakGarden> {
        self.all_cell_groups(CellPredicate::WeakGardenLike)
            .into_iter()
            .map(WeakGarden::new)
            .collect()
    }

    pub fn all_wall_sections(&self) -> Vec<WallSection> {
        self.all_cell_groups(CellPredicate::Wall)
            .into_iter()
            .map(WallSection::new)
            .collect()
    }

    /// Components of (all cells \ garden cells \ `probe`), kept only if they
    /// contain at least one wall cell. Used for isolated-wall detection,
    /// including the "what if this empty cell became a wall" probe.
    pub fn non_garden_groups_with_walls(&self, probe: Option<CellId>) -> Vec<CellGroup> {
        self.all_cell_groups(CellPredicate::NonGardenExcluding(probe))
            .into_iter()
            .filter(|g| g.cells().iter().any(|&id| self.cell(id).state == CellState::Wall))
            .collect()
    }

    pub fn two_by_two_positions(&self) -> &[CellId] {
        &self.two_by_two_positions
    }

    /// The four cells of the 2x2 block whose top-left corner is `top_left`.
    pub fn two_by_two_cells(&self, top_left: CellId) -> [CellId; 4] {
        let c = self.coord_of(top_left);
        [
            top_left,
            self.cell_id(Coord::new(c.row, c.col + 1)),
            self.cell_id(Coord::new(c.row + 1, c.col)),
            self.cell_id(Coord::new(c.row + 1, c.col + 1)),
        ]
    }

    pub fn two_by_two_wall_count(&self, top_left: CellId) -> usize {
        self.two_by_two_cells(top_left)
            .iter()
            .filter(|&&id| self.cell(id).state == CellState::Wall)
            .count()
    }

    /// A row-major text rendering: clue digits, `#` walls, `.` gardens,
    /// blank empties. `include_grid_numbers` prefixes each clue with its
    /// `(row,col)` coordinate.
    pub fn render(&self, include_grid_numbers: bool) -> String {
        let mut out = String::new();
        for r in 0..self.rows {
            for c in 0..self.cols {
                let cell = self.cell(self.cell_id(Coord::new(r, c)));
                match cell.clue {
                    Some(v) if include_grid_numbers => {
                        out.push_str(&format!("[{},{}:{}]", r, c, v))
                    }
                    Some(v) => out.push_str(&format!("[{}]", v)),
                    None => out.push_str(&format!("[{}]", cell.state)),
                }
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_board() -> Board {
        Board::new(3, 3, &[(Coord::new(0, 0), 3)]).unwrap()
    }

    #[test]
    fn rejects_adjacent_clues() {
        let err = Board::new(2, 2, &[(Coord::new(0, 0), 1), (Coord::new(0, 1), 2)]).unwrap_err();
        assert_eq!(
            err,
            BoardError::AdjacentClues {
                a: Coord::new(0, 0),
                b: Coord::new(0, 1)
            }
        );
    }

    #[test]
    fn diagonal_clues_are_allowed() {
        assert!(Board::new(2, 2, &[(Coord::new(0, 0), 1), (Coord::new(1, 1), 2)]).is_ok());
    }

    #[test]
    fn corner_has_two_orthogonal_neighbors() {
        let board = small_board();
        let corner = board.cell_id(Coord::new(0, 0));
        assert_eq!(board.orthogonal_neighbors(corner).len(), 2);
        assert_eq!(board.all_neighbors(corner).len(), 3);
    }

    #[test]
    fn state_hash_changes_iff_a_cell_changes() {
        let mut board = small_board();
        let before = board.state_hash();
        let id = board.cell_id(Coord::new(1, 1));
        // no-op: already Empty -> Empty is rejected, hash must not move
        assert!(board.set_cell_state(id, CellState::Empty, "noop").is_none());
        assert_eq!(board.state_hash(), before);

        assert!(board.set_cell_state(id, CellState::Wall, "test").is_some());
        assert_ne!(board.state_hash(), before);
    }

    #[test]
    fn clue_cells_cannot_change_state() {
        let mut board = small_board();
        let clue_id = board.cell_id(Coord::new(0, 0));
        assert!(board.set_cell_state(clue_id, CellState::Wall, "illegal").is_none());
    }

    #[test]
    fn connected_component_partitions_wall_cells() {
        let mut board = Board::new(3, 3, &[]).unwrap();
        board.set_cell_state(board.cell_id(Coord::new(0, 0)), CellState::Wall, "t");
        board.set_cell_state(board.cell_id(Coord::new(0, 1)), CellState::Wall, "t");
        board.set_cell_state(board.cell_id(Coord::new(2, 2)), CellState::Wall, "t");

        let sections = board.all_wall_sections();
        assert_eq!(sections.len(), 2);
        let sizes: BTreeSet<usize> = sections.iter().map(|s| s.len()).collect();
        assert_eq!(sizes, BTreeSet::from([1, 2]));
    }

    #[test]
    fn round_trip_changes_restore_state_hash() {
        let mut board = Board::new(3, 3, &[]).unwrap();
        let original_hash = board.state_hash();
        let id = board.cell_id(Coord::new(1, 1));
        let mut changes = CellChanges::new();
        changes.push(board.set_cell_state(id, CellState::Wall, "t").unwrap());
        assert_ne!(board.state_hash(), original_hash);

        board.apply_changes(&changes.reversed());
        assert_eq!(board.state_hash(), original_hash);
        assert_eq!(board.cell(id).state, CellState::Empty);
    }
}
