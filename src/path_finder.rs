//! A*-based shortest path between two cell groups, with the "group cost"
//! twist: passing near an unrelated region costs its size once, and moving
//! within an already-paid-for region is free afterwards.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashMap};

use thiserror::Error;

use crate::board::Board;
use crate::grid::CellId;
use crate::region::CellGroup;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("no path found from start group to end group")]
    NoPathFound,
    #[error("invalid path-finder setup: {0}")]
    PathSetup(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    pub cells: Vec<CellId>,
    pub cost: usize,
    pub credited_groups: BTreeSet<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct SearchState {
    cell: CellId,
    credited: BTreeSet<usize>,
}

pub struct PathFinder<'a> {
    board: &'a Board,
    start: CellGroup,
    end: CellGroup,
    off_limits: BTreeSet<CellId>,
    other_groups: Vec<CellGroup>,
    max_path_length: Option<usize>,
}

impl<'a> PathFinder<'a> {
    pub fn new(
        board: &'a Board,
        start: CellGroup,
        end: CellGroup,
        off_limits: BTreeSet<CellId>,
        other_groups: Vec<CellGroup>,
    ) -> Self {
        Self {
            board,
            start,
            end,
            off_limits,
            other_groups,
            max_path_length: None,
        }
    }

    pub fn with_max_path_length(mut self, max: usize) -> Self {
        self.max_path_length = Some(max);
        self
    }

    fn validate_setup(&self) -> Result<(), PathError> {
        if self.start.cells().iter().any(|c| self.off_limits.contains(c)) {
            return Err(PathError::PathSetup("start group overlaps off-limit cells".into()));
        }
        if self.end.cells().iter().any(|c| self.off_limits.contains(c)) {
            return Err(PathError::PathSetup("end group overlaps off-limit cells".into()));
        }
        for (i, a) in self.other_groups.iter().enumerate() {
            for b in &self.other_groups[i + 1..] {
                if a.intersects(b) {
                    return Err(PathError::PathSetup("other groups overlap each other".into()));
                }
            }
            if a.cells().iter().any(|c| self.off_limits.contains(c)) {
                return Err(PathError::PathSetup("other group overlaps off-limit cells".into()));
            }
            let touches_start = a.cells().iter().any(|c| self.start.contains(*c))
                || a.adjacent_cells(self.board).iter().any(|c| self.start.contains(*c));
            if touches_start {
                return Err(PathError::PathSetup("other group is adjacent to the start group".into()));
            }
        }
        Ok(())
    }

    fn heuristic(&self, cell: CellId) -> usize {
        self.end.manhattan_distance_to_cell(self.board, cell)
    }

    /// `group` cells and their orthogonal neighbors: reaching any of these
    /// cells is "becoming adjacent to" the group.
    fn touch_sets(&self) -> Vec<BTreeSet<CellId>> {
        self.other_groups
            .iter()
            .map(|g| {
                let mut s = g.cells().clone();
                s.extend(g.adjacent_cells(self.board));
                s
            })
            .collect()
    }

    pub fn find_path(&self) -> Result<PathResult, PathError> {
        self.validate_setup()?;
        let touch_sets = self.touch_sets();

        let mut g_score: HashMap<SearchState, usize> = HashMap::new();
        let mut parent: HashMap<SearchState, SearchState> = HashMap::new();
        let mut open: BinaryHeap<Reverse<(usize, usize, SearchState)>> = BinaryHeap::new();

        for &start_cell in self.start.cells() {
            let mut credited = BTreeSet::new();
            let mut cost = 1usize; // the start cell itself counts toward path length
            for (i, touch) in touch_sets.iter().enumerate() {
                if touch.contains(&start_cell) {
                    credited.insert(i);
                    cost += self.other_groups[i].len();
                }
            }
            let state = SearchState { cell: start_cell, credited };
            if cost < *g_score.get(&state).unwrap_or(&usize::MAX) {
                let h = self.heuristic(start_cell);
                g_score.insert(state.clone(), cost);
                open.push(Reverse((cost + h, cost, state)));
            }
        }

        while let Some(Reverse((_, cost, state))) = open.pop() {
            if cost > *g_score.get(&state).unwrap_or(&usize::MAX) {
                continue;
            }
            if self.end.contains(state.cell) {
                if let Some(max_cost) = self.max_path_length {
                    if cost > max_cost {
                        return Err(PathError::NoPathFound);
                    }
                }
                let path = self.reconstruct(&parent, &state);
                return Ok(PathResult {
                    cells: path,
                    cost,
                    credited_groups: state.credited.clone(),
                });
            }

            for &next in self.board.orthogonal_neighbors(state.cell) {
                if self.off_limits.contains(&next) {
                    continue;
                }

                let mut edge_cost = 1;
                for &gi in &state.credited {
                    if self.other_groups[gi].contains(state.cell) && self.other_groups[gi].contains(next) {
                        edge_cost = 0;
                        break;
                    }
                }

                let mut credited = state.credited.clone();
                let mut penalty = 0;
                for (i, touch) in touch_sets.iter().enumerate() {
                    if !credited.contains(&i) && touch.contains(&next) {
                        credited.insert(i);
                        penalty += self.other_groups[i].len();
                    }
                }

                let new_cost = cost + edge_cost + penalty;
                let new_state = SearchState { cell: next, credited };
                if new_cost < *g_score.get(&new_state).unwrap_or(&usize::MAX) {
                    g_score.insert(new_state.clone(), new_cost);
                    parent.insert(new_state.clone(), state.clone());
                    let h = self.heuristic(next);
                    open.push(Reverse((new_cost + h, new_cost, new_state)));
                }
            }
        }

        Err(PathError::NoPathFound)
    }

    fn reconstruct(&self, parent: &HashMap<SearchState, SearchState>, goal: &SearchState) -> Vec<CellId> {
        let mut cells = vec![goal.cell];
        let mut current = goal.clone();
        while let Some(prev) = parent.get(&current) {
            cells.push(prev.cell);
            current = prev.clone();
        }
        cells.reverse();
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::grid::Coord;

    #[test]
    fn scenario_e_group_cost_path() {
        let board = Board::new(3, 3, &[]).unwrap();
        let start = CellGroup::single(board.cell_id(Coord::new(2, 0)));
        let end = CellGroup::single(board.cell_id(Coord::new(0, 0)));
        let other = CellGroup::new([
            board.cell_id(Coord::new(1, 1)),
            board.cell_id(Coord::new(1, 2)),
        ]);

        let finder = PathFinder::new(&board, start.clone(), end.clone(), BTreeSet::new(), vec![other.clone()]);
        let result = finder.find_path().unwrap();
        assert_eq!(result.cost, 5);
        assert_eq!(
            result.cells,
            vec![
                board.cell_id(Coord::new(2, 0)),
                board.cell_id(Coord::new(1, 0)),
                board.cell_id(Coord::new(0, 0)),
            ]
        );
        assert_eq!(result.credited_groups, BTreeSet::from([0]));

        let short = PathFinder::new(&board, start, end, BTreeSet::new(), vec![other]).with_max_path_length(4);
        assert_eq!(short.find_path().unwrap_err(), PathError::NoPathFound);
    }

    #[test]
    fn no_path_when_walled_off() {
        let mut board = Board::new(2, 2, &[]).unwrap();
        use crate::cell::CellState;
        board.set_cell_state(board.cell_id(Coord::new(0, 1)), CellState::Wall, "t");
        board.set_cell_state(board.cell_id(Coord::new(1, 0)), CellState::Wall, "t");

        let start = CellGroup::single(board.cell_id(Coord::new(0, 0)));
        let end = CellGroup::single(board.cell_id(Coord::new(1, 1)));
        let mut off_limits = BTreeSet::new();
        off_limits.insert(board.cell_id(Coord::new(0, 1)));
        off_limits.insert(board.cell_id(Coord::new(1, 0)));

        let finder = PathFinder::new(&board, start, end, off_limits, vec![]);
        assert_eq!(finder.find_path().unwrap_err(), PathError::NoPathFound);
    }

    #[test]
    fn rejects_overlapping_other_groups() {
        let board = Board::new(3, 3, &[]).unwrap();
        let start = CellGroup::single(board.cell_id(Coord::new(0, 0)));
        let end = CellGroup::single(board.cell_id(Coord::new(2, 2)));
        let a = CellGroup::single(board.cell_id(Coord::new(1, 1)));
        let b = CellGroup::single(board.cell_id(Coord::new(1, 1)));

        let finder = PathFinder::new(&board, start, end, BTreeSet::new(), vec![a, b]);
        assert_eq!(
            finder.find_path().unwrap_err(),
            PathError::PathSetup("other groups overlap each other".into())
        );
    }
}
