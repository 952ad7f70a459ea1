//! R-GC: for a garden with a clue, flood-fill the cells it could still grow
//! into (excluding walls and anything adjacent to a different clue-bearing
//! garden). If that area is already too small to satisfy the clue, the
//! board is unsolvable. Otherwise, any cell whose removal would shrink the
//! reachable area below the clue's value is load-bearing and must become
//! Garden.

use std::collections::BTreeSet;

use crate::board::Board;
use crate::cell::CellState;
use crate::change::CellChanges;
use crate::checker::Contradiction;
use crate::grid::CellId;
use crate::region::CellGroup;
use crate::solver::{SolverRule, Transition, EMPTY_TO_GARDEN, EMPTY_TO_WALL};

pub struct EnsureGardenWithClueCanExpand;

fn other_clue_bearing_adjacent(board: &Board, exclude: &CellGroup) -> BTreeSet<CellId> {
    let mut result = BTreeSet::new();
    for garden in board.all_gardens() {
        if garden.clue_value(board).is_none() || garden.group() == exclude {
            continue;
        }
        result.extend(garden.group().adjacent_cells(board));
    }
    result
}

fn reachable_set(board: &Board, source: &CellGroup, off_limits: &BTreeSet<CellId>) -> BTreeSet<CellId> {
    let mut visited: BTreeSet<CellId> = source.cells().clone();
    let mut stack: Vec<CellId> = visited.iter().copied().collect();
    while let Some(current) = stack.pop() {
        for &next in board.orthogonal_neighbors(current) {
            if visited.contains(&next) || off_limits.contains(&next) {
                continue;
            }
            if board.cell(next).state == CellState::Wall {
                continue;
            }
            visited.insert(next);
            stack.push(next);
        }
    }
    visited
}

impl SolverRule for EnsureGardenWithClueCanExpand {
    fn name(&self) -> &'static str {
        "EnsureGardenWithClueCanExpand"
    }

    fn cost(&self) -> u32 {
        55
    }

    fn is_saturating(&self) -> bool {
        false
    }

    fn triggers(&self) -> &'static [Transition] {
        &[EMPTY_TO_WALL, EMPTY_TO_GARDEN]
    }

    fn apply(&self, board: &mut Board) -> Result<CellChanges, Contradiction> {
        for garden in board.all_gardens() {
            let Some(value) = garden.clue_value(board) else {
                continue;
            };
            if !garden.is_incomplete(board) {
                continue;
            }
            let group = garden.group().clone();

            let mut off_limits: BTreeSet<CellId> = board.wall_cells().cells().clone();
            off_limits.extend(other_clue_bearing_adjacent(board, &group));
            for id in group.cells() {
                off_limits.remove(id);
            }

            let reachable = reachable_set(board, &group, &off_limits);
            if reachable.len() < value as usize {
                return Err(Contradiction::new(
                    "an incomplete clue-bearing garden cannot reach enough cells to satisfy its clue",
                    vec![group],
                ));
            }

            let remaining = garden.remaining_to_grow(board).unwrap_or(0).max(0) as usize;
            let mut candidates: Vec<CellId> = reachable
                .iter()
                .copied()
                .filter(|&id| board.cell(id).state == CellState::Empty)
                .filter(|&id| group.manhattan_distance_to_cell(board, id) <= remaining)
                .collect();
            candidates.sort_by_key(|&id| group.manhattan_distance_to_cell(board, id));

            for candidate in candidates {
                let mut probe_off_limits = off_limits.clone();
                probe_off_limits.insert(candidate);
                let probe_reachable = reachable_set(board, &group, &probe_off_limits);
                if probe_reachable.len() < value as usize {
                    let mut changes = CellChanges::new();
                    if let Some(change) = board.set_cell_state(candidate, CellState::Garden, "load-bearing cell for the garden's remaining reachable area") {
                        changes.push(change);
                        return Ok(changes);
                    }
                }
            }
        }
        Ok(CellChanges::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coord;
    use crate::level::Level;

    #[test]
    fn grows_a_cell_required_to_reach_the_clues_target_size() {
        // A 1x3 row with a clue of 3: the only way to reach all three cells
        // is straight through the middle one.
        let level = Level::from_str("3,_,_").unwrap();
        let mut board = Board::from_level(&level).unwrap();
        let rule = EnsureGardenWithClueCanExpand;
        let changes = rule.apply(&mut board).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(board.cell(board.cell_id(Coord::new(0, 1))).state, CellState::Garden);
    }
}
