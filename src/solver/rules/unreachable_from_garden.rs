//! R-UG: the expensive, exact sibling of R-NG. Runs the real path finder
//! from every incomplete clue-bearing garden to every empty cell, honoring
//! walls, other clue-bearing gardens (and their borders) as off-limits, and
//! clueless gardens as `other_groups`. Any empty cell no source can reach
//! within its remaining budget is walled off.

use std::collections::BTreeSet;

use crate::board::Board;
use crate::cell::CellState;
use crate::change::CellChanges;
use crate::checker::Contradiction;
use crate::grid::CellId;
use crate::path_finder::PathFinder;
use crate::region::CellGroup;
use crate::solver::{SolverRule, Transition, EMPTY_TO_GARDEN, EMPTY_TO_WALL};

pub struct UnreachableFromGarden;

impl SolverRule for UnreachableFromGarden {
    fn name(&self) -> &'static str {
        "UnreachableFromGarden"
    }

    fn cost(&self) -> u32 {
        400
    }

    fn is_saturating(&self) -> bool {
        false
    }

    fn triggers(&self) -> &'static [Transition] {
        &[EMPTY_TO_WALL, EMPTY_TO_GARDEN]
    }

    fn apply(&self, board: &mut Board) -> Result<CellChanges, Contradiction> {
        let incomplete_clue_gardens: Vec<(CellGroup, usize)> = board
            .all_gardens()
            .into_iter()
            .filter(|g| g.clue_value(board).is_some() && g.is_incomplete(board))
            .map(|g| {
                let remaining = g.remaining_to_grow(board).unwrap_or(0).max(0) as usize;
                (g.group().clone(), remaining)
            })
            .collect();
        if incomplete_clue_gardens.is_empty() {
            return Ok(CellChanges::new());
        }

        let clueless_gardens: Vec<CellGroup> = board
            .all_gardens()
            .into_iter()
            .filter(|g| g.clue_value(board).is_none())
            .map(|g| g.group().clone())
            .collect();

        let all_empties: Vec<CellId> = board.empty_cells().cells().iter().copied().collect();
        let mut reachable_union: BTreeSet<CellId> = BTreeSet::new();

        for (source, remaining) in &incomplete_clue_gardens {
            let mut off_limits: BTreeSet<CellId> = board.wall_cells().cells().clone();
            for other in board.all_gardens() {
                if other.clue_value(board).is_some() && other.group() != source {
                    off_limits.extend(other.group().cells().iter().copied());
                    off_limits.extend(other.group().adjacent_cells(board));
                }
            }
            for id in source.cells() {
                off_limits.remove(id);
            }
            let off_limits_group = CellGroup::new(off_limits.iter().copied());

            let other_groups: Vec<CellGroup> = clueless_gardens
                .iter()
                .filter(|g| !g.intersects(&off_limits_group))
                .filter(|g| !g.adjacent_cells(board).iter().any(|c| source.contains(*c)))
                .cloned()
                .collect();

            for &empty in &all_empties {
                if reachable_union.contains(&empty) || off_limits.contains(&empty) {
                    continue;
                }
                let end = CellGroup::single(empty);
                let finder = PathFinder::new(board, source.clone(), end, off_limits.clone(), other_groups.clone())
                    .with_max_path_length(*remaining + 1);
                if finder.find_path().is_ok() {
                    reachable_union.insert(empty);
                }
            }
        }

        let mut changes = CellChanges::new();
        for &id in &all_empties {
            if !reachable_union.contains(&id) {
                if let Some(change) = board.set_cell_state(id, CellState::Wall, "unreachable from every incomplete clue-bearing garden") {
                    changes.push(change);
                }
            }
        }
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coord;
    use crate::level::Level;

    #[test]
    fn walls_off_a_cell_outside_every_sources_exact_reach() {
        // Clue of 2 with one cell already placed has a remaining budget of
        // 1: it can just reach the adjacent cell but not the one beyond it.
        let level = Level::from_str("2,_,_").unwrap();
        let mut board = Board::from_level(&level).unwrap();
        let rule = UnreachableFromGarden;
        let changes = rule.apply(&mut board).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(board.cell(board.cell_id(Coord::new(0, 1))).state, CellState::Empty);
        assert_eq!(board.cell(board.cell_id(Coord::new(0, 2))).state, CellState::Wall);
    }
}
