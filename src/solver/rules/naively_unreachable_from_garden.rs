//! R-NG: the garden-side sibling of R-UC. An empty cell further (in
//! Manhattan distance) from every incomplete clue-bearing garden than that
//! garden has cells left to grow can never be reached by any of them.

use crate::board::Board;
use crate::cell::CellState;
use crate::change::CellChanges;
use crate::checker::Contradiction;
use crate::grid::CellId;
use crate::solver::{SolverRule, Transition, EMPTY_TO_GARDEN};

pub struct NaivelyUnreachableFromGarden;

impl SolverRule for NaivelyUnreachableFromGarden {
    fn name(&self) -> &'static str {
        "NaivelyUnreachableFromGarden"
    }

    fn cost(&self) -> u32 {
        65
    }

    fn is_saturating(&self) -> bool {
        false
    }

    fn triggers(&self) -> &'static [Transition] {
        &[EMPTY_TO_GARDEN]
    }

    fn apply(&self, board: &mut Board) -> Result<CellChanges, Contradiction> {
        let budgets: Vec<(crate::region::CellGroup, usize)> = board
            .all_gardens()
            .into_iter()
            .filter(|g| g.clue_value(board).is_some() && g.is_incomplete(board))
            .map(|g| {
                let remaining = g.remaining_to_grow(board).unwrap_or(0).max(0) as usize;
                (g.group().clone(), remaining)
            })
            .collect();
        if budgets.is_empty() {
            return Ok(CellChanges::new());
        }

        let mut changes = CellChanges::new();
        let empties: Vec<CellId> = board.empty_cells().cells().iter().copied().collect();
        for id in empties {
            let unreachable_from_all = budgets
                .iter()
                .all(|(group, remaining)| group.manhattan_distance_to_cell(board, id) > *remaining);
            if unreachable_from_all {
                if let Some(change) = board.set_cell_state(id, CellState::Wall, "out of every incomplete garden's remaining reach") {
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
    fn walls_off_a_cell_beyond_the_only_gardens_reach() {
        let level = Level::from_str("1,_,_").unwrap();
        let mut board = Board::from_level(&level).unwrap();
        let rule = NaivelyUnreachableFromGarden;
        let changes = rule.apply(&mut board).unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(board.cell(board.cell_id(Coord::new(0, 1))).state, CellState::Wall);
        assert_eq!(board.cell(board.cell_id(Coord::new(0, 2))).state, CellState::Wall);
    }
}
