//! R-SG: an empty cell touching two or more distinct incomplete clue-bearing
//! gardens can join at most one of them, and joining either would give it
//! two clues, so it's a wall.

use std::collections::HashMap;

use crate::board::Board;
use crate::cell::CellState;
use crate::change::CellChanges;
use crate::checker::Contradiction;
use crate::grid::CellId;
use crate::solver::{SolverRule, Transition, EMPTY_TO_GARDEN};

pub struct SeparateGardensWithClues;

impl SolverRule for SeparateGardensWithClues {
    fn name(&self) -> &'static str {
        "SeparateGardensWithClues"
    }

    fn cost(&self) -> u32 {
        60
    }

    fn is_saturating(&self) -> bool {
        false
    }

    fn triggers(&self) -> &'static [Transition] {
        &[EMPTY_TO_GARDEN]
    }

    fn apply(&self, board: &mut Board) -> Result<CellChanges, Contradiction> {
        let mut touching: HashMap<CellId, usize> = HashMap::new();
        for garden in board.all_gardens() {
            if garden.clue_value(board).is_none() || !garden.is_incomplete(board) {
                continue;
            }
            for empty in garden.group().empty_adjacent_cells(board) {
                *touching.entry(empty).or_insert(0) += 1;
            }
        }

        let mut changes = CellChanges::new();
        for (id, count) in touching {
            if count >= 2 {
                if let Some(change) = board.set_cell_state(id, CellState::Wall, "touches more than one incomplete clue-bearing garden") {
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
    fn walls_off_a_cell_pinched_between_two_incomplete_gardens() {
        let level = Level::from_str("2,_,2").unwrap();
        let mut board = Board::from_level(&level).unwrap();
        let rule = SeparateGardensWithClues;
        let changes = rule.apply(&mut board).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(board.cell(board.cell_id(Coord::new(0, 1))).state, CellState::Wall);
    }
}
