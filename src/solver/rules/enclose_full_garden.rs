//! R-EF: a garden that has already reached its clue's size is done growing;
//! every empty cell touching it can only ever be a wall.

use crate::board::Board;
use crate::cell::CellState;
use crate::change::CellChanges;
use crate::checker::Contradiction;
use crate::grid::CellId;
use crate::solver::{SolverRule, Transition, EMPTY_TO_GARDEN};

pub struct EncloseFullGarden;

impl SolverRule for EncloseFullGarden {
    fn name(&self) -> &'static str {
        "EncloseFullGarden"
    }

    fn cost(&self) -> u32 {
        53
    }

    fn is_saturating(&self) -> bool {
        true
    }

    fn triggers(&self) -> &'static [Transition] {
        &[EMPTY_TO_GARDEN]
    }

    fn apply(&self, board: &mut Board) -> Result<CellChanges, Contradiction> {
        let mut changes = CellChanges::new();
        for garden in board.all_gardens() {
            if !garden.exactly_one_clue(board) || !garden.is_complete(board) {
                continue;
            }
            let escapes: Vec<CellId> = garden.group().empty_adjacent_cells(board).into_iter().collect();
            for id in escapes {
                if let Some(change) = board.set_cell_state(id, CellState::Wall, "garden already reached its clue's size") {
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
    fn walls_off_a_completed_gardens_neighbors() {
        let level = Level::from_str("1,_,_").unwrap();
        let mut board = Board::from_level(&level).unwrap();
        let rule = EncloseFullGarden;
        let changes = rule.apply(&mut board).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(board.cell(board.cell_id(Coord::new(0, 1))).state, CellState::Wall);
    }
}
