//! R-TB: no 2x2 block may be all walls. A block with three walls and one
//! empty cell forces that cell to be Garden; a block already at four walls
//! is an outright contradiction (though the board-state checker usually
//! catches that first).

use crate::board::Board;
use crate::cell::CellState;
use crate::change::CellChanges;
use crate::checker::Contradiction;
use crate::grid::CellId;
use crate::region::CellGroup;
use crate::solver::{SolverRule, Transition, EMPTY_TO_WALL};

pub struct EnsureNoTwoByTwoWalls;

impl SolverRule for EnsureNoTwoByTwoWalls {
    fn name(&self) -> &'static str {
        "EnsureNoTwoByTwoWalls"
    }

    fn cost(&self) -> u32 {
        27
    }

    fn is_saturating(&self) -> bool {
        true
    }

    fn triggers(&self) -> &'static [Transition] {
        &[EMPTY_TO_WALL]
    }

    fn apply(&self, board: &mut Board) -> Result<CellChanges, Contradiction> {
        let mut changes = CellChanges::new();
        let positions: Vec<CellId> = board.two_by_two_positions().to_vec();
        for pos in positions {
            let wall_count = board.two_by_two_wall_count(pos);
            if wall_count == 4 {
                let group = CellGroup::new(board.two_by_two_cells(pos));
                return Err(Contradiction::new("a 2x2 block is entirely walls", vec![group]));
            }
            if wall_count == 3 {
                let cells = board.two_by_two_cells(pos);
                if let Some(&empty_id) = cells.iter().find(|&&id| board.cell(id).state == CellState::Empty) {
                    if let Some(change) = board.set_cell_state(empty_id, CellState::Garden, "completes an otherwise all-wall 2x2 block") {
                        changes.push(change);
                    }
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
    fn fills_the_fourth_cell_of_a_near_complete_block() {
        let level = Level::from_str("_,_\n_,_").unwrap();
        let mut board = Board::from_level(&level).unwrap();
        for (r, c) in [(0, 0), (0, 1), (1, 0)] {
            board.set_cell_state(board.cell_id(Coord::new(r, c)), CellState::Wall, "t");
        }
        let rule = EnsureNoTwoByTwoWalls;
        let changes = rule.apply(&mut board).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(board.cell(board.cell_id(Coord::new(1, 1))).state, CellState::Garden);
    }

    #[test]
    fn errors_on_a_completed_wall_block() {
        let level = Level::from_str("_,_\n_,_").unwrap();
        let mut board = Board::from_level(&level).unwrap();
        for (r, c) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            board.set_cell_state(board.cell_id(Coord::new(r, c)), CellState::Wall, "t");
        }
        let rule = EnsureNoTwoByTwoWalls;
        assert!(rule.apply(&mut board).is_err());
    }
}
