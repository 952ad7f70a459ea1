//! R-EG: an incomplete garden with exactly one empty adjacent cell has no
//! choice but to grow into it.

use crate::board::Board;
use crate::cell::CellState;
use crate::change::CellChanges;
use crate::checker::Contradiction;
use crate::solver::{SolverRule, Transition, EMPTY_TO_GARDEN, EMPTY_TO_WALL};

pub struct EnsureGardenCanExpandOneRoute;

impl SolverRule for EnsureGardenCanExpandOneRoute {
    fn name(&self) -> &'static str {
        "EnsureGardenCanExpandOneRoute"
    }

    fn cost(&self) -> u32 {
        18
    }

    fn is_saturating(&self) -> bool {
        false
    }

    fn triggers(&self) -> &'static [Transition] {
        &[EMPTY_TO_WALL, EMPTY_TO_GARDEN]
    }

    fn apply(&self, board: &mut Board) -> Result<CellChanges, Contradiction> {
        let mut changes = CellChanges::new();
        for garden in board.all_gardens() {
            if !garden.is_incomplete(board) {
                continue;
            }
            let escapes = garden.group().empty_adjacent_cells(board);
            if escapes.len() == 1 {
                let id = *escapes.iter().next().unwrap();
                if let Some(change) = board.set_cell_state(id, CellState::Garden, "only escape route for an incomplete garden") {
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
    fn grows_garden_with_a_single_escape() {
        let level = Level::from_str("2,_\n_,_").unwrap();
        let mut board = Board::from_level(&level).unwrap();
        // Wall off one of the two possible escape routes, leaving only one.
        let blocked = board.cell_id(Coord::new(1, 0));
        board.set_cell_state(blocked, CellState::Wall, "t");

        let rule = EnsureGardenCanExpandOneRoute;
        let changes = rule.apply(&mut board).unwrap();
        assert_eq!(changes.len(), 1);
        let grown = board.cell_id(Coord::new(0, 1));
        assert_eq!(board.cell(grown).state, CellState::Garden);
    }
}
