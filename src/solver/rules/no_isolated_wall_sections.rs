//! R-NW: the exact isolation check, run as a last resort because it probes
//! every single empty cell. For each one, ask "if this became garden
//! instead, would the remaining wall-bearing region split in two?" — if so,
//! the cell is load-bearing for wall connectivity and must be a wall.

use crate::board::Board;
use crate::cell::CellState;
use crate::change::CellChanges;
use crate::checker::Contradiction;
use crate::grid::CellId;
use crate::solver::{SolverRule, Transition, EMPTY_TO_GARDEN, EMPTY_TO_WALL};

pub struct NoIsolatedWallSections;

impl SolverRule for NoIsolatedWallSections {
    fn name(&self) -> &'static str {
        "NoIsolatedWallSections"
    }

    fn cost(&self) -> u32 {
        967
    }

    fn is_saturating(&self) -> bool {
        true
    }

    fn triggers(&self) -> &'static [Transition] {
        &[EMPTY_TO_WALL, EMPTY_TO_GARDEN]
    }

    fn apply(&self, board: &mut Board) -> Result<CellChanges, Contradiction> {
        let mut changes = CellChanges::new();
        let empties: Vec<CellId> = board.empty_cells().cells().iter().copied().collect();
        for id in empties {
            let groups = board.non_garden_groups_with_walls(Some(id));
            if groups.len() > 1 {
                if let Some(change) = board.set_cell_state(id, CellState::Wall, "excluding it would split the wall-bearing region in two") {
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
    fn walls_the_sole_bridge_between_two_wall_bearing_regions() {
        // Two walls at (1,0) and (1,2) each keep a spare non-garden
        // neighbor of their own, so only the shared hub at (1,1) is a true
        // cut cell between them.
        let mut board = Board::from_level(&Level::from_str("_,_,_\n_,_,_\n_,_,_").unwrap()).unwrap();
        board.set_cell_state(board.cell_id(Coord::new(1, 0)), CellState::Wall, "t");
        board.set_cell_state(board.cell_id(Coord::new(1, 2)), CellState::Wall, "t");
        board.set_cell_state(board.cell_id(Coord::new(0, 1)), CellState::Garden, "t");
        board.set_cell_state(board.cell_id(Coord::new(2, 1)), CellState::Garden, "t");

        let rule = NoIsolatedWallSections;
        let changes = rule.apply(&mut board).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(board.cell(board.cell_id(Coord::new(1, 1))).state, CellState::Wall);
    }
}
