//! R-SC: gardens have exactly one clue, so an empty cell touching two or
//! more clue cells can never join either garden and must be a wall.

use crate::board::Board;
use crate::cell::CellState;
use crate::change::CellChanges;
use crate::checker::Contradiction;
use crate::grid::CellId;
use crate::solver::{SolverRule, Transition};

pub struct SeparateClues;

impl SolverRule for SeparateClues {
    fn name(&self) -> &'static str {
        "SeparateClues"
    }

    fn cost(&self) -> u32 {
        13
    }

    fn is_saturating(&self) -> bool {
        true
    }

    fn triggers(&self) -> &'static [Transition] {
        &[]
    }

    fn apply(&self, board: &mut Board) -> Result<CellChanges, Contradiction> {
        let mut changes = CellChanges::new();
        let empties: Vec<CellId> = board.empty_cells().cells().iter().copied().collect();
        for id in empties {
            let clue_neighbors = board
                .orthogonal_neighbors(id)
                .iter()
                .filter(|&&n| board.cell(n).is_clue())
                .count();
            if clue_neighbors >= 2 {
                if let Some(change) = board.set_cell_state(id, CellState::Wall, "adjacent to two or more clues") {
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
    fn walls_off_a_cell_pinched_between_two_clues() {
        let level = Level::from_str("1,_,2").unwrap();
        let mut board = Board::from_level(&level).unwrap();
        let rule = SeparateClues;
        let changes = rule.apply(&mut board).unwrap();
        assert_eq!(changes.len(), 1);
        let pinched = board.cell_id(Coord::new(0, 1));
        assert_eq!(board.cell(pinched).state, CellState::Wall);
    }
}
