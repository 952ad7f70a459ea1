//! R-FW: once a weak garden's cell count already matches its clue, every
//! remaining empty cell in it is committed Garden — there's no more room to
//! grow, and no reason left to leave it undecided.

use crate::board::Board;
use crate::cell::CellState;
use crate::change::CellChanges;
use crate::checker::Contradiction;
use crate::grid::CellId;
use crate::solver::{SolverRule, Transition, EMPTY_TO_WALL};

pub struct FillCorrectlySizedWeakGarden;

impl SolverRule for FillCorrectlySizedWeakGarden {
    fn name(&self) -> &'static str {
        "FillCorrectlySizedWeakGarden"
    }

    fn cost(&self) -> u32 {
        50
    }

    fn is_saturating(&self) -> bool {
        true
    }

    fn triggers(&self) -> &'static [Transition] {
        &[EMPTY_TO_WALL]
    }

    fn apply(&self, board: &mut Board) -> Result<CellChanges, Contradiction> {
        let mut changes = CellChanges::new();
        for weak_garden in board.all_weak_gardens() {
            if !weak_garden.exactly_one_clue(board) || !weak_garden.has_correct_size(board) {
                continue;
            }
            let empties: Vec<CellId> = weak_garden
                .group()
                .cells()
                .iter()
                .copied()
                .filter(|&id| board.cell(id).state == CellState::Empty)
                .collect();
            for id in empties {
                if let Some(change) = board.set_cell_state(id, CellState::Garden, "weak garden already matches its clue's size") {
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
    fn fills_the_last_empty_cell_of_a_matched_weak_garden() {
        let level = Level::from_str("2,_").unwrap();
        let mut board = Board::from_level(&level).unwrap();
        let rule = FillCorrectlySizedWeakGarden;
        let changes = rule.apply(&mut board).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(board.cell(board.cell_id(Coord::new(0, 1))).state, CellState::Garden);
    }
}
