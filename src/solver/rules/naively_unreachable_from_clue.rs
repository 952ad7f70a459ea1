//! R-UC: a cheap, purely geometric bound. An empty cell whose Manhattan
//! path-length to *every* clue exceeds that clue's value can never belong
//! to any garden, so it must be a wall.

use crate::board::Board;
use crate::cell::CellState;
use crate::change::CellChanges;
use crate::checker::Contradiction;
use crate::grid::CellId;
use crate::solver::{SolverRule, Transition};

pub struct NaivelyUnreachableFromClueCell;

impl SolverRule for NaivelyUnreachableFromClueCell {
    fn name(&self) -> &'static str {
        "NaivelyUnreachableFromClueCell"
    }

    fn cost(&self) -> u32 {
        28
    }

    fn is_saturating(&self) -> bool {
        false
    }

    fn triggers(&self) -> &'static [Transition] {
        &[]
    }

    fn apply(&self, board: &mut Board) -> Result<CellChanges, Contradiction> {
        let clues: Vec<(CellId, u32)> = board
            .clue_cells()
            .iter()
            .map(|&id| (id, board.cell(id).clue.expect("clue cell")))
            .collect();
        if clues.is_empty() {
            return Ok(CellChanges::new());
        }

        let mut changes = CellChanges::new();
        let empties: Vec<CellId> = board.empty_cells().cells().iter().copied().collect();
        for id in empties {
            let coord = board.coord_of(id);
            let unreachable_from_all = clues.iter().all(|&(clue_id, value)| {
                let path_length = coord.manhattan_distance(&board.coord_of(clue_id)) + 1;
                path_length > value as usize
            });
            if unreachable_from_all {
                if let Some(change) = board.set_cell_state(id, CellState::Wall, "out of every clue's reach") {
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
    fn walls_off_cells_beyond_every_clues_budget() {
        let level = Level::from_str("1,_,_").unwrap();
        let mut board = Board::from_level(&level).unwrap();
        let rule = NaivelyUnreachableFromClueCell;
        let changes = rule.apply(&mut board).unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(board.cell(board.cell_id(Coord::new(0, 1))).state, CellState::Wall);
        assert_eq!(board.cell(board.cell_id(Coord::new(0, 2))).state, CellState::Wall);
    }
}
