//! R-NU: a cheap precursor to the full isolation check. When at least two
//! wall sections exist and one of them has only a single empty neighbor,
//! that neighbor must become a wall or the section could never reconnect.

use crate::board::Board;
use crate::cell::CellState;
use crate::change::CellChanges;
use crate::checker::Contradiction;
use crate::solver::{SolverRule, Transition, EMPTY_TO_WALL};

pub struct NoIsolatedWallSectionsNaive;

impl SolverRule for NoIsolatedWallSectionsNaive {
    fn name(&self) -> &'static str {
        "NoIsolatedWallSectionsNaive"
    }

    fn cost(&self) -> u32 {
        36
    }

    fn is_saturating(&self) -> bool {
        false
    }

    fn triggers(&self) -> &'static [Transition] {
        &[EMPTY_TO_WALL]
    }

    fn apply(&self, board: &mut Board) -> Result<CellChanges, Contradiction> {
        let sections = board.all_wall_sections();
        if sections.len() < 2 {
            return Ok(CellChanges::new());
        }
        for section in sections {
            let escapes = section.group().empty_adjacent_cells(board);
            if escapes.len() == 1 {
                let id = *escapes.iter().next().unwrap();
                let mut changes = CellChanges::new();
                if let Some(change) = board.set_cell_state(id, CellState::Wall, "only remaining bridge for an isolated wall section") {
                    changes.push(change);
                    return Ok(changes);
                }
            }
        }
        Ok(CellChanges::new())
    }
}
