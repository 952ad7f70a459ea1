//! Whole-board completion check, independent of the solver: a manually
//! completed board reports `PuzzleSolved` just the same as a solved one.

use crate::board::Board;
use crate::cell::CellState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    PuzzleSolved,
}

/// Evaluates the five conditions from the solve-conditions list against the
/// current board state.
pub fn game_status(board: &Board) -> GameStatus {
    if is_solved(board) {
        GameStatus::PuzzleSolved
    } else {
        GameStatus::InProgress
    }
}

fn is_solved(board: &Board) -> bool {
    let total_cells = board.rows() * board.cols();
    let total_clue_value: usize = board
        .clue_cells()
        .iter()
        .filter_map(|&id| board.cell(id).clue)
        .map(|v| v as usize)
        .sum();
    let wall_count = board.wall_cells().len();
    if wall_count != total_cells - total_clue_value {
        return false;
    }

    if board
        .two_by_two_positions()
        .iter()
        .any(|&pos| board.two_by_two_wall_count(pos) == 4)
    {
        return false;
    }

    if !walls_all_connected(board) {
        return false;
    }

    board.all_weak_gardens().iter().all(|wg| {
        wg.exactly_one_clue(board) && wg.has_correct_size(board)
    })
}

fn walls_all_connected(board: &Board) -> bool {
    let walls = board.wall_cells();
    if walls.is_empty() {
        return true;
    }
    let seed = *walls.cells().iter().next().unwrap();
    let component = board.get_wall_section(seed);
    component.len() == walls.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    #[test]
    fn solved_board_from_scenario_f() {
        let level = Level::from_str("1,_,_,_\n_,_,_,_\n_,3,_,_").unwrap();
        let mut board = Board::from_level(&level).unwrap();
        let walls = [
            (0, 1), (0, 2), (0, 3),
            (1, 0), (1, 1), (1, 2), (1, 3),
            (2, 0),
        ];
        for (r, c) in walls {
            board.set_cell_state(board.cell_id(crate::grid::Coord::new(r, c)), CellState::Wall, "t");
        }
        board.set_cell_state(board.cell_id(crate::grid::Coord::new(2, 2)), CellState::Garden, "t");
        board.set_cell_state(board.cell_id(crate::grid::Coord::new(2, 3)), CellState::Garden, "t");

        assert_eq!(game_status(&board), GameStatus::PuzzleSolved);
    }

    #[test]
    fn fresh_board_is_in_progress() {
        let level = Level::from_str("1,_,_,_\n_,_,_,_\n_,3,_,_").unwrap();
        let board = Board::from_level(&level).unwrap();
        assert_eq!(game_status(&board), GameStatus::InProgress);
    }
}
