//! Detects contradictions in the current board state: partial assignments
//! that can no longer lead to a valid solution no matter what happens next.

use crate::board::Board;
use crate::cell::CellState;
use crate::region::CellGroup;

/// A contradiction the board-state checker (or a rule) has detected.
/// Carries the offending groups so a caller can report or highlight them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contradiction {
    pub message: String,
    pub problem_groups: Vec<CellGroup>,
}

impl Contradiction {
    pub fn new(message: impl Into<String>, problem_groups: Vec<CellGroup>) -> Self {
        Self {
            message: message.into(),
            problem_groups,
        }
    }
}

/// Runs the six checks in order and returns the first contradiction found,
/// if any. Called at the top of every solver iteration.
pub fn check_for_board_state_issue(board: &Board) -> Result<(), Contradiction> {
    check_no_two_by_two_walls(board)?;
    check_walls_connected(board)?;
    check_gardens_single_clue(board)?;
    check_weak_gardens_not_too_small(board)?;
    check_gardens_not_too_large(board)?;
    check_enclosed_weak_gardens_have_a_clue(board)?;
    Ok(())
}

fn check_no_two_by_two_walls(board: &Board) -> Result<(), Contradiction> {
    for &pos in board.two_by_two_positions() {
        if board.two_by_two_wall_count(pos) == 4 {
            let group = CellGroup::new(board.two_by_two_cells(pos));
            return Err(Contradiction::new("a 2x2 block is entirely walls", vec![group]));
        }
    }
    Ok(())
}

/// Walls only ever need to be connectable, not already connected: two wall
/// sections separated solely by empty cells might still join up later, so
/// this checks connectivity through the non-garden region (walls + empties)
/// rather than demanding the walls themselves already form one component.
fn check_walls_connected(board: &Board) -> Result<(), Contradiction> {
    let groups = board.non_garden_groups_with_walls(None);
    if groups.len() > 1 {
        return Err(Contradiction::new(
            "wall cells can no longer become a single connected region",
            groups,
        ));
    }
    Ok(())
}

fn check_gardens_single_clue(board: &Board) -> Result<(), Contradiction> {
    for garden in board.all_gardens() {
        if garden.group().clue_count(board) > 1 {
            return Err(Contradiction::new(
                "a garden contains more than one clue",
                vec![garden.group().clone()],
            ));
        }
    }
    Ok(())
}

fn check_weak_gardens_not_too_small(board: &Board) -> Result<(), Contradiction> {
    for weak_garden in board.all_weak_gardens() {
        if weak_garden.exactly_one_clue(board) && weak_garden.is_too_small(board) {
            return Err(Contradiction::new(
                "a weak garden is smaller than its clue's required size",
                vec![weak_garden.group().clone()],
            ));
        }
    }
    Ok(())
}

fn check_gardens_not_too_large(board: &Board) -> Result<(), Contradiction> {
    for garden in board.all_gardens() {
        if garden.exactly_one_clue(board) {
            let size = garden.len();
            if let Some(value) = garden.clue_value(board) {
                if size > value as usize {
                    return Err(Contradiction::new(
                        "a garden is larger than its clue's required size",
                        vec![garden.group().clone()],
                    ));
                }
            }
        }
    }
    Ok(())
}

fn check_enclosed_weak_gardens_have_a_clue(board: &Board) -> Result<(), Contradiction> {
    for weak_garden in board.all_weak_gardens() {
        let has_garden_cell = weak_garden
            .group()
            .cells()
            .iter()
            .any(|&id| board.cell(id).state == CellState::Garden);
        if !has_garden_cell || weak_garden.group().clue_count(board) > 0 {
            continue;
        }
        let truly_enclosed = weak_garden
            .group()
            .adjacent_cells(board)
            .iter()
            .all(|&id| board.cell(id).state == CellState::Wall);
        if truly_enclosed {
            return Err(Contradiction::new(
                "a clueless weak garden with garden cells is fully enclosed by walls",
                vec![weak_garden.group().clone()],
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellState;
    use crate::grid::Coord;
    use crate::level::Level;

    fn board_from(rows: &[&str]) -> Board {
        Board::from_level(&Level::from_str(&rows.join("\n")).unwrap()).unwrap()
    }

    #[test]
    fn flags_two_by_two_wall_block() {
        let mut board = board_from(&["_,_,_", "_,_,_", "_,_,_"]);
        for (r, c) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            board.set_cell_state(board.cell_id(Coord::new(r, c)), CellState::Wall, "t");
        }
        let err = check_for_board_state_issue(&board).unwrap_err();
        assert!(err.message.contains("2x2"));
    }

    #[test]
    fn two_walls_joinable_through_empty_cells_is_not_a_contradiction() {
        // Two wall cells with nothing but empty cells between them could
        // still end up in the same wall region, so this must not flag.
        let mut board = board_from(&["_,_,_", "_,_,_", "_,_,_"]);
        board.set_cell_state(board.cell_id(Coord::new(0, 0)), CellState::Wall, "t");
        board.set_cell_state(board.cell_id(Coord::new(2, 2)), CellState::Wall, "t");
        assert!(check_for_board_state_issue(&board).is_ok());
    }

    #[test]
    fn flags_disconnected_walls() {
        // A garden column fully separates the two wall cells, so no future
        // assignment can ever join them into one wall region.
        let mut board = board_from(&["_,_,_", "_,_,_", "_,_,_"]);
        board.set_cell_state(board.cell_id(Coord::new(0, 0)), CellState::Wall, "t");
        board.set_cell_state(board.cell_id(Coord::new(0, 1)), CellState::Garden, "t");
        board.set_cell_state(board.cell_id(Coord::new(1, 1)), CellState::Garden, "t");
        board.set_cell_state(board.cell_id(Coord::new(2, 1)), CellState::Garden, "t");
        board.set_cell_state(board.cell_id(Coord::new(0, 2)), CellState::Wall, "t");
        let err = check_for_board_state_issue(&board).unwrap_err();
        assert!(err.message.contains("connected"));
    }

    #[test]
    fn flags_oversized_garden() {
        let mut board = board_from(&["1,_,_", "_,_,_", "_,_,_"]);
        board.set_cell_state(board.cell_id(Coord::new(0, 1)), CellState::Garden, "t");
        board.set_cell_state(board.cell_id(Coord::new(0, 2)), CellState::Garden, "t");
        let err = check_for_board_state_issue(&board).unwrap_err();
        assert!(err.message.contains("larger"));
    }

    #[test]
    fn clean_board_has_no_contradiction() {
        let board = board_from(&["1,_,_", "_,_,_", "_,3,_"]);
        assert!(check_for_board_state_issue(&board).is_ok());
    }
}
