//! R-EW: a clueless garden must eventually merge into some clue-bearing
//! garden. If every remaining route to every reachable destination funnels
//! through the same empty cell, that cell has to become Garden.

use std::collections::BTreeSet;

use crate::board::Board;
use crate::cell::CellState;
use crate::change::CellChanges;
use crate::checker::Contradiction;
use crate::grid::CellId;
use crate::path_finder::PathFinder;
use crate::region::CellGroup;
use crate::solver::{SolverRule, Transition, EMPTY_TO_GARDEN, EMPTY_TO_WALL};

pub struct EnsureGardenWithoutClueCanExpand;

/// Clueless gardens other than `source`, filtered down to the ones the path
/// finder can legally treat as `other_groups` (not adjacent to `source`).
fn other_groups_for(board: &Board, source: &CellGroup) -> Vec<CellGroup> {
    board
        .all_gardens()
        .into_iter()
        .filter(|g| g.clue_value(board).is_none())
        .map(|g| g.group().clone())
        .filter(|g| g != source)
        .filter(|g| !g.adjacent_cells(board).iter().any(|c| source.contains(*c)))
        .collect()
}

/// Cells adjacent to any clue-bearing garden other than `dest`: routing a
/// clueless garden through or alongside an unrelated clue garden would merge
/// the two, so those cells are off-limits for this destination's path.
fn other_clue_bearing_adjacent(board: &Board, dest: &CellGroup) -> BTreeSet<CellId> {
    let mut result = BTreeSet::new();
    for garden in board.all_gardens() {
        if garden.clue_value(board).is_none() || garden.group() == dest {
            continue;
        }
        result.extend(garden.group().adjacent_cells(board));
    }
    result
}

/// Off-limits set for a path from `source` to `dest`: walls plus the
/// neighbors of every other clue-bearing garden, minus `source`'s own cells.
fn off_limits_for(board: &Board, source: &CellGroup, dest: &CellGroup) -> BTreeSet<CellId> {
    let mut off_limits: BTreeSet<CellId> = board.wall_cells().cells().clone();
    off_limits.extend(other_clue_bearing_adjacent(board, dest));
    for id in source.cells() {
        off_limits.remove(id);
    }
    off_limits
}

fn path_budget(clue_value: u32, source_len: usize, dest_len: usize) -> Option<usize> {
    let budget = clue_value as isize - source_len as isize - dest_len as isize + 2;
    if budget < 0 {
        None
    } else {
        Some(budget as usize)
    }
}

impl SolverRule for EnsureGardenWithoutClueCanExpand {
    fn name(&self) -> &'static str {
        "EnsureGardenWithoutClueCanExpand"
    }

    fn cost(&self) -> u32 {
        54
    }

    fn is_saturating(&self) -> bool {
        false
    }

    fn triggers(&self) -> &'static [Transition] {
        &[EMPTY_TO_WALL, EMPTY_TO_GARDEN]
    }

    fn apply(&self, board: &mut Board) -> Result<CellChanges, Contradiction> {
        let clueless_gardens: Vec<CellGroup> = board
            .all_gardens()
            .into_iter()
            .filter(|g| g.clue_value(board).is_none())
            .map(|g| g.group().clone())
            .collect();

        for source in &clueless_gardens {
            let destinations: Vec<(CellGroup, u32)> = board
                .all_gardens()
                .into_iter()
                .filter(|g| g.is_incomplete(board))
                .filter_map(|g| g.clue_value(board).map(|v| (g.group().clone(), v)))
                .collect();
            if destinations.is_empty() {
                continue;
            }

            let other_groups = other_groups_for(board, source);

            let mut viable_paths = Vec::new();
            for (dest, value) in &destinations {
                let Some(budget) = path_budget(*value, source.len(), dest.len()) else {
                    continue;
                };
                let off_limits = off_limits_for(board, source, dest);
                let finder = PathFinder::new(board, source.clone(), dest.clone(), off_limits, other_groups.clone())
                    .with_max_path_length(budget);
                if let Ok(result) = finder.find_path() {
                    viable_paths.push(result);
                }
            }

            if viable_paths.is_empty() {
                return Err(Contradiction::new(
                    "a clueless garden has no remaining route to any incomplete clue-bearing garden",
                    vec![source.clone()],
                ));
            }

            let mut candidates: Option<BTreeSet<CellId>> = None;
            for path in &viable_paths {
                let empties: BTreeSet<CellId> = path
                    .cells
                    .iter()
                    .copied()
                    .filter(|&id| board.cell(id).state == CellState::Empty)
                    .collect();
                candidates = Some(match candidates {
                    None => empties,
                    Some(prev) => prev.intersection(&empties).copied().collect(),
                });
            }
            let mut candidates: Vec<CellId> = candidates.unwrap_or_default().into_iter().collect();
            candidates.sort_by_key(|&id| source.manhattan_distance_to_cell(board, id));

            for candidate in candidates {
                let still_reachable = destinations.iter().any(|(dest, value)| {
                    let Some(budget) = path_budget(*value, source.len(), dest.len()) else {
                        return false;
                    };
                    let mut probe_off_limits = off_limits_for(board, source, dest);
                    probe_off_limits.insert(candidate);
                    PathFinder::new(board, source.clone(), dest.clone(), probe_off_limits, other_groups.clone())
                        .with_max_path_length(budget)
                        .find_path()
                        .is_ok()
                });

                if !still_reachable {
                    let mut changes = CellChanges::new();
                    if let Some(change) = board.set_cell_state(candidate, CellState::Garden, "the only remaining route to any incomplete clue-bearing garden") {
                        changes.push(change);
                    }
                    return Ok(changes);
                }
            }
        }

        Ok(CellChanges::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coord;
    use crate::level::Level;

    #[test]
    fn grows_the_only_bridge_to_an_incomplete_clue_garden() {
        // A clueless garden cell sits two cells away from the clue; the
        // only row-bound route between them goes through the one empty
        // cell separating them.
        let level = Level::from_str("3,_,_").unwrap();
        let mut board = Board::from_level(&level).unwrap();
        let clueless = board.cell_id(Coord::new(0, 2));
        board.set_cell_state(clueless, CellState::Garden, "t");

        let rule = EnsureGardenWithoutClueCanExpand;
        let changes = rule.apply(&mut board).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(board.cell(board.cell_id(Coord::new(0, 1))).state, CellState::Garden);
    }
}
