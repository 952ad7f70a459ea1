//! The fixed-point driver and the rule library it schedules.
//!
//! Rules are boxed trait objects in a plain `Vec`; the driver never uses
//! reflection to find them, just cost-ordered iteration over that vector.

pub mod rules;

use log::{debug, info, warn};

use crate::board::Board;
use crate::cell::CellState;
use crate::change::CellChanges;
use crate::checker::{check_for_board_state_issue, Contradiction};

pub type Transition = (CellState, CellState);

pub const EMPTY_TO_WALL: Transition = (CellState::Empty, CellState::Wall);
pub const EMPTY_TO_GARDEN: Transition = (CellState::Empty, CellState::Garden);

/// A deduction rule: a pure function from board to proposed changes, plus
/// the scheduling metadata the driver needs (`cost`, `is_saturating`,
/// `triggers`).
pub trait SolverRule {
    fn name(&self) -> &'static str;
    fn cost(&self) -> u32;
    fn is_saturating(&self) -> bool;
    /// Transitions that can newly enable this rule. An empty slice means
    /// the rule's applicability never changes once evaluated (it depends
    /// only on the board's fixed clue layout), so it only ever runs from
    /// the driver's initial full queue.
    fn triggers(&self) -> &'static [Transition];
    fn apply(&self, board: &mut Board) -> Result<CellChanges, Contradiction>;
}

/// Outcome of running the driver to a fixed point (or until a contradiction
/// terminates it early).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    pub changes: CellChanges,
    pub contradiction: Option<Contradiction>,
    pub iterations: u32,
}

pub struct Solver {
    rules: Vec<Box<dyn SolverRule>>,
}

impl Solver {
    pub fn new() -> Self {
        Self {
            rules: rules::all_rules(),
        }
    }

    /// Runs the fixed-point loop described in the driver design: a
    /// cost-ordered ready queue, trigger-based re-queueing, and a single
    /// deferred "saturated" rule. Terminates when the queue empties or a
    /// contradiction is raised; `max_iterations` is a defensive backstop
    /// against a pathological rule set, not part of the core algorithm.
    pub fn run(&self, board: &mut Board, max_iterations: u32) -> SolveReport {
        let mut queue: Vec<usize> = (0..self.rules.len()).collect();
        queue.sort_by_key(|&i| self.rules[i].cost());

        let mut saturated_rule: Option<usize> = None;
        let mut last_round_changes = CellChanges::new();
        let mut all_changes = CellChanges::new();
        let mut iterations = 0u32;

        loop {
            if let Err(contradiction) = check_for_board_state_issue(board) {
                warn!("board-state contradiction: {}", contradiction.message);
                return SolveReport {
                    changes: all_changes,
                    contradiction: Some(contradiction),
                    iterations,
                };
            }

            let triggered = last_round_changes.unique_state_transitions();
            let queued: std::collections::HashSet<usize> = queue.iter().copied().collect();
            let mut newly_ready: Vec<usize> = (0..self.rules.len())
                .filter(|i| !queued.contains(i) && Some(*i) != saturated_rule)
                .filter(|i| self.rules[*i].triggers().iter().any(|t| triggered.contains(t)))
                .collect();
            queue.extend(newly_ready);
            queue.sort_by_key(|&i| self.rules[i].cost());

            if queue.is_empty() {
                info!("solver reached a fixed point after {} iterations", iterations);
                return SolveReport {
                    changes: all_changes,
                    contradiction: None,
                    iterations,
                };
            }

            if iterations >= max_iterations {
                warn!("solver aborted after hitting max_iterations={}", max_iterations);
                return SolveReport {
                    changes: all_changes,
                    contradiction: None,
                    iterations,
                };
            }

            let rule_idx = queue[0];
            let rule = self.rules[rule_idx].as_ref();
            debug!("running rule {}", rule.name());

            match rule.apply(board) {
                Ok(changes) => {
                    if changes.has_any_changes() {
                        debug!("rule {} produced {} change(s)", rule.name(), changes.len());
                        if rule.is_saturating() {
                            saturated_rule = Some(rule_idx);
                            queue.remove(0);
                        } else {
                            saturated_rule = None;
                        }
                    } else {
                        queue.remove(0);
                    }
                    all_changes.extend(&changes);
                    last_round_changes = changes;
                }
                Err(contradiction) => {
                    warn!("rule {} raised a contradiction: {}", rule.name(), contradiction.message);
                    return SolveReport {
                        changes: all_changes,
                        contradiction: Some(contradiction),
                        iterations,
                    };
                }
            }

            iterations += 1;
        }
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    #[test]
    fn solves_a_simple_level() {
        // A lone clue of 1 forces every other cell to be unreachable from
        // it, so NaivelyUnreachableFromClueCell alone walls off the rest
        // of the row.
        let level = Level::from_str("1,_,_").unwrap();
        let mut board = Board::from_level(&level).unwrap();
        let solver = Solver::new();
        let report = solver.run(&mut board, 10_000);
        assert!(report.contradiction.is_none());
        assert_eq!(
            crate::game_status::game_status(&board),
            crate::game_status::GameStatus::PuzzleSolved
        );
    }

    #[test]
    fn reports_a_contradiction_on_an_unsolvable_setup() {
        // Only two cells total can ever belong to this clue's weak garden,
        // but the clue demands three.
        let level = Level::from_str("3,_").unwrap();
        let mut board = Board::from_level(&level).unwrap();
        let solver = Solver::new();
        let report = solver.run(&mut board, 10_000);
        assert!(report.contradiction.is_some());
    }
}
