//! Journal of cell-state mutations. Every board mutation goes through here
//! so the solver's output is always a replayable (and reversible) record,
//! never a silent side effect.

use std::collections::HashSet;

use crate::cell::CellState;
use crate::grid::Coord;

/// One cell's state transition, with a human-readable reason for why a rule
/// made it. `before` and `after` are never equal; a no-op change is not
/// recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellChange {
    pub coord: Coord,
    pub before: CellState,
    pub after: CellState,
    pub reason: String,
}

impl CellChange {
    pub fn new(coord: Coord, before: CellState, after: CellState, reason: impl Into<String>) -> Self {
        Self {
            coord,
            before,
            after,
            reason: reason.into(),
        }
    }

    /// Swap `before`/`after`, producing the change that undoes this one.
    pub fn reversed(&self) -> CellChange {
        CellChange {
            coord: self.coord,
            before: self.after,
            after: self.before,
            reason: format!("undo: {}", self.reason),
        }
    }
}

/// An ordered, append-only record of cell changes for one solver run (or
/// one rule application within it).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellChanges {
    changes: Vec<CellChange>,
}

impl CellChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: CellChange) {
        self.changes.push(change);
    }

    pub fn extend(&mut self, other: &CellChanges) {
        self.changes.extend(other.changes.iter().cloned());
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellChange> {
        self.changes.iter()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn has_any_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn has_wall_change(&self) -> bool {
        self.changes
            .iter()
            .any(|c| c.before == CellState::Wall || c.after == CellState::Wall)
    }

    /// The set of distinct `(before, after)` transitions observed, used by
    /// the driver to decide which rules to re-queue.
    pub fn unique_state_transitions(&self) -> HashSet<(CellState, CellState)> {
        self.changes.iter().map(|c| (c.before, c.after)).collect()
    }

    /// The change set that exactly undoes this one, in reverse order.
    pub fn reversed(&self) -> CellChanges {
        CellChanges {
            changes: self.changes.iter().rev().map(CellChange::reversed).collect(),
        }
    }
}
