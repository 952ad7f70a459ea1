//! Loads a rectangular grid of optional clue values from a small
//! comma-separated text format and turns it into a `Board`.
//!
//! One row per line, blank field means "no clue" (e.g. `1,_,_,3` or
//! `1,,,3` both work; `_` is accepted as a friendlier blank marker).
//! The format has no quoting or escaping needs, so this is a hand-written
//! parser rather than a pull in a general CSV crate — the same call this
//! codebase's pattern loader made for its own RLE format.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::grid::Coord;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("row {row} has {found} fields, expected {expected} (ragged grid)")]
    InconsistentRowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid clue {text:?} at row {row}, col {col}")]
    InvalidClue { row: usize, col: usize, text: String },
    #[error("level has no rows")]
    Empty,
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("level describes an invalid board: {0}")]
    Board(#[from] BoardError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    rows: usize,
    cols: usize,
    clues: Vec<(Coord, u32)>,
}

impl Level {
    pub fn from_str(text: &str) -> Result<Level, LevelError> {
        let lines: Vec<&str> = text.lines().map(str::trim_end).filter(|l| !l.trim().is_empty()).collect();
        if lines.is_empty() {
            return Err(LevelError::Empty);
        }

        let cols = lines[0].split(',').count();
        let mut clues = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != cols {
                return Err(LevelError::InconsistentRowLength {
                    row,
                    expected: cols,
                    found: fields.len(),
                });
            }
            for (col, field) in fields.iter().enumerate() {
                let trimmed = field.trim();
                if trimmed.is_empty() || trimmed == "_" {
                    continue;
                }
                let value: u32 = trimmed.parse().map_err(|_| LevelError::InvalidClue {
                    row,
                    col,
                    text: trimmed.to_string(),
                })?;
                clues.push((Coord::new(row, col), value));
            }
        }

        Ok(Level {
            rows: lines.len(),
            cols,
            clues,
        })
    }

    pub fn load(path: &Path) -> Result<Level, LevelError> {
        let text = fs::read_to_string(path)?;
        Level::from_str(&text)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn clues(&self) -> &[(Coord, u32)] {
        &self.clues
    }
}

impl Board {
    /// Builds a `Board` from a parsed `Level`, running the usual
    /// clue-adjacency validation.
    pub fn from_level(level: &Level) -> Result<Board, BoardError> {
        Board::new(level.rows(), level.cols(), level.clues())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clues_and_blanks() {
        let level = Level::from_str("1,_,3,_\n_,_,_,2").unwrap();
        assert_eq!(level.rows(), 2);
        assert_eq!(level.cols(), 4);
        assert_eq!(
            level.clues(),
            &[(Coord::new(0, 0), 1), (Coord::new(0, 2), 3), (Coord::new(1, 3), 2)]
        );
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Level::from_str("1,_,_\n_,_").unwrap_err();
        assert!(matches!(err, LevelError::InconsistentRowLength { row: 1, expected: 3, found: 2 }));
    }

    #[test]
    fn rejects_non_numeric_clue() {
        let err = Level::from_str("1,x,_").unwrap_err();
        assert!(matches!(err, LevelError::InvalidClue { row: 0, col: 1, .. }));
    }

    #[test]
    fn from_level_rejects_adjacent_clues() {
        let level = Level::from_str("1,2").unwrap();
        let err = Board::from_level(&level).unwrap_err();
        assert!(matches!(err, BoardError::AdjacentClues { .. }));
    }
}
