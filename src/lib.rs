//! A constraint-propagation solver for Nurikabe puzzles.
//!
//! `board` holds the grid and the cached region queries every rule reads
//! from; `solver` schedules the rule library to a fixed point or a
//! contradiction; `checker` is the independent whole-board sanity pass the
//! driver runs before every rule application.

pub mod board;
pub mod cache;
pub mod cell;
pub mod change;
pub mod checker;
pub mod config;
pub mod game_status;
pub mod grid;
pub mod level;
pub mod path_finder;
pub mod region;
pub mod solver;

pub use board::Board;
pub use config::Config;
pub use game_status::{game_status, GameStatus};
pub use level::Level;
pub use solver::{SolveReport, Solver};
