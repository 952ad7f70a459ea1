use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use nurikabe_solver::board::Board;
use nurikabe_solver::config::Config;
use nurikabe_solver::game_status::{game_status, GameStatus};
use nurikabe_solver::level::Level;
use nurikabe_solver::solver::Solver;

/// Loads a Nurikabe level and runs the constraint-propagation solver over it.
#[derive(Parser, Debug)]
#[command(name = "nurikabe-solver", version, about)]
struct Cli {
    /// Which bundled level to load: levels/level_<N>.csv
    #[arg(long)]
    level: Option<u32>,

    /// Load a level from an arbitrary path instead of --level.
    #[arg(long)]
    level_file: Option<PathBuf>,

    /// Path to a config TOML file (defaults to nurikabe.toml in the cwd).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the resolved log level (debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Whether to run the solver to a fixed point before reporting.
    #[arg(long)]
    use_solver: Option<bool>,

    /// Prefix each clue in the rendered board with its (row,col) coordinate.
    #[arg(long)]
    include_grid_numbers: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref());

    let log_level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let level_path = match (&cli.level_file, cli.level) {
        (Some(path), _) => path.clone(),
        (None, Some(n)) => config.levels_dir.join(format!("level_{}.csv", n)),
        (None, None) => config.levels_dir.join("level_1.csv"),
    };

    let level = match Level::load(&level_path) {
        Ok(level) => level,
        Err(err) => {
            error!("failed to load level {}: {}", level_path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let mut board = match Board::from_level(&level) {
        Ok(board) => board,
        Err(err) => {
            error!("level describes an invalid board: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let use_solver = cli.use_solver.unwrap_or(config.use_solver);
    if use_solver {
        let solver = Solver::new();
        let report = solver.run(&mut board, config.max_iterations);
        info!("solver ran {} iteration(s)", report.iterations);
        if let Some(contradiction) = &report.contradiction {
            warn!("no possible solution from the current state: {}", contradiction.message);
        }
    }

    let include_grid_numbers = cli.include_grid_numbers || config.include_grid_numbers;
    print!("{}", board.render(include_grid_numbers));
    match game_status(&board) {
        GameStatus::PuzzleSolved => info!("puzzle solved"),
        GameStatus::InProgress => info!("puzzle still in progress"),
    }

    ExitCode::SUCCESS
}
