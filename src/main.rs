use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use crossterm::style::Stylize;
use slider_puzzle::{generate_random_with, Board, Move, Position, Solver, SolverConfig, Strategy};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slider-puzzle", version, about = "Shuffle and solve sliding-tile puzzles")]
struct Cli {
    /// Board dimension used when shuffling.
    #[arg(long, short, default_value_t = 4)]
    size: usize,

    /// Overrides the strategy from the config file.
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Seed for a reproducible shuffle.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML solver configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Explicit board as row-major tiles, e.g. `1,2,3,4,5,6,7,0,8`.
    #[arg(long, value_delimiter = ',')]
    board: Option<Vec<u32>>,

    /// Print only the move list.
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    OneStep,
    VisitedSet,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::OneStep => Strategy::OneStep,
            StrategyArg::VisitedSet => Strategy::VisitedSet,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("slider_puzzle=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    if let Some(strategy) = cli.strategy {
        config = config.with_strategy(strategy.into());
    }
    if let Some(seed) = cli.seed {
        config = config.with_random_seed(seed);
    }

    let puzzle = match &cli.board {
        Some(tiles) => {
            let size = (1..=tiles.len()).find(|n| n * n >= tiles.len()).unwrap_or(0);
            Board::from_flat(size, tiles)?
        }
        None => {
            let initial = Board::solved(cli.size)?;
            if !cli.quiet {
                println!("Initial Puzzle:\n{}", render(&initial, None));
            }
            generate_random_with(cli.size, &mut config.rng())?
        }
    };

    if !cli.quiet {
        println!("Shuffled Puzzle:\n{}", render(&puzzle, None));
    }

    let solution = Solver::new(config).solve(&puzzle)?;

    if cli.quiet {
        let moves: Vec<String> = solution.moves.iter().map(Position::to_string).collect();
        println!("{}", moves.join(" "));
        return Ok(());
    }

    println!(
        "Found solution with {} moves ({} nodes expanded)",
        solution.moves.len(),
        solution.stats.expanded
    );

    let mut board = puzzle;
    for &to in &solution.moves {
        let from = board.blank();
        board.apply_move(to)?;
        let label = Move::between(from, to)
            .map(|direction| direction.to_string())
            .unwrap_or_default();
        println!("{}\n{}", label.bold(), render(&board, Some(from)));
    }

    Ok(())
}

/// Board text with the blank dimmed and the last moved tile highlighted.
fn render(board: &Board, moved: Option<Position>) -> String {
    let size = board.size();
    let width = (size * size - 1).to_string().len();
    let mut out = String::new();
    for (i, row) in board.rows().iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            let cell = format!("{:>width$}", value, width = width);
            let styled = if value == 0 {
                cell.dark_grey().to_string()
            } else if moved == Some(Position::new(i, j)) {
                cell.yellow().bold().to_string()
            } else {
                cell
            };
            out.push_str(&styled);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}
