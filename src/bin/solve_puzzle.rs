use clap::{ArgGroup, Parser};
use eight_puzzle_solver::config::SolverConfig;
use eight_puzzle_solver::engine::Board;
use eight_puzzle_solver::heuristics::Heuristic;
use eight_puzzle_solver::manager::{SolveManager, StrategyKind};
use eight_puzzle_solver::utils::{board_from_str_array, parse_board};
use eight_puzzle_solver::{logging, PuzzleError};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(group(ArgGroup::new("start").required(true).args(["initial", "board_file"])))]
struct Args {
    /// Start board as nine cells, row-major, e.g. "1 2 3 4 5 6 7 0 8"
    initial: Option<String>,

    /// Path to a board file (three lines of three numbers)
    #[clap(short = 'f', long)]
    board_file: Option<PathBuf>,

    /// Goal board; defaults to "1 2 3 4 5 6 7 8 0" or the config file's goal
    #[clap(short, long)]
    goal: Option<String>,

    /// Search strategy
    #[clap(short, long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Heuristic used by astar and greedy
    #[clap(long, value_enum)]
    heuristic: Option<Heuristic>,

    /// Give up after this many node expansions
    #[clap(long)]
    max_expansions: Option<usize>,

    /// TOML configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Print every intermediate board
    #[clap(short, long)]
    print_path: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn read_board_file(path: &PathBuf) -> Result<Board, PuzzleError> {
    let content = fs::read_to_string(path).map_err(|source| PuzzleError::Io {
        operation: format!("read board file {}", path.display()),
        source,
    })?;

    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    board_from_str_array(&lines)
}

fn run(args: &Args) -> Result<bool, PuzzleError> {
    let config = match &args.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };

    let initial = match (&args.initial, &args.board_file) {
        (Some(text), _) => parse_board(text)?,
        (None, Some(path)) => read_board_file(path)?,
        (None, None) => unreachable!("clap enforces one start board source"),
    };
    let goal = match &args.goal {
        Some(text) => parse_board(text)?,
        None => config.goal_board()?,
    };

    let strategy = args.strategy.unwrap_or(config.strategy);
    let heuristic = args.heuristic.unwrap_or(config.heuristic);
    let mut limits = config.limits();
    if args.max_expansions.is_some() {
        limits.max_expansions = args.max_expansions;
    }

    if !initial.is_solvable_from(&goal) {
        warn!("start and goal boards differ in parity; the search will exhaust without a solution");
    }

    println!("Start board:\n{}\n", initial);
    println!("Goal board:\n{}\n", goal);
    println!("Searching with {}...\n", strategy);

    let manager =
        SolveManager::with_kind(initial, goal, strategy, heuristic, config.iddfs_depth_limit)
            .with_limits(limits);

    let outcome = manager.solve_timed();
    if let (true, Some(solution)) = (args.print_path, &outcome.solution) {
        let stdout = io::stdout();
        solution
            .write_path(&mut stdout.lock())
            .map_err(|source| PuzzleError::Io {
                operation: "write solution".to_string(),
                source,
            })?;
    }
    println!("{}", outcome.summary());
    println!("Expanded: {}", outcome.stats.expanded);
    if outcome.stats.limit_reached {
        println!("Stopped at the expansion limit.");
    }
    Ok(outcome.is_solved())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
