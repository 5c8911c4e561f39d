use clap::Parser;
use eight_puzzle_solver::engine::Board;
use eight_puzzle_solver::heuristics::Heuristic;
use eight_puzzle_solver::logging;
use eight_puzzle_solver::manager::{SolveManager, StrategyKind};
use eight_puzzle_solver::solver::{SearchLimits, MAX_IDDFS_DEPTH};
use std::collections::HashMap;

/// Compare search strategies over seeded scrambles
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of scrambled boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Random moves applied to the goal to build each board
    #[clap(short, long, default_value_t = 14)]
    scramble: usize,

    /// Seed of the first board; board i uses seed + i
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Expansion limit per search
    #[clap(long, default_value_t = 200_000)]
    max_expansions: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Default)]
struct Totals {
    solved: usize,
    failed: usize,
    moves: usize,
    expanded: usize,
    seconds: f64,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut runs: Vec<(String, StrategyKind, Heuristic)> = StrategyKind::ALL
        .iter()
        .filter(|kind| !matches!(kind, StrategyKind::AStar | StrategyKind::Greedy))
        .map(|&kind| (kind.to_string(), kind, Heuristic::Manhattan))
        .collect();
    for kind in [StrategyKind::AStar, StrategyKind::Greedy] {
        for heuristic in Heuristic::ALL {
            runs.push((format!("{}/{}", kind, heuristic), kind, heuristic));
        }
    }

    let mut totals: HashMap<String, Totals> = HashMap::new();
    let goal = Board::goal();
    let limits = SearchLimits::with_max_expansions(args.max_expansions);

    println!(
        "Evaluating {} strategies on {} boards ({} scramble moves)...",
        runs.len(),
        args.boards,
        args.scramble
    );

    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx as u64;
        let initial = Board::scrambled(&goal, args.scramble, current_seed);

        println!("\nBoard {} (Seed: {})\n{}", board_idx, current_seed, initial);

        for (label, kind, heuristic) in &runs {
            let manager =
                SolveManager::with_kind(initial, goal, *kind, *heuristic, MAX_IDDFS_DEPTH)
                    .with_limits(limits);
            let outcome = manager.solve_timed();
            let entry = totals.entry(label.clone()).or_default();
            entry.expanded += outcome.stats.expanded;
            entry.seconds += outcome.elapsed.as_secs_f64();

            match &outcome.solution {
                Some(solution) => {
                    entry.solved += 1;
                    entry.moves += solution.moves();
                    println!(
                        "  Strategy: {:<24}, Moves: {:<6}, Expanded: {}",
                        label,
                        solution.moves(),
                        outcome.stats.expanded
                    );
                }
                None => {
                    entry.failed += 1;
                    println!(
                        "  Strategy: {:<24}, No solution (expanded {})",
                        label, outcome.stats.expanded
                    );
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("\n--- Averages over solved boards ---");

    let mut rows: Vec<(&str, &Totals)> = runs
        .iter()
        .filter_map(|(label, _, _)| totals.get(label).map(|t| (label.as_str(), t)))
        .collect();
    rows.sort_by_key(|(_, t)| t.expanded);

    for (label, t) in rows {
        if t.solved == 0 {
            println!("Strategy {:<24}: no boards solved ({} failed)", label, t.failed);
            continue;
        }
        println!(
            "Strategy {:<24}: Moves = {:>8.2}, Expanded = {:>10.1}, Time = {:.4}s, Failed = {}",
            label,
            t.moves as f64 / t.solved as f64,
            t.expanded as f64 / (t.solved + t.failed) as f64,
            t.seconds / (t.solved + t.failed) as f64,
            t.failed
        );
    }
}
