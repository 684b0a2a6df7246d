//! CLI entry point for the shunting solver.
//!
//! Usage:
//!   shunting-solver list
//!   shunting-solver solve easy2
//!   shunting-solver solve hard1 --strategy ucs --show-path
//!   shunting-solver solve --main-track "3 1 2" --siding "" --siding "" --goal "1 2 3"
//!   shunting-solver export benchmarks.json
//!
//! `solve` runs one strategy or all three against a benchmark puzzle, a
//! puzzle from a JSON catalog file, or a custom puzzle given as flags, and
//! prints per-strategy results plus a comparison table.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};

use shunting_solver::{
    best_first_search, comparison_table, render_path, write_summary, Catalog, CatalogError,
    Difficulty, RailwayState, RunReport, SearchStrategy, StrategySummary,
};

#[derive(Parser)]
#[command(name = "shunting-solver")]
#[command(about = "Best-first search solver for railway shunting puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available benchmark puzzles
    List {
        /// Read puzzles from a JSON catalog file instead of the built-in set
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Solve a benchmark or custom puzzle
    Solve(SolveArgs),
    /// Write the built-in benchmark catalog to a JSON file
    Export {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Args)]
struct SolveArgs {
    /// Name of a benchmark puzzle
    #[arg(value_name = "PUZZLE")]
    puzzle: Option<String>,

    /// Read puzzles from a JSON catalog file instead of the built-in set
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Custom puzzle: space-separated main track, front first (e.g. "3 1 2")
    #[arg(long)]
    main_track: Option<String>,

    /// Custom puzzle: contents of one siding, space-separated; repeat per siding
    #[arg(long)]
    siding: Vec<String>,

    /// Custom puzzle: space-separated goal order
    #[arg(long)]
    goal: Option<String>,

    /// Search strategy to run
    #[arg(long, value_enum, default_value = "all")]
    strategy: StrategyArg,

    /// Print every state along each solution path
    #[arg(long)]
    show_path: bool,

    /// Emit the run report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Directory to write a summary-statistics file into
    #[arg(long)]
    summary_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Uniform-cost search
    Ucs,
    /// A* with the misplaced-train heuristic
    Misplaced,
    /// A* with the Manhattan-distance heuristic
    Manhattan,
    /// Run all three strategies and compare
    All,
}

impl StrategyArg {
    fn strategies(self) -> Vec<SearchStrategy> {
        match self {
            StrategyArg::Ucs => vec![SearchStrategy::UniformCost],
            StrategyArg::Misplaced => vec![SearchStrategy::AStarMisplaced],
            StrategyArg::Manhattan => vec![SearchStrategy::AStarManhattan],
            StrategyArg::All => SearchStrategy::all().to_vec(),
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::List { catalog } => run_list(catalog),
        Commands::Solve(args) => run_solve(args),
        Commands::Export { file } => run_export(&file),
    };
    process::exit(code);
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog, CatalogError> {
    match path {
        Some(path) => Catalog::from_file(path),
        None => Ok(Catalog::builtin()),
    }
}

fn run_list(catalog_path: Option<PathBuf>) -> i32 {
    let catalog = match load_catalog(catalog_path.as_ref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    println!("Available Railway Shunting Benchmarks:");
    println!("{}", "-".repeat(80));
    for difficulty in Difficulty::all() {
        let group: Vec<_> = catalog
            .iter()
            .filter(|(_, config)| config.difficulty == difficulty)
            .collect();
        if group.is_empty() {
            continue;
        }
        println!("\n{} PUZZLES:", difficulty.as_str().to_uppercase());
        for (name, config) in group {
            println!("\n  {name}:");
            println!("    Description: {}", config.description);
            println!("    Initial State: {}", config.main_track.join(" → "));
            println!("    Goal State: {}", config.goal_order.join(" → "));
            println!("    Expected Depth: {} moves", config.expected_depth);
            println!("    Sidings: {}", config.sidings.len());
        }
    }
    0
}

fn run_export(file: &Path) -> i32 {
    match Catalog::builtin().to_file(file) {
        Ok(()) => {
            println!("Wrote benchmark catalog to {}", file.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

fn run_solve(args: SolveArgs) -> i32 {
    let (name, initial) = match resolve_state(&args) {
        Ok(pair) => pair,
        Err(message) => {
            eprintln!("Error: {message}");
            return 1;
        }
    };

    if !args.json {
        println!("Puzzle: {name}");
        println!("\nInitial State:");
        println!("{initial}");
        println!("\nGoal Order: {}", initial.goal_order().join(" → "));
    }

    let mut summaries = Vec::new();
    let mut all_solved = true;
    for strategy in args.strategy.strategies() {
        let outcome = best_first_search(&initial, strategy);
        all_solved &= outcome.solved();
        let summary = StrategySummary::new(strategy, &outcome);

        if !args.json {
            println!("\n=== {} ===", summary.strategy);
            match &outcome.path {
                Some(path) => {
                    println!("Path length: {}", summary.path_length);
                    println!("Nodes expanded: {}", summary.nodes_expanded);
                    println!("Max queue size: {}", summary.max_queue_size);
                    println!("Execution time: {:.4} seconds", summary.elapsed_seconds);
                    println!("Nodes per second: {:.2}", summary.nodes_per_second);
                    if args.show_path {
                        println!("\nSolution path:");
                        print!("{}", render_path(path));
                    }
                }
                None => {
                    println!("No solution found.");
                    println!("Nodes expanded: {}", summary.nodes_expanded);
                }
            }
        }
        summaries.push(summary);
    }

    if !args.json && summaries.len() > 1 {
        println!("\n=== Performance Comparison ===");
        print!("{}", comparison_table(&summaries));
    }

    let report = RunReport {
        puzzle: name.clone(),
        results: summaries,
    };

    if args.json {
        match report.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        }
    }

    if let Some(dir) = &args.summary_dir {
        match write_summary(dir, &name, &report.results) {
            Ok(file) => {
                if !args.json {
                    println!("\nSummary written to {}", file.display());
                }
            }
            Err(e) => {
                eprintln!("Error writing summary: {e}");
                return 1;
            }
        }
    }

    if all_solved {
        0
    } else {
        1
    }
}

fn resolve_state(args: &SolveArgs) -> Result<(String, RailwayState), String> {
    if let Some(name) = &args.puzzle {
        let catalog = load_catalog(args.catalog.as_ref()).map_err(|e| e.to_string())?;
        let config = catalog.get(name).map_err(|e| e.to_string())?;
        let state = config.to_state().map_err(|e| e.to_string())?;
        return Ok((name.clone(), state));
    }

    let (main_track, goal) = match (&args.main_track, &args.goal) {
        (Some(main_track), Some(goal)) => (main_track, goal),
        _ => {
            return Err(
                "provide a benchmark name, or --main-track and --goal for a custom puzzle"
                    .to_string(),
            )
        }
    };
    if args.siding.is_empty() {
        return Err(
            "custom puzzles need at least one --siding (an empty one is --siding \"\")"
                .to_string(),
        );
    }

    let state = RailwayState::new(
        tokens(main_track),
        args.siding.iter().map(|siding| tokens(siding)).collect(),
        tokens(goal),
    )
    .map_err(|e| e.to_string())?;
    Ok(("custom".to_string(), state))
}

fn tokens(input: &str) -> Vec<String> {
    input.split_whitespace().map(|s| s.to_string()).collect()
}
