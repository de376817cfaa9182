use clap::Parser;
use eight_puzzle_solver::engine::Board;
use eight_puzzle_solver::solver::{try_create_searcher, SearchOutcome, SearchParam};
use eight_puzzle_solver::utils::{read_puzzle_file, BatchSummary, Interrupt, Watchdog};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solves every puzzle in a file and reports averages", long_about = None)]
struct Args {
    /// Search algorithm: random, BFS, DFS, Greedy or A*
    #[clap(short, long)]
    algorithm: String,

    /// Depth limit for blind search (-1 for none), or heuristic (h0, h1, h2) for Greedy/A*
    #[clap(short, long, allow_hyphen_values = true)]
    param: SearchParam,

    /// Cancel each puzzle's search after this many seconds (Ctrl-C cancels the current one)
    #[clap(long)]
    time_limit: Option<f64>,

    /// Seed for the random searcher
    #[clap(long)]
    seed: Option<u64>,

    /// Print the searcher's frontier statistics after each puzzle
    #[clap(short, long)]
    verbose: bool,

    /// Path to the puzzle file (one 9-digit board per line)
    puzzle_file: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let puzzles = match read_puzzle_file(&args.puzzle_file) {
        Ok(puzzles) => puzzles,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut searcher = match try_create_searcher(&args.algorithm, args.param) {
        Ok(searcher) => searcher,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(seed) = args.seed {
        searcher = searcher.with_seed(seed);
    }

    let time_limit = match args.time_limit.map(Duration::try_from_secs_f64).transpose() {
        Ok(limit) => limit,
        Err(e) => {
            eprintln!("Invalid time limit: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let interrupt = Interrupt::install().unwrap_or_else(|e| {
        eprintln!("{}; Ctrl-C will not stop a search", e);
        Interrupt::default()
    });

    println!(
        "Evaluating {} puzzles from {} with {}\n",
        puzzles.len(),
        args.puzzle_file.display(),
        searcher
    );

    let mut summary = BatchSummary::new();
    let started = Instant::now();

    for puzzle in &puzzles {
        let board = match Board::new(puzzle) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("{}: skipped, {}", puzzle, e);
                summary.record_unsolved();
                continue;
            }
        };

        interrupt.reset();
        let watchdog = time_limit.map(|limit| Watchdog::sharing(interrupt.shared_flag(), limit));
        let outcome = searcher.find_solution(&board, Some(interrupt.flag()));
        drop(watchdog);

        match outcome {
            SearchOutcome::Found(solution) => {
                println!(
                    "{}: {} moves, {} states tested",
                    puzzle,
                    solution.num_moves,
                    searcher.num_tested()
                );
                summary.record_solved(solution.num_moves, searcher.num_tested());
            }
            SearchOutcome::Exhausted => {
                println!("{}: no solution", puzzle);
                summary.record_unsolved();
            }
            SearchOutcome::Cancelled => {
                println!(
                    "{}: search terminated after {} states, no solution",
                    puzzle,
                    searcher.num_tested()
                );
                summary.record_unsolved();
            }
        }
        if args.verbose {
            println!("  {}", searcher);
        }
    }

    println!();
    println!("{}", summary);
    println!(
        "{} of {} puzzles in {:.3} secs",
        searcher.algorithm(),
        summary.puzzles,
        started.elapsed().as_secs_f64()
    );
    ExitCode::SUCCESS
}
