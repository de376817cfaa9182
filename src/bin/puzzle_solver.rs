use clap::Parser;
use eight_puzzle_solver::engine::Board;
use eight_puzzle_solver::solver::{try_create_searcher, SearchOutcome, SearchParam};
use eight_puzzle_solver::utils::{Interrupt, Watchdog};
use std::process::ExitCode;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search algorithm: random, BFS, DFS, Greedy or A*
    #[clap(short, long)]
    algorithm: String,

    /// Depth limit for blind search (-1 for none), or heuristic (h0, h1, h2) for Greedy/A*
    #[clap(short, long, allow_hyphen_values = true)]
    param: SearchParam,

    /// Cancel the search after this many seconds (Ctrl-C also cancels it)
    #[clap(long)]
    time_limit: Option<f64>,

    /// Seed for the random searcher
    #[clap(long)]
    seed: Option<u64>,

    /// Print every move of the solution
    #[clap(long)]
    show_moves: bool,

    /// Print the searcher's frontier statistics after the run
    #[clap(short, long)]
    verbose: bool,

    /// Initial board as 9 digits in row-major order, 0 for the blank (e.g. 142506378)
    board: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let board = match Board::new(&args.board) {
        Ok(board) => board,
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

    println!("Initial board:\n{}", board);
    println!("Searching with {}...\n", searcher);

    let watchdog = time_limit.map(|limit| Watchdog::sharing(interrupt.shared_flag(), limit));
    let started = Instant::now();
    let outcome = searcher.find_solution(&board, Some(interrupt.flag()));
    let elapsed = started.elapsed();
    let timed_out = watchdog.as_ref().is_some_and(Watchdog::fired);
    drop(watchdog);

    println!(
        "{} time = {:.3} secs, {} states",
        searcher.algorithm(),
        elapsed.as_secs_f64(),
        searcher.num_tested()
    );
    if args.verbose {
        println!("{}", searcher);
    }

    match outcome {
        SearchOutcome::Found(solution) => {
            println!("Found a solution requiring {} moves.", solution.num_moves);
            if args.show_moves {
                println!();
                print!("{}", solution);
            } else {
                let moves: Vec<&str> = solution.moves.iter().map(|m| m.as_str()).collect();
                println!("Moves: {}", moves.join(" "));
            }
        }
        SearchOutcome::Exhausted => println!("Failed to find a solution."),
        SearchOutcome::Cancelled => {
            let reason = if timed_out { "time limit reached" } else { "interrupted" };
            println!("Search terminated ({}).", reason);
        }
    }
    ExitCode::SUCCESS
}
