use eight_puzzle_solver::engine::Board;
use eight_puzzle_solver::solver::{try_create_searcher, SearchOutcome, SearchParam};
use eight_puzzle_solver::utils::{Interrupt, Watchdog};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Searches that run longer than this are cancelled.
const TIME_LIMIT: Duration = Duration::from_secs(60);

/// Prints `message` and reads one trimmed line. Returns `None` on end of input.
fn prompt(message: &str) -> Option<String> {
    print!("{}", message);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn main() {
    println!("Welcome to the Eight Puzzle solver!");
    println!("Boards are 9 digits in row-major order with 0 for the blank, e.g. 142506378.");
    println!("Press Ctrl-C to stop a long search.");

    let interrupt = Interrupt::install().unwrap_or_else(|e| {
        eprintln!("{}; Ctrl-C will not stop a search", e);
        Interrupt::default()
    });

    loop {
        println!("---------------------");
        let Some(board_input) = prompt("Enter a board, or 'q' to quit: ") else {
            break;
        };
        if board_input == "q" {
            println!("Goodbye!");
            break;
        }

        let board = match Board::new(&board_input) {
            Ok(board) => board,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        println!("{}", board);

        let Some(algorithm) = prompt("Algorithm (random, BFS, DFS, Greedy, A*): ") else {
            break;
        };
        let Some(param_input) = prompt("Depth limit (-1 for none) or heuristic (h0, h1, h2): ")
        else {
            break;
        };

        let param = match param_input.parse::<SearchParam>() {
            Ok(param) => param,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        let mut searcher = match try_create_searcher(&algorithm, param) {
            Ok(searcher) => searcher,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        interrupt.reset();
        let watchdog = Watchdog::sharing(interrupt.shared_flag(), TIME_LIMIT);
        let started = Instant::now();
        let outcome = searcher.find_solution(&board, Some(interrupt.flag()));
        let elapsed = started.elapsed();
        let timed_out = watchdog.fired();
        drop(watchdog);

        print!("{} time = {:.3} secs, ", searcher.algorithm(), elapsed.as_secs_f64());
        println!("{} states", searcher.num_tested());

        match outcome {
            SearchOutcome::Found(solution) => {
                println!("Found a solution requiring {} moves.", solution.num_moves);
                if let Some(answer) = prompt("Show the moves (y/n)? ") {
                    if answer == "y" {
                        print!("{}", solution);
                    }
                }
            }
            SearchOutcome::Exhausted => println!("Failed to find a solution."),
            SearchOutcome::Cancelled if timed_out => {
                println!("Search terminated after {} secs.", TIME_LIMIT.as_secs());
            }
            SearchOutcome::Cancelled => println!("Search terminated."),
        }
    }
}
