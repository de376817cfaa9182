//! # Eight Puzzle Solver Library
//!
//! This library solves the Eight Puzzle (the 3x3 sliding-tile puzzle) by state-space
//! search: starting from a scrambled board it looks for a sequence of blank moves that
//! reaches the goal board `012345678`.
//!
//! It is used by three binaries:
//! - `puzzle_solver`: Solves one board given on the command line.
//! - `batch_evaluator`: Solves every board in a file and prints summary statistics.
//! - `eight_puzzle`: Prompts interactively for boards and algorithms.
//!
//! ## Modules
//! - `engine`: Contains the board representation (`Board`) and blank moves (`Direction`).
//! - `state`: Provides search-tree nodes (`State`) and the arena that owns them (`SearchTree`).
//! - `heuristics`: Defines the heuristic functions `h0`, `h1` and `h2` used by informed search.
//! - `solver`: Provides the `Searcher` for the random, BFS, DFS, Greedy and A* algorithms,
//!   and `create_searcher` to build one by name.
//! - `utils`: Provides puzzle-file reading, batch statistics and the Ctrl-C and time-limit
//!   cancellation helpers.
//! - `error`: Defines the crate's `Error` type.
//!
//! ## Example
//! ```
//! use eight_puzzle_solver::engine::Board;
//! use eight_puzzle_solver::heuristics::Heuristic;
//! use eight_puzzle_solver::solver::{create_searcher, SearchOutcome};
//!
//! let board = Board::new("125340678").unwrap();
//! let mut searcher = create_searcher("A*", Heuristic::Manhattan).unwrap();
//! match searcher.solve(&board) {
//!     SearchOutcome::Found(solution) => assert_eq!(solution.num_moves, 3),
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod state;
pub mod utils;

pub use error::{Error, Result};
