use crate::error::{Error, Result};
use crate::state::State;
use std::fmt;
use std::str::FromStr;

/// A heuristic estimates how many moves remain between a state and the goal.
pub type HeuristicFn = fn(&State) -> u32;

/// Always returns 0.
///
/// With this heuristic Greedy search has no preference at all, and A* orders states by
/// move count alone, which makes it behave like breadth-first search.
pub fn h0(_state: &State) -> u32 {
    0
}

/// Counts the tiles that are not on their goal cell.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::heuristics::h1;
/// use eight_puzzle_solver::state::State;
///
/// let state = State::root(Board::new("142506378").unwrap());
/// assert_eq!(h1(&state), 5);
/// ```
pub fn h1(state: &State) -> u32 {
    state.board().num_misplaced()
}

/// Sums the Manhattan distances of all tiles to their goal cells.
///
/// Never overestimates the remaining moves and never drops by more than one per move,
/// so A* with `h2` returns optimal solutions.
pub fn h2(state: &State) -> u32 {
    state.board().manhattan_distance()
}

/// The heuristics an informed searcher can be configured with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// `h0`
    Zero,
    /// `h1`
    Misplaced,
    /// `h2`
    Manhattan,
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] = [Heuristic::Zero, Heuristic::Misplaced, Heuristic::Manhattan];

    /// Returns the short name used on the command line (`"h0"`, `"h1"`, `"h2"`).
    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Zero => "h0",
            Heuristic::Misplaced => "h1",
            Heuristic::Manhattan => "h2",
        }
    }

    pub fn function(&self) -> HeuristicFn {
        match self {
            Heuristic::Zero => h0,
            Heuristic::Misplaced => h1,
            Heuristic::Manhattan => h2,
        }
    }

    pub fn evaluate(&self, state: &State) -> u32 {
        (self.function())(state)
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    /// Accepts the short names as well as `zero`, `misplaced` and `manhattan`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h0" | "zero" => Ok(Heuristic::Zero),
            "h1" | "misplaced" => Ok(Heuristic::Misplaced),
            "h2" | "manhattan" => Ok(Heuristic::Manhattan),
            _ => Err(Error::UnknownHeuristic {
                name: s.to_string(),
            }),
        }
    }
}
