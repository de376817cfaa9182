//! State-space search over Eight Puzzle boards.
//!
//! Every algorithm shares the loop in `Searcher::find_solution`; they differ only in the
//! frontier that stores generated states and decides which one is tested next:
//!
//! | Algorithm | Frontier | Next state |
//! |---|---|---|
//! | `random` | list | uniformly random element |
//! | `BFS` | queue | earliest inserted |
//! | `DFS` | stack | most recently inserted |
//! | `Greedy` | priority heap, `-h(s)` | highest priority, earliest inserted on ties |
//! | `A*` | priority heap, `-(h(s) + moves(s))` | same as `Greedy` |
use crate::engine::{Board, Direction};
use crate::error::{Error, Result};
use crate::heuristics::Heuristic;
use crate::state::{MoveLabel, SearchTree, State, StateId};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

/// The search algorithms a `Searcher` can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Random,
    BreadthFirst,
    DepthFirst,
    Greedy,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Random,
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
        Algorithm::Greedy,
        Algorithm::AStar,
    ];

    /// Returns the name accepted by `create_searcher` (`"random"`, `"BFS"`, `"DFS"`,
    /// `"Greedy"`, `"A*"`).
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Random => "random",
            Algorithm::BreadthFirst => "BFS",
            Algorithm::DepthFirst => "DFS",
            Algorithm::Greedy => "Greedy",
            Algorithm::AStar => "A*",
        }
    }

    /// Informed algorithms take a heuristic instead of a depth limit.
    pub fn is_informed(&self) -> bool {
        matches!(self, Algorithm::Greedy | Algorithm::AStar)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "random" => Ok(Algorithm::Random),
            "BFS" => Ok(Algorithm::BreadthFirst),
            "DFS" => Ok(Algorithm::DepthFirst),
            "Greedy" => Ok(Algorithm::Greedy),
            "A*" => Ok(Algorithm::AStar),
            _ => Err(Error::UnknownAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

/// The algorithm-specific parameter of a searcher.
///
/// Blind searches take a depth limit and informed searches take a heuristic. Integers
/// convert into a depth limit, with any negative value meaning "no limit".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchParam {
    Depth(Option<u32>),
    Heuristic(Heuristic),
}

impl From<i32> for SearchParam {
    fn from(limit: i32) -> Self {
        SearchParam::Depth(u32::try_from(limit).ok())
    }
}

impl From<u32> for SearchParam {
    fn from(limit: u32) -> Self {
        SearchParam::Depth(Some(limit))
    }
}

impl From<Option<u32>> for SearchParam {
    fn from(limit: Option<u32>) -> Self {
        SearchParam::Depth(limit)
    }
}

impl From<Heuristic> for SearchParam {
    fn from(heuristic: Heuristic) -> Self {
        SearchParam::Heuristic(heuristic)
    }
}

impl FromStr for SearchParam {
    type Err = Error;

    /// Parses an integer as a depth limit and anything else as a heuristic name.
    ///
    /// Negative integers mean "no limit"; integers above `u32::MAX` are rejected.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let is_integer = {
            let digits = s.strip_prefix(&['-', '+'][..]).unwrap_or(s);
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        };
        if !is_integer {
            return s.parse::<Heuristic>().map(SearchParam::Heuristic);
        }
        if s.starts_with('-') {
            return Ok(SearchParam::Depth(None));
        }
        s.parse::<u32>()
            .map(|limit| SearchParam::Depth(Some(limit)))
            .map_err(|_| Error::InvalidDepthLimit {
                value: s.to_string(),
                max: u32::MAX,
            })
    }
}

/// Computes a frontier priority from a heuristic value and a move count.
/// Higher priorities are tested first.
pub type PriorityFn = fn(heuristic: u32, num_moves: u32) -> i64;

/// Greedy best-first priority: only the estimated distance to the goal counts.
pub fn greedy_priority(heuristic: u32, _num_moves: u32) -> i64 {
    -i64::from(heuristic)
}

/// A* priority: moves made so far plus the estimated moves remaining.
pub fn astar_priority(heuristic: u32, num_moves: u32) -> i64 {
    -(i64::from(heuristic) + i64::from(num_moves))
}

/// Heap entry for the informed frontier.
///
/// Orders by priority, then by insertion order so that the earliest inserted of several
/// equal-priority states is popped first.
#[derive(Clone, Copy, Debug)]
struct Ranked {
    priority: i64,
    order: u64,
    id: StateId,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.order == other.order
    }
}

impl Eq for Ranked {}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Untested states, held in the container that matches the algorithm.
#[derive(Debug)]
enum Frontier {
    Random {
        states: Vec<StateId>,
        rng: SmallRng,
    },
    Fifo(VecDeque<StateId>),
    Lifo(Vec<StateId>),
    Ranked {
        heap: BinaryHeap<Ranked>,
        next_order: u64,
        heuristic: Heuristic,
        priority: PriorityFn,
    },
}

impl Frontier {
    fn push(&mut self, id: StateId, state: &State) {
        match self {
            Frontier::Random { states, .. } => states.push(id),
            Frontier::Fifo(queue) => queue.push_back(id),
            Frontier::Lifo(stack) => stack.push(id),
            Frontier::Ranked {
                heap,
                next_order,
                heuristic,
                priority,
            } => {
                let rank = (*priority)(heuristic.evaluate(state), state.num_moves());
                heap.push(Ranked {
                    priority: rank,
                    order: *next_order,
                    id,
                });
                *next_order += 1;
            }
        }
    }

    fn pop(&mut self) -> Option<StateId> {
        match self {
            Frontier::Random { states, rng } => {
                if states.is_empty() {
                    None
                } else {
                    let index = rng.gen_range(0..states.len());
                    Some(states.swap_remove(index))
                }
            }
            Frontier::Fifo(queue) => queue.pop_front(),
            Frontier::Lifo(stack) => stack.pop(),
            Frontier::Ranked { heap, .. } => heap.pop().map(|entry| entry.id),
        }
    }

    fn len(&self) -> usize {
        match self {
            Frontier::Random { states, .. } => states.len(),
            Frontier::Fifo(queue) => queue.len(),
            Frontier::Lifo(stack) => stack.len(),
            Frontier::Ranked { heap, .. } => heap.len(),
        }
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self) {
        match self {
            Frontier::Random { states, .. } => states.clear(),
            Frontier::Fifo(queue) => queue.clear(),
            Frontier::Lifo(stack) => stack.clear(),
            Frontier::Ranked {
                heap, next_order, ..
            } => {
                heap.clear();
                *next_order = 0;
            }
        }
    }
}

/// A path from the initial board to the goal found by a searcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Blank moves in the order they are applied to the initial board.
    pub moves: Vec<Direction>,
    /// Every board along the path, starting with the initial board and ending with the goal.
    pub boards: Vec<Board>,
    /// The number of moves in the solution.
    pub num_moves: u32,
}

impl Solution {
    /// Returns the move labels along the path, beginning with `init`.
    pub fn labels(&self) -> Vec<MoveLabel> {
        std::iter::once(MoveLabel::Init)
            .chain(self.moves.iter().map(|&direction| MoveLabel::Blank(direction)))
            .collect()
    }
}

impl fmt::Display for Solution {
    /// Lists every step as its move label followed by the resulting board.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, board) in self.labels().iter().zip(&self.boards) {
            writeln!(f, "{}:", label)?;
            writeln!(f, "{}", board)?;
        }
        Ok(())
    }
}

/// How a search run ended.
///
/// Only `Found` carries a path; in every case the searcher's `num_tested()` reports how
/// many states were tested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Solution),
    /// The frontier ran empty without reaching the goal.
    Exhausted,
    /// The cancellation flag was raised before the goal was reached.
    Cancelled,
}

impl SearchOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Found(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

/// Performs state-space search on Eight Puzzle boards.
///
/// A searcher owns the states of its current run. Calling `find_solution` again starts a
/// fresh run and discards the previous tree.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::heuristics::Heuristic;
/// use eight_puzzle_solver::solver::Searcher;
///
/// let board = Board::new("142358607").unwrap();
/// let mut searcher = Searcher::astar(Heuristic::Manhattan);
/// let outcome = searcher.solve(&board);
/// assert_eq!(outcome.solution().unwrap().num_moves, 5);
/// assert_eq!(searcher.num_tested(), 6);
/// ```
#[derive(Debug)]
pub struct Searcher {
    algorithm: Algorithm,
    depth_limit: Option<u32>,
    frontier: Frontier,
    tree: SearchTree,
    num_tested: u64,
}

impl Searcher {
    fn with_frontier(algorithm: Algorithm, depth_limit: Option<u32>, frontier: Frontier) -> Self {
        Searcher {
            algorithm,
            depth_limit,
            frontier,
            tree: SearchTree::new(),
            num_tested: 0,
        }
    }

    /// Creates a searcher that tests a uniformly random untested state at every step.
    ///
    /// The random source is seeded from the operating system; use `with_seed` for
    /// reproducible runs.
    pub fn random(depth_limit: Option<u32>) -> Self {
        let frontier = Frontier::Random {
            states: Vec::new(),
            rng: SmallRng::from_entropy(),
        };
        Self::with_frontier(Algorithm::Random, depth_limit, frontier)
    }

    /// Creates a breadth-first searcher.
    pub fn bfs(depth_limit: Option<u32>) -> Self {
        Self::with_frontier(
            Algorithm::BreadthFirst,
            depth_limit,
            Frontier::Fifo(VecDeque::new()),
        )
    }

    /// Creates a depth-first searcher.
    pub fn dfs(depth_limit: Option<u32>) -> Self {
        Self::with_frontier(Algorithm::DepthFirst, depth_limit, Frontier::Lifo(Vec::new()))
    }

    /// Creates a greedy best-first searcher. Informed searchers never use a depth limit.
    pub fn greedy(heuristic: Heuristic) -> Self {
        Self::informed(Algorithm::Greedy, heuristic, greedy_priority)
    }

    /// Creates an A* searcher, which is greedy search ranked by `astar_priority`.
    pub fn astar(heuristic: Heuristic) -> Self {
        Self::informed(Algorithm::AStar, heuristic, astar_priority)
    }

    fn informed(algorithm: Algorithm, heuristic: Heuristic, priority: PriorityFn) -> Self {
        let frontier = Frontier::Ranked {
            heap: BinaryHeap::new(),
            next_order: 0,
            heuristic,
            priority,
        };
        Self::with_frontier(algorithm, None, frontier)
    }

    /// Replaces the random source of a `random` searcher with one seeded by `seed`.
    /// Other searchers are returned unchanged.
    pub fn with_seed(mut self, seed: u64) -> Self {
        if let Frontier::Random { rng, .. } = &mut self.frontier {
            *rng = SmallRng::seed_from_u64(seed);
        }
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the depth limit, `None` meaning unbounded.
    pub fn depth_limit(&self) -> Option<u32> {
        self.depth_limit
    }

    pub fn heuristic(&self) -> Option<Heuristic> {
        match &self.frontier {
            Frontier::Ranked { heuristic, .. } => Some(*heuristic),
            _ => None,
        }
    }

    /// Returns the number of states tested by the current or most recent run.
    pub fn num_tested(&self) -> u64 {
        self.num_tested
    }

    /// Returns the number of states waiting in the frontier.
    pub fn num_untested(&self) -> usize {
        self.frontier.len()
    }

    /// Returns the states created so far in the current or most recent run.
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Stores `state` in the search tree and puts it on the frontier.
    ///
    /// A state with a parent must be a successor of a state already added to this
    /// searcher.
    pub fn add_state(&mut self, state: State) -> StateId {
        let id = self.tree.insert(state);
        self.frontier.push(id, self.tree.get(id));
        id
    }

    /// Decides whether a candidate state is worth adding to the frontier.
    ///
    /// # Returns
    /// `false` if the state is deeper than the depth limit, or if its board already
    /// occurs on its own path from the initial state; `true` otherwise.
    pub fn should_add(&self, state: &State) -> bool {
        if self
            .depth_limit
            .is_some_and(|limit| state.num_moves() > limit)
        {
            return false;
        }
        !self.tree.creates_cycle(state)
    }

    /// Adds every state from `states` that passes `should_add`, in order.
    pub fn add_states(&mut self, states: impl IntoIterator<Item = State>) {
        for state in states {
            if self.should_add(&state) {
                self.add_state(state);
            }
        }
    }

    /// Removes the next state to test from the frontier, or `None` if it is empty.
    pub fn next_state(&mut self) -> Option<StateId> {
        self.frontier.pop()
    }

    /// Searches for a path from `init` to the goal board.
    ///
    /// The loop tests one state per iteration: it pops a state from the frontier, returns
    /// it if it is the goal, and otherwise adds its successors. Before each iteration it
    /// checks `cancel`; once the flag reads `true` the search stops and reports
    /// `SearchOutcome::Cancelled`. `num_tested()` is valid afterwards in every outcome.
    ///
    /// # Arguments
    /// * `init`: The initial board. It becomes the root of a fresh search tree.
    /// * `cancel`: An optional cancellation flag, typically raised from another thread.
    pub fn find_solution(&mut self, init: &Board, cancel: Option<&AtomicBool>) -> SearchOutcome {
        self.tree.clear();
        self.frontier.clear();
        self.num_tested = 0;

        self.add_state(State::root(init.copy()));

        while !self.frontier.is_empty() {
            if cancel.is_some_and(|flag| flag.load(AtomicOrdering::Relaxed)) {
                return SearchOutcome::Cancelled;
            }

            self.num_tested += 1;
            let Some(id) = self.next_state() else {
                break;
            };

            if self.tree.get(id).is_goal() {
                return SearchOutcome::Found(self.solution_for(id));
            }

            let successors = self.tree.generate_successors(id);
            self.add_states(successors);
        }

        SearchOutcome::Exhausted
    }

    /// Runs `find_solution` without a cancellation flag.
    pub fn solve(&mut self, init: &Board) -> SearchOutcome {
        self.find_solution(init, None)
    }

    fn solution_for(&self, id: StateId) -> Solution {
        let boards = self
            .tree
            .path_to(id)
            .into_iter()
            .map(|step| self.tree.get(step).board().copy())
            .collect();
        Solution {
            moves: self.tree.moves_to(id),
            boards,
            num_moves: self.tree.get(id).num_moves(),
        }
    }
}

impl fmt::Display for Searcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} untested, {} tested, ",
            self.algorithm,
            self.num_untested(),
            self.num_tested
        )?;
        match (self.heuristic(), self.depth_limit) {
            (Some(heuristic), _) => write!(f, "heuristic {}", heuristic),
            (None, Some(limit)) => write!(f, "depth limit = {}", limit),
            (None, None) => write!(f, "no depth limit"),
        }
    }
}

/// Creates the searcher named by `algorithm`, configured with `param`.
///
/// `algorithm` is one of `random`, `BFS`, `DFS`, `Greedy` or `A*` (case-insensitive).
/// Blind searches expect a depth limit and informed searches a heuristic.
///
/// # Returns
/// `None` if the algorithm is unknown or `param` is the wrong kind for it. Use
/// `try_create_searcher` to find out which.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::heuristics::Heuristic;
/// use eight_puzzle_solver::solver::create_searcher;
///
/// assert!(create_searcher("BFS", -1).is_some());
/// assert!(create_searcher("A*", Heuristic::Manhattan).is_some());
/// assert!(create_searcher("nonsense", 0).is_none());
/// ```
pub fn create_searcher(algorithm: &str, param: impl Into<SearchParam>) -> Option<Searcher> {
    try_create_searcher(algorithm, param).ok()
}

/// Like `create_searcher`, but reports why no searcher could be built.
///
/// # Returns
/// * `Err(Error::UnknownAlgorithm)` if `algorithm` is not a known name.
/// * `Err(Error::ParameterMismatch)` if `param` is the wrong kind for the algorithm.
pub fn try_create_searcher(algorithm: &str, param: impl Into<SearchParam>) -> Result<Searcher> {
    let algorithm = algorithm.parse::<Algorithm>()?;
    match (algorithm, param.into()) {
        (Algorithm::Random, SearchParam::Depth(limit)) => Ok(Searcher::random(limit)),
        (Algorithm::BreadthFirst, SearchParam::Depth(limit)) => Ok(Searcher::bfs(limit)),
        (Algorithm::DepthFirst, SearchParam::Depth(limit)) => Ok(Searcher::dfs(limit)),
        (Algorithm::Greedy, SearchParam::Heuristic(h)) => Ok(Searcher::greedy(h)),
        (Algorithm::AStar, SearchParam::Heuristic(h)) => Ok(Searcher::astar(h)),
        (algorithm, _) => Err(Error::ParameterMismatch {
            algorithm: algorithm.name().to_string(),
            expected: if algorithm.is_informed() {
                "a heuristic (h0, h1 or h2)"
            } else {
                "an integer depth limit (-1 for none)"
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn board(digits: &str) -> Board {
        Board::new(digits).unwrap()
    }

    fn found_moves(outcome: &SearchOutcome) -> u32 {
        outcome
            .solution()
            .expect("expected a solution")
            .num_moves
    }

    /// Replays `solution` on its initial board and checks that it ends on the goal.
    fn assert_solution_replays(initial: &Board, solution: &Solution) {
        let mut current = initial.copy();
        assert_eq!(&solution.boards[0], initial);
        for (step, &direction) in solution.moves.iter().enumerate() {
            assert!(current.move_blank(direction), "illegal move at step {}", step);
            assert_eq!(current, solution.boards[step + 1]);
        }
        assert!(current.is_goal());
        assert_eq!(solution.moves.len() as u32, solution.num_moves);
        assert_eq!(solution.boards.len(), solution.moves.len() + 1);
    }

    #[test]
    fn test_goal_at_root_for_every_algorithm() {
        let goal = Board::goal();
        let mut searchers = vec![
            Searcher::random(None).with_seed(1),
            Searcher::bfs(None),
            Searcher::dfs(Some(0)),
        ];
        for heuristic in Heuristic::ALL {
            searchers.push(Searcher::greedy(heuristic));
            searchers.push(Searcher::astar(heuristic));
        }
        for mut searcher in searchers {
            let outcome = searcher.solve(&goal);
            let solution = outcome.solution().unwrap();
            assert_eq!(solution.num_moves, 0);
            assert!(solution.moves.is_empty());
            assert_eq!(solution.boards, vec![Board::goal()]);
            assert_eq!(searcher.num_tested(), 1, "{}", searcher.algorithm());
        }
    }

    #[test]
    fn test_bfs_finds_shortest_solution() {
        let initial = board("125340678");
        let mut searcher = Searcher::bfs(None);
        let outcome = searcher.solve(&initial);
        let solution = outcome.solution().unwrap();
        assert_eq!(
            solution.moves,
            vec![Direction::Up, Direction::Left, Direction::Left]
        );
        assert_eq!(searcher.num_tested(), 11);
        assert_solution_replays(&initial, solution);
    }

    #[test]
    fn test_bfs_and_astar_agree_on_optimal_length() {
        let initial = board("142506378");

        let mut bfs = Searcher::bfs(None);
        let bfs_outcome = bfs.solve(&initial);
        assert_eq!(found_moves(&bfs_outcome), 12);
        assert_eq!(bfs.num_tested(), 3325);

        let mut astar = Searcher::astar(Heuristic::Manhattan);
        let astar_outcome = astar.solve(&initial);
        assert_eq!(found_moves(&astar_outcome), 12);
        assert_eq!(astar.num_tested(), 45);
        assert_solution_replays(&initial, astar_outcome.solution().unwrap());
    }

    #[test]
    fn test_astar_optimal_on_several_boards() {
        let cases = [
            ("102345678", 1),
            ("312045678", 1),
            ("125340678", 3),
            ("142358607", 5),
            ("142506378", 12),
            ("123450678", 15),
        ];
        for (digits, optimal) in cases {
            let initial = board(digits);
            for heuristic in [Heuristic::Misplaced, Heuristic::Manhattan] {
                let mut searcher = Searcher::astar(heuristic);
                let outcome = searcher.solve(&initial);
                assert_eq!(found_moves(&outcome), optimal, "{} with {}", digits, heuristic);
                assert_solution_replays(&initial, outcome.solution().unwrap());
            }
        }
    }

    #[test]
    fn test_astar_with_h0_matches_bfs() {
        let initial = board("142506378");
        let mut astar = Searcher::astar(Heuristic::Zero);
        let outcome = astar.solve(&initial);
        assert_eq!(found_moves(&outcome), 12);
        assert_eq!(astar.num_tested(), 3325);
    }

    #[test]
    fn test_better_heuristic_tests_fewer_states() {
        let initial = board("123450678");
        let mut misplaced = Searcher::astar(Heuristic::Misplaced);
        let mut manhattan = Searcher::astar(Heuristic::Manhattan);
        misplaced.solve(&initial);
        manhattan.solve(&initial);
        assert_eq!(misplaced.num_tested(), 604);
        assert_eq!(manhattan.num_tested(), 193);
    }

    #[test]
    fn test_greedy_solution_is_valid_but_not_optimal() {
        let initial = board("142506378");
        let mut searcher = Searcher::greedy(Heuristic::Manhattan);
        let outcome = searcher.solve(&initial);
        let solution = outcome.solution().unwrap();
        assert_eq!(solution.num_moves, 34);
        assert_eq!(searcher.num_tested(), 1371);
        assert_solution_replays(&initial, solution);
    }

    #[test]
    fn test_dfs_with_depth_limit_terminates() {
        let initial = board("123450678");
        let mut searcher = Searcher::dfs(Some(20));
        let outcome = searcher.solve(&initial);
        let solution = outcome.solution().unwrap();
        assert!(solution.num_moves <= 20);
        assert_eq!(solution.num_moves, 17);
        assert_eq!(searcher.num_tested(), 5117);
        assert_solution_replays(&initial, solution);
    }

    #[test]
    fn test_dfs_small_depth_limit() {
        let mut searcher = Searcher::dfs(Some(3));
        let outcome = searcher.solve(&board("125340678"));
        assert_eq!(found_moves(&outcome), 3);
        assert_eq!(searcher.num_tested(), 18);
    }

    #[test]
    fn test_depth_limit_exhausts_search() {
        let initial = board("142506378");

        let mut bfs = Searcher::bfs(Some(3));
        assert_eq!(bfs.solve(&initial), SearchOutcome::Exhausted);
        assert_eq!(bfs.num_tested(), 21);
        assert_eq!(bfs.num_untested(), 0);

        let mut dfs = Searcher::dfs(Some(5));
        assert_eq!(dfs.solve(&initial), SearchOutcome::Exhausted);
        assert_eq!(dfs.num_tested(), 69);
    }

    #[test]
    fn test_unsolvable_board_exhausts_with_limit() {
        // Swapping two tiles of the goal gives an odd permutation, which cannot be solved.
        let mut searcher = Searcher::bfs(Some(4));
        let outcome = searcher.solve(&board("021345678"));
        assert_eq!(outcome, SearchOutcome::Exhausted);
        assert!(!outcome.is_found());
        assert!(searcher.num_tested() > 1);
    }

    #[test]
    fn test_random_search_is_reproducible_with_seed() {
        let initial = board("125340678");
        let mut first = Searcher::random(Some(5)).with_seed(42);
        let mut second = Searcher::random(Some(5)).with_seed(42);
        let first_outcome = first.solve(&initial);
        let second_outcome = second.solve(&initial);

        assert_eq!(first_outcome, second_outcome);
        assert_eq!(first.num_tested(), second.num_tested());

        let solution = first_outcome.solution().unwrap();
        assert!(solution.num_moves <= 5);
        assert_solution_replays(&initial, solution);
    }

    #[test]
    fn test_cancel_before_start() {
        let flag = AtomicBool::new(true);
        let mut searcher = Searcher::bfs(None);
        let outcome = searcher.find_solution(&board("142506378"), Some(&flag));
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(searcher.num_tested(), 0);
        assert_eq!(searcher.num_untested(), 1);
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let flag = Arc::new(AtomicBool::new(false));
        let flag_for_thread = Arc::clone(&flag);
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            flag_for_thread.store(true, AtomicOrdering::Relaxed);
        });

        // Unsolvable and unbounded: only the flag can stop this search.
        let mut searcher = Searcher::bfs(None);
        let outcome = searcher.find_solution(&board("021345678"), Some(flag.as_ref()));
        canceller.join().unwrap();

        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert!(searcher.num_tested() > 0);
    }

    #[test]
    fn test_searcher_is_reusable() {
        let mut searcher = Searcher::bfs(None);
        assert_eq!(found_moves(&searcher.solve(&board("125340678"))), 3);
        assert_eq!(searcher.num_tested(), 11);
        assert_eq!(found_moves(&searcher.solve(&board("102345678"))), 1);
        assert_eq!(searcher.num_tested(), 3);
        assert_eq!(searcher.tree().get(0).board(), &board("102345678"));
    }

    #[test]
    fn test_should_add_respects_depth_limit() {
        let mut searcher = Searcher::bfs(Some(1));
        let root = searcher.add_state(State::root(board("142506378")));
        let children = searcher.tree().generate_successors(root);
        assert!(children.iter().all(|child| searcher.should_add(child)));

        let child = searcher.add_state(children[0].clone());
        let grandchildren = searcher.tree().generate_successors(child);
        assert!(grandchildren.iter().all(|g| !searcher.should_add(g)));
    }

    #[test]
    fn test_should_add_rejects_cycles() {
        let mut searcher = Searcher::dfs(None);
        let root = searcher.add_state(State::root(board("142506378")));
        let up = searcher.tree().generate_successors(root)[0].clone();
        let up_id = searcher.add_state(up);

        let grandchildren = searcher.tree().generate_successors(up_id);
        let accepted: Vec<bool> = grandchildren.iter().map(|g| searcher.should_add(g)).collect();
        // From 102546378 the blank can go down (back to the root), left or right.
        assert_eq!(grandchildren.len(), 3);
        assert_eq!(accepted, vec![false, true, true]);
    }

    #[test]
    fn test_add_states_filters_candidates() {
        let mut searcher = Searcher::bfs(None);
        let root = searcher.add_state(State::root(board("142506378")));
        assert_eq!(searcher.next_state(), Some(root));
        let up = searcher.tree().generate_successors(root)[0].clone();
        let up_id = searcher.add_state(up);
        assert_eq!(searcher.next_state(), Some(up_id));

        let grandchildren = searcher.tree().generate_successors(up_id);
        searcher.add_states(grandchildren);
        assert_eq!(searcher.num_untested(), 2);
    }

    #[test]
    fn test_blind_frontier_orders() {
        let boards = ["142506378", "102345678", "125340678"];

        let mut bfs = Searcher::bfs(None);
        let bfs_ids: Vec<StateId> = boards
            .iter()
            .map(|d| bfs.add_state(State::root(board(d))))
            .collect();
        let popped: Vec<StateId> = std::iter::from_fn(|| bfs.next_state()).collect();
        assert_eq!(popped, bfs_ids);

        let mut dfs = Searcher::dfs(None);
        let mut dfs_ids: Vec<StateId> = boards
            .iter()
            .map(|d| dfs.add_state(State::root(board(d))))
            .collect();
        let popped: Vec<StateId> = std::iter::from_fn(|| dfs.next_state()).collect();
        dfs_ids.reverse();
        assert_eq!(popped, dfs_ids);
    }

    #[test]
    fn test_random_frontier_returns_every_state_once() {
        let mut searcher = Searcher::random(None).with_seed(7);
        let mut ids: Vec<StateId> = ["142506378", "102345678", "125340678", "012345678"]
            .iter()
            .map(|d| searcher.add_state(State::root(board(d))))
            .collect();
        let mut popped: Vec<StateId> = std::iter::from_fn(|| searcher.next_state()).collect();
        popped.sort_unstable();
        ids.sort_unstable();
        assert_eq!(popped, ids);
        assert_eq!(searcher.next_state(), None);
    }

    #[test]
    fn test_ranked_frontier_prefers_low_heuristic_then_insertion_order() {
        let mut searcher = Searcher::greedy(Heuristic::Manhattan);
        let far = searcher.add_state(State::root(board("142506378"))); // h2 = 8
        let near_first = searcher.add_state(State::root(board("102345678"))); // h2 = 1
        let near_second = searcher.add_state(State::root(board("312045678"))); // h2 = 1
        let goal = searcher.add_state(State::root(Board::goal())); // h2 = 0

        let popped: Vec<StateId> = std::iter::from_fn(|| searcher.next_state()).collect();
        assert_eq!(popped, vec![goal, near_first, near_second, far]);
    }

    #[test]
    fn test_priority_functions() {
        assert_eq!(greedy_priority(8, 3), -8);
        assert_eq!(astar_priority(8, 3), -11);
        assert_eq!(greedy_priority(0, 0), 0);
        assert!(astar_priority(2, 1) > astar_priority(1, 3));
    }

    #[test]
    fn test_searcher_display() {
        let mut bfs = Searcher::bfs(Some(20));
        assert_eq!(bfs.to_string(), "BFS: 0 untested, 0 tested, depth limit = 20");
        bfs.solve(&board("102345678"));
        assert_eq!(bfs.to_string(), "BFS: 4 untested, 3 tested, depth limit = 20");

        assert_eq!(
            Searcher::dfs(None).to_string(),
            "DFS: 0 untested, 0 tested, no depth limit"
        );
        assert_eq!(
            Searcher::astar(Heuristic::Manhattan).to_string(),
            "A*: 0 untested, 0 tested, heuristic h2"
        );
    }

    #[test]
    fn test_create_searcher_by_name() {
        let bfs = create_searcher("BFS", 20).unwrap();
        assert_eq!(bfs.algorithm(), Algorithm::BreadthFirst);
        assert_eq!(bfs.depth_limit(), Some(20));

        let dfs = create_searcher("DFS", -1).unwrap();
        assert_eq!(dfs.algorithm(), Algorithm::DepthFirst);
        assert_eq!(dfs.depth_limit(), None);

        let random = create_searcher("random", 10).unwrap();
        assert_eq!(random.algorithm(), Algorithm::Random);

        let greedy = create_searcher("Greedy", Heuristic::Misplaced).unwrap();
        assert_eq!(greedy.algorithm(), Algorithm::Greedy);
        assert_eq!(greedy.depth_limit(), None);
        assert_eq!(greedy.heuristic(), Some(Heuristic::Misplaced));

        let astar = create_searcher("A*", Heuristic::Manhattan).unwrap();
        assert_eq!(astar.algorithm(), Algorithm::AStar);
        assert_eq!(astar.heuristic(), Some(Heuristic::Manhattan));
    }

    #[test]
    fn test_create_searcher_rejects_unknown_or_mismatched() {
        assert!(create_searcher("nonsense", 0).is_none());
        assert!(create_searcher("", -1).is_none());
        assert!(create_searcher("BFS", Heuristic::Manhattan).is_none());
        assert!(create_searcher("A*", 5).is_none());
    }

    #[test]
    fn test_try_create_searcher_reports_reason() {
        assert!(matches!(
            try_create_searcher("nonsense", 0),
            Err(Error::UnknownAlgorithm { ref name }) if name == "nonsense"
        ));
        let err = try_create_searcher("Greedy", 3).unwrap_err();
        assert!(matches!(err, Error::ParameterMismatch { .. }));
        assert_eq!(
            err.to_string(),
            "algorithm 'Greedy' expects a heuristic (h0, h1 or h2)"
        );
        let err = try_create_searcher("DFS", Heuristic::Zero).unwrap_err();
        assert!(err.to_string().contains("integer depth limit"));
    }

    #[test]
    fn test_algorithm_names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
        }
        for alias in ["bfs", "Bfs", "dfs", "greedy", "a*", "astar", "Random"] {
            assert!(
                matches!(alias.parse::<Algorithm>(), Err(Error::UnknownAlgorithm { .. })),
                "{} should be rejected",
                alias
            );
        }
        assert!(create_searcher("bfs", 3).is_none());
        assert!(matches!(
            "dijkstra".parse::<Algorithm>(),
            Err(Error::UnknownAlgorithm { .. })
        ));
        assert!(Algorithm::Greedy.is_informed());
        assert!(!Algorithm::DepthFirst.is_informed());
    }

    #[test]
    fn test_search_param_parsing() {
        assert_eq!("20".parse::<SearchParam>().unwrap(), SearchParam::Depth(Some(20)));
        assert_eq!("-1".parse::<SearchParam>().unwrap(), SearchParam::Depth(None));
        assert_eq!(
            "h2".parse::<SearchParam>().unwrap(),
            SearchParam::Heuristic(Heuristic::Manhattan)
        );
        assert!("deep".parse::<SearchParam>().is_err());
        assert_eq!(SearchParam::from(-5), SearchParam::Depth(None));
        assert_eq!(SearchParam::from(7u32), SearchParam::Depth(Some(7)));
    }

    #[test]
    fn test_search_param_rejects_oversized_depth() {
        assert_eq!(
            "4294967295".parse::<SearchParam>().unwrap(),
            SearchParam::Depth(Some(u32::MAX))
        );
        assert_eq!(
            "-5000000000".parse::<SearchParam>().unwrap(),
            SearchParam::Depth(None)
        );
        let err = "5000000000".parse::<SearchParam>().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidDepthLimit { ref value, .. } if value == "5000000000"
        ));
        assert!(matches!(
            "-".parse::<SearchParam>(),
            Err(Error::UnknownHeuristic { .. })
        ));
    }

    #[test]
    fn test_ranked_equality_matches_ordering() {
        let a = Ranked { priority: -3, order: 7, id: 1 };
        let b = Ranked { priority: -3, order: 7, id: 2 };
        let c = Ranked { priority: -3, order: 8, id: 1 };
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.cmp(&c), Ordering::Greater);
    }

    #[test]
    fn test_solution_labels_and_display() {
        let mut searcher = Searcher::bfs(None);
        let outcome = searcher.solve(&board("102345678"));
        let solution = outcome.solution().unwrap();
        assert_eq!(
            solution.labels(),
            vec![MoveLabel::Init, MoveLabel::Blank(Direction::Left)]
        );
        assert_eq!(
            solution.to_string(),
            "init:\n1 _ 2 \n3 4 5 \n6 7 8 \n\nleft:\n_ 1 2 \n3 4 5 \n6 7 8 \n\n"
        );
    }
}
