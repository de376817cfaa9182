//! Search-tree nodes for state-space search.
//!
//! A `State` wraps a `Board` together with how it was reached: its parent, the number of
//! moves from the initial board, and the move that produced it. All states created during
//! one search run live in a `SearchTree` arena and refer to their parent by index, so
//! ancestor walks (cycle checks, path reconstruction) are plain index chases.
use crate::engine::{Board, Direction};
use std::fmt;

/// Index of a `State` inside its `SearchTree`.
pub type StateId = usize;

/// Names the move that produced a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveLabel {
    /// The initial state of a search.
    Init,
    Blank(Direction),
}

impl fmt::Display for MoveLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveLabel::Init => write!(f, "init"),
            MoveLabel::Blank(direction) => write!(f, "{}", direction),
        }
    }
}

/// A node in the search tree.
///
/// A state owns its board outright; successors get their own copy. Once a state has been
/// inserted into a `SearchTree` it is never modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    board: Board,
    parent: Option<StateId>,
    num_moves: u32,
    last_move: MoveLabel,
}

impl State {
    /// Creates the root state of a search, with zero moves and the `init` label.
    pub fn root(board: Board) -> Self {
        State {
            board,
            parent: None,
            num_moves: 0,
            last_move: MoveLabel::Init,
        }
    }

    /// Creates a child of `parent`, which is stored at `parent_id`.
    ///
    /// # Arguments
    /// * `board`: The child's board, already moved.
    /// * `parent_id`: Index of the parent in the owning `SearchTree`.
    /// * `parent`: The parent state, used for the move count.
    /// * `direction`: The blank move that turned the parent's board into `board`.
    pub fn child(board: Board, parent_id: StateId, parent: &State, direction: Direction) -> Self {
        State {
            board,
            parent: Some(parent_id),
            num_moves: parent.num_moves + 1,
            last_move: MoveLabel::Blank(direction),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    /// Returns the number of moves from the initial state to this one.
    pub fn num_moves(&self) -> u32 {
        self.num_moves
    }

    pub fn last_move(&self) -> MoveLabel {
        self.last_move
    }

    /// Returns `true` if this state's board is the goal board.
    pub fn is_goal(&self) -> bool {
        self.board.is_goal()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.board.digit_string(),
            self.last_move,
            self.num_moves
        )
    }
}

/// Arena owning every state created during one search run.
///
/// `Searcher::find_solution` always stores its root at index `0`.
#[derive(Clone, Debug, Default)]
pub struct SearchTree {
    states: Vec<State>,
}

impl SearchTree {
    pub fn new() -> Self {
        SearchTree { states: Vec::new() }
    }

    /// Creates a tree holding only a root state for `board`.
    pub fn with_root(board: Board) -> Self {
        SearchTree {
            states: vec![State::root(board)],
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Returns the state stored at `id`.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this tree.
    pub fn get(&self, id: StateId) -> &State {
        &self.states[id]
    }

    /// Stores `state` in the arena and returns its index.
    ///
    /// The parent of a non-root state must already be in the tree.
    pub fn insert(&mut self, state: State) -> StateId {
        debug_assert!(state.parent.map_or(true, |p| p < self.states.len()));
        self.states.push(state);
        self.states.len() - 1
    }

    /// Builds the children of the state at `id`, one per legal blank move.
    ///
    /// Directions are tried in `Direction::ALL` order, so the result is always ordered
    /// up, down, left, right (minus the moves blocked by an edge). The children are not
    /// inserted into the tree; callers filter them first.
    ///
    /// # Returns
    /// Between 0 and 4 detached child states, each one move deeper than the parent.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::Board;
    /// use eight_puzzle_solver::state::SearchTree;
    ///
    /// let tree = SearchTree::with_root(Board::goal());
    /// let children = tree.generate_successors(0);
    /// assert_eq!(children.len(), 2); // down and right
    /// assert!(children.iter().all(|child| child.num_moves() == 1));
    /// ```
    pub fn generate_successors(&self, id: StateId) -> Vec<State> {
        let parent = self.get(id);
        let mut successors = Vec::with_capacity(Direction::ALL.len());

        for direction in Direction::ALL {
            let mut board = parent.board.copy();
            if board.move_blank(direction) {
                successors.push(State::child(board, id, parent, direction));
            }
        }
        successors
    }

    /// Returns `true` if `state`'s board already appears among its ancestors.
    ///
    /// Only the path from the root to `state` is checked; the same board reached along a
    /// different branch does not count. `state` itself does not need to be in the tree,
    /// but its parent chain must be.
    pub fn creates_cycle(&self, state: &State) -> bool {
        let mut ancestor = state.parent;
        while let Some(id) = ancestor {
            let current = self.get(id);
            if current.board == state.board {
                return true;
            }
            ancestor = current.parent;
        }
        false
    }

    /// Returns the ids of the states on the path from the root to `id`, inclusive.
    pub fn path_to(&self, id: StateId) -> Vec<StateId> {
        let mut path = vec![id];
        let mut current = self.get(id).parent;
        while let Some(parent_id) = current {
            path.push(parent_id);
            current = self.get(parent_id).parent;
        }
        path.reverse();
        path
    }

    /// Returns the blank moves that lead from the root to `id`, in order.
    pub fn moves_to(&self, id: StateId) -> Vec<Direction> {
        self.path_to(id)
            .into_iter()
            .filter_map(|step| match self.get(step).last_move {
                MoveLabel::Init => None,
                MoveLabel::Blank(direction) => Some(direction),
            })
            .collect()
    }
}
