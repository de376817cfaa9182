//! Core puzzle representation for the Eight Puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Direction`: The four ways the blank tile can slide, in the fixed order used for expansion.
//! - `Board`: A 3x3 arrangement of the tiles `0..=8` (`0` is the blank) with a cached blank
//!   position, single-step blank moves, and distance-to-goal metrics.
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Defines the size of the board (width and height).
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board, and therefore the length of a digit string.
pub const NUM_TILES: usize = BOARD_SIZE * BOARD_SIZE;

/// The goal configuration as a row-major digit string.
pub const GOAL_DIGITS: &str = "012345678";

const GOAL_TILES: [[u8; BOARD_SIZE]; BOARD_SIZE] = [[0, 1, 2], [3, 4, 5], [6, 7, 8]];

/// Goal (row, column) of every tile label, indexed by the label.
const GOAL_POSITIONS: [(usize, usize); NUM_TILES] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (1, 1),
    (1, 2),
    (2, 0),
    (2, 1),
    (2, 2),
];

/// A direction in which the blank can slide.
///
/// The blank moving `Up` means the tile above it slides down into the hole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in expansion order.
    ///
    /// This order decides which successor comes first, and with it the tie-breaks of
    /// every search strategy. Do not reorder.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the (row, column) delta applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Returns the lowercase name used in move listings (`"up"`, `"down"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(format!("Unrecognized direction '{}'", other)),
        }
    }
}

/// Represents an Eight Puzzle board as a 3x3 grid of tile labels.
///
/// Every label `0..=8` appears exactly once and `0` marks the blank. The blank's
/// position is cached so moves do not need to scan the grid. Because the grid is a
/// plain array, `clone()` always yields an independent board.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    tiles: [[u8; BOARD_SIZE]; BOARD_SIZE],
    blank_r: usize,
    blank_c: usize,
}

impl Board {
    /// Creates a board from a 9-character row-major digit string.
    ///
    /// # Arguments
    /// * `digits`: A permutation of the characters `'0'..='8'`, where `'0'` is the blank.
    ///
    /// # Returns
    /// * `Ok(Board)` if `digits` is a valid configuration.
    /// * `Err(Error::InvalidConfiguration)` if the string has the wrong length, contains a
    ///   character other than `0`-`8`, or repeats a digit.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::Board;
    /// let board = Board::new("142506378").unwrap();
    /// assert_eq!(board.tile(0, 1), 4);
    /// assert_eq!(board.blank_position(), (1, 1));
    ///
    /// assert!(Board::new("1234").is_err());
    /// assert!(Board::new("112345678").is_err());
    /// ```
    pub fn new(digits: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidConfiguration {
            digits: digits.to_string(),
            reason,
        };

        let count = digits.chars().count();
        if count != NUM_TILES {
            return Err(invalid(format!(
                "expected {} characters, found {}",
                NUM_TILES, count
            )));
        }

        let mut tiles = [[0u8; BOARD_SIZE]; BOARD_SIZE];
        let mut seen = [false; NUM_TILES];
        let mut blank = (0, 0);

        for (i, ch) in digits.chars().enumerate() {
            let label = match ch.to_digit(10) {
                Some(d) if (d as usize) < NUM_TILES => d as u8,
                _ => {
                    return Err(invalid(format!(
                        "unrecognized character '{}' at position {}",
                        ch, i
                    )))
                }
            };
            if seen[label as usize] {
                return Err(invalid(format!("digit '{}' appears more than once", ch)));
            }
            seen[label as usize] = true;

            let (r, c) = (i / BOARD_SIZE, i % BOARD_SIZE);
            tiles[r][c] = label;
            if label == 0 {
                blank = (r, c);
            }
        }

        // Nine distinct labels from a set of nine means every label is present.
        Ok(Board {
            tiles,
            blank_r: blank.0,
            blank_c: blank.1,
        })
    }

    /// Returns the solved board, `012345678`.
    pub fn goal() -> Self {
        Board {
            tiles: GOAL_TILES,
            blank_r: 0,
            blank_c: 0,
        }
    }

    /// Returns the tile label at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not less than `BOARD_SIZE`.
    pub fn tile(&self, r: usize, c: usize) -> u8 {
        self.tiles[r][c]
    }

    /// Returns the cached (row, column) of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank_r, self.blank_c)
    }

    /// Slides the blank one cell in `direction`.
    ///
    /// On success the blank swaps places with the neighbouring tile and the cached blank
    /// position is updated. If the blank already sits on that edge, nothing changes.
    ///
    /// # Returns
    /// `true` if the blank moved, `false` otherwise.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::{Board, Direction};
    /// let mut board = Board::new("012345678").unwrap();
    /// assert!(!board.move_blank(Direction::Up));
    /// assert!(board.move_blank(Direction::Right));
    /// assert_eq!(board.digit_string(), "102345678");
    /// ```
    pub fn move_blank(&mut self, direction: Direction) -> bool {
        let (dr, dc) = direction.as_offset();
        let nr_signed = self.blank_r as isize + dr;
        let nc_signed = self.blank_c as isize + dc;

        if nr_signed < 0
            || nr_signed >= BOARD_SIZE as isize
            || nc_signed < 0
            || nc_signed >= BOARD_SIZE as isize
        {
            return false;
        }

        let (nr, nc) = (nr_signed as usize, nc_signed as usize);
        self.tiles[self.blank_r][self.blank_c] = self.tiles[nr][nc];
        self.tiles[nr][nc] = 0;
        self.blank_r = nr;
        self.blank_c = nc;
        true
    }

    /// Serializes the grid back into a row-major digit string.
    ///
    /// This is the inverse of `Board::new`.
    pub fn digit_string(&self) -> String {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .map(|&t| char::from(b'0' + t))
            .collect()
    }

    /// Returns an independent copy of this board.
    pub fn copy(&self) -> Board {
        self.clone()
    }

    pub fn is_goal(&self) -> bool {
        self.tiles == GOAL_TILES
    }

    /// Counts the non-blank tiles that are not on their goal cell.
    ///
    /// # Returns
    /// The number of misplaced tiles, `0` for the goal board.
    pub fn num_misplaced(&self) -> u32 {
        let mut count = 0;
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let tile = self.tiles[r][c];
                if tile != 0 && tile != GOAL_TILES[r][c] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Sums, over every non-blank tile, the row distance plus the column distance
    /// between the tile's cell and its goal cell.
    ///
    /// Each move changes the sum by exactly one, so it never overestimates the number of
    /// moves left.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::Board;
    /// assert_eq!(Board::goal().manhattan_distance(), 0);
    /// assert_eq!(Board::new("142506378").unwrap().manhattan_distance(), 8);
    /// ```
    pub fn manhattan_distance(&self) -> u32 {
        let mut total = 0;
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let tile = self.tiles[r][c];
                if tile == 0 {
                    continue;
                }
                let (goal_r, goal_c) = GOAL_POSITIONS[tile as usize];
                total += (r.abs_diff(goal_r) + c.abs_diff(goal_c)) as u32;
            }
        }
        total
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Board::new(s)
    }
}

impl fmt::Display for Board {
    /// Formats the board as three rows of tiles, with `_` standing in for the blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.tiles {
            for &tile in row {
                if tile == 0 {
                    write!(f, "_ ")?;
                } else {
                    write!(f, "{} ", tile)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
