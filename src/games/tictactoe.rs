//! # Tic-Tac-Toe Game Implementation
//!
//! Two players alternate placing marks on a 3x3 grid; the first to own a
//! complete row, column or diagonal wins. A full board without a line is a draw.
//!
//! ## Rules
//! - X always opens
//! - A player may never move twice in a row (the rules reject it, not the caller)
//! - There is no pass: a non-terminal position always has an empty cell

use crate::error::{GameError, IllegalReason, Result};
use crate::{GameRules, Move, Player};
use mcts_shared::check_line_win;
use std::fmt;
use std::str::FromStr;

/// The opening player
pub const X: Player = Player::One;
/// The second player
pub const O: Player = Player::Two;

const SIZE: usize = 3;
const LINE: usize = 3;

/// Static preference for each cell: centre, then corners, then edges
const CELL_WEIGHTS: [[f64; SIZE]; SIZE] = [[2.0, 1.0, 2.0], [1.0, 3.0, 1.0], [2.0, 1.0, 2.0]];

/// A cell is either empty or owned by a player
pub type Cell = Option<Player>;

/// An immutable Tic-Tac-Toe board
///
/// Stores the grid row-major, the number of marks placed and the player who
/// placed the last one (`None` on an empty board).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    grid: [Cell; SIZE * SIZE],
    count: usize,
    last: Option<Player>,
}

impl Position {
    /// An empty board with nobody having moved
    pub fn empty() -> Self {
        Position {
            grid: [None; SIZE * SIZE],
            count: 0,
            last: None,
        }
    }

    /// Builds a position from rows; the piece count is derived from the grid
    pub fn from_rows(rows: [[Cell; SIZE]; SIZE], last: Option<Player>) -> Self {
        let mut grid = [None; SIZE * SIZE];
        for (r, row) in rows.iter().enumerate() {
            grid[r * SIZE..(r + 1) * SIZE].copy_from_slice(row);
        }
        let count = grid.iter().filter(|c| c.is_some()).count();
        Position { grid, count, last }
    }

    /// Parses a board such as `"X X .\n. O .\n. . ."` with an explicit last mover
    ///
    /// `X` or `1` is an X mark, `O` or `0` an O mark, anything else is empty.
    pub fn parse(text: &str, last: Option<Player>) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if rows.len() != SIZE {
            return Err(GameError::InvalidBoard(format!(
                "expected {} rows, got {}",
                SIZE,
                rows.len()
            )));
        }

        let mut parsed = [[None; SIZE]; SIZE];
        for (r, line) in rows.iter().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != SIZE {
                return Err(GameError::InvalidBoard(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    tokens.len(),
                    SIZE
                )));
            }
            for (c, token) in tokens.iter().enumerate() {
                parsed[r][c] = parse_cell(token);
            }
        }
        Ok(Position::from_rows(parsed, last))
    }

    /// The mark at (row, col); `None` for empty or off-board cells
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        if row >= SIZE || col >= SIZE {
            return None;
        }
        self.grid[row * SIZE + col]
    }

    /// Returns a copy of row `i`
    pub fn row(&self, i: usize) -> [Cell; SIZE] {
        [self.cell(i, 0), self.cell(i, 1), self.cell(i, 2)]
    }

    /// Number of marks on the board
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn last_player(&self) -> Option<Player> {
        self.last
    }

    pub fn is_full(&self) -> bool {
        self.count == SIZE * SIZE
    }

    /// Empty cells `player` may mark; empty if `player` made the previous move
    pub fn moves(&self, player: Player) -> Vec<Move> {
        if self.last == Some(player) {
            return Vec::new();
        }
        (0..SIZE)
            .flat_map(|r| (0..SIZE).map(move |c| (r, c)))
            .filter(|&(r, c)| self.cell(r, c).is_none())
            .map(|(r, c)| Move::new(player, r, c))
            .collect()
    }

    /// Returns a new position with `player`'s mark at (row, col)
    pub fn play(&self, player: Player, row: usize, col: usize) -> Result<Position> {
        if row >= SIZE || col >= SIZE {
            return Err(GameError::illegal(row, col, IllegalReason::OutOfBounds));
        }
        if self.is_full() {
            return Err(GameError::illegal(row, col, IllegalReason::BoardFull));
        }
        if self.cell(row, col).is_some() {
            return Err(GameError::illegal(row, col, IllegalReason::Occupied));
        }
        if self.last == Some(player) {
            return Err(GameError::illegal(row, col, IllegalReason::ConsecutiveMove));
        }

        let mut grid = self.grid;
        grid[row * SIZE + col] = Some(player);
        Ok(Position {
            grid,
            count: self.count + 1,
            last: Some(player),
        })
    }

    /// True if `player` owns a complete row, column or diagonal
    pub fn has_line(&self, player: Player) -> bool {
        check_line_win(&self.grid, SIZE, SIZE, &Some(player), LINE)
    }

    /// The owner of a complete line, checking the last mover first
    pub fn winner(&self) -> Option<Player> {
        let first = self.last.unwrap_or(X);
        [first, first.opponent()]
            .into_iter()
            .find(|&p| self.has_line(p))
    }

    pub fn with_last(&self, last: Option<Player>) -> Position {
        Position { last, ..*self }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::empty()
    }
}

fn parse_cell(token: &str) -> Cell {
    match token.trim() {
        t if t.eq_ignore_ascii_case("x") || t == "1" => Some(X),
        t if t.eq_ignore_ascii_case("o") || t == "0" => Some(O),
        _ => None,
    }
}

impl FromStr for Position {
    type Err = GameError;

    /// Parses a board, inferring the last mover from the mark counts
    ///
    /// X opens, so more X marks than O marks means X moved last; equal
    /// non-zero counts mean O moved last.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let position = Position::parse(s, None)?;
        let xs = position.grid.iter().filter(|c| **c == Some(X)).count();
        let os = position.grid.iter().filter(|c| **c == Some(O)).count();
        let last = match (xs, os) {
            (0, 0) => None,
            (x, o) if x > o => Some(X),
            _ => Some(O),
        };
        Ok(position.with_last(last))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..SIZE {
            let row: Vec<&str> = (0..SIZE)
                .map(|c| match self.cell(r, c) {
                    Some(p) if p == X => "X",
                    Some(_) => "O",
                    None => ".",
                })
                .collect();
            write!(f, "{}", row.join(" "))?;
            if r + 1 < SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// The Tic-Tac-Toe rule set
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TicTacToe;

impl GameRules for TicTacToe {
    type Position = Position;

    fn initial_position(&self) -> Position {
        Position::empty()
    }

    fn opener(&self) -> Player {
        X
    }

    fn last_mover(&self, position: &Position) -> Option<Player> {
        position.last_player()
    }

    fn with_player_to_move(&self, position: &Position, player: Player) -> Position {
        position.with_last(Some(player.opponent()))
    }

    fn legal_moves(&self, position: &Position, player: Player) -> Vec<Move> {
        position.moves(player)
    }

    fn apply_move(&self, position: &Position, mv: &Move) -> Result<Position> {
        position.play(mv.player, mv.row, mv.col)
    }

    fn is_terminal(&self, position: &Position) -> bool {
        position.is_full() || position.winner().is_some()
    }

    fn winner(&self, position: &Position) -> Option<Player> {
        position.winner()
    }

    fn exploration_constant(&self) -> f64 {
        std::f64::consts::SQRT_2
    }

    fn move_score(&self, _position: &Position, mv: &Move) -> f64 {
        CELL_WEIGHTS[mv.row][mv.col]
    }

    /// Undecided boards are scored as draws
    fn evaluate(&self, position: &Position, perspective: Player) -> f64 {
        match position.winner() {
            Some(p) if p == perspective => 1.0,
            Some(_) => 0.0,
            None => 0.5,
        }
    }
}
