//! # Othello (Reversi) Game Implementation
//!
//! This module implements the classic Othello (also known as Reversi) board game.
//! Players take turns placing pieces on an 8x8 board, with the goal of having
//! the most pieces of their color when the board is full or no more moves are possible.
//!
//! ## Rules
//! - Players must place pieces that "sandwich" opponent pieces between the new piece
//!   and an existing piece of the same color
//! - All sandwiched pieces are flipped to the current player's color
//! - If a player has no legal moves, their turn passes to the opponent
//! - Game ends when the board is full or neither player can make a move
//! - Winner is determined by who has more pieces on the board

use crate::error::{GameError, IllegalReason, Result};
use crate::{GameRules, Move, Player};
use std::fmt;

/// The opening player
pub const BLACK: Player = Player::One;
/// The second player
pub const WHITE: Player = Player::Two;

/// Board side length
pub const SIZE: usize = 8;

/// Simulations are cut off after this many plies and scored heuristically
const ROLLOUT_DEPTH_CAP: usize = 30;

#[rustfmt::skip]
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Positional value of each square for the rollout heuristic
const POSITION_WEIGHTS: [[i32; SIZE]; SIZE] = [
    [100, -20, 10, 5, 5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [10, -2, 1, 1, 1, 1, -2, 10],
    [5, -2, 1, 1, 1, 1, -2, 5],
    [5, -2, 1, 1, 1, 1, -2, 5],
    [10, -2, 1, 1, 1, 1, -2, 10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10, 5, 5, 10, -20, 100],
];

const CORNER_BONUS: f64 = 1000.0;
const NEAR_EMPTY_CORNER_PENALTY: f64 = 100.0;
const PIECE_DIFF_WEIGHT: f64 = 0.5;
const MOBILITY_WEIGHT: f64 = 2.0;

/// A square is either empty or holds a disc of one color
pub type Cell = Option<Player>;

/// An immutable Othello board
///
/// The board is stored row-major. `count` is always the number of discs on
/// the board and `last` the player who moved (or passed) last.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    board: [Cell; SIZE * SIZE],
    count: usize,
    last: Option<Player>,
}

impl Position {
    /// Creates the standard starting position: four discs in the centre, Black to move
    pub fn starting() -> Self {
        let mut board = [None; SIZE * SIZE];
        let c = SIZE / 2;
        board[(c - 1) * SIZE + (c - 1)] = Some(WHITE);
        board[(c - 1) * SIZE + c] = Some(BLACK);
        board[c * SIZE + (c - 1)] = Some(BLACK);
        board[c * SIZE + c] = Some(WHITE);
        Position {
            board,
            count: 4,
            last: None,
        }
    }

    /// Builds a position from rows; the disc count is derived from the board
    pub fn from_rows(rows: [[Cell; SIZE]; SIZE], last: Option<Player>) -> Self {
        let mut board = [None; SIZE * SIZE];
        for (r, row) in rows.iter().enumerate() {
            board[r * SIZE..(r + 1) * SIZE].copy_from_slice(row);
        }
        let count = board.iter().filter(|c| c.is_some()).count();
        Position { board, count, last }
    }

    /// Parses eight rows of `B`, `W` and `.` separated by whitespace
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
            let cells: Vec<char> = line.chars().filter(|ch| !ch.is_whitespace()).collect();
            if cells.len() != SIZE {
                return Err(GameError::InvalidBoard(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    cells.len(),
                    SIZE
                )));
            }
            for (c, ch) in cells.iter().enumerate() {
                parsed[r][c] = match ch.to_ascii_uppercase() {
                    'B' => Some(BLACK),
                    'W' => Some(WHITE),
                    _ => None,
                };
            }
        }
        Ok(Position::from_rows(parsed, last))
    }

    /// The disc at (row, col); `None` for empty or off-board squares
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        if row >= SIZE || col >= SIZE {
            return None;
        }
        self.board[row * SIZE + col]
    }

    /// Total number of discs on the board
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of discs of one color
    pub fn count_of(&self, player: Player) -> usize {
        self.board.iter().filter(|c| **c == Some(player)).count()
    }

    pub fn last_player(&self) -> Option<Player> {
        self.last
    }

    pub fn is_full(&self) -> bool {
        self.count == SIZE * SIZE
    }

    /// Returns every opponent disc captured if `player` places at (row, col)
    ///
    /// Empty when the square is off the board, occupied, or captures nothing.
    pub fn flips(&self, player: Player, row: usize, col: usize) -> Vec<(usize, usize)> {
        let mut flips = Vec::new();
        if row >= SIZE || col >= SIZE || self.cell(row, col).is_some() {
            return flips;
        }
        for &(dr, dc) in DIRECTIONS.iter() {
            let run = self.run_length(player, row, col, dr, dc);
            for k in 1..=run as i32 {
                flips.push(((row as i32 + dr * k) as usize, (col as i32 + dc * k) as usize));
            }
        }
        flips
    }

    /// True if placing at (row, col) would capture at least one disc
    fn captures_any(&self, player: Player, row: usize, col: usize) -> bool {
        self.cell(row, col).is_none()
            && DIRECTIONS
                .iter()
                .any(|&(dr, dc)| self.run_length(player, row, col, dr, dc) > 0)
    }

    /// Length of the opponent run in one direction that is closed by `player`'s disc
    fn run_length(&self, player: Player, row: usize, col: usize, dr: i32, dc: i32) -> usize {
        let opponent = player.opponent();
        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;
        let mut run = 0;
        while in_bounds(r, c) && self.cell(r as usize, c as usize) == Some(opponent) {
            run += 1;
            r += dr;
            c += dc;
        }
        if run > 0 && in_bounds(r, c) && self.cell(r as usize, c as usize) == Some(player) {
            run
        } else {
            0
        }
    }

    /// Legal placements for `player`, in row-major order
    pub fn moves(&self, player: Player) -> Vec<Move> {
        (0..SIZE)
            .flat_map(|r| (0..SIZE).map(move |c| (r, c)))
            .filter(|&(r, c)| self.captures_any(player, r, c))
            .map(|(r, c)| Move::new(player, r, c))
            .collect()
    }

    pub fn has_moves(&self, player: Player) -> bool {
        (0..SIZE)
            .flat_map(|r| (0..SIZE).map(move |c| (r, c)))
            .any(|(r, c)| self.captures_any(player, r, c))
    }

    /// Returns a new position with the disc placed and all captured runs flipped
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
        let flips = self.flips(player, row, col);
        if flips.is_empty() {
            return Err(GameError::illegal(row, col, IllegalReason::NoCapture));
        }

        let mut board = self.board;
        board[row * SIZE + col] = Some(player);
        for (fr, fc) in flips {
            board[fr * SIZE + fc] = Some(player);
        }
        Ok(Position {
            board,
            count: self.count + 1,
            last: Some(player),
        })
    }

    /// True once the board is full or neither side can move
    pub fn is_game_over(&self) -> bool {
        self.is_full() || (!self.has_moves(BLACK) && !self.has_moves(WHITE))
    }

    /// The side with more discs once the game is over; `None` for a draw or an unfinished game
    pub fn winner(&self) -> Option<Player> {
        if !self.is_game_over() {
            return None;
        }
        let black = self.count_of(BLACK);
        let white = self.count_of(WHITE);
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Some(BLACK),
            std::cmp::Ordering::Less => Some(WHITE),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn with_last(&self, last: Option<Player>) -> Position {
        Position { last, ..*self }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::starting()
    }
}

fn in_bounds(r: i32, c: i32) -> bool {
    r >= 0 && r < SIZE as i32 && c >= 0 && c < SIZE as i32
}

fn is_corner(row: usize, col: usize) -> bool {
    (row == 0 || row == SIZE - 1) && (col == 0 || col == SIZE - 1)
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..SIZE {
            let row: Vec<&str> = (0..SIZE)
                .map(|c| match self.cell(r, c) {
                    Some(p) if p == BLACK => "B",
                    Some(_) => "W",
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

/// The Othello rule set
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Othello;

impl GameRules for Othello {
    type Position = Position;

    fn initial_position(&self) -> Position {
        Position::starting()
    }

    fn opener(&self) -> Player {
        BLACK
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
        position.is_game_over()
    }

    fn winner(&self, position: &Position) -> Option<Player> {
        position.winner()
    }

    /// The player to move hands the turn over when stuck in a live game
    fn pass(&self, position: &Position) -> Option<Position> {
        let to_move = position
            .last_player()
            .map(Player::opponent)
            .unwrap_or(BLACK);
        if position.has_moves(to_move) || position.is_game_over() {
            return None;
        }
        Some(position.with_last(Some(to_move)))
    }

    fn exploration_constant(&self) -> f64 {
        1.0
    }

    fn rollout_depth_cap(&self) -> Option<usize> {
        Some(ROLLOUT_DEPTH_CAP)
    }

    fn move_score(&self, position: &Position, mv: &Move) -> f64 {
        let (row, col) = mv.cell();
        let mut score = POSITION_WEIGHTS[row][col] as f64;

        if is_corner(row, col) {
            score += CORNER_BONUS;
        } else {
            // Squares next to a corner hand it to the opponent while it is empty
            let last = SIZE - 1;
            let near = |r_near: bool, c_near: bool, corner: (usize, usize)| {
                r_near && c_near && position.cell(corner.0, corner.1).is_none()
            };
            let (top, bottom) = (row <= 1, row >= last - 1);
            let (left, right) = (col <= 1, col >= last - 1);
            for adjacent in [
                near(top, left, (0, 0)),
                near(top, right, (0, last)),
                near(bottom, left, (last, 0)),
                near(bottom, right, (last, last)),
            ] {
                if adjacent {
                    score -= NEAR_EMPTY_CORNER_PENALTY;
                }
            }
        }

        match position.play(mv.player, row, col) {
            Ok(next) => {
                let own = next.count_of(mv.player) as f64;
                let opp = next.count_of(mv.player.opponent()) as f64;
                score += (own - opp) * PIECE_DIFF_WEIGHT;
                score -= next.moves(mv.player.opponent()).len() as f64 * MOBILITY_WEIGHT;
                score
            }
            Err(_) => f64::NEG_INFINITY,
        }
    }

    /// Blends the positional-weight balance (70%) with the disc share (30%)
    fn evaluate(&self, position: &Position, perspective: Player) -> f64 {
        let mine = position.count_of(perspective);
        let theirs = position.count_of(perspective.opponent());
        let piece_ratio = if mine + theirs == 0 {
            0.5
        } else {
            mine as f64 / (mine + theirs) as f64
        };

        let mut positional = 0.0;
        let mut total_weight = 0.0;
        for r in 0..SIZE {
            for c in 0..SIZE {
                let weight = POSITION_WEIGHTS[r][c] as f64;
                match position.cell(r, c) {
                    Some(p) if p == perspective => positional += weight,
                    Some(_) => positional -= weight,
                    None => {}
                }
                total_weight += weight.abs();
            }
        }
        let positional_ratio = (positional + total_weight) / (2.0 * total_weight);

        0.7 * positional_ratio + 0.3 * piece_ratio
    }
}
