//! Game-agnostic move and state types shared by every supported game.

use crate::error::Result;
use crate::GameRules;
use std::fmt;

/// One of the two sides of a two-player game
///
/// `One` always denotes the side that moves first in the standard
/// opening (X in Tic-Tac-Toe, Black in Othello).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Returns the other player
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

/// A piece placement: the acting player and the target cell
///
/// Both coordinates are 0-based indices.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    pub player: Player,
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(player: Player, row: usize, col: usize) -> Self {
        Move { player, row, col }
    }

    /// Returns the target cell as `(row, col)`
    pub fn cell(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {},{}", self.player, self.row, self.col)
    }
}

/// A position together with the rules that interpret it
///
/// The player to move is never stored: it is derived from the position's
/// last mover, so the pair can never disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State<G: GameRules> {
    game: G,
    position: G::Position,
}

impl<G: GameRules> State<G> {
    pub fn new(game: G, position: G::Position) -> Self {
        State { game, position }
    }

    pub fn game(&self) -> G {
        self.game
    }

    pub fn position(&self) -> &G::Position {
        &self.position
    }

    /// The player who made the last move, `None` before the first move
    pub fn last_mover(&self) -> Option<Player> {
        self.game.last_mover(&self.position)
    }

    /// The player whose turn it is
    pub fn player(&self) -> Player {
        self.game.player_to_move(&self.position)
    }

    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        self.game.legal_moves(&self.position, player)
    }

    /// Legal moves for the player to move
    pub fn moves(&self) -> Vec<Move> {
        self.legal_moves(self.player())
    }

    /// Returns the successor state, leaving `self` untouched
    pub fn next(&self, mv: &Move) -> Result<State<G>> {
        let position = self.game.apply_move(&self.position, mv)?;
        Ok(State::new(self.game, position))
    }

    /// Returns the state after the player to move passes, if the game allows it here
    pub fn pass(&self) -> Option<State<G>> {
        self.game
            .pass(&self.position)
            .map(|position| State::new(self.game, position))
    }

    pub fn is_terminal(&self) -> bool {
        self.game.is_terminal(&self.position)
    }

    pub fn winner(&self) -> Option<Player> {
        self.game.winner(&self.position)
    }

    /// Terminal reward for `player`: 1.0 for a win, 0.5 for a draw, 0.0 for a loss
    pub fn reward_for(&self, player: Player) -> f64 {
        match self.winner() {
            Some(w) if w == player => 1.0,
            Some(_) => 0.0,
            None => 0.5,
        }
    }
}

impl<G: GameRules> fmt::Display for State<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent().opponent(), Player::Two);
    }

    #[test]
    fn test_move_display() {
        let mv = Move::new(Player::Two, 1, 2);
        assert_eq!(format!("{}", mv), "Player 2 at 1,2");
        assert_eq!(mv.cell(), (1, 2));
    }
}
