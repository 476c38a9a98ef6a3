//! # Two-Player MCTS Engine
//!
//! A Monte Carlo Tree Search engine for two-player, perfect-information,
//! zero-sum board games. The engine iterates select → expand → simulate →
//! backpropagate over an arena-allocated tree and returns the most visited
//! ("robust") child of the root.
//!
//! Games plug in through the [`GameRules`] trait. Two are provided:
//! - [`games::tictactoe::TicTacToe`]: 3x3 grid, three in a row wins
//! - [`games::othello::Othello`]: 8x8 disc flipping with passes
//!
//! ```rust
//! use mcts::games::tictactoe::{Position, TicTacToe, O};
//! use mcts::{MctsConfig, State, MCTS};
//!
//! let position = Position::parse("X X .\n. O .\n. . .", Some(O)).unwrap();
//! let mut search = MCTS::new(State::new(TicTacToe, position), MctsConfig::default().with_seed(7));
//! let best = search.search_iterations(1);
//! let chosen = search.node(best).state().position().row(0);
//! assert!(chosen.iter().all(|c| *c == Some(mcts::Player::One)));
//! ```

pub mod arena;
pub mod config;
pub mod engine;
pub mod error;
pub mod games;
pub mod rollout;
pub mod state;
pub mod stats;
pub mod tactics;
pub mod tree;

pub use config::MctsConfig;
pub use engine::MCTS;
pub use error::{GameError, IllegalReason};
pub use rollout::{HeuristicRollout, RandomRollout, RolloutPolicy};
pub use state::{Move, Player, State};
pub use stats::{BudgetStatistics, MatchStatistics, SearchStatistics};
pub use tree::{NodeId, SearchNode, SearchTree};

use std::fmt;
use std::hash::Hash;

/// The rules of one game. Implementations are stateless and cheap to copy;
/// all game data lives in the immutable [`GameRules::Position`].
pub trait GameRules: Copy + Default + PartialEq + Eq + fmt::Debug {
    /// The immutable board type. Successors are always new values.
    type Position: Clone + PartialEq + Eq + Hash + fmt::Debug + fmt::Display;

    /// The fixed opening board
    fn initial_position(&self) -> Self::Position;

    /// Returns the starting state of the game.
    fn start(&self) -> State<Self> {
        State::new(*self, self.initial_position())
    }

    /// The player who moves first
    fn opener(&self) -> Player;

    /// The player who made the last move (or pass); `None` before any move.
    fn last_mover(&self, position: &Self::Position) -> Option<Player>;

    /// The complement of the last mover, or the opener on a fresh board
    fn player_to_move(&self, position: &Self::Position) -> Player {
        self.last_mover(position)
            .map(Player::opponent)
            .unwrap_or_else(|| self.opener())
    }

    /// Returns a copy of `position` in which it is `player`'s turn.
    /// Used to look for the opponent's threats and to implement passes.
    fn with_player_to_move(&self, position: &Self::Position, player: Player) -> Self::Position;

    /// Returns every legal placement for `player`. An empty vector means the
    /// player cannot move here; it is never an error.
    fn legal_moves(&self, position: &Self::Position, player: Player) -> Vec<Move>;

    /// Applies a move, returning the successor or an illegal-move error.
    fn apply_move(&self, position: &Self::Position, mv: &Move) -> error::Result<Self::Position>;

    fn is_terminal(&self, position: &Self::Position) -> bool;

    /// The winning player, `None` for a draw or an unfinished game.
    fn winner(&self, position: &Self::Position) -> Option<Player>;

    /// The position after the player to move passes, or `None` when passing
    /// is not allowed here (the default: games without passes).
    fn pass(&self, _position: &Self::Position) -> Option<Self::Position> {
        None
    }

    /// UCB1 exploration constant `C`
    fn exploration_constant(&self) -> f64;

    /// Plies after which a rollout stops and scores the board heuristically
    fn rollout_depth_cap(&self) -> Option<usize> {
        None
    }

    /// Static desirability of a legal move; higher is better.
    fn move_score(&self, position: &Self::Position, mv: &Move) -> f64;

    /// Heuristic value of a non-terminal position for `perspective`, in `[0, 1]`.
    fn evaluate(&self, position: &Self::Position, perspective: Player) -> f64;
}
