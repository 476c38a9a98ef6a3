//! # Game Implementations Module
//!
//! Each game implements the `GameRules` trait to provide a consistent interface
//! for the Monte Carlo Tree Search engine.
//!
//! ## Supported Games
//! - **Tic-Tac-Toe**: 3x3 grid, three in a row wins, strict alternation
//! - **Othello (Reversi)**: Classic 8x8 piece-flipping strategy game with passes
//!
//! ## Adding New Games
//! To add a new game, create a new module and implement:
//! 1. An immutable position type (`Clone + Eq + Hash + Display`)
//! 2. A zero-sized rules type implementing `GameRules`
//! 3. The game's move-scoring and position-evaluation heuristics

pub mod othello;
pub mod tictactoe;
