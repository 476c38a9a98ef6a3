//! One-ply tactical checks shared by the rollout policy and the search shortcut.

use crate::{GameRules, Move, Player};

/// Returns a legal move that ends the game with `player` as the winner.
///
/// Works regardless of whose turn it is in `position`: the position is first
/// re-labelled so that `player` is to move. The first such move in legal-move
/// order is returned.
pub fn winning_move<G: GameRules>(
    game: &G,
    position: &G::Position,
    player: Player,
) -> Option<Move> {
    let as_mover = game.with_player_to_move(position, player);
    game.legal_moves(&as_mover, player).into_iter().find(|mv| {
        game.apply_move(&as_mover, mv)
            .map(|next| game.is_terminal(&next) && game.winner(&next) == Some(player))
            .unwrap_or(false)
    })
}

/// Returns a move for `player` that occupies the cell the opponent would win on.
///
/// `None` when the opponent has no immediate win or `player` cannot legally
/// play the threatened cell.
pub fn blocking_move<G: GameRules>(
    game: &G,
    position: &G::Position,
    player: Player,
) -> Option<Move> {
    let threat = winning_move(game, position, player.opponent())?;
    let as_mover = game.with_player_to_move(position, player);
    game.legal_moves(&as_mover, player)
        .into_iter()
        .find(|mv| mv.cell() == threat.cell())
}

/// Immediate win if one exists, otherwise a block of the opponent's win
pub fn tactical_move<G: GameRules>(
    game: &G,
    position: &G::Position,
    player: Player,
) -> Option<Move> {
    winning_move(game, position, player).or_else(|| blocking_move(game, position, player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Position, TicTacToe, O, X};

    #[test]
    fn test_finds_winning_move() {
        let position = Position::parse("X X .\n. O .\n. . .", Some(O)).unwrap();
        let mv = winning_move(&TicTacToe, &position, X).unwrap();
        assert_eq!(mv, Move::new(X, 0, 2));
    }

    #[test]
    fn test_no_winning_move() {
        let position = Position::parse("X . .\n. O .\n. . .", Some(O)).unwrap();
        assert!(winning_move(&TicTacToe, &position, X).is_none());
    }

    #[test]
    fn test_finds_threat_when_not_their_turn() {
        // O just moved, yet O's threat on (1,2) is still found
        let position = Position::parse("X . .\nO O .\nX . .", Some(O)).unwrap();
        let threat = winning_move(&TicTacToe, &position, O).unwrap();
        assert_eq!(threat.cell(), (1, 2));

        let block = blocking_move(&TicTacToe, &position, X).unwrap();
        assert_eq!(block, Move::new(X, 1, 2));
    }

    #[test]
    fn test_win_takes_priority_over_block() {
        let position = Position::parse("X X .\nO O .\n. . .", Some(O)).unwrap();
        let mv = tactical_move(&TicTacToe, &position, X).unwrap();
        assert_eq!(mv.cell(), (0, 2));
    }

    #[test]
    fn test_quiet_position_has_no_tactic() {
        let position = Position::empty();
        assert!(tactical_move(&TicTacToe, &position, X).is_none());
    }
}
