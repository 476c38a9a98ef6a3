//! Rollout (simulation) policies and the playout loop that drives them.

use crate::tactics;
use crate::{GameRules, Move, Player, State};
use rand::Rng;
use tracing::warn;

/// Chooses moves during a simulated playout
pub trait RolloutPolicy<G: GameRules> {
    /// Picks one of `moves` (never empty) for `player`.
    fn choose_move<R: Rng>(
        &self,
        game: &G,
        position: &G::Position,
        player: Player,
        moves: &[Move],
        rng: &mut R,
    ) -> Move;
}

/// Uniformly random playouts
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRollout;

impl<G: GameRules> RolloutPolicy<G> for RandomRollout {
    fn choose_move<R: Rng>(
        &self,
        _game: &G,
        _position: &G::Position,
        _player: Player,
        moves: &[Move],
        rng: &mut R,
    ) -> Move {
        moves[rng.random_range(0..moves.len())]
    }
}

/// Greedy share used when none (or a non-finite one) is given
pub const DEFAULT_GREEDY_PROBABILITY: f64 = 0.9;

/// Clamps a probability to `[0, 1]`; NaN and infinities fall back to the default.
pub(crate) fn greedy_probability(p: f64) -> f64 {
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        DEFAULT_GREEDY_PROBABILITY
    }
}

/// Heuristic-guided playouts
///
/// 1. Take an immediate win.
/// 2. Block the opponent's immediate win.
/// 3. With probability `greedy_probability` play the move with the best
///    [`GameRules::move_score`], otherwise a uniformly random one.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicRollout {
    pub greedy_probability: f64,
}

impl HeuristicRollout {
    pub fn new(p: f64) -> Self {
        HeuristicRollout {
            greedy_probability: greedy_probability(p),
        }
    }
}

impl Default for HeuristicRollout {
    fn default() -> Self {
        HeuristicRollout::new(DEFAULT_GREEDY_PROBABILITY)
    }
}

impl<G: GameRules> RolloutPolicy<G> for HeuristicRollout {
    fn choose_move<R: Rng>(
        &self,
        game: &G,
        position: &G::Position,
        player: Player,
        moves: &[Move],
        rng: &mut R,
    ) -> Move {
        if let Some(mv) = tactics::tactical_move(game, position, player) {
            if moves.contains(&mv) {
                return mv;
            }
        }

        if rng.random_bool(greedy_probability(self.greedy_probability)) {
            best_scoring(game, position, moves)
        } else {
            moves[rng.random_range(0..moves.len())]
        }
    }
}

/// Highest-scoring move; the first one wins ties
fn best_scoring<G: GameRules>(game: &G, position: &G::Position, moves: &[Move]) -> Move {
    let mut best = moves[0];
    let mut best_score = f64::NEG_INFINITY;
    for mv in moves {
        let score = game.move_score(position, mv);
        if score > best_score {
            best_score = score;
            best = *mv;
        }
    }
    best
}

/// Plays `state` forward and returns the reward for `perspective`.
///
/// Terminal boards score 1.0 / 0.5 / 0.0. When `depth_cap` plies have been
/// played without reaching the end, the board is scored with
/// [`GameRules::evaluate`] instead. Passes do not count as plies.
pub fn simulate<G, P, R>(
    state: &State<G>,
    policy: &P,
    perspective: Player,
    depth_cap: Option<usize>,
    rng: &mut R,
) -> f64
where
    G: GameRules,
    P: RolloutPolicy<G>,
    R: Rng,
{
    let game = state.game();
    let mut position = state.position().clone();
    let mut depth = 0;

    loop {
        if game.is_terminal(&position) {
            return State::new(game, position).reward_for(perspective);
        }
        if depth_cap.is_some_and(|cap| depth >= cap) {
            return game.evaluate(&position, perspective);
        }

        let player = game.player_to_move(&position);
        let moves = game.legal_moves(&position, player);
        if moves.is_empty() {
            match game.pass(&position) {
                Some(passed) => {
                    position = passed;
                    continue;
                }
                None => return game.evaluate(&position, perspective),
            }
        }

        let mv = policy.choose_move(&game, &position, player, &moves, rng);
        match game.apply_move(&position, &mv) {
            Ok(next) => position = next,
            Err(err) => {
                warn!(%err, "rollout policy produced an illegal move");
                return game.evaluate(&position, perspective);
            }
        }
        depth += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::othello::{self, Othello, BLACK, WHITE};
    use crate::games::tictactoe::{Position, TicTacToe, O, X};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn rng() -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(42)
    }

    /// X's choice on a Tic-Tac-Toe board where O moved last
    fn choose_for_x(policy: HeuristicRollout, board: &str) -> Move {
        let position = Position::parse(board, Some(O)).unwrap();
        let moves = position.moves(X);
        policy.choose_move(&TicTacToe, &position, X, &moves, &mut rng())
    }

    /// White to move and stuck; Black's only reply at (0,2) wipes White out
    fn white_must_pass() -> State<Othello> {
        let position = othello::Position::parse(
            "BW......
             ........
             ........
             ........
             ........
             ........
             ........
             ........",
            Some(BLACK),
        )
        .unwrap();
        State::new(Othello, position)
    }

    #[test]
    fn test_heuristic_takes_win() {
        let mv = choose_for_x(HeuristicRollout::default(), "X X .\nO O .\n. . .");
        assert_eq!(mv.cell(), (0, 2));
    }

    #[test]
    fn test_heuristic_blocks() {
        let mv = choose_for_x(HeuristicRollout::new(0.0), "X . .\nO O .\nX . .");
        assert_eq!(mv.cell(), (1, 2));
    }

    #[test]
    fn test_fully_greedy_picks_best_score() {
        let position = Position::empty();
        let moves = position.moves(X);
        let policy = HeuristicRollout::new(1.0);
        let mv = policy.choose_move(&TicTacToe, &position, X, &moves, &mut rng());
        assert_eq!(mv.cell(), (1, 1));
    }

    #[test]
    fn test_non_finite_probability_falls_back_to_default() {
        for p in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let policy = HeuristicRollout::new(p);
            assert_eq!(policy.greedy_probability, DEFAULT_GREEDY_PROBABILITY);
        }
        assert_eq!(HeuristicRollout::new(2.0).greedy_probability, 1.0);

        // A NaN written straight into the field must not reach random_bool
        let policy = HeuristicRollout {
            greedy_probability: f64::NAN,
        };
        let state = TicTacToe.start();
        let mut rng = rng();
        for _ in 0..20 {
            let reward = simulate(&state, &policy, X, None, &mut rng);
            assert!((0.0..=1.0).contains(&reward));
        }
    }

    #[test]
    fn test_random_rollout_returns_legal_move() {
        let position = Position::empty();
        let moves = position.moves(X);
        let mut rng = rng();
        for _ in 0..20 {
            let mv = RandomRollout.choose_move(&TicTacToe, &position, X, &moves, &mut rng);
            assert!(moves.contains(&mv));
        }
    }

    #[test]
    fn test_simulate_terminal_state() {
        let position = Position::parse("X X X\nO O .\n. . .", Some(X)).unwrap();
        let state = State::new(TicTacToe, position);
        let policy = HeuristicRollout::default();
        assert_eq!(simulate(&state, &policy, X, None, &mut rng()), 1.0);
        assert_eq!(simulate(&state, &policy, O, None, &mut rng()), 0.0);
    }

    #[test]
    fn test_simulate_rewards_are_bounded() {
        let state = TicTacToe.start();
        let mut rng = rng();
        for _ in 0..50 {
            let reward = simulate(&state, &RandomRollout, X, None, &mut rng);
            assert!(reward == 0.0 || reward == 0.5 || reward == 1.0);
        }
    }

    #[test]
    fn test_simulate_depth_cap_uses_evaluation() {
        let state = Othello.start();
        let reward = simulate(&state, &HeuristicRollout::default(), BLACK, Some(2), &mut rng());
        assert!((0.0..=1.0).contains(&reward));
        // Two plies cannot finish an Othello game, so the result is heuristic
        assert!(reward != 0.0 && reward != 1.0);
    }

    #[test]
    fn test_simulate_passes_without_spending_a_ply() {
        let state = white_must_pass();
        assert!(state.moves().is_empty());
        assert!(!state.is_terminal());
        assert_eq!(state.player(), WHITE);

        // No ply allowed: the untouched board is scored heuristically
        let capped = simulate(&state, &HeuristicRollout::default(), BLACK, Some(0), &mut rng());
        assert!(capped > 0.5 && capped < 1.0);

        // One ply: White passes for free, then Black captures and wins outright
        let policy = HeuristicRollout::default();
        assert_eq!(simulate(&state, &policy, BLACK, Some(1), &mut rng()), 1.0);
        assert_eq!(simulate(&state, &RandomRollout, WHITE, Some(1), &mut rng()), 0.0);
    }
}
