//! Computer-vs-computer matches: MCTS against a uniformly random opponent.

use crate::config::MctsConfig;
use crate::engine::MCTS;
use crate::error::Result;
use crate::stats::MatchStatistics;
use crate::{GameRules, Move, Player, State};
use rand::Rng;
use tracing::{debug, warn};

/// The outcome of one finished game.
#[derive(Debug, Clone)]
pub struct GameRecord<G: GameRules> {
    /// Every turn in order; `None` marks a pass
    pub moves: Vec<Option<Move>>,
    pub final_state: State<G>,
    pub winner: Option<Player>,
    pub mcts_player: Player,
    /// Statistics for this single game
    pub stats: MatchStatistics,
}

impl<G: GameRules> GameRecord<G> {
    /// Terminal reward for the MCTS side: 1.0 win, 0.5 draw, 0.0 loss
    pub fn mcts_reward(&self) -> f64 {
        self.final_state.reward_for(self.mcts_player)
    }
}

/// Plays one game from the standard opening.
///
/// `mcts_player` moves by running a fresh search of `iterations` iterations
/// each turn; the other side picks uniformly among its legal moves. When a
/// search returns the root, a random legal move is played instead and the
/// fallback is counted. Every search is seeded from `rng`, so a seeded `rng`
/// replays the same game.
pub fn play_game<G, R>(
    game: G,
    config: &MctsConfig,
    iterations: usize,
    mcts_player: Player,
    rng: &mut R,
) -> Result<GameRecord<G>>
where
    G: GameRules,
    R: Rng,
{
    let mut state = game.start();
    let mut stats = MatchStatistics::new();
    let mut moves = Vec::new();

    while !state.is_terminal() {
        let player = state.player();
        let legal = state.moves();
        if legal.is_empty() {
            match state.pass() {
                Some(next) => {
                    debug!(%player, "pass");
                    moves.push(None);
                    state = next;
                    continue;
                }
                None => {
                    warn!(%player, "no legal moves and no pass, stopping game");
                    break;
                }
            }
        }

        let mv = if player == mcts_player {
            let mut search = MCTS::new(state.clone(), config.clone().with_seed(rng.random()));
            let chosen = search.search_iterations(iterations);
            stats.record_search(iterations, search.last_stats());
            match search.node(chosen).move_from_parent() {
                Some(mv) if chosen != search.root() => mv,
                _ => {
                    stats.record_fallback();
                    warn!(%player, "search found no move, playing randomly");
                    random_move(&legal, rng)
                }
            }
        } else {
            random_move(&legal, rng)
        };

        debug!(%mv, "play");
        state = state.next(&mv)?;
        moves.push(Some(mv));
    }

    let winner = state.winner();
    stats.record_game(iterations, state.reward_for(mcts_player));
    Ok(GameRecord {
        moves,
        final_state: state,
        winner,
        mcts_player,
        stats,
    })
}

fn random_move<R: Rng>(legal: &[Move], rng: &mut R) -> Move {
    legal[rng.random_range(0..legal.len())]
}
