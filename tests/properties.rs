//! Property tests over random play sequences.

use mcts::games::othello::Othello;
use mcts::games::tictactoe::TicTacToe;
use mcts::{GameRules, MctsConfig, State, MCTS};
use proptest::prelude::*;

/// Plays `choices` as indices into the legal-move list, passing when stuck.
fn walk<G: GameRules>(game: G, choices: &[usize]) -> Vec<State<G>> {
    let mut states = vec![game.start()];
    for &choice in choices {
        let state = states[states.len() - 1].clone();
        if state.is_terminal() {
            break;
        }
        let moves = state.moves();
        let next = if moves.is_empty() {
            match state.pass() {
                Some(passed) => passed,
                None => break,
            }
        } else {
            state.next(&moves[choice % moves.len()]).unwrap()
        };
        states.push(next);
    }
    states
}

proptest! {
    #[test]
    fn tictactoe_apply_move_leaves_input_untouched(
        choices in prop::collection::vec(0usize..9, 0..9)
    ) {
        for state in walk(TicTacToe, &choices) {
            let snapshot = state.position().clone();
            for mv in state.moves() {
                let next = state.next(&mv).unwrap();
                prop_assert_eq!(state.position(), &snapshot);
                prop_assert_eq!(next.position().count(), snapshot.count() + 1);
            }
        }
    }

    #[test]
    fn othello_apply_move_leaves_input_untouched(
        choices in prop::collection::vec(0usize..32, 0..40)
    ) {
        let states = walk(Othello, &choices);
        let state = &states[states.len() - 1];
        let snapshot = state.position().clone();
        for mv in state.moves() {
            let next = state.next(&mv).unwrap();
            prop_assert_eq!(state.position(), &snapshot);
            prop_assert!(next.position().count_of(mv.player) >= snapshot.count_of(mv.player) + 2);
        }
    }

    #[test]
    fn player_to_move_alternates(choices in prop::collection::vec(0usize..9, 1..9)) {
        let states = walk(TicTacToe, &choices);
        for pair in states.windows(2) {
            prop_assert_eq!(pair[1].player(), pair[0].player().opponent());
        }
    }

    #[test]
    fn win_scores_stay_in_bounds(seed in any::<u64>(), iterations in 1usize..120) {
        let config = MctsConfig::plain().with_seed(seed);
        let mut search = MCTS::new(TicTacToe.start(), config);
        search.search_iterations(iterations);
        prop_assert_eq!(search.node(search.root()).playouts(), iterations as u64);
        for (_, node) in search.tree().iter() {
            prop_assert!(node.win_score() <= 2 * node.playouts());
        }
    }
}
