//! End-to-end scenarios exercising the public search and rules API.

use mcts::games::othello::{self, Othello, BLACK, WHITE};
use mcts::games::tictactoe::{self, TicTacToe, O, X};
use mcts::{GameRules, IllegalReason, MctsConfig, Move, State, MCTS};

fn tictactoe_state(text: &str, last: Option<mcts::Player>) -> State<TicTacToe> {
    State::new(TicTacToe, tictactoe::Position::parse(text, last).unwrap())
}

#[test]
fn single_iteration_completes_top_row() {
    let state = tictactoe_state("X X .\n. O .\n. . .", Some(O));
    let mut search = MCTS::new(state, MctsConfig::default().with_seed(1));
    let best = search.search_iterations(1);
    let position = search.node(best).state().position();
    assert_eq!(position.row(0), [Some(X); 3]);
    assert_eq!(search.node(best).state().winner(), Some(X));
}

#[test]
fn consecutive_move_is_rejected() {
    let state = tictactoe_state(". . .\nO O .\n. . .", Some(O));
    let err = state.next(&Move::new(O, 0, 0)).unwrap_err();
    assert_eq!(err.illegal_reason(), Some(IllegalReason::ConsecutiveMove));
    // Nothing is legal for the player who just moved
    assert!(state.legal_moves(O).is_empty());
}

#[test]
fn opening_capture_flips_one_disc() {
    let state = Othello.start();
    let before = state.position().count_of(BLACK);
    let mv = state.moves()[0];
    let next = state.next(&mv).unwrap();

    assert_eq!(next.position().count_of(BLACK), before + 2);
    assert_eq!(next.position().count_of(WHITE), 1);
    assert_eq!(next.player(), WHITE);
}

#[test]
fn full_board_majority_wins() {
    let mut text = String::new();
    for r in 0..8 {
        let row = if r < 5 { "BBBBBBBB" } else { "WWWWWWWW" };
        text.push_str(row);
        text.push('\n');
    }
    let position = othello::Position::parse(&text, Some(WHITE)).unwrap();
    let state = State::new(Othello, position);
    assert!(state.is_terminal());
    assert_eq!(state.winner(), Some(BLACK));
    assert_eq!(state.position().count(), 64);
}

#[test]
fn legal_moves_are_stable() {
    let state = Othello.start();
    assert_eq!(state.moves(), state.moves());
    let after = state.next(&state.moves()[2]).unwrap();
    assert_eq!(after.moves(), after.moves());
}

#[test]
fn search_statistics_are_consistent() {
    let mut search = MCTS::new(TicTacToe.start(), MctsConfig::plain().with_seed(17));
    let best = search.search_iterations(300);
    let root = search.root();

    assert_eq!(search.node(root).playouts(), 300);
    let max_child = search
        .node(root)
        .children()
        .iter()
        .map(|&c| search.node(c).playouts())
        .max()
        .unwrap();
    assert_eq!(search.node(best).playouts(), max_child);

    for (_, node) in search.tree().iter() {
        assert!(node.win_score() <= 2 * node.playouts());
        for &child in node.children() {
            assert!(node.playouts() >= search.node(child).playouts());
        }
    }
}

#[test]
fn othello_search_plays_a_legal_move() {
    let state = Othello.start();
    let mut search = MCTS::new(state.clone(), MctsConfig::default().with_seed(99));
    let best = search.search_iterations(40);
    let mv = search.node(best).move_from_parent().unwrap();
    assert!(state.moves().contains(&mv));
    assert_eq!(search.last_stats().iterations, 40);
}

#[test]
fn terminal_root_signals_fallback() {
    let state = tictactoe_state("X O X\nX O O\nO X X", Some(X));
    let mut search = MCTS::new(state, MctsConfig::default());
    let best = search.search_iterations(50);
    assert_eq!(best, search.root());
    assert_eq!(search.node(best).move_from_parent(), None);
}
