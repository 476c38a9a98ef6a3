//! The search driver: select → expand → simulate → backpropagate.

use crate::config::MctsConfig;
use crate::rollout::{simulate, HeuristicRollout, RolloutPolicy};
use crate::stats::SearchStatistics;
use crate::tactics;
use crate::tree::{NodeId, SearchNode, SearchTree};
use crate::{GameRules, State};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Monte Carlo Tree Search over a single root position.
///
/// One instance is built per move decision and owns its tree exclusively.
/// The search is single-threaded; parallelism belongs to the caller, which
/// can run independent searches side by side.
pub struct MCTS<G: GameRules, P: RolloutPolicy<G> = HeuristicRollout> {
    tree: SearchTree<G>,
    policy: P,
    rng: Xoshiro256PlusPlus,
    exploration: f64,
    depth_cap: Option<usize>,
    tactical_shortcut: bool,
    stats: SearchStatistics,
}

impl<G: GameRules> MCTS<G, HeuristicRollout> {
    /// Creates a search with the heuristic rollout policy.
    pub fn new(root: State<G>, config: MctsConfig) -> Self {
        let policy = HeuristicRollout::new(config.greedy_probability);
        Self::with_policy(root, config, policy)
    }
}

impl<G: GameRules, P: RolloutPolicy<G>> MCTS<G, P> {
    /// Creates a search with a custom rollout policy.
    pub fn with_policy(root: State<G>, config: MctsConfig, policy: P) -> Self {
        let game = root.game();
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        MCTS {
            tree: SearchTree::new(root),
            policy,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            exploration: config
                .exploration
                .unwrap_or_else(|| game.exploration_constant()),
            depth_cap: config.depth_cap.or_else(|| game.rollout_depth_cap()),
            tactical_shortcut: config.tactical_shortcut,
            stats: SearchStatistics::default(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn node(&self, id: NodeId) -> &SearchNode<G> {
        self.tree.get(id)
    }

    pub fn tree(&self) -> &SearchTree<G> {
        &self.tree
    }

    /// Statistics of the most recent `search_iterations` call
    pub fn last_stats(&self) -> &SearchStatistics {
        &self.stats
    }

    /// Runs up to `iterations` iterations and returns the chosen node.
    ///
    /// Returns the root itself when the root is terminal or has no children
    /// after the search; the caller should then fall back to another move
    /// source. When the tactical shortcut fires, the returned node is a child
    /// of the root that is not part of the root's child list.
    pub fn search_iterations(&mut self, iterations: usize) -> NodeId {
        let start = Instant::now();
        let root = self.tree.root();
        self.stats = SearchStatistics::default();

        if self.tree.get(root).is_leaf() {
            debug!("root is terminal, nothing to search");
            return self.finish(root, start);
        }

        if self.tactical_shortcut {
            if let Some(chosen) = self.shortcut() {
                self.stats.shortcut = true;
                return self.finish(chosen, start);
            }
        }

        for _ in 0..iterations {
            self.run_iteration();
            self.stats.iterations += 1;
        }

        let best = match self.tree.most_played_child(root) {
            Some(child) => child,
            None => {
                warn!("root has no children after search, caller must fall back");
                root
            }
        };
        self.finish(best, start)
    }

    fn finish(&mut self, chosen: NodeId, start: Instant) -> NodeId {
        self.stats.total_nodes = self.tree.len();
        self.stats.root_playouts = self.tree.get(self.tree.root()).playouts();
        self.stats.elapsed = start.elapsed();
        let node = self.tree.get(chosen);
        debug!(
            iterations = self.stats.iterations,
            nodes = self.stats.total_nodes,
            root_playouts = self.stats.root_playouts,
            shortcut = self.stats.shortcut,
            chosen_playouts = node.playouts(),
            chosen_win_rate = node.win_rate(),
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "search finished"
        );
        chosen
    }

    /// Immediate win or block at the root, allocated as a detached child.
    fn shortcut(&mut self) -> Option<NodeId> {
        let root = self.tree.root();
        let state = self.tree.get(root).state().clone();
        let mv = tactics::tactical_move(&state.game(), state.position(), state.player())?;
        match state.next(&mv) {
            Ok(next) => {
                debug!(%mv, "tactical shortcut");
                Some(self.tree.add_detached(root, next, Some(mv)))
            }
            Err(err) => {
                warn!(%err, "tactical move rejected, searching instead");
                None
            }
        }
    }

    /// Runs one select → expand → simulate → backpropagate pass.
    pub fn run_iteration(&mut self) {
        // --- Selection Phase ---
        let mut current = self.tree.root();
        loop {
            let node = self.tree.get(current);
            if node.is_leaf() || !node.is_expanded() {
                break;
            }
            match self.tree.select_child(current, self.exploration) {
                Some(child) => current = child,
                None => break,
            }
        }

        // --- Expansion Phase ---
        if !self.tree.get(current).is_leaf() && self.tree.mark_expanded(current) {
            self.expand(current);
            if let Some(child) = self.tree.select_child(current, self.exploration) {
                current = child;
            }
        }

        // --- Simulation Phase ---
        let state = self.tree.get(current).state();
        let perspective = state.player().opponent();
        let reward = simulate(state, &self.policy, perspective, self.depth_cap, &mut self.rng);

        // --- Backpropagation Phase ---
        self.tree.backpropagate(current, reward);
    }

    /// Adds one child per legal move, or a single pass child when the mover
    /// is stuck and the game allows passing.
    fn expand(&mut self, id: NodeId) {
        let state = self.tree.get(id).state().clone();
        let moves = state.moves();

        if moves.is_empty() {
            match state.pass() {
                Some(passed) => {
                    trace!(player = %state.player(), "expanding pass");
                    self.tree.add_child(id, passed, None);
                }
                None => warn!("non-terminal node without moves or pass"),
            }
            return;
        }

        trace!(children = moves.len(), "expanding node");
        for mv in moves {
            match state.next(&mv) {
                Ok(next) => {
                    self.tree.add_child(id, next, Some(mv));
                }
                Err(err) => warn!(%err, %mv, "skipping illegal move during expansion"),
            }
        }
    }
}
