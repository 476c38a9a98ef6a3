//! MCTS tree structure with arena allocation.
//!
//! Nodes live in a contiguous Vec and refer to each other by [`NodeId`].
//! The tree is strictly rooted: a node owns its children through the arena,
//! and the parent link is a plain index used only to walk upward during
//! backpropagation.

use crate::{GameRules, Move, State};

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Converts a reward in `[0, 1]` to a win-score increment: 2 for a win,
/// 1 for a draw, 0 for a loss. Heuristic rewards round to the nearest step.
pub fn score_increment(reward: f64) -> u64 {
    (reward.clamp(0.0, 1.0) * 2.0).round() as u64
}

/// UCB1 value of a child. Unvisited children score `+∞`.
pub fn ucb1(win_score: u64, playouts: u64, parent_playouts: u64, exploration: f64) -> f64 {
    if playouts == 0 {
        return f64::INFINITY;
    }
    let playouts = playouts as f64;
    let parent = parent_playouts.max(1) as f64;
    win_score as f64 / playouts + exploration * (parent.ln() / playouts).sqrt()
}

/// A node in the search tree.
///
/// Statistics are from the perspective of the player who moved into this
/// node. `win_score` counts 2 per win and 1 per draw, so it always lies in
/// `[0, 2 * playouts]`.
#[derive(Debug, Clone)]
pub struct SearchNode<G: GameRules> {
    state: State<G>,
    parent: Option<NodeId>,
    action: Option<Move>,
    children: Vec<NodeId>,
    win_score: u64,
    playouts: u64,
    expanded: bool,
    /// A terminal node's initial playout, not yet matched by a backpropagation
    seed_pending: bool,
}

impl<G: GameRules> SearchNode<G> {
    /// Creates a node. Terminal states start with one playout scored for the
    /// player who just moved.
    pub fn new(state: State<G>, parent: Option<NodeId>, action: Option<Move>) -> Self {
        let mut node = SearchNode {
            state,
            parent,
            action,
            children: Vec::new(),
            win_score: 0,
            playouts: 0,
            expanded: false,
            seed_pending: false,
        };
        if node.is_leaf() {
            let mover = node.state.player().opponent();
            node.playouts = 1;
            node.win_score = score_increment(node.state.reward_for(mover));
            node.seed_pending = true;
        }
        node
    }

    pub fn state(&self) -> &State<G> {
        &self.state
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The move that produced this node. `None` for the root and for passes.
    pub fn move_from_parent(&self) -> Option<Move> {
        self.action
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn playouts(&self) -> u64 {
        self.playouts
    }

    pub fn win_score(&self) -> u64 {
        self.win_score
    }

    /// Win rate in `[0, 1]`, or 0 when unvisited
    pub fn win_rate(&self) -> f64 {
        if self.playouts == 0 {
            0.0
        } else {
            self.win_score as f64 / (2 * self.playouts) as f64
        }
    }

    /// Terminal nodes are leaves and are never expanded.
    pub fn is_leaf(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Records one playout with the given reward
    pub(crate) fn update(&mut self, reward: f64) {
        self.playouts += 1;
        self.win_score += score_increment(reward);
    }
}

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree<G: GameRules> {
    /// Arena storing all nodes
    nodes: Vec<SearchNode<G>>,

    /// Root node index (always 0)
    root: NodeId,
}

impl<G: GameRules> SearchTree<G> {
    /// Create a new tree holding only the root.
    pub fn new(root_state: State<G>) -> Self {
        Self {
            nodes: vec![SearchNode::new(root_state, None, None)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<G> {
        &self.nodes[id.index()]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<G> {
        &mut self.nodes[id.index()]
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn allocate(&mut self, node: SearchNode<G>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Add a child to a parent node and return the child's ID.
    pub fn add_child(&mut self, parent: NodeId, state: State<G>, action: Option<Move>) -> NodeId {
        let child = self.allocate(SearchNode::new(state, Some(parent), action));
        self.get_mut(parent).children.push(child);
        child
    }

    /// Allocate a node that points at `parent` without being one of its
    /// children. Used for moves chosen outside the search loop.
    pub fn add_detached(
        &mut self,
        parent: NodeId,
        state: State<G>,
        action: Option<Move>,
    ) -> NodeId {
        self.allocate(SearchNode::new(state, Some(parent), action))
    }

    /// Flags a node as expanded. Returns false if it already was.
    pub fn mark_expanded(&mut self, id: NodeId) -> bool {
        let node = self.get_mut(id);
        !std::mem::replace(&mut node.expanded, true)
    }

    /// Select the child with the highest UCB1 value; the first one wins ties.
    pub fn select_child(&self, id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.get(id);
        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;
        for &child_id in &node.children {
            let child = self.get(child_id);
            let score = ucb1(child.win_score, child.playouts, node.playouts, exploration);
            if best.is_none() || score > best_score {
                best = Some(child_id);
                best_score = score;
            }
        }
        best
    }

    /// The child with the most playouts (the "robust child"); the first one wins ties.
    pub fn most_played_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for &child_id in &self.get(id).children {
            let better = match best {
                None => true,
                Some(b) => self.get(child_id).playouts > self.get(b).playouts,
            };
            if better {
                best = Some(child_id);
            }
        }
        best
    }

    /// Backpropagate a reward from a node to the root.
    /// The reward is flipped at each level (opponent's perspective).
    ///
    /// The first playout through a terminal node is already counted by its
    /// initial statistics, so that node is skipped once and its ancestors
    /// are updated as usual. This keeps every parent at least as visited as
    /// any of its children.
    pub fn backpropagate(&mut self, from: NodeId, reward: f64) {
        let mut current = Some(from);
        let mut reward = reward;
        let start = self.get_mut(from);
        if std::mem::replace(&mut start.seed_pending, false) {
            current = start.parent;
            reward = 1.0 - reward;
        }
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.update(reward);
            current = node.parent;
            reward = 1.0 - reward;
        }
    }

    /// Overwrites a node's statistics with the sum of its children's.
    /// Statistics are otherwise only ever accumulated.
    pub fn recompute_from_children(&mut self, id: NodeId) {
        if self.get(id).children.is_empty() {
            return;
        }
        let (wins, playouts) = self
            .get(id)
            .children
            .iter()
            .map(|&c| self.get(c))
            .fold((0, 0), |(w, p), child| (w + child.win_score, p + child.playouts));
        let node = self.get_mut(id);
        node.win_score = wins;
        node.playouts = playouts;
    }

    /// Iterate over all nodes in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode<G>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }
}
