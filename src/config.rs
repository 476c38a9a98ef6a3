//! MCTS configuration parameters.

use crate::rollout::{self, DEFAULT_GREEDY_PROBABILITY};

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Exploration constant `C` for UCB1.
    /// `None` uses the game's own constant (√2 for Tic-Tac-Toe, 1.0 for Othello).
    pub exploration: Option<f64>,

    /// Check the root for an immediate win or a forced block before searching.
    /// When one exists it is returned without running any iterations.
    pub tactical_shortcut: bool,

    /// Probability that a rollout plays the best-scoring move rather than a random one.
    pub greedy_probability: f64,

    /// Rollout ply limit. `None` uses the game's own cap (30 for Othello, none for Tic-Tac-Toe).
    pub depth_cap: Option<usize>,

    /// Seed for the search's random number generator.
    /// `None` seeds from the thread-local generator.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration: None,
            tactical_shortcut: true,
            greedy_probability: DEFAULT_GREEDY_PROBABILITY,
            depth_cap: None,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Plain UCT: random rollouts, no tactical shortcut.
    pub fn plain() -> Self {
        Self {
            tactical_shortcut: false,
            greedy_probability: 0.0,
            ..Self::default()
        }
    }

    /// Builder pattern: set the UCB1 exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = Some(c);
        self
    }

    /// Builder pattern: enable or disable the root tactical shortcut.
    pub fn with_tactical_shortcut(mut self, enabled: bool) -> Self {
        self.tactical_shortcut = enabled;
        self
    }

    /// Builder pattern: set the greedy rollout probability.
    /// Values are clamped to `[0, 1]`; non-finite values restore the default.
    pub fn with_greedy_probability(mut self, p: f64) -> Self {
        self.greedy_probability = rollout::greedy_probability(p);
        self
    }

    /// Builder pattern: set the rollout depth cap.
    pub fn with_depth_cap(mut self, plies: usize) -> Self {
        self.depth_cap = Some(plies);
        self
    }

    /// Builder pattern: fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert!(config.tactical_shortcut);
        assert!((config.greedy_probability - 0.9).abs() < 1e-9);
        assert_eq!(config.exploration, None);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_exploration(2.0)
            .with_depth_cap(10)
            .with_seed(3)
            .with_greedy_probability(1.5);

        assert_eq!(config.exploration, Some(2.0));
        assert_eq!(config.depth_cap, Some(10));
        assert_eq!(config.seed, Some(3));
        assert!((config.greedy_probability - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_greedy_probability_uses_default() {
        for p in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let config = MctsConfig::plain().with_greedy_probability(p);
            assert_eq!(config.greedy_probability, DEFAULT_GREEDY_PROBABILITY);
        }
        let config = MctsConfig::default().with_greedy_probability(-0.5);
        assert_eq!(config.greedy_probability, 0.0);
    }

    #[test]
    fn test_plain_config() {
        let config = MctsConfig::plain();
        assert!(!config.tactical_shortcut);
        assert!(config.greedy_probability.abs() < 1e-9);
    }
}
