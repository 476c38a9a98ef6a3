//! Search and match statistics.

use std::collections::BTreeMap;
use std::time::Duration;

/// Statistics for one `search_iterations` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStatistics {
    /// Iterations actually run (0 when the root was terminal or a shortcut fired)
    pub iterations: usize,
    /// Nodes allocated in the tree, synthetic ones included
    pub total_nodes: usize,
    pub root_playouts: u64,
    /// True when the move came from the tactical shortcut
    pub shortcut: bool,
    pub elapsed: Duration,
}

impl SearchStatistics {
    /// Iterations per second, or 0 if nothing was timed
    pub fn iterations_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.iterations as f64 / secs
        } else {
            0.0
        }
    }
}

/// Results for one iteration budget.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BudgetStatistics {
    pub games: u32,
    /// Games that ended with a winner
    pub decided: u32,
    pub mcts_wins: u32,
    pub searches: u32,
    pub search_time: Duration,
}

impl BudgetStatistics {
    /// Share of decided games won by MCTS; draws are left out
    pub fn success_rate(&self) -> f64 {
        if self.decided == 0 {
            0.0
        } else {
            self.mcts_wins as f64 / self.decided as f64
        }
    }

    pub fn average_search_time(&self) -> Duration {
        if self.searches == 0 {
            Duration::ZERO
        } else {
            self.search_time / self.searches
        }
    }

    fn merge(&mut self, other: &BudgetStatistics) {
        self.games += other.games;
        self.decided += other.decided;
        self.mcts_wins += other.mcts_wins;
        self.searches += other.searches;
        self.search_time += other.search_time;
    }
}

/// Aggregate results of MCTS games against a baseline opponent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchStatistics {
    pub games: u32,
    pub mcts_wins: u32,
    pub draws: u32,
    pub losses: u32,
    /// Number of searches run by the MCTS side
    pub searches: u32,
    /// Searches that returned the root and needed a random fallback move
    pub fallbacks: u32,
    pub total_search_time: Duration,
    /// Breakdown keyed by the per-move iteration budget
    pub by_budget: BTreeMap<usize, BudgetStatistics>,
}

impl MatchStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one search run with an iteration budget of `budget`.
    pub fn record_search(&mut self, budget: usize, stats: &SearchStatistics) {
        self.searches += 1;
        self.total_search_time += stats.elapsed;
        let entry = self.by_budget.entry(budget).or_default();
        entry.searches += 1;
        entry.search_time += stats.elapsed;
    }

    pub fn record_fallback(&mut self) {
        self.fallbacks += 1;
    }

    /// Records one finished game. `reward` is the MCTS side's terminal reward.
    pub fn record_game(&mut self, budget: usize, reward: f64) {
        self.games += 1;
        let entry = self.by_budget.entry(budget).or_default();
        entry.games += 1;
        if reward >= 1.0 {
            self.mcts_wins += 1;
            entry.mcts_wins += 1;
            entry.decided += 1;
        } else if reward <= 0.0 {
            self.losses += 1;
            entry.decided += 1;
        } else {
            self.draws += 1;
        }
    }

    /// Fraction of games won by MCTS
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.mcts_wins as f64 / self.games as f64
        }
    }

    /// Fraction of searches that produced a move without falling back
    pub fn search_success_rate(&self) -> f64 {
        if self.searches == 0 {
            1.0
        } else {
            (self.searches - self.fallbacks) as f64 / self.searches as f64
        }
    }

    /// Mean wall-clock time per search
    pub fn average_search_time(&self) -> Duration {
        if self.searches == 0 {
            Duration::ZERO
        } else {
            self.total_search_time / self.searches
        }
    }

    /// Combine statistics gathered on different threads.
    pub fn merge(&mut self, other: &MatchStatistics) {
        self.games += other.games;
        self.mcts_wins += other.mcts_wins;
        self.draws += other.draws;
        self.losses += other.losses;
        self.searches += other.searches;
        self.fallbacks += other.fallbacks;
        self.total_search_time += other.total_search_time;
        for (budget, stats) in &other.by_budget {
            self.by_budget.entry(*budget).or_default().merge(stats);
        }
    }
}
