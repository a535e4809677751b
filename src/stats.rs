//! `SearchStats` tracks how much of the team space one search visited.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// DFS nodes entered, full teams included.
    pub explored: u64,
    /// Full teams scored.
    pub complete_teams: u64,
    /// Target combinations searched (fixed-k search only).
    pub target_sets: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick_node(&mut self) {
        self.explored += 1;
    }

    pub fn tick_team(&mut self) {
        self.complete_teams += 1;
    }

    pub fn merge(&mut self, other: &SearchStats) {
        self.explored += other.explored;
        self.complete_teams += other.complete_teams;
        self.target_sets += other.target_sets;
    }

    pub fn report(&self, label: &str, optimal: usize, best_total: usize) {
        log::info!(
            "{label}: explored {} states ({} full teams), found {} optimal teams with {} traits",
            self.explored,
            self.complete_teams,
            optimal,
            best_total
        );
    }
}
