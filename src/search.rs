//! Optimal team search.
//!
//! Teams are enumerated depth first over the catalog in ascending character
//! order, each character chosen at most once and later choices drawn only
//! from characters after the last one chosen, so every character set is
//! visited at most once per search. Trait counts are updated in place on the
//! way down and restored on the way back up; no branch ever observes a
//! sibling's additions.
//!
//! Teams with zero high-level traits come from a single DFS that refuses any
//! character pushing a trait to its high-level requirement. Teams with
//! exactly `k >= 1` high-level traits cannot be described by such a local
//! rule, so every `k`-subset of high-level capable traits is turned into a
//! set of per-trait floors and searched separately, then merged.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::activation::{activate, Activation, TraitCounts};
use crate::catalog::{Catalog, TraitIndex};
use crate::combinations::{choose, combinations};
use crate::config::{Dummy, SearchConfig};
use crate::stats::SearchStats;
use crate::SynergyError;

/// A complete team with its activation summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredTeam {
    /// Character ids in ascending order; the team's identity.
    pub characters: Vec<String>,
    pub dummy: Option<Dummy>,
    /// Sorted `"{trait}_{threshold}"` labels.
    pub active_traits: Vec<String>,
    pub num_l1: usize,
    pub num_l2: usize,
    pub total_traits: usize,
    pub trait_counts: BTreeMap<String, u32>,
}

/// Optimal teams for one high-level trait count.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResult {
    pub high_level: usize,
    pub best_total: usize,
    pub teams: Vec<ScoredTeam>,
    pub stats: SearchStats,
}

impl CategoryResult {
    /// Short label used in file names, e.g. `0l2`.
    pub fn label(&self) -> String {
        format!("{}l2", self.high_level)
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Non-empty categories in increasing high-level order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub categories: Vec<CategoryResult>,
}

impl SearchResults {
    pub fn from_categories<I: IntoIterator<Item = CategoryResult>>(categories: I) -> Self {
        let mut categories: Vec<CategoryResult> =
            categories.into_iter().filter(|c| !c.is_empty()).collect();
        categories.sort_by_key(|c| c.high_level);
        Self { categories }
    }

    pub fn get(&self, high_level: usize) -> Option<&CategoryResult> {
        self.categories.iter().find(|c| c.high_level == high_level)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

pub struct SearchEngine<'a> {
    catalog: &'a Catalog,
    team_size: usize,
    high_level_min: u32,
    dummy: Option<Dummy>,
    dummy_traits: Option<[TraitIndex; 2]>,
    /// Smallest threshold >= `high_level_min`, per trait.
    high_requirement: Vec<Option<u32>>,
    /// High-level capable traits with their requirement, ascending by name.
    capable: Vec<(TraitIndex, u32)>,
}

impl<'a> SearchEngine<'a> {
    pub fn new(catalog: &'a Catalog, config: &SearchConfig) -> Result<Self, SynergyError> {
        config.validate()?;

        let dummy_traits = match &config.dummy {
            Some(d) => {
                let resolve = |name: &str| {
                    catalog.trait_index(name).ok_or_else(|| {
                        SynergyError::Config(format!("dummy trait '{name}' is not in the catalog"))
                    })
                };
                Some([resolve(&d.first)?, resolve(&d.second)?])
            }
            None => None,
        };

        let high_requirement: Vec<Option<u32>> = (0..catalog.trait_count())
            .map(|t| {
                catalog
                    .thresholds(t)
                    .iter()
                    .copied()
                    .find(|&level| level >= config.high_level_min)
            })
            .collect();
        let capable = high_requirement
            .iter()
            .enumerate()
            .filter_map(|(t, req)| req.map(|r| (t, r)))
            .collect();

        Ok(Self {
            catalog,
            team_size: config.team_size,
            high_level_min: config.high_level_min,
            dummy: config.dummy.clone(),
            dummy_traits,
            high_requirement,
            capable,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn team_size(&self) -> usize {
        self.team_size
    }

    pub fn dummy(&self) -> Option<&Dummy> {
        self.dummy.as_ref()
    }

    /// Names of the traits able to reach high level, ascending.
    pub fn capable_traits(&self) -> Vec<&str> {
        self.capable
            .iter()
            .map(|&(t, _)| self.catalog.trait_name(t))
            .collect()
    }

    /// Upper estimate of how many traits can be high-level at once.
    ///
    /// Each high-level trait needs `high_level_min` units; a character can
    /// serve two high-level traits at most, allowing two shared units without
    /// a dummy and three with one.
    pub fn max_high_level(&self) -> usize {
        let has_dummy = self.dummy_traits.is_some();
        let units = self.team_size + usize::from(has_dummy);
        let intersections = if has_dummy { 3 } else { 2 };
        ((units + intersections) / self.high_level_min as usize).min(self.capable.len())
    }

    /// Run the search for one category.
    pub fn search_category(&self, high_level: usize) -> CategoryResult {
        if high_level == 0 {
            self.search_zero_high()
        } else {
            self.search_high(high_level)
        }
    }

    /// Every category from 0 to [`max_high_level`](Self::max_high_level),
    /// empty ones omitted.
    pub fn find_all_optimal_teams(&self) -> SearchResults {
        let max_k = self.max_high_level();
        log::info!("maximum possible high-level traits: {max_k}");
        log::debug!(
            "{} candidate teams before pruning",
            choose(self.catalog.characters().len(), self.team_size)
        );
        SearchResults::from_categories((0..=max_k).map(|k| self.search_category(k)))
    }

    /// Optimal teams with no trait at high level.
    pub fn search_zero_high(&self) -> CategoryResult {
        log::info!("searching for 0 high-level teams");
        let mut search = ZeroHighSearch {
            engine: self,
            team: Vec::with_capacity(self.team_size),
            counts: self.initial_counts(),
            best_total: 0,
            best: Vec::new(),
            stats: SearchStats::new(),
        };
        search.dfs(0);

        let mut seen = HashSet::new();
        let teams: Vec<ScoredTeam> = search
            .best
            .into_iter()
            .filter(|t| seen.insert(t.characters.clone()))
            .collect();

        search.stats.report("0l2", teams.len(), search.best_total);
        CategoryResult {
            high_level: 0,
            best_total: search.best_total,
            teams,
            stats: search.stats,
        }
    }

    /// Optimal teams with exactly `high_level` traits at high level.
    ///
    /// Each `high_level`-subset of capable traits is searched as a set of
    /// floors; accepted teams are merged by character set in subset order and
    /// filtered to the best total across all subsets. With `high_level == 0`
    /// this degenerates to an unpruned search of the zero category.
    pub fn search_high(&self, high_level: usize) -> CategoryResult {
        log::info!("searching for {high_level} high-level teams");
        let target_sets: Vec<Vec<(TraitIndex, u32)>> =
            combinations(&self.capable, high_level).collect();
        let outcomes = self.run_target_sets(&target_sets, high_level);

        let mut stats = SearchStats::new();
        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        let mut best_total = 0;
        for (teams, target_stats) in outcomes {
            stats.merge(&target_stats);
            for team in teams {
                if seen.insert(team.characters.clone()) {
                    best_total = best_total.max(team.total_traits);
                    merged.push(team);
                }
            }
        }
        merged.retain(|t| t.total_traits == best_total);

        let label = format!("{high_level}l2");
        stats.report(&label, merged.len(), best_total);
        CategoryResult {
            high_level,
            best_total,
            teams: merged,
            stats,
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run_target_sets(
        &self,
        target_sets: &[Vec<(TraitIndex, u32)>],
        high_level: usize,
    ) -> Vec<(Vec<ScoredTeam>, SearchStats)> {
        target_sets
            .iter()
            .map(|targets| self.search_targets(targets, high_level))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn run_target_sets(
        &self,
        target_sets: &[Vec<(TraitIndex, u32)>],
        high_level: usize,
    ) -> Vec<(Vec<ScoredTeam>, SearchStats)> {
        use rayon::prelude::*;
        target_sets
            .par_iter()
            .map(|targets| self.search_targets(targets, high_level))
            .collect()
    }

    fn search_targets(
        &self,
        targets: &[(TraitIndex, u32)],
        high_level: usize,
    ) -> (Vec<ScoredTeam>, SearchStats) {
        let mut search = TargetSearch {
            engine: self,
            targets,
            high_level,
            team: Vec::with_capacity(self.team_size),
            counts: self.initial_counts(),
            accepted: Vec::new(),
            stats: SearchStats::new(),
        };
        search.stats.target_sets = 1;
        search.dfs(0);
        log::debug!(
            "targets [{}]: {} teams accepted",
            targets
                .iter()
                .map(|&(t, _)| self.catalog.trait_name(t))
                .collect::<Vec<_>>()
                .join(", "),
            search.accepted.len()
        );
        (search.accepted, search.stats)
    }

    /// Score an arbitrary team given as indices into the catalog's
    /// characters, dummy included.
    pub fn score_members(&self, members: &[usize]) -> ScoredTeam {
        let mut counts = self.initial_counts();
        for &i in members {
            for t in self.catalog.characters()[i].traits() {
                counts.add(t);
            }
        }
        let mut sorted = members.to_vec();
        sorted.sort_unstable();
        let activation = self.activate(&counts);
        self.scored_team(&sorted, &counts, &activation)
    }

    fn initial_counts(&self) -> TraitCounts {
        let mut counts = TraitCounts::new(self.catalog.trait_count());
        if let Some(traits) = self.dummy_traits {
            for t in traits {
                counts.add(t);
            }
        }
        counts
    }

    fn activate(&self, counts: &TraitCounts) -> Activation {
        activate(counts, self.catalog, self.high_level_min)
    }

    /// Whether one more unit of `t` would bring it to its high-level requirement.
    fn reaches_high(&self, counts: &TraitCounts, t: TraitIndex) -> bool {
        self.high_requirement[t].map_or(false, |req| counts.get(t) + 1 >= req)
    }

    /// `members` must be ascending.
    fn scored_team(
        &self,
        members: &[usize],
        counts: &TraitCounts,
        activation: &Activation,
    ) -> ScoredTeam {
        let characters = self.catalog.characters();
        ScoredTeam {
            characters: members.iter().map(|&i| characters[i].id.clone()).collect(),
            dummy: self.dummy.clone(),
            active_traits: activation.labels(self.catalog),
            num_l1: activation.num_l1,
            num_l2: activation.num_l2,
            total_traits: activation.total(),
            trait_counts: counts
                .nonzero()
                .map(|(t, c)| (self.catalog.trait_name(t).to_string(), c))
                .collect(),
        }
    }
}

struct ZeroHighSearch<'e, 'a> {
    engine: &'e SearchEngine<'a>,
    team: Vec<usize>,
    counts: TraitCounts,
    best_total: usize,
    best: Vec<ScoredTeam>,
    stats: SearchStats,
}

impl ZeroHighSearch<'_, '_> {
    fn dfs(&mut self, start: usize) {
        self.stats.tick_node();
        let engine = self.engine;

        if self.team.len() == engine.team_size {
            self.stats.tick_team();
            self.accept();
            return;
        }

        // Each remaining character adds at most two new traits, and the last
        // one's new traits hold a single unit, below every threshold.
        let slots_left = engine.team_size - self.team.len();
        if self.counts.distinct() + 2 * slots_left <= self.best_total {
            return;
        }

        let characters = engine.catalog.characters();
        for (i, character) in characters.iter().enumerate().skip(start) {
            let [origin, role] = character.traits();
            if engine.reaches_high(&self.counts, origin) || engine.reaches_high(&self.counts, role)
            {
                continue;
            }
            self.counts.add(origin);
            self.counts.add(role);
            self.team.push(i);
            self.dfs(i + 1);
            self.team.pop();
            self.counts.remove(role);
            self.counts.remove(origin);
        }
    }

    fn accept(&mut self) {
        let activation = self.engine.activate(&self.counts);
        if activation.num_l2 != 0 {
            return;
        }
        let total = activation.total();
        if total > self.best_total {
            self.best_total = total;
            self.best.clear();
        } else if total < self.best_total {
            return;
        }
        let team = self
            .engine
            .scored_team(&self.team, &self.counts, &activation);
        self.best.push(team);
    }
}

struct TargetSearch<'e, 'a> {
    engine: &'e SearchEngine<'a>,
    targets: &'e [(TraitIndex, u32)],
    high_level: usize,
    team: Vec<usize>,
    counts: TraitCounts,
    accepted: Vec<ScoredTeam>,
    stats: SearchStats,
}

impl TargetSearch<'_, '_> {
    fn dfs(&mut self, start: usize) {
        self.stats.tick_node();
        let engine = self.engine;

        if self.team.len() == engine.team_size {
            self.stats.tick_team();
            self.accept();
            return;
        }

        // a character adds at most one unit to any given trait
        let slots_left = (engine.team_size - self.team.len()) as u32;
        if self
            .targets
            .iter()
            .any(|&(t, req)| self.counts.get(t) + slots_left < req)
        {
            return;
        }

        let characters = engine.catalog.characters();
        for (i, character) in characters.iter().enumerate().skip(start) {
            let [origin, role] = character.traits();
            self.counts.add(origin);
            self.counts.add(role);
            self.team.push(i);
            self.dfs(i + 1);
            self.team.pop();
            self.counts.remove(role);
            self.counts.remove(origin);
        }
    }

    fn accept(&mut self) {
        if self
            .targets
            .iter()
            .any(|&(t, req)| self.counts.get(t) < req)
        {
            return;
        }
        // A non-targeted trait may have cleared its requirement too.
        let activation = self.engine.activate(&self.counts);
        if activation.num_l2 != self.high_level {
            return;
        }
        let team = self
            .engine
            .scored_team(&self.team, &self.counts, &activation);
        self.accepted.push(team);
    }
}
