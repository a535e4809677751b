//! Trait activation scoring.
//!
//! A trait is active at the highest threshold its team count satisfies, so
//! a trait never reports two tiers at once.

use crate::catalog::{Catalog, TraitIndex};

/// Per-trait unit counts of a (partial) team, indexed by [`TraitIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitCounts(Vec<u32>);

impl TraitCounts {
    pub fn new(trait_count: usize) -> Self {
        TraitCounts(vec![0; trait_count])
    }

    pub fn get(&self, index: TraitIndex) -> u32 {
        self.0[index]
    }

    pub fn add(&mut self, index: TraitIndex) {
        self.0[index] += 1;
    }

    pub fn remove(&mut self, index: TraitIndex) {
        self.0[index] -= 1;
    }

    /// Number of traits with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.0.iter().filter(|&&c| c > 0).count()
    }

    /// `(trait, count)` pairs with a non-zero count.
    pub fn nonzero(&self) -> impl Iterator<Item = (TraitIndex, u32)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(t, &c)| (t, c))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// L1
    Low,
    /// L2
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveTrait {
    pub trait_index: TraitIndex,
    pub threshold: u32,
    pub tier: Tier,
}

/// Active traits of a team, at most one entry per trait.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Activation {
    pub active: Vec<ActiveTrait>,
    pub num_l1: usize,
    pub num_l2: usize,
}

impl Activation {
    /// Team score: number of active traits of any tier.
    pub fn total(&self) -> usize {
        self.active.len()
    }

    /// Sorted `"{trait}_{threshold}"` labels.
    pub fn labels(&self, catalog: &Catalog) -> Vec<String> {
        let mut labels: Vec<String> = self
            .active
            .iter()
            .map(|a| format!("{}_{}", catalog.trait_name(a.trait_index), a.threshold))
            .collect();
        labels.sort();
        labels
    }
}

/// Score a count vector against the catalog's level table.
pub fn activate(counts: &TraitCounts, catalog: &Catalog, high_level_min: u32) -> Activation {
    let mut out = Activation::default();
    for (trait_index, count) in counts.nonzero() {
        let Some(&threshold) = catalog
            .thresholds(trait_index)
            .iter()
            .rev()
            .find(|&&level| count >= level)
        else {
            continue;
        };
        let tier = if threshold >= high_level_min {
            out.num_l2 += 1;
            Tier::High
        } else {
            out.num_l1 += 1;
            Tier::Low
        };
        out.active.push(ActiveTrait {
            trait_index,
            threshold,
            tier,
        });
    }
    out
}
