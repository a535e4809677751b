use proptest::prelude::*;
use std::collections::BTreeSet;
use synergy::{combinations, Catalog, CatalogSpec, Dummy, SearchConfig, SearchEngine};

const TRAITS: usize = 5;

fn trait_name(i: usize) -> String {
    format!("t{i}")
}

fn arb_catalog() -> impl Strategy<Value = CatalogSpec> {
    let levels = prop::collection::vec(
        prop_oneof![
            Just(vec![2u32]),
            Just(vec![2, 4]),
            Just(vec![3, 4]),
            Just(vec![2, 4, 6]),
        ],
        TRAITS,
    );
    let characters = prop::collection::vec((0..TRAITS, 0..TRAITS - 1), 0..=8);
    (levels, characters).prop_map(|(levels, characters)| CatalogSpec {
        levels: levels
            .into_iter()
            .enumerate()
            .map(|(i, l)| (trait_name(i), l))
            .collect(),
        characters: characters
            .into_iter()
            .enumerate()
            .map(|(i, (a, b))| {
                let b = (a + 1 + b) % TRAITS;
                (format!("c{i}"), vec![trait_name(a), trait_name(b)])
            })
            .collect(),
        ..CatalogSpec::default()
    })
}

fn arb_config() -> impl Strategy<Value = SearchConfig> {
    (1usize..=5, prop::option::of((0..TRAITS, 0..TRAITS - 1))).prop_map(|(n, dummy)| {
        let config = SearchConfig::new(n);
        match dummy {
            Some((a, b)) => {
                config.with_dummy(Dummy::new(trait_name(a), trait_name((a + 1 + b) % TRAITS)))
            }
            None => config,
        }
    })
}

/// Best total and optimal character sets among all teams with exactly
/// `high_level` high-level traits, by full enumeration.
fn brute_force(engine: &SearchEngine<'_>, high_level: usize) -> (usize, BTreeSet<Vec<String>>) {
    let indices: Vec<usize> = (0..engine.catalog().characters().len()).collect();
    let teams: Vec<_> = combinations(&indices, engine.team_size())
        .map(|members| engine.score_members(&members))
        .filter(|t| t.num_l2 == high_level)
        .collect();
    let best = teams.iter().map(|t| t.total_traits).max().unwrap_or(0);
    let optimal = teams
        .into_iter()
        .filter(|t| t.total_traits == best)
        .map(|t| t.characters)
        .collect();
    (best, optimal)
}

proptest! {
    #[test]
    fn pruned_search_matches_brute_force(spec in arb_catalog(), config in arb_config()) {
        let catalog = Catalog::new(spec).unwrap();
        let engine = SearchEngine::new(&catalog, &config).unwrap();
        for k in 0..=engine.max_high_level() {
            let (best, expected) = brute_force(&engine, k);
            let result = engine.search_category(k);
            let got: BTreeSet<Vec<String>> =
                result.teams.iter().map(|t| t.characters.clone()).collect();
            prop_assert_eq!(&got, &expected, "category {}", k);
            if !expected.is_empty() {
                prop_assert_eq!(result.best_total, best);
            }
        }
    }

    #[test]
    fn categories_are_exclusive_and_deduplicated(spec in arb_catalog(), config in arb_config()) {
        let catalog = Catalog::new(spec).unwrap();
        let engine = SearchEngine::new(&catalog, &config).unwrap();
        let results = engine.find_all_optimal_teams();
        for category in &results.categories {
            let mut seen = BTreeSet::new();
            for team in &category.teams {
                prop_assert_eq!(team.num_l2, category.high_level);
                prop_assert_eq!(team.total_traits, category.best_total);
                prop_assert_eq!(team.characters.len(), config.team_size);
                prop_assert!(seen.insert(team.characters.clone()));
            }
        }
    }

    #[test]
    fn repeated_runs_are_identical(spec in arb_catalog(), config in arb_config()) {
        let catalog = Catalog::new(spec).unwrap();
        let engine = SearchEngine::new(&catalog, &config).unwrap();
        let first = engine.find_all_optimal_teams();
        let second = engine.find_all_optimal_teams();
        prop_assert_eq!(first.categories.len(), second.categories.len());
        for (a, b) in first.categories.iter().zip(&second.categories) {
            prop_assert_eq!(&a.teams, &b.teams);
        }
    }
}
