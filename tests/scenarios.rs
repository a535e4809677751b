use synergy::{fingerprint, Catalog, CatalogSpec, Dummy, SearchConfig, SearchEngine};

fn catalog(levels: &[(&str, &[u32])], chars: &[(&str, &str, &str)]) -> Catalog {
    Catalog::new(CatalogSpec {
        levels: levels
            .iter()
            .map(|(t, l)| (t.to_string(), l.to_vec()))
            .collect(),
        characters: chars
            .iter()
            .map(|(id, o, r)| (id.to_string(), vec![o.to_string(), r.to_string()]))
            .collect(),
        ..CatalogSpec::default()
    })
    .unwrap()
}

#[test]
fn every_pair_of_a_triangle_is_optimal() {
    let cat = catalog(
        &[("x", &[2]), ("y", &[2]), ("z", &[2])],
        &[("a", "x", "y"), ("b", "x", "z"), ("c", "y", "z")],
    );
    let engine = SearchEngine::new(&cat, &SearchConfig::new(2)).unwrap();
    assert_eq!(engine.max_high_level(), 0);
    let results = engine.find_all_optimal_teams();
    assert_eq!(results.categories.len(), 1);
    let zero = &results.categories[0];
    assert_eq!(zero.label(), "0l2");
    assert_eq!(zero.teams.len(), 3);
    assert!(zero.teams.iter().all(|t| t.total_traits == 1));
}

#[test]
fn shared_trait_activates_at_highest_threshold() {
    let cat = catalog(
        &[("x", &[2, 4]), ("p", &[2]), ("q", &[2]), ("r", &[2]), ("s", &[2])],
        &[("a", "x", "p"), ("b", "x", "q"), ("c", "x", "r"), ("d", "x", "s")],
    );
    let engine = SearchEngine::new(&cat, &SearchConfig::new(4)).unwrap();
    let results = engine.find_all_optimal_teams();
    assert!(results.get(0).is_none());
    let one = results.get(1).unwrap();
    assert_eq!(one.teams.len(), 1);
    assert_eq!(one.teams[0].active_traits, ["x_4"]);
    assert_eq!(one.teams[0].trait_counts.get("x"), Some(&4));
}

#[test]
fn reference_pairs_share_one_trait() {
    let cat = Catalog::reference();
    let engine = SearchEngine::new(&cat, &SearchConfig::new(2)).unwrap();
    let results = engine.find_all_optimal_teams();
    assert_eq!(results.categories.len(), 1);
    let zero = results.get(0).unwrap();
    assert_eq!(zero.best_total, 1);
    // 5 origins and 6 roles with four carriers, two origins with two
    assert_eq!(zero.teams.len(), 11 * 6 + 2);
}

#[test]
fn reference_four_member_teams() {
    let cat = Catalog::reference();
    let engine = SearchEngine::new(&cat, &SearchConfig::new(4)).unwrap();
    let results = engine.find_all_optimal_teams();

    let zero = results.get(0).unwrap();
    assert_eq!(zero.best_total, 4);
    let square = ["goblins", "gold_knight", "princess", "spear_gobs"];
    assert!(zero.teams.iter().any(|t| t.characters == square));

    let one = results.get(1).unwrap();
    assert_eq!(one.best_total, 1);
    assert_eq!(one.teams.len(), 11);
    let nobles = ["gold_knight", "musketeer", "prince", "princess"];
    let team = one.teams.iter().find(|t| t.characters == nobles).unwrap();
    assert_eq!(team.active_traits, ["noble_4"]);
}

#[test]
fn dummy_runs_are_deterministic() {
    let cat = Catalog::reference();
    let config = SearchConfig::new(5).with_dummy(Dummy::new("noble", "undead"));
    let engine = SearchEngine::new(&cat, &config).unwrap();
    let first = engine.find_all_optimal_teams();
    let second = engine.find_all_optimal_teams();
    assert!(!first.is_empty());
    assert_eq!(fingerprint(&first), fingerprint(&second));
    for category in &first.categories {
        for team in &category.teams {
            assert_eq!(team.dummy, Some(Dummy::new("noble", "undead")));
            assert_eq!(team.characters.len(), 5);
        }
    }
}
