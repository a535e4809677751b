//! Human readable output: the origin/role grid, per-category summaries and a
//! digest of the full result for comparing runs.

use std::fmt::Write;

use sha2::{Digest, Sha256};

use crate::catalog::{Catalog, TraitIndex};
use crate::search::{ScoredTeam, SearchResults};

/// Example teams shown per category.
pub const EXAMPLES_PER_CATEGORY: usize = 3;

/// Origins as rows, roles as columns, characters in the cells (`-` if none).
pub fn trait_grid(catalog: &Catalog) -> String {
    let origins = catalog.origins();
    let roles = catalog.roles();

    let cell = |o: TraitIndex, r: TraitIndex| -> String {
        let names: Vec<&str> = catalog
            .characters()
            .iter()
            .filter(|c| c.origin == o && c.role == r)
            .map(|c| c.id.as_str())
            .collect();
        if names.is_empty() {
            "-".to_string()
        } else {
            names.join("/")
        }
    };
    let rows: Vec<Vec<String>> = origins
        .iter()
        .map(|&o| roles.iter().map(|&r| cell(o, r)).collect())
        .collect();

    let label_width = origins
        .iter()
        .map(|&o| catalog.trait_name(o).len())
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = roles
        .iter()
        .enumerate()
        .map(|(j, &r)| {
            rows.iter()
                .map(|row| row[j].len())
                .chain(std::iter::once(catalog.trait_name(r).len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let _ = write!(out, "{:label_width$}", "");
    for (&r, &w) in roles.iter().zip(&widths) {
        let _ = write!(out, "  {:<w$}", catalog.trait_name(r));
    }
    out.push('\n');
    for (&o, row) in origins.iter().zip(&rows) {
        let _ = write!(out, "{:<label_width$}", catalog.trait_name(o));
        for (value, &w) in row.iter().zip(&widths) {
            let _ = write!(out, "  {:<w$}", value);
        }
        out.push('\n');
    }
    out
}

/// `"{l1} L1 + {l2} L2 = {total} total"`, dropping zero parts.
pub fn composition(team: &ScoredTeam) -> String {
    let mut parts = Vec::new();
    if team.num_l1 > 0 {
        parts.push(format!("{} L1", team.num_l1));
    }
    if team.num_l2 > 0 {
        parts.push(format!("{} L2", team.num_l2));
    }
    format!("{} = {} total", parts.join(" + "), team.total_traits)
}

/// Per-category team counts, composition and a few example teams.
pub fn summarize(results: &SearchResults) -> String {
    let mut out = String::new();
    for category in &results.categories {
        let Some(first) = category.teams.first() else {
            continue;
        };
        let _ = writeln!(
            out,
            "\n{}: {} teams",
            category.label().to_uppercase(),
            category.teams.len()
        );
        let _ = writeln!(out, "  Composition: {}", composition(first));
        for (i, team) in category
            .teams
            .iter()
            .take(EXAMPLES_PER_CATEGORY)
            .enumerate()
        {
            let _ = writeln!(out, "\n  Example {}:", i + 1);
            let _ = writeln!(out, "    Characters: {}", team.characters.join(", "));
            if let Some(d) = &team.dummy {
                let _ = writeln!(out, "    Dummy: {} + {}", d.first, d.second);
            }
            let _ = writeln!(out, "    Active Traits: {}", team.active_traits.join(", "));
        }
    }
    out
}

/// Hex SHA-256 over the category/team listing. Equal results give equal
/// digests.
pub fn fingerprint(results: &SearchResults) -> String {
    let mut hasher = Sha256::new();
    for category in &results.categories {
        for team in &category.teams {
            hasher.update(category.label().as_bytes());
            hasher.update(b"\t");
            hasher.update(team.characters.join(",").as_bytes());
            hasher.update(b"\t");
            hasher.update(team.active_traits.join(",").as_bytes());
            hasher.update(b"\n");
        }
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSpec;
    use crate::config::SearchConfig;
    use crate::search::SearchEngine;

    #[test]
    fn grid_places_characters() {
        let mut spec = CatalogSpec::default();
        spec.origins = vec!["o1".into(), "o2".into()];
        spec.roles = vec!["r1".into(), "r2".into()];
        spec.characters.insert("alpha".into(), vec!["o1".into(), "r2".into()]);
        spec.characters.insert("beta".into(), vec!["o2".into(), "r1".into()]);
        let grid = trait_grid(&Catalog::new(spec).unwrap());
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "    r1    r2   ");
        assert_eq!(lines[1], "o1  -     alpha");
        assert_eq!(lines[2], "o2  beta  -    ");
    }

    #[test]
    fn reference_grid_has_every_character() {
        let cat = Catalog::reference();
        let grid = trait_grid(&cat);
        for c in cat.characters() {
            assert!(grid.contains(&c.id), "missing {}", c.id);
        }
    }

    #[test]
    fn composition_skips_zero_parts() {
        let cat = Catalog::reference();
        let engine = SearchEngine::new(&cat, &SearchConfig::new(2)).unwrap();
        let goblins = cat.characters().iter().position(|c| c.id == "goblins").unwrap();
        let spear = cat.characters().iter().position(|c| c.id == "spear_gobs").unwrap();
        let team = engine.score_members(&[goblins, spear]);
        assert_eq!(composition(&team), "1 L1 = 1 total");
    }

    #[test]
    fn fingerprint_is_stable() {
        let cat = Catalog::reference();
        let engine = SearchEngine::new(&cat, &SearchConfig::new(3)).unwrap();
        let a = engine.find_all_optimal_teams();
        let b = engine.find_all_optimal_teams();
        assert_eq!(fingerprint(&a), fingerprint(&b));
        assert_eq!(fingerprint(&a).len(), 64);
        assert_ne!(fingerprint(&a), fingerprint(&SearchResults::default()));
    }
}
