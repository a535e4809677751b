//! CSV export of search results, one file per category.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::search::{CategoryResult, ScoredTeam, SearchResults};
use crate::SynergyError;

/// `"{dir}/{base}_{label}.csv"`
pub fn category_path(dir: &Path, base: &str, category: &CategoryResult) -> PathBuf {
    dir.join(format!("{}_{}.csv", base, category.label()))
}

/// Write one category's teams as CSV.
///
/// Columns are `troop1..troopM`, an optional `dummy` column, a `->` separator
/// and `trait1..traitT`, each group padded with empty cells to the widest
/// team in the category.
pub fn write_teams<W: Write>(writer: W, teams: &[ScoredTeam]) -> Result<(), SynergyError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let max_troops = teams.iter().map(|t| t.characters.len()).max().unwrap_or(0);
    let max_traits = teams.iter().map(|t| t.active_traits.len()).max().unwrap_or(0);
    let with_dummy = teams.first().map_or(false, |t| t.dummy.is_some());

    let mut header: Vec<String> = (1..=max_troops).map(|i| format!("troop{i}")).collect();
    if with_dummy {
        header.push("dummy".to_string());
    }
    header.push("->".to_string());
    header.extend((1..=max_traits).map(|i| format!("trait{i}")));
    wtr.write_record(&header)?;

    for team in teams {
        let mut row: Vec<String> = Vec::with_capacity(header.len());
        row.extend(team.characters.iter().cloned());
        row.resize(max_troops, String::new());
        if with_dummy {
            row.push(team.dummy.as_ref().map(|d| d.to_string()).unwrap_or_default());
        }
        row.push("->".to_string());
        row.extend(team.active_traits.iter().cloned());
        row.resize(header.len(), String::new());
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export every category into `dir`, returning the written paths.
pub fn export_all(
    results: &SearchResults,
    dir: &Path,
    base: &str,
) -> Result<Vec<PathBuf>, SynergyError> {
    let mut written = Vec::new();
    for category in &results.categories {
        let path = category_path(dir, base, category);
        let file = File::create(&path)?;
        write_teams(file, &category.teams)?;
        log::info!("exported {} teams to {}", category.teams.len(), path.display());
        written.push(path);
    }
    Ok(written)
}
