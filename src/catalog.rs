//! Character catalog and trait level table.
//!
//! A [`Catalog`] is built once from a [`CatalogSpec`] (either the built-in
//! reference data or a JSON file) and is never mutated afterwards. Trait
//! identifiers are interned into dense indices so that team trait counts can
//! be kept in a flat vector during the search.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::SynergyError;

/// Dense index of a trait inside a [`Catalog`].
pub type TraitIndex = usize;

/// Serialized form of a catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSpec {
    /// Origin traits in display order. Derived from the characters when empty.
    #[serde(default)]
    pub origins: Vec<String>,
    /// Role traits in display order. Derived from the characters when empty.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Ascending activation thresholds per trait.
    pub levels: BTreeMap<String, Vec<u32>>,
    /// Character id mapped to its `[origin, role]` pair.
    pub characters: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: String,
    pub origin: TraitIndex,
    pub role: TraitIndex,
}

impl Character {
    pub fn traits(&self) -> [TraitIndex; 2] {
        [self.origin, self.role]
    }
}

/// Validated, interned catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    traits: Vec<String>,
    thresholds: Vec<Vec<u32>>,
    characters: Vec<Character>,
    origins: Vec<TraitIndex>,
    roles: Vec<TraitIndex>,
}

impl Catalog {
    /// Validate a spec and intern its traits. Characters are stored in
    /// ascending id order, which is the visiting order of every search.
    pub fn new(spec: CatalogSpec) -> Result<Self, SynergyError> {
        for (name, levels) in &spec.levels {
            validate_levels(name, levels)?;
        }

        let mut names: BTreeSet<&str> = spec.levels.keys().map(String::as_str).collect();
        for (id, pair) in &spec.characters {
            if pair.len() != 2 {
                return Err(SynergyError::Config(format!(
                    "character '{id}' must carry exactly two traits, found {}",
                    pair.len()
                )));
            }
            if pair[0] == pair[1] {
                return Err(SynergyError::Config(format!(
                    "character '{id}' carries trait '{}' twice",
                    pair[0]
                )));
            }
            names.extend(pair.iter().map(String::as_str));
        }
        names.extend(spec.origins.iter().map(String::as_str));
        names.extend(spec.roles.iter().map(String::as_str));

        let traits: Vec<String> = names.into_iter().map(str::to_string).collect();
        let index_of = |name: &str| -> TraitIndex {
            // every name was inserted above
            traits.binary_search_by(|t| t.as_str().cmp(name)).unwrap_or_default()
        };

        let thresholds = traits
            .iter()
            .map(|t| spec.levels.get(t).cloned().unwrap_or_default())
            .collect();

        let characters: Vec<Character> = spec
            .characters
            .iter()
            .map(|(id, pair)| Character {
                id: id.clone(),
                origin: index_of(&pair[0]),
                role: index_of(&pair[1]),
            })
            .collect();

        let origins = if spec.origins.is_empty() {
            characters
                .iter()
                .map(|c| c.origin)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        } else {
            spec.origins.iter().map(|o| index_of(o)).collect()
        };
        let roles = if spec.roles.is_empty() {
            characters
                .iter()
                .map(|c| c.role)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        } else {
            spec.roles.iter().map(|r| index_of(r)).collect()
        };

        Ok(Self {
            traits,
            thresholds,
            characters,
            origins,
            roles,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, SynergyError> {
        let spec: CatalogSpec = serde_json::from_str(json)?;
        Self::new(spec)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SynergyError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// The built-in game tables.
    pub fn reference() -> Self {
        Self::new(reference_spec()).expect("reference catalog is valid")
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn trait_count(&self) -> usize {
        self.traits.len()
    }

    pub fn trait_name(&self, index: TraitIndex) -> &str {
        &self.traits[index]
    }

    pub fn trait_index(&self, name: &str) -> Option<TraitIndex> {
        self.traits.binary_search_by(|t| t.as_str().cmp(name)).ok()
    }

    /// Ascending thresholds of a trait; empty if the trait never activates.
    pub fn thresholds(&self, index: TraitIndex) -> &[u32] {
        &self.thresholds[index]
    }

    pub fn origins(&self) -> &[TraitIndex] {
        &self.origins
    }

    pub fn roles(&self) -> &[TraitIndex] {
        &self.roles
    }
}

fn validate_levels(name: &str, levels: &[u32]) -> Result<(), SynergyError> {
    if levels.is_empty() {
        return Err(SynergyError::Config(format!(
            "trait '{name}' has no thresholds"
        )));
    }
    if levels[0] < 2 {
        return Err(SynergyError::Config(format!(
            "trait '{name}' has threshold {} below 2",
            levels[0]
        )));
    }
    if levels.windows(2).any(|w| w[0] >= w[1]) {
        return Err(SynergyError::Config(format!(
            "thresholds of trait '{name}' must be strictly increasing"
        )));
    }
    Ok(())
}

const ORIGINS: [&str; 7] = ["noble", "goblin", "clan", "undead", "ace", "pekka", "giant"];
const ROLES: [&str; 6] = ["brutalist", "assassin", "ranger", "blaster", "brawler", "superstar"];

const LEVELS: [(&str, &[u32]); 13] = [
    ("goblin", &[2, 4]),
    ("assassin", &[2, 4]),
    ("pekka", &[2]),
    ("brawler", &[2, 4]),
    ("undead", &[2, 4]),
    ("superstar", &[2, 4]),
    ("clan", &[2, 4]),
    ("brutalist", &[2, 4]),
    ("noble", &[2, 4]),
    ("blaster", &[2, 4]),
    ("giant", &[2]),
    ("ranger", &[2, 4]),
    ("ace", &[2, 4]),
];

const CHARACTERS: [(&str, &str, &str); 24] = [
    ("goblins", "goblin", "assassin"),
    ("spear_gobs", "goblin", "blaster"),
    ("barbarians", "clan", "brawler"),
    ("skele_drag", "undead", "ranger"),
    ("musketeer", "noble", "superstar"),
    ("valkyrie", "clan", "brutalist"),
    ("pekka", "pekka", "brawler"),
    ("wizard", "clan", "blaster"),
    ("mini_pekka", "pekka", "brutalist"),
    ("prince", "noble", "brawler"),
    ("dart_goblin", "goblin", "ranger"),
    ("elec_giant", "giant", "superstar"),
    ("executioner", "ace", "blaster"),
    ("princess", "noble", "blaster"),
    ("mega_knight", "ace", "brawler"),
    ("royal_ghost", "undead", "assassin"),
    ("bandit", "ace", "assassin"),
    ("gob_machine", "goblin", "brutalist"),
    ("skele_king", "undead", "brutalist"),
    ("gold_knight", "noble", "assassin"),
    ("archer_queen", "clan", "ranger"),
    ("monk", "ace", "superstar"),
    ("royal_giant", "giant", "ranger"),
    ("witch", "undead", "superstar"),
];

/// Spec of the built-in reference catalog.
pub fn reference_spec() -> CatalogSpec {
    CatalogSpec {
        origins: ORIGINS.iter().map(|s| s.to_string()).collect(),
        roles: ROLES.iter().map(|s| s.to_string()).collect(),
        levels: LEVELS
            .iter()
            .map(|(t, l)| (t.to_string(), l.to_vec()))
            .collect(),
        characters: CHARACTERS
            .iter()
            .map(|(id, o, r)| (id.to_string(), vec![o.to_string(), r.to_string()]))
            .collect(),
    }
}
