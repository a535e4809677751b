//! Core logic for the trait synergy team search.
//!
//! Given a catalog of characters, each carrying one origin and one role
//! trait, and a level table of activation thresholds per trait, find every
//! team of a fixed size that activates the most traits, separately for each
//! possible number of high-level traits.

pub mod activation;
pub mod catalog;
pub mod combinations;
pub mod config;
pub mod error;
pub mod export;
pub mod io_utils;
pub mod report;
pub mod search;
pub mod stats;

pub use activation::{activate, Activation, ActiveTrait, Tier, TraitCounts};
pub use catalog::{reference_spec, Catalog, CatalogSpec, Character, TraitIndex};
pub use combinations::{choose, combinations};
pub use config::{Dummy, SearchConfig, DEFAULT_HIGH_LEVEL_MIN, DEFAULT_TEAM_SIZE};
pub use error::SynergyError;
pub use export::{category_path, export_all, write_teams};
pub use report::{composition, fingerprint, summarize, trait_grid};
pub use search::{CategoryResult, ScoredTeam, SearchEngine, SearchResults};
pub use stats::SearchStats;
