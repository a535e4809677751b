use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::SynergyError;

/// Team size used when none is given.
pub const DEFAULT_TEAM_SIZE: usize = 6;
/// Smallest threshold that counts as high-level.
pub const DEFAULT_HIGH_LEVEL_MIN: u32 = 4;

/// Fixed pseudo-character contributing one unit to each of two traits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dummy {
    pub first: String,
    pub second: String,
}

impl Dummy {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

impl fmt::Display for Dummy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.first, self.second)
    }
}

impl FromStr for Dummy {
    type Err = SynergyError;

    /// Parse `"{trait1}+{trait2}"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('+') {
            Some((a, b)) if !a.trim().is_empty() && !b.trim().is_empty() => {
                Ok(Dummy::new(a.trim(), b.trim()))
            }
            _ => Err(SynergyError::Config(format!(
                "dummy '{s}' must look like trait1+trait2"
            ))),
        }
    }
}

/// Runtime parameters of one search run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of characters per team.
    pub team_size: usize,
    /// Optional dummy added to every team.
    pub dummy: Option<Dummy>,
    /// Active thresholds at or above this value are high-level (L2).
    pub high_level_min: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            team_size: DEFAULT_TEAM_SIZE,
            dummy: None,
            high_level_min: DEFAULT_HIGH_LEVEL_MIN,
        }
    }
}

impl SearchConfig {
    pub fn new(team_size: usize) -> Self {
        Self {
            team_size,
            ..Self::default()
        }
    }

    pub fn with_dummy(mut self, dummy: Dummy) -> Self {
        self.dummy = Some(dummy);
        self
    }

    pub fn validate(&self) -> Result<(), SynergyError> {
        if self.team_size == 0 {
            return Err(SynergyError::Config("team size must be at least 1".into()));
        }
        if self.high_level_min < 2 {
            return Err(SynergyError::Config(
                "high-level threshold must be at least 2".into(),
            ));
        }
        if let Some(d) = &self.dummy {
            if d.first == d.second {
                return Err(SynergyError::Config(format!(
                    "dummy must name two distinct traits, got {d}"
                )));
            }
        }
        Ok(())
    }

    /// Base name of exported files, e.g. `6chars` or `6chars_with_dummy`.
    pub fn base_name(&self) -> String {
        let suffix = if self.dummy.is_some() { "_with_dummy" } else { "" };
        format!("{}chars{}", self.team_size, suffix)
    }
}
