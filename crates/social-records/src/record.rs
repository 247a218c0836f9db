//! Input table rows.
//!
//! Rows mirror the spreadsheet columns they come from. Column headers from
//! the persona details sheet (`TwHandle`, `TwFollowers`, ...) are accepted as
//! aliases so an exported sheet can be fed in without renaming.

use serde::{Deserialize, Serialize};

/// One row of the persona details table.
///
/// Every field is optional at this level; deciding what to do with a
/// malformed row belongs to whoever builds the persona index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonaRecord {
    #[serde(default, alias = "Faction")]
    pub faction: Option<String>,
    #[serde(default, alias = "TwFollowers", alias = "follower_count")]
    pub followers: Option<FollowerCount>,
    #[serde(default, alias = "TwHandle")]
    pub handle: Option<String>,
    #[serde(default, alias = "TwBio")]
    pub bio: Option<String>,
}

impl PersonaRecord {
    pub fn new(faction: impl Into<String>, followers: u64, handle: impl Into<String>) -> Self {
        Self {
            faction: Some(faction.into()),
            followers: Some(FollowerCount::Count(followers as i64)),
            handle: Some(handle.into()),
            bio: None,
        }
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }
}

/// Follower count as it appears in a sheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FollowerCount {
    Count(i64),
    Decimal(f64),
    Text(String),
}

impl FollowerCount {
    /// Non-negative whole count, or `None` for anything else.
    pub fn parse(&self) -> Option<u64> {
        match self {
            FollowerCount::Count(n) => u64::try_from(*n).ok(),
            FollowerCount::Decimal(d) => whole_decimal(*d),
            FollowerCount::Text(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<u64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(whole_decimal))
            }
        }
    }
}

// Spreadsheet exports often turn integer columns into floats ("500.0").
fn whole_decimal(d: f64) -> Option<u64> {
    if d.is_finite() && d >= 0.0 && d.fract() == 0.0 && d <= u64::MAX as f64 {
        Some(d as u64)
    } else {
        None
    }
}

/// One row of the faction affinity table. Directional: `faction` towards
/// `other_faction`.
///
/// Like [`PersonaRecord`], every field may be missing or blank so one bad
/// row does not sink the whole table; [`AffinityRecord::entry`] says whether
/// the row is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AffinityRecord {
    #[serde(default, alias = "Faction")]
    pub faction: Option<String>,
    #[serde(default, alias = "Other_Faction")]
    pub other_faction: Option<String>,
    #[serde(default, alias = "Affinity")]
    pub affinity: Option<AffinityValue>,
}

impl AffinityRecord {
    pub fn new(faction: impl Into<String>, other_faction: impl Into<String>, affinity: f64) -> Self {
        Self {
            faction: Some(faction.into()),
            other_faction: Some(other_faction.into()),
            affinity: Some(AffinityValue::Number(affinity)),
        }
    }

    /// `(faction, other_faction, affinity)` when both names are non-blank
    /// and the affinity is numeric.
    pub fn entry(&self) -> Option<(&str, &str, f64)> {
        let faction = self.faction.as_deref().filter(|f| !f.trim().is_empty())?;
        let other = self
            .other_faction
            .as_deref()
            .filter(|f| !f.trim().is_empty())?;
        let affinity = self.affinity.as_ref()?.parse()?;
        Some((faction, other, affinity))
    }
}

/// Affinity as it appears in a sheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AffinityValue {
    Number(f64),
    Text(String),
}

impl AffinityValue {
    pub fn parse(&self) -> Option<f64> {
        match self {
            AffinityValue::Number(n) => Some(*n),
            AffinityValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// A row of the social graph sheet's handle/faction columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(default, alias = "TwHandle")]
    pub handle: Option<String>,
    #[serde(default, alias = "Faction")]
    pub faction: Option<String>,
}

/// Roster rows may be bare handles or full entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RosterRow {
    Handle(String),
    Entry(RosterEntry),
}

impl RosterRow {
    pub fn handle(&self) -> Option<&str> {
        match self {
            RosterRow::Handle(h) => Some(h.as_str()),
            RosterRow::Entry(entry) => entry.handle.as_deref(),
        }
    }

    pub fn faction(&self) -> Option<&str> {
        match self {
            RosterRow::Handle(_) => None,
            RosterRow::Entry(entry) => entry.faction.as_deref(),
        }
    }
}
