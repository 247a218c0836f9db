//! Faction Affinity
//!
//! Directional faction -> other faction weights. `(A, B)` and `(B, A)` are
//! separate entries and may differ.

use std::collections::{HashMap, HashSet};

use social_records::AffinityRecord;

/// Header text that leaks into the faction column of exported sheets.
pub const FACTION_HEADER: &str = "Faction";

/// Directional affinity lookup.
#[derive(Debug, Clone, Default)]
pub struct AffinityTable {
    entries: HashMap<String, HashMap<String, f64>>,
}

impl AffinityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from rows. The first row for an ordered pair wins;
    /// rows missing a faction name or a numeric affinity, and rows with a
    /// non-finite affinity, are skipped so their pair falls back to the
    /// default.
    pub fn from_records(records: &[AffinityRecord]) -> Self {
        let mut table = Self::new();
        for (row, record) in records.iter().enumerate() {
            let Some((faction, other_faction, affinity)) = record.entry() else {
                tracing::warn!("Affinity row {} is incomplete, skipping: {:?}", row, record);
                continue;
            };
            if !affinity.is_finite() {
                tracing::warn!(
                    "Affinity {} -> {} is not a finite number, skipping",
                    faction,
                    other_faction
                );
                continue;
            }
            if table.lookup(faction, other_faction).is_some() {
                tracing::warn!(
                    "Duplicate affinity row {} -> {}, keeping the first",
                    faction,
                    other_faction
                );
                continue;
            }
            table.insert(faction, other_faction, affinity);
        }
        table
    }

    pub fn insert(&mut self, faction: &str, other_faction: &str, affinity: f64) {
        self.entries
            .entry(faction.to_string())
            .or_default()
            .insert(other_faction.to_string(), affinity);
    }

    pub fn lookup(&self, faction: &str, other_faction: &str) -> Option<f64> {
        self.entries.get(faction)?.get(other_faction).copied()
    }

    /// Looks up `faction -> other_faction`, falling back to `default`.
    pub fn affinity_or_default(&self, faction: &str, other_faction: &str, default: f64) -> f64 {
        self.lookup(faction, other_faction).unwrap_or_else(|| {
            tracing::debug!(
                "Affinity between {} and {} not found, using default {}",
                faction,
                other_faction,
                default
            );
            default
        })
    }

    /// Number of ordered pairs with an entry.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Distinct faction names in first-seen order, without the sheet header
/// and without blanks.
pub fn distinct_factions<'a>(factions: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    factions
        .into_iter()
        .map(str::trim)
        .filter(|f| !f.is_empty() && *f != FACTION_HEADER)
        .filter(|f| seen.insert(*f))
        .map(str::to_string)
        .collect()
}

/// An editable affinity table: every ordered pair of distinct factions,
/// each set to `default_affinity`.
pub fn affinity_template(factions: &[String], default_affinity: f64) -> Vec<AffinityRecord> {
    factions
        .iter()
        .flat_map(move |faction| {
            factions
                .iter()
                .filter(move |other| *other != faction)
                .map(move |other| {
                    AffinityRecord::new(faction.as_str(), other.as_str(), default_affinity)
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_lookup() {
        let table = AffinityTable::from_records(&[
            AffinityRecord::new("Reds", "Blues", 0.8),
            AffinityRecord::new("Blues", "Reds", 0.2),
        ]);

        assert_eq!(table.lookup("Reds", "Blues"), Some(0.8));
        assert_eq!(table.lookup("Blues", "Reds"), Some(0.2));
        assert_eq!(table.lookup("Reds", "Greens"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_missing_pair_uses_default() {
        let table = AffinityTable::from_records(&[AffinityRecord::new("Reds", "Blues", 0.8)]);
        assert_eq!(table.affinity_or_default("Blues", "Reds", 0.1), 0.1);
        assert_eq!(table.affinity_or_default("Reds", "Blues", 0.1), 0.8);
    }

    #[test]
    fn test_first_row_wins_and_non_finite_skipped() {
        let table = AffinityTable::from_records(&[
            AffinityRecord::new("Reds", "Blues", f64::NAN),
            AffinityRecord::new("Reds", "Blues", 0.5),
            AffinityRecord::new("Reds", "Blues", 0.9),
        ]);
        assert_eq!(table.lookup("Reds", "Blues"), Some(0.5));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_incomplete_rows_fall_back_to_default() {
        let rows: Vec<AffinityRecord> = serde_json::from_str(
            r#"[
                {"Faction": "Reds", "Other_Faction": "Blues", "Affinity": 0.4},
                {"Faction": "Blues", "Other_Faction": "Reds", "Affinity": null},
                {"Faction": "Blues", "Affinity": 0.9},
                {"Faction": "Greens", "Other_Faction": "Reds", "Affinity": 0.7}
            ]"#,
        )
        .unwrap();
        let table = AffinityTable::from_records(&rows);

        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("Reds", "Blues"), Some(0.4));
        assert_eq!(table.lookup("Greens", "Reds"), Some(0.7));
        assert_eq!(table.affinity_or_default("Blues", "Reds", 0.1), 0.1);
        assert_eq!(table.affinity_or_default("Blues", "Greens", 0.1), 0.1);
    }

    #[test]
    fn test_incomplete_row_does_not_shadow_later_row() {
        let mut blank = AffinityRecord::new("Reds", "Blues", 0.0);
        blank.affinity = None;
        let table =
            AffinityTable::from_records(&[blank, AffinityRecord::new("Reds", "Blues", 0.6)]);
        assert_eq!(table.lookup("Reds", "Blues"), Some(0.6));
    }

    #[test]
    fn test_unbounded_values_accepted() {
        let table = AffinityTable::from_records(&[
            AffinityRecord::new("Reds", "Blues", -2.5),
            AffinityRecord::new("Blues", "Reds", 40.0),
        ]);
        assert_eq!(table.lookup("Reds", "Blues"), Some(-2.5));
        assert_eq!(table.lookup("Blues", "Reds"), Some(40.0));
    }

    #[test]
    fn test_distinct_factions() {
        let factions = distinct_factions(["Reds", "Faction", "", "Blues", "Reds", " Greens "]);
        assert_eq!(factions, vec!["Reds", "Blues", "Greens"]);
    }

    #[test]
    fn test_affinity_template_covers_ordered_pairs() {
        let factions = vec!["Reds".to_string(), "Blues".to_string(), "Greens".to_string()];
        let template = affinity_template(&factions, 0.1);

        assert_eq!(template.len(), 6);
        assert!(template.iter().all(|r| r.faction != r.other_faction));
        assert!(template
            .iter()
            .all(|r| r.entry().map(|(_, _, a)| a) == Some(0.1)));
        assert!(template.contains(&AffinityRecord::new("Blues", "Reds", 0.1)));
        assert!(template.contains(&AffinityRecord::new("Reds", "Blues", 0.1)));
    }

    #[test]
    fn test_affinity_template_single_faction() {
        assert!(affinity_template(&["Solo".to_string()], 0.1).is_empty());
    }
}
