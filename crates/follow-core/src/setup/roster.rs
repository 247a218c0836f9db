//! Roster
//!
//! The ordered handle list from the social graph sheet. Positions in the
//! roster are the persona indices used for decision cells.

use social_records::RosterRow;

use crate::components::{distinct_factions, PersonaIndex};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    handles: Vec<String>,
    /// Faction column of every sheet row, including rows without a handle
    factions: Vec<String>,
}

impl Roster {
    /// Builds the roster from sheet rows. Rows without a handle do not take
    /// a position but still contribute their faction.
    pub fn from_rows(rows: &[RosterRow]) -> Self {
        let mut handles = Vec::with_capacity(rows.len());
        let mut factions = Vec::new();

        for row in rows {
            if let Some(handle) = row.handle().map(str::trim).filter(|h| !h.is_empty()) {
                handles.push(handle.to_string());
            }
            if let Some(faction) = row.faction() {
                factions.push(faction.to_string());
            }
        }

        Self { handles, factions }
    }

    /// Every persona in index order.
    pub fn from_personas(personas: &PersonaIndex) -> Self {
        Self {
            handles: personas.handles().map(str::to_string).collect(),
            factions: personas.iter().map(|p| p.faction.clone()).collect(),
        }
    }

    pub fn handles(&self) -> &[String] {
        &self.handles
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.handles.get(index).map(String::as_str)
    }

    pub fn position(&self, handle: &str) -> Option<usize> {
        self.handles.iter().position(|h| h == handle)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Number of unordered pairs the run will evaluate.
    pub fn pair_count(&self) -> u64 {
        let n = self.handles.len() as u64;
        n * n.saturating_sub(1) / 2
    }

    /// Distinct factions named on the sheet, in first-seen order.
    pub fn factions(&self) -> Vec<String> {
        distinct_factions(self.factions.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use social_records::{PersonaRecord, RosterEntry};

    fn entry(handle: Option<&str>, faction: Option<&str>) -> RosterRow {
        RosterRow::Entry(RosterEntry {
            handle: handle.map(str::to_string),
            faction: faction.map(str::to_string),
        })
    }

    #[test]
    fn test_rows_without_handles_take_no_position() {
        let roster = Roster::from_rows(&[
            entry(Some("@a"), Some("Reds")),
            entry(None, Some("Faction")),
            entry(Some("  "), Some("")),
            RosterRow::Handle("@b".into()),
            entry(Some("@c"), Some("Blues")),
        ]);

        assert_eq!(roster.handles(), &["@a", "@b", "@c"]);
        assert_eq!(roster.position("@c"), Some(2));
        assert_eq!(roster.get(1), Some("@b"));
        assert_eq!(roster.factions(), vec!["Reds", "Blues"]);
    }

    #[test]
    fn test_pair_count() {
        assert_eq!(Roster::default().pair_count(), 0);
        let roster = Roster::from_rows(&[
            RosterRow::Handle("@a".into()),
            RosterRow::Handle("@b".into()),
            RosterRow::Handle("@c".into()),
            RosterRow::Handle("@d".into()),
        ]);
        assert_eq!(roster.pair_count(), 6);
    }

    #[test]
    fn test_from_personas_follows_index_order() {
        let index = PersonaIndex::from_records(
            &[
                PersonaRecord::new("Blues", 10, "@low"),
                PersonaRecord::new("Blues", 90, "@high"),
            ],
            1000,
        );
        let roster = Roster::from_personas(&index);
        assert_eq!(roster.handles(), &["@high", "@low"]);
        assert_eq!(roster.factions(), vec!["Blues"]);
    }
}
