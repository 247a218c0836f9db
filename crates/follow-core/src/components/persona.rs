//! Persona Index
//!
//! Personas with their derived reach probabilities, indexed by handle.
//! Probabilities are computed once, after truncation, and never change for
//! the rest of a run.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use social_records::{GraphNode, PersonaRecord};

/// A simulated account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub handle: String,
    pub faction: String,
    pub followers: u64,
    pub bio: String,
    /// Followers over the faction's follower total
    pub prob_for_faction: f64,
    /// Followers over the follower total of every persona
    pub prob_over_all: f64,
}

impl Persona {
    pub fn new(handle: impl Into<String>, faction: impl Into<String>, followers: u64) -> Self {
        Self {
            handle: handle.into(),
            faction: faction.into(),
            followers,
            bio: String::new(),
            prob_for_faction: 0.0,
            prob_over_all: 0.0,
        }
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    pub fn same_faction(&self, other: &Persona) -> bool {
        self.faction == other.faction
    }

    pub fn to_node(&self) -> GraphNode {
        GraphNode::new(self.handle.as_str(), self.faction.as_str(), &self.bio)
    }
}

/// Why a persona row did not make it into the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectedRow {
    MissingHandle { row: usize },
    BadFollowerCount { row: usize, handle: String },
    DuplicateHandle { row: usize, handle: String },
}

/// Handle -> persona lookup built once per run.
#[derive(Debug, Clone, Default)]
pub struct PersonaIndex {
    personas: Vec<Persona>,
    by_handle: HashMap<String, usize>,
    rejected: Vec<RejectedRow>,
}

impl PersonaIndex {
    /// Builds the index from raw rows.
    ///
    /// Rows are sorted by faction then followers (both descending), each
    /// faction is cut to its top `max_per_faction` personas, and only then
    /// are the probabilities derived.
    pub fn from_records(records: &[PersonaRecord], max_per_faction: usize) -> Self {
        let mut rejected = Vec::new();
        let mut seen = HashSet::new();
        let mut personas = Vec::with_capacity(records.len());

        for (row, record) in records.iter().enumerate() {
            let handle = match record.handle.as_deref().map(str::trim) {
                Some(h) if !h.is_empty() => h.to_string(),
                _ => {
                    tracing::warn!("Persona row {} has no handle, skipping", row);
                    rejected.push(RejectedRow::MissingHandle { row });
                    continue;
                }
            };

            let followers = match record.followers.as_ref().and_then(|f| f.parse()) {
                Some(n) => n,
                None => {
                    tracing::warn!(
                        "Persona {} (row {}) has no usable follower count: {:?}",
                        handle,
                        row,
                        record.followers
                    );
                    rejected.push(RejectedRow::BadFollowerCount { row, handle });
                    continue;
                }
            };

            if !seen.insert(handle.clone()) {
                tracing::warn!("Duplicate persona {} at row {}, keeping the first", handle, row);
                rejected.push(RejectedRow::DuplicateHandle { row, handle });
                continue;
            }

            let faction = record.faction.clone().unwrap_or_default();
            let bio = record.bio.clone().unwrap_or_default();
            personas.push(Persona::new(handle, faction, followers).with_bio(bio));
        }

        personas.sort_by(|a, b| {
            b.faction
                .cmp(&a.faction)
                .then_with(|| b.followers.cmp(&a.followers))
        });

        let mut kept_per_faction: HashMap<String, usize> = HashMap::new();
        personas.retain(|p| {
            let kept = kept_per_faction.entry(p.faction.clone()).or_insert(0);
            *kept += 1;
            *kept <= max_per_faction
        });

        let mut index = Self::from_personas(personas);
        index.rejected = rejected;
        index
    }

    /// Builds the index from personas as given, deriving probabilities.
    pub fn from_personas(mut personas: Vec<Persona>) -> Self {
        assign_probabilities(&mut personas);
        let by_handle = personas
            .iter()
            .enumerate()
            .map(|(i, p)| (p.handle.clone(), i))
            .collect();

        Self {
            personas,
            by_handle,
            rejected: Vec::new(),
        }
    }

    pub fn get(&self, handle: &str) -> Option<&Persona> {
        self.by_handle.get(handle).map(|&i| &self.personas[i])
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.by_handle.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Persona> {
        self.personas.iter()
    }

    pub fn handles(&self) -> impl Iterator<Item = &str> {
        self.personas.iter().map(|p| p.handle.as_str())
    }

    /// Members of one faction, in index order.
    pub fn faction_members<'a>(&'a self, faction: &'a str) -> impl Iterator<Item = &'a Persona> {
        self.personas.iter().filter(move |p| p.faction == faction)
    }

    /// Rows dropped while building the index.
    pub fn rejected(&self) -> &[RejectedRow] {
        &self.rejected
    }
}

/// Fills in both probabilities. A zero total yields zero rather than NaN.
fn assign_probabilities(personas: &mut [Persona]) {
    let mut faction_totals: HashMap<String, u128> = HashMap::new();
    let mut overall: u128 = 0;
    for p in personas.iter() {
        *faction_totals.entry(p.faction.clone()).or_insert(0) += p.followers as u128;
        overall += p.followers as u128;
    }

    for p in personas.iter_mut() {
        let faction_total = faction_totals.get(&p.faction).copied().unwrap_or(0);
        p.prob_for_faction = share(p.followers, faction_total);
        p.prob_over_all = share(p.followers, overall);
    }
}

fn share(followers: u64, total: u128) -> f64 {
    if total == 0 {
        0.0
    } else {
        followers as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use social_records::FollowerCount;

    const EPS: f64 = 1e-9;

    fn records() -> Vec<PersonaRecord> {
        vec![
            PersonaRecord::new("Reds", 500, "@a"),
            PersonaRecord::new("Reds", 6000, "@b").with_bio("big red"),
            PersonaRecord::new("Blues", 1500, "@c"),
            PersonaRecord::new("Blues", 0, "@d"),
            PersonaRecord::new("Blues", 2500, "@e"),
        ]
    }

    #[test]
    fn test_faction_probabilities_sum_to_one() {
        let index = PersonaIndex::from_records(&records(), 1000);

        for faction in ["Reds", "Blues"] {
            let sum: f64 = index.faction_members(faction).map(|p| p.prob_for_faction).sum();
            assert!((sum - 1.0).abs() < EPS, "{} sums to {}", faction, sum);
        }
    }

    #[test]
    fn test_overall_probabilities_sum_to_one() {
        let index = PersonaIndex::from_records(&records(), 1000);
        let sum: f64 = index.iter().map(|p| p.prob_over_all).sum();
        assert!((sum - 1.0).abs() < EPS);
    }

    #[test]
    fn test_probability_values() {
        let index = PersonaIndex::from_records(&records(), 1000);
        let a = index.get("@a").unwrap();
        assert!((a.prob_for_faction - 500.0 / 6500.0).abs() < EPS);
        assert!((a.prob_over_all - 500.0 / 10500.0).abs() < EPS);
    }

    #[test]
    fn test_zero_followers_zero_probability() {
        let index = PersonaIndex::from_records(&records(), 1000);
        let d = index.get("@d").unwrap();
        assert_eq!(d.prob_for_faction, 0.0);
        assert_eq!(d.prob_over_all, 0.0);
    }

    #[test]
    fn test_zero_total_faction_has_no_nan() {
        let rows = vec![
            PersonaRecord::new("Quiet", 0, "@q1"),
            PersonaRecord::new("Quiet", 0, "@q2"),
        ];
        let index = PersonaIndex::from_records(&rows, 1000);
        for p in index.iter() {
            assert_eq!(p.prob_for_faction, 0.0);
            assert_eq!(p.prob_over_all, 0.0);
        }
    }

    #[test]
    fn test_truncation_keeps_top_followers() {
        let index = PersonaIndex::from_records(&records(), 1);

        assert_eq!(index.len(), 2);
        assert!(index.contains("@b"));
        assert!(index.contains("@e"));
        assert!(!index.contains("@a"));
        // Derived after truncation: the lone survivor owns its faction.
        assert!((index.get("@b").unwrap().prob_for_faction - 1.0).abs() < EPS);
    }

    #[test]
    fn test_sort_order() {
        let index = PersonaIndex::from_records(&records(), 1000);
        let handles: Vec<&str> = index.handles().collect();
        assert_eq!(handles, vec!["@b", "@a", "@e", "@c", "@d"]);
    }

    #[test]
    fn test_malformed_rows() {
        let rows = vec![
            PersonaRecord {
                faction: None,
                followers: Some(FollowerCount::Count(10)),
                handle: Some("@nofaction".into()),
                bio: None,
            },
            PersonaRecord {
                faction: Some("Reds".into()),
                followers: Some(FollowerCount::Text("many".into())),
                handle: Some("@bad".into()),
                bio: None,
            },
            PersonaRecord {
                faction: Some("Reds".into()),
                followers: Some(FollowerCount::Count(10)),
                handle: Some("  ".into()),
                bio: None,
            },
            PersonaRecord::new("Reds", 20, "@dup"),
            PersonaRecord::new("Blues", 30, "@dup"),
        ];
        let index = PersonaIndex::from_records(&rows, 1000);

        let nofaction = index.get("@nofaction").unwrap();
        assert_eq!(nofaction.faction, "");
        assert_eq!(nofaction.bio, "");
        assert!(!index.contains("@bad"));
        assert_eq!(index.get("@dup").unwrap().faction, "Reds");
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.rejected(),
            &[
                RejectedRow::BadFollowerCount { row: 1, handle: "@bad".into() },
                RejectedRow::MissingHandle { row: 2 },
                RejectedRow::DuplicateHandle { row: 4, handle: "@dup".into() },
            ]
        );
    }

    #[test]
    fn test_node_label() {
        let index = PersonaIndex::from_records(&records(), 1000);
        let node = index.get("@b").unwrap().to_node();
        assert_eq!(node.id, "@b");
        assert_eq!(node.label, "(@b)[Reds] big red");
    }
}
