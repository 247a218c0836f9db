//! Sample data fixtures for testing.
//!
//! This module provides ready-made input tables for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // social-records = { path = "../social-records", features = ["test-fixtures"] }
//!
//! use social_records::fixtures;
//!
//! let personas = fixtures::sample_personas();
//! let affinities = fixtures::sample_affinities();
//! let roster = fixtures::sample_roster();
//! ```

use crate::{AffinityRecord, PersonaRecord, RosterRow};

/// Returns sample persona rows from the fixtures file.
///
/// Contains 12 rows across three factions (Greens, Ledger, Civic):
/// - one persona with zero followers (`@newsprout`)
/// - follower counts given as integers, a float and a numeric string
/// - one row without a faction (`@drifter`)
/// - one row with a non-numeric follower count (`@ghostaccount`)
/// - one row without a handle
pub fn sample_personas() -> Vec<PersonaRecord> {
    let json = include_str!("../tests/fixtures/sample_personas.json");
    serde_json::from_str(json).expect("Failed to parse sample_personas.json")
}

/// Returns sample affinity rows from the fixtures file.
///
/// Asymmetric Greens/Civic and Ledger/Civic pairs, a one-directional
/// Greens -> Ledger row, and no Ledger -> Greens row.
pub fn sample_affinities() -> Vec<AffinityRecord> {
    let json = include_str!("../tests/fixtures/sample_affinities.json");
    serde_json::from_str(json).expect("Failed to parse sample_affinities.json")
}

/// Returns the sample social graph roster.
///
/// Lists ten persona handles, one handle with no persona row
/// (`@notinthetable`), a stray header row and an empty row.
pub fn sample_roster() -> Vec<RosterRow> {
    let json = include_str!("../tests/fixtures/sample_roster.json");
    serde_json::from_str(json).expect("Failed to parse sample_roster.json")
}

/// Looks up a sample persona row by handle.
pub fn get_persona(handle: &str) -> Option<PersonaRecord> {
    sample_personas()
        .into_iter()
        .find(|p| p.handle.as_deref() == Some(handle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_parse() {
        assert_eq!(sample_personas().len(), 12);
        assert_eq!(sample_affinities().len(), 5);
        assert_eq!(sample_roster().len(), 13);
    }

    #[test]
    fn test_get_persona() {
        let leaf = get_persona("@leafline").unwrap();
        assert_eq!(leaf.faction.as_deref(), Some("Greens"));
        assert!(get_persona("@nobody").is_none());
    }
}
