//! Run report written next to the graph and cell outputs.

use serde::{Deserialize, Serialize};

/// A pair whose evaluation failed and contributed no edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedPair {
    pub followed: String,
    pub follower: String,
    pub reason: String,
}

/// Edge count between two factions, follower side first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionFlow {
    pub follower_faction: String,
    pub followed_faction: String,
    pub edges: usize,
}

/// Aggregate counts for a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub personas: usize,
    pub nodes: usize,
    pub pairs_evaluated: u64,
    pub edges: usize,
    pub mutual_pairs: usize,
    pub one_way_edges: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faction_flows: Vec<FactionFlow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique id for this run
    pub run_id: String,
    /// Seed the dice were created from
    pub seed: u64,
    pub summary: RunSummary,
    /// Roster handles with no persona row
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_handles: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_pairs: Vec<SkippedPair>,
}

impl RunReport {
    pub fn new(run_id: impl Into<String>, seed: u64, summary: RunSummary) -> Self {
        Self {
            run_id: run_id.into(),
            seed,
            summary,
            missing_handles: Vec::new(),
            skipped_pairs: Vec::new(),
        }
    }

    /// True when every pair evaluated cleanly.
    pub fn is_clean(&self) -> bool {
        self.skipped_pairs.is_empty()
    }
}
