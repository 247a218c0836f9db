//! Run Statistics
//!
//! Summarizes a run outcome into the report counts.

use std::collections::BTreeMap;

use social_records::{FactionFlow, FollowMarker, RunReport, RunSummary};

use crate::components::PersonaIndex;
use crate::systems::RunOutcome;

/// Counts nodes, edges and mutual pairs, and tallies edges per
/// follower faction -> followed faction.
pub fn summarize(outcome: &RunOutcome, personas: &PersonaIndex) -> RunSummary {
    // Both cells of a mutual pair carry the marker.
    let mutual_cells = outcome
        .cells
        .iter()
        .filter(|c| c.value == FollowMarker::Mutual)
        .count();
    let mutual_pairs = mutual_cells / 2;

    let mut flows: BTreeMap<(String, String), usize> = BTreeMap::new();
    for edge in &outcome.graph.edges {
        let (Some(follower), Some(followed)) =
            (personas.get(&edge.follower), personas.get(&edge.followed))
        else {
            continue;
        };
        *flows
            .entry((follower.faction.clone(), followed.faction.clone()))
            .or_insert(0) += 1;
    }

    RunSummary {
        personas: personas.len(),
        nodes: outcome.graph.nodes.len(),
        pairs_evaluated: outcome.pairs_evaluated,
        edges: outcome.graph.edges.len(),
        mutual_pairs,
        one_way_edges: outcome.graph.edges.len().saturating_sub(mutual_cells),
        faction_flows: flows
            .into_iter()
            .map(|((follower_faction, followed_faction), edges)| FactionFlow {
                follower_faction,
                followed_faction,
                edges,
            })
            .collect(),
    }
}

/// Builds the full report for a run.
pub fn build_report(
    run_id: impl Into<String>,
    seed: u64,
    outcome: &RunOutcome,
    personas: &PersonaIndex,
) -> RunReport {
    let mut report = RunReport::new(run_id, seed, summarize(outcome, personas));
    report.missing_handles = outcome.missing_handles.clone();
    report.skipped_pairs = outcome.skipped_pairs.clone();
    report
}
