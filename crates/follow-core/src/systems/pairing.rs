//! Pairwise Run
//!
//! Walks every unordered pair of the roster once, outer index first, and
//! accumulates nodes, edges and decision cells.
//!
//! For roster positions `i < j`, `roster[i]` is the followed persona and
//! `roster[j]` the follower:
//! - `x` fires: edge `roster[j] -> roster[i]`, cell `(i, j) = x`
//! - `y` fires: edge `roster[i] -> roster[j]`, cell `(j, i) = y`

use std::collections::HashSet;

use social_records::{DirectedEdge, FollowCell, GraphExport, SkippedPair};

use crate::setup::Roster;
use crate::systems::decision::{DecisionError, FollowDecider};
use crate::systems::dice::Dice;

/// Everything a run produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutcome {
    pub graph: GraphExport,
    pub cells: Vec<FollowCell>,
    pub pairs_evaluated: u64,
    /// Roster handles with no persona, in roster order
    pub missing_handles: Vec<String>,
    pub skipped_pairs: Vec<SkippedPair>,
}

pub struct PairwiseRun<'a> {
    decider: FollowDecider<'a>,
    roster: &'a Roster,
    progress_interval: u64,
}

impl<'a> PairwiseRun<'a> {
    pub fn new(decider: FollowDecider<'a>, roster: &'a Roster) -> Self {
        Self {
            decider,
            roster,
            progress_interval: 0,
        }
    }

    /// Log progress every `interval` pairs (0 disables).
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn run(&self, dice: &mut impl Dice) -> RunOutcome {
        let mut outcome = RunOutcome {
            graph: self.collect_nodes(),
            ..RunOutcome::default()
        };
        outcome.missing_handles = self.missing_handles();

        let handles = self.roster.handles();
        let total_pairs = self.roster.pair_count();

        for i in 0..handles.len() {
            for j in (i + 1)..handles.len() {
                let followed = handles[i].as_str();
                let follower = handles[j].as_str();
                outcome.pairs_evaluated += 1;

                if followed == follower {
                    tracing::debug!("Roster repeats {} at {} and {}, skipping", followed, i, j);
                } else {
                    match self.decider.evaluate(followed, follower, dice) {
                        Ok(evaluation) => {
                            let decision = evaluation.decision;
                            if decision.x.fires() {
                                outcome.graph.add_edge(DirectedEdge::new(follower, followed));
                                outcome.cells.push(FollowCell::new(i, j, decision.x));
                            }
                            if decision.y.fires() {
                                outcome.graph.add_edge(DirectedEdge::new(followed, follower));
                                outcome.cells.push(FollowCell::new(j, i, decision.y));
                            }
                        }
                        Err(DecisionError::UnknownPersona(_)) => {}
                        Err(e) => {
                            tracing::warn!(
                                "Error processing friendship between {} and {}: {}",
                                followed,
                                follower,
                                e
                            );
                            outcome.skipped_pairs.push(SkippedPair {
                                followed: followed.to_string(),
                                follower: follower.to_string(),
                                reason: e.to_string(),
                            });
                        }
                    }
                }

                if self.progress_interval > 0
                    && outcome.pairs_evaluated % self.progress_interval == 0
                {
                    tracing::info!(
                        "Processing edges: {} / {}",
                        outcome.pairs_evaluated,
                        total_pairs
                    );
                }
            }
        }

        outcome
    }

    /// One node per roster handle with a persona, first occurrence only.
    fn collect_nodes(&self) -> GraphExport {
        let personas = self.decider.personas();
        let mut graph = GraphExport::new();
        let mut seen = HashSet::new();
        for handle in self.roster.handles() {
            if let Some(persona) = personas.get(handle) {
                if seen.insert(handle.as_str()) {
                    graph.add_node(persona.to_node());
                }
            }
        }
        graph
    }

    fn missing_handles(&self) -> Vec<String> {
        let personas = self.decider.personas();
        let mut missing: Vec<String> = Vec::new();
        for handle in self.roster.handles() {
            if !personas.contains(handle) && !missing.contains(handle) {
                missing.push(handle.clone());
            }
        }
        missing
    }
}
