//! Simulation
//!
//! Ties a validated config to the prepared persona index, affinity table and
//! roster, and runs them with a set of dice.

use social_records::{AffinityRecord, PersonaRecord, RosterRow, RunReport};

use crate::components::{affinity_template, AffinityTable, PersonaIndex};
use crate::config::Config;
use crate::output::build_report;
use crate::setup::Roster;
use crate::systems::{Dice, FollowDecider, FollowRng, PairwiseRun, RunOutcome};
use crate::SimError;

/// A finished run and its report.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub outcome: RunOutcome,
    pub report: RunReport,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    config: Config,
    personas: PersonaIndex,
    affinities: AffinityTable,
    roster: Roster,
}

impl Simulation {
    /// Prepares a run. Without roster rows every persona takes part, in
    /// persona index order.
    pub fn new(
        config: Config,
        persona_records: &[PersonaRecord],
        affinity_records: &[AffinityRecord],
        roster_rows: Option<&[RosterRow]>,
    ) -> Result<Self, SimError> {
        config.validate()?;

        let personas =
            PersonaIndex::from_records(persona_records, config.roster.max_personas_per_faction);
        let affinities = AffinityTable::from_records(affinity_records);
        let roster = match roster_rows {
            Some(rows) => Roster::from_rows(rows),
            None => Roster::from_personas(&personas),
        };

        tracing::info!(
            "Prepared {} personas ({} rows rejected), {} affinity pairs, {} roster handles",
            personas.len(),
            personas.rejected().len(),
            affinities.len(),
            roster.len()
        );

        Ok(Self {
            config,
            personas,
            affinities,
            roster,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn personas(&self) -> &PersonaIndex {
        &self.personas
    }

    pub fn affinities(&self) -> &AffinityTable {
        &self.affinities
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn decider(&self) -> FollowDecider<'_> {
        FollowDecider::new(&self.personas, &self.affinities, &self.config.follow)
    }

    /// Runs every roster pair with the given dice.
    pub fn run_with(&self, dice: &mut impl Dice) -> RunOutcome {
        PairwiseRun::new(self.decider(), &self.roster)
            .with_progress_interval(self.config.run.progress_interval)
            .run(dice)
    }

    /// Runs with seeded dice: `seed`, else the configured seed, else a
    /// fresh one. The seed used is recorded in the report.
    pub fn run(&self, seed: Option<u64>) -> SimulationResult {
        let mut dice = match seed.or(self.config.run.seed) {
            Some(seed) => FollowRng::seeded(seed),
            None => FollowRng::from_entropy(),
        };
        let run_id = uuid::Uuid::new_v4().to_string();
        tracing::info!(
            "Starting run {} with seed {} over {} pairs",
            run_id,
            dice.seed(),
            self.roster.pair_count()
        );

        let outcome = self.run_with(&mut dice);
        let report = build_report(run_id, dice.seed(), &outcome, &self.personas);

        tracing::info!(
            "Run complete: {} nodes, {} edges, {} mutual pairs, {} skipped pairs",
            report.summary.nodes,
            report.summary.edges,
            report.summary.mutual_pairs,
            report.skipped_pairs.len()
        );

        SimulationResult { outcome, report }
    }

    /// Editable affinity rows for the factions on the roster.
    pub fn affinity_template(&self) -> Vec<AffinityRecord> {
        affinity_template(&self.roster.factions(), self.config.follow.default_affinity)
    }
}
